use alloc::vec::Vec;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use super::*;

/// Uniform generator that keeps the first clicked tile and its neighbors free of mines, so the first click always
/// opens a zero region.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator<R = SmallRng> {
    rng: R,
}

impl RandomMineGenerator {
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: rand::Rng> RandomMineGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: rand::Rng> MineGenerator for RandomMineGenerator<R> {
    fn generate(&mut self, board: &Board, start: TileIndex) -> Result<Board> {
        let start = board.validate_index(start)?;
        let excluded = start_area(board, start);

        let mut candidates: Vec<TileIndex> = (0..board.tile_count())
            .filter(|index| !excluded.contains(index))
            .collect();

        let mines = usize::from(board.mine_total());
        if mines > candidates.len() {
            log::warn!(
                "Cannot place {} mines outside the start area, only {} tiles available",
                mines,
                candidates.len()
            );
            return Err(GameError::GenerationInfeasible {
                mines,
                candidates: candidates.len(),
            });
        }

        // partial Fisher-Yates, the shuffled prefix is a uniform sample without replacement
        let (chosen, _) = candidates.partial_shuffle(&mut self.rng, mines);

        let mut generated = Board::new(board.config());
        generated.place_mines(chosen.iter().copied());
        log::debug!(
            "Placed {} mines on a {}x{} board, start tile {}",
            mines,
            board.width(),
            board.height(),
            start
        );
        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(config: GameConfig, start: TileIndex, seed: u64) -> Board {
        RandomMineGenerator::seeded(seed)
            .generate(&Board::new(config), start)
            .unwrap()
    }

    #[test]
    fn start_area_is_mine_free_and_zero() {
        for width in MIN_SIDE..=MAX_SIDE {
            for height in MIN_SIDE..=MAX_SIDE {
                let base = GameConfig::new_unchecked(width, height, 0);
                let (min_mines, max_mines) = base.mine_bounds();
                for mines in [min_mines, max_mines] {
                    let config = GameConfig::new_unchecked(width, height, mines);
                    for start in [0, usize::from(config.total_tiles()) / 2] {
                        let board = generate(config, start, u64::from(mines) + start as u64);

                        assert_eq!(board[start].value(), TileValue::Count(0));
                        for neighbor in board.neighbors(start) {
                            assert!(!board[neighbor].is_mine());
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn places_exact_mine_total() {
        let config = GameConfig::new_unchecked(9, 9, 10);
        for seed in 0..200 {
            let board = generate(config, 40, seed);
            let mines = board.iter().filter(|(_, tile)| tile.is_mine()).count();
            assert_eq!(mines, 10);
            assert!(board.is_generated());
        }
    }

    #[test]
    fn counts_match_neighboring_mines() {
        let board = generate(GameConfig::new_unchecked(16, 16, 76), 0, 7);
        for (index, tile) in board.iter() {
            if let TileValue::Count(count) = tile.value() {
                let expected = board
                    .neighbors(index)
                    .filter(|&pos| board[pos].is_mine())
                    .count();
                assert_eq!(usize::from(count), expected);
            }
        }
    }

    #[test]
    fn same_seed_same_board() {
        let config = GameConfig::new_unchecked(9, 9, 10);
        assert_eq!(generate(config, 12, 99), generate(config, 12, 99));
    }

    #[test]
    fn every_candidate_can_be_chosen() {
        // 4x4 with one mine and a corner start leaves 12 candidates
        let config = GameConfig::new_unchecked(4, 4, 1);
        let mut hits = [0u32; 16];
        for seed in 0..2_000 {
            let board = generate(config, 0, seed);
            for (index, tile) in board.iter() {
                if tile.is_mine() {
                    hits[index] += 1;
                }
            }
        }

        for excluded in [0, 1, 4, 5] {
            assert_eq!(hits[excluded], 0);
        }
        for (index, &count) in hits.iter().enumerate() {
            if ![0, 1, 4, 5].contains(&index) {
                // expected ~166 each
                assert!(count > 80, "tile {index} chosen only {count} times");
            }
        }
    }

    #[test]
    fn too_many_mines_is_infeasible() {
        let config = GameConfig::new_unchecked(4, 4, 8);
        let result = RandomMineGenerator::seeded(1).generate(&Board::new(config), 5);
        assert_eq!(
            result,
            Err(GameError::GenerationInfeasible {
                mines: 8,
                candidates: 7
            })
        );
    }

    #[test]
    fn start_outside_board_is_rejected() {
        let config = GameConfig::default();
        let result = RandomMineGenerator::seeded(1).generate(&Board::new(config), 81);
        assert!(matches!(result, Err(GameError::InvalidIndex { .. })));
    }
}
