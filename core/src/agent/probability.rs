use alloc::vec;
use alloc::vec::Vec;

use super::{ClueOdds, Observation};
use crate::*;

/// Probabilities closer than this are treated as equal when picking the safest tiles.
pub const PROBABILITY_EPSILON: f64 = 1e-9;

/// Estimated mine probability of every hidden tile. Open and flagged tiles have none.
#[derive(Clone, Debug, PartialEq)]
pub struct ProbabilityMap {
    probs: Vec<Option<f64>>,
}

impl ProbabilityMap {
    /// Combines the local clue odds, keeping the highest bound per tile, then fills every hidden tile no clue touches
    /// with the base rate of unflagged mines over unopened tiles.
    pub fn build(obs: &Observation, odds: &[ClueOdds]) -> Self {
        let mut map = Self {
            probs: vec![None; obs.tile_count()],
        };

        for clue in odds {
            let probability = clue.probability();
            for &tile in &clue.hidden {
                map.raise(tile, probability);
            }
        }

        let base_rate = base_rate(obs);
        for index in 0..obs.tile_count() {
            if obs.is_hidden(index) && map.probs[index].is_none() {
                map.probs[index] = Some(base_rate);
            }
        }

        map
    }

    #[cfg(test)]
    fn get(&self, index: TileIndex) -> Option<f64> {
        self.probs.get(index).copied().flatten()
    }

    /// All tiles tied for the lowest probability, in index order.
    pub fn safest(&self) -> (Vec<TileIndex>, f64) {
        let mut min = f64::INFINITY;
        let mut tiles = Vec::new();

        for (index, probability) in self.probs.iter().enumerate() {
            let Some(probability) = *probability else {
                continue;
            };
            if approx_eq(probability, min) {
                tiles.push(index);
            } else if probability < min {
                min = probability;
                tiles.clear();
                tiles.push(index);
            }
        }

        (tiles, min)
    }

    fn raise(&mut self, index: TileIndex, probability: f64) {
        if self.probs[index].is_none_or(|current| probability > current) {
            self.probs[index] = Some(probability);
        }
    }
}

/// Mines not accounted for by a flag, spread over every unopened tile.
pub fn base_rate(obs: &Observation) -> f64 {
    let unopened = obs.hidden_or_flagged();
    if unopened == 0 {
        return 0.0;
    }
    let mines_left = f64::from(obs.mine_total) - obs.flag_count() as f64;
    (mines_left / unopened as f64).clamp(0.0, 1.0)
}

fn approx_eq(a: f64, b: f64) -> bool {
    let delta = a - b;
    delta < PROBABILITY_EPSILON && delta > -PROBABILITY_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observe(mines: &[TileIndex], open: &[TileIndex], flags: &[TileIndex]) -> Observation {
        let mut board = Board::with_mines(4, 4, mines).unwrap();
        for &index in open {
            board = engine::open(&board, index).unwrap().board;
        }
        for &index in flags {
            board = engine::toggle_flag(&board, index).unwrap().board;
        }
        Observation::from_board(&board)
    }

    #[test]
    fn unconstrained_tiles_get_base_rate() {
        // two mines, one open tile: 15 unopened tiles
        let obs = observe(&[4, 15], &[0], &[]);
        let odds = clue_odds(&obs);

        let map = ProbabilityMap::build(&obs, &odds);

        assert_eq!(map.get(0), None);
        assert!(approx_eq(map.get(1).unwrap(), 1.0 / 3.0));
        assert!(approx_eq(map.get(10).unwrap(), 2.0 / 15.0));
        assert!(approx_eq(base_rate(&obs), 2.0 / 15.0));
    }

    #[test]
    fn base_rate_discounts_flags() {
        let obs = observe(&[4, 15], &[0], &[15]);

        assert!(approx_eq(base_rate(&obs), 1.0 / 15.0));
    }

    #[test]
    fn overlapping_clues_keep_the_highest_bound() {
        // 1 1 # #
        // * # # #
        let obs = observe(&[4], &[0, 1], &[]);
        let odds = clue_odds(&obs);
        // clue 0 sees {4, 5} with 1 mine, clue 1 sees {2, 4, 5, 6} with 1 mine
        let map = ProbabilityMap::build(&obs, &odds);

        assert!(approx_eq(map.get(5).unwrap(), 0.5));
        assert!(approx_eq(map.get(4).unwrap(), 0.5));
        assert!(approx_eq(map.get(2).unwrap(), 0.25));
        assert!(approx_eq(map.get(6).unwrap(), 0.25));
    }

    #[test]
    fn safest_collects_ties() {
        let map = ProbabilityMap {
            probs: vec![None, Some(0.5), Some(0.2), Some(0.2 + 1e-12), Some(0.3), None],
        };

        let (tiles, probability) = map.safest();

        assert_eq!(tiles, [2, 3]);
        assert!(approx_eq(probability, 0.2));
    }

    #[test]
    fn safest_on_empty_map_is_empty() {
        let map = ProbabilityMap {
            probs: vec![None, None],
        };
        assert!(map.safest().0.is_empty());
    }
}
