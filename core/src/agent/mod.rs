use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::*;
pub use observation::*;
pub use odds::*;
pub use probability::*;

mod observation;
mod odds;
mod probability;

/// What the agent did in one pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AgentMove {
    /// The game is over, nothing to do
    Idle,
    /// The config is outside the playable range, the game was forfeited
    Aborted,
    /// Opening click on a fresh board
    FirstClick {
        tile: TileIndex,
        outcome: RevealOutcome,
    },
    /// Every hidden neighbor of `clue` is a mine
    Flag { clue: TileIndex, tiles: Neighborhood },
    /// No hidden neighbor of `clue` is a mine
    Open {
        clue: TileIndex,
        tiles: Neighborhood,
        outcome: RevealOutcome,
    },
    /// No certain move, opened one of the least likely tiles
    Guess {
        tile: TileIndex,
        probability: f64,
        outcome: RevealOutcome,
    },
    /// Only flagged tiles were left, so at least one flag was wrong; all of them were removed
    ClearFlags { count: CellCount },
}

/// Single-clue deduction agent with a probability fallback.
///
/// Every [`step`](Self::step) on an unfinished game changes at least one tile, so repeated steps always end in a win
/// or a loss.
#[derive(Clone, Debug)]
pub struct SolverAgent<R = SmallRng> {
    rng: R,
}

impl SolverAgent {
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: rand::Rng> SolverAgent<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Performs exactly one deduction pass on `game`.
    pub fn step<G: MineGenerator>(&mut self, game: &mut GameController<G>) -> Result<AgentMove> {
        if game.is_finished() {
            return Ok(AgentMove::Idle);
        }

        let config = game.config();
        if !config.is_playable() {
            log::warn!(
                "Refusing to play {}x{} with {} mines, forfeiting",
                config.width,
                config.height,
                config.mines
            );
            game.forfeit();
            return Ok(AgentMove::Aborted);
        }

        if game.state().is_initial() {
            let tile = self.rng.random_range(0..game.board().tile_count());
            log::debug!("Initial click on {}", tile);
            let outcome = game.click(tile)?.outcome;
            return Ok(AgentMove::FirstClick { tile, outcome });
        }

        let obs = Observation::from_board(game.board());
        let odds = clue_odds(&obs);

        for clue in &odds {
            match clue.certainty() {
                Some(Certainty::Mine) => {
                    log::debug!("Clue {} forces mines on {:?}", clue.clue, clue.hidden);
                    for &tile in &clue.hidden {
                        game.flag(tile)?;
                    }
                    return Ok(AgentMove::Flag {
                        clue: clue.clue,
                        tiles: clue.hidden.clone(),
                    });
                }
                Some(Certainty::Safe) => {
                    log::debug!("Clue {} clears {:?}", clue.clue, clue.hidden);
                    let mut outcome = RevealOutcome::NoChange;
                    for &tile in &clue.hidden {
                        outcome = outcome | game.click(tile)?.outcome;
                    }
                    return Ok(AgentMove::Open {
                        clue: clue.clue,
                        tiles: clue.hidden.clone(),
                        outcome,
                    });
                }
                None => {}
            }
        }

        let map = ProbabilityMap::build(&obs, &odds);
        let (safest, probability) = map.safest();
        let Some(&tile) = safest.choose(&mut self.rng) else {
            return self.clear_flags(game);
        };

        log::debug!(
            "Guessing {} with mine probability {:.3} ({} tied)",
            tile,
            probability,
            safest.len()
        );
        let outcome = game.click(tile)?.outcome;
        Ok(AgentMove::Guess {
            tile,
            probability,
            outcome,
        })
    }

    /// Steps until the game ends or `max_steps` passes have run. Returns the number of passes.
    pub fn run<G: MineGenerator>(
        &mut self,
        game: &mut GameController<G>,
        max_steps: usize,
    ) -> Result<usize> {
        let mut steps = 0;
        while steps < max_steps && !game.is_finished() {
            self.step(game)?;
            steps += 1;
        }
        Ok(steps)
    }

    fn clear_flags<G: MineGenerator>(&mut self, game: &mut GameController<G>) -> Result<AgentMove> {
        let flagged: alloc::vec::Vec<_> = game
            .board()
            .iter()
            .filter(|(_, tile)| tile.state() == TileState::Flagged)
            .map(|(index, _)| index)
            .collect();
        log::warn!("No hidden tile left, removing {} flags", flagged.len());

        let mut count = 0;
        for index in flagged {
            if game.flag(index)?.has_update() {
                count += 1;
            }
        }
        Ok(AgentMove::ClearFlags { count })
    }
}
