use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use super::Observation;
use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Certainty {
    /// Every hidden neighbor is a mine
    Mine,
    /// No hidden neighbor is a mine
    Safe,
}

/// The local constraint of one clue: `remaining` mines among `hidden`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueOdds {
    pub clue: TileIndex,
    /// Clue value minus adjacent flags. Negative when the neighborhood is over-flagged.
    pub remaining: i16,
    pub hidden: Neighborhood,
}

impl ClueOdds {
    pub fn certainty(&self) -> Option<Certainty> {
        let hidden = self.hidden.len() as i16;
        if self.remaining == 0 {
            Some(Certainty::Safe)
        } else if self.remaining == hidden {
            Some(Certainty::Mine)
        } else {
            None
        }
    }

    /// Mine probability of each hidden neighbor as seen from this clue alone, clamped into `[0, 1]`.
    pub fn probability(&self) -> f64 {
        let ratio = f64::from(self.remaining) / self.hidden.len() as f64;
        ratio.clamp(0.0, 1.0)
    }
}

/// Constraints of every open numbered tile that still borders a hidden tile, in index order.
pub fn clue_odds(obs: &Observation) -> Vec<ClueOdds> {
    let mut out = Vec::new();

    for clue in 0..obs.tile_count() {
        let Some(count) = obs.clue(clue) else {
            continue;
        };
        if count == 0 {
            continue;
        }

        let mut flagged = 0i16;
        let mut hidden = Neighborhood::new();
        for neighbor in obs.neighbors(clue) {
            if obs.is_flagged(neighbor) {
                flagged += 1;
            } else if obs.is_hidden(neighbor) {
                hidden.push(neighbor);
            }
        }

        // no new information
        if hidden.is_empty() {
            continue;
        }

        let odds = ClueOdds {
            clue,
            remaining: i16::from(count) - flagged,
            hidden,
        };
        log::trace!(
            "Clue {} ({}): {} mines left among {:?}",
            clue,
            count,
            odds.remaining,
            odds.hidden
        );
        out.push(odds);
    }

    out
}
