#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use agent::*;
pub use board::*;
pub use engine::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod agent;
mod board;
mod engine;
mod error;
mod game;
mod generator;
mod session;
mod tile;
mod types;

/// Smallest accepted board side.
pub const MIN_SIDE: Coord = 4;
/// Largest accepted board side.
pub const MAX_SIDE: Coord = 16;

/// Board dimensions and mine total.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    /// Builds a config without any bounds checks.
    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    pub fn new(width: Coord, height: Coord, mines: CellCount) -> core::result::Result<Self, ConfigError> {
        configure(width.into(), height.into(), mines.into())
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_tiles(&self) -> CellCount {
        self.total_tiles().saturating_sub(self.mines)
    }

    /// Inclusive mine-count range allowed for this board size: 10% to 30% of the tiles, rounded down.
    pub const fn mine_bounds(&self) -> (CellCount, CellCount) {
        mine_bounds(self.total_tiles() as usize)
    }

    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        configure(self.width.into(), self.height.into(), self.mines.into()).map(|_| ())
    }

    /// Whether the agent is allowed to play this config.
    pub fn is_playable(&self) -> bool {
        self.validate().is_ok()
    }
}

impl Default for GameConfig {
    /// 9x9 with 20% of the tiles mined.
    fn default() -> Self {
        Self::new_unchecked(9, 9, 16)
    }
}

const fn mine_bounds(total_tiles: usize) -> (CellCount, CellCount) {
    ((total_tiles / 10) as CellCount, (total_tiles * 3 / 10) as CellCount)
}

/// Validates raw board parameters coming from a collaborator.
pub fn configure(
    width: usize,
    height: usize,
    mines: usize,
) -> core::result::Result<GameConfig, ConfigError> {
    let (min, max) = (usize::from(MIN_SIDE), usize::from(MAX_SIDE));
    if !(min..=max).contains(&width) {
        return Err(ConfigError::WidthOutOfRange { width, min, max });
    }
    if !(min..=max).contains(&height) {
        return Err(ConfigError::HeightOutOfRange { height, min, max });
    }

    let (min_mines, max_mines) = mine_bounds(width * height);
    let (min_mines, max_mines) = (usize::from(min_mines), usize::from(max_mines));
    if !(min_mines..=max_mines).contains(&mines) {
        return Err(ConfigError::MineCountOutOfRange {
            mines,
            min: min_mines,
            max: max_mines,
        });
    }

    // all three fit: sides are at most 16 and mines at most 30% of 256
    Ok(GameConfig::new_unchecked(
        width as Coord,
        height as Coord,
        mines as CellCount,
    ))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// What a single click changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealDelta {
    pub outcome: RevealOutcome,
    /// Tiles opened by the click, cascade and mines revealed by a loss included
    pub opened: CellCount,
}

impl RevealDelta {
    pub const UNCHANGED: Self = Self {
        outcome: RevealOutcome::NoChange,
        opened: 0,
    };

    pub const fn has_update(self) -> bool {
        self.outcome.has_update()
    }
}

/// Used to merge outcomes when opening several tiles in one move
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configure_accepts_standard_boards() {
        assert_eq!(configure(9, 9, 10), Ok(GameConfig::new_unchecked(9, 9, 10)));
        assert_eq!(configure(16, 16, 40), Ok(GameConfig::new_unchecked(16, 16, 40)));
        assert_eq!(configure(4, 4, 1), Ok(GameConfig::new_unchecked(4, 4, 1)));
    }

    #[test]
    fn configure_rejects_sides_out_of_range() {
        assert_eq!(
            configure(3, 9, 10),
            Err(ConfigError::WidthOutOfRange {
                width: 3,
                min: 4,
                max: 16
            })
        );
        assert_eq!(
            configure(9, 17, 10),
            Err(ConfigError::HeightOutOfRange {
                height: 17,
                min: 4,
                max: 16
            })
        );
    }

    #[test]
    fn configure_uses_rounded_down_mine_bounds() {
        // 81 tiles: 8..=24
        assert!(configure(9, 9, 7).is_err());
        assert!(configure(9, 9, 8).is_ok());
        assert!(configure(9, 9, 24).is_ok());
        assert_eq!(
            configure(9, 9, 25),
            Err(ConfigError::MineCountOutOfRange {
                mines: 25,
                min: 8,
                max: 24
            })
        );
    }

    #[test]
    fn default_config_is_playable() {
        let config = GameConfig::default();
        assert_eq!(config.mines, 16);
        assert!(config.is_playable());
        assert!(!GameConfig::new_unchecked(9, 9, 40).is_playable());
    }

    #[test]
    fn hit_mine_dominates_merged_outcomes() {
        use RevealOutcome::*;
        assert_eq!(Revealed | HitMine, HitMine);
        assert_eq!(Won | Revealed, Won);
        assert_eq!(NoChange | NoChange, NoChange);
        assert!(!NoChange.has_update());
    }
}
