use thiserror::Error;

use crate::TileIndex;

/// Rejected board parameters. Raised only when configuring, never mid-game.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Width {width} is outside {min}..={max}")]
    WidthOutOfRange { width: usize, min: usize, max: usize },
    #[error("Height {height} is outside {min}..={max}")]
    HeightOutOfRange { height: usize, min: usize, max: usize },
    #[error("Mine count {mines} is outside {min}..={max} for this board size")]
    MineCountOutOfRange { mines: usize, min: usize, max: usize },
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Tile index {index} is outside a board of {tiles} tiles")]
    InvalidIndex { index: TileIndex, tiles: usize },
    #[error("Mines have not been placed yet")]
    MinesNotPlaced,
    #[error("Cannot place {mines} mines, only {candidates} tiles are outside the start area")]
    GenerationInfeasible { mines: usize, candidates: usize },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = core::result::Result<T, GameError>;
