use hashbrown::HashSet;

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Places mines on a fresh board in response to the first click at `start`.
///
/// Implementations return a new generated board and leave the input untouched.
pub trait MineGenerator {
    fn generate(&mut self, board: &Board, start: TileIndex) -> Result<Board>;
}

/// The start tile and its in-bounds neighbors, which must stay mine-free.
pub fn start_area(board: &Board, start: TileIndex) -> HashSet<TileIndex> {
    let mut area: HashSet<TileIndex> = board.neighbors(start).collect();
    area.insert(start);
    area
}
