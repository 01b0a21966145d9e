use alloc::vec::Vec;

use super::*;

/// Generator that always lays out the same mines, for reproducing a specific board.
///
/// It does not protect the start tile: clicking onto one of the given mines loses immediately.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    mines: Vec<TileIndex>,
}

impl FixedMineGenerator {
    pub fn new(mines: impl Into<Vec<TileIndex>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn generate(&mut self, board: &Board, start: TileIndex) -> Result<Board> {
        board.validate_index(start)?;
        let generated = Board::with_mines(board.width(), board.height(), &self.mines)?;
        if generated.mine_total() != board.mine_total() {
            log::warn!(
                "Fixed layout has {} mines but the board expects {}",
                generated.mine_total(),
                board.mine_total()
            );
        }
        Ok(generated)
    }
}
