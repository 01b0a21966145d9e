use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a player can see of a board: open counts and flags, never the hidden mines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub width: Coord,
    pub height: Coord,
    pub mine_total: CellCount,
    pub revealed: Array2<Option<u8>>,
    pub flags: Array2<bool>,
}

impl Observation {
    pub fn from_board(board: &Board) -> Self {
        let size = (board.width(), board.height());
        let mut revealed = Array2::from_elem(size.to_nd_index(), None);
        let mut flags = Array2::from_elem(size.to_nd_index(), false);

        for (index, tile) in board.iter() {
            let coords = index_to_coords(index, board.width()).to_nd_index();
            match tile.view() {
                TileView::Hidden | TileView::Mine => {}
                TileView::Open(count) => revealed[coords] = Some(count),
                TileView::Flagged => flags[coords] = true,
            }
        }

        Self {
            width: board.width(),
            height: board.height(),
            mine_total: board.mine_total(),
            revealed,
            flags,
        }
    }

    pub fn tile_count(&self) -> usize {
        self.revealed.len()
    }

    pub fn clue(&self, index: TileIndex) -> Option<u8> {
        self.revealed[self.nd(index)]
    }

    pub fn is_flagged(&self, index: TileIndex) -> bool {
        self.flags[self.nd(index)]
    }

    pub fn is_hidden(&self, index: TileIndex) -> bool {
        self.clue(index).is_none() && !self.is_flagged(index)
    }

    pub fn flag_count(&self) -> usize {
        self.flags.iter().filter(|&&flag| flag).count()
    }

    pub fn hidden_or_flagged(&self) -> usize {
        self.revealed.iter().filter(|clue| clue.is_none()).count()
    }

    pub fn neighbors(&self, index: TileIndex) -> NeighborIter {
        crate::neighbors(index, self.width, self.height)
    }

    fn nd(&self, index: TileIndex) -> [usize; 2] {
        index_to_coords(index, self.width).to_nd_index()
    }
}
