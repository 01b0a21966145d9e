use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// A snapshot of the whole grid plus the running counters the game needs.
///
/// Mines are placed lazily: a fresh board is all hidden zeroes until a generator fills it in on the first click.
/// Tile values never change afterwards, only tile states do.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: GameConfig,
    tiles: Array2<Tile>,
    mines_placed: bool,
    open_count: CellCount,
    flag_count: CellCount,
    triggered_mine: Option<TileIndex>,
}

impl Board {
    pub fn new(config: GameConfig) -> Self {
        let size = (config.width, config.height);
        Self {
            config,
            tiles: Array2::default(size.to_nd_index()),
            mines_placed: false,
            open_count: 0,
            flag_count: 0,
            triggered_mine: None,
        }
    }

    /// Builds an already generated board with mines exactly at `mines`, mostly useful for fixtures.
    pub fn with_mines(width: Coord, height: Coord, mines: &[TileIndex]) -> Result<Self> {
        let mut board = Self::new(GameConfig::new_unchecked(width, height, 0));
        for &index in mines {
            board.validate_index(index)?;
        }
        board.place_mines(mines.iter().copied());
        board.config.mines = board.count_mines();
        Ok(board)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn width(&self) -> Coord {
        self.config.width
    }

    pub fn height(&self) -> Coord {
        self.config.height
    }

    pub fn mine_total(&self) -> CellCount {
        self.config.mines
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_generated(&self) -> bool {
        self.mines_placed
    }

    /// Number of open tiles, including mines opened by a loss.
    pub fn open_count(&self) -> CellCount {
        self.open_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// Mines not yet accounted for by a flag. Negative when there are more flags than mines.
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flag_count as isize)
    }

    /// Tiles that are still hidden or flagged.
    pub fn hidden_or_flagged(&self) -> CellCount {
        self.config.total_tiles() - self.open_count
    }

    /// The mine that ended the game, if one did.
    pub fn triggered_mine(&self) -> Option<TileIndex> {
        self.triggered_mine
    }

    pub fn validate_index(&self, index: TileIndex) -> Result<TileIndex> {
        if index < self.tile_count() {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex {
                index,
                tiles: self.tile_count(),
            })
        }
    }

    pub fn get(&self, index: TileIndex) -> Option<&Tile> {
        if index < self.tile_count() {
            Some(&self[index])
        } else {
            None
        }
    }

    pub fn neighbors(&self, index: TileIndex) -> NeighborIter {
        crate::neighbors(index, self.config.width, self.config.height)
    }

    /// All tiles in index order.
    pub fn iter(&self) -> impl Iterator<Item = (TileIndex, Tile)> + '_ {
        self.tiles.iter().copied().enumerate()
    }

    pub fn views(&self) -> impl Iterator<Item = TileView> + '_ {
        self.tiles.iter().map(|tile| tile.view())
    }

    pub fn adjacent_mine_count(&self, index: TileIndex) -> u8 {
        self.neighbors(index)
            .filter(|&pos| self[pos].is_mine())
            .count()
            .try_into()
            .unwrap_or(u8::MAX)
    }

    /// Marks `mines` and computes the count of every other tile.
    pub(crate) fn place_mines(&mut self, mines: impl IntoIterator<Item = TileIndex>) {
        for index in mines {
            self.tile_mut(index).set_value(TileValue::Mine);
        }

        for index in 0..self.tile_count() {
            if !self[index].is_mine() {
                let count = self.adjacent_mine_count(index);
                self.tile_mut(index).set_value(TileValue::Count(count));
            }
        }
        self.mines_placed = true;
    }

    pub(crate) fn set_state(&mut self, index: TileIndex, state: TileState) {
        let previous = self[index].state();
        if previous == state {
            return;
        }

        match previous {
            TileState::Open => self.open_count -= 1,
            TileState::Flagged => self.flag_count -= 1,
            TileState::Hidden => {}
        }
        match state {
            TileState::Open => self.open_count += 1,
            TileState::Flagged => self.flag_count += 1,
            TileState::Hidden => {}
        }
        self.tile_mut(index).set_state(state);
    }

    pub(crate) fn set_triggered_mine(&mut self, index: TileIndex) {
        self.triggered_mine = Some(index);
    }

    fn count_mines(&self) -> CellCount {
        self.tiles
            .iter()
            .filter(|tile| tile.is_mine())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    fn tile_mut(&mut self, index: TileIndex) -> &mut Tile {
        let coords = index_to_coords(index, self.config.width);
        &mut self.tiles[coords.to_nd_index()]
    }
}

impl Index<TileIndex> for Board {
    type Output = Tile;

    fn index(&self, index: TileIndex) -> &Self::Output {
        let coords = index_to_coords(index, self.config.width);
        &self.tiles[coords.to_nd_index()]
    }
}
