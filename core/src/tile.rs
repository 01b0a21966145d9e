use serde::{Deserialize, Serialize};

/// What a tile holds. Fixed once mines are placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileValue {
    Mine,
    /// Number of mines among the in-bounds neighbors, `0..=8`.
    Count(u8),
}

impl TileValue {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn count(self) -> Option<u8> {
        match self {
            Self::Mine => None,
            Self::Count(count) => Some(count),
        }
    }
}

impl Default for TileValue {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// Player-visible state of a tile, the only part of a tile that changes during play.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    Hidden,
    Flagged,
    Open,
}

impl TileState {
    pub const fn is_unopened(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for TileState {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    value: TileValue,
    state: TileState,
}

impl Tile {
    pub const fn value(self) -> TileValue {
        self.value
    }

    pub const fn state(self) -> TileState {
        self.state
    }

    pub const fn is_mine(self) -> bool {
        self.value.is_mine()
    }

    pub const fn view(self) -> TileView {
        match (self.state, self.value) {
            (TileState::Hidden, _) => TileView::Hidden,
            (TileState::Flagged, _) => TileView::Flagged,
            (TileState::Open, TileValue::Mine) => TileView::Mine,
            (TileState::Open, TileValue::Count(count)) => TileView::Open(count),
        }
    }

    pub(crate) fn set_value(&mut self, value: TileValue) {
        self.value = value;
    }

    pub(crate) fn set_state(&mut self, state: TileState) {
        self.state = state;
    }
}

/// What a renderer is allowed to show for a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileView {
    Hidden,
    Flagged,
    Open(u8),
    Mine,
}

impl TileView {
    /// Single character used by plain-text renderers.
    pub const fn glyph(self) -> char {
        match self {
            Self::Hidden => '#',
            Self::Flagged => 'F',
            Self::Mine => '*',
            Self::Open(0) => '.',
            Self::Open(count) => (b'0' + count) as char,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_hides_value_until_open() {
        let mut tile = Tile::default();
        tile.set_value(TileValue::Mine);
        assert_eq!(tile.view(), TileView::Hidden);

        tile.set_state(TileState::Flagged);
        assert_eq!(tile.view(), TileView::Flagged);

        tile.set_state(TileState::Open);
        assert_eq!(tile.view(), TileView::Mine);
    }

    #[test]
    fn glyphs_cover_counts() {
        assert_eq!(TileView::Open(0).glyph(), '.');
        assert_eq!(TileView::Open(3).glyph(), '3');
        assert_eq!(TileView::Open(8).glyph(), '8');
    }
}
