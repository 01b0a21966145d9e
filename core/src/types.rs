use smallvec::SmallVec;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-tile counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Row-major position of a tile on the board, `y * width + x`.
pub type TileIndex = usize;

/// In-bounds neighbors of a single tile. Never more than eight.
pub type Neighborhood = SmallVec<[TileIndex; 8]>;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Boards are stored as `[row, column]`, so the flat iteration order matches [`TileIndex`].
    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Splits a flat index into `(x, y)`. The index must be inside a board of the given width.
pub const fn index_to_coords(index: TileIndex, width: Coord) -> Coord2 {
    let width = width as usize;
    ((index % width) as Coord, (index / width) as Coord)
}

pub const fn coords_to_index((x, y): Coord2, width: Coord) -> TileIndex {
    (y as usize) * (width as usize) + (x as usize)
}

/// Iterates the in-bounds 8-neighborhood of `index` on a `width` x `height` board.
///
/// Tiles on an edge or a corner simply have fewer neighbors, there is no wraparound. An index outside the board has
/// no neighbors at all.
pub fn neighbors(index: TileIndex, width: Coord, height: Coord) -> NeighborIter {
    let bounds = (width, height);
    if index >= usize::from(mult(width, height)) {
        return NeighborIter::exhausted(bounds);
    }
    NeighborIter::new(index_to_coords(index, width), bounds)
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }

    fn exhausted(bounds: Coord2) -> Self {
        Self {
            center: (0, 0),
            bounds,
            index: DISPLACEMENTS.len() as u8,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = TileIndex;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if let Some(coords) = next_item {
                return Some(coords_to_index(coords, self.bounds.0));
            }
        }
    }
}
