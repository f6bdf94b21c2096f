//! The polyomino value type.

use std::hash::{Hash, Hasher};

use hashbrown::HashSet;

use crate::{
    error::Result,
    grid::{self, neighbors, Cell, CellSet, Point},
};

pub mod format;
mod isometry;

pub use isometry::{Group, Isometry, MatrixCol};

/// A set of polyominoes of one order, compared by cell content.
pub type ShapeSet = HashSet<Polyomino>;

/// An immutable polyomino, stored as the sorted list of its cells.
///
/// Cells are kept translated so that the smallest row and the smallest
/// column are both zero, which makes two polyominoes that are translates of
/// each other structurally identical. Height and width are the tight
/// bounding box and are derived from the cells; equality and hashing only
/// look at the cells.
#[derive(Clone, Debug)]
pub struct Polyomino {
    cells: Box<[Cell]>,
    height: usize,
    width: usize,
}

impl PartialEq for Polyomino {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Polyomino {}

impl Hash for Polyomino {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells.hash(state);
    }
}

/// Total order used to pick orbit representatives.
///
/// Compares order, then height, then width, then the cells packed into a
/// big-endian bit string over the bounding box (bit `row * width + col`).
/// Two normalized polyominoes have equal keys exactly when they are equal.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Debug)]
pub struct CanonicalKey {
    order: usize,
    height: usize,
    width: usize,
    bits: Vec<u64>,
}

impl Polyomino {
    /// The order 0 polyomino.
    pub fn empty() -> Self {
        Self {
            cells: Box::new([]),
            height: 0,
            width: 0,
        }
    }

    /// The order 1 polyomino.
    pub fn singleton() -> Self {
        Self {
            cells: Box::new([Cell::new(0, 0)]),
            height: 1,
            width: 1,
        }
    }

    /// Build a polyomino from arbitrary cells, translating them so the minimum
    /// row and column are zero. Duplicate cells are merged.
    ///
    /// Connectivity is not checked, see [`Polyomino::is_connected`].
    pub fn new<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut cells: Vec<Cell> = cells.into_iter().collect();

        let (min_row, min_col) = match (
            cells.iter().map(|c| c.row).min(),
            cells.iter().map(|c| c.col).min(),
        ) {
            (Some(row), Some(col)) => (row, col),
            _ => return Self::empty(),
        };

        cells
            .iter_mut()
            .for_each(|cell| *cell = cell.offset(-min_row, -min_col));
        cells.sort_unstable();
        cells.dedup();

        let height = cells.iter().map(|c| c.row + 1).max().unwrap_or(0) as usize;
        let width = cells.iter().map(|c| c.col + 1).max().unwrap_or(0) as usize;

        Self::from_sorted(cells, height, width)
    }

    pub(crate) fn from_sorted(cells: Vec<Cell>, height: usize, width: usize) -> Self {
        debug_assert!(cells.windows(2).all(|w| w[0] < w[1]));

        Self {
            cells: cells.into_boxed_slice(),
            height,
            width,
        }
    }

    /// Amount of cells.
    pub fn order(&self) -> usize {
        self.cells.len()
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// The cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The leftmost cell of the top row, if any.
    pub fn origin(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells.binary_search(cell).is_ok()
    }

    /// Returns whether the cells form one 4-connected component.
    pub fn is_connected(&self) -> bool {
        grid::is_connected(self.cells.iter().copied())
    }

    /// Returns whether some background cell is cut off from the outside.
    ///
    /// The background is taken inside the bounding box grown by one cell on
    /// every side, which always wraps around the shape.
    pub fn has_holes(&self) -> bool {
        let (height, width) = (self.height as i32, self.width as i32);

        let background = (-1..=height)
            .flat_map(|row| (-1..=width).map(move |col| Cell::new(row, col)))
            .filter(|cell| !self.contains(cell));

        !grid::is_connected(background)
    }

    /// The clockwise vertex walk around the outside of the shape.
    pub fn boundary(&self) -> Result<Vec<Point>> {
        match self.origin() {
            Some(origin) => grid::boundary(self, origin),
            None => Ok(Vec::new()),
        }
    }

    /// Lengths of the straight sides of the outline.
    pub fn side_lengths(&self) -> Result<Vec<usize>> {
        let boundary = self.boundary()?;
        Ok(grid::side_lengths(&grid::corners(&boundary)))
    }

    /// The cells outside the shape that touch it, each listed once.
    pub fn child_cells(&self) -> Vec<Cell> {
        let mut free: Vec<Cell> = self
            .cells
            .iter()
            .flat_map(|cell| neighbors(*cell))
            .filter(|cell| !self.contains(cell))
            .collect();

        free.sort_unstable();
        free.dedup();
        free
    }

    /// Add `cell`, which must touch the shape from the outside.
    ///
    /// A cell on row or column `-1` moves every existing cell one step so
    /// that coordinates stay non-negative; the bounding box only grows on the
    /// side the cell was added.
    pub fn augment(&self, cell: Cell) -> Polyomino {
        debug_assert!(!self.contains(&cell));

        let shift_rows = (-cell.row).max(0);
        let shift_cols = (-cell.col).max(0);
        let cell = cell.offset(shift_rows, shift_cols);

        let mut cells = Vec::with_capacity(self.cells.len() + 1);
        cells.extend(
            self.cells
                .iter()
                .map(|existing| existing.offset(shift_rows, shift_cols)),
        );

        let at = cells.partition_point(|existing| *existing < cell);
        cells.insert(at, cell);

        let height = (self.height as i32 + shift_rows).max(cell.row + 1) as usize;
        let width = (self.width as i32 + shift_cols).max(cell.col + 1) as usize;

        Polyomino::from_sorted(cells, height, width)
    }

    /// All distinct polyominoes obtained by adding one cell.
    pub fn children(&self) -> ShapeSet {
        if self.cells.is_empty() {
            return std::iter::once(Polyomino::singleton()).collect();
        }

        self.child_cells()
            .into_iter()
            .map(|cell| self.augment(cell))
            .collect()
    }

    pub fn canonical_key(&self) -> CanonicalKey {
        let area = self.height * self.width;
        let words = (area + 63) / 64;
        let mut bits = vec![0u64; words];

        for cell in self.cells.iter() {
            let index = cell.row as usize * self.width + cell.col as usize;
            bits[words - 1 - index / 64] |= 1 << (index % 64);
        }

        CanonicalKey {
            order: self.order(),
            height: self.height,
            width: self.width,
            bits,
        }
    }

    /// Compare two polyominoes by their canonical keys.
    pub fn canonical_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.canonical_key().cmp(&other.canonical_key())
    }

    pub fn symmetry(&self) -> Symmetry {
        Symmetry {
            horizontal: *self == self.reflect_horiz(),
            vertical: *self == self.reflect_vert(),
            diagonal: *self == self.reflect_diag(),
            skew: *self == self.reflect_skew(),
            half_turn: *self == self.rotate_half(),
            quarter_turn: *self == self.rotate_left(),
        }
    }
}

impl CellSet for Polyomino {
    fn contains_cell(&self, cell: &Cell) -> bool {
        self.contains(cell)
    }

    fn cell_count(&self) -> usize {
        self.order()
    }
}

/// The self-symmetries of one polyomino.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct Symmetry {
    pub horizontal: bool,
    pub vertical: bool,
    pub diagonal: bool,
    pub skew: bool,
    pub half_turn: bool,
    pub quarter_turn: bool,
}

/// Sigils: `|-\/` mirror axes, `%` half turn, `@` quarter turn, `+` both
/// orthogonal mirrors, `X` both diagonal mirrors, `O` everything, `?` nothing.
impl core::fmt::Display for Symmetry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut sigil = String::new();

        let marks = [
            (self.horizontal, '|'),
            (self.vertical, '-'),
            (self.diagonal, '\\'),
            (self.skew, '/'),
            (self.half_turn, '%'),
            (self.quarter_turn, '@'),
            (self.horizontal && self.vertical, '+'),
            (self.diagonal && self.skew, 'X'),
        ];

        sigil.extend(marks.iter().filter(|(set, _)| *set).map(|(_, c)| c));

        if self.quarter_turn && self.horizontal && self.vertical && self.diagonal && self.skew {
            sigil.push('O');
        }

        if sigil.is_empty() {
            sigil.push('?');
        }

        f.write_str(&sigil)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(cells: &[(i32, i32)]) -> Polyomino {
        Polyomino::new(cells.iter().map(|&(r, c)| Cell::new(r, c)))
    }

    #[test]
    fn new_normalizes_translation() {
        let a = shape(&[(5, 7), (5, 8), (6, 8)]);
        let b = shape(&[(0, 0), (0, 1), (1, 1)]);

        assert_eq!(a, b);
        assert_eq!(a.origin(), Some(Cell::new(0, 0)));
        assert_eq!((a.height(), a.width()), (2, 2));
    }

    #[test]
    fn distinguished_constants() {
        assert_eq!(Polyomino::empty().order(), 0);
        assert_eq!(Polyomino::new(Vec::new()), Polyomino::empty());
        assert_eq!(Polyomino::singleton(), shape(&[(3, 3)]));
        assert_eq!(Polyomino::empty().children().len(), 1);
        assert!(Polyomino::empty().children().contains(&Polyomino::singleton()));
    }

    #[test]
    fn augment_on_negative_side_translates() {
        let domino = shape(&[(0, 0), (0, 1)]);

        let above = domino.augment(Cell::new(-1, 1));
        assert_eq!(above, shape(&[(0, 1), (1, 0), (1, 1)]));
        assert_eq!((above.height(), above.width()), (2, 2));

        let left = domino.augment(Cell::new(0, -1));
        assert_eq!(left, shape(&[(0, 0), (0, 1), (0, 2)]));
        assert_eq!((left.height(), left.width()), (1, 3));

        let below = domino.augment(Cell::new(1, 0));
        assert_eq!((below.height(), below.width()), (2, 2));
    }

    #[test]
    fn children_are_deduplicated() {
        let domino = shape(&[(0, 0), (0, 1)]);

        // Adding at either end of the domino yields the same straight tromino.
        assert_eq!(domino.child_cells().len(), 6);
        assert_eq!(domino.children().len(), 5);
    }

    #[test]
    fn canonical_key_is_a_strict_order() {
        let a = shape(&[(0, 0), (1, 0), (1, 1)]);
        let b = shape(&[(0, 1), (1, 0), (1, 1)]);

        assert_ne!(a.canonical_cmp(&b), std::cmp::Ordering::Equal);
        assert_eq!(a.canonical_cmp(&a.clone()), std::cmp::Ordering::Equal);
    }

    #[test]
    fn holes() {
        let ring = shape(&[
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 2),
            (2, 0),
            (2, 1),
            (2, 2),
        ]);
        assert!(ring.has_holes());

        let cup = shape(&[(0, 0), (0, 2), (1, 0), (1, 1), (1, 2)]);
        assert!(!cup.has_holes());

        assert!(!Polyomino::empty().has_holes());
        assert!(!Polyomino::singleton().has_holes());
    }

    #[test]
    fn side_lengths_of_straight_tromino() {
        let bar = shape(&[(0, 0), (0, 1), (0, 2)]);
        assert_eq!(bar.side_lengths().unwrap(), vec![3, 1, 3, 1]);
        assert_eq!(Polyomino::singleton().side_lengths().unwrap(), vec![1, 1, 1, 1]);
        assert!(Polyomino::empty().side_lengths().unwrap().is_empty());
    }

    #[test]
    fn symmetry_sigils() {
        assert_eq!(Polyomino::singleton().symmetry().to_string(), "|-\\/%@+XO");
        assert_eq!(shape(&[(0, 0), (0, 1)]).symmetry().to_string(), "|-%+");

        let s = shape(&[(0, 1), (0, 2), (1, 0), (1, 1)]);
        assert_eq!(s.symmetry().to_string(), "%");

        let l = shape(&[(0, 0), (1, 0), (2, 0), (2, 1)]);
        assert_eq!(l.symmetry().to_string(), "?");
    }
}
