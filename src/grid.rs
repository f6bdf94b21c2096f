//! Square lattice primitives: cells, neighbors, connectivity and boundary tracing.
//!
//! Cells are addressed by `(row, col)` with rows growing downwards. Lattice
//! vertices use the same coordinates: vertex `(r, c)` is the top-left corner
//! of cell `(r, c)`.

use hashbrown::HashSet;

use crate::error::{Error, Result};

/// A unit cell of the square lattice.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

/// A lattice vertex, i.e. the top-left corner of the cell with the same coordinates.
pub type Point = Cell;

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The cell translated by `(rows, cols)`.
    pub const fn offset(self, rows: i32, cols: i32) -> Self {
        Self::new(self.row + rows, self.col + cols)
    }

    /// Chebyshev distance to `other`.
    pub fn distance(self, other: Cell) -> usize {
        let rows = (self.row - other.row).unsigned_abs();
        let cols = (self.col - other.col).unsigned_abs();
        rows.max(cols) as usize
    }
}

/// Something that can answer cell membership queries.
pub trait CellSet {
    fn contains_cell(&self, cell: &Cell) -> bool;
    fn cell_count(&self) -> usize;
}

impl CellSet for HashSet<Cell> {
    fn contains_cell(&self, cell: &Cell) -> bool {
        self.contains(cell)
    }

    fn cell_count(&self) -> usize {
        self.len()
    }
}

/// The right, lower, left and upper neighbors of `cell`, in that order.
pub const fn neighbors(cell: Cell) -> [Cell; 4] {
    [
        cell.offset(0, 1),
        cell.offset(1, 0),
        cell.offset(0, -1),
        cell.offset(-1, 0),
    ]
}

/// Returns whether `cells` forms a single 4-connected component.
///
/// The empty set is connected. Cells may lie anywhere on the lattice, which
/// is what makes this usable on the complement of a shape.
pub fn is_connected<I>(cells: I) -> bool
where
    I: IntoIterator<Item = Cell>,
{
    let mut todo: HashSet<Cell> = cells.into_iter().collect();

    let first = match todo.iter().next() {
        Some(first) => *first,
        None => return true,
    };

    todo.remove(&first);
    let mut stack = vec![first];

    while let Some(current) = stack.pop() {
        for neighbor in neighbors(current) {
            if todo.remove(&neighbor) {
                stack.push(neighbor);
            }
        }
    }

    todo.is_empty()
}

/// Direction of travel along a lattice edge.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
enum Heading {
    Up,
    Right,
    Down,
    Left,
}

impl Heading {
    const fn left(self) -> Self {
        match self {
            Heading::Up => Heading::Left,
            Heading::Right => Heading::Up,
            Heading::Down => Heading::Right,
            Heading::Left => Heading::Down,
        }
    }

    const fn right(self) -> Self {
        match self {
            Heading::Up => Heading::Right,
            Heading::Right => Heading::Down,
            Heading::Down => Heading::Left,
            Heading::Left => Heading::Up,
        }
    }

    const fn back(self) -> Self {
        self.left().left()
    }

    /// Candidate headings after arriving with `self`: left, forward, right, back.
    const fn probes(self) -> [Heading; 4] {
        [self.left(), self, self.right(), self.back()]
    }

    const fn step(self, from: Point) -> Point {
        match self {
            Heading::Up => from.offset(-1, 0),
            Heading::Right => from.offset(0, 1),
            Heading::Down => from.offset(1, 0),
            Heading::Left => from.offset(0, -1),
        }
    }

    /// The cell on the right-hand side of the edge leaving `from` with this heading.
    ///
    /// A clockwise walk keeps the shape on its right, so this cell must be
    /// part of the shape for the edge to be taken.
    const fn inner_cell(self, from: Point) -> Cell {
        match self {
            Heading::Up => from.offset(-1, 0),
            Heading::Right => from,
            Heading::Down => from.offset(0, -1),
            Heading::Left => from.offset(-1, -1),
        }
    }
}

/// Trace the clockwise outline of `cells`, starting at the top-left corner of `origin`.
///
/// `origin` must be a leftmost cell of the top row. The returned sequence holds one
/// vertex per unit edge of the outline and does not repeat the start vertex.
pub fn boundary<S>(cells: &S, origin: Cell) -> Result<Vec<Point>>
where
    S: CellSet + ?Sized,
{
    match cells.cell_count() {
        0 => return Ok(Vec::new()),
        1 => {
            return Ok(vec![
                origin,
                origin.offset(0, 1),
                origin.offset(1, 1),
                origin.offset(1, 0),
            ])
        }
        _ => {}
    }

    let order = cells.cell_count();
    // No polyomino of order n has a perimeter longer than 2n + 2.
    let limit = 2 * (order + 1);

    let start = origin;
    let mut at = start;
    let mut heading = Heading::Up;
    let mut walk = Vec::with_capacity(limit);

    loop {
        let next = heading
            .probes()
            .into_iter()
            .find(|candidate| cells.contains_cell(&candidate.inner_cell(at)))
            .ok_or(Error::BoundaryStuck {
                row: at.row,
                col: at.col,
            })?;

        walk.push(at);
        if walk.len() > limit {
            return Err(Error::BoundaryOverrun {
                order,
                steps: limit,
            });
        }

        at = next.step(at);
        heading = next;

        if at == start && heading == Heading::Up {
            return Ok(walk);
        }
    }
}

/// Reduce a vertex walk to the vertices where the outline changes direction.
pub fn corners(boundary: &[Point]) -> Vec<Point> {
    let len = boundary.len();

    (0..len)
        .filter_map(|i| {
            let prev = boundary[(i + len - 1) % len];
            let here = boundary[i];
            let next = boundary[(i + 1) % len];

            let same_row = prev.row == here.row && here.row == next.row;
            let same_col = prev.col == here.col && here.col == next.col;

            (!same_row && !same_col).then_some(here)
        })
        .collect()
}

/// Lengths of the straight sides between consecutive corners, wrapping around.
pub fn side_lengths(corners: &[Point]) -> Vec<usize> {
    let len = corners.len();

    (0..len)
        .map(|i| corners[i].distance(corners[(i + 1) % len]))
        .collect()
}
