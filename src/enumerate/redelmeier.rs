//! Redelmeier's method: depth-first growth from a fixed origin cell, with a
//! set of cells that may never be added again in the current branch.
//!
//! Every fixed polyomino is produced exactly once, so no set of earlier
//! orders is needed.

use hashbrown::HashSet;

use super::Enumerator;
use crate::{
    grid::{neighbors, Cell},
    polyomino::{Polyomino, ShapeSet},
};

/// Recomputes each order independently.
pub struct Redelmeier {
    order: Option<usize>,
    current: ShapeSet,
}

impl Default for Redelmeier {
    fn default() -> Self {
        Self::new()
    }
}

impl Redelmeier {
    pub fn new() -> Self {
        Self {
            order: None,
            current: ShapeSet::new(),
        }
    }

    /// All fixed polyominoes of order `n`.
    pub fn fixed(n: usize) -> ShapeSet {
        let mut found = ShapeSet::new();

        if n == 0 {
            found.insert(Polyomino::empty());
            return found;
        }

        let origin = Cell::new(0, 0);
        let mut search = Search {
            target: n,
            cells: Vec::with_capacity(n),
            seen: HashSet::new(),
            found: &mut found,
        };

        search.seen.insert(origin);
        search.grow(vec![origin]);

        found
    }
}

struct Search<'a> {
    target: usize,
    cells: Vec<Cell>,
    /// Cells that are in the polyomino, next to it, or already tried.
    seen: HashSet<Cell>,
    found: &'a mut ShapeSet,
}

impl Search<'_> {
    /// Cells that come after the origin in row-major order. The origin is
    /// always the top-left cell of what is grown from it.
    fn allowed(cell: &Cell) -> bool {
        cell.row > 0 || (cell.row == 0 && cell.col >= 0)
    }

    fn grow(&mut self, mut untried: Vec<Cell>) {
        while let Some(cell) = untried.pop() {
            self.cells.push(cell);

            if self.cells.len() == self.target {
                let fresh = self.found.insert(Polyomino::new(self.cells.iter().copied()));
                debug_assert!(fresh, "redelmeier produced a duplicate");
            } else {
                let mut next = untried.clone();
                let mut added = Vec::with_capacity(4);

                for neighbor in neighbors(cell) {
                    if Self::allowed(&neighbor) && self.seen.insert(neighbor) {
                        next.push(neighbor);
                        added.push(neighbor);
                    }
                }

                self.grow(next);

                for neighbor in added {
                    self.seen.remove(&neighbor);
                }
            }

            self.cells.pop();
        }
    }
}

impl Enumerator for Redelmeier {
    fn advance(&mut self) -> &ShapeSet {
        let order = self.order.map_or(0, |order| order + 1);

        self.current = Redelmeier::fixed(order);
        self.order = Some(order);
        &self.current
    }

    fn order(&self) -> Option<usize> {
        self.order
    }

    fn seek(&mut self, order: usize) -> &ShapeSet {
        let order = match self.order {
            Some(current) if current >= order => current + 1,
            _ => order,
        };

        self.current = Redelmeier::fixed(order);
        self.order = Some(order);
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::Generator;

    #[test]
    fn matches_incremental_generator() {
        let mut generator = Generator::new();
        let mut redelmeier = Redelmeier::new();

        for n in 0..=8 {
            let expected = generator.advance().clone();
            let found = redelmeier.advance().clone();

            assert_eq!(redelmeier.order(), Some(n));
            assert_eq!(found.len(), expected.len(), "order {n}");
            assert_eq!(found, expected, "order {n}");
        }
    }

    #[test]
    fn seek_jumps_to_the_target_order() {
        let mut redelmeier = Redelmeier::new();

        assert_eq!(redelmeier.seek(7).len(), 760);
        assert_eq!(redelmeier.order(), Some(7));

        assert_eq!(redelmeier.seek(3).len(), 2725);
        assert_eq!(redelmeier.order(), Some(8));
    }
}
