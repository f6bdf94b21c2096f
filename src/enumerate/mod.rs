//! Enumeration of fixed polyominoes, one order at a time.

use indicatif::ProgressBar;
use parking_lot::RwLock;

use crate::polyomino::{Polyomino, ShapeSet};

mod redelmeier;
pub use redelmeier::Redelmeier;

/// A cursor over the orders `0, 1, 2, ...` that holds the fixed polyominoes
/// of the order it is positioned on.
pub trait Enumerator {
    /// Move to the next order and return all fixed polyominoes of that order.
    ///
    /// The first call yields order 0, the set holding only the empty polyomino.
    fn advance(&mut self) -> &ShapeSet;

    /// The order of the set returned by the last call to [`advance`](Enumerator::advance).
    fn order(&self) -> Option<usize>;

    /// Move to `order` and return its fixed polyominoes.
    ///
    /// Orders at or before the current one are not revisited: the cursor then
    /// only moves one step, like [`advance`](Enumerator::advance).
    fn seek(&mut self, order: usize) -> &ShapeSet {
        while self.order().map_or(order > 0, |current| current + 1 < order) {
            self.advance();
        }

        self.advance()
    }
}

/// How fixed polyominoes are produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Enumeration {
    /// Grow every polyomino of order `n - 1` by one cell.
    #[default]
    Incremental,
    /// Search each order from scratch without producing duplicates.
    Redelmeier,
}

impl Enumeration {
    pub fn enumerator(self, parallel: bool, progress: ProgressBar) -> Box<dyn Enumerator> {
        match self {
            Enumeration::Incremental => Box::new(
                Generator::new()
                    .with_parallelism(parallel)
                    .with_progress(progress),
            ),
            Enumeration::Redelmeier => Box::new(Redelmeier::new()),
        }
    }
}

/// The incremental generator: each order is the union of the children of
/// the previous one.
///
/// Only the current order is kept; set membership by cell content removes
/// the duplicates that different growth orders produce.
pub struct Generator {
    order: Option<usize>,
    current: ShapeSet,
    parallel: bool,
    progress: ProgressBar,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Self {
            order: None,
            current: ShapeSet::new(),
            parallel: false,
            progress: ProgressBar::hidden(),
        }
    }

    /// Expand in parallel across all available cores.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Report expansion progress on `bar`.
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = bar;
        self
    }

    /// Give up the current set, leaving the generator at its start.
    pub fn into_current(self) -> ShapeSet {
        self.current
    }

    /// All fixed polyominoes of order `n`.
    pub fn fixed(n: usize) -> ShapeSet {
        let mut generator = Generator::new();
        for _ in 0..=n {
            generator.advance();
        }
        generator.into_current()
    }

    /// Obtain the set of all children of the shapes in `from_set`.
    pub fn unique_expansions<'a, I>(progress_bar: &ProgressBar, from_set: I) -> ShapeSet
    where
        I: Iterator<Item = &'a Polyomino>,
    {
        let mut next = ShapeSet::new();

        for shape in from_set {
            next.extend(shape.children());
            progress_bar.inc(1);
        }

        next
    }

    pub fn unique_expansions_rayon(progress_bar: &ProgressBar, from_set: &ShapeSet) -> ShapeSet {
        use rayon::prelude::*;

        if from_set.is_empty() {
            return ShapeSet::new();
        }

        let shapes: Vec<&Polyomino> = from_set.iter().collect();

        let available_parallelism = num_cpus::get();
        let chunk_size = (shapes.len() / available_parallelism) + 1;

        let next_level = RwLock::new(ShapeSet::new());

        shapes.par_chunks(chunk_size).for_each(|chunk| {
            for shape in chunk {
                for child in shape.children() {
                    // Skip expansions that are already in the set.
                    if next_level.read().contains(&child) {
                        continue;
                    }

                    next_level.write().insert(child);
                }

                progress_bar.inc(1);
            }
        });

        next_level.into_inner()
    }
}

impl Enumerator for Generator {
    fn advance(&mut self) -> &ShapeSet {
        let order = match self.order {
            None => {
                self.current = std::iter::once(Polyomino::empty()).collect();
                self.order = Some(0);
                return &self.current;
            }
            Some(order) => order + 1,
        };

        let bar = &self.progress;
        bar.set_length(self.current.len() as u64);
        bar.set_position(0);
        bar.set_message(format!("Expanding polyominoes of order {}...", order - 1));

        let next = if self.parallel {
            Self::unique_expansions_rayon(bar, &self.current)
        } else {
            Self::unique_expansions(bar, self.current.iter())
        };

        bar.set_message(format!("Found {} fixed polyominoes of order {order}", next.len()));

        self.current = next;
        self.order = Some(order);
        &self.current
    }

    fn order(&self) -> Option<usize> {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_the_empty_polyomino() {
        let mut generator = Generator::new();
        assert_eq!(generator.order(), None);

        let zero = generator.advance().clone();
        assert_eq!(generator.order(), Some(0));
        assert_eq!(zero.len(), 1);
        assert!(zero.contains(&Polyomino::empty()));

        let one = generator.advance().clone();
        assert_eq!(generator.order(), Some(1));
        assert_eq!(one.len(), 1);
        assert!(one.contains(&Polyomino::singleton()));
    }

    #[test]
    fn every_shape_has_the_right_order_and_is_connected() {
        for (n, shapes) in (0..=6).map(|n| (n, Generator::fixed(n))) {
            for shape in &shapes {
                assert_eq!(shape.order(), n);
                assert!(shape.is_connected());
                assert_eq!(shape.origin().map(|c| c.row), (n > 0).then_some(0));
            }
        }
    }

    #[test]
    fn parallel_expansion_matches_sequential() {
        let mut sequential = Generator::new();
        let mut parallel = Generator::new().with_parallelism(true);

        for _ in 0..=7 {
            let expected = sequential.advance().clone();
            assert_eq!(parallel.advance(), &expected);
        }
    }

    #[test]
    fn expansion_paths_agree_on_the_empty_polyomino() {
        let start: ShapeSet = std::iter::once(Polyomino::empty()).collect();
        let expected: ShapeSet = std::iter::once(Polyomino::singleton()).collect();

        let bar = ProgressBar::hidden();
        assert_eq!(Generator::unique_expansions(&bar, start.iter()), expected);
        assert_eq!(Generator::unique_expansions_rayon(&bar, &start), expected);
    }

    #[test]
    fn seek_steps_through_skipped_orders() {
        let mut generator = Generator::new();

        assert_eq!(generator.seek(5).len(), 63);
        assert_eq!(generator.order(), Some(5));

        // Already past order 2: only one step forward.
        assert_eq!(generator.seek(2).len(), 216);
        assert_eq!(generator.order(), Some(6));

        let mut fresh = Generator::new();
        assert_eq!(fresh.seek(0).len(), 1);
        assert_eq!(fresh.order(), Some(0));
    }

    #[test]
    fn progress_bar_counts_parents() {
        let bar = ProgressBar::hidden();
        let mut generator = Generator::new().with_progress(bar.clone());

        for _ in 0..=4 {
            generator.advance();
        }

        // Order 4 was grown from the six fixed trominoes.
        assert_eq!(bar.position(), 6);
        assert_eq!(bar.length(), Some(6));
    }
}
