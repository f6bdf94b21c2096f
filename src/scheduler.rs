//! Drives the enumerator and the filters order by order, computing exactly the
//! kinds a [`Request`] needs.
//!
//! A kind used by a single consumer is streamed straight into it. A kind with
//! several consumers is collected once per order and dropped again as soon as
//! the last consumer of that order has run. Nothing but the emitted counts
//! outlives an order.

use std::{borrow::Cow, cell::RefCell, collections::VecDeque, rc::Rc};

use indicatif::ProgressBar;

use crate::{
    enumerate::{Enumeration, Enumerator},
    error::{Error, Result},
    filter::{self, History},
    kind::{self, Kind},
    polyomino::{Polyomino, ShapeSet},
};

/// A shape borrowed from the fixed set or an earlier collected kind, or a
/// representative produced by an orbit filter.
type Shape<'a> = Cow<'a, Polyomino>;

type Stream<'a> = Box<dyn Iterator<Item = Result<Shape<'a>>> + 'a>;

/// What to compute and how.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    /// Columns to emit, in any order. Duplicates are ignored.
    pub kinds: Vec<Kind>,
    /// First order to emit.
    pub min_order: usize,
    /// Last order to emit. `None` never ends the stream.
    pub max_order: Option<usize>,
    pub enumeration: Enumeration,
    pub history: History,
    /// Expand with rayon. Only the incremental enumeration uses this.
    pub parallel: bool,
}

impl Request {
    pub fn new(kinds: impl Into<Vec<Kind>>) -> Self {
        Self {
            kinds: kinds.into(),
            min_order: 0,
            max_order: None,
            enumeration: Enumeration::default(),
            history: History::default(),
            parallel: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.kinds.is_empty() {
            return Err(Error::EmptyRequest);
        }

        match self.max_order {
            Some(max) if max < self.min_order => Err(Error::InvalidOrderRange {
                min: self.min_order,
                max,
            }),
            _ => Ok(()),
        }
    }
}

/// One cell of the output table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    pub order: usize,
    pub kind: Kind,
    pub count: u64,
}

/// The kinds a request needs and how often each one is consumed per order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    needed: [bool; Kind::COUNT],
    wanted: [bool; Kind::COUNT],
    dependents: [usize; Kind::COUNT],
}

impl Plan {
    pub fn new(kinds: &[Kind]) -> Result<Self> {
        if kinds.is_empty() {
            return Err(Error::EmptyRequest);
        }

        let mut plan = Self {
            needed: [false; Kind::COUNT],
            wanted: [false; Kind::COUNT],
            dependents: [0; Kind::COUNT],
        };

        for kind in kinds {
            plan.wanted[kind.index()] = true;
        }

        for kind in kind::closure(kinds) {
            plan.needed[kind.index()] = true;

            for prerequisite in kind.prerequisites() {
                plan.dependents[prerequisite.index()] += 1;
            }
        }

        Ok(plan)
    }

    /// Needed kinds, prerequisites first.
    pub fn kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        Kind::ALL
            .into_iter()
            .filter(|kind| self.needed[kind.index()])
    }

    pub fn contains(&self, kind: Kind) -> bool {
        self.needed[kind.index()]
    }

    /// Whether the kind is emitted, as opposed to only feeding other kinds.
    pub fn is_wanted(&self, kind: Kind) -> bool {
        self.wanted[kind.index()]
    }

    /// Number of needed kinds computed directly from `kind`.
    pub fn dependents(&self, kind: Kind) -> usize {
        self.dependents[kind.index()]
    }

    /// How many times the shapes of `kind` are consumed per order, counting
    /// its own emission.
    pub fn uses(&self, kind: Kind) -> usize {
        self.dependents(kind) + usize::from(self.is_wanted(kind))
    }

    /// Whether the shapes of `kind` are collected instead of streamed.
    /// The fixed shapes are always held by the enumerator.
    pub fn is_materialized(&self, kind: Kind) -> bool {
        kind.source().is_some() && self.uses(kind) > 1
    }

    /// Whether any needed kind requires shapes, and with it an enumerator.
    pub fn needs_shapes(&self) -> bool {
        self.kinds().any(Kind::has_shapes)
    }
}

/// Evaluation counters, summed over all orders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    evaluations: [u64; Kind::COUNT],
}

impl Statistics {
    fn record(&mut self, kind: Kind) {
        self.evaluations[kind.index()] += 1;
    }

    /// How often the shapes of `kind` were produced. For [`Kind::Fixed`]
    /// this is the number of orders the enumerator was moved to; orders
    /// below the requested minimum are skipped over by a single seek.
    pub fn evaluations(&self, kind: Kind) -> u64 {
        self.evaluations[kind.index()]
    }
}

/// The shapes of one order.
struct Memo<'a> {
    fixed: Option<&'a ShapeSet>,
    collected: [Option<Vec<Polyomino>>; Kind::COUNT],
    /// Consumers still to run, for every collected kind.
    pending: [usize; Kind::COUNT],
}

impl<'a> Memo<'a> {
    fn new(fixed: Option<&'a ShapeSet>, plan: &Plan) -> Self {
        let mut pending = [0; Kind::COUNT];
        for kind in plan.kinds() {
            pending[kind.index()] = plan.dependents(kind);
        }

        Self {
            fixed,
            collected: Default::default(),
            pending,
        }
    }

    fn stream(&self, kind: Kind, history: History, statistics: &mut Statistics) -> Stream<'_> {
        if let Some(shapes) = &self.collected[kind.index()] {
            return Box::new(shapes.iter().map(|shape| Ok(Cow::Borrowed(shape))));
        }

        match kind.source() {
            Some(source) => {
                let input = self.stream(source, history, statistics);
                statistics.record(kind);
                classify(kind, input, history)
            }
            None => Box::new(
                self.fixed
                    .into_iter()
                    .flatten()
                    .map(|shape| Ok(Cow::Borrowed(shape))),
            ),
        }
    }

    fn count(&self, kind: Kind, history: History, statistics: &mut Statistics) -> Result<u64> {
        let mut count = 0;

        for shape in self.stream(kind, history, statistics) {
            shape?;
            count += 1;
        }

        Ok(count)
    }

    fn collect(
        &self,
        kind: Kind,
        history: History,
        statistics: &mut Statistics,
    ) -> Result<Vec<Polyomino>> {
        self.stream(kind, history, statistics)
            .map(|shape| shape.map(Cow::into_owned))
            .collect()
    }

    /// `kind` has consumed its input: walk up to the collected set (or the
    /// fixed set) it was streamed from and drop it after its last consumer.
    fn release(&mut self, kind: Kind, plan: &Plan) {
        let mut current = kind;

        while let Some(source) = current.source() {
            if source == Kind::Fixed || plan.is_materialized(source) {
                let pending = &mut self.pending[source.index()];
                *pending = pending.saturating_sub(1);

                if *pending == 0 {
                    self.collected[source.index()] = None;
                }

                return;
            }

            current = source;
        }
    }
}

/// Apply the filter that derives `kind` from the stream of its source.
fn classify<'a>(kind: Kind, input: Stream<'a>, history: History) -> Stream<'a> {
    match kind {
        Kind::Order | Kind::Fixed => input,
        Kind::OneSided => lift(input, move |shapes| {
            filter::one_sided(shapes, history).map(Cow::Owned)
        }),
        Kind::Free | Kind::OddSidesViaFixed => {
            lift(input, move |shapes| filter::free(shapes, history).map(Cow::Owned))
        }
        Kind::Chiral => lift(input, |shapes| filter::chiral(shapes)),
        Kind::FreeWithoutHoles | Kind::FixedWithoutHoles => {
            lift(input, |shapes| filter::without_holes(shapes))
        }
        Kind::FreeWithHoles => lift(input, |shapes| filter::with_holes(shapes)),
        Kind::OddSides | Kind::FixedOddSides => Box::new(input.filter_map(|shape| {
            shape
                .and_then(|shape| Ok(filter::has_odd_sides(&shape)?.then_some(shape)))
                .transpose()
        })),
    }
}

/// Run an infallible filter over a fallible stream. The first error ends the
/// input and is passed on after whatever the filter still emits.
fn lift<'a, F, J>(input: Stream<'a>, filter: F) -> Stream<'a>
where
    F: FnOnce(Box<dyn Iterator<Item = Shape<'a>> + 'a>) -> J,
    J: Iterator<Item = Shape<'a>> + 'a,
{
    let failure: Rc<RefCell<Option<Error>>> = Rc::default();
    let slot = Rc::clone(&failure);

    let shapes = input.map_while(move |shape| match shape {
        Ok(shape) => Some(shape),
        Err(error) => {
            *slot.borrow_mut() = Some(error);
            None
        }
    });

    let error = std::iter::from_fn(move || failure.borrow_mut().take().map(Err));

    Box::new(filter(Box::new(shapes)).map(Ok).chain(error))
}

/// The stream of requested counts, order by order.
///
/// Entries of one order come in [`Kind::ALL`] order. After the first error
/// the stream ends.
pub struct Entries {
    request: Request,
    plan: Plan,
    source: Option<Box<dyn Enumerator>>,
    next_order: usize,
    pending: VecDeque<Entry>,
    statistics: Statistics,
    failed: bool,
}

impl Entries {
    pub fn new(request: &Request) -> Result<Self> {
        Self::with_progress(request, ProgressBar::hidden())
    }

    /// Like [`Entries::new`], reporting enumeration progress on `progress`.
    pub fn with_progress(request: &Request, progress: ProgressBar) -> Result<Self> {
        request.validate()?;
        let plan = Plan::new(&request.kinds)?;

        let source = plan
            .needs_shapes()
            .then(|| request.enumeration.enumerator(request.parallel, progress));

        Ok(Self {
            request: request.clone(),
            plan,
            source,
            next_order: request.min_order,
            pending: VecDeque::new(),
            statistics: Statistics::default(),
            failed: false,
        })
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    fn compute(&mut self, order: usize) -> Result<()> {
        let fixed = match self.source.as_mut() {
            Some(source) => {
                self.statistics.record(Kind::Fixed);
                Some(source.seek(order))
            }
            None => None,
        };

        let history = self.request.history;
        let plan = &self.plan;
        let mut memo = Memo::new(fixed, plan);

        for kind in plan.kinds() {
            let count = match kind {
                Kind::Order => Some(order as u64),
                Kind::Fixed => Some(fixed.map_or(0, |set| set.len() as u64)),
                _ if plan.is_materialized(kind) => {
                    let shapes = memo.collect(kind, history, &mut self.statistics)?;
                    let count = shapes.len() as u64;

                    memo.release(kind, plan);
                    memo.collected[kind.index()] = Some(shapes);
                    Some(count)
                }
                _ if plan.is_wanted(kind) => {
                    let count = memo.count(kind, history, &mut self.statistics)?;

                    memo.release(kind, plan);
                    Some(count)
                }
                // Streamed into its only consumer later on.
                _ => None,
            };

            if let Some(count) = count.filter(|_| plan.is_wanted(kind)) {
                self.pending.push_back(Entry { order, kind, count });
            }
        }

        Ok(())
    }
}

impl Iterator for Entries {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.pending.pop_front() {
                return Some(Ok(entry));
            }

            if self.failed || self.request.max_order.is_some_and(|max| self.next_order > max) {
                return None;
            }

            let order = self.next_order;
            self.next_order += 1;

            if let Err(error) = self.compute(order) {
                self.failed = true;
                return Some(Err(error));
            }
        }
    }
}

/// Every shape of `kind` at `order`, greatest canonical key first.
///
/// Only the request's enumeration, history and parallelism are used.
pub fn shapes(kind: Kind, order: usize, request: &Request) -> Result<Vec<Polyomino>> {
    if !kind.has_shapes() {
        return Err(Error::NoShapes { kind });
    }

    let plan = Plan::new(&[kind])?;
    let mut source = request
        .enumeration
        .enumerator(request.parallel, ProgressBar::hidden());

    let memo = Memo::new(Some(source.seek(order)), &plan);
    let mut shapes = memo.collect(kind, request.history, &mut Statistics::default())?;
    shapes.sort_by(|a, b| b.canonical_cmp(a));

    Ok(shapes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(request: &Request) -> Vec<(usize, Kind, u64)> {
        Entries::new(request)
            .unwrap()
            .map(|entry| entry.map(|e| (e.order, e.kind, e.count)))
            .collect::<Result<_>>()
            .unwrap()
    }

    #[test]
    fn rejects_bad_requests() {
        assert!(matches!(
            Entries::new(&Request::new(Vec::<Kind>::new())),
            Err(Error::EmptyRequest)
        ));

        let request = Request {
            min_order: 5,
            max_order: Some(4),
            ..Request::new([Kind::Free])
        };
        assert!(matches!(
            Entries::new(&request),
            Err(Error::InvalidOrderRange { min: 5, max: 4 })
        ));

        assert!(matches!(
            shapes(Kind::Order, 3, &Request::new([Kind::Order])),
            Err(Error::NoShapes { kind: Kind::Order })
        ));
    }

    #[test]
    fn plan_counts_uses() {
        let plan = Plan::new(&[Kind::Free, Kind::Chiral, Kind::OddSides]).unwrap();

        assert!(plan.contains(Kind::FreeWithoutHoles));
        assert!(!plan.is_wanted(Kind::FreeWithoutHoles));
        assert!(!plan.contains(Kind::OneSided));

        // Chiral, free without holes, plus its own column.
        assert_eq!(plan.uses(Kind::Free), 3);
        assert!(plan.is_materialized(Kind::Free));

        // Only feeds the odd sides filter.
        assert_eq!(plan.uses(Kind::FreeWithoutHoles), 1);
        assert!(!plan.is_materialized(Kind::FreeWithoutHoles));
        assert!(!plan.is_materialized(Kind::Fixed));
    }

    #[test]
    fn entries_come_order_by_order() {
        let request = Request {
            max_order: Some(4),
            ..Request::new([Kind::Free, Kind::Order, Kind::Fixed])
        };

        let expected: Vec<_> = (0..=4)
            .flat_map(|n| {
                [
                    (n, Kind::Order, n as u64),
                    (n, Kind::Fixed, [1, 1, 2, 6, 19][n]),
                    (n, Kind::Free, [1, 1, 1, 2, 5][n]),
                ]
            })
            .collect();

        assert_eq!(counts(&request), expected);
    }

    #[test]
    fn only_requested_kinds_are_evaluated() {
        let request = Request {
            max_order: Some(5),
            ..Request::new([Kind::Order, Kind::Free])
        };

        let mut entries = Entries::new(&request).unwrap();
        entries.by_ref().for_each(|entry| {
            entry.unwrap();
        });

        let statistics = entries.statistics();
        assert_eq!(statistics.evaluations(Kind::Fixed), 6);
        assert_eq!(statistics.evaluations(Kind::Free), 6);

        for kind in [
            Kind::OneSided,
            Kind::Chiral,
            Kind::FreeWithoutHoles,
            Kind::FreeWithHoles,
            Kind::FixedWithoutHoles,
            Kind::OddSides,
            Kind::FixedOddSides,
            Kind::OddSidesViaFixed,
        ] {
            assert_eq!(statistics.evaluations(kind), 0, "{kind}");
        }
    }

    #[test]
    fn shared_sources_are_evaluated_once_per_order() {
        let request = Request {
            max_order: Some(6),
            ..Request::new([Kind::Free, Kind::Chiral, Kind::FreeWithHoles])
        };

        let mut entries = Entries::new(&request).unwrap();
        let free: Vec<u64> = entries
            .by_ref()
            .map(Result::unwrap)
            .filter(|entry| entry.kind == Kind::Free)
            .map(|entry| entry.count)
            .collect();

        assert_eq!(free, [1, 1, 1, 2, 5, 12, 35]);
        assert_eq!(entries.statistics().evaluations(Kind::Free), 7);
        assert_eq!(entries.statistics().evaluations(Kind::Chiral), 7);
    }

    #[test]
    fn orders_below_the_minimum_are_skipped() {
        let request = Request {
            min_order: 3,
            max_order: Some(5),
            ..Request::new([Kind::Free])
        };

        let mut entries = Entries::new(&request).unwrap();
        let found: Vec<_> = entries.by_ref().map(Result::unwrap).collect();

        assert_eq!(
            found.iter().map(|e| (e.order, e.count)).collect::<Vec<_>>(),
            [(3, 2), (4, 5), (5, 12)]
        );
        assert_eq!(entries.statistics().evaluations(Kind::Fixed), 3);
        assert_eq!(entries.statistics().evaluations(Kind::Free), 3);
    }

    #[test]
    fn redelmeier_starts_at_the_minimum_order() {
        let request = Request {
            min_order: 7,
            max_order: Some(7),
            enumeration: Enumeration::Redelmeier,
            ..Request::new([Kind::Fixed, Kind::Free])
        };

        let mut entries = Entries::new(&request).unwrap();
        let found: Vec<_> = entries.by_ref().map(|e| e.unwrap().count).collect();

        assert_eq!(found, [760, 108]);
        assert_eq!(entries.statistics().evaluations(Kind::Fixed), 1);

        let heptominoes = shapes(Kind::Free, 7, &request).unwrap();
        assert_eq!(heptominoes.len(), 108);
    }

    #[test]
    fn order_only_needs_no_enumerator() {
        let request = Request {
            max_order: Some(3),
            ..Request::new([Kind::Order])
        };

        let entries = Entries::new(&request).unwrap();
        assert!(!entries.plan().needs_shapes());

        let found: Vec<_> = entries.map(|e| e.unwrap().count).collect();
        assert_eq!(found, [0, 1, 2, 3]);
    }

    #[test]
    fn unbounded_stream_keeps_going() {
        let entries = Entries::new(&Request::new([Kind::Fixed])).unwrap();
        let found: Vec<u64> = entries.take(8).map(|e| e.unwrap().count).collect();

        assert_eq!(found, [1, 1, 2, 6, 19, 63, 216, 760]);
    }

    #[test]
    fn materializes_single_order() {
        let request = Request::new([Kind::Free]);

        let pentominoes = shapes(Kind::Free, 5, &request).unwrap();
        assert_eq!(pentominoes.len(), 12);

        let mut sorted = pentominoes.clone();
        sorted.sort_by(|a, b| b.canonical_cmp(a));
        assert_eq!(sorted, pentominoes);

        let holed = shapes(Kind::FreeWithHoles, 7, &request).unwrap();
        assert_eq!(holed.len(), 1);

        assert_eq!(shapes(Kind::Fixed, 0, &request).unwrap(), [Polyomino::empty()]);
    }
}
