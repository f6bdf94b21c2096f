//! Filters that reduce a set of same-order polyominoes to an equivalence class.
//!
//! All filters are lazy. Orbit filters ([`one_sided`], [`free`]) produce new
//! representatives, the others pass their input items through unchanged.

use std::borrow::Borrow;

use crate::{
    error::Result,
    polyomino::{Group, Polyomino, ShapeSet},
};

/// Whether orbit filters remember the orbits they have already emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum History {
    /// Keep every visited orbit member and emit the orbit maximum once.
    /// Works on any duplicate-free input.
    #[default]
    Tracked,
    /// Emit a shape only if it is the maximum of its own orbit.
    ///
    /// Only correct when the input is duplicate free and contains, for every
    /// shape, its whole orbit (like the set of all fixed polyominoes of an
    /// order). Anything else is silently undercounted.
    ///
    /// Disconnected input is rejected with a panic, but only in builds with
    /// debug assertions enabled. Release builds skip the check.
    Untracked,
}

fn shape_of<B: Borrow<Polyomino>>(item: &B) -> &Polyomino {
    <B as Borrow<Polyomino>>::borrow(item)
}

/// One representative per rotation orbit.
pub fn one_sided<'a, I, B>(shapes: I, history: History) -> Box<dyn Iterator<Item = Polyomino> + 'a>
where
    I: IntoIterator<Item = B>,
    I::IntoIter: 'a,
    B: Borrow<Polyomino> + 'a,
{
    quotient(shapes, Group::Rotations, history)
}

/// One representative per rotation-and-reflection orbit.
pub fn free<'a, I, B>(shapes: I, history: History) -> Box<dyn Iterator<Item = Polyomino> + 'a>
where
    I: IntoIterator<Item = B>,
    I::IntoIter: 'a,
    B: Borrow<Polyomino> + 'a,
{
    quotient(shapes, Group::Dihedral, history)
}

fn quotient<'a, I, B>(
    shapes: I,
    group: Group,
    history: History,
) -> Box<dyn Iterator<Item = Polyomino> + 'a>
where
    I: IntoIterator<Item = B>,
    I::IntoIter: 'a,
    B: Borrow<Polyomino> + 'a,
{
    let shapes = shapes.into_iter();

    match history {
        History::Tracked => {
            let mut visited = ShapeSet::new();

            Box::new(shapes.filter_map(move |item| {
                let shape = shape_of(&item);

                if visited.contains(shape) {
                    return None;
                }

                let orbit = shape.orbit(group);
                visited.extend(orbit.iter().cloned());

                Some(Polyomino::representative(orbit))
            }))
        }
        History::Untracked => Box::new(shapes.filter_map(move |item| {
            let shape = shape_of(&item);
            debug_assert!(shape.is_connected(), "disconnected shape:\n{shape}");

            let representative = shape.canonical_form(group);
            (representative == *shape).then_some(representative)
        })),
    }
}

/// Free polyominoes that no reflection maps onto themselves.
pub fn chiral<I, B>(shapes: I) -> impl Iterator<Item = B>
where
    I: IntoIterator<Item = B>,
    B: Borrow<Polyomino>,
{
    shapes
        .into_iter()
        .filter(|shape| !shape_of(shape).has_mirror_symmetry())
}

/// Polyominoes whose surroundings are one connected region.
pub fn without_holes<I, B>(shapes: I) -> impl Iterator<Item = B>
where
    I: IntoIterator<Item = B>,
    B: Borrow<Polyomino>,
{
    shapes.into_iter().filter(|shape| !shape_of(shape).has_holes())
}

/// Polyominoes enclosing at least one background cell.
pub fn with_holes<I, B>(shapes: I) -> impl Iterator<Item = B>
where
    I: IntoIterator<Item = B>,
    B: Borrow<Polyomino>,
{
    shapes.into_iter().filter(|shape| shape_of(shape).has_holes())
}

/// Whether every side of the outline has odd length.
///
/// The empty polyomino has no sides and passes.
pub fn has_odd_sides(shape: &Polyomino) -> Result<bool> {
    Ok(shape.side_lengths()?.iter().all(|side| side % 2 == 1))
}

/// Polyominoes without holes whose outline has only odd sides.
///
/// Stops at the first shape whose outline cannot be traced.
pub fn odd_sides<I, B>(shapes: I) -> impl Iterator<Item = Result<B>>
where
    I: IntoIterator<Item = B>,
    B: Borrow<Polyomino>,
{
    shapes.into_iter().filter_map(|shape| {
        has_odd_sides(shape_of(&shape))
            .map(|keep| keep.then_some(shape))
            .transpose()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{enumerate::Generator, grid::Cell, oeis};

    #[test]
    fn tracked_and_untracked_agree_on_fixed() {
        for n in 0..=7 {
            let fixed = Generator::fixed(n);

            let tracked: ShapeSet = free(&fixed, History::Tracked).collect();
            let untracked: ShapeSet = free(&fixed, History::Untracked).collect();
            assert_eq!(tracked, untracked, "order {n}");

            let tracked: ShapeSet = one_sided(&fixed, History::Tracked).collect();
            let untracked: ShapeSet = one_sided(&fixed, History::Untracked).collect();
            assert_eq!(tracked, untracked, "order {n}");
        }
    }

    #[test]
    fn representatives_are_orbit_maxima() {
        let fixed = Generator::fixed(6);

        for shape in free(&fixed, History::Tracked) {
            assert_eq!(shape.canonical_form(Group::Dihedral), shape);
        }

        for shape in one_sided(&fixed, History::Tracked) {
            assert_eq!(shape.canonical_form(Group::Rotations), shape);
        }
    }

    #[test]
    fn untracked_filter_is_idempotent() {
        let fixed = Generator::fixed(7);
        let free_shapes: Vec<Polyomino> = free(&fixed, History::Tracked).collect();

        let again: Vec<Polyomino> = free(&free_shapes, History::Untracked).collect();
        assert_eq!(again, free_shapes);

        let one_sided_shapes: Vec<Polyomino> = one_sided(&fixed, History::Tracked).collect();
        let again: Vec<Polyomino> = one_sided(&one_sided_shapes, History::Untracked).collect();
        assert_eq!(again, one_sided_shapes);
    }

    #[test]
    fn untracked_undercounts_incomplete_input() {
        // Only a non-maximal orientation of the L tromino.
        let l = Polyomino::new([Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)]);
        let other = l.canonical_form(Group::Dihedral);
        let lone = if l == other { l.rotate_left() } else { l };

        assert_eq!(free([&lone], History::Untracked).count(), 0);
        assert_eq!(free([&lone], History::Tracked).count(), 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "disconnected shape")]
    fn untracked_rejects_disconnected_shapes() {
        let split = Polyomino::new([Cell::new(0, 0), Cell::new(0, 2)]);
        free([&split], History::Untracked).for_each(drop);
    }

    #[test]
    fn chiral_counts() {
        for n in 0..=7 {
            let fixed = Generator::fixed(n);
            let free_shapes: Vec<Polyomino> = free(&fixed, History::Tracked).collect();

            assert_eq!(chiral(&free_shapes).count() as u64, oeis::A030228[n], "order {n}");
        }
    }

    #[test]
    fn hole_partition() {
        for n in 0..=8 {
            let fixed = Generator::fixed(n);
            let free_shapes: Vec<Polyomino> = free(&fixed, History::Tracked).collect();

            let without = without_holes(&free_shapes).count();
            let with = with_holes(&free_shapes).count();

            assert_eq!(without + with, free_shapes.len());
            assert_eq!(without as u64, oeis::A000104[n], "order {n}");
            assert_eq!(with as u64, oeis::A001419[n], "order {n}");
        }
    }

    #[test]
    fn first_hole_has_seven_cells() {
        let six: Vec<Polyomino> = free(&Generator::fixed(6), History::Tracked).collect();
        assert_eq!(without_holes(&six).count(), 35);
        assert_eq!(with_holes(&six).count(), 0);

        let seven: Vec<Polyomino> = free(&Generator::fixed(7), History::Tracked).collect();
        let holed: Vec<&Polyomino> = with_holes(&seven).collect();
        assert_eq!(holed.len(), 1);
        assert_eq!((holed[0].height(), holed[0].width()), (3, 3));
    }

    #[test]
    fn odd_sided_small_orders() {
        let expected = [1, 1, 0, 1, 1, 2];

        for (n, expected) in expected.into_iter().enumerate() {
            let fixed = Generator::fixed(n);
            let free_shapes: Vec<Polyomino> = free(&fixed, History::Tracked).collect();
            let simple: Vec<&Polyomino> = without_holes(&free_shapes).collect();

            let found = odd_sides(simple).collect::<Result<Vec<_>>>().unwrap();
            assert_eq!(found.len(), expected, "order {n}");
        }
    }
}
