//! The eight symmetries of the square and their action on polyominoes.

use super::Polyomino;
use crate::grid::Cell;

/// Source of one output coordinate: a row or column, read forwards (`P`) or
/// mirrored inside the bounding box (`N`).
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum MatrixCol {
    RowP,
    RowN,
    ColP,
    ColN,
}

/// An element of the dihedral group of the square.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Isometry {
    Identity,
    RotateLeft,
    RotateHalf,
    RotateRight,
    /// Mirror across the horizontal axis (rows are flipped).
    ReflectVert,
    /// Mirror across the vertical axis (columns are flipped).
    ReflectHoriz,
    /// Mirror across the main diagonal `row == col`.
    ReflectDiag,
    /// Mirror across the anti-diagonal `row == -col`.
    ReflectSkew,
}

impl Isometry {
    pub const ROTATIONS: [Isometry; 4] = [
        Isometry::Identity,
        Isometry::RotateLeft,
        Isometry::RotateHalf,
        Isometry::RotateRight,
    ];

    pub const REFLECTIONS: [Isometry; 4] = [
        Isometry::ReflectVert,
        Isometry::ReflectHoriz,
        Isometry::ReflectDiag,
        Isometry::ReflectSkew,
    ];

    pub const ALL: [Isometry; 8] = [
        Isometry::Identity,
        Isometry::RotateLeft,
        Isometry::RotateHalf,
        Isometry::RotateRight,
        Isometry::ReflectVert,
        Isometry::ReflectHoriz,
        Isometry::ReflectDiag,
        Isometry::ReflectSkew,
    ];

    /// Where the new row and the new column are read from.
    pub const fn matrix(self) -> (MatrixCol, MatrixCol) {
        use MatrixCol::*;

        match self {
            Isometry::Identity => (RowP, ColP),
            Isometry::RotateLeft => (ColN, RowP),
            Isometry::RotateHalf => (RowN, ColN),
            Isometry::RotateRight => (ColP, RowN),
            Isometry::ReflectVert => (RowN, ColP),
            Isometry::ReflectHoriz => (RowP, ColN),
            Isometry::ReflectDiag => (ColP, RowP),
            Isometry::ReflectSkew => (ColN, RowN),
        }
    }

    pub const fn inverse(self) -> Self {
        match self {
            Isometry::RotateLeft => Isometry::RotateRight,
            Isometry::RotateRight => Isometry::RotateLeft,
            other => other,
        }
    }

    /// Whether height and width trade places.
    pub const fn swaps_axes(self) -> bool {
        matches!(self.matrix().0, MatrixCol::ColP | MatrixCol::ColN)
    }
}

/// The symmetry groups polyominoes are quotiented by.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Group {
    /// The four rotations; orbits are one-sided polyominoes.
    Rotations,
    /// All eight isometries; orbits are free polyominoes.
    Dihedral,
}

impl Group {
    pub fn elements(self) -> &'static [Isometry] {
        match self {
            Group::Rotations => &Isometry::ROTATIONS,
            Group::Dihedral => &Isometry::ALL,
        }
    }
}

#[inline]
fn map_coord(cell: &Cell, height: i32, width: i32, col: MatrixCol) -> i32 {
    match col {
        MatrixCol::RowP => cell.row,
        MatrixCol::RowN => height - 1 - cell.row,
        MatrixCol::ColP => cell.col,
        MatrixCol::ColN => width - 1 - cell.col,
    }
}

impl Polyomino {
    /// Apply `isometry`, keeping the result inside its own bounding box.
    ///
    /// Mirrored coordinates are measured from the far edge of the bounding
    /// box, so the result needs no separate translation step.
    pub fn transform(&self, isometry: Isometry) -> Polyomino {
        if isometry == Isometry::Identity {
            return self.clone();
        }

        let (row_col, col_col) = isometry.matrix();
        let (height, width) = (self.height as i32, self.width as i32);

        let mut cells: Vec<Cell> = self
            .cells
            .iter()
            .map(|cell| {
                Cell::new(
                    map_coord(cell, height, width, row_col),
                    map_coord(cell, height, width, col_col),
                )
            })
            .collect();
        cells.sort_unstable();

        let (height, width) = if isometry.swaps_axes() {
            (self.width, self.height)
        } else {
            (self.height, self.width)
        };

        Polyomino::from_sorted(cells, height, width)
    }

    pub fn rotate_left(&self) -> Polyomino {
        self.transform(Isometry::RotateLeft)
    }

    pub fn rotate_half(&self) -> Polyomino {
        self.transform(Isometry::RotateHalf)
    }

    pub fn rotate_right(&self) -> Polyomino {
        self.transform(Isometry::RotateRight)
    }

    pub fn reflect_vert(&self) -> Polyomino {
        self.transform(Isometry::ReflectVert)
    }

    pub fn reflect_horiz(&self) -> Polyomino {
        self.transform(Isometry::ReflectHoriz)
    }

    pub fn reflect_diag(&self) -> Polyomino {
        self.transform(Isometry::ReflectDiag)
    }

    pub fn reflect_skew(&self) -> Polyomino {
        self.transform(Isometry::ReflectSkew)
    }

    /// `[self, left, half, right]`.
    pub fn rotations(&self) -> [Polyomino; 4] {
        Isometry::ROTATIONS.map(|isometry| self.transform(isometry))
    }

    /// The rotations followed by the four reflections.
    pub fn transforms(&self) -> [Polyomino; 8] {
        Isometry::ALL.map(|isometry| self.transform(isometry))
    }

    /// All images of `self` under `group`, repeats included.
    pub fn orbit(&self, group: Group) -> Vec<Polyomino> {
        group
            .elements()
            .iter()
            .map(|isometry| self.transform(*isometry))
            .collect()
    }

    /// The canonical-key maximum of the orbit of `self` under `group`.
    pub fn canonical_form(&self, group: Group) -> Polyomino {
        Self::representative(self.orbit(group))
    }

    /// Pick the canonical-key maximum of an orbit.
    pub(crate) fn representative(orbit: Vec<Polyomino>) -> Polyomino {
        orbit
            .into_iter()
            .map(|shape| (shape.canonical_key(), shape))
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, shape)| shape)
            .unwrap_or_else(Polyomino::empty)
    }

    /// Whether some reflection maps `self` onto itself.
    pub fn has_mirror_symmetry(&self) -> bool {
        Isometry::REFLECTIONS
            .iter()
            .any(|isometry| self.transform(*isometry) == *self)
    }
}
