//! The columns that can be requested and the static graph of what each is
//! computed from.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::Serialize;

use crate::{error::Error, oeis};

/// One countable class of polyominoes, or the order itself.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub enum Kind {
    Order,
    Fixed,
    OneSided,
    Free,
    Chiral,
    FreeWithoutHoles,
    FreeWithHoles,
    FixedWithoutHoles,
    /// Free polyominoes without holes whose sides all have odd length.
    OddSides,
    /// Fixed polyominoes without holes whose sides all have odd length.
    FixedOddSides,
    /// [`Kind::OddSides`], reached through the fixed shapes instead of the free ones.
    OddSidesViaFixed,
}

impl Kind {
    /// Every kind, listed after all of its prerequisites.
    pub const ALL: [Kind; 11] = [
        Kind::Order,
        Kind::Fixed,
        Kind::OneSided,
        Kind::Free,
        Kind::Chiral,
        Kind::FreeWithoutHoles,
        Kind::FreeWithHoles,
        Kind::FixedWithoutHoles,
        Kind::OddSides,
        Kind::FixedOddSides,
        Kind::OddSidesViaFixed,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Column title.
    pub const fn label(self) -> &'static str {
        match self {
            Kind::Order => "order",
            Kind::Fixed => "fixed",
            Kind::OneSided => "one-sided",
            Kind::Free => "free",
            Kind::Chiral => "chiral",
            Kind::FreeWithoutHoles => "free without holes",
            Kind::FreeWithHoles => "free with holes",
            Kind::FixedWithoutHoles => "fixed without holes",
            Kind::OddSides => "A217595",
            Kind::FixedOddSides => "A217595 fixed",
            Kind::OddSidesViaFixed => "A217595 via fixed",
        }
    }

    /// The kinds this one is computed from.
    pub const fn prerequisites(self) -> &'static [Kind] {
        match self {
            Kind::Order | Kind::Fixed => &[],
            Kind::OneSided | Kind::Free | Kind::FixedWithoutHoles => &[Kind::Fixed],
            Kind::Chiral | Kind::FreeWithoutHoles | Kind::FreeWithHoles => &[Kind::Free],
            Kind::OddSides => &[Kind::FreeWithoutHoles],
            Kind::FixedOddSides => &[Kind::FixedWithoutHoles],
            Kind::OddSidesViaFixed => &[Kind::FixedOddSides],
        }
    }

    /// The single kind whose shapes this kind filters, if it filters any.
    pub fn source(self) -> Option<Kind> {
        self.prerequisites().first().copied()
    }

    /// Whether this kind is a set of shapes rather than a scalar.
    pub const fn has_shapes(self) -> bool {
        !matches!(self, Kind::Order)
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// OEIS identifier of the sequence this column reproduces.
    pub const fn oeis(self) -> Option<&'static str> {
        match self {
            Kind::Order | Kind::FixedWithoutHoles | Kind::FixedOddSides => None,
            Kind::Fixed => Some("A001168"),
            Kind::OneSided => Some("A000988"),
            Kind::Free => Some("A000105"),
            Kind::Chiral => Some("A030228"),
            Kind::FreeWithoutHoles => Some("A000104"),
            Kind::FreeWithHoles => Some("A001419"),
            Kind::OddSides | Kind::OddSidesViaFixed => Some("A217595"),
        }
    }

    pub fn link(self) -> Option<String> {
        self.oeis().map(|id| format!("https://oeis.org/{id}"))
    }

    /// Known values, starting at order 0.
    pub const fn reference(self) -> Option<&'static [u64]> {
        match self {
            Kind::Fixed => Some(oeis::A001168),
            Kind::OneSided => Some(oeis::A000988),
            Kind::Free => Some(oeis::A000105),
            Kind::Chiral => Some(oeis::A030228),
            Kind::FreeWithoutHoles => Some(oeis::A000104),
            Kind::FreeWithHoles => Some(oeis::A001419),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '-' | '_' => ' ',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);

        // "one-sided" normalizes to "one sided", compare both sides the same way.
        Kind::ALL
            .into_iter()
            .find(|kind| normalize(kind.label()) == wanted)
            .ok_or_else(|| Error::UnknownKind {
                name: s.to_string(),
            })
    }
}

/// The dependency graph, keyed by column title, in a serializable form.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DependencyGraph(pub BTreeMap<&'static str, Vec<&'static str>>);

impl DependencyGraph {
    pub fn new() -> Self {
        Self(
            Kind::ALL
                .into_iter()
                .map(|kind| {
                    let prerequisites = kind.prerequisites().iter().map(|k| k.label()).collect();
                    (kind.label(), prerequisites)
                })
                .collect(),
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// `kinds` plus everything they are transitively computed from.
pub fn closure(kinds: &[Kind]) -> Vec<Kind> {
    let mut needed = [false; Kind::COUNT];
    let mut stack: Vec<Kind> = kinds.to_vec();

    while let Some(kind) = stack.pop() {
        if !needed[kind.index()] {
            needed[kind.index()] = true;
            stack.extend_from_slice(kind.prerequisites());
        }
    }

    Kind::ALL
        .into_iter()
        .filter(|kind| needed[kind.index()])
        .collect()
}
