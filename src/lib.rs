//! Enumeration and classification of polyominoes by cell count.
//!
//! Fixed polyominoes are produced one order at a time by an [`Enumerator`],
//! reduced to one-sided, free and further classes by the lazy filters in
//! [`filter`], and counted per order by the [`scheduler`], which only ever
//! computes the kinds a request depends on.


pub mod enumerate;
pub mod error;
pub mod export;
pub mod filter;
pub mod grid;
pub mod kind;
pub mod oeis;
pub mod polyomino;
pub mod scheduler;

pub use enumerate::{Enumeration, Enumerator, Generator, Redelmeier};
pub use error::{Error, Result};
pub use filter::History;
pub use grid::Cell;
pub use kind::Kind;
pub use polyomino::{Polyomino, ShapeSet};
pub use scheduler::{Entries, Entry, Request};
