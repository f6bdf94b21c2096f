//! Text representations of polyominoes.

use serde::Serialize;

use super::Polyomino;

/// JSON shape of a polyomino: `{"height": h, "width": w, "cells": [[r, c], ...]}`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ShapeJson {
    pub height: usize,
    pub width: usize,
    pub cells: Vec<[i32; 2]>,
}

impl From<&'_ Polyomino> for ShapeJson {
    fn from(value: &'_ Polyomino) -> Self {
        Self {
            height: value.height(),
            width: value.width(),
            cells: value.cells().iter().map(|c| [c.row, c.col]).collect(),
        }
    }
}

impl Polyomino {
    /// Row-major occupancy grid over the bounding box.
    pub fn grid(&self) -> Vec<Vec<bool>> {
        let mut grid = vec![vec![false; self.width()]; self.height()];

        for cell in self.cells() {
            grid[cell.row as usize][cell.col as usize] = true;
        }

        grid
    }

    /// Draw the shape with `cell` for filled and `empty` for vacant squares.
    pub fn draw(&self, cell: &str, empty: &str, sep: &str, endrow: &str) -> String {
        self.grid()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|filled| if *filled { cell } else { empty })
                    .collect::<Vec<_>>()
                    .join(sep)
            })
            .collect::<Vec<_>>()
            .join(endrow)
    }

    /// `"h w bits"`, one `0`/`1` per bounding box square in row-major order.
    pub fn to_bitstring(&self) -> String {
        let bits = self.draw("1", "0", "", "");
        format!("{} {} {bits}", self.height(), self.width())
    }

    /// `"n h w r c r c ..."` with the cells in row-major order.
    pub fn to_coordinates(&self) -> String {
        let coordinates = self
            .cells()
            .iter()
            .map(|c| format!("{} {}", c.row, c.col))
            .collect::<Vec<_>>()
            .join(" ");

        format!(
            "{} {} {} {coordinates}",
            self.order(),
            self.height(),
            self.width()
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&ShapeJson::from(self))
    }
}

impl core::fmt::Display for Polyomino {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.draw("[]", "  ", "", "\n"))
    }
}
