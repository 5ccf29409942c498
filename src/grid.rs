//! Structured grid geometry and the per-cell boundary indicator.
use ndarray::{Array1, Array3};

use crate::array::{Array1d, Array2d, Array3d};
use crate::error::{ModflowError, Result};

/// The state of a cell in the flow solution (`IBOUND`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IBound {
    #[default]
    Active,
    Inactive,
    FixedHead,
}

impl IBound {
    pub fn code(self) -> i32 {
        match self {
            IBound::Active => 1,
            IBound::Inactive => 0,
            IBound::FixedHead => -1,
        }
    }
}

impl From<i32> for IBound {
    /// Positive is active, zero inactive, negative a fixed head.
    fn from(code: i32) -> Self {
        match code {
            c if c > 0 => IBound::Active,
            0 => IBound::Inactive,
            _ => IBound::FixedHead,
        }
    }
}

/// Layers, rows and columns of a model with cell sizes and elevations.
///
/// `delr` is the width of each column along a row, `delc` the width of each row along a column.
/// `botm` holds the bottom elevation of every layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub nlay: usize,
    pub nrow: usize,
    pub ncol: usize,
    pub delr: Array1d<f64>,
    pub delc: Array1d<f64>,
    pub top: Array2d<f64>,
    pub botm: Array3d<f64>,
}

impl Grid {
    /// A grid whose array shapes are checked against `nlay`, `nrow` and `ncol`.
    pub fn new(
        nlay: usize,
        nrow: usize,
        ncol: usize,
        delr: impl Into<Array1d<f64>>,
        delc: impl Into<Array1d<f64>>,
        top: impl Into<Array2d<f64>>,
        botm: impl Into<Array3d<f64>>,
    ) -> Result<Self> {
        if nlay == 0 || nrow == 0 || ncol == 0 {
            return Err(ModflowError::Config(format!(
                "grid must have at least one cell, got {} x {} x {}",
                nlay, nrow, ncol
            )));
        }
        let grid = Grid {
            nlay,
            nrow,
            ncol,
            delr: delr.into(),
            delc: delc.into(),
            top: top.into(),
            botm: botm.into(),
        };
        grid.check()?;
        Ok(grid)
    }

    /// Flat top and layer bottoms equally spaced between `top` and `bottom`.
    pub fn uniform(
        nlay: usize,
        nrow: usize,
        ncol: usize,
        delr: f64,
        delc: f64,
        top: f64,
        bottom: f64,
    ) -> Result<Self> {
        let thickness = (top - bottom) / nlay.max(1) as f64;
        let botm: Vec<Array2d<f64>> = (1..=nlay)
            .map(|k| Array2d::Constant(top - thickness * k as f64))
            .collect();
        Grid::new(nlay, nrow, ncol, delr, delc, top, botm)
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.nlay, self.nrow, self.ncol)
    }

    pub fn ncells(&self) -> usize {
        self.nlay * self.nrow * self.ncol
    }

    pub fn contains(&self, layer: usize, row: usize, column: usize) -> bool {
        layer < self.nlay && row < self.nrow && column < self.ncol
    }

    pub fn check(&self) -> Result<()> {
        self.delr.check_shape("delr", self.ncol)?;
        self.delc.check_shape("delc", self.nrow)?;
        self.top.check_shape("top", self.nrow, self.ncol)?;
        self.botm.check_shape("botm", self.nlay, self.nrow, self.ncol)
    }

    /// Check a full three dimensional array against the grid.
    pub fn check_shape<T>(&self, name: &str, array: &Array3<T>) -> Result<()> {
        if array.dim() != self.shape() {
            return Err(ModflowError::ShapeMismatch {
                name: name.to_string(),
                expected: vec![self.nlay, self.nrow, self.ncol],
                found: array.shape().to_vec(),
            });
        }
        Ok(())
    }

    pub fn check_cell(&self, package: &'static str, layer: usize, row: usize, column: usize) -> Result<()> {
        if self.contains(layer, row, column) {
            Ok(())
        } else {
            Err(ModflowError::CellOutOfBounds {
                package,
                layer,
                row,
                column,
            })
        }
    }

    /// Cell centre x coordinates, measured from the left edge of the grid.
    pub fn x_centers(&self) -> Array1<f64> {
        let mut edge = 0.0;
        (0..self.ncol)
            .map(|j| {
                let w = self.delr.value(j);
                let c = edge + w / 2.0;
                edge += w;
                c
            })
            .collect()
    }

    /// Cell centre y coordinates, row 0 being the top (largest y) of the grid.
    pub fn y_centers(&self) -> Array1<f64> {
        let total: f64 = (0..self.nrow).map(|i| self.delc.value(i)).sum();
        let mut edge = total;
        (0..self.nrow)
            .map(|i| {
                let h = self.delc.value(i);
                let c = edge - h / 2.0;
                edge -= h;
                c
            })
            .collect()
    }

    /// Zero-based cell of a one-based node number as used in budget lists.
    pub fn node_to_cell(&self, node: usize) -> Option<(usize, usize, usize)> {
        node_to_cell(node, self.nrow, self.ncol).filter(|&(k, _, _)| k < self.nlay)
    }
}

pub(crate) fn node_to_cell(node: usize, nrow: usize, ncol: usize) -> Option<(usize, usize, usize)> {
    if node == 0 || nrow == 0 || ncol == 0 {
        return None;
    }
    let n = node - 1;
    let per_layer = nrow * ncol;
    Some((n / per_layer, (n % per_layer) / ncol, n % ncol))
}
