use std::io::Write;

use ndarray::Array3;

use crate::array::{Array2d, Array3d};
use crate::error::Result;
use crate::grid::IBound;
use crate::packages::{ModelContext, Package, PackageKind, heading};

/// Basic package (`BAS6`): which cells are active and the starting heads.
#[derive(Debug, Clone, PartialEq)]
pub struct Basic {
    /// `None` makes every cell active.
    pub ibound: Option<Array3<IBound>>,
    pub strt: Array3d<f64>,
    /// Head assigned to inactive cells in the output.
    pub hnoflo: f64,
}

impl Default for Basic {
    fn default() -> Self {
        Basic {
            ibound: None,
            strt: Array3d::Constant(1.0),
            hnoflo: -999.99,
        }
    }
}

impl Basic {
    pub fn new(ibound: Array3<IBound>, strt: impl Into<Array3d<f64>>) -> Self {
        Basic {
            ibound: Some(ibound),
            strt: strt.into(),
            ..Basic::default()
        }
    }

    pub fn all_active(strt: impl Into<Array3d<f64>>) -> Self {
        Basic {
            strt: strt.into(),
            ..Basic::default()
        }
    }

    /// Fixed heads in the first and last column of every layer and row, everything else active.
    pub fn fixed_sides(nlay: usize, nrow: usize, ncol: usize) -> Array3<IBound> {
        Array3::from_shape_fn((nlay, nrow, ncol), |(_, _, j)| {
            if j == 0 || j + 1 == ncol {
                IBound::FixedHead
            } else {
                IBound::Active
            }
        })
    }

    fn ibound_layer(&self, k: usize) -> Array2d<i32> {
        match &self.ibound {
            Some(ibound) => Array2d::Values(
                ibound
                    .index_axis(ndarray::Axis(0), k)
                    .mapv(IBound::code),
            ),
            None => Array2d::Constant(IBound::Active.code()),
        }
    }
}

impl Package for Basic {
    fn kind(&self) -> PackageKind {
        PackageKind::Bas6
    }

    fn validate(&self, ctx: &ModelContext<'_>) -> Result<()> {
        let (nlay, nrow, ncol) = ctx.grid.shape();
        if let Some(ibound) = &self.ibound {
            ctx.grid.check_shape("ibound", ibound)?;
        }
        self.strt.check_shape("strt", nlay, nrow, ncol)
    }

    fn write(&self, ctx: &ModelContext<'_>, out: &mut dyn Write) -> Result<()> {
        heading(out, self.kind())?;
        writeln!(out, "FREE")?;
        for k in 0..ctx.grid.nlay {
            self.ibound_layer(k)
                .write(out, &format!("ibound layer {}", k + 1))?;
        }
        writeln!(out, "{:15.6E} # HNOFLO", self.hnoflo)?;
        for k in 0..ctx.grid.nlay {
            self.strt.write_layer(out, "strt", k)?;
        }
        Ok(())
    }
}
