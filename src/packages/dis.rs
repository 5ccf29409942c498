use std::io::Write;

use crate::array::write_layer_line;
use crate::error::{ModflowError, Result};
use crate::grid::Grid;
use crate::packages::{ModelContext, Package, PackageKind, heading};
use crate::time::{LengthUnit, StressPeriod, TimeUnit};

/// Space and time discretization (`DIS`).
#[derive(Debug, Clone, PartialEq)]
pub struct Discretization {
    pub grid: Grid,
    pub periods: Vec<StressPeriod>,
    pub time_unit: TimeUnit,
    pub length_unit: LengthUnit,
}

impl Discretization {
    pub fn new(grid: Grid, periods: Vec<StressPeriod>) -> Result<Self> {
        if periods.is_empty() {
            return Err(ModflowError::Config("at least one stress period is required".into()));
        }
        if let Some(p) = periods.iter().find(|p| p.nstp == 0 || p.perlen < 0.0) {
            return Err(ModflowError::Config(format!(
                "stress period with length {} and {} time steps",
                p.perlen, p.nstp
            )));
        }
        Ok(Discretization {
            grid,
            periods,
            time_unit: TimeUnit::default(),
            length_unit: LengthUnit::default(),
        })
    }

    /// A single steady state period of length one.
    pub fn steady(grid: Grid) -> Self {
        Discretization {
            grid,
            periods: vec![StressPeriod::default()],
            time_unit: TimeUnit::default(),
            length_unit: LengthUnit::default(),
        }
    }

    pub fn with_units(mut self, time_unit: TimeUnit, length_unit: LengthUnit) -> Self {
        self.time_unit = time_unit;
        self.length_unit = length_unit;
        self
    }

    pub fn nper(&self) -> usize {
        self.periods.len()
    }
}

impl Package for Discretization {
    fn kind(&self) -> PackageKind {
        PackageKind::Dis
    }

    fn validate(&self, _ctx: &ModelContext<'_>) -> Result<()> {
        self.grid.check()
    }

    fn write(&self, _ctx: &ModelContext<'_>, out: &mut dyn Write) -> Result<()> {
        let g = &self.grid;
        heading(out, self.kind())?;
        writeln!(
            out,
            "{} {} {} {} {} {} # NLAY NROW NCOL NPER ITMUNI LENUNI",
            g.nlay,
            g.nrow,
            g.ncol,
            self.nper(),
            self.time_unit.code(),
            self.length_unit.code()
        )?;
        write_layer_line(out, &vec![0i32; g.nlay], "LAYCBD")?;
        g.delr.write(out, "delr")?;
        g.delc.write(out, "delc")?;
        g.top.write(out, "model_top")?;
        for k in 0..g.nlay {
            g.botm.write_layer(out, "botm", k)?;
        }
        for p in &self.periods {
            writeln!(
                out,
                "{:14.6E} {} {:14.6E} {} # PERLEN NSTP TSMULT Ss/tr",
                p.perlen,
                p.nstp,
                p.tsmult,
                if p.steady { "SS" } else { "TR" }
            )?;
        }
        Ok(())
    }
}
