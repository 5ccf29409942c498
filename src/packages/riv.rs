use std::io::Write;

use crate::error::Result;
use crate::packages::{
    BudgetOutput, DataFile, ModelContext, Package, PackageKind, budget_files, budget_unit, heading,
    max_active, write_list_periods,
};
use crate::stress::StressPeriodData;

/// A river reach in one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiverRecord {
    pub layer: usize,
    pub row: usize,
    pub column: usize,
    pub stage: f64,
    /// Riverbed conductance.
    pub cond: f64,
    /// Elevation of the bottom of the riverbed.
    pub rbot: f64,
}

impl RiverRecord {
    pub fn new(layer: usize, row: usize, column: usize, stage: f64, cond: f64, rbot: f64) -> Self {
        RiverRecord {
            layer,
            row,
            column,
            stage,
            cond,
            rbot,
        }
    }
}

/// River package (`RIV`).
#[derive(Debug, Clone, PartialEq)]
pub struct River {
    pub stress_period_data: StressPeriodData<RiverRecord>,
    pub budget: Option<BudgetOutput>,
}

impl River {
    pub fn new(stress_period_data: StressPeriodData<RiverRecord>) -> Self {
        River {
            stress_period_data,
            budget: None,
        }
    }

    pub fn with_budget(mut self, budget: BudgetOutput) -> Self {
        self.budget = Some(budget);
        self
    }
}

impl Package for River {
    fn kind(&self) -> PackageKind {
        PackageKind::Riv
    }

    fn validate(&self, ctx: &ModelContext<'_>) -> Result<()> {
        for r in self.stress_period_data.records().values().flatten() {
            ctx.grid.check_cell("RIV", r.layer, r.row, r.column)?;
        }
        self.stress_period_data.decode(ctx.nper())?;
        Ok(())
    }

    fn write(&self, ctx: &ModelContext<'_>, out: &mut dyn Write) -> Result<()> {
        let resolved = self.stress_period_data.resolve(ctx.nper())?;
        heading(out, self.kind())?;
        writeln!(
            out,
            "{} {} # MXACTR IRIVCB",
            max_active(&resolved),
            budget_unit(&self.budget)
        )?;
        write_list_periods(out, &resolved, |r| {
            format!(
                "{:5} {:5} {:5} {:15.6E} {:15.6E} {:15.6E}",
                r.layer + 1,
                r.row + 1,
                r.column + 1,
                r.stage,
                r.cond,
                r.rbot
            )
        })
    }

    fn output_files(&self, model_name: &str) -> Vec<DataFile> {
        budget_files(&self.budget, model_name)
    }
}
