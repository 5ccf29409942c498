use std::io::Write;

use crate::error::Result;
use crate::packages::{
    BudgetOutput, DataFile, ModelContext, Package, PackageKind, budget_files, budget_unit, heading,
    max_active, write_list_periods,
};
use crate::stress::StressPeriodData;

/// A well in one cell. Negative rates extract water.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WellRecord {
    pub layer: usize,
    pub row: usize,
    pub column: usize,
    pub rate: f64,
}

impl WellRecord {
    pub fn new(layer: usize, row: usize, column: usize, rate: f64) -> Self {
        WellRecord {
            layer,
            row,
            column,
            rate,
        }
    }
}

/// Well package (`WEL`).
#[derive(Debug, Clone, PartialEq)]
pub struct Well {
    pub stress_period_data: StressPeriodData<WellRecord>,
    pub budget: Option<BudgetOutput>,
}

impl Well {
    pub fn new(stress_period_data: StressPeriodData<WellRecord>) -> Self {
        Well {
            stress_period_data,
            budget: None,
        }
    }

    pub fn with_budget(mut self, budget: BudgetOutput) -> Self {
        self.budget = Some(budget);
        self
    }
}

impl Package for Well {
    fn kind(&self) -> PackageKind {
        PackageKind::Wel
    }

    fn validate(&self, ctx: &ModelContext<'_>) -> Result<()> {
        for r in self.stress_period_data.records().values().flatten() {
            ctx.grid.check_cell("WEL", r.layer, r.row, r.column)?;
        }
        self.stress_period_data.decode(ctx.nper())?;
        Ok(())
    }

    fn write(&self, ctx: &ModelContext<'_>, out: &mut dyn Write) -> Result<()> {
        let resolved = self.stress_period_data.resolve(ctx.nper())?;
        heading(out, self.kind())?;
        writeln!(
            out,
            "{} {} # MXACTW IWELCB",
            max_active(&resolved),
            budget_unit(&self.budget)
        )?;
        write_list_periods(out, &resolved, |r| {
            format!(
                "{:5} {:5} {:5} {:15.6E}",
                r.layer + 1,
                r.row + 1,
                r.column + 1,
                r.rate
            )
        })
    }

    fn output_files(&self, model_name: &str) -> Vec<DataFile> {
        budget_files(&self.budget, model_name)
    }
}
