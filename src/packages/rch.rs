use std::collections::BTreeMap;
use std::io::Write;

use crate::array::Array2d;
use crate::error::Result;
use crate::packages::{
    BudgetOutput, DataFile, ModelContext, Package, PackageKind, budget_files, budget_unit, heading,
};
use crate::stress::carry_forward;

/// Which cell of a vertical column receives recharge (`NRCHOP`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RechargeOption {
    #[default]
    TopLayer,
    HighestActive,
}

impl RechargeOption {
    fn code(self) -> i32 {
        match self {
            RechargeOption::TopLayer => 1,
            RechargeOption::HighestActive => 3,
        }
    }
}

/// Recharge package (`RCH`).
///
/// Rates are given per stress period; a period without a rate keeps the rate of the period before
/// it. Period 0 must have a rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Recharge {
    pub option: RechargeOption,
    pub rates: BTreeMap<usize, Array2d<f64>>,
    pub budget: Option<BudgetOutput>,
}

impl Recharge {
    /// The same recharge rate in every period.
    pub fn constant(rate: f64) -> Self {
        Recharge::new(BTreeMap::from([(0, Array2d::Constant(rate))]))
    }

    pub fn new(rates: BTreeMap<usize, Array2d<f64>>) -> Self {
        Recharge {
            option: RechargeOption::default(),
            rates,
            budget: None,
        }
    }

    /// Constant rates listed by period.
    pub fn per_period(rates: &[(usize, f64)]) -> Self {
        Recharge::new(
            rates
                .iter()
                .map(|&(period, rate)| (period, Array2d::Constant(rate)))
                .collect(),
        )
    }

    pub fn with_option(mut self, option: RechargeOption) -> Self {
        self.option = option;
        self
    }

    pub fn with_budget(mut self, budget: BudgetOutput) -> Self {
        self.budget = Some(budget);
        self
    }
}

impl Package for Recharge {
    fn kind(&self) -> PackageKind {
        PackageKind::Rch
    }

    fn validate(&self, ctx: &ModelContext<'_>) -> Result<()> {
        for rate in self.rates.values() {
            rate.check_shape("rech", ctx.grid.nrow, ctx.grid.ncol)?;
        }
        carry_forward(ctx.nper(), &self.rates)?;
        Ok(())
    }

    fn write(&self, ctx: &ModelContext<'_>, out: &mut dyn Write) -> Result<()> {
        let rates = carry_forward(ctx.nper(), &self.rates)?;
        heading(out, self.kind())?;
        writeln!(
            out,
            "{} {} # NRCHOP IRCHCB",
            self.option.code(),
            budget_unit(&self.budget)
        )?;
        for (period, rate) in rates.iter().enumerate() {
            if period > 0 && rates[period - 1] == *rate {
                writeln!(out, "-1 0 # INRECH INIRCH, stress period {}", period + 1)?;
            } else {
                writeln!(out, "1 0 # INRECH INIRCH, stress period {}", period + 1)?;
                rate.write(out, &format!("rech stress period {}", period + 1))?;
            }
        }
        Ok(())
    }

    fn output_files(&self, model_name: &str) -> Vec<DataFile> {
        budget_files(&self.budget, model_name)
    }
}
