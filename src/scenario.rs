//! Comparing runs of one model under different stresses.
use ndarray::{Array2, Array3};

use crate::error::{ModflowError, Result};
use crate::model::Model;
use crate::output::{CellBudgetFile, HeadFile};
use crate::postprocess::{capture_fraction, drawdown, water_table};

/// Heads and boundary flows of one run at one output time.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutput {
    pub totim: f64,
    pub heads: Array3<f64>,
    /// Flow of every listed boundary cell, in the order the package lists them.
    pub leakage: Vec<f64>,
}

impl ScenarioOutput {
    /// Read the heads of `model` and the `text` flows (e.g. `"RIVER LEAKAGE"`) of its budget
    /// file `budget_file` at time `totim`.
    pub fn collect(model: &Model, totim: f64, budget_file: &str, text: &str) -> Result<Self> {
        let heads = HeadFile::open_text(model.path(&format!("{}.hds", model.name())), "head")?
            .data_at(totim)?;
        let leakage = CellBudgetFile::open(model.path(budget_file))?.list_flows(text, totim)?;
        Ok(ScenarioOutput {
            totim,
            heads,
            leakage,
        })
    }

    pub fn water_table(&self, nodata: &[f64]) -> Array2<f64> {
        water_table(&self.heads, nodata)
    }

    /// Drawdown from this run to `other`.
    pub fn drawdown_to(&self, other: &ScenarioOutput) -> Result<Array3<f64>> {
        drawdown(&self.heads, &other.heads)
    }
}

/// Capture fraction of every boundary cell between a run without and a run with pumping at `rate`.
pub fn capture_fractions(base: &ScenarioOutput, pumped: &ScenarioOutput, rate: f64) -> Result<Vec<f64>> {
    if base.leakage.len() != pumped.leakage.len() {
        return Err(ModflowError::Config(format!(
            "scenarios have {} and {} boundary cells",
            base.leakage.len(),
            pumped.leakage.len()
        )));
    }
    base.leakage
        .iter()
        .zip(&pumped.leakage)
        .map(|(&b, &p)| capture_fraction(b, p, rate))
        .collect()
}
