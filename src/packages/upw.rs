use std::io::Write;

use crate::error::Result;
use crate::packages::lpf::FlowProperties;
use crate::packages::{
    BudgetOutput, DataFile, ModelContext, Package, PackageKind, budget_files, budget_unit, heading,
};

/// Upstream-weighting flow package (`UPW`) of MODFLOW-NWT.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamWeighting {
    pub properties: FlowProperties,
    pub hdry: f64,
    /// Write `hdry` for dry cells in the head output when non-zero.
    pub iphdry: i32,
    pub budget: Option<BudgetOutput>,
}

impl UpstreamWeighting {
    pub fn new(properties: FlowProperties) -> Self {
        UpstreamWeighting {
            properties,
            hdry: -1e30,
            iphdry: 0,
            budget: None,
        }
    }

    pub fn with_budget(mut self, budget: BudgetOutput) -> Self {
        self.budget = Some(budget);
        self
    }
}

impl Default for UpstreamWeighting {
    fn default() -> Self {
        UpstreamWeighting::new(FlowProperties::default())
    }
}

impl Package for UpstreamWeighting {
    fn kind(&self) -> PackageKind {
        PackageKind::Upw
    }

    fn validate(&self, ctx: &ModelContext<'_>) -> Result<()> {
        self.properties.validate(ctx)
    }

    fn write(&self, ctx: &ModelContext<'_>, out: &mut dyn Write) -> Result<()> {
        heading(out, self.kind())?;
        writeln!(
            out,
            "{} {:14.6E} 0 {} # IUPWCB HDRY NPUPW IPHDRY",
            budget_unit(&self.budget),
            self.hdry,
            self.iphdry
        )?;
        self.properties.write_flags(ctx, out)?;
        self.properties.write_arrays(ctx, out)
    }

    fn output_files(&self, model_name: &str) -> Vec<DataFile> {
        budget_files(&self.budget, model_name)
    }
}
