use std::io::Write;

use crate::array::{Array3d, per_layer, write_layer_line};
use crate::error::Result;
use crate::packages::{
    BudgetOutput, DataFile, ModelContext, Package, PackageKind, budget_files, budget_unit, heading,
};

/// Hydraulic properties shared by the `LPF` and `UPW` flow packages.
///
/// The per-layer flags may hold a single entry, which then applies to every layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowProperties {
    /// Horizontal hydraulic conductivity.
    pub hk: Array3d<f64>,
    /// Anisotropy along columns, only read for layers with `chani <= 0`.
    pub hani: Array3d<f64>,
    /// Vertical conductivity, or the ratio horizontal to vertical when `layvka != 0`.
    pub vka: Array3d<f64>,
    pub ss: Array3d<f64>,
    pub sy: Array3d<f64>,
    /// 0 confined, anything else convertible.
    pub laytyp: Vec<i32>,
    pub layavg: Vec<i32>,
    pub chani: Vec<f64>,
    pub layvka: Vec<i32>,
}

impl Default for FlowProperties {
    fn default() -> Self {
        FlowProperties {
            hk: Array3d::Constant(1.0),
            hani: Array3d::Constant(1.0),
            vka: Array3d::Constant(1.0),
            ss: Array3d::Constant(1e-5),
            sy: Array3d::Constant(0.15),
            laytyp: vec![0],
            layavg: vec![0],
            chani: vec![1.0],
            layvka: vec![0],
        }
    }
}

impl FlowProperties {
    pub fn new(hk: impl Into<Array3d<f64>>, vka: impl Into<Array3d<f64>>) -> Self {
        FlowProperties {
            hk: hk.into(),
            vka: vka.into(),
            ..FlowProperties::default()
        }
    }

    pub fn with_storage(mut self, ss: impl Into<Array3d<f64>>, sy: impl Into<Array3d<f64>>) -> Self {
        self.ss = ss.into();
        self.sy = sy.into();
        self
    }

    pub fn with_laytyp(mut self, laytyp: i32) -> Self {
        self.laytyp = vec![laytyp];
        self
    }

    pub fn with_layvka(mut self, layvka: i32) -> Self {
        self.layvka = vec![layvka];
        self
    }

    pub(crate) fn validate(&self, ctx: &ModelContext<'_>) -> Result<()> {
        let (nlay, nrow, ncol) = ctx.grid.shape();
        per_layer(&self.laytyp, nlay, "laytyp")?;
        per_layer(&self.layavg, nlay, "layavg")?;
        per_layer(&self.chani, nlay, "chani")?;
        per_layer(&self.layvka, nlay, "layvka")?;
        self.hk.check_shape("hk", nlay, nrow, ncol)?;
        self.hani.check_shape("hani", nlay, nrow, ncol)?;
        self.vka.check_shape("vka", nlay, nrow, ncol)?;
        self.ss.check_shape("ss", nlay, nrow, ncol)?;
        self.sy.check_shape("sy", nlay, nrow, ncol)
    }

    /// Item 2 to 6 (the per-layer flag lines, `LAYWET` always zero).
    pub(crate) fn write_flags(&self, ctx: &ModelContext<'_>, out: &mut dyn Write) -> Result<()> {
        let nlay = ctx.grid.nlay;
        write_layer_line(out, &per_layer(&self.laytyp, nlay, "laytyp")?, "LAYTYP")?;
        write_layer_line(out, &per_layer(&self.layavg, nlay, "layavg")?, "LAYAVG")?;
        write_layer_line(out, &per_layer(&self.chani, nlay, "chani")?, "CHANI")?;
        write_layer_line(out, &per_layer(&self.layvka, nlay, "layvka")?, "LAYVKA")?;
        write_layer_line(out, &vec![0i32; nlay], "LAYWET")
    }

    /// The property arrays of every layer.
    pub(crate) fn write_arrays(&self, ctx: &ModelContext<'_>, out: &mut dyn Write) -> Result<()> {
        let nlay = ctx.grid.nlay;
        let laytyp = per_layer(&self.laytyp, nlay, "laytyp")?;
        let chani = per_layer(&self.chani, nlay, "chani")?;
        let transient = ctx.is_transient();
        for k in 0..nlay {
            self.hk.write_layer(out, "hk", k)?;
            if chani[k] <= 0.0 {
                self.hani.write_layer(out, "hani", k)?;
            }
            self.vka.write_layer(out, "vka", k)?;
            if transient {
                self.ss.write_layer(out, "ss", k)?;
                if laytyp[k] != 0 {
                    self.sy.write_layer(out, "sy", k)?;
                }
            }
        }
        Ok(())
    }
}

/// Layer-property flow package (`LPF`).
#[derive(Debug, Clone, PartialEq)]
pub struct LayerProperty {
    pub properties: FlowProperties,
    /// Head assigned to cells that go dry.
    pub hdry: f64,
    pub budget: Option<BudgetOutput>,
}

impl LayerProperty {
    pub fn new(properties: FlowProperties) -> Self {
        LayerProperty {
            properties,
            hdry: -1e30,
            budget: None,
        }
    }

    pub fn with_budget(mut self, budget: BudgetOutput) -> Self {
        self.budget = Some(budget);
        self
    }
}

impl Default for LayerProperty {
    fn default() -> Self {
        LayerProperty::new(FlowProperties::default())
    }
}

impl Package for LayerProperty {
    fn kind(&self) -> PackageKind {
        PackageKind::Lpf
    }

    fn validate(&self, ctx: &ModelContext<'_>) -> Result<()> {
        self.properties.validate(ctx)
    }

    fn write(&self, ctx: &ModelContext<'_>, out: &mut dyn Write) -> Result<()> {
        heading(out, self.kind())?;
        writeln!(
            out,
            "{} {:14.6E} 0 # ILPFCB HDRY NPLPF",
            budget_unit(&self.budget),
            self.hdry
        )?;
        self.properties.write_flags(ctx, out)?;
        self.properties.write_arrays(ctx, out)
    }

    fn output_files(&self, model_name: &str) -> Vec<DataFile> {
        budget_files(&self.budget, model_name)
    }
}
