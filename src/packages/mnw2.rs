use std::io::Write;

use crate::error::{ModflowError, Result};
use crate::packages::{
    BudgetOutput, DataFile, ModelContext, Package, PackageKind, budget_files, budget_unit, heading,
};
use crate::stress::{StressPeriodData, itmp_codes};

/// Head loss model of a multi-node well (`LOSSTYPE`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LossType {
    None,
    Thiem { rw: f64 },
    Skin { rw: f64, rskin: f64, kskin: f64 },
}

/// Where a multi-node well is open to the aquifer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WellNode {
    /// Open over the full thickness of one cell.
    Cell { layer: usize, row: usize, column: usize },
    /// Open between two elevations, MODFLOW works out the layers.
    Interval {
        ztop: f64,
        zbotm: f64,
        row: usize,
        column: usize,
    },
}

/// One multi-node well (data set 2).
#[derive(Debug, Clone, PartialEq)]
pub struct Mnw2Well {
    pub wellid: String,
    pub loss: LossType,
    pub nodes: Vec<WellNode>,
    /// Elevation of the pump intake, `None` puts it in the first node.
    pub zpump: Option<f64>,
}

/// Desired pumping of one well in a stress period (data set 4).
#[derive(Debug, Clone, PartialEq)]
pub struct Mnw2Rate {
    pub wellid: String,
    pub qdes: f64,
}

impl Mnw2Rate {
    pub fn new(wellid: impl Into<String>, qdes: f64) -> Self {
        Mnw2Rate {
            wellid: wellid.into(),
            qdes,
        }
    }
}

/// Multi-node well package (`MNW2`).
///
/// The stress period data usually carries an explicit `ITMP` control signal, for example
/// `[2, 2, -1]` to reuse the pumping of the second period in the third.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiNodeWell {
    pub wells: Vec<Mnw2Well>,
    pub stress_period_data: StressPeriodData<Mnw2Rate>,
    pub budget: Option<BudgetOutput>,
    pub mnwprnt: i32,
}

impl MultiNodeWell {
    pub fn new(wells: Vec<Mnw2Well>, stress_period_data: StressPeriodData<Mnw2Rate>) -> Self {
        MultiNodeWell {
            wells,
            stress_period_data,
            budget: None,
            mnwprnt: 0,
        }
    }

    /// Total number of nodes over all wells.
    pub fn nodtot(&self) -> usize {
        self.wells.iter().map(|w| w.nodes.len()).sum()
    }

    fn write_well(&self, out: &mut dyn Write, well: &Mnw2Well) -> Result<()> {
        let by_interval = matches!(well.nodes.first(), Some(WellNode::Interval { .. }));
        let nnodes = well.nodes.len() as i64;
        writeln!(
            out,
            "{} {} # 2a WELLID NNODES",
            well.wellid,
            if by_interval { -nnodes } else { nnodes }
        )?;
        let (losstype, loss_line) = match well.loss {
            LossType::None => ("NONE", None),
            LossType::Thiem { rw } => ("THIEM", Some(format!("{:14.6E} # 2c Rw", rw))),
            LossType::Skin { rw, rskin, kskin } => (
                "SKIN",
                Some(format!(
                    "{:14.6E} {:14.6E} {:14.6E} # 2c Rw Rskin Kskin",
                    rw, rskin, kskin
                )),
            ),
        };
        let pumploc = if well.zpump.is_some() { -1 } else { 0 };
        writeln!(
            out,
            "{} {} 0 0 0 # 2b LOSSTYPE PUMPLOC Qlimit PPFLAG PUMPCAP",
            losstype, pumploc
        )?;
        if let Some(line) = loss_line {
            writeln!(out, "{}", line)?;
        }
        for node in &well.nodes {
            match *node {
                WellNode::Cell { layer, row, column } => {
                    writeln!(out, "{} {} {} # 2d IL IR IC", layer + 1, row + 1, column + 1)?
                }
                WellNode::Interval {
                    ztop,
                    zbotm,
                    row,
                    column,
                } => writeln!(
                    out,
                    "{:14.6E} {:14.6E} {} {} # 2d Ztop Zbotm IR IC",
                    ztop,
                    zbotm,
                    row + 1,
                    column + 1
                )?,
            }
        }
        if let Some(zpump) = well.zpump {
            writeln!(out, "{:14.6E} # 2e Zpump", zpump)?;
        }
        Ok(())
    }
}

impl Package for MultiNodeWell {
    fn kind(&self) -> PackageKind {
        PackageKind::Mnw2
    }

    fn validate(&self, ctx: &ModelContext<'_>) -> Result<()> {
        for well in &self.wells {
            if well.nodes.is_empty() {
                return Err(ModflowError::Config(format!("MNW2 well {} has no nodes", well.wellid)));
            }
            let by_interval = matches!(well.nodes[0], WellNode::Interval { .. });
            for node in &well.nodes {
                match *node {
                    WellNode::Cell { layer, row, column } if !by_interval => {
                        ctx.grid.check_cell("MNW2", layer, row, column)?
                    }
                    WellNode::Interval {
                        ztop,
                        zbotm,
                        row,
                        column,
                    } if by_interval => {
                        ctx.grid.check_cell("MNW2", 0, row, column)?;
                        if ztop < zbotm {
                            return Err(ModflowError::Config(format!(
                                "MNW2 well {} has an interval with top {} below bottom {}",
                                well.wellid, ztop, zbotm
                            )));
                        }
                    }
                    _ => {
                        return Err(ModflowError::Config(format!(
                            "MNW2 well {} mixes cell and interval nodes",
                            well.wellid
                        )));
                    }
                }
            }
        }
        for rate in self.stress_period_data.records().values().flatten() {
            if !self.wells.iter().any(|w| w.wellid == rate.wellid) {
                return Err(ModflowError::Config(format!(
                    "MNW2 pumping given for unknown well {}",
                    rate.wellid
                )));
            }
        }
        self.stress_period_data.decode(ctx.nper())?;
        Ok(())
    }

    fn write(&self, ctx: &ModelContext<'_>, out: &mut dyn Write) -> Result<()> {
        let resolved = self.stress_period_data.resolve(ctx.nper())?;
        heading(out, self.kind())?;
        writeln!(
            out,
            "{} {} {} # 1 MNWMAX IWL2CB MNWPRNT",
            self.wells.len(),
            budget_unit(&self.budget),
            self.mnwprnt
        )?;
        for well in &self.wells {
            self.write_well(out, well)?;
        }
        for (period, (itmp, rates)) in itmp_codes(&resolved).into_iter().zip(&resolved).enumerate() {
            writeln!(out, "{} # 3 ITMP, stress period {}", itmp, period + 1)?;
            if itmp > 0 {
                for r in rates {
                    writeln!(out, "{} {:14.6E} # 4a WELLID Qdes", r.wellid, r.qdes)?;
                }
            }
        }
        Ok(())
    }

    fn output_files(&self, model_name: &str) -> Vec<DataFile> {
        budget_files(&self.budget, model_name)
    }
}
