//! MODFLOW input packages.
//!
//! Each package knows how to write its own input file. Layer, row and column indices are
//! zero-based everywhere in this crate and become one-based only when written.
use std::io::Write;

use crate::config::Version;
use crate::error::Result;
use crate::grid::Grid;
use crate::stress::itmp_codes;
use crate::time::StressPeriod;

mod bas;
mod dis;
mod lpf;
mod mnw2;
mod oc;
mod rch;
mod riv;
mod sfr;
mod solver;
mod upw;
mod wel;

pub use bas::Basic;
pub use dis::Discretization;
pub use lpf::{FlowProperties, LayerProperty};
pub use mnw2::{LossType, Mnw2Rate, Mnw2Well, MultiNodeWell, WellNode};
pub use oc::{OcAction, OutputControl};
pub use rch::{Recharge, RechargeOption};
pub use riv::{River, RiverRecord};
pub use sfr::{ReachRecord, SegmentRecord, StreamFlow};
pub use solver::{Nwt, NwtOptions, Pcg};
pub use upw::UpstreamWeighting;
pub use wel::{Well, WellRecord};

/// Budget output unit used when a package saves cell-by-cell flows without naming a file.
pub const DEFAULT_CBC_UNIT: u32 = 53;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PackageKind {
    Dis,
    Bas6,
    Lpf,
    Upw,
    Wel,
    Riv,
    Rch,
    Sfr,
    Mnw2,
    Oc,
    Pcg,
    Nwt,
}

impl PackageKind {
    /// File type written in the name file.
    pub fn ftype(self) -> &'static str {
        match self {
            PackageKind::Dis => "DIS",
            PackageKind::Bas6 => "BAS6",
            PackageKind::Lpf => "LPF",
            PackageKind::Upw => "UPW",
            PackageKind::Wel => "WEL",
            PackageKind::Riv => "RIV",
            PackageKind::Rch => "RCH",
            PackageKind::Sfr => "SFR",
            PackageKind::Mnw2 => "MNW2",
            PackageKind::Oc => "OC",
            PackageKind::Pcg => "PCG",
            PackageKind::Nwt => "NWT",
        }
    }

    pub fn default_unit(self) -> u32 {
        match self {
            PackageKind::Dis => 11,
            PackageKind::Bas6 => 13,
            PackageKind::Oc => 14,
            PackageKind::Lpf => 15,
            PackageKind::Sfr => 17,
            PackageKind::Riv => 18,
            PackageKind::Rch => 19,
            PackageKind::Wel => 20,
            PackageKind::Pcg => 27,
            PackageKind::Upw => 31,
            PackageKind::Nwt => 32,
            PackageKind::Mnw2 => 34,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            PackageKind::Dis => "dis",
            PackageKind::Bas6 => "bas",
            PackageKind::Lpf => "lpf",
            PackageKind::Upw => "upw",
            PackageKind::Wel => "wel",
            PackageKind::Riv => "riv",
            PackageKind::Rch => "rch",
            PackageKind::Sfr => "sfr",
            PackageKind::Mnw2 => "mnw2",
            PackageKind::Oc => "oc",
            PackageKind::Pcg => "pcg",
            PackageKind::Nwt => "nwt",
        }
    }

    /// Packages only MODFLOW-NWT understands.
    pub fn requires_nwt(self) -> bool {
        matches!(self, PackageKind::Upw | PackageKind::Nwt)
    }
}

/// An output file a package asks MODFLOW to open, listed in the name file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFile {
    pub unit: u32,
    pub file_name: String,
    pub binary: bool,
}

/// Where a package saves its cell-by-cell flow terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetOutput {
    pub unit: u32,
    /// Defaults to `<model>.cbc`.
    pub file_name: Option<String>,
}

impl BudgetOutput {
    pub fn unit(unit: u32) -> Self {
        BudgetOutput {
            unit,
            file_name: None,
        }
    }

    pub fn file(unit: u32, file_name: impl Into<String>) -> Self {
        BudgetOutput {
            unit,
            file_name: Some(file_name.into()),
        }
    }

    pub(crate) fn data_file(&self, model_name: &str) -> DataFile {
        DataFile {
            unit: self.unit,
            file_name: self
                .file_name
                .clone()
                .unwrap_or_else(|| format!("{}.cbc", model_name)),
            binary: true,
        }
    }
}

impl Default for BudgetOutput {
    fn default() -> Self {
        BudgetOutput::unit(DEFAULT_CBC_UNIT)
    }
}

pub(crate) fn budget_unit(budget: &Option<BudgetOutput>) -> u32 {
    budget.as_ref().map_or(0, |b| b.unit)
}

pub(crate) fn budget_files(budget: &Option<BudgetOutput>, model_name: &str) -> Vec<DataFile> {
    budget.iter().map(|b| b.data_file(model_name)).collect()
}

/// What a package sees of the model while it is written.
#[derive(Debug, Clone, Copy)]
pub struct ModelContext<'a> {
    pub name: &'a str,
    pub version: Version,
    pub grid: &'a Grid,
    pub periods: &'a [StressPeriod],
}

impl ModelContext<'_> {
    pub fn nper(&self) -> usize {
        self.periods.len()
    }

    pub fn is_transient(&self) -> bool {
        self.periods.iter().any(|p| !p.steady)
    }
}

pub trait Package: std::fmt::Debug {
    fn kind(&self) -> PackageKind;

    fn unit(&self) -> u32 {
        self.kind().default_unit()
    }

    fn file_name(&self, model_name: &str) -> String {
        format!("{}.{}", model_name, self.kind().extension())
    }

    /// Check the package against the model. Called for every package before any file is written.
    fn validate(&self, _ctx: &ModelContext<'_>) -> Result<()> {
        Ok(())
    }

    fn write(&self, ctx: &ModelContext<'_>, out: &mut dyn Write) -> Result<()>;

    fn output_files(&self, _model_name: &str) -> Vec<DataFile> {
        Vec::new()
    }
}

pub(crate) fn heading(out: &mut dyn Write, kind: PackageKind) -> Result<()> {
    writeln!(
        out,
        "# {} package for MODFLOW, generated by modflow-kit",
        kind.ftype()
    )?;
    Ok(())
}

/// Largest number of records active in any period (`MXACT`).
pub(crate) fn max_active<R>(resolved: &[Vec<R>]) -> usize {
    resolved.iter().map(Vec::len).max().unwrap_or(0)
}

/// Items 5 and 6 of the list packages: the item count of every period followed by its records.
pub(crate) fn write_list_periods<R: PartialEq>(
    out: &mut dyn Write,
    resolved: &[Vec<R>],
    line: impl Fn(&R) -> String,
) -> Result<()> {
    for (period, (itmp, records)) in itmp_codes(resolved).into_iter().zip(resolved).enumerate() {
        writeln!(out, "{} 0 # ITMP NP, stress period {}", itmp, period + 1)?;
        if itmp > 0 {
            for r in records {
                writeln!(out, "{}", line(r))?;
            }
        }
    }
    Ok(())
}
