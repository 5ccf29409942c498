use std::collections::BTreeSet;
use std::io::Write;

use crate::error::{ModflowError, Result};
use crate::packages::{
    BudgetOutput, DataFile, ModelContext, Package, PackageKind, budget_files, budget_unit, heading,
};
use crate::stress::{StressPeriodData, itmp_codes};

/// One stream reach (data set 2, reach input with `ISFROPT = 1`).
///
/// `segment` and `reach` are the one-based identifiers used by the package; the cell is
/// zero-based like everywhere else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReachRecord {
    pub layer: usize,
    pub row: usize,
    pub column: usize,
    pub segment: usize,
    pub reach: usize,
    pub rchlen: f64,
    /// Elevation of the top of the streambed.
    pub strtop: f64,
    pub slope: f64,
    pub strthick: f64,
    /// Vertical hydraulic conductivity of the streambed.
    pub strhc1: f64,
}

/// Segment properties for one stress period (data set 6a to 6c).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentRecord {
    pub nseg: usize,
    /// 0 fixed depth, 1 wide rectangular channel with Manning's equation.
    pub icalc: i32,
    pub outseg: usize,
    pub iupseg: usize,
    pub iprior: i32,
    pub flow: f64,
    pub runoff: f64,
    pub etsw: f64,
    pub pptsw: f64,
    pub roughch: f64,
    pub width1: f64,
    pub width2: f64,
    pub depth1: f64,
    pub depth2: f64,
}

impl SegmentRecord {
    /// A rectangular channel (`ICALC = 1`) without inflow, runoff or precipitation.
    pub fn rectangular(nseg: usize, outseg: usize, roughch: f64, width: f64) -> Self {
        SegmentRecord {
            nseg,
            icalc: 1,
            outseg,
            iupseg: 0,
            iprior: 0,
            flow: 0.0,
            runoff: 0.0,
            etsw: 0.0,
            pptsw: 0.0,
            roughch,
            width1: width,
            width2: width,
            depth1: 0.0,
            depth2: 0.0,
        }
    }
}

/// Streamflow-routing package (`SFR2`).
#[derive(Debug, Clone, PartialEq)]
pub struct StreamFlow {
    pub reach_data: Vec<ReachRecord>,
    pub segment_data: StressPeriodData<SegmentRecord>,
    /// Unit constant of Manning's equation (86400 for m and days).
    pub constant: f64,
    /// Closure tolerance for the stream stage.
    pub dleak: f64,
    /// Cell-by-cell flows between stream and aquifer (`ISTCB1`).
    pub budget: Option<BudgetOutput>,
    /// Unit of the stream listing text table (`ISTCB2`), written to `<model>.sfr.out`.
    pub listing_unit: Option<u32>,
    pub unit_number: Option<u32>,
}

impl StreamFlow {
    pub fn new(reach_data: Vec<ReachRecord>, segment_data: StressPeriodData<SegmentRecord>) -> Self {
        StreamFlow {
            reach_data,
            segment_data,
            constant: 86400.0,
            dleak: 1e-4,
            budget: None,
            listing_unit: None,
            unit_number: None,
        }
    }

    pub fn with_budget(mut self, budget: BudgetOutput) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_listing(mut self, unit: u32) -> Self {
        self.listing_unit = Some(unit);
        self
    }

    pub fn with_unit_number(mut self, unit: u32) -> Self {
        self.unit_number = Some(unit);
        self
    }

    /// Number of stream segments (`NSS`).
    pub fn nss(&self) -> usize {
        self.reach_data
            .iter()
            .map(|r| r.segment)
            .collect::<BTreeSet<_>>()
            .len()
    }

    fn write_segment(&self, out: &mut dyn Write, s: &SegmentRecord, first_period: bool) -> Result<()> {
        let mut line = format!("{} {} {} {}", s.nseg, s.icalc, s.outseg, s.iupseg);
        if s.iupseg > 0 {
            line.push_str(&format!(" {}", s.iprior));
        }
        line.push_str(&format!(
            " {:14.6E} {:14.6E} {:14.6E} {:14.6E}",
            s.flow, s.runoff, s.etsw, s.pptsw
        ));
        if s.icalc == 1 {
            line.push_str(&format!(" {:14.6E}", s.roughch));
        }
        writeln!(out, "{} # 6a NSEG ICALC OUTSEG IUPSEG FLOW RUNOFF ETSW PPTSW", line)?;
        match s.icalc {
            0 => {
                writeln!(out, "{:14.6E} {:14.6E} # 6b WIDTH1 DEPTH1", s.width1, s.depth1)?;
                writeln!(out, "{:14.6E} {:14.6E} # 6c WIDTH2 DEPTH2", s.width2, s.depth2)?;
            }
            // widths of a rectangular channel are only read in the first period
            _ if first_period => {
                writeln!(out, "{:14.6E} # 6b WIDTH1", s.width1)?;
                writeln!(out, "{:14.6E} # 6c WIDTH2", s.width2)?;
            }
            _ => {}
        }
        Ok(())
    }
}

impl Package for StreamFlow {
    fn kind(&self) -> PackageKind {
        PackageKind::Sfr
    }

    fn unit(&self) -> u32 {
        self.unit_number.unwrap_or(self.kind().default_unit())
    }

    fn validate(&self, ctx: &ModelContext<'_>) -> Result<()> {
        if self.reach_data.is_empty() {
            return Err(ModflowError::Config("SFR needs at least one reach".into()));
        }
        let nss = self.nss();
        for r in &self.reach_data {
            ctx.grid.check_cell("SFR", r.layer, r.row, r.column)?;
            if r.segment == 0 || r.segment > nss || r.reach == 0 {
                return Err(ModflowError::Config(format!(
                    "SFR reach {} of segment {} is not numbered from 1 to {}",
                    r.reach, r.segment, nss
                )));
            }
        }
        for s in self.segment_data.records().values().flatten() {
            if s.icalc != 0 && s.icalc != 1 {
                return Err(ModflowError::Unsupported(format!(
                    "SFR segment {} with ICALC {}",
                    s.nseg, s.icalc
                )));
            }
            if s.nseg == 0 || s.nseg > nss || s.outseg > nss {
                return Err(ModflowError::Config(format!(
                    "SFR segment {} (outlet {}) is not one of the {} segments",
                    s.nseg, s.outseg, nss
                )));
            }
        }
        self.segment_data.decode(ctx.nper())?;
        Ok(())
    }

    fn write(&self, ctx: &ModelContext<'_>, out: &mut dyn Write) -> Result<()> {
        let resolved = self.segment_data.resolve(ctx.nper())?;
        heading(out, self.kind())?;
        // negative NSTRM selects reach input
        writeln!(
            out,
            "{} {} 0 0 {:14.6E} {:14.6E} {} {} 1 0 # 1c NSTRM NSS NSFRPAR NPARSEG CONST DLEAK ISTCB1 ISTCB2 ISFROPT IRTFLG",
            -(self.reach_data.len() as i64),
            self.nss(),
            self.constant,
            self.dleak,
            budget_unit(&self.budget),
            self.listing_unit.unwrap_or(0)
        )?;
        for r in &self.reach_data {
            writeln!(
                out,
                "{} {} {} {} {} {:14.6E} {:14.6E} {:14.6E} {:14.6E} {:14.6E}",
                r.layer + 1,
                r.row + 1,
                r.column + 1,
                r.segment,
                r.reach,
                r.rchlen,
                r.strtop,
                r.slope,
                r.strthick,
                r.strhc1
            )?;
        }
        for (period, (itmp, segments)) in itmp_codes(&resolved).into_iter().zip(&resolved).enumerate() {
            writeln!(out, "{} 0 0 # 5 ITMP IRDFLG IPTFLG, stress period {}", itmp, period + 1)?;
            if itmp > 0 {
                for s in segments {
                    self.write_segment(out, s, period == 0)?;
                }
            }
        }
        Ok(())
    }

    fn output_files(&self, model_name: &str) -> Vec<DataFile> {
        let mut files = budget_files(&self.budget, model_name);
        if let Some(unit) = self.listing_unit {
            files.push(DataFile {
                unit,
                file_name: format!("{}.sfr.out", model_name),
                binary: false,
            });
        }
        files
    }
}
