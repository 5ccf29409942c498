use std::collections::BTreeMap;
use std::io::Write;
use std::str::FromStr;

use crate::error::{ModflowError, Result};
use crate::packages::{DataFile, ModelContext, Package, PackageKind, heading};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OcAction {
    SaveHead,
    SaveDrawdown,
    SaveBudget,
    PrintHead,
    PrintDrawdown,
    PrintBudget,
}

impl OcAction {
    fn words(self) -> &'static str {
        match self {
            OcAction::SaveHead => "SAVE HEAD",
            OcAction::SaveDrawdown => "SAVE DRAWDOWN",
            OcAction::SaveBudget => "SAVE BUDGET",
            OcAction::PrintHead => "PRINT HEAD",
            OcAction::PrintDrawdown => "PRINT DRAWDOWN",
            OcAction::PrintBudget => "PRINT BUDGET",
        }
    }
}

impl FromStr for OcAction {
    type Err = ModflowError;

    /// `"save head"`, `"print budget"`, ... in any case.
    fn from_str(s: &str) -> Result<Self> {
        let words: Vec<String> = s.split_whitespace().map(str::to_ascii_lowercase).collect();
        let words: Vec<&str> = words.iter().map(String::as_str).collect();
        match words.as_slice() {
            ["save", "head"] => Ok(OcAction::SaveHead),
            ["save", "drawdown"] => Ok(OcAction::SaveDrawdown),
            ["save", "budget"] => Ok(OcAction::SaveBudget),
            ["print", "head"] => Ok(OcAction::PrintHead),
            ["print", "drawdown"] => Ok(OcAction::PrintDrawdown),
            ["print", "budget"] => Ok(OcAction::PrintBudget),
            _ => Err(ModflowError::Config(format!("unknown output control action `{}`", s))),
        }
    }
}

/// Output control (`OC`) in words format.
///
/// Actions are keyed by zero-based `(period, step)`. Steps without an entry save and print
/// nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputControl {
    pub actions: BTreeMap<(usize, usize), Vec<OcAction>>,
    pub head_unit: u32,
    pub drawdown_unit: u32,
    /// Write budget files with the compact header that carries simulated times.
    pub compact: bool,
}

impl OutputControl {
    pub fn new(actions: BTreeMap<(usize, usize), Vec<OcAction>>) -> Self {
        OutputControl {
            actions,
            head_unit: 51,
            drawdown_unit: 52,
            compact: true,
        }
    }

    /// Parse action words such as `"save head"` for each `(period, step)`.
    pub fn from_words(entries: &[((usize, usize), &[&str])]) -> Result<Self> {
        let mut actions = BTreeMap::new();
        for (key, words) in entries {
            let parsed = words
                .iter()
                .map(|w| w.parse())
                .collect::<Result<Vec<OcAction>>>()?;
            actions.insert(*key, parsed);
        }
        Ok(OutputControl::new(actions))
    }

    /// The same actions at every time step of every period.
    pub fn every_step(nstp: &[usize], actions: &[OcAction]) -> Self {
        let mut map = BTreeMap::new();
        for (period, &n) in nstp.iter().enumerate() {
            for step in 0..n {
                map.insert((period, step), actions.to_vec());
            }
        }
        OutputControl::new(map)
    }

    fn any(&self, action: OcAction) -> bool {
        self.actions.values().flatten().any(|&a| a == action)
    }
}

impl Default for OutputControl {
    /// Save heads and print the budget at the end of the first period.
    fn default() -> Self {
        OutputControl::new(BTreeMap::from([(
            (0, 0),
            vec![OcAction::SaveHead, OcAction::PrintBudget],
        )]))
    }
}

impl Package for OutputControl {
    fn kind(&self) -> PackageKind {
        PackageKind::Oc
    }

    fn validate(&self, ctx: &ModelContext<'_>) -> Result<()> {
        for &(period, step) in self.actions.keys() {
            match ctx.periods.get(period) {
                Some(p) if step < p.nstp => {}
                _ => {
                    return Err(ModflowError::Config(format!(
                        "output control for period {} step {} is outside the simulation",
                        period, step
                    )));
                }
            }
        }
        Ok(())
    }

    fn write(&self, _ctx: &ModelContext<'_>, out: &mut dyn Write) -> Result<()> {
        heading(out, self.kind())?;
        writeln!(out, "HEAD PRINT FORMAT 0")?;
        writeln!(out, "HEAD SAVE UNIT {}", self.head_unit)?;
        writeln!(out, "DRAWDOWN PRINT FORMAT 0")?;
        writeln!(out, "DRAWDOWN SAVE UNIT {}", self.drawdown_unit)?;
        if self.compact {
            writeln!(out, "COMPACT BUDGET AUX")?;
        }
        for ((period, step), actions) in &self.actions {
            writeln!(out)?;
            writeln!(out, "PERIOD {} STEP {}", period + 1, step + 1)?;
            for action in actions {
                writeln!(out, "    {}", action.words())?;
            }
        }
        Ok(())
    }

    fn output_files(&self, model_name: &str) -> Vec<DataFile> {
        let mut files = Vec::new();
        if self.any(OcAction::SaveHead) {
            files.push(DataFile {
                unit: self.head_unit,
                file_name: format!("{}.hds", model_name),
                binary: true,
            });
        }
        if self.any(OcAction::SaveDrawdown) {
            files.push(DataFile {
                unit: self.drawdown_unit,
                file_name: format!("{}.ddn", model_name),
                binary: true,
            });
        }
        files
    }
}
