use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ModflowError, Result};

/// Flows of one stream reach at one time step, as printed in the stream listing.
#[derive(Debug, Clone, PartialEq)]
pub struct SfrRecord {
    /// Zero-based stress period.
    pub kper: usize,
    /// Zero-based time step.
    pub kstp: usize,
    pub layer: usize,
    pub row: usize,
    pub column: usize,
    /// One-based, as numbered in the package input.
    pub segment: usize,
    pub reach: usize,
    pub qin: f64,
    /// Flow from the stream to the aquifer, positive when the stream loses water.
    pub qaquifer: f64,
    pub qout: f64,
    pub qovr: f64,
    pub qprecip: f64,
    pub qet: f64,
    pub stage: f64,
    pub depth: f64,
    pub width: f64,
    pub cond: f64,
    /// Only printed by some versions.
    pub gradient: Option<f64>,
}

/// The stream listing text file written by the SFR package.
#[derive(Debug, Clone)]
pub struct SfrOutput {
    path: PathBuf,
    records: Vec<SfrRecord>,
}

impl SfrOutput {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        SfrOutput::parse_str(&text, path)
    }

    /// Parse the rows of every `STREAM LISTING` table. Lines outside the tables are skipped.
    pub fn parse_str(text: &str, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let malformed = |line: usize, reason: String| ModflowError::Malformed {
            file: path.to_path_buf(),
            reason: format!("line {}: {}", line + 1, reason),
        };

        let mut records = Vec::new();
        let mut current: Option<(usize, usize)> = None;
        for (n, line) in text.lines().enumerate() {
            if line.contains("STREAM LISTING") {
                current = Some(listing_header(line).ok_or_else(|| {
                    malformed(n, "stream listing header without period and step".into())
                })?);
                continue;
            }
            let Some((kper, kstp)) = current else {
                continue;
            };
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 15 {
                continue;
            }
            let Some(ints) = fields[..5]
                .iter()
                .map(|f| f.parse::<usize>().ok().filter(|&v| v > 0))
                .collect::<Option<Vec<usize>>>()
            else {
                continue;
            };
            let values = fields[5..]
                .iter()
                .map(|f| f.parse::<f64>())
                .collect::<std::result::Result<Vec<f64>, _>>()
                .map_err(|e| malformed(n, format!("stream listing row: {}", e)))?;
            if values.len() != 10 && values.len() != 11 {
                return Err(malformed(
                    n,
                    format!("stream listing row with {} values", values.len()),
                ));
            }
            records.push(SfrRecord {
                kper,
                kstp,
                layer: ints[0] - 1,
                row: ints[1] - 1,
                column: ints[2] - 1,
                segment: ints[3],
                reach: ints[4],
                qin: values[0],
                qaquifer: values[1],
                qout: values[2],
                qovr: values[3],
                qprecip: values[4],
                qet: values[5],
                stage: values[6],
                depth: values[7],
                width: values[8],
                cond: values[9],
                gradient: values.get(10).copied(),
            });
        }
        Ok(SfrOutput {
            path: path.to_path_buf(),
            records,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[SfrRecord] {
        &self.records
    }

    /// Every time step of one reach, in file order.
    pub fn reach(&self, segment: usize, reach: usize) -> Vec<&SfrRecord> {
        self.records
            .iter()
            .filter(|r| r.segment == segment && r.reach == reach)
            .collect()
    }

    /// All reaches at zero-based time step `kstp` of stress period `kper`.
    pub fn at(&self, kstp: usize, kper: usize) -> Vec<&SfrRecord> {
        self.records
            .iter()
            .filter(|r| r.kstp == kstp && r.kper == kper)
            .collect()
    }
}

/// Zero-based `(kper, kstp)` from `STREAM LISTING     PERIOD     1 STEP     1`.
fn listing_header(line: &str) -> Option<(usize, usize)> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let after = |key: &str| -> Option<usize> {
        let i = words.iter().position(|w| *w == key)?;
        words.get(i + 1)?.parse::<usize>().ok().filter(|&v| v > 0)
    };
    Some((after("PERIOD")? - 1, after("STEP")? - 1))
}
