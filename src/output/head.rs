use std::fs;
use std::path::{Path, PathBuf};

use ndarray::{Array2, Array3};

use crate::error::{ModflowError, Result};
use crate::output::{Precision, RecordReader, parse_detecting, same_time};

/// One layer of heads (or drawdowns) at one time step.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadRecord {
    /// Zero-based time step.
    pub kstp: usize,
    /// Zero-based stress period.
    pub kper: usize,
    /// Time since the start of the stress period.
    pub pertim: f64,
    /// Time since the start of the simulation.
    pub totim: f64,
    pub text: String,
    /// Zero-based layer.
    pub layer: usize,
    pub values: Array2<f64>,
}

/// A binary head or drawdown file.
///
/// Every record holds one layer; [`HeadFile::data_at`] stacks the layers of one output time.
#[derive(Debug, Clone)]
pub struct HeadFile {
    path: PathBuf,
    precision: Precision,
    records: Vec<HeadRecord>,
}

impl HeadFile {
    /// Read every record of a head file, detecting its precision.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        HeadFile::from_bytes(&bytes, path, None)
    }

    /// Read only the records whose label contains `text`, ignoring case (`"head"`, `"drawdown"`).
    pub fn open_text(path: impl AsRef<Path>, text: &str) -> Result<Self> {
        let mut file = HeadFile::open(path)?;
        let wanted = text.to_ascii_lowercase();
        file.records
            .retain(|r| r.text.to_ascii_lowercase().contains(&wanted));
        Ok(file)
    }

    pub fn from_bytes(bytes: &[u8], path: impl AsRef<Path>, precision: Option<Precision>) -> Result<Self> {
        let path = path.as_ref();
        let precision = precision.or_else(|| detect(bytes));
        let (precision, records) =
            parse_detecting(precision, |p| parse(bytes, path, p).map(|records| (p, records)))?;
        Ok(HeadFile {
            path: path.to_path_buf(),
            precision,
            records,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn records(&self) -> &[HeadRecord] {
        &self.records
    }

    /// Number of layers, the highest layer found in any record.
    pub fn nlay(&self) -> usize {
        self.records.iter().map(|r| r.layer + 1).max().unwrap_or(0)
    }

    /// Distinct output times in file order.
    pub fn times(&self) -> Vec<f64> {
        let mut times: Vec<f64> = Vec::new();
        for r in &self.records {
            if !times.iter().any(|&t| same_time(t, r.totim)) {
                times.push(r.totim);
            }
        }
        times
    }

    /// Distinct zero-based `(kstp, kper)` pairs in file order.
    pub fn kstpkper(&self) -> Vec<(usize, usize)> {
        let mut keys: Vec<(usize, usize)> = Vec::new();
        for r in &self.records {
            if !keys.contains(&(r.kstp, r.kper)) {
                keys.push((r.kstp, r.kper));
            }
        }
        keys
    }

    fn not_found(&self, at: String) -> ModflowError {
        let text = self
            .records
            .first()
            .map_or_else(|| "HEAD".to_string(), |r| r.text.clone());
        ModflowError::RecordNotFound {
            file: self.path.clone(),
            text,
            at,
        }
    }

    fn stack<'a>(&self, records: impl Iterator<Item = &'a HeadRecord>, at: String) -> Result<Array3<f64>> {
        let selected: Vec<&HeadRecord> = records.collect();
        let first = *selected.first().ok_or_else(|| self.not_found(at))?;
        let (nrow, ncol) = first.values.dim();
        let mut data = Array3::from_elem((self.nlay(), nrow, ncol), f64::NAN);
        for r in selected {
            if r.values.dim() != (nrow, ncol) {
                return Err(ModflowError::Malformed {
                    file: self.path.clone(),
                    reason: format!("layer {} has a different size than layer {}", r.layer + 1, first.layer + 1),
                });
            }
            data.index_axis_mut(ndarray::Axis(0), r.layer).assign(&r.values);
        }
        Ok(data)
    }

    /// All layers at simulated time `totim`. Layers missing from the file are NaN.
    pub fn data_at(&self, totim: f64) -> Result<Array3<f64>> {
        self.stack(
            self.records.iter().filter(|r| same_time(r.totim, totim)),
            format!("time {}", totim),
        )
    }

    /// All layers at zero-based time step `kstp` of stress period `kper`.
    pub fn data_for(&self, kstp: usize, kper: usize) -> Result<Array3<f64>> {
        self.stack(
            self.records.iter().filter(|r| r.kstp == kstp && r.kper == kper),
            format!("step {} of period {}", kstp + 1, kper + 1),
        )
    }

    /// All layers at the last output time.
    pub fn last(&self) -> Result<Array3<f64>> {
        match self.times().last() {
            Some(&t) => self.data_at(t),
            None => Err(self.not_found("the end of the file".to_string())),
        }
    }

    pub fn layer_at(&self, totim: f64, layer: usize) -> Result<Array2<f64>> {
        self.records
            .iter()
            .find(|r| r.layer == layer && same_time(r.totim, totim))
            .map(|r| r.values.clone())
            .ok_or_else(|| self.not_found(format!("time {} layer {}", totim, layer + 1)))
    }

    /// `(totim, head)` of one cell at every output time.
    pub fn time_series(&self, layer: usize, row: usize, column: usize) -> Result<Vec<(f64, f64)>> {
        let series: Vec<(f64, f64)> = self
            .records
            .iter()
            .filter(|r| r.layer == layer)
            .filter_map(|r| r.values.get((row, column)).map(|&h| (r.totim, h)))
            .collect();
        if series.is_empty() {
            return Err(self.not_found(format!(
                "cell (layer {}, row {}, column {})",
                layer + 1,
                row + 1,
                column + 1
            )));
        }
        Ok(series)
    }
}

/// The label sits after two integers and two reals, so it moves with the precision.
fn detect(bytes: &[u8]) -> Option<Precision> {
    let label_at = |offset: usize| {
        bytes
            .get(offset..offset + 16)
            .is_some_and(crate::output::is_label)
    };
    if label_at(16) {
        Some(Precision::Single)
    } else if label_at(24) {
        Some(Precision::Double)
    } else {
        None
    }
}

fn parse(bytes: &[u8], path: &Path, precision: Precision) -> Result<Vec<HeadRecord>> {
    let mut reader = RecordReader::new(bytes, path);
    let mut records = Vec::new();
    while !reader.is_empty() {
        let kstp = reader.int()?;
        let kper = reader.int()?;
        let pertim = reader.real(precision)?;
        let totim = reader.real(precision)?;
        let text = reader.text()?;
        let ncol = reader.count("column count")?;
        let nrow = reader.count("row count")?;
        let ilay = reader.int()?;
        if kstp < 1 || kper < 1 || ilay < 1 {
            return Err(reader.malformed(format!(
                "header with step {}, period {}, layer {}",
                kstp, kper, ilay
            )));
        }
        let n = nrow
            .checked_mul(ncol)
            .ok_or_else(|| reader.malformed("layer size overflows"))?;
        let values = reader.reals(n, precision)?;
        let values = Array2::from_shape_vec((nrow, ncol), values)
            .map_err(|e| reader.malformed(e.to_string()))?;
        records.push(HeadRecord {
            kstp: kstp as usize - 1,
            kper: kper as usize - 1,
            pertim,
            totim,
            text,
            layer: ilay as usize - 1,
            values,
        });
    }
    Ok(records)
}
