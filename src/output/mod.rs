//! Readers for the files MODFLOW writes: binary heads and drawdowns, binary cell-by-cell budgets
//! and the stream listing of the SFR package.
//!
//! The binary files are unformatted stream files in the byte order of the machine that ran the
//! simulation. They are read in native byte order.
use std::path::Path;

use bytemuck::Pod;

use crate::error::{ModflowError, Result};

mod budget;
mod head;
mod sfr;

pub use budget::{BudgetData, BudgetRecord, CellBudgetFile, CellFlow};
pub use head::{HeadFile, HeadRecord};
pub use sfr::{SfrOutput, SfrRecord};

/// Floating point width of a binary output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    #[default]
    Single,
    Double,
}

impl Precision {
    pub fn width(self) -> usize {
        match self {
            Precision::Single => 4,
            Precision::Double => 8,
        }
    }
}

/// Two times are the same output time.
pub(crate) fn same_time(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * b.abs().max(1.0)
}

/// Sequential reads over the bytes of an output file.
pub(crate) struct RecordReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    file: &'a Path,
}

impl<'a> RecordReader<'a> {
    pub(crate) fn new(bytes: &'a [u8], file: &'a Path) -> Self {
        RecordReader { bytes, pos: 0, file }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub(crate) fn malformed(&self, reason: impl Into<String>) -> ModflowError {
        ModflowError::Malformed {
            file: self.file.to_path_buf(),
            reason: format!("{} (at byte {})", reason.into(), self.pos),
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).filter(|&end| end <= self.bytes.len());
        match end {
            Some(end) => {
                let slice = &self.bytes[self.pos..end];
                self.pos = end;
                Ok(slice)
            }
            None => Err(self.malformed(format!("unexpected end of file reading {} bytes", n))),
        }
    }

    fn pod<T: Pod>(&mut self) -> Result<T> {
        let bytes = self.take(std::mem::size_of::<T>())?;
        Ok(bytemuck::pod_read_unaligned(bytes))
    }

    pub(crate) fn int(&mut self) -> Result<i32> {
        self.pod::<i32>()
    }

    pub(crate) fn real(&mut self, precision: Precision) -> Result<f64> {
        match precision {
            Precision::Single => Ok(self.pod::<f32>()? as f64),
            Precision::Double => self.pod::<f64>(),
        }
    }

    pub(crate) fn reals(&mut self, n: usize, precision: Precision) -> Result<Vec<f64>> {
        let bytes = self.take(n.saturating_mul(precision.width()))?;
        Ok(match precision {
            Precision::Single => bytes
                .chunks_exact(4)
                .map(|c| bytemuck::pod_read_unaligned::<f32>(c) as f64)
                .collect(),
            Precision::Double => bytes
                .chunks_exact(8)
                .map(bytemuck::pod_read_unaligned::<f64>)
                .collect(),
        })
    }

    pub(crate) fn ints(&mut self, n: usize) -> Result<Vec<i32>> {
        let bytes = self.take(n.saturating_mul(4))?;
        Ok(bytes
            .chunks_exact(4)
            .map(bytemuck::pod_read_unaligned::<i32>)
            .collect())
    }

    /// A 16 character label, which must be printable ASCII.
    pub(crate) fn text(&mut self) -> Result<String> {
        let bytes = self.take(16)?;
        if !is_label(bytes) {
            return Err(self.malformed("record label is not text"));
        }
        Ok(String::from_utf8_lossy(bytes).trim().to_string())
    }

    /// A count read as an integer, which must not be negative.
    pub(crate) fn count(&mut self, what: &str) -> Result<usize> {
        let n = self.int()?;
        usize::try_from(n).map_err(|_| self.malformed(format!("negative {} {}", what, n)))
    }
}

pub(crate) fn is_label(bytes: &[u8]) -> bool {
    bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ')
}

/// Read a whole file with the given precision, or with each precision in turn when `None`.
pub(crate) fn parse_detecting<T>(
    precision: Option<Precision>,
    parse: impl Fn(Precision) -> Result<T>,
) -> Result<T> {
    match precision {
        Some(p) => parse(p),
        None => parse(Precision::Single).or_else(|single| parse(Precision::Double).map_err(|_| single)),
    }
}
