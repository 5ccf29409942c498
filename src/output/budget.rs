use std::fs;
use std::path::{Path, PathBuf};

use ndarray::Array3;

use crate::error::{ModflowError, Result};
use crate::grid::node_to_cell;
use crate::output::{Precision, RecordReader, parse_detecting, same_time};

/// Flow of one cell in a list budget record.
#[derive(Debug, Clone, PartialEq)]
pub struct CellFlow {
    /// One-based node number, layer by layer, row by row.
    pub node: usize,
    pub q: f64,
    pub aux: Vec<f64>,
}

impl CellFlow {
    /// Zero-based `(layer, row, column)` of the node.
    pub fn cell(&self, nrow: usize, ncol: usize) -> Option<(usize, usize, usize)> {
        node_to_cell(self.node, nrow, ncol)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BudgetData {
    /// A value for every cell.
    Full(Array3<f64>),
    /// Values for listed cells only, as the boundary packages write them.
    List(Vec<CellFlow>),
}

impl BudgetData {
    pub fn as_list(&self) -> Option<&[CellFlow]> {
        match self {
            BudgetData::List(flows) => Some(flows),
            BudgetData::Full(_) => None,
        }
    }

    pub fn as_full(&self) -> Option<&Array3<f64>> {
        match self {
            BudgetData::Full(values) => Some(values),
            BudgetData::List(_) => None,
        }
    }
}

/// One flow term of the budget at one time step.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetRecord {
    pub kstp: usize,
    pub kper: usize,
    pub text: String,
    pub ncol: usize,
    pub nrow: usize,
    pub nlay: usize,
    pub imeth: i32,
    /// Times are only present in compact records.
    pub delt: Option<f64>,
    pub pertim: Option<f64>,
    pub totim: Option<f64>,
    pub aux_names: Vec<String>,
    pub data: BudgetData,
}

/// A binary cell-by-cell budget file, full or compact.
#[derive(Debug, Clone)]
pub struct CellBudgetFile {
    path: PathBuf,
    precision: Precision,
    records: Vec<BudgetRecord>,
}

impl CellBudgetFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        CellBudgetFile::from_bytes(&bytes, path, None)
    }

    /// Parse a budget file. Without a precision both are tried and the one that reads the whole
    /// file wins.
    pub fn from_bytes(bytes: &[u8], path: impl AsRef<Path>, precision: Option<Precision>) -> Result<Self> {
        let path = path.as_ref();
        let (precision, records) =
            parse_detecting(precision, |p| parse(bytes, path, p).map(|records| (p, records)))?;
        Ok(CellBudgetFile {
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

    pub fn records(&self) -> &[BudgetRecord] {
        &self.records
    }

    /// Distinct flow term labels in file order.
    pub fn record_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for r in &self.records {
            if !names.contains(&r.text) {
                names.push(r.text.clone());
            }
        }
        names
    }

    /// Distinct times of the compact records.
    pub fn times(&self) -> Vec<f64> {
        let mut times: Vec<f64> = Vec::new();
        for t in self.records.iter().filter_map(|r| r.totim) {
            if !times.iter().any(|&u| same_time(u, t)) {
                times.push(t);
            }
        }
        times
    }

    pub fn kstpkper(&self) -> Vec<(usize, usize)> {
        let mut keys: Vec<(usize, usize)> = Vec::new();
        for r in &self.records {
            if !keys.contains(&(r.kstp, r.kper)) {
                keys.push((r.kstp, r.kper));
            }
        }
        keys
    }

    fn select<'a>(
        &'a self,
        text: &str,
        at: String,
        when: impl Fn(&BudgetRecord) -> bool,
    ) -> Result<Vec<&'a BudgetRecord>> {
        let wanted = text.trim().to_ascii_uppercase();
        let found: Vec<&BudgetRecord> = self
            .records
            .iter()
            .filter(|r| r.text.to_ascii_uppercase().contains(&wanted) && when(r))
            .collect();
        if found.is_empty() {
            return Err(ModflowError::RecordNotFound {
                file: self.path.clone(),
                text: text.to_string(),
                at,
            });
        }
        Ok(found)
    }

    /// Records labelled `text` (ignoring case) at simulated time `totim`.
    pub fn data(&self, text: &str, totim: f64) -> Result<Vec<&BudgetRecord>> {
        self.select(text, format!("time {}", totim), |r| {
            r.totim.is_some_and(|t| same_time(t, totim))
        })
    }

    /// Records labelled `text` at zero-based time step `kstp` of stress period `kper`.
    pub fn data_for(&self, text: &str, kstp: usize, kper: usize) -> Result<Vec<&BudgetRecord>> {
        self.select(
            text,
            format!("step {} of period {}", kstp + 1, kper + 1),
            |r| r.kstp == kstp && r.kper == kper,
        )
    }

    /// Flows of every listed cell of the `text` records at `totim`, in file order.
    pub fn list_flows(&self, text: &str, totim: f64) -> Result<Vec<f64>> {
        let mut flows = Vec::new();
        for r in self.data(text, totim)? {
            let list = r.data.as_list().ok_or_else(|| {
                ModflowError::Unsupported(format!(
                    "`{}` in {} is a full grid record, not a list",
                    r.text,
                    self.path.display()
                ))
            })?;
            flows.extend(list.iter().map(|f| f.q));
        }
        Ok(flows)
    }
}

fn read_list(
    reader: &mut RecordReader<'_>,
    precision: Precision,
    naux: usize,
) -> Result<Vec<CellFlow>> {
    let nlist = reader.count("list length")?;
    let mut flows = Vec::with_capacity(nlist.min(1 << 20));
    for _ in 0..nlist {
        let node = reader.int()?;
        if node < 1 {
            return Err(reader.malformed(format!("node number {}", node)));
        }
        let q = reader.real(precision)?;
        let aux = reader.reals(naux, precision)?;
        flows.push(CellFlow {
            node: node as usize,
            q,
            aux,
        });
    }
    Ok(flows)
}

fn parse(bytes: &[u8], path: &Path, precision: Precision) -> Result<Vec<BudgetRecord>> {
    let mut reader = RecordReader::new(bytes, path);
    let mut records = Vec::new();
    while !reader.is_empty() {
        let kstp = reader.int()?;
        let kper = reader.int()?;
        let text = reader.text()?;
        let ncol = reader.count("column count")?;
        let nrow = reader.count("row count")?;
        let nlay_raw = reader.int()?;
        if kstp < 1 || kper < 1 || nlay_raw == 0 {
            return Err(reader.malformed(format!(
                "header with step {}, period {}, {} layers",
                kstp, kper, nlay_raw
            )));
        }
        let nlay = nlay_raw.unsigned_abs() as usize;
        let ncells = nrow
            .checked_mul(ncol)
            .ok_or_else(|| reader.malformed("grid size overflows"))?;

        // a negative layer count marks the compact header
        let (imeth, delt, pertim, totim) = if nlay_raw < 0 {
            let imeth = reader.int()?;
            let delt = reader.real(precision)?;
            let pertim = reader.real(precision)?;
            let totim = reader.real(precision)?;
            (imeth, Some(delt), Some(pertim), Some(totim))
        } else {
            (0, None, None, None)
        };

        let mut aux_names = Vec::new();
        let data = match imeth {
            0 | 1 => {
                let n = ncells
                    .checked_mul(nlay)
                    .ok_or_else(|| reader.malformed("grid size overflows"))?;
                let values = reader.reals(n, precision)?;
                BudgetData::Full(
                    Array3::from_shape_vec((nlay, nrow, ncol), values)
                        .map_err(|e| reader.malformed(e.to_string()))?,
                )
            }
            2 => BudgetData::List(read_list(&mut reader, precision, 0)?),
            3 => {
                let layers = reader.ints(ncells)?;
                let values = reader.reals(ncells, precision)?;
                let mut full = Array3::zeros((nlay, nrow, ncol));
                for (n, (&ilay, &v)) in layers.iter().zip(&values).enumerate() {
                    if ilay < 1 || ilay as usize > nlay {
                        return Err(reader.malformed(format!("layer indicator {}", ilay)));
                    }
                    full[[ilay as usize - 1, n / ncol, n % ncol]] = v;
                }
                BudgetData::Full(full)
            }
            4 => {
                let values = reader.reals(ncells, precision)?;
                let mut full = Array3::zeros((nlay, nrow, ncol));
                for (n, &v) in values.iter().enumerate() {
                    full[[0, n / ncol, n % ncol]] = v;
                }
                BudgetData::Full(full)
            }
            5 => {
                let nauxp1 = reader.count("auxiliary count")?;
                if nauxp1 == 0 {
                    return Err(reader.malformed("auxiliary count of zero"));
                }
                for _ in 1..nauxp1 {
                    aux_names.push(reader.text()?);
                }
                BudgetData::List(read_list(&mut reader, precision, nauxp1 - 1)?)
            }
            other => return Err(reader.malformed(format!("unknown budget method {}", other))),
        };

        records.push(BudgetRecord {
            kstp: kstp as usize - 1,
            kper: kper as usize - 1,
            text,
            ncol,
            nrow,
            nlay,
            imeth,
            delt,
            pertim,
            totim,
            aux_names,
            data,
        });
    }
    Ok(records)
}
