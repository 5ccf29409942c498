//! Stress-period data.
//!
//! Boundary conditions such as wells or rivers are given sparsely: a map from period index to the
//! records that apply in that period, optionally together with a per-period item count (the
//! `ITMP` of the MODFLOW packages). Before anything is serialized the sparse description is
//! expanded into one record list per stress period.
//!
//! The control value of a period means
//!
//! - positive: the records given for that period apply,
//! - zero: no records apply,
//! - negative: the records of the previous period are reused.
//!
//! Without a control signal, a period missing from the map has no records. It is *not* a repeat
//! of the previous period.
//!
//! ```
//! use modflow_kit::StressPeriodData;
//!
//! let spd = StressPeriodData::new()
//!     .with_period(0, vec!["A"])
//!     .with_period(1, vec!["B"])
//!     .with_control(vec![2, 2, -1]);
//!
//! let resolved = spd.resolve(3).expect("valid stress periods");
//! assert_eq!(resolved, vec![vec!["A"], vec!["B"], vec!["B"]]);
//! ```
use std::collections::BTreeMap;

use crate::error::StressPeriodError;

/// What applies in one stress period, decoded from the raw map and control signal.
#[derive(Debug, Clone, PartialEq)]
pub enum PeriodData<R> {
    Explicit(Vec<R>),
    Empty,
    RepeatPrevious,
}

/// Sparse per-period records plus an optional control signal.
#[derive(Debug, Clone, PartialEq)]
pub struct StressPeriodData<R> {
    records: BTreeMap<usize, Vec<R>>,
    control: Option<Vec<i32>>,
}

impl<R> Default for StressPeriodData<R> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            control: None,
        }
    }
}

impl<R> From<BTreeMap<usize, Vec<R>>> for StressPeriodData<R> {
    fn from(records: BTreeMap<usize, Vec<R>>) -> Self {
        Self {
            records,
            control: None,
        }
    }
}

impl<R: Clone + PartialEq> StressPeriodData<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records for period 0 only, later periods are empty unless given.
    pub fn steady(records: Vec<R>) -> Self {
        Self::new().with_period(0, records)
    }

    pub fn with_period(mut self, period: usize, records: Vec<R>) -> Self {
        self.insert(period, records);
        self
    }

    pub fn with_control(mut self, control: Vec<i32>) -> Self {
        self.control = Some(control);
        self
    }

    pub fn insert(&mut self, period: usize, records: Vec<R>) {
        self.records.insert(period, records);
    }

    pub fn records(&self) -> &BTreeMap<usize, Vec<R>> {
        &self.records
    }

    pub fn control(&self) -> Option<&[i32]> {
        self.control.as_deref()
    }

    /// Decode every period of an `nper` period model into a [`PeriodData`].
    ///
    /// # Errors
    ///
    /// - a period index in the map is `>= nper`,
    /// - the control signal does not have `nper` entries,
    /// - the control signal is negative at period 0,
    /// - the control signal is positive for a period that has no records in the map.
    ///
    /// A positive control value only marks the period as taking new records. The records in the
    /// map are what the period gets, and their count is what a package writes as `ITMP`.
    pub fn decode(&self, nper: usize) -> Result<Vec<PeriodData<R>>, StressPeriodError> {
        if let Some((&period, _)) = self.records.range(nper..).next() {
            return Err(StressPeriodError::PeriodOutOfRange { period, nper });
        }
        if let Some(control) = &self.control {
            if control.len() != nper {
                return Err(StressPeriodError::ControlLength {
                    expected: nper,
                    found: control.len(),
                });
            }
        }

        (0..nper)
            .map(|period| match &self.control {
                Some(control) => match control[period] {
                    c if c < 0 && period == 0 => Err(StressPeriodError::RepeatAtFirstPeriod),
                    c if c < 0 => Ok(PeriodData::RepeatPrevious),
                    0 => Ok(PeriodData::Empty),
                    _ => self
                        .records
                        .get(&period)
                        .map(|r| PeriodData::Explicit(r.clone()))
                        .ok_or(StressPeriodError::MissingRecords { period }),
                },
                None => Ok(self
                    .records
                    .get(&period)
                    .map_or(PeriodData::Empty, |r| PeriodData::Explicit(r.clone()))),
            })
            .collect()
    }

    /// Expand into one record list per stress period.
    ///
    /// A repeated period gets its own copy of the previous list.
    pub fn resolve(&self, nper: usize) -> Result<Vec<Vec<R>>, StressPeriodError> {
        let mut resolved: Vec<Vec<R>> = Vec::with_capacity(nper);
        for data in self.decode(nper)? {
            let records = match data {
                PeriodData::Explicit(records) => records,
                PeriodData::Empty => Vec::new(),
                // decode never yields a repeat for period 0
                PeriodData::RepeatPrevious => resolved.last().cloned().unwrap_or_default(),
            };
            resolved.push(records);
        }
        Ok(resolved)
    }
}

/// Item counts to write for resolved periods: `-1` when a period is identical to the one before
/// it, otherwise the number of records.
pub fn itmp_codes<R: PartialEq>(resolved: &[Vec<R>]) -> Vec<i32> {
    resolved
        .iter()
        .enumerate()
        .map(|(i, records)| {
            if records.is_empty() {
                0
            } else if i > 0 && resolved[i - 1] == *records {
                -1
            } else {
                records.len() as i32
            }
        })
        .collect()
}

/// Fill array-valued inputs (recharge rates and the like) forward through the periods.
///
/// Period 0 must be given; a missing later period takes the value of the one before it.
pub fn carry_forward<T: Clone>(
    nper: usize,
    values: &BTreeMap<usize, T>,
) -> Result<Vec<T>, StressPeriodError> {
    if let Some((&period, _)) = values.range(nper..).next() {
        return Err(StressPeriodError::PeriodOutOfRange { period, nper });
    }
    let mut current = values
        .get(&0)
        .ok_or(StressPeriodError::MissingFirstPeriod)?
        .clone();
    let mut filled = Vec::with_capacity(nper);
    for period in 0..nper {
        if let Some(v) = values.get(&period) {
            current = v.clone();
        }
        filled.push(current.clone());
    }
    Ok(filled)
}
