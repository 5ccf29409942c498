//! Stress periods and model units.
use serde::{Deserialize, Serialize};

/// A simulated time interval with its own boundary-condition values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressPeriod {
    /// Length of the period in model time units.
    pub perlen: f64,
    /// Number of time steps.
    pub nstp: usize,
    /// Multiplier for the length of successive time steps.
    pub tsmult: f64,
    pub steady: bool,
}

impl StressPeriod {
    pub fn steady(perlen: f64) -> Self {
        StressPeriod {
            perlen,
            nstp: 1,
            tsmult: 1.0,
            steady: true,
        }
    }

    pub fn transient(perlen: f64, nstp: usize) -> Self {
        StressPeriod {
            perlen,
            nstp,
            tsmult: 1.0,
            steady: false,
        }
    }
}

impl Default for StressPeriod {
    fn default() -> Self {
        StressPeriod::steady(1.0)
    }
}

/// Build periods from parallel `perlen`, `nstp` and `steady` lists.
pub fn periods(perlen: &[f64], nstp: &[usize], steady: &[bool]) -> Option<Vec<StressPeriod>> {
    if perlen.len() != nstp.len() || perlen.len() != steady.len() {
        return None;
    }
    Some(
        perlen
            .iter()
            .zip(nstp)
            .zip(steady)
            .map(|((&perlen, &nstp), &steady)| StressPeriod {
                perlen,
                nstp,
                tsmult: 1.0,
                steady,
            })
            .collect(),
    )
}

/// Total simulated time at the end of every period.
pub fn period_end_times(periods: &[StressPeriod]) -> Vec<f64> {
    periods
        .iter()
        .scan(0.0, |t, p| {
            *t += p.perlen;
            Some(*t)
        })
        .collect()
}

/// `ITMUNI`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Undefined,
    Seconds,
    Minutes,
    Hours,
    #[default]
    Days,
    Years,
}

impl TimeUnit {
    pub fn code(self) -> i32 {
        match self {
            TimeUnit::Undefined => 0,
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => 2,
            TimeUnit::Hours => 3,
            TimeUnit::Days => 4,
            TimeUnit::Years => 5,
        }
    }
}

/// `LENUNI`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Undefined,
    Feet,
    #[default]
    Meters,
    Centimeters,
}

impl LengthUnit {
    pub fn code(self) -> i32 {
        match self {
            LengthUnit::Undefined => 0,
            LengthUnit::Feet => 1,
            LengthUnit::Meters => 2,
            LengthUnit::Centimeters => 3,
        }
    }
}
