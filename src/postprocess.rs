//! Arrays derived from simulated heads and flows.
use ndarray::{Array2, Array3, Axis, Zip};
use num::Float;

use crate::error::{ModflowError, Result};

fn is_nodata<T: Float>(h: T, nodata: &[T]) -> bool {
    h.is_nan() || nodata.iter().any(|&nd| h == nd)
}

/// The head of the uppermost layer of every column that is not one of the `nodata` values.
///
/// Dry and inactive cells are written with the `HDRY` and `HNOFLO` values of the model, pass both
/// as `nodata`. A column with no valid head is NaN.
///
/// ```
/// use ndarray::array;
/// use modflow_kit::postprocess::water_table;
///
/// let heads = array![[[-999.0, 5.0]], [[4.0, 3.0]]];
/// let wt = water_table(&heads, &[-999.0]);
/// assert_eq!(wt, array![[4.0, 5.0]]);
/// ```
pub fn water_table<T>(heads: &Array3<T>, nodata: &[T]) -> Array2<T>
where
    T: Float + Send + Sync,
{
    let (_, nrow, ncol) = heads.dim();
    let mut wt = Array2::from_elem((nrow, ncol), T::nan());
    Zip::from(&mut wt)
        .and(heads.lanes(Axis(0)))
        .par_for_each(|w, column| {
            if let Some(&h) = column.iter().find(|&&h| !is_nodata(h, nodata)) {
                *w = h;
            }
        });
    wt
}

/// `before - after`, so a lowered head gives a positive drawdown.
pub fn drawdown(before: &Array3<f64>, after: &Array3<f64>) -> Result<Array3<f64>> {
    if before.shape() != after.shape() {
        return Err(ModflowError::ShapeMismatch {
            name: "heads".into(),
            expected: before.shape().to_vec(),
            found: after.shape().to_vec(),
        });
    }
    Ok(before - after)
}

/// Fraction of a pumping `rate` taken from a boundary whose flow into the aquifer drops from
/// `base` to `pumped`.
pub fn capture_fraction(base: f64, pumped: f64, rate: f64) -> Result<f64> {
    if rate == 0.0 || !rate.is_finite() {
        return Err(ModflowError::Config(format!(
            "capture fraction needs a non-zero pumping rate, got {}",
            rate
        )));
    }
    Ok((base - pumped) / rate)
}
