//! One-time scaling of the structure, importance and iteration weights
//!
//! The three energy terms live on unrelated scales. Before the first seam is
//! chosen each user weight is divided by the largest value its term can reach
//! along a seam, so that `alpha`, `gamma` and `beta` trade off comparable
//! quantities. The resulting weights stay frozen for the whole reduction.

use crate::algorithm::energy::DirectionalEnergy;
use crate::algorithm::executor::ReductionConfig;
use crate::algorithm::path::minimum_cost;
use crate::io::error::{ReductionError, Result};
use ndarray::{Array2, Axis};

/// Weights after normalization, applied to every iteration's energy
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedWeights {
    /// Structure weight `alpha / strMax`
    pub alpha: f64,
    /// Importance weight `gamma / impMax`
    pub gamma: f64,
    /// Iteration-count weight `beta / iteMax`
    pub beta: f64,
}

/// Largest importance accumulated along any seam
///
/// Same recurrence as the seam search but keeping the maximum predecessor,
/// with positions outside the grid contributing nothing.
pub fn maximum_importance(importance: &Array2<f64>) -> f64 {
    let mut accumulated = importance.clone();
    for row in 1..accumulated.nrows() {
        let (above, mut below) = accumulated.view_mut().split_at(Axis(0), row);
        let previous = above.row(row - 1);
        let at = |k: Option<usize>| k.and_then(|k| previous.get(k)).copied().unwrap_or(0.0);
        for (col, total) in below.row_mut(0).iter_mut().enumerate() {
            *total += at(col.checked_sub(1)).max(at(Some(col))).max(at(Some(col + 1)));
        }
    }
    last_row_max(&accumulated)
}

fn last_row_max(cost: &Array2<f64>) -> f64 {
    cost.nrows().checked_sub(1).map_or(0.0, |last| {
        cost.row(last)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    })
}

// A zero maximum is only tolerable when its term carries no weight anyway
fn scale(weight: f64, maximum: f64) -> Option<f64> {
    if !maximum.is_finite() {
        None
    } else if maximum == 0.0 {
        (weight == 0.0).then_some(0.0)
    } else {
        Some(weight / maximum)
    }
}

/// Compute the frozen weights from the first iteration's fields
///
/// `importance` and `energy` are the look-ahead importance sums and the
/// unweighted cost fields of iteration zero.
///
/// # Errors
///
/// Returns `DegenerateNormalization` if the importance or structure maximum
/// is zero (while its weight is not) or not finite
pub fn normalize_weights(
    importance: &Array2<f64>,
    energy: &DirectionalEnergy,
    config: &ReductionConfig,
) -> Result<NormalizedWeights> {
    let imp_max = maximum_importance(importance);
    let str_max = last_row_max(&minimum_cost(energy.horizontal(), energy));
    let ite_max = importance.nrows() as f64;

    let degenerate = || ReductionError::DegenerateNormalization { imp_max, str_max };
    let alpha = scale(config.alpha, str_max).ok_or_else(degenerate)?;
    let gamma = scale(config.gamma(), imp_max).ok_or_else(degenerate)?;

    Ok(NormalizedWeights {
        alpha,
        gamma,
        beta: config.beta / ite_max,
    })
}
