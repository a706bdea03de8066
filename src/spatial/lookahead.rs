//! Look-ahead shifted sums and shifted differences
//!
//! A look-ahead value is what a factorized quantity would become if a pixel
//! were merged with its right neighbour. For every column `j < width - 1`
//! it is the plain pairwise sum `x[:, j] + x[:, j + 1]`; the result is one
//! column narrower than its input. Summation order is exactly that pairwise
//! order, so seam ties resolve the same way on every run.

use crate::math::quadratic::negated_ratio;
use crate::spatial::state::MergeState;
use ndarray::{
    Array, Array2, Array3, ArrayBase, ArrayView2, ArrayViewMut2, Axis, Data, Dimension, Slice, Zip,
};

/// Look-ahead counterparts of the factorized state, one column narrower
#[derive(Debug, Clone)]
pub struct LookAhead {
    /// Merged accumulation weight
    pub q11: Array2<f64>,
    /// Merged negated structure value
    pub q12: Array2<f64>,
    /// Merged directional differences
    pub p12: Array3<f64>,
    /// Merged squared directional differences
    pub p22: Array3<f64>,
}

impl LookAhead {
    /// Look-ahead mean structure value `v = -upQ12 / upQ11`
    pub fn mean(&self) -> Array2<f64> {
        Zip::from(&self.q12)
            .and(&self.q11)
            .map_collect(|&numerator, &weight| negated_ratio(numerator, weight))
    }
}

/// Pairwise sum of each column with its right neighbour along axis 1
///
/// Works for any array with at least two axes; an array with no columns is
/// returned unchanged.
pub fn shifted_sum<S, D>(array: &ArrayBase<S, D>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let width = array.len_of(Axis(1));
    if width == 0 {
        return array.to_owned();
    }
    let mut sum = array.slice_axis(Axis(1), Slice::from(0..width - 1)).to_owned();
    sum += &array.slice_axis(Axis(1), Slice::from(1..width));
    sum
}

/// Shifted sums of all four factorized matrices
pub fn look_ahead(state: &MergeState) -> LookAhead {
    LookAhead {
        q11: shifted_sum(&state.q11),
        q12: shifted_sum(&state.q12),
        p12: shifted_sum(&state.p12),
        p22: shifted_sum(&state.p22),
    }
}

/// Write `lhs - rhs` into `target`, all three views having the same shape
pub fn difference_into(
    mut target: ArrayViewMut2<'_, f64>,
    lhs: ArrayView2<'_, f64>,
    rhs: ArrayView2<'_, f64>,
) {
    Zip::from(&mut target)
        .and(&lhs)
        .and(&rhs)
        .for_each(|out, &a, &b| *out = a - b);
}
