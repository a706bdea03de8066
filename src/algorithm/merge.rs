//! Deleting a seam and folding it into its right neighbour
//!
//! For each row the seam column is dropped and the column that slides into
//! its place receives the merged value. For the factorized matrices and the
//! mean structure the merged value is already known from the look-ahead
//! sums; the accumulation matrix has no look-ahead and is summed here.

use crate::algorithm::seam::Seam;
use crate::io::error::{Result, computation_error};
use crate::spatial::lookahead::LookAhead;
use crate::spatial::state::MergeState;
use ndarray::{Array, Array2, Axis, Dimension, RemoveAxis, Slice};

/// Where the merged value at the seam position comes from
enum MergedValue<'a, D> {
    /// Precomputed look-ahead table, one column narrower than the source
    LookAhead(&'a Array<f64, D>),
    /// Sum of the seam pixel and its right neighbour, computed on the spot
    RightNeighbour,
}

fn fold_seam<D>(current: &Array<f64, D>, merged: &MergedValue<'_, D>, seam: &Seam) -> Array<f64, D>
where
    D: Dimension + RemoveAxis,
{
    let mut shape = current.raw_dim();
    shape[1] -= 1;
    let mut narrowed = Array::<f64, D>::zeros(shape);

    for (row, ((mut target, source), &col)) in narrowed
        .outer_iter_mut()
        .zip(current.outer_iter())
        .zip(seam.columns())
        .enumerate()
    {
        let at_seam = Slice::from(col..col + 1);
        let replacement = match merged {
            MergedValue::LookAhead(table) => table
                .index_axis(Axis(0), row)
                .slice_axis(Axis(0), at_seam)
                .to_owned(),
            MergedValue::RightNeighbour => {
                let mut sum = source.slice_axis(Axis(0), at_seam).to_owned();
                sum += &source.slice_axis(Axis(0), Slice::from(col + 1..col + 2));
                sum
            }
        };

        target
            .slice_axis_mut(Axis(0), Slice::from(..col))
            .assign(&source.slice_axis(Axis(0), Slice::from(..col)));
        target
            .slice_axis_mut(Axis(0), at_seam)
            .assign(&replacement);
        target
            .slice_axis_mut(Axis(0), Slice::from(col + 1..))
            .assign(&source.slice_axis(Axis(0), Slice::from(col + 2..)));
    }

    narrowed
}

/// Remove `seam` from every tracked matrix, merging it rightward
///
/// `look` and `v` must be the look-ahead sums and look-ahead mean computed
/// from `state` in the same iteration.
///
/// # Errors
///
/// Returns a computation error if the seam does not span every row or points
/// at a column without a right neighbour; `state` is left untouched then
pub fn apply_seam(
    state: &mut MergeState,
    look: &LookAhead,
    v: &Array2<f64>,
    seam: &Seam,
) -> Result<()> {
    let (rows, cols) = (state.rows(), state.cols());
    if seam.len() != rows {
        return Err(computation_error(
            "seam merge",
            &format!("seam spans {} rows, image has {rows}", seam.len()),
        ));
    }
    if let Some(&col) = seam.columns().iter().find(|&&col| col + 1 >= cols) {
        return Err(computation_error(
            "seam merge",
            &format!("column {col} has no right neighbour in a {cols}-wide image"),
        ));
    }

    state.q11 = fold_seam(&state.q11, &MergedValue::LookAhead(&look.q11), seam);
    state.q12 = fold_seam(&state.q12, &MergedValue::LookAhead(&look.q12), seam);
    state.simg = fold_seam(&state.simg, &MergedValue::LookAhead(v), seam);
    state.p12 = fold_seam(&state.p12, &MergedValue::LookAhead(&look.p12), seam);
    state.p22 = fold_seam(&state.p22, &MergedValue::LookAhead(&look.p22), seam);
    state.z = fold_seam(&state.z, &MergedValue::RightNeighbour, seam);

    Ok(())
}
