//! Row-sequential dynamic programming over seam costs
//!
//! Row `i` of the cumulative cost depends only on row `i - 1`:
//!
//! ```text
//! M[i, j] = E[i, j] + min( M[i-1, j-1] + CL[i, j],
//!                          M[i-1, j]   + CU[i, j],
//!                          M[i-1, j+1] + CR[i, j] )
//! ```
//!
//! Predecessors outside the grid cost infinity. Ties resolve to the first
//! candidate in left, up, right order.

use crate::algorithm::energy::DirectionalEnergy;
use ndarray::{Array2, ArrayView1, Axis};

/// Direction from a seam pixel to its predecessor in the row above
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Step {
    /// Predecessor is one column to the left
    Left,
    /// Predecessor is in the same column
    #[default]
    Up,
    /// Predecessor is one column to the right
    Right,
}

impl Step {
    /// Column offset of the predecessor
    pub const fn offset(self) -> isize {
        match self {
            Self::Left => -1,
            Self::Up => 0,
            Self::Right => 1,
        }
    }
}

/// Cumulative cost together with the back-pointer map that produced it
#[derive(Debug, Clone)]
pub struct PathSolution {
    /// Minimum cumulative cost of any seam ending at each pixel
    pub cost: Array2<f64>,
    /// Winning predecessor direction per pixel (row 0 is unused)
    pub path: Array2<Step>,
}

// First minimum wins; a NaN candidate wins outright, as an argmin would pick it
fn cheapest(candidates: [(Step, f64); 3]) -> (Step, f64) {
    let mut best = (Step::Left, f64::INFINITY);
    for (index, candidate) in candidates.into_iter().enumerate() {
        if index == 0 || (!best.1.is_nan() && (candidate.1.is_nan() || candidate.1 < best.1)) {
            best = candidate;
        }
    }
    best
}

fn predecessor(
    previous: &ArrayView1<'_, f64>,
    connection: &ArrayView1<'_, f64>,
    source: Option<usize>,
    col: usize,
) -> f64 {
    source
        .and_then(|k| previous.get(k))
        .zip(connection.get(col))
        .map_or(f64::INFINITY, |(&total, &cost)| total + cost)
}

fn relax_rows(
    cost: &mut Array2<f64>,
    energy: &DirectionalEnergy,
    mut path: Option<&mut Array2<Step>>,
) {
    for row in 1..cost.nrows() {
        let (above, mut below) = cost.view_mut().split_at(Axis(0), row);
        let previous = above.row(row - 1);
        let left = energy.left.row(row);
        let up = energy.up.row(row);
        let right = energy.right.row(row);

        for (col, total) in below.row_mut(0).iter_mut().enumerate() {
            let (step, best) = cheapest([
                (Step::Left, predecessor(&previous, &left, col.checked_sub(1), col)),
                (Step::Up, predecessor(&previous, &up, Some(col), col)),
                (Step::Right, predecessor(&previous, &right, Some(col + 1), col)),
            ]);
            *total += best;

            if let Some(cell) = path.as_deref_mut().and_then(|map| map.get_mut([row, col])) {
                *cell = step;
            }
        }
    }
}

/// Cost-only pass: accumulate `base` downward without recording a path
pub fn minimum_cost(mut base: Array2<f64>, energy: &DirectionalEnergy) -> Array2<f64> {
    relax_rows(&mut base, energy, None);
    base
}

/// Cost-and-path pass used to select the seam of an iteration
///
/// `base` is the per-pixel energy `E(r)`; the connection fields of `energy`
/// must already carry their structure weight.
pub fn solve(mut base: Array2<f64>, energy: &DirectionalEnergy) -> PathSolution {
    let mut path = Array2::from_elem(base.raw_dim(), Step::Up);
    relax_rows(&mut base, energy, Some(&mut path));
    PathSolution { cost: base, path }
}
