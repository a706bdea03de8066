//! Backtracking the path map into a concrete seam

use crate::algorithm::path::PathSolution;
use crate::algorithm::tiebreak::{TieBreak, pick_index};
use crate::io::error::{Result, computation_error};

/// One column index per row, adjacent rows differing by at most one
///
/// Columns index the look-ahead grid: the seam pixel of each row is the one
/// that gets merged into its right neighbour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seam {
    columns: Vec<usize>,
}

impl Seam {
    /// Wrap an explicit list of columns, top row first
    pub const fn new(columns: Vec<usize>) -> Self {
        Self { columns }
    }

    /// Seam columns, top row first
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Column of the seam in `row`
    pub fn column(&self, row: usize) -> Option<usize> {
        self.columns.get(row).copied()
    }

    /// Number of rows the seam spans
    pub const fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the seam spans no rows
    pub const fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Whether every pair of adjacent rows is at most one column apart
    pub fn is_continuous(&self) -> bool {
        self.columns
            .windows(2)
            .all(|pair| matches!(pair, [a, b] if a.abs_diff(*b) <= 1))
    }

    /// Whether the seam passes through `column` in any row
    pub fn contains_column(&self, column: usize) -> bool {
        self.columns.contains(&column)
    }
}

/// Trace the cheapest seam bottom-up through the back-pointer map
///
/// Every column of the last row holding the minimum cumulative cost is a
/// candidate; `tie_break` is consulted only when there is more than one.
///
/// # Errors
///
/// Returns a computation error if the last row has no finite minimum or a
/// back-pointer leads outside the grid
// Candidates are exact ties of the minimum, not approximate ones
#[allow(clippy::float_cmp)]
pub fn trace_seam(solution: &PathSolution, tie_break: &mut impl TieBreak) -> Result<Seam> {
    let (rows, cols) = solution.cost.dim();
    if rows == 0 || cols == 0 {
        return Err(computation_error("seam tracing", &"cost map is empty"));
    }

    let last = solution.cost.row(rows - 1);
    let minimum = last.iter().copied().fold(f64::INFINITY, f64::min);
    if !minimum.is_finite() {
        return Err(computation_error(
            "seam tracing",
            &"last row of the cost map has no finite minimum",
        ));
    }
    let candidates: Vec<usize> = last
        .iter()
        .enumerate()
        .filter(|&(_, &cost)| cost == minimum)
        .map(|(col, _)| col)
        .collect();

    let chosen = match candidates.as_slice() {
        [only] => *only,
        _ => candidates
            .get(pick_index(tie_break.next_unit(), candidates.len()))
            .copied()
            .unwrap_or_default(),
    };

    let mut columns = Vec::with_capacity(rows);
    let mut col = chosen;
    columns.push(col);
    for row in (1..rows).rev() {
        let step = solution
            .path
            .get([row, col])
            .copied()
            .ok_or_else(|| computation_error("seam tracing", &format!("no path at ({row}, {col})")))?;
        col = col
            .checked_add_signed(step.offset())
            .filter(|&next| next < cols)
            .ok_or_else(|| {
                computation_error("seam tracing", &format!("path leaves the grid at row {row}"))
            })?;
        columns.push(col);
    }
    columns.reverse();

    Ok(Seam::new(columns))
}
