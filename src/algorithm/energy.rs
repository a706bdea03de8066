//! Four-directional structure cost fields
//!
//! For a candidate merge of pixel `(i, j)` with its right neighbour, the
//! merged pixel's mean structure `v[i, j]` is compared against the structure
//! of the pixels it would touch afterwards. Each comparison is priced with the
//! quadratic form `a·d² + 2·b·d + c` using the look-ahead triple of the
//! matching direction. North and south fields are then paired across adjacent
//! rows into the three seam connections (up, upper-left, upper-right), while
//! east and west stay per-pixel.
//!
//! Positions without a valid neighbour use a zero difference, so their cost
//! collapses to `c`. The combined connection fields hold exact zeros where a
//! connection cannot exist; infinity is only introduced by the path solver.

use crate::algorithm::normalization::NormalizedWeights;
use crate::io::configuration::{DOWN, LEFT, RIGHT, UP};
use crate::math::quadratic::quadratic_cost;
use crate::spatial::lookahead::{LookAhead, difference_into};
use ndarray::{Array2, ArrayView2, ArrayViewMut2, Axis, Zip, s};

/// Cost fields of one iteration, each `rows × (cols - 1)`
#[derive(Debug, Clone)]
pub struct DirectionalEnergy {
    /// Connecting straight up (CU)
    pub up: Array2<f64>,
    /// Connecting to the upper-left seam pixel (CL)
    pub left: Array2<f64>,
    /// Connecting to the upper-right seam pixel (CR)
    pub right: Array2<f64>,
    /// Loss against the western neighbour two columns away (CW)
    pub west: Array2<f64>,
    /// Loss against the eastern neighbour two columns away (CE)
    pub east: Array2<f64>,
}

impl DirectionalEnergy {
    /// Per-pixel horizontal structure loss `CW + CE`
    pub fn horizontal(&self) -> Array2<f64> {
        &self.west + &self.east
    }

    /// Per-pixel seam energy `E(r) = (CW + CE)·alpha + imp·gamma + ite·beta`
    ///
    /// `importance` and `count` are the look-ahead sums of the importance and
    /// count channels of the accumulation matrix.
    // Fixed evaluation order keeps seam ties reproducible
    #[allow(clippy::suboptimal_flops)]
    pub fn pixel_energy(
        &self,
        importance: &Array2<f64>,
        count: &Array2<f64>,
        weights: &NormalizedWeights,
    ) -> Array2<f64> {
        Zip::from(&self.west)
            .and(&self.east)
            .and(importance)
            .and(count)
            .map_collect(|&west, &east, &imp, &ite| {
                (west + east) * weights.alpha + imp * weights.gamma + weights.beta * ite
            })
    }

    /// Scale the three connection fields by the normalized structure weight
    pub fn weight_connections(&mut self, alpha: f64) {
        self.up.mapv_inplace(|value| value * alpha);
        self.right.mapv_inplace(|value| value * alpha);
        self.left.mapv_inplace(|value| value * alpha);
    }
}

/// Quadratic coefficients of a single direction
struct Coefficients<'a> {
    weight: ArrayView2<'a, f64>,
    linear: ArrayView2<'a, f64>,
    constant: ArrayView2<'a, f64>,
}

impl<'a> Coefficients<'a> {
    fn of(look: &'a LookAhead, direction: usize) -> Self {
        Self {
            weight: look.q11.view(),
            linear: look.p12.index_axis(Axis(2), direction),
            constant: look.p22.index_axis(Axis(2), direction),
        }
    }

    fn cost(&self, difference: &Array2<f64>) -> Array2<f64> {
        Zip::from(difference)
            .and(&self.weight)
            .and(&self.linear)
            .and(&self.constant)
            .map_collect(|&d, &a, &b, &c| quadratic_cost(d, a, b, c))
    }
}

fn sum_into(
    mut target: ArrayViewMut2<'_, f64>,
    lhs: ArrayView2<'_, f64>,
    rhs: ArrayView2<'_, f64>,
) {
    Zip::from(&mut target)
        .and(&lhs)
        .and(&rhs)
        .for_each(|out, &a, &b| *out = a + b);
}

// Costs against the row above: same column, upper-left, upper-right
fn north(
    simg: &Array2<f64>,
    v: &Array2<f64>,
    coefficients: &Coefficients<'_>,
) -> (Array2<f64>, Array2<f64>, Array2<f64>) {
    let mut straight = Array2::<f64>::zeros(v.raw_dim());
    difference_into(
        straight.slice_mut(s![1.., ..]),
        v.slice(s![1.., ..]),
        v.slice(s![..-1, ..]),
    );

    let mut upper_left = Array2::<f64>::zeros(v.raw_dim());
    difference_into(
        upper_left.slice_mut(s![1.., 1..]),
        v.slice(s![1.., 1..]),
        simg.slice(s![..-1, 2..]),
    );

    let mut upper_right = Array2::<f64>::zeros(v.raw_dim());
    difference_into(
        upper_right.slice_mut(s![1.., ..-1]),
        v.slice(s![1.., ..-1]),
        simg.slice(s![..-1, ..-2]),
    );

    (
        coefficients.cost(&straight),
        coefficients.cost(&upper_left),
        coefficients.cost(&upper_right),
    )
}

// Costs against the row below, mirroring `north`
fn south(
    simg: &Array2<f64>,
    v: &Array2<f64>,
    coefficients: &Coefficients<'_>,
) -> (Array2<f64>, Array2<f64>, Array2<f64>) {
    let mut straight = Array2::<f64>::zeros(v.raw_dim());
    difference_into(
        straight.slice_mut(s![..-1, ..]),
        v.slice(s![..-1, ..]),
        v.slice(s![1.., ..]),
    );

    let mut lower_left = Array2::<f64>::zeros(v.raw_dim());
    difference_into(
        lower_left.slice_mut(s![..-1, ..-1]),
        v.slice(s![..-1, ..-1]),
        simg.slice(s![1.., ..-2]),
    );

    let mut lower_right = Array2::<f64>::zeros(v.raw_dim());
    difference_into(
        lower_right.slice_mut(s![..-1, 1..]),
        v.slice(s![..-1, 1..]),
        simg.slice(s![1.., 2..]),
    );

    (
        coefficients.cost(&straight),
        coefficients.cost(&lower_left),
        coefficients.cost(&lower_right),
    )
}

fn east(simg: &Array2<f64>, v: &Array2<f64>, coefficients: &Coefficients<'_>) -> Array2<f64> {
    let mut difference = Array2::<f64>::zeros(v.raw_dim());
    difference_into(
        difference.slice_mut(s![.., ..-1]),
        v.slice(s![.., ..-1]),
        simg.slice(s![.., 2..]),
    );
    coefficients.cost(&difference)
}

fn west(simg: &Array2<f64>, v: &Array2<f64>, coefficients: &Coefficients<'_>) -> Array2<f64> {
    let mut difference = Array2::<f64>::zeros(v.raw_dim());
    difference_into(
        difference.slice_mut(s![.., 1..]),
        v.slice(s![.., 1..]),
        simg.slice(s![.., ..-2]),
    );
    coefficients.cost(&difference)
}

/// Compute all five cost fields for the current iteration
///
/// `simg` is the current mean structure (`cols` wide) and `v` the look-ahead
/// mean (`cols - 1` wide) derived from `look`.
pub fn directional_energy(
    simg: &Array2<f64>,
    v: &Array2<f64>,
    look: &LookAhead,
) -> DirectionalEnergy {
    let (north_straight, north_left, north_right) = north(simg, v, &Coefficients::of(look, UP));
    let (south_straight, south_left, south_right) = south(simg, v, &Coefficients::of(look, DOWN));
    let east_cost = east(simg, v, &Coefficients::of(look, RIGHT));
    let west_cost = west(simg, v, &Coefficients::of(look, LEFT));

    // North and south costs belong to different rows of the same connection
    let mut up = Array2::<f64>::zeros(v.raw_dim());
    sum_into(
        up.slice_mut(s![1.., ..]),
        south_straight.slice(s![..-1, ..]),
        north_straight.slice(s![1.., ..]),
    );

    let mut left = Array2::<f64>::zeros(v.raw_dim());
    sum_into(
        left.slice_mut(s![1.., 1..]),
        south_left.slice(s![..-1, ..-1]),
        north_left.slice(s![1.., 1..]),
    );

    let mut right = Array2::<f64>::zeros(v.raw_dim());
    sum_into(
        right.slice_mut(s![1.., ..-1]),
        south_right.slice(s![..-1, 1..]),
        north_right.slice(s![1.., ..-1]),
    );

    DirectionalEnergy {
        up,
        left,
        right,
        west: west_cost,
        east: east_cost,
    }
}
