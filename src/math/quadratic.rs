//! Scalar kernels of the factorized structure representation

use num_traits::Float;

/// Quadratic structure cost `a·d² + 2·b·d + c`
///
/// `a`, `b` and `c` are the look-ahead factorized triple (merged weight,
/// merged signed difference, merged squared difference) of one direction and
/// `d` is the structural difference to the neighbour under consideration.
// Evaluation order is fixed: seam selection compares these values for exact
// ties, so the expression must not be fused or reassociated.
#[allow(clippy::suboptimal_flops)]
#[inline]
pub fn quadratic_cost<T: Float>(d: T, a: T, b: T, c: T) -> T {
    let two = T::one() + T::one();
    a * (d * d) + two * b * d + c
}

/// Recover a mean from its factorized numerator/denominator pair
///
/// The numerator is stored negated, so the mean is `-numerator / weight`.
#[inline]
pub fn negated_ratio<T: Float>(numerator: T, weight: T) -> T {
    -numerator / weight
}
