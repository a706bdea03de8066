//! Tests for the quadratic cost kernel and factorized mean recovery

#[cfg(test)]
mod tests {
    use seammerge::math::quadratic::{negated_ratio, quadratic_cost};

    // Tests the full expression a·d² + 2·b·d + c
    // Verified by dropping the factor of two on the linear term
    #[test]
    fn test_quadratic_cost_value() {
        assert!((quadratic_cost(2.0_f64, 1.0, 3.0, 4.0) - 20.0).abs() < f64::EPSILON);
        assert!((quadratic_cost(-1.0_f64, 2.0, 1.0, 0.5) - 0.5).abs() < f64::EPSILON);
    }

    // Tests that a zero difference leaves only the constant term
    #[test]
    fn test_quadratic_cost_zero_difference() {
        assert!((quadratic_cost(0.0_f64, 7.0, -3.0, 11.0) - 11.0).abs() < f64::EPSILON);
    }

    // Tests that the cost equals the sum of squared offsets it factorizes
    // Verified by swapping the sign of the linear term
    #[test]
    fn test_quadratic_cost_matches_sum_of_squares() {
        let offsets = [1.5_f64, -4.0, 0.25];
        let d = 2.0_f64;

        let a = offsets.len() as f64;
        let b: f64 = offsets.iter().sum();
        let c: f64 = offsets.iter().map(|p| p * p).sum();
        let expected: f64 = offsets.iter().map(|p| (d + p) * (d + p)).sum();

        assert!((quadratic_cost(d, a, b, c) - expected).abs() < 1e-12);
    }

    // Tests generic use with single precision
    #[test]
    fn test_quadratic_cost_f32() {
        assert!((quadratic_cost(1.0_f32, 1.0, 1.0, 1.0) - 4.0).abs() < f32::EPSILON);
    }

    // Tests mean recovery from the negated numerator
    // Verified by removing the negation
    #[test]
    fn test_negated_ratio() {
        assert!((negated_ratio(-6.0_f64, 3.0) - 2.0).abs() < f64::EPSILON);
        assert!((negated_ratio(10.0_f64, 4.0) + 2.5).abs() < f64::EPSILON);
    }
}
