//! Power-series polynomials and evenly spaced sample grids.

/// Polynomial in power-series form, `p(x) = Σ c[i]·xⁱ`.
///
/// Response tables store degree-8 polynomials (9 coefficients) per zone, but
/// any number of coefficients is accepted. An empty coefficient list is the
/// zero polynomial.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Create a polynomial from coefficients ordered by ascending power.
    pub fn new(coeffs: Vec<f64>) -> Self {
        Self { coeffs }
    }

    /// Coefficients ordered by ascending power
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// Highest power carried by the coefficient list (0 for a constant or empty list)
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Evaluate the polynomial at `x`.
    ///
    /// Sums `c[i]·xⁱ` term by term rather than using Horner's scheme, so the
    /// result matches the rounding of the tool that produced the tables.
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs
            .iter()
            .enumerate()
            .map(|(i, &c)| c * x.powi(i as i32))
            .sum()
    }

    /// Evaluate the polynomial at every point of `xs`.
    pub fn eval_all(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.eval(x)).collect()
    }
}

impl From<Vec<f64>> for Polynomial {
    fn from(coeffs: Vec<f64>) -> Self {
        Self::new(coeffs)
    }
}

impl From<&[f64]> for Polynomial {
    fn from(coeffs: &[f64]) -> Self {
        Self::new(coeffs.to_vec())
    }
}

/// `n` evenly spaced values from `start` to `stop`, both ends included.
///
/// Returns an empty vector for `n == 0` and `[start]` for `n == 1`. The last
/// value is set to `stop` exactly.
///
/// # Examples
/// ```
/// use response_math::polynomial::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert!(linspace(0.0, 1.0, 0).is_empty());
/// ```
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            values[n - 1] = stop;
            values
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_polynomial() {
        let p = Polynomial::new(vec![4.2]);
        assert_eq!(p.degree(), 0);
        for x in [0.0, 0.3, 1.0, -7.5] {
            assert_eq!(p.eval(x), 4.2);
        }
    }

    #[test]
    fn test_empty_polynomial_is_zero() {
        let p = Polynomial::new(Vec::new());
        assert_eq!(p.degree(), 0);
        assert_eq!(p.eval(3.0), 0.0);
    }

    #[test]
    fn test_power_series_order() {
        // 1 + 2x + 3x²
        let p = Polynomial::from(vec![1.0, 2.0, 3.0]);
        assert_eq!(p.degree(), 2);
        assert_relative_eq!(p.eval(0.0), 1.0);
        assert_relative_eq!(p.eval(1.0), 6.0);
        assert_relative_eq!(p.eval(0.5), 2.75);
        assert_relative_eq!(p.eval(-2.0), 9.0);
    }

    #[test]
    fn test_degree_eight_at_unit_interval_ends() {
        let coeffs: Vec<f64> = (0..9).map(|i| (i + 1) as f64 * 0.1).collect();
        let p = Polynomial::from(coeffs.as_slice());

        assert_eq!(p.degree(), 8);
        assert_relative_eq!(p.eval(0.0), 0.1);
        assert_relative_eq!(p.eval(1.0), coeffs.iter().sum::<f64>(), epsilon = 1e-12);
    }

    #[test]
    fn test_eval_all() {
        let p = Polynomial::new(vec![0.0, 1.0]);
        assert_eq!(p.eval_all(&[0.0, 0.5, 1.0]), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_linspace_edge_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(0.0, 1.0, 1), vec![0.0]);
        assert_eq!(linspace(0.0, 1.0, 2), vec![0.0, 1.0]);
    }

    #[test]
    fn test_linspace_hits_stop_exactly() {
        let grid = linspace(0.0, 1.0, 7);
        assert_eq!(grid.len(), 7);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[6], 1.0);
        for (i, v) in grid.iter().enumerate() {
            assert_relative_eq!(*v, i as f64 / 6.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_linspace_descending() {
        let grid = linspace(10.0, 8.0, 5);
        assert_eq!(grid, vec![10.0, 9.5, 9.0, 8.5, 8.0]);
    }
}
