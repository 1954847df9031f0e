use anyhow::Result;
use num_complex::Complex;

/// A polynomial root-finder.
///
/// `coefficients` are ordered highest degree first and describe a polynomial of
/// degree `n = coefficients.len() - 1 >= 1` with a non-zero leading coefficient.
/// Implementations must return exactly `n` roots, repeating a root once per unit of
/// multiplicity. Roots may carry floating-point noise; callers clean them before
/// comparing.
pub trait RootFinder {
    fn find_roots(&self, coefficients: &[f64]) -> Result<Vec<Complex<f64>>>;
}

impl<R: RootFinder + ?Sized> RootFinder for &R {
    fn find_roots(&self, coefficients: &[f64]) -> Result<Vec<Complex<f64>>> {
        (**self).find_roots(coefficients)
    }
}
