//! Characteristic polynomial helpers and the companion-matrix root-finder.

use crate::error::DegenerateInput;
use crate::traits::RootFinder;
use anyhow::{anyhow, bail, Context, Result};
use nalgebra::linalg::Schur;
use nalgebra::DMatrix;
use num_complex::Complex;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Checks that `coefficients` (highest degree first) describe a polynomial of degree
/// at least one.
pub fn validate_coefficients(coefficients: &[f64]) -> Result<(), DegenerateInput> {
    if coefficients.len() < 2 {
        return Err(DegenerateInput::TooFewCoefficients(coefficients.len()));
    }
    if let Some((index, &value)) = coefficients
        .iter()
        .enumerate()
        .find(|(_, value)| !value.is_finite())
    {
        return Err(DegenerateInput::NonFiniteCoefficient { index, value });
    }
    if coefficients[0] == 0.0 {
        return Err(DegenerateInput::ZeroLeadingCoefficient);
    }
    Ok(())
}

/// Coefficients of the derivative, highest degree first.
pub fn derivative(coefficients: &[f64]) -> Vec<f64> {
    let degree = coefficients.len().saturating_sub(1);
    coefficients
        .iter()
        .take(degree)
        .enumerate()
        .map(|(i, &c)| c * (degree - i) as f64)
        .collect()
}

/// Horner evaluation at a complex point.
pub fn evaluate(coefficients: &[f64], z: Complex<f64>) -> Complex<f64> {
    coefficients
        .iter()
        .fold(Complex::zero(), |acc, &c| acc * z + c)
}

/// `sum |c_i| |z|^(deg - i)`, the scale against which a residual at `z` is judged.
fn magnitude_bound(coefficients: &[f64], z: Complex<f64>) -> f64 {
    let r = z.norm();
    coefficients.iter().fold(0.0, |acc, &c| acc * r + c.abs())
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RootFinderSettings {
    /// Convergence threshold for the Schur iteration.
    pub schur_tolerance: f64,
    /// Iteration cap for the Schur decomposition (0 means unbounded).
    pub schur_max_iterations: usize,
    /// Sweeps of the Aberth iteration run when the Schur iteration stalls.
    pub aberth_max_iterations: usize,
    /// Relative step size below which an Aberth sweep counts as converged.
    pub aberth_tolerance: f64,
    /// Smallest relative link radius used when clustering eigenvalues.
    pub cluster_radius: f64,
    /// Multiple of `eps^(1/n)` used as the starting link radius for degree `n`.
    pub scatter_factor: f64,
    /// Rejected clusters are split at half the radius until it drops below this.
    pub min_cluster_radius: f64,
    /// Relative residual a polished cluster must reach on `p, p', ..., p^(m-1)`.
    pub multiplicity_tolerance: f64,
    pub polish_max_steps: usize,
}

impl Default for RootFinderSettings {
    fn default() -> Self {
        Self {
            schur_tolerance: f64::EPSILON,
            schur_max_iterations: 10_000,
            aberth_max_iterations: 500,
            aberth_tolerance: 1e-14,
            cluster_radius: 1e-3,
            scatter_factor: 8.0,
            min_cluster_radius: 1e-7,
            multiplicity_tolerance: 1e-10,
            polish_max_steps: 50,
        }
    }
}

/// Phase of the first Aberth starting point; keeps the start off the real axis.
const ABERTH_PHASE: f64 = 0.4;
/// Relative residual every Aberth approximation must reach.
const ABERTH_RESIDUAL: f64 = 1e-8;

/// Finds roots as eigenvalues of the companion matrix, then polishes clusters.
///
/// Trailing zero coefficients are stripped first and reported as exact zero roots.
/// Should the Schur iteration stall (it does on companion matrices such as that of
/// `x^4 + 1`), the roots are found by Aberth iteration instead.
///
/// A root of multiplicity `m` comes back as `m` values scattered by roughly
/// `eps^(1/m)`. Values are linked into clusters at a radius that covers the widest
/// scatter possible for the degree. A cluster is replaced by the root of `p^(m-1)`
/// nearest to its centroid, provided `p, ..., p^(m-1)` all vanish there; otherwise
/// it is split at half the radius and each part is tried again.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompanionRootFinder {
    pub settings: RootFinderSettings,
}

impl CompanionRootFinder {
    pub fn new(settings: RootFinderSettings) -> Self {
        Self { settings }
    }

    fn eigenvalues(&self, coefficients: &[f64]) -> Result<Vec<Complex<f64>>> {
        let companion = companion_matrix(coefficients);
        let schur = Schur::try_new(
            companion,
            self.settings.schur_tolerance,
            self.settings.schur_max_iterations,
        )
        .ok_or_else(|| {
            anyhow!(
                "Schur decomposition did not converge in {} iterations",
                self.settings.schur_max_iterations
            )
        })?;
        Ok(schur.complex_eigenvalues().iter().cloned().collect())
    }

    /// Simultaneous Newton iteration with Aberth's correction, started on a circle
    /// whose radius is the geometric mean of the root moduli.
    fn aberth(&self, coefficients: &[f64]) -> Result<Vec<Complex<f64>>> {
        let degree = coefficients.len() - 1;
        let slope = derivative(coefficients);
        let radius = (coefficients[degree] / coefficients[0])
            .abs()
            .powf(1.0 / degree as f64);
        let radius = if radius.is_normal() { radius } else { 1.0 };

        let mut z: Vec<Complex<f64>> = (0..degree)
            .map(|k| Complex::from_polar(radius, ABERTH_PHASE + TAU * k as f64 / degree as f64))
            .collect();

        for _ in 0..self.settings.aberth_max_iterations {
            let mut converged = true;
            for k in 0..degree {
                let value = evaluate(coefficients, z[k]);
                if value.is_zero() {
                    continue;
                }
                let repulsion: Complex<f64> = z
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != k)
                    .map(|(_, &other)| (z[k] - other).inv())
                    .sum();
                let step = (evaluate(&slope, z[k]) / value - repulsion).inv();
                if !step.is_finite() {
                    bail!("Aberth iteration broke down at {}", z[k]);
                }
                z[k] -= step;
                if step.norm() > self.settings.aberth_tolerance * z[k].norm().max(1.0) {
                    converged = false;
                }
            }
            if converged {
                break;
            }
        }

        if let Some(stray) = z.iter().find(|&&root| {
            evaluate(coefficients, root).norm()
                > ABERTH_RESIDUAL * magnitude_bound(coefficients, root)
        }) {
            bail!(
                "Aberth iteration did not converge in {} sweeps (stray value {})",
                self.settings.aberth_max_iterations,
                stray
            );
        }
        Ok(z)
    }

    fn polish(&self, coefficients: &[f64], eigenvalues: &[Complex<f64>]) -> Vec<Complex<f64>> {
        let degree = coefficients.len() - 1;
        let radius = (self.settings.scatter_factor * f64::EPSILON.powf(1.0 / degree as f64))
            .max(self.settings.cluster_radius);

        let mut roots = Vec::with_capacity(eigenvalues.len());
        for cluster in cluster_eigenvalues(eigenvalues, radius) {
            self.resolve_cluster(coefficients, cluster, radius, &mut roots);
        }
        roots
    }

    fn resolve_cluster(
        &self,
        coefficients: &[f64],
        cluster: Vec<Complex<f64>>,
        radius: f64,
        roots: &mut Vec<Complex<f64>>,
    ) {
        if let Some(root) = self.polish_cluster(coefficients, &cluster, radius) {
            roots.extend(std::iter::repeat(root).take(cluster.len()));
            return;
        }
        let finer = radius / 2.0;
        if cluster.len() > 1 && finer >= self.settings.min_cluster_radius {
            for part in cluster_eigenvalues(&cluster, finer) {
                self.resolve_cluster(coefficients, part, finer, roots);
            }
            return;
        }
        roots.extend(cluster);
    }

    fn polish_cluster(
        &self,
        coefficients: &[f64],
        cluster: &[Complex<f64>],
        radius: f64,
    ) -> Option<Complex<f64>> {
        let m = cluster.len();
        let centroid = cluster.iter().sum::<Complex<f64>>() / m as f64;

        // derivatives[j] = p^(j), for j in 0..=m
        let mut derivatives = vec![coefficients.to_vec()];
        for _ in 0..m {
            let next = derivative(derivatives.last()?);
            derivatives.push(next);
        }
        let target = &derivatives[m - 1];
        let slope = &derivatives[m];

        let mut z = centroid;
        for _ in 0..self.settings.polish_max_steps {
            let denom = evaluate(slope, z);
            if denom.is_zero() {
                break;
            }
            let step = evaluate(target, z) / denom;
            if !step.is_finite() {
                return None;
            }
            z -= step;
            if step.norm() <= f64::EPSILON * z.norm().max(1.0) {
                break;
            }
        }

        let reach = radius * m as f64 * centroid.norm().max(1.0);
        if !z.is_finite() || (z - centroid).norm() > reach {
            return None;
        }
        let vanishes = derivatives[..m].iter().all(|p| {
            evaluate(p, z).norm() <= self.settings.multiplicity_tolerance * magnitude_bound(p, z)
        });
        vanishes.then_some(z)
    }
}

impl RootFinder for CompanionRootFinder {
    fn find_roots(&self, coefficients: &[f64]) -> Result<Vec<Complex<f64>>> {
        validate_coefficients(coefficients).context("Cannot build companion matrix.")?;

        // Trailing zero coefficients are exact roots at the origin.
        let zeros = coefficients.iter().rev().take_while(|&&c| c == 0.0).count();
        let reduced = &coefficients[..coefficients.len() - zeros];
        let degree = reduced.len() - 1;

        let mut roots: Vec<Complex<f64>> = Vec::with_capacity(coefficients.len() - 1);
        if degree > 0 {
            let eigenvalues = match self.eigenvalues(reduced) {
                Ok(values) => values,
                Err(schur) => self.aberth(reduced).with_context(|| {
                    format!("Failed to compute eigenvalues of the companion matrix ({schur:#}).")
                })?,
            };
            if eigenvalues.len() != degree {
                bail!(
                    "Companion matrix produced {} eigenvalues, expected {}.",
                    eigenvalues.len(),
                    degree
                );
            }
            roots.extend(self.polish(reduced, &eigenvalues));
        }
        roots.extend(std::iter::repeat(Complex::zero()).take(zeros));
        Ok(roots)
    }
}

/// Companion matrix of the monic polynomial `coefficients / coefficients[0]`.
fn companion_matrix(coefficients: &[f64]) -> DMatrix<f64> {
    let degree = coefficients.len() - 1;
    let lead = coefficients[0];
    let mut matrix = DMatrix::zeros(degree, degree);
    for j in 0..degree {
        matrix[(0, j)] = -coefficients[j + 1] / lead;
    }
    for i in 1..degree {
        matrix[(i, i - 1)] = 1.0;
    }
    matrix
}

fn linked(a: Complex<f64>, b: Complex<f64>, radius: f64) -> bool {
    (a - b).norm() <= radius * a.norm().max(b.norm()).max(1.0)
}

/// Single-linkage clustering: values closer than `radius · max(1, |a|, |b|)` share
/// a cluster.
fn cluster_eigenvalues(values: &[Complex<f64>], radius: f64) -> Vec<Vec<Complex<f64>>> {
    let mut clusters: Vec<Vec<Complex<f64>>> = Vec::new();
    for &value in values {
        let (joined, mut rest): (Vec<_>, Vec<_>) = clusters.into_iter().partition(|cluster| {
            cluster
                .iter()
                .any(|&member| linked(member, value, radius))
        });
        let mut merged: Vec<Complex<f64>> = joined.into_iter().flatten().collect();
        merged.push(value);
        rest.push(merged);
        clusters = rest;
    }
    clusters
}

/// Roots of the characteristic polynomial using the default companion-matrix finder
/// with `settings`.
pub fn characteristic_roots(
    coefficients: &[f64],
    settings: &RootFinderSettings,
) -> Result<Vec<Complex<f64>>> {
    CompanionRootFinder::new(*settings).find_roots(coefficients)
}
