//! Entry points: coefficients in, general solution out.
//!
//! The pipeline is root-finding, cleaning, grouping, classification, term synthesis
//! and assembly, each stage producing a fresh value for the next. Nothing is shared
//! between calls.

use crate::classify::{classify_roots, RootClass};
use crate::error::ClassificationError;
use crate::polynomial::{validate_coefficients, CompanionRootFinder, RootFinderSettings};
use crate::roots::{clean_roots, group_roots, CleanedRoot};
use crate::synthesis::{assemble_solution, synthesize_terms, Term};
use crate::traits::RootFinder;
use serde::{Deserialize, Serialize};

/// Decimal digits kept when cleaning roots.
pub const DEFAULT_PRECISION: u32 = 5;
/// Beyond this, rounding no longer removes root-finder noise from an `f64`.
pub const MAX_PRECISION: u32 = 15;

const FIRST_LABEL: usize = 1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Decimal digits kept when cleaning roots. Must exceed the root-finder's error
    /// and stay below the separation of roots that should be told apart.
    pub precision: u32,
    pub root_finder: RootFinderSettings,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            root_finder: RootFinderSettings::default(),
        }
    }
}

impl ClassifierSettings {
    fn validate(&self) -> Result<(), ClassificationError> {
        if self.precision > MAX_PRECISION {
            return Err(ClassificationError::InvalidSettings(format!(
                "precision must be at most {}, got {}",
                MAX_PRECISION, self.precision
            )));
        }
        let finder = &self.root_finder;
        if !(finder.cluster_radius >= 0.0 && finder.cluster_radius.is_finite()) {
            return Err(ClassificationError::InvalidSettings(
                "cluster_radius must be a finite, non-negative number".to_string(),
            ));
        }
        if !(finder.min_cluster_radius > 0.0 && finder.min_cluster_radius.is_finite()) {
            return Err(ClassificationError::InvalidSettings(
                "min_cluster_radius must be a finite, positive number".to_string(),
            ));
        }
        if !(finder.scatter_factor >= 0.0 && finder.scatter_factor.is_finite()) {
            return Err(ClassificationError::InvalidSettings(
                "scatter_factor must be a finite, non-negative number".to_string(),
            ));
        }
        if !(finder.aberth_tolerance > 0.0) {
            return Err(ClassificationError::InvalidSettings(
                "aberth_tolerance must be positive".to_string(),
            ));
        }
        if !(finder.multiplicity_tolerance > 0.0) {
            return Err(ClassificationError::InvalidSettings(
                "multiplicity_tolerance must be positive".to_string(),
            ));
        }
        if !(finder.schur_tolerance > 0.0) {
            return Err(ClassificationError::InvalidSettings(
                "schur_tolerance must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything derived while synthesizing one general solution.
#[derive(Debug, Clone, Serialize)]
pub struct GeneralSolution {
    pub degree: usize,
    /// Cleaned roots in root-finder order.
    pub roots: Vec<CleanedRoot>,
    pub classes: Vec<RootClass>,
    pub terms: Vec<Term>,
    pub text: String,
}

/// Runs the full pipeline with an explicit root-finder.
pub fn classify_general_solution<R: RootFinder>(
    coefficients: &[f64],
    finder: &R,
    settings: &ClassifierSettings,
) -> Result<GeneralSolution, ClassificationError> {
    settings.validate()?;
    validate_coefficients(coefficients)?;
    let degree = coefficients.len() - 1;

    let raw = finder.find_roots(coefficients)?;
    if raw.len() != degree {
        return Err(ClassificationError::RootCountMismatch {
            expected: degree,
            found: raw.len(),
        });
    }

    let roots = clean_roots(&raw, settings.precision);
    let group = group_roots(&roots);
    let classes = classify_roots(&group)?;
    let (terms, next_label) = synthesize_terms(&classes, FIRST_LABEL);
    debug_assert_eq!(next_label, degree + FIRST_LABEL);
    let text = assemble_solution(&terms);

    Ok(GeneralSolution {
        degree,
        roots,
        classes,
        terms,
        text,
    })
}

/// Returns `y(x) = ...` for the ODE whose characteristic coefficients are given
/// highest degree first, using the companion-matrix root-finder and default settings.
///
/// ```
/// let text = ode_core::synthesize_general_solution(&[1.0, -3.0, 2.0]).unwrap();
/// assert_eq!(text, "y(x) = C_1e^(x) + C_2e^(2x)");
/// ```
pub fn synthesize_general_solution(coefficients: &[f64]) -> Result<String, ClassificationError> {
    synthesize_general_solution_with(coefficients, &ClassifierSettings::default())
}

pub fn synthesize_general_solution_with(
    coefficients: &[f64],
    settings: &ClassifierSettings,
) -> Result<String, ClassificationError> {
    let finder = CompanionRootFinder::new(settings.root_finder);
    classify_general_solution(coefficients, &finder, settings).map(|solution| solution.text)
}
