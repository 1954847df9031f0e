//! Failure kinds for solution synthesis.
//!
//! Classification is all-or-nothing: every failure aborts the call and no partial
//! solution string is ever produced.

use crate::roots::CleanedRoot;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassificationError {
    /// The cleaned complex roots are not conjugate-symmetric.
    #[error("malformed root set at {root}: {reason}")]
    MalformedRootSet {
        root: CleanedRoot,
        reason: MalformedReason,
    },
    #[error("degenerate input: {0}")]
    DegenerateInput(#[from] DegenerateInput),
    #[error("root finder failed: {0:#}")]
    RootFinder(#[from] anyhow::Error),
    #[error("root finder returned {found} roots for a degree {expected} polynomial")]
    RootCountMismatch { expected: usize, found: usize },
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

impl ClassificationError {
    /// Short, stable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ClassificationError::MalformedRootSet { .. } => "MalformedRootSetError",
            ClassificationError::DegenerateInput(_) => "DegenerateInputError",
            ClassificationError::RootFinder(_) => "RootFinderError",
            ClassificationError::RootCountMismatch { .. } => "RootCountMismatchError",
            ClassificationError::InvalidSettings(_) => "InvalidSettingsError",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MalformedReason {
    #[error("conjugate partner is missing")]
    MissingConjugate,
    #[error("conjugate partner has multiplicity {partner}, expected {expected}")]
    MultiplicityMismatch { expected: usize, partner: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DegenerateInput {
    #[error("need at least 2 coefficients (degree >= 1), got {0}")]
    TooFewCoefficients(usize),
    #[error("leading coefficient is zero")]
    ZeroLeadingCoefficient,
    #[error("coefficient {index} is not finite ({value})")]
    NonFiniteCoefficient { index: usize, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::{ClassificationError, DegenerateInput, MalformedReason};
    use crate::roots::CleanedRoot;

    #[test]
    fn messages_name_the_offending_root() {
        let err = ClassificationError::MalformedRootSet {
            root: CleanedRoot::new(1.0, 2.0, 5),
            reason: MalformedReason::MissingConjugate,
        };
        assert_eq!(err.kind(), "MalformedRootSetError");
        assert_eq!(
            err.to_string(),
            "malformed root set at 1+2i: conjugate partner is missing"
        );
    }

    #[test]
    fn degenerate_input_converts_into_classification_error() {
        let err: ClassificationError = DegenerateInput::ZeroLeadingCoefficient.into();
        assert_eq!(err.kind(), "DegenerateInputError");
        assert_eq!(err.to_string(), "degenerate input: leading coefficient is zero");
    }

    #[test]
    fn root_finder_errors_keep_their_context() {
        let inner = anyhow::anyhow!("did not converge").context("Schur decomposition");
        let err: ClassificationError = inner.into();
        assert_eq!(err.kind(), "RootFinderError");
        assert!(err.to_string().contains("did not converge"));
    }
}
