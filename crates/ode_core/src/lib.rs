pub mod classify;
pub mod error;
pub mod polynomial;
pub mod roots;
pub mod solution;
pub mod synthesis;
/// The `ode_core` crate turns the coefficients of a linear, constant-coefficient,
/// homogeneous ODE into the symbolic general solution `y(x) = C_1... + C_2...`.
///
/// Key components:
/// - **Traits**: `RootFinder`, the seam to the polynomial root-finder.
/// - **Polynomial**: coefficient validation, Horner evaluation and the companion-matrix
///   root-finder (`CompanionRootFinder`).
/// - **Roots**: cleaning raw roots to a fixed decimal precision and grouping them by
///   multiplicity.
/// - **Classify**: real roots vs. conjugate pairs, in a deterministic order.
/// - **Synthesis**: term generation with explicit constant labels and final assembly.
/// - **Solution**: the `synthesize_general_solution` entry points.
pub mod traits;

pub use error::{ClassificationError, DegenerateInput, MalformedReason};
pub use solution::{
    classify_general_solution, synthesize_general_solution, synthesize_general_solution_with,
    ClassifierSettings, GeneralSolution, DEFAULT_PRECISION, MAX_PRECISION,
};
