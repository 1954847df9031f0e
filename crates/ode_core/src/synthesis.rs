//! Term synthesis and solution assembly.
//!
//! Each root class contributes `multiplicity` terms (real roots) or
//! `2 * multiplicity` terms (conjugate pairs). Constant labels `C_1, C_2, ...` are
//! threaded through explicitly so a whole solution issues exactly `n` labels.

use crate::classify::RootClass;
use serde::Serialize;
use std::fmt;

/// Renders a real literal: shortest round-trip decimal, no trailing `.0`.
pub fn format_real(value: f64) -> String {
    // Display for f64 already prints integral values without a fractional part.
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "rate")]
pub enum ExponentialFactor {
    /// `alpha == 0`, so `e^(0x) = 1` is left out.
    None,
    /// `alpha == 1`, rendered as `e^(x)`.
    Unit,
    Rate(f64),
}

impl ExponentialFactor {
    pub fn from_rate(alpha: f64) -> Self {
        if alpha == 0.0 {
            ExponentialFactor::None
        } else if alpha == 1.0 {
            ExponentialFactor::Unit
        } else {
            ExponentialFactor::Rate(alpha)
        }
    }
}

impl fmt::Display for ExponentialFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExponentialFactor::None => Ok(()),
            ExponentialFactor::Unit => f.write_str("e^(x)"),
            ExponentialFactor::Rate(alpha) => write!(f, "e^({}x)", format_real(*alpha)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "frequency")]
pub enum TrigFactor {
    Cos(f64),
    Sin(f64),
}

impl fmt::Display for TrigFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrigFactor::Cos(beta) => write!(f, "cos({}x)", format_real(*beta)),
            TrigFactor::Sin(beta) => write!(f, "sin({}x)", format_real(*beta)),
        }
    }
}

/// One summand `C_label * x^power * exponential * trig` of the general solution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Term {
    pub label: usize,
    pub power: usize,
    pub exponential: ExponentialFactor,
    pub trig: Option<TrigFactor>,
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C_{}", self.label)?;
        match self.power {
            0 => {}
            1 => f.write_str("x")?,
            k => write!(f, "x^{}", k)?,
        }
        write!(f, "{}", self.exponential)?;
        if let Some(trig) = self.trig {
            write!(f, "{}", trig)?;
        }
        Ok(())
    }
}

/// Emits the terms for `classes` in order, starting at label `first_label`.
///
/// Returns the terms together with the next unused label.
pub fn synthesize_terms(classes: &[RootClass], first_label: usize) -> (Vec<Term>, usize) {
    let mut terms = Vec::new();
    let mut label = first_label;

    for class in classes {
        match *class {
            RootClass::RealRoot {
                value,
                multiplicity,
            } => {
                let exponential = ExponentialFactor::from_rate(value);
                for power in 0..multiplicity {
                    terms.push(Term {
                        label,
                        power,
                        exponential,
                        trig: None,
                    });
                    label += 1;
                }
            }
            RootClass::ComplexPair {
                real_part,
                imag_part,
                multiplicity,
            } => {
                let exponential = ExponentialFactor::from_rate(real_part);
                for power in 0..multiplicity {
                    terms.push(Term {
                        label,
                        power,
                        exponential,
                        trig: Some(TrigFactor::Cos(imag_part)),
                    });
                    terms.push(Term {
                        label: label + 1,
                        power,
                        exponential,
                        trig: Some(TrigFactor::Sin(imag_part)),
                    });
                    label += 2;
                }
            }
        }
    }

    (terms, label)
}

/// Joins the terms into `y(x) = ...`, rewriting `+ -` as `- `.
pub fn assemble_solution(terms: &[Term]) -> String {
    let joined = terms
        .iter()
        .map(|term| term.to_string())
        .collect::<Vec<_>>()
        .join(" + ");
    format!("y(x) = {}", joined.replace("+ -", "- "))
}
