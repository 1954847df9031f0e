//! Root cleaning and grouping.
//!
//! Raw roots from the root-finder carry floating-point noise (`2` may come back as
//! `1.9999999999` or `2 + 1e-15i`). Cleaning rounds both components to a fixed number
//! of decimal digits so that roots which are mathematically equal compare equal
//! bit-for-bit, and grouping counts how often each cleaned value occurs.

use crate::synthesis::format_real;
use num_complex::Complex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A root whose components have been rounded to a fixed decimal precision.
///
/// Zero components are always stored as `+0.0`, so equality and hashing can work
/// directly on the bit patterns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CleanedRoot {
    pub re: f64,
    pub im: f64,
}

impl CleanedRoot {
    pub fn new(re: f64, im: f64, precision: u32) -> Self {
        Self {
            re: round_to_precision(re, precision),
            im: round_to_precision(im, precision),
        }
    }

    pub fn is_real(&self) -> bool {
        self.im == 0.0
    }

    pub fn conjugate(&self) -> Self {
        // Negating a non-zero value is exact; zero stays canonical.
        Self {
            re: self.re,
            im: if self.im == 0.0 { 0.0 } else { -self.im },
        }
    }
}

impl PartialEq for CleanedRoot {
    fn eq(&self, other: &Self) -> bool {
        self.re.to_bits() == other.re.to_bits() && self.im.to_bits() == other.im.to_bits()
    }
}

impl Eq for CleanedRoot {}

impl Hash for CleanedRoot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.re.to_bits().hash(state);
        self.im.to_bits().hash(state);
    }
}

impl From<CleanedRoot> for Complex<f64> {
    fn from(root: CleanedRoot) -> Self {
        Complex::new(root.re, root.im)
    }
}

impl fmt::Display for CleanedRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_real() {
            return write!(f, "{}", format_real(self.re));
        }
        let sign = if self.im < 0.0 { '-' } else { '+' };
        write!(
            f,
            "{}{}{}i",
            format_real(self.re),
            sign,
            format_real(self.im.abs())
        )
    }
}

/// Rounds `value` to `precision` decimal digits, half away from zero.
///
/// A result of zero is returned as `+0.0`. Values too large to scale are returned
/// unchanged (they are already integral at any precision that matters).
pub fn round_to_precision(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision as i32);
    let scaled = value * scale;
    let rounded = if scaled.is_finite() {
        scaled.round() / scale
    } else {
        value
    };
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Cleans a single raw root.
pub fn clean_root(raw: Complex<f64>, precision: u32) -> CleanedRoot {
    CleanedRoot::new(raw.re, raw.im, precision)
}

/// Cleans every raw root, preserving order.
pub fn clean_roots(raw: &[Complex<f64>], precision: u32) -> Vec<CleanedRoot> {
    raw.iter().map(|&root| clean_root(root, precision)).collect()
}

/// Distinct cleaned roots and how many raw roots cleaned to each.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootGroup {
    counts: HashMap<CleanedRoot, usize>,
}

impl RootGroup {
    /// Builds a group from explicit `(root, multiplicity)` pairs. Repeated roots add up
    /// and zero multiplicities are dropped.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (CleanedRoot, usize)>,
    {
        let mut group = Self::default();
        for (root, multiplicity) in counts {
            if multiplicity > 0 {
                *group.counts.entry(root).or_insert(0) += multiplicity;
            }
        }
        group
    }

    pub fn multiplicity(&self, root: &CleanedRoot) -> Option<usize> {
        self.counts.get(root).copied()
    }

    /// Total number of roots, i.e. the polynomial degree.
    pub fn degree(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CleanedRoot, usize)> + '_ {
        self.counts.iter().map(|(root, &count)| (root, count))
    }
}

/// Counts cleaned roots by value.
pub fn group_roots(cleaned: &[CleanedRoot]) -> RootGroup {
    RootGroup::from_counts(cleaned.iter().map(|&root| (root, 1)))
}
