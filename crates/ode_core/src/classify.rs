//! Classification of grouped roots into real roots and conjugate pairs.

use crate::error::{ClassificationError, MalformedReason};
use crate::roots::{CleanedRoot, RootGroup};
use serde::Serialize;
use std::cmp::Ordering;

/// A distinct root of the characteristic polynomial together with its multiplicity.
///
/// A conjugate pair `alpha ± beta i` is a single class; `imag_part` is the positive
/// `beta`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum RootClass {
    RealRoot {
        value: f64,
        multiplicity: usize,
    },
    ComplexPair {
        real_part: f64,
        imag_part: f64,
        multiplicity: usize,
    },
}

impl RootClass {
    pub fn is_complex(&self) -> bool {
        matches!(self, RootClass::ComplexPair { .. })
    }

    pub fn real_part(&self) -> f64 {
        match *self {
            RootClass::RealRoot { value, .. } => value,
            RootClass::ComplexPair { real_part, .. } => real_part,
        }
    }

    pub fn imag_part(&self) -> f64 {
        match *self {
            RootClass::RealRoot { .. } => 0.0,
            RootClass::ComplexPair { imag_part, .. } => imag_part,
        }
    }

    pub fn multiplicity(&self) -> usize {
        match *self {
            RootClass::RealRoot { multiplicity, .. }
            | RootClass::ComplexPair { multiplicity, .. } => multiplicity,
        }
    }

    /// Number of roots (and therefore solution terms) this class accounts for.
    pub fn degree(&self) -> usize {
        match self {
            RootClass::RealRoot { multiplicity, .. } => *multiplicity,
            RootClass::ComplexPair { multiplicity, .. } => 2 * multiplicity,
        }
    }

    /// Presentation order: real roots first, then by real part, then by `beta`.
    pub fn presentation_cmp(&self, other: &Self) -> Ordering {
        self.is_complex()
            .cmp(&other.is_complex())
            .then_with(|| self.real_part().total_cmp(&other.real_part()))
            .then_with(|| self.imag_part().total_cmp(&other.imag_part()))
    }
}

/// Splits `group` into real roots and conjugate pairs, sorted for presentation.
///
/// Every complex root must be matched by its exact conjugate at the same
/// multiplicity; otherwise the root set is rejected, naming the first offending root
/// in `(re, im)` order.
pub fn classify_roots(group: &RootGroup) -> Result<Vec<RootClass>, ClassificationError> {
    let mut distinct: Vec<(&CleanedRoot, usize)> = group.iter().collect();
    distinct.sort_by(|(a, _), (b, _)| {
        a.re.total_cmp(&b.re)
            .then_with(|| a.im.total_cmp(&b.im))
    });

    let mut classes = Vec::with_capacity(distinct.len());
    for (root, multiplicity) in distinct {
        if root.is_real() {
            classes.push(RootClass::RealRoot {
                value: root.re,
                multiplicity,
            });
            continue;
        }

        require_conjugate(group, root, multiplicity)?;
        // Only the positive twin emits the pair.
        if root.im > 0.0 {
            classes.push(RootClass::ComplexPair {
                real_part: root.re,
                imag_part: root.im,
                multiplicity,
            });
        }
    }

    classes.sort_by(RootClass::presentation_cmp);
    Ok(classes)
}

fn require_conjugate(
    group: &RootGroup,
    root: &CleanedRoot,
    multiplicity: usize,
) -> Result<(), ClassificationError> {
    let partner = root.conjugate();
    match group.multiplicity(&partner) {
        None => Err(ClassificationError::MalformedRootSet {
            root: *root,
            reason: MalformedReason::MissingConjugate,
        }),
        Some(count) if count != multiplicity => Err(ClassificationError::MalformedRootSet {
            root: *root,
            reason: MalformedReason::MultiplicityMismatch {
                expected: multiplicity,
                partner: count,
            },
        }),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_roots, RootClass};
    use crate::error::{ClassificationError, MalformedReason};
    use crate::roots::{CleanedRoot, RootGroup};

    fn root(re: f64, im: f64) -> CleanedRoot {
        CleanedRoot::new(re, im, 5)
    }

    #[test]
    fn conjugate_twins_collapse_into_one_pair() {
        let group = RootGroup::from_counts([
            (root(0.0, 1.0), 2),
            (root(0.0, -1.0), 2),
            (root(3.0, 0.0), 1),
        ]);
        let classes = classify_roots(&group).expect("classification should succeed");
        assert_eq!(
            classes,
            vec![
                RootClass::RealRoot {
                    value: 3.0,
                    multiplicity: 1
                },
                RootClass::ComplexPair {
                    real_part: 0.0,
                    imag_part: 1.0,
                    multiplicity: 2
                },
            ]
        );
        let total: usize = classes.iter().map(RootClass::degree).sum();
        assert_eq!(total, group.degree());
    }

    #[test]
    fn ordering_is_reals_then_pairs_by_real_then_beta() {
        let group = RootGroup::from_counts([
            (root(1.0, 3.0), 1),
            (root(1.0, -3.0), 1),
            (root(1.0, 2.0), 1),
            (root(1.0, -2.0), 1),
            (root(-1.0, 5.0), 1),
            (root(-1.0, -5.0), 1),
            (root(4.0, 0.0), 1),
            (root(-2.0, 0.0), 1),
        ]);
        let classes = classify_roots(&group).expect("classification should succeed");
        let keys: Vec<(bool, f64, f64)> = classes
            .iter()
            .map(|c| (c.is_complex(), c.real_part(), c.imag_part()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (false, -2.0, 0.0),
                (false, 4.0, 0.0),
                (true, -1.0, 5.0),
                (true, 1.0, 2.0),
                (true, 1.0, 3.0),
            ]
        );
    }

    #[test]
    fn missing_conjugate_is_rejected() {
        let group = RootGroup::from_counts([(root(1.0, 2.0), 1), (root(5.0, 0.0), 1)]);
        match classify_roots(&group) {
            Err(ClassificationError::MalformedRootSet { root: bad, reason }) => {
                assert_eq!(bad, root(1.0, 2.0));
                assert_eq!(reason, MalformedReason::MissingConjugate);
            }
            other => panic!("expected MalformedRootSet, got {:?}", other),
        }
    }

    #[test]
    fn malformed_report_names_the_same_root_every_time() {
        for _ in 0..32 {
            let group = RootGroup::from_counts([
                (root(4.0, 1.0), 1),
                (root(-3.0, 2.0), 1),
                (root(0.5, -7.0), 1),
                (root(1.0, 0.0), 2),
            ]);
            match classify_roots(&group) {
                Err(ClassificationError::MalformedRootSet { root: bad, .. }) => {
                    assert_eq!(bad, root(-3.0, 2.0));
                }
                other => panic!("expected MalformedRootSet, got {:?}", other),
            }
        }
    }

    #[test]
    fn lone_negative_imaginary_root_is_rejected() {
        let group = RootGroup::from_counts([(root(0.0, -2.0), 1)]);
        let err = classify_roots(&group).expect_err("unpaired root must fail");
        assert_eq!(err.kind(), "MalformedRootSetError");
    }

    #[test]
    fn multiplicity_mismatch_is_rejected() {
        let group = RootGroup::from_counts([(root(0.0, 2.0), 2), (root(0.0, -2.0), 1)]);
        match classify_roots(&group) {
            Err(ClassificationError::MalformedRootSet { reason, .. }) => {
                assert!(matches!(
                    reason,
                    MalformedReason::MultiplicityMismatch { .. }
                ));
            }
            other => panic!("expected MalformedRootSet, got {:?}", other),
        }
    }
}
