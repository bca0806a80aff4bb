//! Outcome of classifying a blendshape name list.

use serde::Serialize;

use crate::error::RigLogicError;

/// Which names landed in which category, and which could not be used.
///
/// Every input name appears in exactly one list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationReport {
    /// Pass-through drivers.
    pub direct: Vec<String>,
    /// In-betweens attached to a driver.
    pub in_betweens: Vec<String>,
    /// Correctives whose components all resolved.
    pub correctives: Vec<String>,
    /// Names matching no pattern.
    pub unclassified: Vec<String>,
    /// In-betweens whose parent driver is missing, or whose threshold is
    /// already taken by another in-between of the same driver.
    pub orphaned_in_betweens: Vec<String>,
    /// Correctives with at least one component naming no known shape.
    pub unresolved_correctives: Vec<String>,
}

impl ClassificationReport {
    /// Number of names that will be driven by evaluation.
    pub fn classified_count(&self) -> usize {
        self.direct.len() + self.in_betweens.len() + self.correctives.len()
    }

    /// Total number of names seen.
    pub fn total_count(&self) -> usize {
        self.classified_count()
            + self.unclassified.len()
            + self.orphaned_in_betweens.len()
            + self.unresolved_correctives.len()
    }

    /// Returns `true` if every name was classified and resolved.
    pub fn is_clean(&self) -> bool {
        self.unclassified.is_empty()
            && self.orphaned_in_betweens.is_empty()
            && self.unresolved_correctives.is_empty()
    }

    /// Converts an unclean report into a [`RigLogicError::Validation`].
    pub fn to_result(&self) -> Result<(), RigLogicError> {
        if self.is_clean() {
            return Ok(());
        }
        let first = self
            .unclassified
            .iter()
            .chain(&self.orphaned_in_betweens)
            .chain(&self.unresolved_correctives)
            .next()
            .cloned()
            .unwrap_or_default();
        Err(RigLogicError::Validation {
            unclassified: self.unclassified.len(),
            orphaned: self.orphaned_in_betweens.len(),
            unresolved: self.unresolved_correctives.len(),
            first,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_report() {
        let report = ClassificationReport {
            direct: vec!["jawOpen".into()],
            in_betweens: vec!["jawOpen50".into()],
            ..Default::default()
        };
        assert!(report.is_clean());
        assert_eq!(report.classified_count(), 2);
        assert_eq!(report.total_count(), 2);
        assert!(report.to_result().is_ok());
    }

    #[test]
    fn test_unclean_report_names_first_offender() {
        let report = ClassificationReport {
            direct: vec!["jawOpen".into()],
            orphaned_in_betweens: vec!["cheekPuff50".into()],
            unresolved_correctives: vec!["jawOpen_tongueOut".into()],
            ..Default::default()
        };
        assert!(!report.is_clean());
        assert_eq!(report.total_count(), 3);
        assert!(matches!(
            report.to_result(),
            Err(RigLogicError::Validation {
                unclassified: 0,
                orphaned: 1,
                unresolved: 1,
                ref first,
            }) if first == "cheekPuff50"
        ));
    }
}
