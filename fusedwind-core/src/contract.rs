//! Structural compatibility between a derived type and its base.
//!
//! A derived type is compatible with a base when it declares every field the
//! base declares. If either type is a variable tree the check is done on the
//! undifferentiated field sets, otherwise inputs and outputs are checked
//! separately.

use crate::errors::{ContractError, ContractResult};
use crate::field::TypeDescriptor;
use log::warn;
use serde::Serialize;
use std::collections::BTreeSet;

/// A field declared by both types with a different kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindMismatch {
    pub field: String,
    /// Kind declared by the base
    pub expected: String,
    /// Kind declared by the derived type
    pub found: String,
}

/// Outcome of comparing a derived type with a base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityReport {
    pub derived: String,
    pub base: String,
    /// Whether the undifferentiated (variable tree) check was used
    pub record_check: bool,
    pub missing_variables: BTreeSet<String>,
    pub missing_inputs: BTreeSet<String>,
    pub missing_outputs: BTreeSet<String>,
    pub kind_mismatches: Vec<KindMismatch>,
}

impl CompatibilityReport {
    /// Whether the derived type is a structural superset of the base
    pub fn is_compatible(&self) -> bool {
        self.missing_variables.is_empty()
            && self.missing_inputs.is_empty()
            && self.missing_outputs.is_empty()
    }

    /// Convert the report into the error describing its first violation.
    ///
    /// Missing inputs are reported before missing outputs. Kind mismatches are
    /// only violations when `strict_kinds` is set.
    pub fn into_result(self, strict_kinds: bool) -> ContractResult<()> {
        let missing = |set: BTreeSet<String>| set.into_iter().collect::<Vec<_>>();

        if !self.missing_variables.is_empty() {
            return Err(ContractError::MissingVariables {
                derived: self.derived,
                base: self.base,
                missing: missing(self.missing_variables),
            });
        }
        if !self.missing_inputs.is_empty() {
            return Err(ContractError::MissingInputs {
                derived: self.derived,
                base: self.base,
                missing: missing(self.missing_inputs),
            });
        }
        if !self.missing_outputs.is_empty() {
            return Err(ContractError::MissingOutputs {
                derived: self.derived,
                base: self.base,
                missing: missing(self.missing_outputs),
            });
        }
        if let Some(mismatch) = self.kind_mismatches.into_iter().next() {
            if strict_kinds {
                return Err(ContractError::KindMismatch {
                    derived: self.derived,
                    base: self.base,
                    field: mismatch.field,
                    expected: mismatch.expected,
                    found: mismatch.found,
                });
            }
            warn!(
                "{}.{} is declared as {} but {} declares it as {}",
                self.derived, mismatch.field, mismatch.found, self.base, mismatch.expected
            );
        }
        Ok(())
    }
}

fn difference(base: BTreeSet<&str>, derived: &BTreeSet<&str>) -> BTreeSet<String> {
    base.into_iter()
        .filter(|name| !derived.contains(name))
        .map(str::to_string)
        .collect()
}

/// Compare the declared fields of `derived` against those of `base`.
///
/// # Example
///
/// ```rust
/// use fusedwind_core::contract::compare;
/// use fusedwind_core::field::{FieldKind, TypeDescriptor};
///
/// let base = TypeDescriptor::variable_tree("Base")
///     .var("a", FieldKind::Float)
///     .var("b", FieldKind::Float);
/// let derived = TypeDescriptor::variable_tree("Derived").var("a", FieldKind::Float);
///
/// let report = compare(&derived, &base);
/// assert!(!report.is_compatible());
/// assert!(report.missing_variables.contains("b"));
/// ```
pub fn compare(derived: &TypeDescriptor, base: &TypeDescriptor) -> CompatibilityReport {
    let record_check = derived.is_record() || base.is_record();

    let (missing_variables, missing_inputs, missing_outputs) = if record_check {
        (
            difference(base.list_vars(), &derived.list_vars()),
            BTreeSet::new(),
            BTreeSet::new(),
        )
    } else {
        (
            BTreeSet::new(),
            difference(base.list_inputs(), &derived.list_inputs()),
            difference(base.list_outputs(), &derived.list_outputs()),
        )
    };

    let kind_mismatches = base
        .fields
        .iter()
        .filter_map(|expected| {
            let found = derived.get(&expected.name)?;
            (found.kind != expected.kind).then(|| KindMismatch {
                field: expected.name.clone(),
                expected: expected.kind.to_string(),
                found: found.kind.to_string(),
            })
        })
        .collect();

    CompatibilityReport {
        derived: derived.name.clone(),
        base: base.name.clone(),
        record_check,
        missing_variables,
        missing_inputs,
        missing_outputs,
        kind_mismatches,
    }
}

/// Check that `derived` declares every field of `base`.
///
/// Field kinds are not compared; use [`compare`] and
/// [`CompatibilityReport::into_result`] for a strict check.
pub fn check(derived: &TypeDescriptor, base: &TypeDescriptor) -> ContractResult<()> {
    compare(derived, base).into_result(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    fn record(name: &str, fields: &[&str]) -> TypeDescriptor {
        fields.iter().fold(TypeDescriptor::variable_tree(name), |d, f| {
            d.var(*f, FieldKind::Float)
        })
    }

    fn component(name: &str, inputs: &[&str], outputs: &[&str]) -> TypeDescriptor {
        let d = inputs.iter().fold(TypeDescriptor::component(name), |d, f| {
            d.input(*f, FieldKind::Float)
        });
        outputs.iter().fold(d, |d, f| d.output(*f, FieldKind::Float))
    }

    #[test]
    fn test_superset_record_is_compatible() {
        let base = record("Base", &["a", "b"]);
        let derived = record("Derived1", &["a", "b", "c"]);
        assert!(check(&derived, &base).is_ok());
    }

    #[test]
    fn test_missing_record_field_is_reported() {
        let base = record("Base", &["a", "b"]);
        let derived = record("Derived2", &["a"]);

        let err = check(&derived, &base).unwrap_err();
        assert_eq!(
            err,
            ContractError::MissingVariables {
                derived: "Derived2".to_string(),
                base: "Base".to_string(),
                missing: vec!["b".to_string()],
            }
        );
        let message = err.to_string();
        assert!(message.contains("Derived2"));
        assert!(message.contains("Base"));
        assert!(message.ends_with("are: b"));
    }

    #[test]
    fn test_missing_fields_are_listed_in_order() {
        let base = record("Base", &["z", "a", "m"]);
        let derived = record("Derived", &[]);

        let err = check(&derived, &base).unwrap_err();
        assert!(err.to_string().ends_with("are: a, m, z"));
    }

    #[test]
    fn test_missing_input_is_reported_by_role() {
        let base = component("Base", &["x"], &["y"]);
        let derived = component("Derived", &[], &["y"]);

        let report = compare(&derived, &base);
        assert!(!report.record_check);
        assert_eq!(report.missing_inputs, BTreeSet::from(["x".to_string()]));
        assert!(report.missing_outputs.is_empty());

        let err = report.into_result(false).unwrap_err();
        assert!(matches!(err, ContractError::MissingInputs { .. }));
        assert!(err.to_string().contains("missing input(s) of Derived are: x"));
    }

    #[test]
    fn test_missing_output_is_reported_by_role() {
        let base = component("Base", &["x"], &["y"]);
        let derived = component("Derived", &["x"], &[]);

        let err = check(&derived, &base).unwrap_err();
        assert!(matches!(err, ContractError::MissingOutputs { .. }));
        assert!(err.to_string().contains("missing output(s) of Derived are: y"));
    }

    #[test]
    fn test_input_declared_as_output_is_missing() {
        let base = component("Base", &["x"], &[]);
        let derived = component("Derived", &[], &["x"]);

        let report = compare(&derived, &base);
        assert!(report.missing_inputs.contains("x"));
    }

    #[test]
    fn test_record_check_used_when_either_side_is_record() {
        let base = record("Base", &["x"]);
        let derived = component("Derived", &["x"], &[]);

        let report = compare(&derived, &base);
        assert!(report.record_check);
        assert!(report.is_compatible());
    }

    #[test]
    fn test_kind_mismatch_only_fails_when_strict() {
        let base = TypeDescriptor::variable_tree("Base").var("nb", FieldKind::Int);
        let derived = TypeDescriptor::variable_tree("Derived").var("nb", FieldKind::Float);

        let report = compare(&derived, &base);
        assert!(report.is_compatible());
        assert_eq!(
            report.kind_mismatches,
            vec![KindMismatch {
                field: "nb".to_string(),
                expected: "Int".to_string(),
                found: "Float".to_string(),
            }]
        );

        assert!(report.clone().into_result(false).is_ok());
        let err = report.into_result(true).unwrap_err();
        assert!(matches!(err, ContractError::KindMismatch { ref field, .. } if field == "nb"));
    }

    #[test]
    fn test_check_is_deterministic() {
        let base = record("Base", &["c", "b", "a"]);
        let derived = record("Derived", &["b"]);
        assert_eq!(check(&derived, &base), check(&derived, &base));
    }
}
