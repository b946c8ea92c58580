//! Static field declarations for variable trees and components.
//!
//! Every type that takes part in an interface contract exposes its declared
//! fields as a [`TypeDescriptor`]. The descriptor is pure metadata: it is
//! produced without instantiating the type, so enumerating the fields of a
//! type never runs any of its initialisation logic.
//!
//! # Overview
//!
//! - [`FieldKind`] is the declared type of a field (float, list, interface slot, ...)
//! - [`IoType`] partitions the fields of components into inputs and outputs
//! - [`FieldDefinition`] describes a single field
//! - [`TypeKind`] classifies a type as record-like or behavior-like
//! - [`TypeDescriptor`] is the complete declaration of a type
//! - [`Declared`] is implemented by types with a static declaration, usually via
//!   `#[derive(TreeFields)]` or `#[derive(ComponentIO)]`
//!
//! # Example
//!
//! ```rust
//! use fusedwind_core::field::{FieldKind, TypeDescriptor};
//!
//! let rotor = TypeDescriptor::variable_tree("RotorVT")
//!     .var("diameter", FieldKind::Float)
//!     .var("nb", FieldKind::Int);
//!
//! assert!(rotor.list_vars().contains("diameter"));
//! assert!(rotor.validate().is_ok());
//! ```

use crate::errors::{ContractError, ContractResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Floating point type used by the turbine schemas.
pub type FloatValue = f64;

/// Declared type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Float,
    Int,
    Bool,
    Str,
    Enum,
    /// Fixed or variable length numeric array
    Array,
    /// List of arbitrary items (e.g. airfoil names)
    List,
    /// A slot that must be filled by a type satisfying `interface`
    Instance { interface: String },
    /// Anything the kind inference could not classify
    Any,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Float => write!(f, "Float"),
            FieldKind::Int => write!(f, "Int"),
            FieldKind::Bool => write!(f, "Bool"),
            FieldKind::Str => write!(f, "Str"),
            FieldKind::Enum => write!(f, "Enum"),
            FieldKind::Array => write!(f, "Array"),
            FieldKind::List => write!(f, "List"),
            FieldKind::Instance { interface } => write!(f, "Instance({interface})"),
            FieldKind::Any => write!(f, "Any"),
        }
    }
}

/// Role of a field on a behavior-like type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IoType {
    In,
    Out,
}

impl fmt::Display for IoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoType::In => write!(f, "in"),
            IoType::Out => write!(f, "out"),
        }
    }
}

/// Declaration of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field name as seen by other types (e.g. "I_x")
    pub name: String,
    /// Declared type
    pub kind: FieldKind,
    /// Input/output role, `None` for fields of variable trees
    #[serde(default)]
    pub iotype: Option<IoType>,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            iotype: None,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn as_input(mut self) -> Self {
        self.iotype = Some(IoType::In);
        self
    }

    pub fn as_output(mut self) -> Self {
        self.iotype = Some(IoType::Out);
        self
    }

    /// Interface name required by this field, if it is an interface slot
    pub fn slot_interface(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Instance { interface } => Some(interface),
            _ => None,
        }
    }
}

/// Classification of a declared type.
///
/// Variable trees are record-like: their fields form one undifferentiated set.
/// Components and assemblies are behavior-like: their fields are partitioned
/// into inputs and outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    VariableTree,
    Component,
    Assembly,
}

impl TypeKind {
    pub fn is_record(&self) -> bool {
        matches!(self, TypeKind::VariableTree)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::VariableTree => write!(f, "VariableTree"),
            TypeKind::Component => write!(f, "Component"),
            TypeKind::Assembly => write!(f, "Assembly"),
        }
    }
}

/// Complete field declaration of a type.
///
/// Descriptors are usually generated by the derive macros, but they can also be
/// assembled with the builder methods or loaded from TOML for types that are
/// defined at runtime.
///
/// # Example
///
/// ```rust
/// use fusedwind_core::field::{FieldKind, TypeDescriptor};
///
/// let aero = TypeDescriptor::component("AeroBase")
///     .input("wind_speed", FieldKind::Float)
///     .output("power", FieldKind::Float);
///
/// assert_eq!(aero.list_inputs().len(), 1);
/// assert!(aero.list_outputs().contains("power"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Type name, the interface of the type is derived from it
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fields: Vec::new(),
        }
    }

    /// Create an empty record-like declaration
    pub fn variable_tree(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::VariableTree)
    }

    /// Create an empty behavior-like declaration
    pub fn component(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Component)
    }

    pub fn assembly(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Assembly)
    }

    /// Add a field, returns self for method chaining.
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a field without an input/output role
    pub fn var(self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.field(FieldDefinition::new(name, kind))
    }

    pub fn input(self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.field(FieldDefinition::new(name, kind).as_input())
    }

    pub fn output(self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.field(FieldDefinition::new(name, kind).as_output())
    }

    pub fn is_record(&self) -> bool {
        self.kind.is_record()
    }

    /// Get a field by name
    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of all declared fields
    pub fn list_vars(&self) -> BTreeSet<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Names of the declared inputs
    pub fn list_inputs(&self) -> BTreeSet<&str> {
        self.with_iotype(IoType::In)
    }

    /// Names of the declared outputs
    pub fn list_outputs(&self) -> BTreeSet<&str> {
        self.with_iotype(IoType::Out)
    }

    fn with_iotype(&self, iotype: IoType) -> BTreeSet<&str> {
        self.fields
            .iter()
            .filter(|f| f.iotype == Some(iotype))
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Check that the declaration is well formed.
    ///
    /// Field names must be unique and non-empty. Fields of variable trees must
    /// not carry an input/output role, while every field of a component or
    /// assembly must have one.
    pub fn validate(&self) -> ContractResult<()> {
        let invalid = |details: String| ContractError::InvalidDeclaration {
            type_name: self.name.clone(),
            details,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("the type name is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(invalid("a field has an empty name".to_string()));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(invalid(format!("field '{}' is declared twice", field.name)));
            }
            match (self.is_record(), field.iotype) {
                (true, Some(iotype)) => {
                    return Err(invalid(format!(
                        "field '{}' of a variable tree cannot have iotype '{}'",
                        field.name, iotype
                    )))
                }
                (false, None) => {
                    return Err(invalid(format!(
                        "field '{}' of a {} must be an input or an output",
                        field.name, self.kind
                    )))
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Parse and validate a declaration from a TOML document
    pub fn from_toml_str(content: &str) -> ContractResult<Self> {
        let descriptor: TypeDescriptor =
            toml::from_str(content).map_err(|e| ContractError::Config(e.to_string()))?;
        descriptor.validate()?;
        Ok(descriptor)
    }
}

/// Types whose fields are known statically.
///
/// Implemented by `#[derive(TreeFields)]` and `#[derive(ComponentIO)]`.
pub trait Declared {
    /// Returns the field declaration of the type
    fn declaration() -> TypeDescriptor;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blade() -> TypeDescriptor {
        TypeDescriptor::variable_tree("BladeVT")
            .var("length", FieldKind::Float)
            .var("mass", FieldKind::Float)
            .var("airfoils", FieldKind::List)
    }

    #[test]
    fn test_list_vars_is_sorted() {
        let blade = blade();
        let vars: Vec<&str> = blade.list_vars().into_iter().collect();
        assert_eq!(vars, vec!["airfoils", "length", "mass"]);
    }

    #[test]
    fn test_inputs_and_outputs_are_disjoint() {
        let desc = TypeDescriptor::component("Aero")
            .input("wind_speed", FieldKind::Float)
            .input("rpm", FieldKind::Float)
            .output("thrust", FieldKind::Float);

        assert_eq!(
            desc.list_inputs(),
            BTreeSet::from(["rpm", "wind_speed"])
        );
        assert_eq!(desc.list_outputs(), BTreeSet::from(["thrust"]));
        assert_eq!(desc.list_vars().len(), 3);
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        assert!(blade().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_field() {
        let desc = blade().var("mass", FieldKind::Float);
        let err = desc.validate().unwrap_err();
        assert!(err.to_string().contains("'mass' is declared twice"));
    }

    #[test]
    fn test_validate_rejects_iotype_on_variable_tree() {
        let desc = blade().input("rpm", FieldKind::Float);
        assert!(matches!(
            desc.validate(),
            Err(ContractError::InvalidDeclaration { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_component_field_without_role() {
        let desc = TypeDescriptor::component("Aero").var("rpm", FieldKind::Float);
        let err = desc.validate().unwrap_err();
        assert!(err.to_string().contains("must be an input or an output"));
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let desc = TypeDescriptor::variable_tree("  ");
        assert!(desc.validate().is_err());
    }

    #[test]
    fn test_field_kind_display() {
        assert_eq!(FieldKind::Float.to_string(), "Float");
        assert_eq!(
            FieldKind::Instance {
                interface: "IRotorVT".to_string()
            }
            .to_string(),
            "Instance(IRotorVT)"
        );
    }

    #[test]
    fn test_descriptor_from_toml() {
        let desc = TypeDescriptor::from_toml_str(
            r#"
            name = "GeneratorVT"
            kind = "VariableTree"

            [[fields]]
            name = "power"
            kind = "Float"
            description = "Generator power"

            [[fields]]
            name = "efficiency"
            kind = "Float"
            "#,
        )
        .unwrap();

        assert_eq!(desc.name, "GeneratorVT");
        assert_eq!(desc.list_vars(), BTreeSet::from(["efficiency", "power"]));
        assert_eq!(desc.get("power").unwrap().description, "Generator power");
    }

    #[test]
    fn test_descriptor_from_toml_is_validated() {
        let result = TypeDescriptor::from_toml_str(
            r#"
            name = "Aero"
            kind = "Component"

            [[fields]]
            name = "rpm"
            kind = "Float"
            "#,
        );
        assert!(matches!(
            result,
            Err(ContractError::InvalidDeclaration { .. })
        ));
    }

    #[test]
    fn test_descriptor_from_invalid_toml() {
        let result = TypeDescriptor::from_toml_str("name = ");
        assert!(matches!(result, Err(ContractError::Config(_))));
    }

    #[test]
    fn test_descriptor_serialization() {
        let desc = TypeDescriptor::component("Aero")
            .input("wind_speed", FieldKind::Float)
            .output("power", FieldKind::Float);
        let json = serde_json::to_string(&desc).unwrap();
        let deserialized: TypeDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, desc);
    }
}
