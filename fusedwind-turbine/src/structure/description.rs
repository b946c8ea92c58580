//! General description of a wind turbine

use fusedwind_core::declare_base;
use fusedwind_core::field::{Declared, TypeDescriptor};
use fusedwind_core::tree::VariableTree;
use fusedwind_core::TreeFields;
use serde::{Deserialize, Serialize};

/// Default turbine name
pub const DEFAULT_TURBINE_NAME: &str = "FUSED-Wind turbine";

/// Name and human readable documentation of a turbine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TreeFields)]
#[serde(default)]
pub struct WindTurbineDescriptionVT {
    #[field(desc = "Wind turbine name")]
    pub turbine_name: String,
    #[field(desc = "Human readable description of wind turbine")]
    pub docs: String,
}

impl Default for WindTurbineDescriptionVT {
    fn default() -> Self {
        Self {
            turbine_name: DEFAULT_TURBINE_NAME.to_string(),
            docs: String::new(),
        }
    }
}

#[typetag::serde]
impl VariableTree for WindTurbineDescriptionVT {
    fn descriptor(&self) -> TypeDescriptor {
        Self::declaration()
    }
}

declare_base!(WindTurbineDescriptionVT);

#[cfg(test)]
mod tests {
    use super::*;
    use fusedwind_core::field::FieldKind;

    #[test]
    fn test_default_name() {
        let description = WindTurbineDescriptionVT::default();
        assert_eq!(description.turbine_name, "FUSED-Wind turbine");
        assert!(description.docs.is_empty());
    }

    #[test]
    fn test_declaration() {
        let desc = WindTurbineDescriptionVT::declaration();
        assert_eq!(desc.name, "WindTurbineDescriptionVT");
        assert_eq!(desc.fields.len(), 2);
        assert_eq!(desc.get("turbine_name").unwrap().kind, FieldKind::Str);
        assert_eq!(desc.get("docs").unwrap().kind, FieldKind::Str);
    }
}
