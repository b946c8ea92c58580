//! Complete wind turbine structure.
//!
//! [`WindTurbineStructure`] groups one tree per turbine part. Each part is an
//! interface slot: it accepts the base tree itself or any tree declared to
//! implement it, so a detailed blade description can replace [`BladeVT`]
//! without changing the structure.
//!
//! # Example
//!
//! ```toml
//! [description]
//! turbine_name = "DTU 10MW"
//!
//! [rotor]
//! type = "RotorVT"
//! diameter = 178.3
//! nb = 3
//!
//! [tower]
//! type = "TowerVT"
//! height = 115.63
//! ```
//!
//! Parts omitted from the document keep the default value of their base tree.

use crate::structure::{
    BladeVT, GeneratorVT, HubVT, NacelleVT, RotorVT, TowerVT, TransmissionVT,
    WindTurbineDescriptionVT,
};
use fusedwind_core::errors::{ContractError, ContractResult};
use fusedwind_core::field::Declared;
use fusedwind_core::registry::ContractRegistry;
use fusedwind_core::tree::VariableTree;
use fusedwind_core::TreeFields;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, TreeFields)]
#[serde(default)]
pub struct WindTurbineStructure {
    #[field(slot = WindTurbineDescriptionVT, desc = "Wind turbine description")]
    pub description: WindTurbineDescriptionVT,
    #[field(slot = RotorVT, desc = "Rotor structure")]
    pub rotor: Box<dyn VariableTree>,
    #[field(slot = BladeVT, desc = "Blade structure")]
    pub blade: Box<dyn VariableTree>,
    #[field(slot = HubVT, desc = "Hub structure")]
    pub hub: Box<dyn VariableTree>,
    #[field(slot = NacelleVT, desc = "Nacelle structure")]
    pub nacelle: Box<dyn VariableTree>,
    #[field(slot = GeneratorVT, desc = "Generator structure")]
    pub generator: Box<dyn VariableTree>,
    #[field(slot = TransmissionVT, desc = "Transmission structure")]
    pub transmission: Box<dyn VariableTree>,
    #[field(slot = TowerVT, desc = "Tower structure")]
    pub tower: Box<dyn VariableTree>,
}

impl Default for WindTurbineStructure {
    fn default() -> Self {
        Self {
            description: WindTurbineDescriptionVT::default(),
            rotor: Box::new(RotorVT::default()),
            blade: Box::new(BladeVT::default()),
            hub: Box::new(HubVT::default()),
            nacelle: Box::new(NacelleVT::default()),
            generator: Box::new(GeneratorVT::default()),
            transmission: Box::new(TransmissionVT::default()),
            tower: Box::new(TowerVT::default()),
        }
    }
}

impl WindTurbineStructure {
    /// Parse a structure from a TOML document
    pub fn from_toml_str(content: &str) -> ContractResult<Self> {
        toml::from_str(content).map_err(|e| ContractError::Config(e.to_string()))
    }

    /// Read a structure from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> ContractResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ContractError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// The value held by every slot, in declaration order
    pub fn slots(&self) -> Vec<(&'static str, &dyn VariableTree)> {
        vec![
            ("description", &self.description as &dyn VariableTree),
            ("rotor", self.rotor.as_ref()),
            ("blade", self.blade.as_ref()),
            ("hub", self.hub.as_ref()),
            ("nacelle", self.nacelle.as_ref()),
            ("generator", self.generator.as_ref()),
            ("transmission", self.transmission.as_ref()),
            ("tower", self.tower.as_ref()),
        ]
    }

    /// Check that every slot holds a tree satisfying the slot's interface.
    ///
    /// The trees must have been declared in `registry`, either with
    /// [`register_schemas`](crate::structure::register_schemas) or through
    /// [`ContractRegistry::load_static`].
    pub fn validate_slots(&self, registry: &ContractRegistry) -> ContractResult<()> {
        let declaration = Self::declaration();
        for (name, value) in self.slots() {
            let slot = declaration
                .get(name)
                .ok_or_else(|| ContractError::NotASlot(name.to_string()))?;
            let candidate = value.descriptor();
            debug!("Checking slot {} against {}", name, candidate.name);
            registry.accepts(slot, &candidate)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::register_schemas;
    use fusedwind_core::field::TypeDescriptor;

    #[test]
    fn test_declaration_has_one_slot_per_part() {
        let desc = WindTurbineStructure::declaration();
        assert_eq!(desc.fields.len(), 8);
        assert_eq!(desc.get("rotor").unwrap().slot_interface(), Some("IRotorVT"));
        assert_eq!(desc.get("tower").unwrap().slot_interface(), Some("ITowerVT"));
        assert_eq!(
            desc.get("description").unwrap().slot_interface(),
            Some("IWindTurbineDescriptionVT")
        );
    }

    #[test]
    fn test_default_structure_is_valid() {
        let registry = ContractRegistry::new();
        register_schemas(&registry).unwrap();
        assert!(WindTurbineStructure::default().validate_slots(&registry).is_ok());
    }

    #[test]
    fn test_undeclared_trees_are_rejected() {
        let registry = ContractRegistry::new();
        let err = WindTurbineStructure::default()
            .validate_slots(&registry)
            .unwrap_err();
        assert!(matches!(err, ContractError::SlotMismatch { ref slot, .. } if slot == "description"));
    }

    #[test]
    fn test_wrong_tree_in_slot() {
        let registry = ContractRegistry::new();
        register_schemas(&registry).unwrap();

        let structure = WindTurbineStructure {
            tower: Box::new(RotorVT::default()),
            ..Default::default()
        };
        let err = structure.validate_slots(&registry).unwrap_err();
        assert_eq!(
            err,
            ContractError::SlotMismatch {
                slot: "tower".to_string(),
                interface: "ITowerVT".to_string(),
                candidate: "RotorVT".to_string(),
            }
        );
    }

    #[test]
    fn test_from_toml() {
        let structure = WindTurbineStructure::from_toml_str(
            r#"
            [description]
            turbine_name = "DTU 10MW"

            [rotor]
            type = "RotorVT"
            diameter = 178.3
            nb = 3

            [blade]
            type = "BladeVT"
            length = 86.366
            airfoils = ["FFA-W3-241", "FFA-W3-301"]

            [hub]
            type = "HubVT"
            CM = [0.0, 0.0, 2.5]
            "#,
        )
        .unwrap();

        assert_eq!(structure.description.turbine_name, "DTU 10MW");
        let rotor: TypeDescriptor = structure.rotor.descriptor();
        assert_eq!(rotor.name, "RotorVT");
        // Omitted parts keep their defaults
        assert_eq!(structure.tower.descriptor().name, "TowerVT");

        let registry = ContractRegistry::new();
        register_schemas(&registry).unwrap();
        assert!(structure.validate_slots(&registry).is_ok());
    }

    #[test]
    fn test_from_toml_unknown_tree() {
        let result = WindTurbineStructure::from_toml_str(
            r#"
            [rotor]
            type = "PropellerVT"
            "#,
        );
        assert!(matches!(result, Err(ContractError::Config(_))));
    }

    #[test]
    fn test_json_serialization_is_tagged() {
        let structure = WindTurbineStructure::default();
        let json = serde_json::to_value(&structure).unwrap();
        assert_eq!(json["rotor"]["type"], "RotorVT");
        assert_eq!(json["description"]["turbine_name"], "FUSED-Wind turbine");
    }
}
