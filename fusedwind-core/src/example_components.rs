#![allow(dead_code)]

use crate::field::FloatValue;
use crate::{ComponentIO, TreeFields};
use serde::{Deserialize, Serialize};

// ============================================================================
// Components - demonstrate the ComponentIO derive macro pattern
// ============================================================================

/// Base rotor aerodynamics interface
///
/// The macro generates:
/// - `RotorAeroBase::declaration()` with three inputs and two outputs
/// - `RotorAeroBase::INPUTS` / `RotorAeroBase::OUTPUTS`
#[derive(Debug, Default, Serialize, Deserialize, ComponentIO)]
pub(crate) struct RotorAeroBase {
    #[input(desc = "Hub height wind speed")]
    pub wind_speed: FloatValue,
    #[input(desc = "Rotor speed")]
    pub rpm: FloatValue,
    #[input(desc = "Blade pitch angle")]
    pub pitch: FloatValue,
    #[output(desc = "Aerodynamic power")]
    pub power: FloatValue,
    #[output(desc = "Rotor thrust")]
    pub thrust: FloatValue,
}

/// Blade element momentum rotor, a superset of [`RotorAeroBase`]
#[derive(Debug, Default, Serialize, Deserialize, ComponentIO)]
#[component(name = "BEMRotorAero")]
pub(crate) struct BemRotorAero {
    #[input(desc = "Hub height wind speed")]
    pub wind_speed: FloatValue,
    #[input(desc = "Rotor speed")]
    pub rpm: FloatValue,
    #[input(desc = "Blade pitch angle")]
    pub pitch: FloatValue,
    #[input(desc = "Rotor precone angle")]
    pub precone: FloatValue,
    #[output(desc = "Aerodynamic power")]
    pub power: FloatValue,
    #[output(desc = "Rotor thrust")]
    pub thrust: FloatValue,
    #[output(desc = "Rotor torque")]
    pub torque: FloatValue,
    /// Number of blade sections (parameter, not an input or output)
    pub nb_sections: usize,
}

/// Rotor model without pitch control, so it lacks the `pitch` input
#[derive(Debug, Default, Serialize, Deserialize, ComponentIO)]
pub(crate) struct StallRotorAero {
    #[input]
    pub wind_speed: FloatValue,
    #[input]
    pub rpm: FloatValue,
    #[output]
    pub power: FloatValue,
    #[output]
    pub thrust: FloatValue,
}

/// Loads interface sharing no fields with the rotor aerodynamics
#[derive(Debug, Default, Serialize, Deserialize, ComponentIO)]
pub(crate) struct NacelleLoadsBase {
    #[input(desc = "Nacelle yaw angle")]
    pub yaw_angle: FloatValue,
    #[output(name = "M_yaw", desc = "Yaw bearing moment")]
    pub m_yaw: FloatValue,
}

/// Assembly satisfying both [`RotorAeroBase`] and [`NacelleLoadsBase`]
#[derive(Debug, Default, Serialize, Deserialize, ComponentIO)]
#[component(assembly)]
pub(crate) struct TurbineLoadsAssembly {
    #[input]
    pub wind_speed: FloatValue,
    #[input]
    pub rpm: FloatValue,
    #[input]
    pub pitch: FloatValue,
    #[input]
    pub yaw_angle: FloatValue,
    #[output]
    pub power: FloatValue,
    #[output]
    pub thrust: FloatValue,
    #[output(name = "M_yaw")]
    pub m_yaw: FloatValue,
}

// ============================================================================
// Variable trees - demonstrate the TreeFields derive macro pattern
// ============================================================================

/// Base airfoil description
#[derive(Debug, Default, Serialize, Deserialize, TreeFields)]
#[tree(name = "AirfoilVT")]
pub(crate) struct Airfoil {
    #[field(desc = "Airfoil name")]
    pub name: String,
    #[field(desc = "Relative thickness")]
    pub thickness: FloatValue,
}

/// Airfoil with a polar, a superset of [`Airfoil`]
#[derive(Debug, Default, Serialize, Deserialize, TreeFields)]
#[tree(name = "PolarAirfoilVT")]
pub(crate) struct PolarAirfoil {
    pub name: String,
    pub thickness: FloatValue,
    #[field(desc = "Angles of attack")]
    pub alpha: Vec<FloatValue>,
    #[field(name = "Cl", desc = "Lift coefficients")]
    pub cl: Vec<FloatValue>,
    #[field(skip)]
    pub cache: Option<String>,
}

/// Airfoil described only by its name
#[derive(Debug, Default, Serialize, Deserialize, TreeFields)]
pub(crate) struct NamedAirfoil {
    pub name: String,
}

/// Blade with an airfoil slot
#[derive(Debug, Default, Serialize, Deserialize, TreeFields)]
pub(crate) struct SectionVT {
    #[field(desc = "Spanwise position", kind = "Float")]
    pub span: FloatValue,
    #[field(slot = Airfoil, desc = "Section airfoil")]
    pub airfoil: Airfoil,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ContractError;
    use crate::field::{Declared, FieldKind, IoType, TypeKind};
    use crate::interface::Interface;
    use crate::registry::ContractRegistry;

    #[test]
    fn test_component_io_declaration() {
        let desc = RotorAeroBase::declaration();

        assert_eq!(desc.name, "RotorAeroBase");
        assert_eq!(desc.kind, TypeKind::Component);
        assert_eq!(desc.fields.len(), 5);

        let wind = desc.get("wind_speed").unwrap();
        assert_eq!(wind.kind, FieldKind::Float);
        assert_eq!(wind.iotype, Some(IoType::In));
        assert_eq!(wind.description, "Hub height wind speed");

        assert_eq!(desc.get("power").unwrap().iotype, Some(IoType::Out));
        assert!(desc.validate().is_ok());
    }

    #[test]
    fn test_component_io_name_lists() {
        assert_eq!(RotorAeroBase::INPUTS, &["wind_speed", "rpm", "pitch"]);
        assert_eq!(RotorAeroBase::OUTPUTS, &["power", "thrust"]);
        assert_eq!(NacelleLoadsBase::OUTPUTS, &["M_yaw"]);
    }

    #[test]
    fn test_component_parameters_are_not_declared() {
        let desc = BemRotorAero::declaration();
        assert_eq!(desc.name, "BEMRotorAero");
        assert!(desc.get("nb_sections").is_none());
        assert_eq!(desc.list_inputs().len(), 4);
        assert_eq!(desc.list_outputs().len(), 3);
    }

    #[test]
    fn test_assembly_declaration() {
        let desc = TurbineLoadsAssembly::declaration();
        assert_eq!(desc.kind, TypeKind::Assembly);
        assert!(desc.list_inputs().contains("yaw_angle"));
        assert!(desc.list_outputs().contains("M_yaw"));
        assert!(desc.validate().is_ok());
    }

    #[test]
    fn test_tree_fields_declaration() {
        let desc = PolarAirfoil::declaration();

        assert_eq!(desc.name, "PolarAirfoilVT");
        assert_eq!(desc.kind, TypeKind::VariableTree);
        assert_eq!(
            desc.list_vars().into_iter().collect::<Vec<_>>(),
            vec!["Cl", "alpha", "name", "thickness"]
        );
        assert_eq!(desc.get("name").unwrap().kind, FieldKind::Str);
        assert_eq!(desc.get("Cl").unwrap().kind, FieldKind::List);
        assert!(desc.get("cache").is_none());
        assert!(desc.validate().is_ok());
    }

    #[test]
    fn test_tree_fields_slot_and_kind_override() {
        let desc = SectionVT::declaration();
        assert_eq!(desc.get("span").unwrap().kind, FieldKind::Float);

        let airfoil = desc.get("airfoil").unwrap();
        assert_eq!(airfoil.slot_interface(), Some("IAirfoilVT"));
        assert_eq!(airfoil.description, "Section airfoil");
    }

    #[test]
    fn test_interface_of_declared_type() {
        let first = Interface::of::<Airfoil>();
        let second = Interface::of::<Airfoil>();
        assert_eq!(first.name(), "IAirfoilVT");
        assert_eq!(first.name(), second.name());
        assert_ne!(first, second);
    }

    #[test]
    fn test_declare_base_with_superset() {
        let registry = ContractRegistry::new();
        registry.declare::<RotorAeroBase>().unwrap();

        let tag = registry
            .declare_base::<BemRotorAero, RotorAeroBase>()
            .unwrap();
        assert_eq!(tag.name(), "IRotorAeroBase");
        assert!(registry.satisfies("BEMRotorAero", "IRotorAeroBase"));
    }

    #[test]
    fn test_declare_base_missing_input() {
        let registry = ContractRegistry::new();
        let err = registry
            .declare_base::<StallRotorAero, RotorAeroBase>()
            .unwrap_err();

        assert_eq!(
            err,
            ContractError::MissingInputs {
                derived: "StallRotorAero".to_string(),
                base: "RotorAeroBase".to_string(),
                missing: vec!["pitch".to_string()],
            }
        );
        assert!(!registry.satisfies("StallRotorAero", "IRotorAeroBase"));
    }

    #[test]
    fn test_declare_multiple_bases() {
        let registry = ContractRegistry::new();
        let derived = TurbineLoadsAssembly::declaration();
        let bases = [RotorAeroBase::declaration(), NacelleLoadsBase::declaration()];

        let tags = registry.implement_bases(&derived, &bases).unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(
            registry.interfaces_of("TurbineLoadsAssembly"),
            vec!["INacelleLoadsBase", "IRotorAeroBase", "ITurbineLoadsAssembly"]
        );
    }

    #[test]
    fn test_declare_multiple_bases_order_independent() {
        let derived = BemRotorAero::declaration();
        let forward = [RotorAeroBase::declaration(), NacelleLoadsBase::declaration()];
        let backward = [NacelleLoadsBase::declaration(), RotorAeroBase::declaration()];

        let forward_result = ContractRegistry::new().implement_bases(&derived, &forward);
        let backward_result = ContractRegistry::new().implement_bases(&derived, &backward);

        // BEMRotorAero has no yaw_angle input, which is checked before outputs
        let expected = ContractError::MissingInputs {
            derived: "BEMRotorAero".to_string(),
            base: "NacelleLoadsBase".to_string(),
            missing: vec!["yaw_angle".to_string()],
        };
        assert_eq!(forward_result.unwrap_err(), expected);
        assert_eq!(backward_result.unwrap_err(), expected);
    }

    #[test]
    fn test_variable_tree_declarations() {
        let registry = ContractRegistry::new();
        assert!(registry.declare_base::<PolarAirfoil, Airfoil>().is_ok());

        let err = registry
            .declare_base::<NamedAirfoil, Airfoil>()
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("NamedAirfoil"));
        assert!(message.contains("AirfoilVT"));
        assert!(message.contains("thickness"));
    }
}
