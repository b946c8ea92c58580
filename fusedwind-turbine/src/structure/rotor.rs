//! Rotor, blade and hub structure

use fusedwind_core::declare_base;
use fusedwind_core::field::{Declared, FloatValue, TypeDescriptor};
use fusedwind_core::tree::VariableTree;
use fusedwind_core::TreeFields;
use serde::{Deserialize, Serialize};

/// Overall rotor geometry and mass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TreeFields)]
#[serde(default)]
pub struct RotorVT {
    #[field(desc = "Hub height")]
    pub hub_height: FloatValue,
    #[field(desc = "Number of blades")]
    pub nb: u32,
    #[field(desc = "Tilt angle")]
    pub tilt_angle: FloatValue,
    #[field(desc = "Cone angle")]
    pub cone_angle: FloatValue,
    #[field(desc = "Rotor diameter")]
    pub diameter: FloatValue,
    #[field(desc = "Total mass")]
    pub mass: FloatValue,
    #[field(desc = "Rotor overhang")]
    pub overhang: FloatValue,
}

/// Blade planform, mass properties and airfoils
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TreeFields)]
#[serde(default)]
pub struct BladeVT {
    #[field(desc = "Blade length")]
    pub length: FloatValue,
    #[field(desc = "Blade mass")]
    pub mass: FloatValue,
    #[serde(rename = "I_x")]
    #[field(name = "I_x", desc = "First area moment of inertia")]
    pub i_x: FloatValue,
    #[serde(rename = "I_y")]
    #[field(name = "I_y", desc = "Second area moment of inertia")]
    pub i_y: FloatValue,
    #[field(desc = "Blade root chord")]
    pub root_chord: FloatValue,
    #[field(desc = "Blade maximum chord")]
    pub max_chord: FloatValue,
    #[field(desc = "Blade tip chord")]
    pub tip_chord: FloatValue,
    #[field(desc = "List of airfoil names used on blade")]
    pub airfoils: Vec<String>,
}

/// Hub dimensions and mass properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TreeFields)]
#[serde(default)]
pub struct HubVT {
    #[field(desc = "Hub diameter")]
    pub diameter: FloatValue,
    #[field(desc = "Hub mass")]
    pub mass: FloatValue,
    #[serde(rename = "I_x")]
    #[field(name = "I_x", desc = "First area moment of inertia")]
    pub i_x: FloatValue,
    #[serde(rename = "I_y")]
    #[field(name = "I_y", desc = "Second area moment of inertia")]
    pub i_y: FloatValue,
    #[serde(rename = "CM")]
    #[field(name = "CM", desc = "Center of mass")]
    pub cm: [FloatValue; 3],
}

#[typetag::serde]
impl VariableTree for RotorVT {
    fn descriptor(&self) -> TypeDescriptor {
        Self::declaration()
    }
}

#[typetag::serde]
impl VariableTree for BladeVT {
    fn descriptor(&self) -> TypeDescriptor {
        Self::declaration()
    }
}

#[typetag::serde]
impl VariableTree for HubVT {
    fn descriptor(&self) -> TypeDescriptor {
        Self::declaration()
    }
}

declare_base!(RotorVT);
declare_base!(BladeVT);
declare_base!(HubVT);
