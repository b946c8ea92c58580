//! Nacelle and drivetrain structure

use fusedwind_core::declare_base;
use fusedwind_core::field::{Declared, FloatValue, TypeDescriptor};
use fusedwind_core::tree::VariableTree;
use fusedwind_core::TreeFields;
use serde::{Deserialize, Serialize};

/// Nacelle mass properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TreeFields)]
#[serde(default)]
pub struct NacelleVT {
    #[field(desc = "Nacelle mass")]
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

/// Generator rating and mass properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TreeFields)]
#[serde(default)]
pub struct GeneratorVT {
    #[field(desc = "Generator mass")]
    pub mass: FloatValue,
    #[serde(rename = "I_x")]
    #[field(name = "I_x", desc = "First area moment of inertia")]
    pub i_x: FloatValue,
    #[serde(rename = "I_y")]
    #[field(name = "I_y", desc = "Second area moment of inertia")]
    pub i_y: FloatValue,
    #[field(desc = "Generator power")]
    pub power: FloatValue,
    #[field(desc = "Generator efficiency")]
    pub efficiency: FloatValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TreeFields)]
#[serde(default)]
pub struct TransmissionVT {
    #[field(desc = "Transmission gear ratio")]
    pub gear_ratio: FloatValue,
}

#[typetag::serde]
impl VariableTree for NacelleVT {
    fn descriptor(&self) -> TypeDescriptor {
        Self::declaration()
    }
}

#[typetag::serde]
impl VariableTree for GeneratorVT {
    fn descriptor(&self) -> TypeDescriptor {
        Self::declaration()
    }
}

#[typetag::serde]
impl VariableTree for TransmissionVT {
    fn descriptor(&self) -> TypeDescriptor {
        Self::declaration()
    }
}

declare_base!(NacelleVT);
declare_base!(GeneratorVT);
declare_base!(TransmissionVT);
