//! Tower structure

use fusedwind_core::declare_base;
use fusedwind_core::field::{Declared, FloatValue, TypeDescriptor};
use fusedwind_core::tree::VariableTree;
use fusedwind_core::TreeFields;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TreeFields)]
#[serde(default)]
pub struct TowerVT {
    #[field(desc = "Tower height")]
    pub height: FloatValue,
    #[field(desc = "Tower bottom diameter")]
    pub bottom_diameter: FloatValue,
    #[field(desc = "Tower top diameter")]
    pub top_diameter: FloatValue,
    #[field(desc = "Tower mass")]
    pub mass: FloatValue,
}

#[typetag::serde]
impl VariableTree for TowerVT {
    fn descriptor(&self) -> TypeDescriptor {
        Self::declaration()
    }
}

declare_base!(TowerVT);
