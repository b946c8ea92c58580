//! Variable trees describing the physical structure of a wind turbine.
//!
//! Every tree is declared as a base at compile time, so once
//! [`CONTRACT_REGISTRY.load_static()`](fusedwind_core::registry::ContractRegistry::load_static)
//! has run, types extending these trees can be declared with `implement_base!`
//! and the interfaces (`IRotorVT`, `IBladeVT`, ...) can be used as slots.
//!
//! | Tree | Fields |
//! |------|--------|
//! | [`WindTurbineDescriptionVT`] | turbine_name, docs |
//! | [`RotorVT`] | hub_height, nb, tilt_angle, cone_angle, diameter, mass, overhang |
//! | [`BladeVT`] | length, mass, I_x, I_y, root_chord, max_chord, tip_chord, airfoils |
//! | [`HubVT`] | diameter, mass, I_x, I_y, CM |
//! | [`NacelleVT`] | mass, I_x, I_y, CM |
//! | [`GeneratorVT`] | mass, I_x, I_y, power, efficiency |
//! | [`TransmissionVT`] | gear_ratio |
//! | [`TowerVT`] | height, bottom_diameter, top_diameter, mass |

mod description;
mod nacelle;
mod rotor;
mod tower;

pub use description::{WindTurbineDescriptionVT, DEFAULT_TURBINE_NAME};
pub use nacelle::{GeneratorVT, NacelleVT, TransmissionVT};
pub use rotor::{BladeVT, HubVT, RotorVT};
pub use tower::TowerVT;

use fusedwind_core::errors::ContractResult;
use fusedwind_core::field::{Declared, TypeDescriptor};
use fusedwind_core::interface::Interface;
use fusedwind_core::registry::ContractRegistry;
use log::debug;

/// Declarations of all turbine structure trees
pub fn schemas() -> Vec<TypeDescriptor> {
    vec![
        WindTurbineDescriptionVT::declaration(),
        RotorVT::declaration(),
        BladeVT::declaration(),
        HubVT::declaration(),
        NacelleVT::declaration(),
        GeneratorVT::declaration(),
        TransmissionVT::declaration(),
        TowerVT::declaration(),
    ]
}

/// Declare every turbine structure tree as a base in `registry`
pub fn register_schemas(registry: &ContractRegistry) -> ContractResult<Vec<Interface>> {
    let interfaces = schemas()
        .iter()
        .map(|schema| registry.base(schema))
        .collect::<ContractResult<Vec<_>>>()?;
    debug!("Registered {} turbine structure schemas", interfaces.len());
    Ok(interfaces)
}
