//! Wind turbine structure schemas.
//!
//! The [`structure`] module holds one variable tree per turbine part, each
//! declared as a base. [`turbine::WindTurbineStructure`] assembles them behind
//! interface slots so any tree implementing a part's base can be used in its
//! place.

pub mod structure;
pub mod turbine;

#[cfg(feature = "python")]
pub mod python;

pub use structure::{register_schemas, schemas};
pub use turbine::WindTurbineStructure;
