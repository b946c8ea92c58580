//! Field declarations, capability interfaces and structural contract checking.
//!
//! Types declare their fields statically through [`field::Declared`]. A type can
//! be declared as a base, which gives it an [`interface::Interface`], and other
//! types can declare that they implement that base. The
//! [`registry::ContractRegistry`] only admits such a declaration when the
//! derived type declares every field of the base.

// Lets the derive macros refer to `::fusedwind_core` from inside this crate.
extern crate self as fusedwind_core;

pub mod config;
pub mod contract;
mod example_components;
pub mod field;
pub mod interface;
#[cfg(feature = "python")]
pub mod python;
pub mod registry;
pub mod tree;

pub mod errors;

// Re-export derive macros for convenience
pub use fusedwind_macros::{ComponentIO, TreeFields};

#[doc(hidden)]
pub mod __private {
    pub use inventory;
}
