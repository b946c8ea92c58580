//! Capability interfaces.
//!
//! An [`Interface`] is a nominal marker derived from a declared type: its name
//! is the type name prefixed with [`INTERFACE_PREFIX`]. Every synthesis creates
//! a new marker, so two interfaces created from the same type have the same
//! name but are distinct values. Whether a type satisfies an interface is
//! decided by the declarations held in a
//! [`ContractRegistry`](crate::registry::ContractRegistry), never by the
//! identity of the marker.

use crate::field::{Declared, FieldDefinition, FieldKind, TypeDescriptor};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix added to a type name to form the name of its interface
pub const INTERFACE_PREFIX: &str = "I";

static NEXT_INTERFACE_ID: AtomicU64 = AtomicU64::new(0);

/// Returns the interface name of a type name (e.g. "RotorVT" -> "IRotorVT")
pub fn interface_name(type_name: &str) -> String {
    format!("{INTERFACE_PREFIX}{type_name}")
}

/// Nominal capability marker for a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Interface {
    id: u64,
    name: String,
    source: String,
}

impl Interface {
    /// Synthesise the interface of a statically declared type
    pub fn of<T: Declared>() -> Self {
        interface(&T::declaration())
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Display name of the interface
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the type the interface was synthesised from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether both interfaces describe the same contract.
    ///
    /// Only the names are compared; two syntheses for the same type are
    /// different values but the same contract.
    pub fn same_contract(&self, other: &Interface) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Synthesise a new interface for a declared type.
///
/// # Example
///
/// ```rust
/// use fusedwind_core::field::TypeDescriptor;
/// use fusedwind_core::interface::interface;
///
/// let rotor = TypeDescriptor::variable_tree("RotorVT");
/// let first = interface(&rotor);
/// let second = interface(&rotor);
///
/// assert_eq!(first.name(), "IRotorVT");
/// assert_ne!(first, second);
/// assert!(first.same_contract(&second));
/// ```
pub fn interface(descriptor: &TypeDescriptor) -> Interface {
    Interface {
        id: NEXT_INTERFACE_ID.fetch_add(1, Ordering::Relaxed),
        name: interface_name(&descriptor.name),
        source: descriptor.name.clone(),
    }
}

/// Declare a field that must be filled by a type satisfying the interface of `T`.
///
/// The returned definition can be refined with the usual builder methods.
///
/// ```rust,ignore
/// let slot = interface_instance::<RotorVT>("rotor").with_description("Rotor structure");
/// ```
pub fn interface_instance<T: Declared>(name: impl Into<String>) -> FieldDefinition {
    interface_instance_for(&T::declaration(), name)
}

/// Declare an interface slot for a type known only through its descriptor
pub fn interface_instance_for(
    descriptor: &TypeDescriptor,
    name: impl Into<String>,
) -> FieldDefinition {
    FieldDefinition::new(
        name,
        FieldKind::Instance {
            interface: interface_name(&descriptor.name),
        },
    )
}
