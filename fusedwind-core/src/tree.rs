//! Variable tree values.
//!
//! [`VariableTree`] is the object-safe counterpart of
//! [`Declared`](crate::field::Declared): it lets a value stored behind
//! `Box<dyn VariableTree>` (an interface slot) report the declaration of its
//! concrete type, and serialises with the concrete type as a tag.

use crate::field::TypeDescriptor;
use std::fmt::Debug;

/// A value of a record-like type.
///
/// Implementations are registered with `typetag`, so `Box<dyn VariableTree>`
/// can be serialised and deserialised:
///
/// ```rust,ignore
/// #[typetag::serde]
/// impl VariableTree for RotorVT {
///     fn descriptor(&self) -> TypeDescriptor {
///         Self::declaration()
///     }
/// }
/// ```
#[typetag::serde(tag = "type")]
pub trait VariableTree: Debug + Send + Sync {
    /// Declaration of the concrete type of this value
    fn descriptor(&self) -> TypeDescriptor;
}
