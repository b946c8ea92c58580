//! Process-wide registry of base declarations.
//!
//! The registry records which types have been declared as bases and which
//! types implement which interfaces. Declarations are only admitted after the
//! structural check of [`crate::contract`] succeeds, so every edge in the
//! registry satisfies `fields(base) ⊆ fields(derived)`. Because this relation is
//! transitive, a type satisfies every interface reachable from it.
//!
//! # Usage
//!
//! ## Declaring at runtime
//!
//! ```rust
//! use fusedwind_core::field::{FieldKind, TypeDescriptor};
//! use fusedwind_core::registry::ContractRegistry;
//!
//! let registry = ContractRegistry::new();
//!
//! let base = TypeDescriptor::variable_tree("Base")
//!     .var("a", FieldKind::Float)
//!     .var("b", FieldKind::Float);
//! let derived = TypeDescriptor::variable_tree("Derived")
//!     .var("a", FieldKind::Float)
//!     .var("b", FieldKind::Float)
//!     .var("c", FieldKind::Float);
//!
//! registry.base(&base).unwrap();
//! let tag = registry.implement_base(&derived, &base).unwrap();
//!
//! assert_eq!(tag.name(), "IBase");
//! assert!(registry.satisfies("Derived", "IBase"));
//! ```
//!
//! ## Declaring at compile time
//!
//! ```rust,ignore
//! use fusedwind_core::{declare_base, implement_base};
//!
//! declare_base!(RotorVT);
//! implement_base!(DetailedRotorVT: RotorVT);
//!
//! // Later, once during start-up
//! CONTRACT_REGISTRY.load_static()?;
//! ```

use crate::config::ContractConfig;
use crate::contract::compare;
use crate::errors::{ContractError, ContractResult};
use crate::field::{Declared, FieldDefinition, TypeDescriptor};
use crate::interface::{interface, interface_name, Interface};
use log::{debug, warn};
use petgraph::algo::has_path_connecting;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, Reversed};
use std::collections::HashMap;
use std::sync::{LazyLock, RwLock};

/// Association between a type and an interface it implements.
#[derive(Debug, Clone)]
pub struct Implementation {
    pub type_name: String,
    pub interface: Interface,
}

#[derive(Debug, Default)]
struct RegistryState {
    /// Edges point from a derived type to the base it implements
    graph: DiGraph<String, ()>,
    nodes: HashMap<String, NodeIndex>,
    declarations: HashMap<String, TypeDescriptor>,
    /// Interface synthesised when each type was first declared as a base
    interfaces: HashMap<String, Interface>,
    implementations: Vec<Implementation>,
}

impl RegistryState {
    fn node(&mut self, type_name: &str) -> NodeIndex {
        if let Some(index) = self.nodes.get(type_name) {
            return *index;
        }
        let index = self.graph.add_node(type_name.to_string());
        self.nodes.insert(type_name.to_string(), index);
        index
    }

    /// Record a type as a base and return its interface
    fn declare(&mut self, descriptor: &TypeDescriptor) -> Interface {
        self.node(&descriptor.name);

        match self.declarations.get(&descriptor.name) {
            Some(existing) if existing != descriptor => {
                warn!(
                    "Interface {} is already declared by a different {}; the first declaration is kept",
                    interface_name(&descriptor.name),
                    descriptor.name
                );
            }
            Some(_) => {}
            None => {
                debug!("Declared base {}", descriptor.name);
                self.declarations
                    .insert(descriptor.name.clone(), descriptor.clone());
            }
        }

        self.interfaces
            .entry(descriptor.name.clone())
            .or_insert_with(|| interface(descriptor))
            .clone()
    }

    fn implement(&mut self, derived: &TypeDescriptor, base: &TypeDescriptor) -> Interface {
        let tag = self.declare(base);
        let from = self.node(&derived.name);
        let to = self.node(&base.name);

        if self.graph.contains_edge(from, to) {
            debug!("{} already implements {}", derived.name, tag);
        } else {
            debug!("{} implements {}", derived.name, tag);
            self.graph.add_edge(from, to, ());
            self.implementations.push(Implementation {
                type_name: derived.name.clone(),
                interface: tag.clone(),
            });
        }
        tag
    }
}

/// Registry of base declarations and interface implementations.
///
/// The global instance is available as [`CONTRACT_REGISTRY`].
///
/// # Thread Safety
///
/// The state is protected by a `RwLock`. A multi-base declaration is
/// registered under a single write lock, so readers never observe it half done.
pub struct ContractRegistry {
    config: ContractConfig,
    state: RwLock<RegistryState>,
}

impl ContractRegistry {
    /// Create a new empty registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ContractConfig::default())
    }

    pub fn with_config(config: ContractConfig) -> Self {
        Self {
            config,
            state: RwLock::new(RegistryState::default()),
        }
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Declare a type as a base and return its interface.
    ///
    /// Declaring the same type twice returns the interface recorded the first time.
    pub fn base(&self, descriptor: &TypeDescriptor) -> ContractResult<Interface> {
        descriptor.validate()?;
        let mut state = self.state.write().expect("Registry lock poisoned");
        Ok(state.declare(descriptor))
    }

    /// Declare that `derived` implements the interface of `base`.
    ///
    /// The derived type must declare every field of the base, otherwise an
    /// error listing the missing fields is returned and nothing is registered.
    /// On success the derived type is itself declared as a base, and the
    /// interface of `base` is returned.
    pub fn implement_base(
        &self,
        derived: &TypeDescriptor,
        base: &TypeDescriptor,
    ) -> ContractResult<Interface> {
        let mut tags = self.implement_bases(derived, std::slice::from_ref(base))?;
        Ok(tags.remove(0))
    }

    /// Declare that `derived` implements the interfaces of all `bases`.
    ///
    /// Every base is checked against the same declaration of `derived`, in
    /// order, and the first violation is returned. Nothing is registered unless
    /// all checks pass.
    ///
    /// A type that is already declared keeps its first declaration, so the
    /// check is also made against the registered declarations of `derived`
    /// and of each base when they differ from the ones passed in.
    pub fn implement_bases(
        &self,
        derived: &TypeDescriptor,
        bases: &[TypeDescriptor],
    ) -> ContractResult<Vec<Interface>> {
        derived.validate()?;
        for base in bases {
            base.validate()?;
        }

        let mut state = self.state.write().expect("Registry lock poisoned");
        let registered_derived = state.declarations.get(&derived.name).cloned();
        for base in bases {
            self.check_pair(derived, base)?;

            let effective_derived = registered_derived.as_ref().unwrap_or(derived);
            let effective_base = state.declarations.get(&base.name).unwrap_or(base);
            if effective_derived != derived || effective_base != base {
                self.check_pair(effective_derived, effective_base)?;
            }
        }

        state.declare(derived);
        Ok(bases
            .iter()
            .map(|base| state.implement(derived, base))
            .collect())
    }

    fn check_pair(&self, derived: &TypeDescriptor, base: &TypeDescriptor) -> ContractResult<()> {
        compare(derived, base).into_result(self.config.strict_kinds)
    }

    /// Declare a statically declared type as a base
    pub fn declare<T: Declared>(&self) -> ContractResult<Interface> {
        self.base(&T::declaration())
    }

    /// Declare that `D` implements the interface of `B`
    pub fn declare_base<D: Declared, B: Declared>(&self) -> ContractResult<Interface> {
        self.implement_base(&D::declaration(), &B::declaration())
    }

    /// Whether `type_name` satisfies the interface named `interface`.
    ///
    /// A type satisfies its own interface once declared, the interfaces of the
    /// bases it implements, and transitively those of their bases.
    pub fn satisfies(&self, type_name: &str, interface: &str) -> bool {
        let state = self.state.read().expect("Registry lock poisoned");
        let Some(from) = state.nodes.get(type_name) else {
            return false;
        };
        state
            .interfaces
            .iter()
            .filter(|(_, tag)| tag.name() == interface)
            .filter_map(|(source, _)| state.nodes.get(source))
            .any(|to| has_path_connecting(&state.graph, *from, *to, None))
    }

    /// Names of all interfaces satisfied by a type, sorted
    pub fn interfaces_of(&self, type_name: &str) -> Vec<String> {
        let state = self.state.read().expect("Registry lock poisoned");
        let Some(start) = state.nodes.get(type_name) else {
            return Vec::new();
        };

        let mut result = Vec::new();
        let mut bfs = Bfs::new(&state.graph, *start);
        while let Some(index) = bfs.next(&state.graph) {
            if let Some(tag) = state.interfaces.get(&state.graph[index]) {
                result.push(tag.name().to_string());
            }
        }
        result.sort();
        result.dedup();
        result
    }

    /// Names of all types satisfying the interface named `interface`, sorted
    pub fn implementors(&self, interface: &str) -> Vec<String> {
        let state = self.state.read().expect("Registry lock poisoned");
        let reversed = Reversed(&state.graph);

        let mut result = Vec::new();
        for (source, _) in state
            .interfaces
            .iter()
            .filter(|(_, tag)| tag.name() == interface)
        {
            let Some(start) = state.nodes.get(source) else {
                continue;
            };
            let mut bfs = Bfs::new(reversed, *start);
            while let Some(index) = bfs.next(reversed) {
                result.push(state.graph[index].clone());
            }
        }
        result.sort();
        result.dedup();
        result
    }

    /// Check that `candidate` may fill the interface slot `slot`
    pub fn accepts(&self, slot: &FieldDefinition, candidate: &TypeDescriptor) -> ContractResult<()> {
        let interface = slot
            .slot_interface()
            .ok_or_else(|| ContractError::NotASlot(slot.name.clone()))?;

        if self.satisfies(&candidate.name, interface) {
            Ok(())
        } else {
            Err(ContractError::SlotMismatch {
                slot: slot.name.clone(),
                interface: interface.to_string(),
                candidate: candidate.name.clone(),
            })
        }
    }

    /// Get the declaration registered for a type
    pub fn declaration(&self, type_name: &str) -> Option<TypeDescriptor> {
        let state = self.state.read().expect("Registry lock poisoned");
        state.declarations.get(type_name).cloned()
    }

    /// Get the interface synthesised for a declared type
    pub fn interface(&self, type_name: &str) -> Option<Interface> {
        let state = self.state.read().expect("Registry lock poisoned");
        state.interfaces.get(type_name).cloned()
    }

    /// All implementations in registration order
    pub fn implementations(&self) -> Vec<Implementation> {
        let state = self.state.read().expect("Registry lock poisoned");
        state.implementations.clone()
    }

    /// Number of declared types
    pub fn len(&self) -> usize {
        let state = self.state.read().expect("Registry lock poisoned");
        state.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every declaration.
    ///
    /// This is primarily useful for testing.
    pub fn clear(&self) {
        let mut state = self.state.write().expect("Registry lock poisoned");
        *state = RegistryState::default();
    }

    /// Register every declaration submitted with [`declare_base!`] or
    /// [`implement_base!`].
    ///
    /// Returns the number of declarations processed, or the first violation.
    pub fn load_static(&self) -> ContractResult<usize> {
        let mut count = 0;
        for declaration in inventory::iter::<StaticDeclaration> {
            let derived = (declaration.derived)();
            let bases = (declaration.bases)();
            debug!(
                "Loading static declaration of {} from {}",
                derived.name, declaration.module
            );
            if bases.is_empty() {
                self.base(&derived)?;
            } else {
                self.implement_bases(&derived, &bases)?;
            }
            count += 1;
        }
        Ok(count)
    }
}

impl Default for ContractRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global contract registry instance.
pub static CONTRACT_REGISTRY: LazyLock<ContractRegistry> = LazyLock::new(ContractRegistry::new);

/// Declaration submitted at compile time.
///
/// Created by the [`declare_base!`] and [`implement_base!`] macros and
/// registered by [`ContractRegistry::load_static`].
pub struct StaticDeclaration {
    pub derived: fn() -> TypeDescriptor,
    /// Empty when the type is only declared as a base
    pub bases: fn() -> Vec<TypeDescriptor>,
    pub module: &'static str,
}

impl StaticDeclaration {
    pub const fn new(
        derived: fn() -> TypeDescriptor,
        bases: fn() -> Vec<TypeDescriptor>,
        module: &'static str,
    ) -> Self {
        Self {
            derived,
            bases,
            module,
        }
    }
}

inventory::collect!(StaticDeclaration);

/// Declare a type as a base at compile time.
///
/// ```rust,ignore
/// use fusedwind_core::declare_base;
///
/// declare_base!(RotorVT);
/// ```
#[macro_export]
macro_rules! declare_base {
    ($ty:ty) => {
        const _: () = {
            fn declaration() -> $crate::field::TypeDescriptor {
                <$ty as $crate::field::Declared>::declaration()
            }

            fn bases() -> ::std::vec::Vec<$crate::field::TypeDescriptor> {
                ::std::vec::Vec::new()
            }

            $crate::__private::inventory::submit! {
                $crate::registry::StaticDeclaration::new(declaration, bases, module_path!())
            }
        };
    };
}

/// Declare at compile time that a type implements one or more bases.
///
/// ```rust,ignore
/// use fusedwind_core::implement_base;
///
/// implement_base!(DetailedBladeVT: BladeVT);
/// implement_base!(TurbineAero: RotorAero, NacelleLoads);
/// ```
#[macro_export]
macro_rules! implement_base {
    ($derived:ty : $($base:ty),+ $(,)?) => {
        const _: () = {
            fn declaration() -> $crate::field::TypeDescriptor {
                <$derived as $crate::field::Declared>::declaration()
            }

            fn bases() -> ::std::vec::Vec<$crate::field::TypeDescriptor> {
                ::std::vec![$(<$base as $crate::field::Declared>::declaration()),+]
            }

            $crate::__private::inventory::submit! {
                $crate::registry::StaticDeclaration::new(declaration, bases, module_path!())
            }
        };
    };
}
