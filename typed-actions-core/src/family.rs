//! Defining a whole vocabulary of actions at once
//!
//! Use `#[derive(ActionFamily)]` from `typed-actions-macros` on a struct whose
//! fields are descriptors and scenarios; the generated
//! [`ActionFamily::define`] defines every field in one call and claims its
//! canonical names, so two families cannot silently share a tag.

use crate::action::{define_unique, ActionDescriptor};
use crate::error::Result;
use crate::registry::TypeRegistry;
use crate::scenario::{
    define_scenario_unique, define_scenario_without_cancel_unique, Scenario, WithCancel,
    WithoutCancel,
};

/// Something that can be defined from a registry and a base name
pub trait Definable: Sized {
    /// Claim the canonical name(s) for `name` and build the value
    fn define_in(registry: &mut TypeRegistry, name: &str) -> Result<Self>;
}

impl<P> Definable for ActionDescriptor<P> {
    fn define_in(registry: &mut TypeRegistry, name: &str) -> Result<Self> {
        define_unique(registry, name)
    }
}

impl<P, S, F, C> Definable for Scenario<P, S, F, WithCancel<C>> {
    fn define_in(registry: &mut TypeRegistry, name: &str) -> Result<Self> {
        define_scenario_unique(registry, name)
    }
}

impl<P, S, F> Definable for Scenario<P, S, F, WithoutCancel> {
    fn define_in(registry: &mut TypeRegistry, name: &str) -> Result<Self> {
        define_scenario_without_cancel_unique(registry, name)
    }
}

/// A struct of action descriptors defined together
///
/// # Example
///
/// ```ignore
/// #[derive(ActionFamily)]
/// #[action(prefix = "Todos/")]
/// struct TodoActions {
///     add: ActionDescriptor<String>,
///     #[action(name = "Fetch")]
///     fetch: Scenario<(), Vec<String>, u16>,
///     #[action(symbol)]
///     reset: ActionDescriptor<()>,
/// }
///
/// let mut registry = TypeRegistry::new();
/// let todos = TodoActions::define(&mut registry)?;
/// assert_eq!(todos.add.action_type(), "Todos/Add");
/// ```
pub trait ActionFamily: Sized {
    /// Define every action in the family
    fn define(registry: &mut TypeRegistry) -> Result<Self>;
}
