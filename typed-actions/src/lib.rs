//! typed-actions: strongly-typed action descriptors for Redux-style state
//!
//! Define each action once, get a unique type tag plus helpers to build,
//! recognise and recover its messages. No string constants, no duplicated
//! boilerplate, and a standard start/cancel/success/failure shape for async
//! operations.
//!
//! # Example
//! ```ignore
//! use typed_actions::prelude::*;
//!
//! #[derive(ActionFamily)]
//! struct Actions {
//!     increment: ActionDescriptor<i32>,
//!     #[action(name = "Load Items")]
//!     load: Scenario<(), Vec<String>, u16>,
//! }
//!
//! let mut registry = TypeRegistry::new();
//! let actions = Actions::define(&mut registry)?;
//!
//! let msg = actions.load.success().get(vec!["a".into()]);
//! assert_eq!(msg.action_type, "Load Items Success");
//! ```

// Re-export everything from core
pub use typed_actions_core::*;

// Re-export derive macros
pub use typed_actions_macros::ActionFamily;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use typed_actions_core::{ActionFamily, Definable, Message};

    // Registry
    pub use typed_actions_core::{Phase, RegistryError, SuffixOverrides, SuffixTable, TypeRegistry};

    // Descriptors and messages
    pub use typed_actions_core::{
        define, define_scenario, define_scenario_unique, define_scenario_without_cancel,
        define_scenario_without_cancel_unique, define_symbol, define_unique, ActionDescriptor,
        ActionType, AnyMessage, PlainMessage, Scenario, ScenarioWithoutCancel, Symbol, WithCancel,
        WithoutCancel,
    };

    // Derive macros
    pub use typed_actions_macros::ActionFamily;
}
