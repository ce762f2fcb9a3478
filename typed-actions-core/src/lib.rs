//! Core types for typed-actions
//!
//! This crate builds the message vocabulary of a Redux/Elm-style application:
//! unique action type tags, descriptors that build and recognise messages of
//! each type, and four-phase scenarios for asynchronous operations. It does
//! not dispatch anything itself; the messages it produces are plain values
//! for whatever store or reducer consumes them.
//!
//! # Core Concepts
//!
//! - **TypeRegistry**: computes canonical names from base names and phase
//!   suffixes, and refuses to claim the same name twice
//! - **ActionDescriptor**: builds (`get`), recognises (`is`) and recovers
//!   (`downcast`) messages of one type
//! - **Scenario**: start/cancel/success/failure descriptors sharing a base name
//! - **PlainMessage**: `{ type, payload, meta, error }`
//!
//! # Basic Example
//!
//! ```
//! use typed_actions_core::prelude::*;
//!
//! let mut registry = TypeRegistry::new();
//! let increment = define::<i32>(&registry, "Increment");
//! let load = define_scenario::<String, Vec<String>, u16, ()>(&registry, "Load");
//!
//! let msg = increment.get(1);
//! assert!(increment.is(&msg));
//! assert!(!load.is(&msg));
//!
//! assert_eq!(load.success().action_type(), "Load Success");
//! assert!(load.failure().get(404).error);
//!
//! // Claimed names are unique per registry
//! define_unique::<()>(&mut registry, "Reset").unwrap();
//! assert!(define_unique::<()>(&mut registry, "Reset").is_err());
//! ```
//!
//! # Reducer Pattern
//!
//! Reducers match on the type tag through the descriptors, then recover the
//! typed payload:
//!
//! ```ignore
//! fn reducer(state: &mut State, actions: &Actions, message: AnyMessage) -> bool {
//!     if actions.load.is(&message) {
//!         state.loading = true;
//!         return true;
//!     }
//!     match actions.load.success().downcast(message) {
//!         Ok(done) => {
//!             state.loading = false;
//!             state.items = done.payload;
//!             true
//!         }
//!         Err(_) => false,
//!     }
//! }
//! ```

pub mod action;
pub mod error;
pub mod family;
pub mod message;
pub mod registry;
pub mod scenario;
pub mod testing;

// Core exports
pub use action::{define, define_symbol, define_unique, ActionDescriptor, ActionType, Symbol};
pub use error::{RegistryError, Result};
pub use family::{ActionFamily, Definable};
pub use message::{
    failure_message, plain_message, AnyMessage, Message, MessageConstructor, PlainMessage,
};
pub use registry::{Phase, SuffixOverrides, SuffixTable, TypeRegistry};
pub use scenario::{
    define_scenario, define_scenario_unique, define_scenario_without_cancel,
    define_scenario_without_cancel_unique, Scenario, ScenarioWithoutCancel, WithCancel,
    WithoutCancel,
};

// Testing exports
pub use testing::MessageRecorder;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{
        define, define_symbol, define_unique, ActionDescriptor, ActionType, Symbol,
    };
    pub use crate::error::RegistryError;
    pub use crate::family::{ActionFamily, Definable};
    pub use crate::message::{AnyMessage, Message, PlainMessage};
    pub use crate::registry::{Phase, SuffixOverrides, SuffixTable, TypeRegistry};
    pub use crate::scenario::{
        define_scenario, define_scenario_unique, define_scenario_without_cancel,
        define_scenario_without_cancel_unique, Scenario, ScenarioWithoutCancel, WithCancel,
        WithoutCancel,
    };
}
