//! Four-phase action families for asynchronous operations
//!
//! A scenario models an operation that starts and then ends in exactly one of
//! cancel, success or failure. All four descriptors share a base name; their
//! canonical names are the base name plus the registry's phase suffixes.
//!
//! # Example
//!
//! ```
//! use typed_actions_core::{define_scenario, TypeRegistry};
//!
//! let registry = TypeRegistry::new();
//! let fetch = define_scenario::<String, Vec<u8>, u16, ()>(&registry, "Fetch");
//!
//! // The scenario itself builds start messages
//! let start = fetch.get("https://example.com".to_string());
//! assert_eq!(start.action_type, "Fetch");
//!
//! let failed = fetch.failure().get(503);
//! assert_eq!(failed.action_type, "Fetch Failure");
//! assert!(failed.error);
//! assert!(fetch.failure().is(&failed));
//! ```

use crate::action::ActionDescriptor;
use crate::error::Result;
use crate::message::{failure_message, plain_message};
use crate::registry::{Phase, TypeRegistry};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Cancel slot of a scenario that can be cancelled
pub struct WithCancel<C>(ActionDescriptor<C>);

/// Cancel slot of a scenario without a cancel path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WithoutCancel;

impl<C> Clone for WithCancel<C> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<C> fmt::Debug for WithCancel<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

/// Start, cancel, success and failure descriptors sharing one base name
///
/// Derefs to the start descriptor, so `scenario.get(..)` and
/// `scenario.is(..)` act on start messages.
///
/// # Type Parameters
/// * `P` - start payload
/// * `S` - success payload
/// * `F` - failure payload
/// * `K` - [`WithCancel<C>`] for a cancel payload `C`, or [`WithoutCancel`]
pub struct Scenario<P, S, F, K = WithCancel<()>> {
    name: Arc<str>,
    start: ActionDescriptor<P>,
    cancel: K,
    success: ActionDescriptor<S>,
    failure: ActionDescriptor<F>,
}

/// A scenario that cannot be cancelled
pub type ScenarioWithoutCancel<P, S, F> = Scenario<P, S, F, WithoutCancel>;

impl<P, S, F, K> Scenario<P, S, F, K> {
    /// The base name the four canonical names derive from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Descriptor for start messages
    pub fn start(&self) -> &ActionDescriptor<P> {
        &self.start
    }

    /// Descriptor for success messages
    pub fn success(&self) -> &ActionDescriptor<S> {
        &self.success
    }

    /// Descriptor for failure messages; `error` defaults to `true`
    pub fn failure(&self) -> &ActionDescriptor<F> {
        &self.failure
    }
}

impl<P, S, F, C> Scenario<P, S, F, WithCancel<C>> {
    /// Descriptor for cancel messages
    pub fn cancel(&self) -> &ActionDescriptor<C> {
        &self.cancel.0
    }
}

impl<P, S, F, K> Deref for Scenario<P, S, F, K> {
    type Target = ActionDescriptor<P>;

    fn deref(&self) -> &Self::Target {
        &self.start
    }
}

impl<P, S, F, K: Clone> Clone for Scenario<P, S, F, K> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            start: self.start.clone(),
            cancel: self.cancel.clone(),
            success: self.success.clone(),
            failure: self.failure.clone(),
        }
    }
}

impl<P, S, F, K: fmt::Debug> fmt::Debug for Scenario<P, S, F, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("start", &self.start)
            .field("cancel", &self.cancel)
            .field("success", &self.success)
            .field("failure", &self.failure)
            .finish()
    }
}

const WITH_CANCEL: [Phase; 4] = [Phase::Start, Phase::Cancel, Phase::Success, Phase::Failure];
const WITHOUT_CANCEL: [Phase; 3] = [Phase::Start, Phase::Success, Phase::Failure];

/// Define a scenario with start, cancel, success and failure phases
///
/// Canonical names are computed from the registry's current suffixes; none
/// of them is registered.
pub fn define_scenario<P, S, F, C>(
    registry: &TypeRegistry,
    name: &str,
) -> Scenario<P, S, F, WithCancel<C>> {
    tracing::debug!(scenario = %name, "Defined scenario");
    Scenario {
        name: Arc::from(name),
        start: ActionDescriptor::new(registry.type_name(name, Phase::Start), plain_message::<P>),
        cancel: WithCancel(ActionDescriptor::new(
            registry.type_name(name, Phase::Cancel),
            plain_message::<C>,
        )),
        success: ActionDescriptor::new(
            registry.type_name(name, Phase::Success),
            plain_message::<S>,
        ),
        failure: ActionDescriptor::new(
            registry.type_name(name, Phase::Failure),
            failure_message::<F>,
        ),
    }
}

/// Define a scenario with start, success and failure phases only
///
/// The cancel name is never computed.
pub fn define_scenario_without_cancel<P, S, F>(
    registry: &TypeRegistry,
    name: &str,
) -> ScenarioWithoutCancel<P, S, F> {
    tracing::debug!(scenario = %name, "Defined scenario without cancel");
    Scenario {
        name: Arc::from(name),
        start: ActionDescriptor::new(registry.type_name(name, Phase::Start), plain_message::<P>),
        cancel: WithoutCancel,
        success: ActionDescriptor::new(
            registry.type_name(name, Phase::Success),
            plain_message::<S>,
        ),
        failure: ActionDescriptor::new(
            registry.type_name(name, Phase::Failure),
            failure_message::<F>,
        ),
    }
}

/// Define a scenario and claim all four canonical names
///
/// If any of them is already claimed, nothing is registered.
pub fn define_scenario_unique<P, S, F, C>(
    registry: &mut TypeRegistry,
    name: &str,
) -> Result<Scenario<P, S, F, WithCancel<C>>> {
    registry.register_family(name, &WITH_CANCEL)?;
    Ok(define_scenario(registry, name))
}

/// Define a scenario without cancel and claim its three canonical names
///
/// The cancel name stays free.
pub fn define_scenario_without_cancel_unique<P, S, F>(
    registry: &mut TypeRegistry,
    name: &str,
) -> Result<ScenarioWithoutCancel<P, S, F>> {
    registry.register_family(name, &WITHOUT_CANCEL)?;
    Ok(define_scenario_without_cancel(registry, name))
}
