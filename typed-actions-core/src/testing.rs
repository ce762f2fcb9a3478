//! Test utilities for code that emits typed actions
//!
//! - [`MessageRecorder`]: collects emitted messages of any payload type
//! - Assertion macros matching messages by descriptor
//!
//! # Example
//!
//! ```
//! use typed_actions_core::testing::MessageRecorder;
//! use typed_actions_core::{assert_dispatched, define, TypeRegistry};
//!
//! let registry = TypeRegistry::new();
//! let increment = define::<u32>(&registry, "Increment");
//!
//! let mut recorder = MessageRecorder::new();
//! recorder.record(increment.get(1));
//!
//! let messages = recorder.drain();
//! assert_dispatched!(messages, increment);
//! ```

use crate::action::ActionDescriptor;
use crate::message::{AnyMessage, Message, PlainMessage};
use std::any::Any;

/// Collects messages emitted by the code under test
///
/// Messages are stored type-erased so different payload types can be
/// recorded in order; typed views are recovered per descriptor.
#[derive(Debug, Default)]
pub struct MessageRecorder {
    messages: Vec<AnyMessage>,
}

impl MessageRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a typed message
    pub fn record<P: Any + Send>(&mut self, message: PlainMessage<P>) {
        self.messages.push(message.erase());
    }

    /// Record an already erased message
    pub fn record_any(&mut self, message: AnyMessage) {
        self.messages.push(message);
    }

    /// All recorded messages, oldest first
    pub fn messages(&self) -> &[AnyMessage] {
        &self.messages
    }

    /// Take every recorded message
    pub fn drain(&mut self) -> Vec<AnyMessage> {
        std::mem::take(&mut self.messages)
    }

    /// Take the messages built by `descriptor`, typed
    ///
    /// Other messages stay in the recorder, in their original order.
    pub fn drain_matching<P: Any>(
        &mut self,
        descriptor: &ActionDescriptor<P>,
    ) -> Vec<PlainMessage<P>> {
        let mut matching = Vec::new();
        let mut remaining = Vec::new();

        for message in self.messages.drain(..) {
            match descriptor.downcast(message) {
                Ok(typed) => matching.push(typed),
                Err(other) => remaining.push(other),
            }
        }

        self.messages = remaining;
        matching
    }

    /// Whether any message built by `descriptor` was recorded
    pub fn has<P>(&self, descriptor: &ActionDescriptor<P>) -> bool {
        self.messages.iter().any(|m| descriptor.is(m))
    }

    /// Whether any recorded message has its error flag set
    pub fn has_error(&self) -> bool {
        self.messages.iter().any(|m| m.is_error())
    }

    /// Number of recorded messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Assert that a message built by a descriptor was dispatched.
///
/// The messages must implement `Debug` so a failure can list them.
///
/// # Example
///
/// ```ignore
/// let messages = recorder.drain();
/// assert_dispatched!(messages, fetch.success());
/// ```
#[macro_export]
macro_rules! assert_dispatched {
    ($messages:expr, $descriptor:expr) => {
        assert!(
            $messages.iter().any(|m| $descriptor.is(m)),
            "Expected a `{}` message to be dispatched, but got: {:?}",
            $descriptor.action_type(),
            $messages
        );
    };
}

/// Assert that no message built by a descriptor was dispatched.
///
/// # Example
///
/// ```ignore
/// let messages = recorder.drain();
/// assert_not_dispatched!(messages, fetch.failure());
/// ```
#[macro_export]
macro_rules! assert_not_dispatched {
    ($messages:expr, $descriptor:expr) => {
        assert!(
            !$messages.iter().any(|m| $descriptor.is(m)),
            "Expected NO `{}` message to be dispatched, but found: {:?}",
            $descriptor.action_type(),
            $messages
                .iter()
                .filter(|m| $descriptor.is(*m))
                .collect::<Vec<_>>()
        );
    };
}

/// Find the first message built by a descriptor.
///
/// # Example
///
/// ```ignore
/// let messages = recorder.drain();
/// let start = find_dispatched!(messages, fetch).unwrap();
/// ```
#[macro_export]
macro_rules! find_dispatched {
    ($messages:expr, $descriptor:expr) => {
        $messages.iter().find(|m| $descriptor.is(*m))
    };
}

/// Count how many messages were built by a descriptor.
///
/// # Example
///
/// ```ignore
/// let messages = recorder.drain();
/// assert_eq!(count_dispatched!(messages, tick), 3);
/// ```
#[macro_export]
macro_rules! count_dispatched {
    ($messages:expr, $descriptor:expr) => {
        $messages.iter().filter(|m| $descriptor.is(*m)).count()
    };
}
