//! Action type tags and action descriptors
//!
//! An [`ActionDescriptor`] bundles a unique [`ActionType`] with everything
//! needed to build and recognise messages of that type:
//!
//! - [`get`](ActionDescriptor::get) / [`strict_get`](ActionDescriptor::strict_get)
//!   build a [`PlainMessage`]
//! - [`is`](ActionDescriptor::is) checks whether a message carries this tag
//! - [`cast`](ActionDescriptor::cast) passes a message through unchanged
//! - [`downcast`](ActionDescriptor::downcast) recovers a typed message from an
//!   [`AnyMessage`]
//!
//! # Example
//!
//! ```
//! use typed_actions_core::{define, TypeRegistry};
//!
//! let registry = TypeRegistry::new();
//! let add_todo = define::<String>(&registry, "Add Todo");
//!
//! let msg = add_todo.get("buy milk".to_string());
//! assert!(add_todo.is(&msg));
//! assert_eq!(msg.action_type, "Add Todo");
//! assert_eq!(add_todo.debug_name(), "Add_Todo");
//! ```

use crate::error::Result;
use crate::message::{plain_message, AnyMessage, Message, MessageConstructor, PlainMessage};
use crate::registry::{Phase, TypeRegistry};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

/// A process-unique tag
///
/// Two symbols are equal only if they come from the same [`Symbol::new`]
/// call (or clones of it), even when their descriptions match.
#[derive(Clone)]
pub struct Symbol {
    id: u64,
    description: Arc<str>,
}

impl Symbol {
    /// Create a new symbol, distinct from every other symbol in the process
    pub fn new(description: impl Into<Arc<str>>) -> Self {
        Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: description.into(),
        }
    }

    /// The description given at creation
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The process-unique id
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})#{}", self.description, self.id)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}

/// The value placed in a message's `type` field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// A canonical name, usually computed by a [`TypeRegistry`]
    Name(Arc<str>),
    /// A process-unique symbol; never equal to any name
    Symbol(Symbol),
}

impl ActionType {
    /// The canonical name, if this is a string tag
    pub fn as_name(&self) -> Option<&str> {
        match self {
            ActionType::Name(name) => Some(name),
            ActionType::Symbol(_) => None,
        }
    }

    /// Whether this is a symbol tag
    pub fn is_symbol(&self) -> bool {
        matches!(self, ActionType::Symbol(_))
    }

    /// Identifier-safe rendering of this tag, for diagnostics
    ///
    /// Every character other than an ASCII letter, digit or `_` becomes `_`.
    /// Symbols render as `SymbolAction_<description>`.
    pub fn debug_name(&self) -> String {
        match self {
            ActionType::Name(name) => sanitize_identifier(name),
            ActionType::Symbol(symbol) => {
                sanitize_identifier(&format!("SymbolAction_{}", symbol.description()))
            }
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionType::Name(name) => f.write_str(name),
            ActionType::Symbol(symbol) => fmt::Display::fmt(symbol, f),
        }
    }
}

impl From<&str> for ActionType {
    fn from(name: &str) -> Self {
        ActionType::Name(Arc::from(name))
    }
}

impl From<String> for ActionType {
    fn from(name: String) -> Self {
        ActionType::Name(Arc::from(name))
    }
}

impl From<Symbol> for ActionType {
    fn from(symbol: Symbol) -> Self {
        ActionType::Symbol(symbol)
    }
}

impl PartialEq<str> for ActionType {
    fn eq(&self, other: &str) -> bool {
        self.as_name() == Some(other)
    }
}

impl PartialEq<&str> for ActionType {
    fn eq(&self, other: &&str) -> bool {
        self.as_name() == Some(*other)
    }
}

impl Serialize for ActionType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Symbols have no wire identity; they serialize by description only
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ActionType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(ActionType::from(name))
    }
}

/// Replace every non-word character with `_`
fn sanitize_identifier(input: &str) -> String {
    input
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

/// Builds, recognises and casts messages of one action type
///
/// Descriptors are immutable; cloning shares the tag.
pub struct ActionDescriptor<P> {
    action_type: ActionType,
    debug_name: Arc<str>,
    constructor: MessageConstructor<P>,
}

impl<P> ActionDescriptor<P> {
    /// Create a descriptor for a tag with the given message constructor
    pub fn new(action_type: impl Into<ActionType>, constructor: MessageConstructor<P>) -> Self {
        let action_type = action_type.into();
        let debug_name: Arc<str> = Arc::from(action_type.debug_name());
        tracing::trace!(action = %action_type, debug_name = %debug_name, "Defined action");
        Self {
            action_type,
            debug_name,
            constructor,
        }
    }

    /// The type tag
    pub fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    /// Identifier-safe name derived from the tag
    pub fn debug_name(&self) -> &str {
        &self.debug_name
    }

    /// Whether a message carries this descriptor's tag
    pub fn is<M: Message + ?Sized>(&self, message: &M) -> bool {
        message.action_type() == &self.action_type
    }

    /// Return the message unchanged
    pub fn cast(&self, message: PlainMessage<P>) -> PlainMessage<P> {
        message
    }

    /// Build a message with this tag
    pub fn get(&self, payload: P) -> PlainMessage<P> {
        self.get_with(payload, None, None)
    }

    /// Build a message with metadata and an explicit error flag
    ///
    /// `None` for `error` keeps the descriptor's default.
    pub fn get_with(&self, payload: P, meta: Option<String>, error: Option<bool>) -> PlainMessage<P> {
        (self.constructor)(&self.action_type, payload, meta, error)
    }

    /// Build a message with this tag; identical to [`get`](Self::get)
    ///
    /// Use it where the payload carries meaning, to keep call sites explicit.
    pub fn strict_get(&self, payload: P) -> PlainMessage<P> {
        self.get_with(payload, None, None)
    }

    /// Identical to [`get_with`](Self::get_with)
    pub fn strict_get_with(
        &self,
        payload: P,
        meta: Option<String>,
        error: Option<bool>,
    ) -> PlainMessage<P> {
        self.get_with(payload, meta, error)
    }

    /// Build a message with a default payload
    pub fn empty(&self) -> PlainMessage<P>
    where
        P: Default,
    {
        self.get_with(P::default(), None, None)
    }

    /// Recover a typed message from an erased one
    ///
    /// Fails, handing the message back, when the tag differs or the payload
    /// is not a `P`.
    pub fn downcast(&self, message: AnyMessage) -> std::result::Result<PlainMessage<P>, AnyMessage>
    where
        P: Any,
    {
        if !self.is(&message) {
            return Err(message);
        }
        message.into_typed()
    }
}

impl<P> Clone for ActionDescriptor<P> {
    fn clone(&self) -> Self {
        Self {
            action_type: self.action_type.clone(),
            debug_name: Arc::clone(&self.debug_name),
            constructor: self.constructor,
        }
    }
}

impl<P> fmt::Debug for ActionDescriptor<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(&self.debug_name)
            .field(&self.action_type)
            .finish()
    }
}

impl<P> PartialEq for ActionDescriptor<P> {
    fn eq(&self, other: &Self) -> bool {
        self.action_type == other.action_type
    }
}

impl<P> Eq for ActionDescriptor<P> {}

/// Define a string-tagged action
///
/// The canonical name is `name` plus the registry's `empty` suffix. Nothing is
/// registered: defining the same name twice gives two descriptors that
/// recognise each other's messages.
pub fn define<P>(registry: &TypeRegistry, name: &str) -> ActionDescriptor<P> {
    ActionDescriptor::new(registry.type_name(name, Phase::Empty), plain_message::<P>)
}

/// Define a string-tagged action and claim its canonical name
///
/// Fails with [`RegistryError::DuplicateName`](crate::RegistryError::DuplicateName)
/// if the name was already claimed in this registry.
pub fn define_unique<P>(registry: &mut TypeRegistry, name: &str) -> Result<ActionDescriptor<P>> {
    registry.register_type_name(name, Phase::Empty)?;
    Ok(define(registry, name))
}

/// Define a symbol-tagged action
///
/// The tag is a fresh [`Symbol`], so it never collides with any other action
/// and needs no registry.
pub fn define_symbol<P>(name: &str) -> ActionDescriptor<P> {
    ActionDescriptor::new(Symbol::new(name), plain_message::<P>)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use crate::message::failure_message;

    #[test]
    fn test_debug_name_sanitized() {
        let tag = ActionType::from("A long name with 4ll [characters]");
        assert_eq!(tag.debug_name(), "A_long_name_with_4ll__characters_");

        let tag = ActionType::from("A simple action");
        assert_eq!(tag.debug_name(), "A_simple_action");
    }

    #[test]
    fn test_debug_name_symbol() {
        let tag = ActionType::from(Symbol::new("My action"));
        assert_eq!(tag.debug_name(), "SymbolAction_My_action");
    }

    #[test]
    fn test_debug_name_non_ascii() {
        let tag = ActionType::from("caf\u{e9}/load");
        assert_eq!(tag.debug_name(), "caf__load");
    }

    #[test]
    fn test_symbols_are_unique() {
        let a = Symbol::new("same");
        let b = Symbol::new("same");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_ne!(ActionType::from(a.clone()), ActionType::from("same"));
        assert_eq!(a.to_string(), "Symbol(same)");
    }

    #[test]
    fn test_action_type_str_eq() {
        let tag = ActionType::from("Load");
        assert_eq!(tag, "Load");
        assert!(tag != "Save");
        assert_eq!(tag.as_name(), Some("Load"));
        assert!(!tag.is_symbol());
    }

    #[test]
    fn test_descriptor_properties() {
        let descriptor = ActionDescriptor::new("sample", plain_message::<()>);
        assert_eq!(descriptor.action_type(), &ActionType::from("sample"));
        assert_eq!(descriptor.debug_name(), "sample");
        assert_eq!(format!("{:?}", descriptor), "sample(Name(\"sample\"))");
    }

    #[test]
    fn test_define() {
        let registry = TypeRegistry::new();
        let simple = define::<String>(&registry, "Simple Action");

        assert_eq!(simple.action_type(), &ActionType::from("Simple Action"));

        let msg = simple.get("test".to_string());
        assert_eq!(msg.action_type, *simple.action_type());
        assert_eq!(msg.payload, "test");
        assert_eq!(msg.meta, None);
        assert!(!msg.error);

        assert_eq!(simple.strict_get("test".to_string()), msg);
        assert!(simple.is(&msg));
        assert_eq!(simple.cast(msg.clone()), msg);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_define_same_name_twice() {
        let registry = TypeRegistry::new();
        let first = define::<u32>(&registry, "N");
        let second = define::<u32>(&registry, "N");

        assert_eq!(first, second);
        assert!(first.is(&second.get(7)));
        assert!(second.is(&first.get(7)));
    }

    #[test]
    fn test_define_unique_duplicate() {
        let mut registry = TypeRegistry::new();
        define_unique::<()>(&mut registry, "Once").unwrap();
        let err = define_unique::<()>(&mut registry, "Once").unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName { ref name } if name == "Once"));

        // Unclaimed definitions are unaffected
        assert_eq!(define::<()>(&registry, "Once").action_type(), "Once");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_define_empty_name() {
        let mut registry = TypeRegistry::new();
        let blank = define::<()>(&registry, "");
        assert_eq!(blank.action_type(), "");
        assert_eq!(blank.debug_name(), "");
        assert!(blank.is(&blank.get(())));

        define_unique::<()>(&mut registry, "").unwrap();
        assert!(registry.is_registered(""));
    }

    #[test]
    fn test_is_without_debug_payload() {
        struct Opaque(u8);

        let registry = TypeRegistry::new();
        let opaque = define::<Opaque>(&registry, "Opaque");
        let msg = opaque.get(Opaque(1));
        assert!(opaque.is(&msg));
        assert_eq!(opaque.cast(msg).payload.0, 1);
    }

    #[test]
    fn test_is_rejects_other_types() {
        let registry = TypeRegistry::new();
        let load = define::<u32>(&registry, "Load");
        let save = define::<String>(&registry, "Save");

        let msg = save.get("doc".into());
        assert!(!load.is(&msg));
        assert!(save.is(&msg));
    }

    #[test]
    fn test_get_with_meta_and_error() {
        let registry = TypeRegistry::new();
        let load = define::<u32>(&registry, "Load");

        let msg = load.get_with(1, Some("page".into()), Some(true));
        assert_eq!(msg.meta.as_deref(), Some("page"));
        assert!(msg.error);
        assert_eq!(load.strict_get_with(1, Some("page".into()), Some(true)), msg);
    }

    #[test]
    fn test_empty_payload() {
        let ping = define_symbol::<Vec<u8>>("Ping");
        let msg = ping.empty();
        assert!(msg.payload.is_empty());
        assert!(ping.is(&msg));
        assert_eq!(msg, ping.get(Vec::new()));
    }

    #[test]
    fn test_define_symbol() {
        let mut registry = TypeRegistry::new();
        let named = define_unique::<()>(&mut registry, "Reset").unwrap();
        let first = define_symbol::<()>("Reset");
        let second = define_symbol::<()>("Reset");

        assert!(first.action_type().is_symbol());
        assert_eq!(first.debug_name(), "SymbolAction_Reset");
        assert_ne!(first, second);
        assert!(!first.is(&second.get(())));
        assert!(!named.is(&first.get(())));
        // Symbols stay out of the registry
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_custom_constructor() {
        let descriptor = ActionDescriptor::new("Crash", failure_message::<&str>);
        assert!(descriptor.get("boom").error);
        assert!(!descriptor.get_with("boom", None, Some(false)).error);
    }

    #[test]
    fn test_downcast() {
        let registry = TypeRegistry::new();
        let load = define::<u32>(&registry, "Load");
        let save = define::<String>(&registry, "Save");

        let erased = load.get(7).erase();
        let erased = save.downcast(erased).unwrap_err();
        let msg = load.downcast(erased).unwrap();
        assert_eq!(msg.payload, 7);

        // Same tag, wrong payload type
        let forged = ActionDescriptor::new("Load", plain_message::<String>);
        let erased = forged.get("seven".into()).erase();
        assert!(load.downcast(erased).is_err());
    }

    #[test]
    fn test_descriptor_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ActionDescriptor<std::rc::Rc<u8>>>();
    }
}
