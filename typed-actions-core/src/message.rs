//! Plain messages produced by action descriptors

use crate::action::ActionType;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// Anything carrying an action type tag that a reducer can match on
pub trait Message {
    /// The type tag of this message
    fn action_type(&self) -> &ActionType;

    /// Optional free-form metadata
    fn meta(&self) -> Option<&str>;

    /// Whether this message reports an error
    fn is_error(&self) -> bool;
}

/// A message as consumed by a reducer: type tag, payload and metadata
///
/// Serializes as `{ "type": ..., "payload": ..., "meta": ..., "error": ... }`
/// with `meta` omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlainMessage<P> {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub payload: P,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    #[serde(default)]
    pub error: bool,
}

impl<P> PlainMessage<P> {
    /// Attach metadata
    pub fn with_meta(mut self, meta: impl Into<String>) -> Self {
        self.meta = Some(meta.into());
        self
    }

    /// Override the error flag
    pub fn with_error(mut self, error: bool) -> Self {
        self.error = error;
        self
    }

    /// Transform the payload, keeping tag and metadata
    pub fn map_payload<Q>(self, f: impl FnOnce(P) -> Q) -> PlainMessage<Q> {
        PlainMessage {
            action_type: self.action_type,
            payload: f(self.payload),
            meta: self.meta,
            error: self.error,
        }
    }

    /// Erase the payload type so messages of different shapes can share a queue
    pub fn erase(self) -> AnyMessage
    where
        P: Any + Send,
    {
        AnyMessage {
            action_type: self.action_type,
            payload: Box::new(self.payload),
            payload_type: std::any::type_name::<P>(),
            meta: self.meta,
            error: self.error,
        }
    }
}

impl<P> Message for PlainMessage<P> {
    fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    fn meta(&self) -> Option<&str> {
        self.meta.as_deref()
    }

    fn is_error(&self) -> bool {
        self.error
    }
}

/// A message whose payload type has been erased
///
/// Recover the typed form with
/// [`ActionDescriptor::downcast`](crate::ActionDescriptor::downcast).
pub struct AnyMessage {
    action_type: ActionType,
    payload: Box<dyn Any + Send>,
    payload_type: &'static str,
    meta: Option<String>,
    error: bool,
}

impl AnyMessage {
    /// Check whether the payload is of type `P`
    pub fn payload_is<P: Any>(&self) -> bool {
        self.payload.is::<P>()
    }

    /// Borrow the payload as `P`, if that is its type
    pub fn payload_ref<P: Any>(&self) -> Option<&P> {
        self.payload.downcast_ref::<P>()
    }

    /// Name of the erased payload type, for diagnostics
    pub fn payload_type_name(&self) -> &'static str {
        self.payload_type
    }

    /// Restore the typed message, or give the message back untouched
    pub(crate) fn into_typed<P: Any>(self) -> Result<PlainMessage<P>, AnyMessage> {
        if !self.payload_is::<P>() {
            return Err(self);
        }

        let AnyMessage {
            action_type,
            payload,
            payload_type,
            meta,
            error,
        } = self;

        match payload.downcast::<P>() {
            Ok(payload) => Ok(PlainMessage {
                action_type,
                payload: *payload,
                meta,
                error,
            }),
            Err(payload) => Err(AnyMessage {
                action_type,
                payload,
                payload_type,
                meta,
                error,
            }),
        }
    }
}

impl fmt::Debug for AnyMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyMessage")
            .field("action_type", &self.action_type)
            .field("payload", &format_args!("<{}>", self.payload_type))
            .field("meta", &self.meta)
            .field("error", &self.error)
            .finish()
    }
}

impl Message for AnyMessage {
    fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    fn meta(&self) -> Option<&str> {
        self.meta.as_deref()
    }

    fn is_error(&self) -> bool {
        self.error
    }
}

/// Builds a message from a tag, payload, optional metadata and an optional
/// error override
pub type MessageConstructor<P> =
    fn(&ActionType, P, Option<String>, Option<bool>) -> PlainMessage<P>;

/// Constructor for ordinary messages: `error` defaults to `false`
pub fn plain_message<P>(
    action_type: &ActionType,
    payload: P,
    meta: Option<String>,
    error: Option<bool>,
) -> PlainMessage<P> {
    PlainMessage {
        action_type: action_type.clone(),
        payload,
        meta,
        error: error.unwrap_or(false),
    }
}

/// Constructor for failure messages: `error` defaults to `true`
pub fn failure_message<P>(
    action_type: &ActionType,
    payload: P,
    meta: Option<String>,
    error: Option<bool>,
) -> PlainMessage<P> {
    PlainMessage {
        action_type: action_type.clone(),
        payload,
        meta,
        error: error.unwrap_or(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Symbol;

    fn tag(name: &str) -> ActionType {
        ActionType::from(name)
    }

    #[test]
    fn test_constructor_defaults() {
        let msg = plain_message(&tag("Load"), 1, None, None);
        assert!(!msg.error);
        assert_eq!(msg.meta, None);

        let msg = failure_message(&tag("Load Failure"), 503, None, None);
        assert!(msg.error);

        let msg = failure_message(&tag("Load Failure"), 503, Some("retry".into()), Some(false));
        assert!(!msg.error);
        assert_eq!(msg.meta.as_deref(), Some("retry"));
    }

    #[test]
    fn test_builder_methods() {
        let msg = plain_message(&tag("Save"), "doc", None, None)
            .with_meta("autosave")
            .with_error(true);
        assert_eq!(msg.meta(), Some("autosave"));
        assert!(msg.is_error());
    }

    #[test]
    fn test_map_payload() {
        let msg = plain_message(&tag("Count"), 2, Some("m".into()), None);
        let mapped = msg.map_payload(|n| n.to_string());
        assert_eq!(mapped.payload, "2");
        assert_eq!(mapped.action_type, "Count");
        assert_eq!(mapped.meta.as_deref(), Some("m"));
    }

    #[test]
    fn test_serialize_shape() {
        let msg = plain_message(&tag("Add Todo"), "milk", None, None);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "Add Todo", "payload": "milk", "error": false })
        );

        let msg = msg.with_meta("m");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["meta"], "m");
    }

    #[test]
    fn test_deserialize_defaults() {
        let msg: PlainMessage<u32> =
            serde_json::from_str(r#"{ "type": "Tick", "payload": 3 }"#).unwrap();
        assert_eq!(msg.action_type, "Tick");
        assert_eq!(msg.payload, 3);
        assert!(!msg.error);
        assert_eq!(msg.meta, None);
    }

    #[test]
    fn test_erase_and_restore() {
        let msg = plain_message(&tag("Open"), vec![1u8, 2], None, None);
        let erased = msg.clone().erase();

        assert!(erased.payload_is::<Vec<u8>>());
        assert!(!erased.payload_is::<String>());
        assert_eq!(erased.payload_ref::<Vec<u8>>(), Some(&vec![1u8, 2]));
        assert_eq!(erased.action_type(), &tag("Open"));

        let erased = erased.into_typed::<String>().unwrap_err();
        let restored = erased.into_typed::<Vec<u8>>().unwrap();
        assert_eq!(restored, msg);
    }

    #[test]
    fn test_any_message_debug_hides_payload() {
        let erased = plain_message(&ActionType::from(Symbol::new("Ping")), 7u32, None, None).erase();
        let debug = format!("{:?}", erased);
        assert!(debug.contains("AnyMessage"));
        assert!(debug.contains("<u32>"));
    }
}
