//! Message type registry.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::adt_a01::{AdtA01Builder, TRIGGER_EVENT};
use crate::clock::Clock;
use crate::error::{BuildError, Result};
use crate::message::Message;

/// Something that can build a message of one type.
pub trait MessageBuilder: Send + Sync {
    /// Builds a fresh message.
    fn build_message(&self) -> Result<Box<dyn Message>>;
}

/// Selects a builder by trigger event code (`A01`, ...).
///
/// New message types are added with [`MessageFactory::register`]; existing
/// registrations are untouched.
#[derive(Clone, Default)]
pub struct MessageFactory {
    builders: BTreeMap<String, Arc<dyn MessageBuilder>>,
}

impl MessageFactory {
    /// Creates an empty factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a factory with every built-in message type registered.
    pub fn with_defaults(clock: Arc<dyn Clock>) -> Self {
        let mut factory = Self::new();
        factory.register(TRIGGER_EVENT, AdtA01Builder::new(clock));
        factory
    }

    /// Registers a builder, replacing any previous one for the same code.
    pub fn register(&mut self, code: impl Into<String>, builder: impl MessageBuilder + 'static) {
        self.builders.insert(code.into(), Arc::new(builder));
    }

    /// Builds a message for the given trigger event code.
    pub fn create(&self, code: &str) -> Result<Box<dyn Message>> {
        let builder = self
            .builders
            .get(code)
            .ok_or_else(|| BuildError::UnsupportedType {
                code: code.to_string(),
            })?;
        debug!(code, "Creating message");
        builder.build_message()
    }

    /// Returns `true` if a builder is registered for `code`.
    pub fn supports(&self, code: &str) -> bool {
        self.builders.contains_key(code)
    }

    /// Returns the registered codes in sorted order.
    pub fn supported_types(&self) -> Vec<String> {
        self.builders.keys().cloned().collect()
    }
}

impl fmt::Debug for MessageFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageFactory")
            .field("supported_types", &self.supported_types())
            .finish()
    }
}
