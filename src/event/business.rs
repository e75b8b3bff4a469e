use serde_json::{json, Value};

use super::{Event, Fields};

// ============================================================================
// Business Event Capability
// ============================================================================
//
// Events carrying this capability are eligible for replication to the
// external stream. The capability is a trait, not a concrete type: any event
// type may opt in by overriding `Event::as_business`, without being forced
// through one base type.
//
// ============================================================================

/// An event additionally exposing a stable name and flattened attributes.
pub trait BusinessEvent: Event {
    /// The name of the event. An explicit value fixed when the concrete
    /// type is constructed, never derived from the type at runtime.
    fn name(&self) -> &str;

    /// Attributes for the event. Defaults to the event's data map.
    fn attributes(&self) -> &Fields {
        self.data()
    }

    /// The `{name, attributes}` view used wherever the event itself is
    /// serialized.
    fn to_value(&self) -> Value {
        json!({
            "name": self.name(),
            "attributes": self.attributes(),
        })
    }
}

/// Convenience business event: an explicit name over a data map, with
/// `attributes()` delegating to the data.
#[derive(Debug, Clone)]
pub struct TwEvent {
    name: String,
    data: Fields,
    metadata: Fields,
}

impl TwEvent {
    /// The name is required up front; there is no fallback derived from
    /// the type.
    pub fn new(name: impl Into<String>, data: Fields) -> Self {
        Self {
            name: name.into(),
            data,
            metadata: Fields::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

impl Event for TwEvent {
    fn data(&self) -> &Fields {
        &self.data
    }

    fn metadata(&self) -> &Fields {
        &self.metadata
    }

    fn as_business(&self) -> Option<&dyn BusinessEvent> {
        Some(self)
    }
}

impl BusinessEvent for TwEvent {
    fn name(&self) -> &str {
        &self.name
    }
}
