use std::fmt;

use serde_json::{Map, Value};

// ============================================================================
// Event Model
// ============================================================================
//
// The minimal shape callers use to describe something that happened, and the
// capability query the replicating bus uses to find events eligible for
// external replication.
//
// Structure:
// - Event         - base trait: opaque data + metadata maps
// - BusinessEvent - capability: stable name + flattened attributes
// - GenericEvent  - plain data/metadata carrier
// - TwEvent       - convenience business event with an explicit name
//
// ============================================================================

mod business;

pub use business::{BusinessEvent, TwEvent};

/// Untyped key/value fields carried by events and diagnostic entries.
///
/// `serde_json::Map` iterates in a deterministic key order, so anything
/// encoded from it is stable across runs.
pub type Fields = Map<String, Value>;

/// Minimal unit of "something happened": a pair of opaque maps, exposed
/// exactly as supplied at construction. No identity beyond reference; not
/// comparable.
pub trait Event: fmt::Debug + Send + Sync {
    /// The data associated with the event.
    fn data(&self) -> &Fields;

    /// Metadata associated with the event.
    fn metadata(&self) -> &Fields;

    /// Capability query: an event that exposes a stable name and flattened
    /// attributes answers with its business view. Default is no capability.
    fn as_business(&self) -> Option<&dyn BusinessEvent> {
        None
    }
}

/// Plain event carrying only data and metadata. Not eligible for external
/// replication.
#[derive(Debug, Clone, Default)]
pub struct GenericEvent {
    data: Fields,
    metadata: Fields,
}

impl GenericEvent {
    pub fn new(data: Fields, metadata: Fields) -> Self {
        Self { data, metadata }
    }
}

impl Event for GenericEvent {
    fn data(&self) -> &Fields {
        &self.data
    }

    fn metadata(&self) -> &Fields {
        &self.metadata
    }
}
