use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::event::Event;

// ============================================================================
// Dispatch Abstraction
// ============================================================================
//
// The single-method contract every bus implements, plus the two concrete
// buses this crate ships: a minimal in-process dispatcher and the
// stream-replicating decorator that wraps any other bus.
//
// ============================================================================

mod local;
mod replicating;

pub use local::{EventHandler, InProcessBus};
pub use replicating::ReplicatingEventBus;

/// Single dispatch contract: publish one event.
///
/// Events travel as `Arc<dyn Event>` so a decorator can forward the original
/// allocation untouched and implementations may retain references without
/// copying.
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Publish an event. Errors are the implementation's own; a decorator
    /// wrapping this bus passes them through unmodified.
    async fn publish(&self, event: Arc<dyn Event>) -> Result<()>;
}
