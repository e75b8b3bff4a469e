//! Best-effort replication of business events onto an external stream.
//!
//! The crate wraps an in-process [`EventBus`] with [`ReplicatingEventBus`],
//! which copies every business event to a durable stream before forwarding
//! it to the wrapped bus. Replication never interferes with local dispatch:
//! sink failures are logged and swallowed, and the inner bus receives the
//! event exactly once either way.

pub mod bus;
pub mod diagnostics;
pub mod event;
pub mod record;
pub mod session;
pub mod sink;

pub use bus::{EventBus, EventHandler, InProcessBus, ReplicatingEventBus};
pub use diagnostics::{Diagnostics, TracingDiagnostics};
pub use event::{BusinessEvent, Event, Fields, GenericEvent, TwEvent};
pub use record::EventRecord;
pub use session::{SessionContext, StaticSession};
pub use sink::{KafkaSink, SinkError, StreamSink};
