use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use super::EventBus;
use crate::diagnostics::Diagnostics;
use crate::event::{BusinessEvent, Event, Fields};
use crate::record::{EventRecord, Identity, RequestContext, TwEventBody};
use crate::session::SessionContext;
use crate::sink::{SinkError, StreamSink};

// ============================================================================
// Replicating Event Bus - Decorator over the Inner Dispatcher
// ============================================================================
//
// Wraps any `EventBus` and copies business events to an external stream as a
// side effect of publishing. Replication is best effort: a failed sink write
// is logged and swallowed, and the inner bus receives the event exactly once
// no matter what the sink did. The sink write always happens before the
// inner dispatch.
//
// ============================================================================

/// How one replication attempt ended. Feeds logging and nothing else.
#[derive(Debug)]
enum ReplicationOutcome {
    /// The event carries no business payload, so nothing was written.
    Skipped,
    /// The record was handed to the sink.
    Replicated,
    /// The sink refused the record; the error is reported and dropped.
    Failed(SinkError),
}

/// Decorator that mirrors business events onto an external stream before
/// forwarding every event, business or not, to the wrapped bus.
pub struct ReplicatingEventBus {
    inner: Arc<dyn EventBus>,
    session: Arc<dyn SessionContext>,
    sink: Arc<dyn StreamSink>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl ReplicatingEventBus {
    /// Product identifier stamped into every record and partition key.
    pub const PRODUCT_ID: u32 = 17;

    /// Stream every record is written to.
    pub const STREAM_NAME: &'static str = "tw_events-massagebook-production";

    pub fn new(
        inner: Arc<dyn EventBus>,
        session: Arc<dyn SessionContext>,
        sink: Arc<dyn StreamSink>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            inner,
            session,
            sink,
            diagnostics,
        }
    }

    async fn replicate(&self, event: &dyn BusinessEvent) -> ReplicationOutcome {
        match self.try_replicate(event).await {
            Ok(()) => ReplicationOutcome::Replicated,
            Err(err) => ReplicationOutcome::Failed(err),
        }
    }

    async fn try_replicate(&self, event: &dyn BusinessEvent) -> Result<(), SinkError> {
        let record = self.build_record(event);
        let data = serde_json::to_vec(&record)?;
        self.sink
            .write(Self::STREAM_NAME, &self.partition_key(), data)
            .await
    }

    fn build_record(&self, event: &dyn BusinessEvent) -> EventRecord {
        EventRecord {
            product_id: Self::PRODUCT_ID,
            tw_event: TwEventBody {
                name: event.name().to_owned(),
                attributes: event.attributes().clone(),
            },
            identity: Identity {
                user_id: self.session.user_id(),
                customer_id: self.session.customer_id(),
            },
            context: RequestContext {
                unix_timestamp: Utc::now().timestamp(),
                platform: self.session.platform(),
                environment: self.session.environment(),
                session_id: self.session.session_id(),
                request_id: self.session.request_id(),
            },
        }
    }

    /// Routing key for the stream, recomputed on every call. An absent
    /// customer leaves the suffix empty: `"17-"`.
    fn partition_key(&self) -> String {
        format!(
            "{}-{}",
            Self::PRODUCT_ID,
            self.session.customer_id().unwrap_or_default()
        )
    }

    fn log_outcome(&self, outcome: &ReplicationOutcome, event: &dyn Event) {
        match outcome {
            ReplicationOutcome::Skipped => {}
            ReplicationOutcome::Replicated => {
                tracing::debug!(stream = Self::STREAM_NAME, "replicated event to stream");
            }
            ReplicationOutcome::Failed(err) => {
                let mut fields = Fields::new();
                fields.insert("error".to_owned(), Value::String(err.to_string()));
                fields.insert("event".to_owned(), Value::String(format!("{:?}", event)));
                self.diagnostics.error("failed to send event to sink", fields);
            }
        }
    }
}

#[async_trait]
impl EventBus for ReplicatingEventBus {
    async fn publish(&self, event: Arc<dyn Event>) -> Result<()> {
        let outcome = match event.as_business() {
            Some(business) => self.replicate(business).await,
            None => ReplicationOutcome::Skipped,
        };
        self.log_outcome(&outcome, event.as_ref());

        // The inner bus always runs, exactly once, with the original event.
        self.inner.publish(event).await
    }
}
