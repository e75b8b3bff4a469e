use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tw_events::{
    BusinessEvent, Event, EventBus, EventHandler, Fields, GenericEvent, InProcessBus, KafkaSink,
    ReplicatingEventBus, TracingDiagnostics, TwEvent,
};

/// Handler that reports every delivery it receives from the inner bus.
struct LoggingHandler;

#[async_trait]
impl EventHandler for LoggingHandler {
    async fn handle(&self, event: &dyn Event) -> anyhow::Result<()> {
        match event.as_business() {
            Some(business) => tracing::info!("✅ Handled business event: {}", business.name()),
            None => tracing::info!("✅ Handled plain event: {:?}", event.data()),
        }
        Ok(())
    }
}

/// Hand-rolled business event, no helper type involved.
#[derive(Debug)]
struct AppointmentCancelled {
    data: Fields,
    metadata: Fields,
}

impl AppointmentCancelled {
    fn new(appointment_id: u32, reason: &str) -> Self {
        let mut data = Fields::new();
        data.insert("appointment_id".to_owned(), json!(appointment_id));
        data.insert("reason".to_owned(), json!(reason));
        Self {
            data,
            metadata: Fields::new(),
        }
    }
}

impl Event for AppointmentCancelled {
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

impl BusinessEvent for AppointmentCancelled {
    fn name(&self) -> &str {
        "appointment.cancelled"
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tw_events=debug")),
        )
        .init();

    tracing::info!("🚀 Starting event replication demo");

    // === 1. Session context for the current caller ===
    let session = tw_events::StaticSession::new("web", "production")
        .with_user("12")
        .with_customer("34")
        .with_session(uuid::Uuid::new_v4().to_string())
        .with_request(uuid::Uuid::new_v4().to_string());

    // === 2. Inner in-process bus with a demo handler ===
    let inner = InProcessBus::new();
    inner.subscribe(Arc::new(LoggingHandler)).await;

    // === 3. Kafka-backed stream sink ===
    let sink = Arc::new(KafkaSink::new("127.0.0.1:9092")?); // Adjust if your broker runs elsewhere

    // === 4. Wrap the inner bus with replication ===
    let bus = ReplicatingEventBus::new(
        Arc::new(inner),
        Arc::new(session),
        sink,
        Arc::new(TracingDiagnostics),
    );

    // === 5. Publish a business event: replicated, then dispatched ===
    let mut data = Fields::new();
    data.insert("id".to_owned(), json!(1));
    data.insert("status".to_owned(), json!("active"));
    bus.publish(Arc::new(TwEvent::new("appointment.created", data)))
        .await?;
    tracing::info!("✅ Business event published");

    // === 6. Publish a plain event: dispatched only, never replicated ===
    let mut data = Fields::new();
    data.insert("cache_key".to_owned(), json!("appointments:34"));
    bus.publish(Arc::new(GenericEvent::new(data, Fields::new())))
        .await?;
    tracing::info!("✅ Plain event published");

    // === 7. Publish a custom business event type ===
    bus.publish(Arc::new(AppointmentCancelled::new(1, "customer request")))
        .await?;
    tracing::info!("✅ Custom business event published");

    tracing::info!("🎉 Demo complete!");

    Ok(())
}
