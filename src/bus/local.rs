use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::EventBus;
use crate::event::Event;

// ============================================================================
// In-Process Bus
// ============================================================================
//
// Minimal concrete dispatcher: registered handlers run sequentially, in
// registration order. A handler error fails the publish call; earlier
// handlers keep what they already received.
//
// ============================================================================

/// Handler invoked for every event published on an `InProcessBus`.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: &dyn Event) -> Result<()>;
}

#[derive(Default)]
pub struct InProcessBus {
    handlers: RwLock<Vec<Arc<dyn EventHandler>>>,
}

impl InProcessBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn subscribe(&self, handler: Arc<dyn EventHandler>) {
        self.handlers.write().await.push(handler);
    }
}

#[async_trait]
impl EventBus for InProcessBus {
    async fn publish(&self, event: Arc<dyn Event>) -> Result<()> {
        // Snapshot the list so a handler may subscribe while a publish is
        // in flight.
        let handlers = self.handlers.read().await.clone();

        for handler in handlers {
            handler.handle(event.as_ref()).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Fields, GenericEvent};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHandler {
        seen: AtomicUsize,
    }

    impl CountingHandler {
        fn new() -> Self {
            Self {
                seen: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl EventHandler for CountingHandler {
        async fn handle(&self, _event: &dyn Event) -> Result<()> {
            self.seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl EventHandler for FailingHandler {
        async fn handle(&self, _event: &dyn Event) -> Result<()> {
            anyhow::bail!("handler refused the event")
        }
    }

    #[tokio::test]
    async fn delivers_to_every_subscribed_handler() {
        let bus = InProcessBus::new();
        let first = Arc::new(CountingHandler::new());
        let second = Arc::new(CountingHandler::new());
        bus.subscribe(first.clone()).await;
        bus.subscribe(second.clone()).await;

        let event = Arc::new(GenericEvent::new(Fields::new(), Fields::new()));
        bus.publish(event.clone()).await.unwrap();
        bus.publish(event).await.unwrap();

        assert_eq!(first.seen.load(Ordering::SeqCst), 2);
        assert_eq!(second.seen.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn handler_error_fails_the_publish() {
        let bus = InProcessBus::new();
        let before = Arc::new(CountingHandler::new());
        bus.subscribe(before.clone()).await;
        bus.subscribe(Arc::new(FailingHandler)).await;
        let after = Arc::new(CountingHandler::new());
        bus.subscribe(after.clone()).await;

        let event = Arc::new(GenericEvent::new(Fields::new(), Fields::new()));
        let result = bus.publish(event).await;

        assert!(result.is_err());
        assert_eq!(before.seen.load(Ordering::SeqCst), 1);
        assert_eq!(after.seen.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn publish_with_no_handlers_is_a_no_op() {
        let bus = InProcessBus::new();
        let event = Arc::new(GenericEvent::new(Fields::new(), Fields::new()));
        assert!(bus.publish(event).await.is_ok());
    }
}
