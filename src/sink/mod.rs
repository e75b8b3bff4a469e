use async_trait::async_trait;
use thiserror::Error;

// ============================================================================
// External Stream Sink
// ============================================================================
//
// Client contract for the external durable stream qualifying events are
// replicated to. One record per call, addressed by stream name and partition
// key. The replicating bus recovers from every error defined here; none of
// them reach a publish caller.
//
// ============================================================================

mod kafka;

pub use kafka::KafkaSink;

/// Why a replication write did not land.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The stream is unreachable (connection refused, timeout, broker down).
    #[error("stream unreachable: {0}")]
    Transport(String),

    /// The stream pushed back on the write rate.
    #[error("stream throttled the write: {0}")]
    Throttled(String),

    /// The stream refused the record itself (too large, malformed).
    #[error("stream rejected the record: {0}")]
    Rejected(String),

    /// The record could not be encoded before the write was attempted.
    #[error("record could not be encoded: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Client for the external durable stream.
#[async_trait]
pub trait StreamSink: Send + Sync {
    /// Write one record to `stream`, routed by `partition_key`. Any timeout
    /// policy lives inside the implementation.
    async fn write(&self, stream: &str, partition_key: &str, data: Vec<u8>)
        -> Result<(), SinkError>;
}
