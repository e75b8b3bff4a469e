use async_trait::async_trait;
use rdkafka::{
    config::ClientConfig,
    error::KafkaError,
    producer::{FutureProducer, FutureRecord},
    types::RDKafkaErrorCode,
    util::Timeout,
};

use super::{SinkError, StreamSink};

// ============================================================================
// Kafka Sink
// ============================================================================
//
// Production sink adapter over a Kafka/Redpanda cluster. The stream name
// maps to a topic and the partition key to the record key, so records for
// one customer land on one partition.
//
// ============================================================================

pub struct KafkaSink {
    producer: FutureProducer,
}

impl KafkaSink {
    pub fn new(brokers: &str) -> anyhow::Result<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .create()?;

        Ok(Self { producer })
    }
}

#[async_trait]
impl StreamSink for KafkaSink {
    async fn write(
        &self,
        stream: &str,
        partition_key: &str,
        data: Vec<u8>,
    ) -> Result<(), SinkError> {
        let record = FutureRecord::to(stream).key(partition_key).payload(&data);

        self.producer
            .send(record, Timeout::After(std::time::Duration::from_secs(5)))
            .await
            .map_err(|(e, _)| classify(e))?;

        tracing::debug!(
            stream = %stream,
            partition_key = %partition_key,
            "wrote record to stream"
        );

        Ok(())
    }
}

fn classify(err: KafkaError) -> SinkError {
    match err.rdkafka_error_code() {
        Some(RDKafkaErrorCode::QueueFull) => SinkError::Throttled(err.to_string()),
        Some(RDKafkaErrorCode::MessageSizeTooLarge | RDKafkaErrorCode::InvalidMessage) => {
            SinkError::Rejected(err.to_string())
        }
        _ => SinkError::Transport(err.to_string()),
    }
}
