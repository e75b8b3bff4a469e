use serde_json::Value;

use crate::event::Fields;

// ============================================================================
// Diagnostics
// ============================================================================
//
// Where the replicating bus records a failed replication attempt. The entry
// is the only externally visible trace of a swallowed sink error.
//
// ============================================================================

/// Sink for diagnostic entries. Fire-and-forget; implementations must not
/// panic or block on the caller's path.
pub trait Diagnostics: Send + Sync {
    fn error(&self, message: &str, fields: Fields);
}

/// Diagnostics emitted through the `tracing` pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn error(&self, message: &str, fields: Fields) {
        tracing::error!(fields = %Value::Object(fields), "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tracing_diagnostics_accepts_arbitrary_fields() {
        // No subscriber is installed here; the call must still be a no-op
        // rather than a panic.
        let mut fields = Fields::new();
        fields.insert("error".to_owned(), json!("stream unreachable"));
        TracingDiagnostics.error("failed to send event to sink", fields);
    }
}
