use serde::{Deserialize, Serialize};

use crate::event::Fields;

// ============================================================================
// Published Payload - Wire Format for the External Stream
// ============================================================================
//
// The record replicated for each qualifying event. Derived fresh on every
// publish call, never stored. Struct declaration order fixes the JSON key
// order; absent optional values encode as null, not as omitted keys.
//
// ============================================================================

/// One record as written to the external stream, UTF-8 JSON encoded.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EventRecord {
    pub product_id: u32,
    pub tw_event: TwEventBody,
    pub identity: Identity,
    pub context: RequestContext,
}

/// The event itself: stable name plus flattened attributes.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TwEventBody {
    pub name: String,
    pub attributes: Fields,
}

/// Who fired the event, as visible from the session at call time.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Identity {
    pub user_id: Option<String>,
    pub customer_id: Option<String>,
}

/// Ambient request context captured at payload-construction time.
/// `unix_timestamp` is the wall-clock second when the record was built.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RequestContext {
    pub unix_timestamp: i64,
    pub platform: String,
    pub environment: String,
    pub session_id: Option<String>,
    pub request_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> EventRecord {
        let mut attributes = Fields::new();
        attributes.insert("id".to_owned(), json!(1));
        attributes.insert("status".to_owned(), json!("active"));

        EventRecord {
            product_id: 17,
            tw_event: TwEventBody {
                name: "event.created".to_owned(),
                attributes,
            },
            identity: Identity {
                user_id: Some("12".to_owned()),
                customer_id: Some("34".to_owned()),
            },
            context: RequestContext {
                unix_timestamp: 1_700_000_000,
                platform: "web".to_owned(),
                environment: "production".to_owned(),
                session_id: Some("1234".to_owned()),
                request_id: Some("5678".to_owned()),
            },
        }
    }

    #[test]
    fn encodes_keys_in_contract_order() {
        let json = serde_json::to_string(&sample_record()).unwrap();

        assert_eq!(
            json,
            concat!(
                r#"{"product_id":17,"#,
                r#""tw_event":{"name":"event.created","attributes":{"id":1,"status":"active"}},"#,
                r#""identity":{"user_id":"12","customer_id":"34"},"#,
                r#""context":{"unix_timestamp":1700000000,"platform":"web","#,
                r#""environment":"production","session_id":"1234","request_id":"5678"}}"#,
            )
        );
    }

    #[test]
    fn absent_values_encode_as_null_not_omitted() {
        let mut record = sample_record();
        record.identity.user_id = None;
        record.identity.customer_id = None;
        record.context.session_id = None;
        record.context.request_id = None;

        let body: serde_json::Value = serde_json::to_value(&record).unwrap();

        assert_eq!(body["identity"]["user_id"], serde_json::Value::Null);
        assert_eq!(body["identity"]["customer_id"], serde_json::Value::Null);
        assert_eq!(body["context"]["session_id"], serde_json::Value::Null);
        assert_eq!(body["context"]["request_id"], serde_json::Value::Null);
    }

    #[test]
    fn empty_attributes_encode_as_empty_object() {
        let mut record = sample_record();
        record.tw_event.attributes = Fields::new();

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""attributes":{}"#));
    }

}
