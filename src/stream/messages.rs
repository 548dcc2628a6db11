//! Stream Message Types
//!
//! Frames pushed by the event backend. Each text frame is one JSON envelope:
//!
//! ```json
//! {"event": "initial_data", "data": [{"timestamp": "...", "image_url": "..."}]}
//! {"event": "new_warning",  "data": {"timestamp": "...", "image_url": "..."}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DashboardError, DashboardResult};
use crate::model::Event;

/// Snapshot event name
pub const INITIAL_DATA: &str = "initial_data";
/// Incremental event name
pub const NEW_WARNING: &str = "new_warning";

/// Raw envelope as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

/// A decoded inbound message
#[derive(Debug, Clone, PartialEq)]
pub enum StreamMessage {
    /// One-time bulk history
    InitialData {
        events: Vec<Event>,
        /// Snapshot elements that were not valid events
        rejected: usize,
    },
    /// One live event
    NewWarning(Event),
    /// Any other event name; ignored
    Unknown { event: String },
}

impl StreamMessage {
    /// Decode one text frame.
    ///
    /// Snapshot elements are decoded individually so a single malformed
    /// element is dropped instead of failing the whole snapshot.
    pub fn parse(frame: &str) -> DashboardResult<Self> {
        let envelope: Envelope = serde_json::from_str(frame)?;

        match envelope.event.as_str() {
            INITIAL_DATA => {
                let items = match envelope.data {
                    Value::Array(items) => items,
                    Value::Null => Vec::new(),
                    other => {
                        return Err(DashboardError::Protocol(format!(
                            "initial_data payload must be an array, got {}",
                            json_kind(&other)
                        )))
                    }
                };

                let mut events = Vec::with_capacity(items.len());
                let mut rejected = 0;
                for (index, item) in items.into_iter().enumerate() {
                    match serde_json::from_value::<Event>(item) {
                        Ok(event) => events.push(event),
                        Err(e) => {
                            rejected += 1;
                            tracing::warn!(index, error = %e, "Dropping malformed snapshot event");
                        }
                    }
                }

                Ok(StreamMessage::InitialData { events, rejected })
            }
            NEW_WARNING => {
                let event = serde_json::from_value::<Event>(envelope.data)?;
                Ok(StreamMessage::NewWarning(event))
            }
            _ => Ok(StreamMessage::Unknown {
                event: envelope.event,
            }),
        }
    }

    /// Event name of this message
    pub fn name(&self) -> &str {
        match self {
            StreamMessage::InitialData { .. } => INITIAL_DATA,
            StreamMessage::NewWarning(_) => NEW_WARNING,
            StreamMessage::Unknown { event } => event,
        }
    }

    /// Encode a snapshot frame
    pub fn initial_data_frame(events: &[Event]) -> DashboardResult<String> {
        encode(INITIAL_DATA, serde_json::to_value(events)?)
    }

    /// Encode a live event frame
    pub fn new_warning_frame(event: &Event) -> DashboardResult<String> {
        encode(NEW_WARNING, serde_json::to_value(event)?)
    }
}

fn encode(event: &str, data: Value) -> DashboardResult<String> {
    let envelope = Envelope {
        event: event.to_string(),
        data,
    };
    Ok(serde_json::to_string(&envelope)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_initial_data() {
        let frame = r#"{"event": "initial_data", "data": [
            {"timestamp": "2024-01-01T09:15:00", "image_url": "a.jpg"},
            {"timestamp": "2024-01-01T09:45:00", "image_url": "b.jpg"}
        ]}"#;
        match StreamMessage::parse(frame).unwrap() {
            StreamMessage::InitialData { events, rejected } => {
                assert_eq!(events.len(), 2);
                assert_eq!(rejected, 0);
                assert_eq!(events[1].image_url(), "b.jpg");
            }
            other => panic!("Expected InitialData, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_initial_data_drops_bad_elements() {
        let frame = r#"{"event": "initial_data", "data": [
            {"timestamp": "2024-01-01T09:15:00", "image_url": "a.jpg"},
            {"image_url": "no-timestamp.jpg"},
            42
        ]}"#;
        match StreamMessage::parse(frame).unwrap() {
            StreamMessage::InitialData { events, rejected } => {
                assert_eq!(events.len(), 1);
                assert_eq!(rejected, 2);
            }
            other => panic!("Expected InitialData, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_initial_data_not_array() {
        let frame = r#"{"event": "initial_data", "data": {"timestamp": "x"}}"#;
        let err = StreamMessage::parse(frame).unwrap_err();
        assert!(matches!(err, DashboardError::Protocol(_)));
        assert!(err.to_string().contains("object"));
    }

    #[test]
    fn test_parse_new_warning() {
        let frame = r#"{"event": "new_warning", "data": {"timestamp": "2024-01-01T10:00:00", "image_url": "/uploads/20240101_100000.jpg"}}"#;
        let msg = StreamMessage::parse(frame).unwrap();
        assert_eq!(msg.name(), "new_warning");
        assert_eq!(
            msg,
            StreamMessage::NewWarning(Event::new(
                "2024-01-01T10:00:00",
                "/uploads/20240101_100000.jpg"
            ))
        );
    }

    #[test]
    fn test_parse_new_warning_malformed() {
        let frame = r#"{"event": "new_warning", "data": {"timestamp": 5}}"#;
        assert!(matches!(
            StreamMessage::parse(frame),
            Err(DashboardError::Serialization(_))
        ));
    }

    #[test]
    fn test_parse_unknown_event() {
        let frame = r#"{"event": "heartbeat"}"#;
        let msg = StreamMessage::parse(frame).unwrap();
        assert_eq!(
            msg,
            StreamMessage::Unknown {
                event: "heartbeat".to_string()
            }
        );
    }

    #[test]
    fn test_parse_not_json() {
        assert!(StreamMessage::parse("42[\"new_warning\"").is_err());
    }

    #[test]
    fn test_encode_frames() {
        let event = Event::new("2024-01-01T10:00:00", "a.jpg");
        let frame = StreamMessage::new_warning_frame(&event).unwrap();
        assert!(frame.contains("\"event\":\"new_warning\""));
        assert_eq!(
            StreamMessage::parse(&frame).unwrap(),
            StreamMessage::NewWarning(event.clone())
        );

        let frame = StreamMessage::initial_data_frame(&[]).unwrap();
        assert_eq!(frame, r#"{"event":"initial_data","data":[]}"#);
    }
}
