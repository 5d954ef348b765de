use serde::{Deserialize, Serialize};

/// Priority carried by a message whose producer never assigned one.
pub const PRIORITY_UNSET: i32 = -1;

/// One news item as it travels over the wire: `{"headline": "...", "priority": 5}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewsMessage {
    pub headline: String,
    #[serde(default = "unset_priority")]
    pub priority: i32,
}

impl NewsMessage {
    pub fn new(headline: impl Into<String>, priority: i32) -> Self {
        Self {
            headline: headline.into(),
            priority,
        }
    }
}

fn unset_priority() -> i32 {
    PRIORITY_UNSET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_priority_falls_back_to_sentinel() {
        let message: NewsMessage = serde_json::from_str(r#"{"headline":"up up"}"#).unwrap();
        assert_eq!(message.priority, PRIORITY_UNSET);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let json = serde_json::to_string(&NewsMessage::new("good news", 7)).unwrap();
        assert_eq!(json, r#"{"headline":"good news","priority":7}"#);
    }
}
