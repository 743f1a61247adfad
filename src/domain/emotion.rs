//! Emotional-state annotations and the fixed emotion vocabularies.
//!
//! Journals store the annotation in several shapes: missing, a JSON object, or
//! the same object serialized into a string. [`EmotionalState::parse`]
//! normalizes all of them into one closed variant at the boundary, so scorers
//! never look at raw input.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

pub static POSITIVE_EMOTIONS: [&str; 5] = ["PATIENCE", "DISCIPLINE", "CONFIDENT", "FOCUSED", "CALM"];

pub static NEGATIVE_EMOTIONS: [&str; 7] = [
    "FOMO", "REVENGE", "TILT", "OVERRISK", "ANXIOUS", "GREED", "FEAR",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub enum EmotionalState {
    #[default]
    Unset,
    Tagged {
        primary: Option<String>,
        secondary: Option<String>,
        intensity: Option<f64>,
    },
}

impl EmotionalState {
    pub fn tagged(primary: &str, secondary: Option<&str>) -> Self {
        EmotionalState::Tagged {
            primary: label(primary),
            secondary: secondary.and_then(label),
            intensity: None,
        }
    }

    /// Normalize a raw JSON annotation. Never fails: anything unrecognized is `Unset`.
    pub fn parse(raw: Option<&Value>) -> Self {
        match raw {
            Some(Value::Object(map)) => Self::from_object(map),
            Some(Value::String(s)) => Self::parse_str(s),
            _ => EmotionalState::Unset,
        }
    }

    /// Normalize a serialized annotation, e.g. a CSV cell or a text column.
    pub fn parse_str(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return EmotionalState::Unset;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Object(map)) => Self::from_object(&map),
            // double-encoded: the string itself holds serialized JSON
            Ok(Value::String(inner)) => Self::parse_str(&inner),
            _ => EmotionalState::Unset,
        }
    }

    fn from_object(map: &Map<String, Value>) -> Self {
        let text = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| map.get(*k))
                .and_then(Value::as_str)
                .and_then(label)
        };
        let intensity = map.get("intensity").and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        });

        EmotionalState::Tagged {
            primary: text(&["primary_emotion", "primaryEmotion"]),
            secondary: text(&["secondary_emotion", "secondaryEmotion"]),
            intensity: intensity.filter(|i| i.is_finite()),
        }
    }

    pub fn is_tagged(&self) -> bool {
        matches!(self, EmotionalState::Tagged { .. })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        let (primary, secondary) = match self {
            EmotionalState::Tagged {
                primary, secondary, ..
            } => (primary.as_deref(), secondary.as_deref()),
            EmotionalState::Unset => (None, None),
        };
        primary.into_iter().chain(secondary)
    }

    pub fn has_positive(&self) -> bool {
        self.labels().any(|l| in_vocabulary(l, &POSITIVE_EMOTIONS))
    }

    pub fn has_negative(&self) -> bool {
        self.labels().any(|l| in_vocabulary(l, &NEGATIVE_EMOTIONS))
    }
}

impl<'de> Deserialize<'de> for EmotionalState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(EmotionalState::parse(raw.as_ref()))
    }
}

fn label(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn in_vocabulary(label: &str, vocabulary: &[&str]) -> bool {
    vocabulary.iter().any(|v| v.eq_ignore_ascii_case(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_missing_and_null_is_unset() {
        assert_eq!(EmotionalState::parse(None), EmotionalState::Unset);
        assert_eq!(EmotionalState::parse(Some(&Value::Null)), EmotionalState::Unset);
    }

    #[test]
    fn parse_structured_value() {
        let raw = json!({
            "primary_emotion": "Calm",
            "secondary_emotion": "focused",
            "intensity": 7
        });
        let state = EmotionalState::parse(Some(&raw));
        assert_eq!(
            state,
            EmotionalState::Tagged {
                primary: Some("Calm".into()),
                secondary: Some("focused".into()),
                intensity: Some(7.0),
            }
        );
    }

    #[test]
    fn parse_camel_case_keys() {
        let raw = json!({ "primaryEmotion": "FOMO", "intensity": "3" });
        let state = EmotionalState::parse(Some(&raw));
        assert!(state.has_negative());
        assert!(matches!(
            state,
            EmotionalState::Tagged { intensity: Some(i), .. } if i == 3.0
        ));
    }

    #[test]
    fn parse_serialized_string() {
        let raw = Value::String(r#"{"primary_emotion":"REVENGE"}"#.into());
        let state = EmotionalState::parse(Some(&raw));
        assert!(state.is_tagged());
        assert!(state.has_negative());
        assert!(!state.has_positive());
    }

    #[test]
    fn parse_double_encoded_string() {
        let state = EmotionalState::parse_str(r#""{\"primary_emotion\":\"calm\"}""#);
        assert!(state.has_positive());
    }

    #[test]
    fn parse_garbage_is_unset() {
        assert_eq!(EmotionalState::parse_str("{not json"), EmotionalState::Unset);
        assert_eq!(EmotionalState::parse_str("   "), EmotionalState::Unset);
        assert_eq!(EmotionalState::parse_str("42"), EmotionalState::Unset);
        assert_eq!(EmotionalState::parse(Some(&json!([1, 2]))), EmotionalState::Unset);
        assert_eq!(EmotionalState::parse(Some(&json!(true))), EmotionalState::Unset);
    }

    #[test]
    fn empty_object_is_tagged_without_labels() {
        let state = EmotionalState::parse(Some(&json!({})));
        assert!(state.is_tagged());
        assert_eq!(state.labels().count(), 0);
        assert!(!state.has_positive());
        assert!(!state.has_negative());
    }

    #[test]
    fn blank_labels_are_dropped() {
        let state = EmotionalState::parse(Some(&json!({
            "primary_emotion": "  ",
            "secondary_emotion": " tilt "
        })));
        let labels: Vec<&str> = state.labels().collect();
        assert_eq!(labels, vec!["tilt"]);
        assert!(state.has_negative());
    }

    #[test]
    fn classification_can_be_both() {
        let state = EmotionalState::tagged("confident", Some("greed"));
        assert!(state.has_positive());
        assert!(state.has_negative());
    }

    #[test]
    fn unknown_labels_are_neutral() {
        let state = EmotionalState::tagged("bored", Some("curious"));
        assert!(state.is_tagged());
        assert!(!state.has_positive());
        assert!(!state.has_negative());
    }

    #[test]
    fn deserialize_never_fails() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default)]
            emotional_state: EmotionalState,
        }

        let rows: Vec<Row> = serde_json::from_str(
            r#"[
                {"emotional_state": null},
                {"emotional_state": "garbage"},
                {"emotional_state": 12},
                {"emotional_state": {"primary_emotion": "patience"}},
                {}
            ]"#,
        )
        .unwrap();

        let tagged: Vec<bool> = rows.iter().map(|r| r.emotional_state.is_tagged()).collect();
        assert_eq!(tagged, vec![false, false, false, true, false]);
    }
}
