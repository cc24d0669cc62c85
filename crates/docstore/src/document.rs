use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// One record of a collection.
///
/// The stored fields are kept as they came in and are what gets serialized,
/// so a document goes back to clients the way it was stored. The fields the
/// statistics read are also pulled into a typed view when the document is
/// built. A value of the wrong type leaves its typed slot empty instead of
/// failing the document; a JSON `null` is the same as the field being absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    fields: Map<String, Value>,
    score: Option<f64>,
    did_by: Option<String>,
    truthfulness: Option<bool>,
    created_at: Option<Timestamp>,
    prompt: Option<String>,
    resume_text: Option<String>,
}

/// `created_at` as stored: either text for the consumer to parse or
/// milliseconds since the Unix epoch (Mongo `$date` / `$numberLong`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Timestamp {
    Text(String),
    EpochMillis(i64),
}

impl Document {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        let field = |key: &str| fields.get(key).filter(|v| !v.is_null());

        Self {
            score: field("score").and_then(number),
            did_by: field("didBy").and_then(text),
            truthfulness: field("truthfulness").and_then(truthy),
            created_at: field("created_at").and_then(timestamp),
            prompt: field("prompt").and_then(text),
            resume_text: field("resume_text").and_then(text),
            fields,
        }
    }

    /// A stored field, untouched.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Who assigned the score.
    pub fn did_by(&self) -> Option<&str> {
        self.did_by.as_deref()
    }

    pub fn truthfulness(&self) -> Option<bool> {
        self.truthfulness
    }

    pub fn created_at(&self) -> Option<&Timestamp> {
        self.created_at.as_ref()
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn resume_text(&self) -> Option<&str> {
        self.resume_text.as_deref()
    }

    pub fn is_labeled(&self) -> bool {
        self.score.is_some()
    }

    /// Truthfulness only counts when it reads as true; absent or false is not truthful.
    pub fn is_truthful(&self) -> bool {
        self.truthfulness == Some(true)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::from_fields)
    }
}

/// Extended JSON wrappers (`{"$numberInt": "7"}`) come out of Mongo exports.
fn single_entry(map: &Map<String, Value>) -> Option<(&str, &Value)> {
    if map.len() != 1 {
        return None;
    }
    map.iter().next().map(|(k, v)| (k.as_str(), v))
}

fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::Object(map) => match single_entry(map)? {
            ("$numberInt" | "$numberLong" | "$numberDouble" | "$numberDecimal", Value::String(s)) => {
                s.parse().ok()
            }
            _ => None,
        },
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

/// Loose truthiness: numbers are true unless zero, containers are true, and
/// strings are true unless empty or one of `false`/`0`/`no` (any case).
fn truthy(value: &Value) -> Option<bool> {
    let b = match value {
        Value::Null => return None,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !matches!(s.trim().to_ascii_lowercase().as_str(), "" | "false" | "0" | "no"),
        Value::Array(_) | Value::Object(_) => true,
    };
    Some(b)
}

fn timestamp(value: &Value) -> Option<Timestamp> {
    match value {
        Value::String(s) => Some(Timestamp::Text(s.clone())),
        Value::Number(n) => n.as_i64().map(Timestamp::EpochMillis),
        Value::Object(map) => match single_entry(map)? {
            ("$date", inner) => timestamp(inner),
            ("$numberLong", Value::String(s)) => s.parse().ok().map(Timestamp::EpochMillis),
            _ => None,
        },
        _ => None,
    }
}
