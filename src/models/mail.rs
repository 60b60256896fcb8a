use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::triage::TriageResult;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct IncomingMail {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub sender: String,
    pub body: String,
}

impl IncomingMail {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            sender: String::new(),
            body: body.into(),
        }
    }

    pub fn parse_many(json: &str) -> Result<Vec<IncomingMail>> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.is_array() {
            return Ok(serde_json::from_value(value)?);
        }
        if value.is_object() {
            return Ok(vec![serde_json::from_value(value)?]);
        }
        Err(Error::ParseError(format!(
            "expected a mail object or an array of mails, found {}",
            json_kind(&value)
        )))
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriagedMail {
    pub mail: IncomingMail,
    pub result: TriageResult,
    pub triaged_at: DateTime<Utc>,
}
