//! Log record structure

use super::field::Field;
use super::log_level::Level;
use chrono::{DateTime, Local, SecondsFormat};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single log event, built per call and discarded once handled.
#[derive(Debug, Clone)]
pub struct Record {
    pub time: DateTime<Local>,
    pub level: Level,
    pub message: String,
    pub fields: Vec<Field>,
    pub source: Option<String>,
}

impl Record {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            time: Local::now(),
            level,
            message: message.into(),
            fields: Vec::new(),
            source: None,
        }
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }

    /// Serialize to a single-line JSON object
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to JSON followed by a newline, ready for a sink
    pub fn to_json_line(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(line)
    }
}

impl Serialize for Record {
    /// Keys are written as `time`, `level`, `msg`, the fields in order, then `source`.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 3 + self.fields.len() + usize::from(self.source.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(
            "time",
            &self.time.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        )?;
        map.serialize_entry("level", self.level.to_str())?;
        map.serialize_entry("msg", &self.message)?;
        for field in &self.fields {
            map.serialize_entry(&field.key, &field.value)?;
        }
        if let Some(source) = &self.source {
            map.serialize_entry("source", source)?;
        }
        map.end()
    }
}
