//! Request / response shapes

use serde::{Deserialize, Serialize};

use crate::application::manage_record::RecordInput;
use crate::domain::record::Record;

/// A JSON field that clients may send as a string or a number
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(serde_json::Number),
}

impl FieldValue {
    fn into_string(self) -> String {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::Number(number) => number.to_string(),
        }
    }
}

/// Body of `POST /api/records` and `PUT /api/records/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordPayload {
    pub name: Option<FieldValue>,
    pub age: Option<FieldValue>,
    pub course: Option<FieldValue>,
}

impl From<RecordPayload> for RecordInput {
    fn from(payload: RecordPayload) -> Self {
        Self {
            name: payload.name.map(FieldValue::into_string),
            age: payload.age.map(FieldValue::into_string),
            course: payload.course.map(FieldValue::into_string),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordResponse {
    pub id: String,
    pub name: String,
    pub age: String,
    pub course: String,
}

impl From<Record> for RecordResponse {
    fn from(record: Record) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name,
            age: record.age,
            course: record.course,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Listing query string; unparseable values fall back to defaults
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<String>,
    pub search: Option<String>,
}

impl ListParams {
    /// Parse a raw query string, keeping the first value of repeated keys.
    /// Pairs that fail to percent-decode are ignored.
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut params = Self::default();
        for pair in raw.unwrap_or_default().split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let slot = match key {
                "page" => &mut params.page,
                "search" => &mut params.search,
                _ => continue,
            };
            if slot.is_some() {
                continue;
            }
            if let Ok(decoded) = urlencoding::decode(&value.replace('+', " ")) {
                *slot = Some(decoded.into_owned());
            }
        }
        params
    }

    /// Missing, non-numeric and zero pages all mean page 1
    pub fn page_number(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }
}

/// Add/edit form fields, echoed back into the form on validation errors
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecordForm {
    pub name: String,
    pub age: String,
    pub course: String,
}

impl From<&Record> for RecordForm {
    fn from(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            age: record.age.clone(),
            course: record.course.clone(),
        }
    }
}

impl From<RecordForm> for RecordInput {
    fn from(form: RecordForm) -> Self {
        Self {
            name: Some(form.name),
            age: Some(form.age),
            course: Some(form.course),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_number_is_lenient() {
        let params = |page: Option<&str>| ListParams {
            page: page.map(str::to_string),
            search: None,
        };
        assert_eq!(params(None).page_number(), 1);
        assert_eq!(params(Some("3")).page_number(), 3);
        assert_eq!(params(Some("0")).page_number(), 1);
        assert_eq!(params(Some("-2")).page_number(), 1);
        assert_eq!(params(Some("abc")).page_number(), 1);
    }

    #[test]
    fn test_query_keeps_first_of_repeated_keys() {
        let params = ListParams::from_query(Some("page=2&page=3&search=a&search=b"));
        assert_eq!(params.page_number(), 2);
        assert_eq!(params.search.as_deref(), Some("a"));
    }

    #[test]
    fn test_query_decodes_search() {
        let params = ListParams::from_query(Some("search=Ann+Lee%21&sort=name"));
        assert_eq!(params.search.as_deref(), Some("Ann Lee!"));
        assert_eq!(params.page_number(), 1);

        let params = ListParams::from_query(Some("page&search=%FF"));
        assert_eq!(params.page.as_deref(), Some(""));
        assert!(params.search.is_none());
        assert_eq!(params.page_number(), 1);

        assert!(ListParams::from_query(None).search.is_none());
    }

    #[test]
    fn test_payload_accepts_numeric_age() {
        let payload: RecordPayload =
            serde_json::from_str(r#"{"name":"Alice","age":21,"course":"Math"}"#).unwrap();
        let input = RecordInput::from(payload);
        assert_eq!(input.age.as_deref(), Some("21"));
        assert_eq!(input.name.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_payload_missing_field_is_none() {
        let payload: RecordPayload = serde_json::from_str(r#"{"name":"Alice"}"#).unwrap();
        let input = RecordInput::from(payload);
        assert!(input.age.is_none());
        assert!(input.course.is_none());
    }
}
