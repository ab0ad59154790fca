//! Record entity and field validation

use kernel::id::RecordId;

use crate::error::{RecordsError, RecordsResult};

pub const MAX_FIELD_CHARS: usize = 200;

/// A stored student record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    /// Kept exactly as submitted; not coerced to a number
    pub age: String,
    pub course: String,
}

impl Record {
    pub fn new(id: RecordId, fields: RecordFields) -> Self {
        Self {
            id,
            name: fields.name,
            age: fields.age,
            course: fields.course,
        }
    }

    pub fn fields(&self) -> RecordFields {
        RecordFields {
            name: self.name.clone(),
            age: self.age.clone(),
            course: self.course.clone(),
        }
    }
}

/// Validated name/age/course triple used for insert and full replace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields {
    name: String,
    age: String,
    course: String,
}

impl RecordFields {
    pub fn new(
        name: Option<String>,
        age: Option<String>,
        course: Option<String>,
    ) -> RecordsResult<Self> {
        Ok(Self {
            name: required("name", name)?,
            age: required("age", age)?,
            course: required("course", course)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> &str {
        &self.age
    }

    pub fn course(&self) -> &str {
        &self.course
    }
}

fn required(field: &str, value: Option<String>) -> RecordsResult<String> {
    let value = value.as_deref().map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(RecordsError::InvalidInput(format!("Field '{field}' is required")));
    }
    if value.chars().count() > MAX_FIELD_CHARS {
        return Err(RecordsError::InvalidInput(format!(
            "Field '{field}' must be at most {MAX_FIELD_CHARS} characters"
        )));
    }
    Ok(value.to_string())
}

/// Parse a wire identifier; malformed input never reaches the store
pub fn parse_record_id(raw: &str) -> RecordsResult<RecordId> {
    RecordId::parse(raw).map_err(|_| RecordsError::InvalidId)
}
