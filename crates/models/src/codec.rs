//! Line codecs for file-backed person stores.
//!
//! A backing file is a sequence of newline-terminated records. The codec owns
//! the encoding of one line; [`RecordCodec::scan`] implements the linear lookup
//! shared by every format.

use crate::errors::ModelError;
use crate::person::Person;

pub trait RecordCodec: Send + Sync {
    fn name(&self) -> &'static str;

    /// Encode one record, without the trailing newline.
    fn encode(&self, person: &Person) -> Result<String, ModelError>;

    fn decode(&self, line: &str) -> Result<Person, ModelError>;

    /// Return the first record named `name` in file order.
    ///
    /// Blank lines are skipped. A corrupt line only fails the scan when its
    /// name field matches; corrupt lines with another (or unreadable) name are
    /// passed over.
    fn scan(&self, contents: &str, name: &str) -> Result<Option<Person>, ModelError> {
        for line in contents.lines().filter(|l| !l.trim().is_empty()) {
            match self.decode(line) {
                Ok(person) if person.name == name => return Ok(Some(person)),
                Ok(_) => {}
                Err(ModelError::Parse { name: Some(found), reason }) if found == name => {
                    return Err(ModelError::Parse { name: Some(found), reason });
                }
                Err(_) => {}
            }
        }
        Ok(None)
    }
}

/// `<name>.<age>`, split on the first `.`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DottedCodec;

impl RecordCodec for DottedCodec {
    fn name(&self) -> &'static str {
        "dotted"
    }

    fn encode(&self, person: &Person) -> Result<String, ModelError> {
        if person.name.contains(['.', '\n', '\r']) {
            return Err(ModelError::invalid(
                "name",
                "must not contain '.' or line breaks in the dotted format",
            ));
        }
        Ok(format!("{}.{}", person.name, person.age))
    }

    fn decode(&self, line: &str) -> Result<Person, ModelError> {
        let Some((name, age)) = line.split_once('.') else {
            return Err(ModelError::Parse {
                name: Some(line.to_string()),
                reason: format!("record for {line} has no age field"),
            });
        };
        let age = age.parse::<u32>().map_err(|_| ModelError::Parse {
            name: Some(name.to_string()),
            reason: format!("age of {name} is not a number: {age:?}"),
        })?;
        Ok(Person { name: name.to_string(), age })
    }
}

/// One JSON object per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLinesCodec;

impl RecordCodec for JsonLinesCodec {
    fn name(&self) -> &'static str {
        "json_lines"
    }

    fn encode(&self, person: &Person) -> Result<String, ModelError> {
        // `Person` has only string and integer fields, so serialization does not fail in practice
        serde_json::to_string(person)
            .map_err(|e| ModelError::Parse { name: Some(person.name.clone()), reason: e.to_string() })
    }

    fn decode(&self, line: &str) -> Result<Person, ModelError> {
        serde_json::from_str::<Person>(line).map_err(|e| {
            // keep the key when only the age is bad so lookups can report it
            let name = serde_json::from_str::<serde_json::Value>(line)
                .ok()
                .and_then(|v| v.get("name").and_then(|n| n.as_str()).map(str::to_string));
            ModelError::Parse { name, reason: e.to_string() }
        })
    }
}
