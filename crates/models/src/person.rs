use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A stored person. `name` is the unique key.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

impl Person {
    pub fn new(name: impl Into<String>, age: u32) -> Result<Self, ModelError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ModelError::MissingParameter("name"));
        }
        Ok(Self { name, age })
    }

    /// Build a person from raw query values. Absent and empty values are both missing.
    pub fn from_params(name: Option<&str>, age: Option<&str>) -> Result<Self, ModelError> {
        let name = require(name, "name")?;
        let age = parse_age(require(age, "age")?)?;
        Self::new(name, age)
    }
}

/// Return the value if present and non-empty.
pub fn require<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, ModelError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ModelError::MissingParameter(field)),
    }
}

pub fn parse_age(raw: &str) -> Result<u32, ModelError> {
    raw.parse::<u32>()
        .map_err(|_| ModelError::invalid("age", format!("expected a non-negative integer, got {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_params_ok() {
        let p = Person::from_params(Some("Vanya"), Some("15")).unwrap();
        assert_eq!(p, Person { name: "Vanya".into(), age: 15 });
    }

    #[test]
    fn missing_and_empty_are_missing() {
        assert_eq!(Person::from_params(None, Some("1")), Err(ModelError::MissingParameter("name")));
        assert_eq!(Person::from_params(Some(""), Some("1")), Err(ModelError::MissingParameter("name")));
        assert_eq!(Person::from_params(Some("a"), None), Err(ModelError::MissingParameter("age")));
        assert_eq!(Person::from_params(Some("a"), Some("")), Err(ModelError::MissingParameter("age")));
    }

    #[test]
    fn bad_ages_are_invalid() {
        for raw in ["abc", "-1", "1.5", " 3", "99999999999"] {
            let err = Person::from_params(Some("a"), Some(raw)).unwrap_err();
            assert!(matches!(err, ModelError::InvalidParameter { field: "age", .. }), "{raw}: {err:?}");
        }
    }

    #[test]
    fn serializes_as_plain_object() {
        let json = serde_json::to_value(Person { name: "Anya".into(), age: 10 }).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Anya", "age": 10}));
    }
}
