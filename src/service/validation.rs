//! Book payload validation against a fixed field schema.

use crate::error::AppError;
use serde_json::{Map, Value};

/// Earliest and latest publication year accepted.
pub const MIN_YEAR: i64 = 0;
pub const MAX_YEAR: i64 = 2100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    Update,
}

#[derive(Clone, Copy, Debug)]
enum FieldKind {
    Text { non_empty: bool },
    Integer { minimum: i64, maximum: i64 },
}

#[derive(Clone, Copy, Debug)]
struct FieldRule {
    name: &'static str,
    kind: FieldKind,
    /// `isbn` comes from the path on update.
    required_on_update: bool,
}

const fn text(name: &'static str, non_empty: bool) -> FieldRule {
    FieldRule {
        name,
        kind: FieldKind::Text { non_empty },
        required_on_update: true,
    }
}

const fn integer(name: &'static str, minimum: i64, maximum: i64) -> FieldRule {
    FieldRule {
        name,
        kind: FieldKind::Integer { minimum, maximum },
        required_on_update: true,
    }
}

const BOOK_SCHEMA: &[FieldRule] = &[
    FieldRule {
        name: "isbn",
        kind: FieldKind::Text { non_empty: true },
        required_on_update: false,
    },
    text("amazon_url", false),
    text("author", true),
    text("language", false),
    integer("pages", 1, i32::MAX as i64),
    text("publisher", false),
    text("title", true),
    integer("year", MIN_YEAR, MAX_YEAR),
];

pub struct BookValidator;

impl BookValidator {
    /// Check `body` against the book schema. Every failure is reported, in schema order,
    /// followed by unknown fields in body order.
    pub fn validate(body: &Value, mode: ValidationMode) -> Result<(), Vec<String>> {
        let Value::Object(map) = body else {
            return Err(vec!["body must be a JSON object".to_string()]);
        };
        let mut errors = Vec::new();
        for rule in BOOK_SCHEMA {
            check_field(map, rule, mode, &mut errors);
        }
        for key in map.keys() {
            if !BOOK_SCHEMA.iter().any(|r| r.name == key.as_str()) {
                errors.push(format!("unknown field '{}'", key));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and deserialize in one step, mapping failures to `AppError::Validation`.
    pub fn parse<T: serde::de::DeserializeOwned>(body: Value, mode: ValidationMode) -> Result<T, AppError> {
        Self::validate(&body, mode).map_err(AppError::Validation)?;
        serde_json::from_value(body).map_err(|e| AppError::Validation(vec![e.to_string()]))
    }
}

fn check_field(map: &Map<String, Value>, rule: &FieldRule, mode: ValidationMode, errors: &mut Vec<String>) {
    let required = match mode {
        ValidationMode::Create => true,
        ValidationMode::Update => rule.required_on_update,
    };
    let value = match map.get(rule.name) {
        None | Some(Value::Null) => {
            if required {
                errors.push(format!("{} is required", rule.name));
            }
            return;
        }
        Some(v) => v,
    };
    match rule.kind {
        FieldKind::Text { non_empty } => match value.as_str() {
            Some(s) if non_empty && s.trim().is_empty() => {
                errors.push(format!("{} must not be empty", rule.name));
            }
            Some(_) => {}
            None => errors.push(format!("{} must be a string", rule.name)),
        },
        FieldKind::Integer { minimum, maximum } => match value.as_i64() {
            Some(n) if n < minimum => {
                errors.push(format!("{} must be at least {}", rule.name, minimum));
            }
            Some(n) if n > maximum => {
                errors.push(format!("{} must be at most {}", rule.name, maximum));
            }
            Some(_) => {}
            None if value.as_u64().is_some() => {
                errors.push(format!("{} must be at most {}", rule.name, maximum));
            }
            None => errors.push(format!("{} must be an integer", rule.name)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BookUpdate, NewBook};
    use serde_json::json;

    fn valid_book() -> Value {
        json!({
            "isbn": "1234567890",
            "amazon_url": "http://a.co/1234",
            "author": "Test Author",
            "language": "english",
            "pages": 100,
            "publisher": "Test Publisher",
            "title": "Test Title",
            "year": 2020
        })
    }

    #[test]
    fn accepts_complete_book() {
        assert!(BookValidator::validate(&valid_book(), ValidationMode::Create).is_ok());
    }

    #[test]
    fn reports_every_missing_field() {
        let errors = BookValidator::validate(&json!({ "isbn": "invalidbookdata" }), ValidationMode::Create)
            .unwrap_err();
        assert_eq!(
            errors,
            vec![
                "amazon_url is required",
                "author is required",
                "language is required",
                "pages is required",
                "publisher is required",
                "title is required",
                "year is required",
            ]
        );
    }

    #[test]
    fn update_with_only_empty_title_fails() {
        let errors = BookValidator::validate(&json!({ "title": "" }), ValidationMode::Update).unwrap_err();
        assert!(errors.contains(&"title must not be empty".to_string()));
        assert!(errors.contains(&"author is required".to_string()));
        assert!(!errors.iter().any(|e| e.starts_with("isbn")));
    }

    #[test]
    fn create_requires_isbn() {
        let mut body = valid_book();
        body.as_object_mut().unwrap().remove("isbn");
        let errors = BookValidator::validate(&body, ValidationMode::Create).unwrap_err();
        assert_eq!(errors, vec!["isbn is required"]);
        assert!(BookValidator::validate(&body, ValidationMode::Update).is_ok());
    }

    #[test]
    fn checks_types_and_ranges() {
        let mut body = valid_book();
        let obj = body.as_object_mut().unwrap();
        obj.insert("pages".into(), json!(0));
        obj.insert("year".into(), json!(3000));
        obj.insert("language".into(), json!(7));
        obj.insert("author".into(), json!("   "));
        let errors = BookValidator::validate(&body, ValidationMode::Create).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "author must not be empty",
                "language must be a string",
                "pages must be at least 1",
                "year must be at most 2100",
            ]
        );
    }

    #[test]
    fn rejects_fractional_and_oversized_integers() {
        let mut body = valid_book();
        body["pages"] = json!(10.5);
        body["year"] = json!(u64::MAX);
        let errors = BookValidator::validate(&body, ValidationMode::Create).unwrap_err();
        assert_eq!(errors, vec!["pages must be an integer", "year must be at most 2100"]);
    }

    #[test]
    fn null_counts_as_missing() {
        let mut body = valid_book();
        body["publisher"] = Value::Null;
        let errors = BookValidator::validate(&body, ValidationMode::Create).unwrap_err();
        assert_eq!(errors, vec!["publisher is required"]);
    }

    #[test]
    fn rejects_unknown_fields_and_non_objects() {
        let mut body = valid_book();
        body["rating"] = json!(5);
        let errors = BookValidator::validate(&body, ValidationMode::Create).unwrap_err();
        assert_eq!(errors, vec!["unknown field 'rating'"]);

        let errors = BookValidator::validate(&json!([1, 2]), ValidationMode::Create).unwrap_err();
        assert_eq!(errors, vec!["body must be a JSON object"]);
    }

    #[test]
    fn parse_yields_typed_payloads() {
        let new_book: NewBook = BookValidator::parse(valid_book(), ValidationMode::Create).unwrap();
        assert_eq!(new_book.pages, 100);

        let update: BookUpdate = BookValidator::parse(valid_book(), ValidationMode::Update).unwrap();
        assert_eq!(update.isbn.as_deref(), Some("1234567890"));
        assert_eq!(update.into_book("1234567890").title, "Test Title");

        let err = BookValidator::parse::<NewBook>(json!({}), ValidationMode::Create).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref v) if v.len() == 8));
    }
}
