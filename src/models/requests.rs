//! Request DTOs
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

/// Longest accepted comment, in characters, after trimming.
pub const MAX_COMMENT_LENGTH: usize = 500;

/// Request body for `POST /comments/`.
///
/// Fields are kept loosely typed so that a wrong type is reported as a
/// specific validation failure instead of a generic decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCommentRequest {
    /// Comment text
    #[serde(default)]
    pub comment: Option<Value>,
    /// Film id, as a JSON integer or an integer-valued string
    #[serde(default)]
    pub film: Option<Value>,
}

/// A comment that passed validation and is ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub film_id: i64,
    /// Trimmed text
    pub text: String,
}

impl CreateCommentRequest {
    /// Validates the request without touching the store.
    ///
    /// Returns the specific violated constraint on failure.
    pub fn validate(&self) -> Result<NewComment, String> {
        let film_id = parse_film_id(self.film.as_ref())?;

        let raw = match &self.comment {
            None | Some(Value::Null) => return Err("comment text is required".to_string()),
            Some(Value::String(s)) if s.is_empty() => {
                return Err("comment text is required".to_string())
            }
            Some(Value::String(s)) => s,
            Some(_) => return Err("comment must be a string".to_string()),
        };

        let text = raw.trim();
        if text.is_empty() {
            return Err("comment cannot be empty or whitespace only".to_string());
        }
        if text.contains('\0') {
            return Err("comment cannot contain null characters".to_string());
        }

        let length = text.chars().count();
        if length > MAX_COMMENT_LENGTH {
            return Err(format!(
                "Comment cannot exceed {} characters (current: {})",
                MAX_COMMENT_LENGTH, length
            ));
        }

        Ok(NewComment {
            film_id,
            text: text.to_string(),
        })
    }
}

fn parse_film_id(film: Option<&Value>) -> Result<i64, String> {
    let invalid = || "film ID must be a valid integer".to_string();

    let film = match film {
        Some(value) if !is_blank(value) => value,
        _ => return Err("film ID is required".to_string()),
    };

    match film {
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid()),
        Value::Number(n) => n.as_i64().ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// Values that count as "no film given": null, false, zero and empty
/// strings or containers.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> CreateCommentRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_valid_request() {
        let req = request(json!({"comment": "  Great!  ", "film": 1}));
        assert_eq!(
            req.validate(),
            Ok(NewComment {
                film_id: 1,
                text: "Great!".to_string()
            })
        );
    }

    #[test]
    fn test_film_id_as_string() {
        let req = request(json!({"comment": "ok", "film": "12"}));
        assert_eq!(req.validate().unwrap().film_id, 12);
    }

    #[test]
    fn test_missing_film() {
        let req = request(json!({"comment": "ok"}));
        assert_eq!(req.validate(), Err("film ID is required".to_string()));

        let req = request(json!({"comment": "ok", "film": null}));
        assert_eq!(req.validate(), Err("film ID is required".to_string()));
    }

    #[test]
    fn test_falsy_film_is_missing() {
        for film in [json!(0), json!(false), json!(""), json!([]), json!({})] {
            let req = request(json!({"comment": "ok", "film": film}));
            assert_eq!(
                req.validate(),
                Err("film ID is required".to_string()),
                "{film}"
            );
        }
    }

    #[test]
    fn test_zero_as_string_is_an_id() {
        let req = request(json!({"comment": "ok", "film": "0"}));
        assert_eq!(req.validate().unwrap().film_id, 0);
    }

    #[test]
    fn test_null_character_rejected() {
        for text in ["\u{0}hello", "hel\u{0}lo"] {
            let req = request(json!({"film": 1, "comment": text}));
            assert_eq!(
                req.validate(),
                Err("comment cannot contain null characters".to_string())
            );
        }
    }

    #[test]
    fn test_non_integer_film() {
        for film in [json!("abc"), json!(1.5), json!(true), json!([1])] {
            let req = request(json!({"comment": "ok", "film": film}));
            assert_eq!(
                req.validate(),
                Err("film ID must be a valid integer".to_string())
            );
        }
    }

    #[test]
    fn test_missing_comment() {
        let req = request(json!({"film": 1}));
        assert_eq!(req.validate(), Err("comment text is required".to_string()));

        let req = request(json!({"film": 1, "comment": ""}));
        assert_eq!(req.validate(), Err("comment text is required".to_string()));
    }

    #[test]
    fn test_non_string_comment() {
        let req = request(json!({"film": 1, "comment": 42}));
        assert_eq!(req.validate(), Err("comment must be a string".to_string()));
    }

    #[test]
    fn test_whitespace_only_comment() {
        let req = request(json!({"film": 1, "comment": " \n\t "}));
        assert_eq!(
            req.validate(),
            Err("comment cannot be empty or whitespace only".to_string())
        );
    }

    #[test]
    fn test_length_boundary() {
        let req = request(json!({"film": 1, "comment": "x".repeat(500)}));
        assert_eq!(req.validate().unwrap().text.chars().count(), 500);

        let req = request(json!({"film": 1, "comment": "x".repeat(501)}));
        let err = req.validate().unwrap_err();
        assert!(err.contains("current: 501"), "{err}");
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let req = request(json!({"film": 1, "comment": "é".repeat(500)}));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_length_is_measured_after_trim() {
        let padded = format!("  {}  ", "x".repeat(500));
        let req = request(json!({"film": 1, "comment": padded}));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_film_checked_before_comment() {
        let req = request(json!({"comment": "   "}));
        assert_eq!(req.validate(), Err("film ID is required".to_string()));
    }
}
