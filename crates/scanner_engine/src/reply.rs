use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Product lookup answer, one variant per recognized body shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductReply {
    /// `{"nom": "<article>"}`
    Found { article: String },
    /// `{"error": "<reason>"}`
    NotFound { reason: String },
    /// Valid JSON that matches neither shape.
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplyError {
    #[error("empty response body")]
    Empty,
    #[error("malformed response body: {0}")]
    Malformed(String),
}

#[derive(Debug, Deserialize)]
struct ReplyFields {
    #[serde(default)]
    nom: Option<Field>,
    #[serde(default)]
    error: Option<Field>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Field {
    Text(String),
    Other(Value),
}

impl Field {
    fn into_text(self) -> Option<String> {
        match self {
            Field::Text(text) => Some(text),
            Field::Other(_) => None,
        }
    }
}

/// Decode a server response body.
///
/// A string `nom` wins over `error`; fields of any other type are treated as
/// absent.
pub fn decode_reply(body: &[u8]) -> Result<ProductReply, ReplyError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ReplyError::Empty);
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|err| ReplyError::Malformed(err.to_string()))?;
    if !value.is_object() {
        return Ok(ProductReply::Unrecognized);
    }

    let fields: ReplyFields =
        serde_json::from_value(value).map_err(|err| ReplyError::Malformed(err.to_string()))?;

    if let Some(article) = fields.nom.and_then(Field::into_text) {
        return Ok(ProductReply::Found { article });
    }
    if let Some(reason) = fields.error.and_then(Field::into_text) {
        return Ok(ProductReply::NotFound { reason });
    }
    Ok(ProductReply::Unrecognized)
}
