//! Request body extraction for create and update.
//!
//! Bodies are parsed leniently: an empty body reads as `{}` and no
//! content-type is required. The raw object is inspected for an `id` key
//! before the typed fields are pulled out, because the API rejects any body
//! that tries to name an id.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::store::NewItem;

#[derive(Debug, Default, Deserialize)]
struct Fields {
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "isCompleted")]
    is_completed: bool,
}

/// A parsed create/update body.
#[derive(Debug, Default)]
pub struct ItemBody {
    /// Whether the body carried an `id` key, whatever its value.
    pub has_id: bool,
    pub description: Option<String>,
    pub is_completed: bool,
}

impl ItemBody {
    pub fn parse(bytes: &[u8]) -> Result<Self, ApiError> {
        let object: Map<String, Value> = if bytes.iter().all(u8::is_ascii_whitespace) {
            Map::new()
        } else {
            serde_json::from_slice(bytes).map_err(|e| ApiError::MalformedBody(e.to_string()))?
        };

        // Callers reject any body naming an id, so the other fields are moot.
        if object.contains_key("id") {
            return Ok(Self {
                has_id: true,
                ..Self::default()
            });
        }

        let fields: Fields = serde_json::from_value(Value::Object(object))
            .map_err(|e| ApiError::MalformedBody(e.to_string()))?;

        Ok(Self {
            has_id: false,
            description: fields.description,
            is_completed: fields.is_completed,
        })
    }

    /// Fields for a new item; the description must be present and non-empty.
    pub fn into_new_item(self) -> Result<NewItem, ApiError> {
        match self.description {
            Some(description) if !description.is_empty() => Ok(NewItem {
                description,
                is_completed: self.is_completed,
            }),
            _ => Err(ApiError::DescriptionRequired),
        }
    }

    /// Fields for a wholesale replacement. Omitted fields take their defaults.
    pub fn into_replacement(self) -> NewItem {
        NewItem {
            description: self.description.unwrap_or_default(),
            is_completed: self.is_completed,
        }
    }
}

impl<S> FromRequest<S> for ItemBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::MalformedBody(e.body_text()))?;
        Self::parse(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_reads_as_empty_object() {
        let body = ItemBody::parse(b"").unwrap();
        assert!(!body.has_id);
        assert!(body.description.is_none());
        assert!(!body.is_completed);
    }

    #[test]
    fn detects_id_key_even_when_null() {
        let body = ItemBody::parse(br#"{"id":null,"description":"x"}"#).unwrap();
        assert!(body.has_id);
    }

    #[test]
    fn id_key_wins_over_mistyped_fields() {
        let body = ItemBody::parse(br#"{"id":"x","description":42,"isCompleted":null}"#).unwrap();
        assert!(body.has_id);
    }

    #[test]
    fn reads_camel_case_completion_flag() {
        let body = ItemBody::parse(br#"{"description":"x","isCompleted":true}"#).unwrap();
        assert_eq!(body.description.as_deref(), Some("x"));
        assert!(body.is_completed);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let body = ItemBody::parse(br#"{"description":"x","colour":"red"}"#).unwrap();
        assert_eq!(body.description.as_deref(), Some("x"));
    }

    #[test]
    fn non_object_body_is_malformed() {
        let err = ItemBody::parse(b"[1,2,3]").unwrap_err();
        assert!(matches!(err, ApiError::MalformedBody(_)));
    }

    #[test]
    fn wrong_field_type_is_malformed() {
        let err = ItemBody::parse(br#"{"description":42}"#).unwrap_err();
        assert!(matches!(err, ApiError::MalformedBody(_)));
    }

    #[test]
    fn empty_description_is_required_error() {
        let body = ItemBody::parse(br#"{"description":""}"#).unwrap();
        assert!(matches!(body.into_new_item(), Err(ApiError::DescriptionRequired)));
    }

    #[test]
    fn replacement_defaults_omitted_fields() {
        let body = ItemBody::parse(br#"{"isCompleted":true}"#).unwrap();
        let item = body.into_replacement();
        assert_eq!(item.description, "");
        assert!(item.is_completed);
    }
}
