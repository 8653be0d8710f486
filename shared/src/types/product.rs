use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Raised when an incoming payload cannot be turned into a valid [`Product`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataValidationError {
    #[error("Invalid product: missing {0}")]
    MissingField(&'static str),

    #[error("Invalid product: field {0} has the wrong type")]
    InvalidType(&'static str),

    #[error("{0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

/// A single catalog entry.
///
/// `id` is `None` until the store has assigned one; every product returned
/// from the API carries a concrete id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub available: bool,
    pub category: String,
}

impl Product {
    /// Build a `Product` from an untyped JSON payload, validating every
    /// field explicitly so the caller gets a precise error instead of a
    /// generic serde message.
    ///
    /// The `id` key is ignored on input — ids are assigned by the store,
    /// never by the client.
    pub fn deserialize(data: &Value) -> Result<Self, DataValidationError> {
        let obj = data
            .as_object()
            .ok_or_else(|| DataValidationError::Invalid("Payload is not a JSON object".into()))?;

        let name = required_str(obj, "name")?;
        let description = required_str(obj, "description")?;
        let category = required_str(obj, "category")?;

        let price = obj
            .get("price")
            .ok_or(DataValidationError::MissingField("price"))?
            .as_f64()
            .ok_or(DataValidationError::InvalidType("price"))?;
        if price < 0.0 {
            return Err(DataValidationError::Invalid(
                "Invalid product: price must not be negative".into(),
            ));
        }

        let available = obj
            .get("available")
            .ok_or(DataValidationError::MissingField("available"))?
            .as_bool()
            .ok_or(DataValidationError::InvalidType("available"))?;

        Ok(Self {
            id: None,
            name,
            description,
            price,
            available,
            category,
        })
    }

    /// Copy of this product with the given store-assigned id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

fn required_str(
    obj: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<String, DataValidationError> {
    obj.get(field)
        .ok_or(DataValidationError::MissingField(field))?
        .as_str()
        .map(str::to_string)
        .ok_or(DataValidationError::InvalidType(field))
}
