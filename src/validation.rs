use serde_json::Value;

use crate::error::ValidationError;
use crate::types::{Gender, TryOnRequest};

/// Structural check of an untrusted request body. Only field presence and
/// JSON types are checked; values are not range- or format-checked.
pub fn validate_request(value: &Value) -> Result<TryOnRequest, ValidationError> {
    let object = value.as_object().ok_or(ValidationError::NotAnObject)?;

    let string_field = |name: &'static str| {
        object
            .get(name)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or(ValidationError::InvalidField(name))
    };

    let garment_image = string_field("cloth_image")?;
    let subject_gender = object
        .get("human_gender")
        .and_then(Value::as_str)
        .and_then(Gender::from_label)
        .ok_or(ValidationError::InvalidField("human_gender"))?;
    let subject_height_bucket = string_field("human_height")?;
    let subject_weight_bucket = string_field("human_weight")?;
    let image_count = match object.get("n_images") {
        Some(Value::Number(n)) => n.clone(),
        _ => return Err(ValidationError::InvalidField("n_images")),
    };

    Ok(TryOnRequest {
        garment_image,
        subject_gender,
        subject_height_bucket,
        subject_weight_bucket,
        image_count,
    })
}
