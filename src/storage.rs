//! Local storage upload path: writes the garment image to disk instead of
//! forwarding it upstream.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use regex::Regex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use uuid::Uuid;

use crate::error::StorageError;
use crate::types::StoredUpload;

pub const PUBLIC_PREFIX: &str = "/uploads";

static DATA_URL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^data:image/\w+;base64,").expect("valid regex"));

const REQUIRED_FIELDS: &[&str] = &[
    "cloth_image",
    "human_gender",
    "human_height",
    "human_weight",
    "n_images",
];

pub struct ImageStore {
    upload_dir: PathBuf,
}

impl ImageStore {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Decodes the image in `body` and writes one copy per requested image.
    #[tracing::instrument(skip(self, body), fields(upload_dir = %self.upload_dir.display()))]
    pub async fn store(&self, body: &Value) -> Result<StoredUpload, StorageError> {
        if !REQUIRED_FIELDS.iter().all(|f| body.get(f).is_some_and(is_truthy)) {
            return Err(StorageError::MissingFields);
        }

        let image = match &body["cloth_image"] {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let bytes = decode_image(&image)?;
        let copies = copy_count(&body["n_images"])?;

        tokio::fs::create_dir_all(&self.upload_dir).await?;

        let mut images = Vec::new();
        for i in 0..copies {
            let name = format!("{}-{i}.png", Uuid::new_v4().simple());
            images
                .try_reserve(1)
                .map_err(|_| StorageError::UnsupportedCount(copies as f64))?;
            tokio::fs::write(self.upload_dir.join(&name), &bytes).await?;
            images.push(format!("{PUBLIC_PREFIX}/{name}"));
        }

        tracing::info!(copies, size = bytes.len(), "Stored uploaded image");

        Ok(StoredUpload {
            ok: true,
            images,
            gender: body["human_gender"].clone(),
            height: body["human_height"].clone(),
            weight: body["human_weight"].clone(),
            n_images: body["n_images"].clone(),
        })
    }
}

/// Strips an optional `data:image/<type>;base64,` prefix and decodes the rest.
pub fn decode_image(encoded: &str) -> Result<Vec<u8>, StorageError> {
    let payload = DATA_URL_PREFIX.replace(encoded, "");
    Ok(BASE64.decode(payload.as_bytes())?)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Number of files to write: every integer `i` with `0 <= i < n`. Numeric
/// strings are read as numbers.
fn copy_count(n_images: &Value) -> Result<u64, StorageError> {
    let n = match n_images {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| !n.is_nan())
    .ok_or(StorageError::InvalidCount)?;

    if n <= 0.0 {
        return Ok(0);
    }
    let copies = n.ceil();
    // 2^64 is the first value that no longer fits
    if !copies.is_finite() || copies >= 18_446_744_073_709_551_616.0 {
        return Err(StorageError::UnsupportedCount(n));
    }
    Ok(copies as u64)
}
