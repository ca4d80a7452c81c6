use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "남성")]
    Male,
    #[serde(rename = "여성")]
    Female,
}

impl Gender {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "남성" => Some(Gender::Male),
            "여성" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// A try-on request that has passed structural validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryOnRequest {
    /// Base64 garment photo, optionally data-URL prefixed
    #[serde(rename = "cloth_image")]
    pub garment_image: String,
    #[serde(rename = "human_gender")]
    pub subject_gender: Gender,
    #[serde(rename = "human_height")]
    pub subject_height_bucket: String,
    #[serde(rename = "human_weight")]
    pub subject_weight_bucket: String,
    /// Forwarded exactly as received; no range is enforced
    #[serde(rename = "n_images")]
    pub image_count: serde_json::Number,
}

/// The only response shape the proxy ever returns to its callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyResponse {
    #[serde(rename = "viton_images")]
    pub images: Vec<String>,
    pub message: String,
}

impl ProxyResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            images: Vec::new(),
            message: message.into(),
        }
    }
}

/// Raw outcome of one upstream call.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    /// `None` when the upstream body was not valid JSON
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct StoredUpload {
    pub ok: bool,
    pub images: Vec<String>,
    pub gender: serde_json::Value,
    pub height: serde_json::Value,
    pub weight: serde_json::Value,
    pub n_images: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct StorageFailure {
    pub ok: bool,
    pub error: String,
}
