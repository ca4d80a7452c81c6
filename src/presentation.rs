//! Client-side helpers for turning a proxy reply into something displayable.
//!
//! A try-on result is handed from the submit step to the result view as a
//! [`TryOnOutcome`] value instead of through a shared, globally keyed store.

use axum::http::StatusCode;

use crate::types::ProxyResponse;

pub const DEFAULT_IMAGE_PREFIX: &str = "data:image/png;base64,";
pub const SUBMIT_FALLBACK_MESSAGE: &str = "업로드 실패";
pub const RESULT_FALLBACK_MESSAGE: &str = "결과 이미지를 불러올 수 없습니다. 다시 시도해주세요.";

const DISPLAYABLE_PREFIXES: &[&str] = &["http://", "https://", "/", "data:"];

/// Returns `src` unchanged when it already looks like a URL, path or data
/// URL; otherwise treats it as bare base64 PNG data.
pub fn normalize_src(src: &str) -> String {
    let lower = src.to_lowercase();
    if DISPLAYABLE_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        src.to_string()
    } else {
        format!("{DEFAULT_IMAGE_PREFIX}{src}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TryOnOutcome {
    Ready { images: Vec<String> },
    Failed { message: String },
}

impl TryOnOutcome {
    pub fn from_reply(status: StatusCode, envelope: ProxyResponse) -> Self {
        if status.is_success() && !envelope.images.is_empty() {
            TryOnOutcome::Ready {
                images: envelope.images.iter().map(|s| normalize_src(s)).collect(),
            }
        } else if envelope.message.is_empty() {
            TryOnOutcome::Failed {
                message: SUBMIT_FALLBACK_MESSAGE.to_string(),
            }
        } else {
            TryOnOutcome::Failed {
                message: envelope.message,
            }
        }
    }

    /// Image shown in the main result slot.
    pub fn primary(&self) -> Option<&str> {
        match self {
            TryOnOutcome::Ready { images } => images.first().map(String::as_str),
            TryOnOutcome::Failed { .. } => None,
        }
    }

    pub fn extras(&self) -> &[String] {
        match self {
            TryOnOutcome::Ready { images } => images.get(1..).unwrap_or_default(),
            TryOnOutcome::Failed { .. } => &[],
        }
    }

    pub fn display_message(&self) -> Option<&str> {
        match self {
            TryOnOutcome::Ready { .. } => None,
            TryOnOutcome::Failed { message } if message.is_empty() => {
                Some(RESULT_FALLBACK_MESSAGE)
            }
            TryOnOutcome::Failed { message } => Some(message),
        }
    }
}
