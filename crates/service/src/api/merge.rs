use crate::api::ApiJson;
use crate::error::{Result, ServiceError};
use crate::state::AppState;
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use careform_core::{CONTENT_TYPE, OUTPUT_FILENAME, Section, SectionTexts, char_len, remaining};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lists, comma separated, the sections whose text was cut short.
pub const TRUNCATED_HEADER: HeaderName = HeaderName::from_static("x-careform-truncated");
/// Lists, comma separated, the sections whose placeholder was absent.
pub const MISSING_HEADER: HeaderName = HeaderName::from_static("x-careform-missing");

fn section_list(sections: &[Section]) -> Result<Option<HeaderValue>> {
    if sections.is_empty() {
        return Ok(None);
    }
    let keys: Vec<&str> = sections.iter().map(|s| s.key()).collect();
    HeaderValue::from_str(&keys.join(","))
        .map(Some)
        .map_err(|e| ServiceError::Internal(e.to_string()))
}

#[derive(Debug, Deserialize)]
pub struct MergeRequest {
    #[serde(default)]
    pub beliefs: String,
    #[serde(default)]
    pub values: String,
    #[serde(default)]
    pub wishes: String,
    /// Template profile name; the configured default when absent.
    #[serde(default)]
    pub template: Option<String>,
}

impl MergeRequest {
    fn texts(&self) -> SectionTexts {
        SectionTexts::new(&*self.beliefs, &*self.values, &*self.wishes)
    }
}

#[derive(Debug, Serialize)]
pub struct SectionStatus {
    pub section: Section,
    pub length: usize,
    pub remaining: isize,
    pub over_by: usize,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub max_chars: usize,
    pub sections: Vec<SectionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Reports per-section counts against the limit without merging anything.
pub async fn validate(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<MergeRequest>,
) -> Json<ValidateResponse> {
    let texts = req.texts();
    let max_chars = state.engine.normalizer().max_chars;
    let sections = texts
        .iter()
        .map(|(section, text)| {
            let remaining = remaining(text, max_chars);
            SectionStatus {
                section,
                length: char_len(text),
                remaining,
                over_by: if remaining < 0 { remaining.unsigned_abs() } else { 0 },
            }
        })
        .collect();
    let result = state.engine.validate(&texts);

    Json(ValidateResponse {
        valid: result.is_ok(),
        max_chars,
        sections,
        message: result.err().map(|e| e.to_string()),
    })
}

/// Merges the three sections into the requested template and returns the PDF.
pub async fn update_pdf(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<MergeRequest>,
) -> Result<impl IntoResponse> {
    let profile = state
        .profile(req.template.as_deref())
        .cloned()
        .ok_or_else(|| ServiceError::TemplateNotFound(req.template.clone().unwrap_or_default()))?;

    // 1. Reject bad input before taking a merge slot
    let sections = state.engine.validate(&req.texts())?;

    // 2. Wait a bounded time for a permit
    let timeout = Duration::from_millis(state.config.concurrency.queue_timeout_ms);
    let _permit = tokio::time::timeout(timeout, state.merge_permits.clone().acquire_owned())
        .await
        .map_err(|_| ServiceError::ServiceOverloaded)?
        .map_err(|_| ServiceError::ServiceOverloaded)?;

    tracing::info!("Merging into profile '{}'", profile.name);

    // 3. The merge is CPU-bound and synchronous
    let engine = state.engine.clone();
    let output = tokio::task::spawn_blocking(move || engine.merge_from_source(&profile, &sections))
        .await
        .map_err(|e| ServiceError::Internal(format!("merge task failed: {}", e)))??;

    if !output.report.is_lossless() {
        tracing::warn!("Lossy merge: {:?}", output.report);
    }
    tracing::info!(
        "Merge completed with {} ({} bytes)",
        output.strategy,
        output.bytes.len()
    );

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", OUTPUT_FILENAME))
            .map_err(|e| ServiceError::Internal(e.to_string()))?,
    );
    if let Some(value) = section_list(&output.report.truncated_sections())? {
        headers.insert(TRUNCATED_HEADER, value);
    }
    if let Some(value) = section_list(&output.report.missing)? {
        headers.insert(MISSING_HEADER, value);
    }

    Ok((StatusCode::OK, headers, output.bytes))
}
