//! Client for the external AI suggestion service.
//!
//! The service receives a capped, sanitized snapshot of the current
//! inventory and returns a list of suggestions that replaces the local
//! rule-based list wholesale. Every failure mode (network, rate limit,
//! usage cap, malformed response) is logged and masked by falling back
//! to `suggest::generate`; callers never see a raw network error.

use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::AssistantConfig;
use crate::model::{
    InventoryItem, ItemCategory, KitchenZone, Suggestion, SuggestionAction, SuggestionPriority,
    SuggestionType, ZoneType,
};
use crate::suggest;
use crate::types::Vec3;

/// At most this many zones are sent to the assistant.
pub const MAX_ZONES_IN_REQUEST: usize = 50;

/// At most this many items are sent to the assistant.
pub const MAX_ITEMS_IN_REQUEST: usize = 500;

/// Maximum length of any free-text field sent to the assistant.
const MAX_TEXT_LEN: usize = 500;

fn user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;
    format!("stow-it-now/{version} ({os}; {arch})")
}

/// Failure modes of the assistant call.
#[derive(Debug)]
pub enum AssistantError {
    RateLimited,
    UsageLimit,
    Failed(String),
}

impl std::fmt::Display for AssistantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssistantError::RateLimited => write!(f, "Assistant rate limit reached"),
            AssistantError::UsageLimit => write!(f, "Assistant usage limit reached"),
            AssistantError::Failed(msg) => write!(f, "Assistant request failed: {}", msg),
        }
    }
}

impl std::error::Error for AssistantError {}

/// Which generator produced a suggestion list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    Assistant,
    Fallback,
}

/// Strips prompt-hostile characters from user-entered text.
///
/// Angle brackets are removed, runs of newlines collapse to one, and
/// the result is truncated to a fixed length.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len().min(MAX_TEXT_LEN));
    let mut last_was_newline = false;
    for ch in input.chars() {
        if ch == '<' || ch == '>' {
            continue;
        }
        if ch == '\n' {
            if last_was_newline {
                continue;
            }
            last_was_newline = true;
        } else {
            last_was_newline = false;
        }
        out.push(ch);
        if out.chars().count() >= MAX_TEXT_LEN {
            break;
        }
    }
    out
}

#[derive(Debug, Serialize)]
struct ZonePayload {
    id: Uuid,
    name: String,
    zone_type: ZoneType,
    dims: Vec3,
}

#[derive(Debug, Serialize)]
struct ItemPayload {
    id: Uuid,
    name: String,
    category: ItemCategory,
    zone_id: Option<Uuid>,
    quantity: f64,
    unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiry_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct SuggestionRequest {
    zones: Vec<ZonePayload>,
    items: Vec<ItemPayload>,
}

/// Wire shape of one assistant suggestion; ids are assigned locally.
#[derive(Debug, Deserialize)]
struct SuggestionPayload {
    suggestion_type: SuggestionType,
    title: String,
    description: String,
    #[serde(default)]
    zone_id: Option<Uuid>,
    #[serde(default)]
    item_ids: Option<Vec<Uuid>>,
    priority: SuggestionPriority,
    #[serde(default)]
    action: Option<SuggestionAction>,
}

impl SuggestionPayload {
    fn into_suggestion(self) -> Suggestion {
        Suggestion {
            id: Uuid::new_v4(),
            suggestion_type: self.suggestion_type,
            title: self.title,
            description: self.description,
            zone_id: self.zone_id,
            item_ids: self.item_ids,
            priority: self.priority,
            action: self.action,
        }
    }
}

fn build_request(items: &[InventoryItem], zones: &[KitchenZone]) -> SuggestionRequest {
    SuggestionRequest {
        zones: zones
            .iter()
            .take(MAX_ZONES_IN_REQUEST)
            .map(|zone| ZonePayload {
                id: zone.id,
                name: sanitize(&zone.name),
                zone_type: zone.zone_type,
                dims: zone.dims,
            })
            .collect(),
        items: items
            .iter()
            .take(MAX_ITEMS_IN_REQUEST)
            .map(|item| ItemPayload {
                id: item.id,
                name: sanitize(&item.name),
                category: item.category,
                zone_id: item.zone_id,
                quantity: item.quantity,
                unit: sanitize(&item.unit),
                expiry_date: item.expiry_date,
            })
            .collect(),
    }
}

fn classify_status(status: StatusCode) -> Result<(), AssistantError> {
    if status.is_success() {
        return Ok(());
    }
    match status {
        StatusCode::TOO_MANY_REQUESTS => Err(AssistantError::RateLimited),
        StatusCode::PAYMENT_REQUIRED => Err(AssistantError::UsageLimit),
        other => Err(AssistantError::Failed(format!(
            "unexpected status {}",
            other
        ))),
    }
}

/// Requests suggestions from the configured assistant endpoint.
async fn fetch_suggestions(
    config: &AssistantConfig,
    items: &[InventoryItem],
    zones: &[KitchenZone],
) -> Result<Vec<Suggestion>, AssistantError> {
    let endpoint = config
        .endpoint()
        .ok_or_else(|| AssistantError::Failed("no assistant endpoint configured".to_string()))?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs()))
        .user_agent(user_agent())
        .build()
        .map_err(|err| AssistantError::Failed(err.to_string()))?;

    let mut request = client.post(endpoint).json(&build_request(items, zones));
    if let Some(key) = config.api_key() {
        request = request.bearer_auth(key);
    }

    let response = request
        .send()
        .await
        .map_err(|err| AssistantError::Failed(err.to_string()))?;

    classify_status(response.status())?;

    let payloads: Vec<SuggestionPayload> = response
        .json()
        .await
        .map_err(|err| AssistantError::Failed(format!("malformed response: {}", err)))?;

    Ok(payloads
        .into_iter()
        .map(SuggestionPayload::into_suggestion)
        .collect())
}

/// Fetches assistant suggestions, falling back to the rule-based
/// generator on any failure. Returns the list and its source.
pub async fn suggestions_with_fallback(
    config: &AssistantConfig,
    items: &[InventoryItem],
    zones: &[KitchenZone],
    today: NaiveDate,
) -> (Vec<Suggestion>, SuggestionSource) {
    if config.endpoint().is_none() {
        return (suggest::generate(items, zones, today), SuggestionSource::Fallback);
    }

    match fetch_suggestions(config, items, zones).await {
        Ok(suggestions) => (suggestions, SuggestionSource::Assistant),
        Err(err) => {
            eprintln!("⚠️ {}. Using local suggestions.", err);
            (suggest::generate(items, zones, today), SuggestionSource::Fallback)
        }
    }
}
