use jiff::Timestamp;
use pinhole_core::{ClickEvent, LinkStats, ShortenParams};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /shorturls`.
///
/// Fields are loosely typed so that a missing or odd value is reported by
/// the registry (or defaulted) rather than rejected by the JSON extractor.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUrlRequest {
    pub url: Option<String>,
    pub validity: Option<Value>,
    pub shortcode: Option<Value>,
}

impl CreateUrlRequest {
    /// The validity in whole minutes, if it is an integral JSON number.
    ///
    /// `5` and `5.0` both count; `"5"`, `5.5` and out-of-range numbers do not.
    pub fn validity_minutes(&self) -> Option<i64> {
        const MAX_EXACT_F64: f64 = 9_007_199_254_740_992.0;

        let value = self.validity.as_ref()?;
        value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= MAX_EXACT_F64)
                .map(|f| f as i64)
        })
    }

    /// The requested shortcode as text.
    ///
    /// Non-string values become their JSON text, so `12345` requests the
    /// code `"12345"` and an object fails the usual format check.
    pub fn shortcode_text(&self) -> Option<String> {
        match self.shortcode.as_ref()? {
            Value::Null => None,
            Value::String(code) => Some(code.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl From<CreateUrlRequest> for ShortenParams {
    fn from(request: CreateUrlRequest) -> Self {
        ShortenParams {
            validity_minutes: request.validity_minutes(),
            custom_code: request.shortcode_text(),
            original_url: request.url.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlResponse {
    pub short_link: String,
    pub expiry: Timestamp,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub original_url: String,
    pub created_at: Timestamp,
    pub expiry: Timestamp,
    pub total_clicks: usize,
    pub clicks: Vec<ClickEvent>,
}

impl From<LinkStats> for StatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            original_url: stats.original_url,
            created_at: stats.created_at,
            expiry: stats.expires_at,
            total_clicks: stats.total_clicks,
            clicks: stats.clicks,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
