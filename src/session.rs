//! Best-effort peek at the session claims inside a JWT.
//!
//! The signature is never checked. This only reads `userId` / `sessionId`
//! from the payload segment for logging and routing; anything that goes wrong
//! yields empty strings.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::Serialize;
use serde_json::Value;

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Session identifiers carried by a token. Both empty when unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub user_id: String,
    pub session_id: String,
}

impl SessionData {
    pub fn is_empty(&self) -> bool {
        self.user_id.is_empty() && self.session_id.is_empty()
    }
}

/// Read the session claims from `token`, or empty strings on any failure.
pub fn session_data(token: Option<&str>) -> SessionData {
    let Some(token) = token else {
        return SessionData::default();
    };

    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return SessionData::default();
    }

    match decode_payload(segments[1]) {
        Ok(payload) => SessionData {
            user_id: claim(&payload, "userId"),
            session_id: claim(&payload, "sessionId"),
        },
        Err(e) => {
            tracing::error!("Error to get session data: {}", e);
            SessionData::default()
        }
    }
}

fn decode_payload(segment: &str) -> Result<Value, String> {
    let engine = if segment.contains(['-', '_']) {
        &URL_SAFE_LENIENT
    } else {
        &STANDARD_LENIENT
    };
    let bytes = engine
        .decode(segment)
        .map_err(|e| format!("invalid base64 payload: {}", e))?;
    let text = String::from_utf8(bytes).map_err(|e| format!("payload is not UTF-8: {}", e))?;
    let payload: Value =
        serde_json::from_str(&text).map_err(|e| format!("payload is not JSON: {}", e))?;
    if !payload.is_object() {
        return Err("payload is not a JSON object".to_string());
    }
    Ok(payload)
}

fn claim(payload: &Value, key: &str) -> String {
    match payload.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
