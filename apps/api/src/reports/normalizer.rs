//! Structured-response normalization for generative-model output.
//!
//! Protocol, in order:
//! 1. trim, strip a fenced code block if present
//! 2. parse; check shape and required top-level keys; deserialize
//! 3. on failure, retry on the span between the first opening and last closing
//!    brace/bracket of the trimmed original text
//! 4. on failure, hand back the caller's fallback value with a reason
//!
//! Schemas and fallback values belong to each call site; this module only owns
//! the protocol.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Top-level JSON shape a call site expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Object,
    Array,
}

impl Shape {
    fn delimiters(self) -> (char, char) {
        match self {
            Shape::Object => ('{', '}'),
            Shape::Array => ('[', ']'),
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Shape::Object => value.is_object(),
            Shape::Array => value.is_array(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Shape::Object => "object",
            Shape::Array => "array",
        }
    }
}

/// What a call site expects back from the model.
#[derive(Debug, Clone, Copy)]
pub struct SchemaHint {
    pub shape: Shape,
    /// Keys that must be present on an object response.
    pub required_keys: &'static [&'static str],
}

impl SchemaHint {
    pub const fn object(required_keys: &'static [&'static str]) -> Self {
        Self {
            shape: Shape::Object,
            required_keys,
        }
    }

    pub const fn array() -> Self {
        Self {
            shape: Shape::Array,
            required_keys: &[],
        }
    }
}

/// Why a single parse attempt was rejected.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("invalid JSON: {0}")]
    Syntax(serde_json::Error),

    #[error("expected a JSON {expected}")]
    WrongShape { expected: &'static str },

    #[error("missing required key '{0}'")]
    MissingKey(&'static str),

    #[error("schema mismatch: {0}")]
    Schema(serde_json::Error),
}

/// Why normalization gave up. The `Display` text becomes the fallback reason.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("model returned empty text")]
    Empty,

    #[error("direct parse failed: {direct}; no {shape} delimiters found for recovery")]
    NoRecoverySpan {
        direct: AttemptError,
        shape: &'static str,
    },

    #[error("direct parse failed: {direct}; recovery parse failed: {recovery}")]
    RecoveryFailed {
        direct: AttemptError,
        recovery: AttemptError,
    },
}

/// A validated model answer, or a placeholder built by the caller.
///
/// Serialized with a `status` tag so clients can tell the two apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StructuredResponse<T> {
    Ok { value: T },
    Fallback { value: T, reason: String },
}

impl<T> StructuredResponse<T> {
    pub fn fallback(value: T, reason: impl Into<String>) -> Self {
        StructuredResponse::Fallback {
            value,
            reason: reason.into(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, StructuredResponse::Fallback { .. })
    }

    pub fn value(&self) -> &T {
        match self {
            StructuredResponse::Ok { value } | StructuredResponse::Fallback { value, .. } => value,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            StructuredResponse::Ok { .. } => None,
            StructuredResponse::Fallback { reason, .. } => Some(reason.as_str()),
        }
    }

    pub fn into_value(self) -> T {
        match self {
            StructuredResponse::Ok { value } | StructuredResponse::Fallback { value, .. } => value,
        }
    }
}

/// Normalizes raw model text, substituting `fallback()` when every parse attempt fails.
pub fn normalize<T, F>(raw_text: &str, hint: &SchemaHint, fallback: F) -> StructuredResponse<T>
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match parse_structured(raw_text, hint) {
        Ok(value) => StructuredResponse::Ok { value },
        Err(e) => {
            tracing::warn!("Falling back to placeholder response: {e}");
            StructuredResponse::fallback(fallback(), e.to_string())
        }
    }
}

/// Runs the direct and recovery parse attempts without a fallback.
pub fn parse_structured<T: DeserializeOwned>(
    raw_text: &str,
    hint: &SchemaHint,
) -> Result<T, NormalizeError> {
    let trimmed = raw_text.trim();
    if trimmed.is_empty() {
        return Err(NormalizeError::Empty);
    }

    let direct = match attempt::<T>(strip_code_fences(trimmed), hint) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let Some(span) = recovery_span(trimmed, hint.shape) else {
        return Err(NormalizeError::NoRecoverySpan {
            direct,
            shape: hint.shape.name(),
        });
    };

    attempt::<T>(span, hint).map_err(|recovery| NormalizeError::RecoveryFailed { direct, recovery })
}

fn attempt<T: DeserializeOwned>(candidate: &str, hint: &SchemaHint) -> Result<T, AttemptError> {
    let value: Value = serde_json::from_str(candidate).map_err(AttemptError::Syntax)?;

    if !hint.shape.matches(&value) {
        return Err(AttemptError::WrongShape {
            expected: hint.shape.name(),
        });
    }
    if let Some(object) = value.as_object() {
        if let Some(missing) = hint.required_keys.iter().find(|k| !object.contains_key(**k)) {
            return Err(AttemptError::MissingKey(*missing));
        }
    }

    serde_json::from_value(value).map_err(AttemptError::Schema)
}

/// Strips a leading fence (with optional language hint) and a trailing fence.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    let rest = rest.trim_start();
    rest.strip_suffix("```").map(str::trim).unwrap_or(rest)
}

/// First opening delimiter through the last closing delimiter, inclusive.
fn recovery_span(text: &str, shape: Shape) -> Option<&str> {
    let (open, close) = shape.delimiters();
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}
