// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod output;

pub use output::{PipelineOutput, SummaryRecord};

use crate::error::AppError;
use crate::utils::constants::{DEFAULT_MAX_LENGTH, EXCEPTION_KIND, MIN_LENGTH, UNAVAILABLE_PREFIX};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
struct RawRequest {
    texts: Option<Vec<String>>,
    max_length: Option<usize>,
}

/// 一次调用对应的摘要请求，`texts` 缺失与空数组等价
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizationRequest {
    pub texts: Vec<String>,
    pub max_length: usize,
}

impl Default for SummarizationRequest {
    fn default() -> Self {
        Self {
            texts: Vec::new(),
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl SummarizationRequest {
    pub fn new(texts: Vec<String>, max_length: usize) -> Self {
        Self { texts, max_length }
    }

    /// Parses the stdin payload. The root must be a JSON object; a struct would
    /// otherwise also accept the positional array form.
    pub fn from_json(input: &str) -> Result<Self, AppError> {
        let value: Value = serde_json::from_str(input)?;
        if !value.is_object() {
            return Err(AppError::InvalidInput(format!(
                "request must be a JSON object, got {}",
                json_type_name(&value)
            )));
        }

        let raw: RawRequest = serde_json::from_value(value)?;
        Ok(Self {
            texts: raw.texts.unwrap_or_default(),
            max_length: raw.max_length.unwrap_or(DEFAULT_MAX_LENGTH),
        })
    }

    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions::with_max_length(self.max_length)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// 每次调用传给推理后端的解码参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOptions {
    pub max_length: usize,
    pub min_length: usize,
    pub do_sample: bool,
}

impl GenerationOptions {
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length,
            min_length: MIN_LENGTH,
            do_sample: false,
        }
    }

    /// `min_length` never exceeds `max_length`.
    pub fn effective_min_length(&self) -> usize {
        self.min_length.min(self.max_length)
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::with_max_length(DEFAULT_MAX_LENGTH)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SummarizationResponse {
    Summaries { summaries: Vec<String> },
    Unavailable { error: String },
    Exception { error: String, trace: String },
}

impl SummarizationResponse {
    pub fn summaries(summaries: Vec<String>) -> Self {
        SummarizationResponse::Summaries { summaries }
    }

    pub fn empty() -> Self {
        Self::summaries(Vec::new())
    }

    pub fn unavailable(details: impl AsRef<str>) -> Self {
        SummarizationResponse::Unavailable {
            error: format!("{}{}", UNAVAILABLE_PREFIX, details.as_ref()),
        }
    }

    pub fn exception(trace: impl Into<String>) -> Self {
        SummarizationResponse::Exception {
            error: EXCEPTION_KIND.to_string(),
            trace: trace.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, SummarizationResponse::Summaries { .. })
    }

    /// Single-line JSON for stdout.
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            json!({ "error": EXCEPTION_KIND, "trace": e.to_string() }).to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = SummarizationRequest::from_json("{}").unwrap();
        assert!(request.texts.is_empty());
        assert_eq!(request.max_length, 150);
    }

    #[test]
    fn test_request_null_fields_use_defaults() {
        let request =
            SummarizationRequest::from_json(r#"{"texts": null, "max_length": null}"#).unwrap();
        assert_eq!(request, SummarizationRequest::default());
    }

    #[test]
    fn test_request_full() {
        let request = SummarizationRequest::from_json(
            r#"{"texts": ["first", "second"], "max_length": 50, "extra": true}"#,
        )
        .unwrap();
        assert_eq!(request.texts, vec!["first", "second"]);
        assert_eq!(request.max_length, 50);
    }

    #[test]
    fn test_request_rejects_non_object() {
        let err = SummarizationRequest::from_json(r#"[["a"], 50]"#).unwrap_err();
        match err {
            AppError::InvalidInput(msg) => assert!(msg.contains("array")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_request_rejects_wrong_types() {
        assert!(SummarizationRequest::from_json(r#"{"texts": [1, 2]}"#).is_err());
        assert!(SummarizationRequest::from_json(r#"{"texts": "one"}"#).is_err());
        assert!(SummarizationRequest::from_json(r#"{"max_length": "long"}"#).is_err());
        assert!(SummarizationRequest::from_json(r#"{"max_length": 12.5}"#).is_err());
        assert!(SummarizationRequest::from_json(r#"{"max_length": -1}"#).is_err());
        assert!(SummarizationRequest::from_json("not json").is_err());
    }

    #[test]
    fn test_generation_options() {
        let options = SummarizationRequest::new(vec![], 50).generation_options();
        assert_eq!(options.max_length, 50);
        assert_eq!(options.min_length, 20);
        assert!(!options.do_sample);
        assert_eq!(options.effective_min_length(), 20);

        let short = GenerationOptions::with_max_length(8);
        assert_eq!(short.effective_min_length(), 8);
    }

    #[test]
    fn test_response_shapes() {
        assert_eq!(
            SummarizationResponse::empty().to_json_line(),
            r#"{"summaries":[]}"#
        );
        assert_eq!(
            SummarizationResponse::summaries(vec!["a".into(), "b".into()]).to_json_line(),
            r#"{"summaries":["a","b"]}"#
        );
        assert_eq!(
            SummarizationResponse::unavailable("no backend").to_json_line(),
            r#"{"error":"transformers not available: no backend"}"#
        );
        assert_eq!(
            SummarizationResponse::exception("boom").to_json_line(),
            r#"{"error":"exception","trace":"boom"}"#
        );
    }

    #[test]
    fn test_response_is_single_line() {
        let line = SummarizationResponse::exception("line one\nline two").to_json_line();
        assert!(!line.contains('\n'));
        assert!(SummarizationResponse::exception("x").is_error());
        assert!(!SummarizationResponse::empty().is_error());
    }
}
