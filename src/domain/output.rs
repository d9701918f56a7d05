// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub summary_text: String,
}

impl SummaryRecord {
    pub fn new(summary_text: impl Into<String>) -> Self {
        Self {
            summary_text: summary_text.into(),
        }
    }
}

/// 推理后端返回的结果形态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutput {
    Single(SummaryRecord),
    List(Vec<SummaryRecord>),
    Unrecognized,
}

impl PipelineOutput {
    pub fn single(summary_text: impl Into<String>) -> Self {
        PipelineOutput::Single(SummaryRecord::new(summary_text))
    }

    /// Flattens any shape into one summary string. Unrecognized shapes and
    /// empty lists become `""`.
    pub fn into_summary(self) -> String {
        match self {
            PipelineOutput::Single(record) => record.summary_text,
            PipelineOutput::List(records) => records
                .into_iter()
                .next()
                .map(|record| record.summary_text)
                .unwrap_or_default(),
            PipelineOutput::Unrecognized => String::new(),
        }
    }
}

impl From<Value> for PipelineOutput {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => PipelineOutput::single(text),
            Value::Object(_) => serde_json::from_value::<SummaryRecord>(value)
                .map(PipelineOutput::Single)
                .unwrap_or(PipelineOutput::Unrecognized),
            Value::Array(items) => {
                let mut items = items.into_iter();
                let Some(first) = items.next() else {
                    return PipelineOutput::Unrecognized;
                };
                let Ok(first) = serde_json::from_value::<SummaryRecord>(first) else {
                    return PipelineOutput::Unrecognized;
                };

                let mut records = vec![first];
                records.extend(items.filter_map(|item| serde_json::from_value(item).ok()));
                PipelineOutput::List(records)
            }
            _ => PipelineOutput::Unrecognized,
        }
    }
}
