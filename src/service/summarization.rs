// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::{PipelineOutput, SummarizationRequest, SummarizationResponse};
use crate::engine::{EngineProvider, SummarizationEngine};
use crate::error::AppError;
use anyhow::Context;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, info, warn};

/// 批量摘要服务：按需获取推理引擎，逐条处理文本
pub struct SummarizationService<P: EngineProvider> {
    provider: P,
    engine: Option<Box<dyn SummarizationEngine>>,
}

impl<P: EngineProvider> SummarizationService<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            engine: None,
        }
    }

    pub fn is_engine_loaded(&self) -> bool {
        self.engine.is_some()
    }

    pub fn handle_json(&mut self, input: &str) -> Result<SummarizationResponse, AppError> {
        let request = SummarizationRequest::from_json(input)?;
        self.process(request)
    }

    /// Runs the batch. Output order and length always match `request.texts`;
    /// an engine error aborts the whole batch.
    pub fn process(
        &mut self,
        request: SummarizationRequest,
    ) -> Result<SummarizationResponse, AppError> {
        if request.texts.is_empty() {
            debug!("No texts supplied, skipping model load");
            return Ok(SummarizationResponse::empty());
        }

        let options = request.generation_options();
        let engine = match self.acquire_engine() {
            Ok(engine) => engine,
            Err(AppError::BackendUnavailable(details)) => {
                warn!("Summarization backend unavailable: {}", details);
                return Ok(SummarizationResponse::unavailable(details));
            }
            Err(e) => return Err(e),
        };

        info!(
            "Summarizing {} texts on {} (max_length={})",
            request.texts.len(),
            engine.device_type(),
            options.max_length
        );

        let mut summaries = Vec::with_capacity(request.texts.len());
        for (index, text) in request.texts.iter().enumerate() {
            debug!("Summarizing text {} ({} chars)", index, text.chars().count());
            let output = engine.summarize(text, &options)?;
            if output == PipelineOutput::Unrecognized {
                warn!("Unrecognized output shape for text {}, using empty summary", index);
            }
            summaries.push(output.into_summary());
        }

        Ok(SummarizationResponse::summaries(summaries))
    }

    fn acquire_engine(&mut self) -> Result<&mut Box<dyn SummarizationEngine>, AppError> {
        match &mut self.engine {
            Some(engine) => Ok(engine),
            slot @ None => {
                info!("Acquiring summarization engine");
                Ok(slot.insert(self.provider.acquire()?))
            }
        }
    }
}

/// Top-level boundary: any error or panic inside `f` becomes the
/// `exception` response carrying the full diagnostic text.
pub fn catch_all<F>(f: F) -> SummarizationResponse
where
    F: FnOnce() -> anyhow::Result<SummarizationResponse>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(response)) => response,
        Ok(Err(err)) => {
            error!("Request failed: {:#}", err);
            SummarizationResponse::exception(format!("{:?}", err))
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!("Request panicked: {}", message);
            SummarizationResponse::exception(format!("panicked: {}", message))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Parses `input`, runs it through a fresh service and never fails.
pub fn respond<P: EngineProvider>(provider: P, input: &str) -> SummarizationResponse {
    catch_all(|| {
        let mut service = SummarizationService::new(provider);
        service
            .handle_json(input)
            .context("failed to handle summarization request")
    })
}
