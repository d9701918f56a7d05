// Copyright (c) 2025 Kirky.X
//
// Licensed under MIT License
// See LICENSE file in the project root for full license information

//! 测试用推理引擎
//!
//! 提供不依赖模型权重的确定性引擎与可观测的 Provider。

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use local_summarizer::{
    AppError, EngineProvider, GenerationOptions, PipelineOutput, SummarizationEngine,
    SummaryRecord,
};

/// 引擎的输出行为
#[derive(Debug, Clone)]
pub enum StubBehavior {
    /// `"<summary of: " + text + ">"`
    Echo,
    /// 按调用顺序依次返回给定结果
    Script(Vec<PipelineOutput>),
    /// 在第 n 次调用时返回推理错误
    FailAt(usize),
    /// 在第 n 次调用时 panic
    PanicAt(usize),
}

pub struct StubEngine {
    behavior: StubBehavior,
    calls: Rc<RefCell<Vec<(String, GenerationOptions)>>>,
}

impl SummarizationEngine for StubEngine {
    fn summarize(
        &mut self,
        text: &str,
        options: &GenerationOptions,
    ) -> Result<PipelineOutput, AppError> {
        let index = self.calls.borrow().len();
        self.calls.borrow_mut().push((text.to_string(), *options));

        match &self.behavior {
            StubBehavior::Echo => Ok(PipelineOutput::single(format!("<summary of: {}>", text))),
            StubBehavior::Script(outputs) => Ok(outputs
                .get(index)
                .cloned()
                .unwrap_or(PipelineOutput::Unrecognized)),
            StubBehavior::FailAt(n) if *n == index => {
                Err(AppError::InferenceError(format!("stub failure on text {}", index)))
            }
            StubBehavior::PanicAt(n) if *n == index => panic!("stub panic on text {}", index),
            _ => Ok(PipelineOutput::List(vec![SummaryRecord::new(text)])),
        }
    }
}

/// 记录获取次数和每次调用参数的 Provider
#[derive(Clone)]
pub struct StubProvider {
    behavior: StubBehavior,
    available: bool,
    acquired: Rc<Cell<usize>>,
    calls: Rc<RefCell<Vec<(String, GenerationOptions)>>>,
}

impl StubProvider {
    pub fn new(behavior: StubBehavior) -> Self {
        Self {
            behavior,
            available: true,
            acquired: Rc::new(Cell::new(0)),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn echo() -> Self {
        Self::new(StubBehavior::Echo)
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::echo()
        }
    }

    pub fn acquired(&self) -> usize {
        self.acquired.get()
    }

    pub fn calls(&self) -> Vec<(String, GenerationOptions)> {
        self.calls.borrow().clone()
    }
}

impl EngineProvider for StubProvider {
    fn acquire(&self) -> Result<Box<dyn SummarizationEngine>, AppError> {
        self.acquired.set(self.acquired.get() + 1);
        if !self.available {
            return Err(AppError::BackendUnavailable(
                "No module named 'candle'".to_string(),
            ));
        }
        Ok(Box::new(StubEngine {
            behavior: self.behavior.clone(),
            calls: Rc::clone(&self.calls),
        }))
    }
}
