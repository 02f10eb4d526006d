//! Timed auto-run loop
//!
//! [`AutoRun`] calls [`Engine::step`] repeatedly with a fixed pause between steps.
//! Cancellation is cooperative: the [`CancelToken`] is checked once per
//! iteration, so a cancel takes effect within one delay period.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::interpreter::constants::DEFAULT_STEP_DELAY_MS;
use crate::interpreter::engine::{Engine, HaltReason, Step};
use crate::interpreter::errors::RuntimeError;
use crate::language::Instruction;

/// Shared "keep running" switch; clones observe the same flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// How an auto-run ended without a fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    Halted(HaltReason),
    Cancelled,
    /// The configured step limit was reached
    StepLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub end: RunEnd,
    /// Instructions executed during this run
    pub steps: u64,
}

/// Settings for a timed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoRun {
    pub delay: Duration,
    pub max_steps: Option<u64>,
}

impl Default for AutoRun {
    fn default() -> Self {
        AutoRun {
            delay: Duration::from_millis(DEFAULT_STEP_DELAY_MS),
            max_steps: None,
        }
    }
}

impl AutoRun {
    pub fn new(delay: Duration) -> Self {
        AutoRun {
            delay,
            max_steps: None,
        }
    }

    pub fn with_max_steps(mut self, max_steps: Option<u64>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Step `engine` until it halts, faults, is cancelled or hits the step limit.
    ///
    /// `on_step` sees the engine after every executed instruction, which is where
    /// drivers pick up `Print` output. A fault ends the run and is returned as is.
    pub fn run<F>(
        &self,
        engine: &mut Engine<'_>,
        cancel: &CancelToken,
        mut on_step: F,
    ) -> Result<RunSummary, RuntimeError>
    where
        F: FnMut(&Engine<'_>, Instruction),
    {
        let first = engine.steps();

        loop {
            let steps = engine.steps() - first;

            if cancel.is_cancelled() {
                info!(steps, "auto-run cancelled");
                return Ok(RunSummary {
                    end: RunEnd::Cancelled,
                    steps,
                });
            }

            if self.max_steps.is_some_and(|max| steps >= max) {
                info!(steps, "auto-run hit its step limit");
                return Ok(RunSummary {
                    end: RunEnd::StepLimit,
                    steps,
                });
            }

            match engine.step() {
                Ok(Step::Continued(instruction)) => on_step(engine, instruction),
                Ok(Step::Halted(reason)) => {
                    let steps = engine.steps() - first;
                    info!(steps, reason = reason.describe(), "auto-run halted");
                    return Ok(RunSummary {
                        end: RunEnd::Halted(reason),
                        steps,
                    });
                }
                Err(e) => {
                    warn!(steps, error = %e, "auto-run stopped by a fault");
                    return Err(e);
                }
            }

            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }
    }
}
