use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use shipkit::errors::ExecError;
use shipkit::exec::{CommandRunner, RunResult, RunSpec};
use tokio_util::sync::CancellationToken;

/// A fake command runner that:
/// - records every invocation as a rendered command line
/// - pops scripted responses in order, defaulting to a clean exit.
///
/// Lets orchestration tests drive progress tasks without spawning real
/// processes.
pub struct FakeRunner {
    calls: Arc<Mutex<Vec<String>>>,
    responses: Mutex<VecDeque<Result<RunResult, ExecError>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            responses: Mutex::new(VecDeque::new()),
        }
    }

    /// Script the next invocation's result.
    pub fn push_result(&self, result: RunResult) {
        self.responses.lock().unwrap().push_back(Ok(result));
    }

    /// Script the next invocation to fail with the given exit code.
    pub fn push_failure(&self, exit_code: i32, stderr: &str) {
        let result = RunResult::new(exit_code, "", stderr);
        let message = format!("command terminated with exit code {exit_code}");
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ExecError::Failed { result, message }));
    }

    /// Command lines recorded so far, in invocation order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record_and_pop(&self, rendered: String) -> Result<RunResult, ExecError> {
        self.calls.lock().unwrap().push(rendered);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RunResult::new(0, "", "")))
    }
}

impl Default for FakeRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for FakeRunner {
    fn run<'a>(
        &'a self,
        _cancel: &'a CancellationToken,
        spec: RunSpec,
    ) -> Pin<Box<dyn Future<Output = Result<RunResult, ExecError>> + Send + 'a>> {
        let rendered = if spec.args.is_empty() {
            spec.cmd.clone()
        } else {
            format!("{} {}", spec.cmd, spec.args.join(" "))
        };
        let outcome = self.record_and_pop(rendered);

        Box::pin(async move { outcome })
    }

    fn run_list<'a>(
        &'a self,
        _cancel: &'a CancellationToken,
        commands: Vec<String>,
        _spec: RunSpec,
    ) -> Pin<Box<dyn Future<Output = Result<RunResult, ExecError>> + Send + 'a>> {
        let outcome = self.record_and_pop(commands.join(" && "));

        Box::pin(async move { outcome })
    }
}
