//! Fan-out dispatcher.
//!
//! # Responsibilities
//! - Run every task concurrently under one derived cancellation scope
//! - Cancel the scope when a task fails, as the failure policy allows
//! - Wait for every task before returning, cancelled or not
//! - Report each task's outcome under its label

use tokio::task::JoinSet;
use tracing::Instrument;

use crate::cancellation::CancellationScope;
use crate::client::BoxSender;
use crate::config::DispatchConfig;
use crate::dispatch::policy::FailurePolicy;
use crate::dispatch::semantic::{error_body, ResponseCheck};
use crate::http::error::SendResult;
use crate::http::{Request, Response};
use crate::observability::metrics;

/// Builds the request for a task from its label.
pub type TargetBuilder = Box<dyn FnOnce(&str) -> SendResult<Request> + Send>;

/// A labelled unit of work for [`Dispatcher::run_all`].
pub struct DispatchTask {
    label: String,
    target: TargetBuilder,
}

impl DispatchTask {
    pub fn new<F>(label: impl Into<String>, target: F) -> Self
    where
        F: FnOnce(&str) -> SendResult<Request> + Send + 'static,
    {
        Self {
            label: label.into(),
            target: Box::new(target),
        }
    }

    /// A task issuing `GET url`.
    pub fn get(label: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self::new(label, move |_| Request::get(&url))
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl std::fmt::Debug for DispatchTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchTask")
            .field("label", &self.label)
            .finish()
    }
}

/// How a single task ended.
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    pub label: String,
    pub result: SendResult<Response>,
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of one `run_all` call, in submission order.
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    outcomes: Vec<TaskOutcome>,
    cancelled: bool,
}

impl DispatchReport {
    pub fn outcomes(&self) -> &[TaskOutcome] {
        &self.outcomes
    }

    /// Outcome of the first task with this label.
    pub fn outcome(&self, label: &str) -> Option<&TaskOutcome> {
        self.outcomes.iter().find(|o| o.label == label)
    }

    pub fn failures(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(TaskOutcome::is_success)
    }

    /// True if the shared scope ended up cancelled.
    pub fn cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Issues labelled requests concurrently, aborting siblings on failure.
#[derive(Clone)]
pub struct Dispatcher {
    sender: BoxSender,
    policy: FailurePolicy,
    check: ResponseCheck,
}

impl Dispatcher {
    /// Dispatcher with the fail-fast policy and the `"error"` body check.
    pub fn new(sender: BoxSender) -> Self {
        Self {
            sender,
            policy: FailurePolicy::default(),
            check: error_body("error"),
        }
    }

    pub fn from_config(sender: BoxSender, config: &DispatchConfig) -> Self {
        Self::new(sender)
            .with_policy(config.failure_policy)
            .with_check(error_body(config.semantic_error_body.clone()))
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_check(mut self, check: ResponseCheck) -> Self {
        self.check = check;
        self
    }

    /// Run every task and wait for all of them.
    ///
    /// Tasks share one scope derived from `parent`. Cancelling `parent`
    /// cancels them too; a task failing cancels its siblings but never `parent`.
    pub async fn run_all(
        &self,
        parent: &CancellationScope,
        tasks: Vec<DispatchTask>,
    ) -> DispatchReport {
        let scope = parent.child();
        let total = tasks.len();
        tracing::debug!(tasks = total, policy = ?self.policy, "Dispatching tasks");

        let mut set = JoinSet::new();
        for (index, task) in tasks.into_iter().enumerate() {
            let span = tracing::info_span!("dispatch_task", label = %task.label());
            let runner = TaskRunner {
                sender: self.sender.clone(),
                check: self.check.clone(),
                policy: self.policy,
                scope: scope.clone(),
            };
            set.spawn(async move { (index, runner.run(task).await) }.instrument(span));
        }

        let mut slots: Vec<Option<TaskOutcome>> = (0..total).map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, outcome)) => slots[index] = Some(outcome),
                Err(e) => {
                    tracing::error!(error = %e, "Dispatch task aborted");
                    if self.policy == FailurePolicy::FailFast && scope.cancel() {
                        metrics::record_cancellation();
                    }
                }
            }
        }

        let report = DispatchReport {
            outcomes: slots.into_iter().flatten().collect(),
            cancelled: scope.is_cancelled(),
        };
        tracing::debug!(
            tasks = total,
            failures = report.failures().count(),
            cancelled = report.cancelled,
            "Dispatch finished"
        );
        report
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("policy", &self.policy)
            .finish()
    }
}

/// Per-task copy of the dispatcher state.
struct TaskRunner {
    sender: BoxSender,
    check: ResponseCheck,
    policy: FailurePolicy,
    scope: CancellationScope,
}

impl TaskRunner {
    async fn run(self, task: DispatchTask) -> TaskOutcome {
        let DispatchTask { label, target } = task;
        let result = self.execute(&label, target).await;

        match &result {
            Ok(response) => {
                tracing::info!(
                    status = %response.status(),
                    result = %response.text(),
                    "Task completed"
                );
                metrics::record_task("success");
            }
            Err(e) => {
                metrics::record_task(e.kind());
                if e.is_cancelled() {
                    tracing::info!("Task cancelled");
                } else {
                    tracing::warn!(error = %e, "Task failed");
                }

                if self.policy.should_cancel(e) && self.scope.cancel() {
                    tracing::info!(reason = e.kind(), "Cancelling sibling tasks");
                    metrics::record_cancellation();
                }
            }
        }

        TaskOutcome { label, result }
    }

    async fn execute(&self, label: &str, target: TargetBuilder) -> SendResult<Response> {
        let mut request = target(label)?.with_scope(self.scope.clone());
        let response = self.sender.send(&mut request).await?;
        (self.check)(&response)?;
        Ok(response)
    }
}
