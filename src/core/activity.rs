//! Activity domain model

use crate::core::{
    error::{ConstructionError, EntityKind},
    naming::validate_name,
    params::Parameters,
    state::RunStatus,
};
use crate::task::Task;
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Default advisory timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 3600;

/// A single unit of work in a pipeline
pub struct Activity {
    name: String,

    action: Arc<dyn Task>,

    /// Advisory only, never enforced
    timeout_secs: u64,

    /// Declared parameters, never rewritten by a pipeline
    parameters: Parameters,

    /// Effective parameters of the most recent invocation
    last_parameters: Option<Parameters>,

    run_status: RunStatus,

    failure_reason: Option<String>,
}

impl fmt::Debug for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Activity")
            .field("name", &self.name)
            .field("timeout_secs", &self.timeout_secs)
            .field("parameters", &self.parameters)
            .field("run_status", &self.run_status)
            .field("failure_reason", &self.failure_reason)
            .finish_non_exhaustive()
    }
}

impl Activity {
    /// Create an activity, failing if the name is not snake_case
    pub fn new(name: impl Into<String>, action: impl Task + 'static) -> Result<Self, ConstructionError> {
        Self::with_shared_action(name, Arc::new(action))
    }

    /// Create an activity around an already shared action
    pub fn with_shared_action(
        name: impl Into<String>,
        action: Arc<dyn Task>,
    ) -> Result<Self, ConstructionError> {
        Ok(Self {
            name: validate_name(EntityKind::Activity, name)?,
            action,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            parameters: Parameters::new(),
            last_parameters: None,
            run_status: RunStatus::NotStarted,
            failure_reason: None,
        })
    }

    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Declared parameters
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Parameters the action actually received on its latest invocation
    pub fn last_parameters(&self) -> Option<&Parameters> {
        self.last_parameters.as_ref()
    }

    pub fn run_status(&self) -> RunStatus {
        self.run_status
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    /// Forget the outcome of any previous run
    pub(crate) fn reset(&mut self) {
        self.run_status = RunStatus::NotStarted;
        self.failure_reason = None;
        self.last_parameters = None;
    }

    /// Run the action with the declared parameters
    ///
    /// Returns the action's output, or `Value::Null` if it failed. Failures are
    /// recorded on the activity and never returned to the caller.
    pub async fn run(&mut self) -> Value {
        let params = self.parameters.clone();
        self.run_with(params).await
    }

    /// Run the action with an explicit parameter table
    pub(crate) async fn run_with(&mut self, params: Parameters) -> Value {
        self.failure_reason = None;
        self.run_status = RunStatus::Running;
        self.last_parameters = Some(params.clone());

        debug!("Running activity {} with {} parameters", self.name, params.len());

        // A panicking action only fails its own activity.
        let action = Arc::clone(&self.action);
        let handle = tokio::spawn(async move { action.invoke(&params).await });

        let failure = match handle.await {
            Ok(Ok(output)) => {
                self.run_status = RunStatus::Succeeded;
                return output;
            }
            Ok(Err(e)) => format!("{:#}", e),
            Err(join_error) if join_error.is_panic() => panic_message(join_error.into_panic()),
            Err(join_error) => join_error.to_string(),
        };

        warn!("Activity {} failed: {}", self.name, failure);
        self.run_status = RunStatus::Failed;
        self.failure_reason = Some(failure);
        Value::Null
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("action panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("action panicked: {}", s)
    } else {
        "action panicked".to_string()
    }
}
