//! Pipeline domain model and sequential execution

use crate::core::{
    activity::Activity,
    error::{ConstructionError, EntityKind},
    naming::validate_name,
    params::{dropped_keys, extract_propagated, inherit_pipeline_parameters, Parameters},
    state::{FailureReason, PipelineRunState, RunStatus},
};
use serde_json::Value;
use tracing::{debug, info, warn};

/// An ordered sequence of activities
#[derive(Debug)]
pub struct Pipeline {
    name: String,

    activities: Vec<Activity>,

    /// Pipeline-scoped parameters, override same-named activity parameters
    parameters: Parameters,

    state: PipelineRunState,
}

impl Pipeline {
    /// Create an empty pipeline, failing if the name is not snake_case
    pub fn new(name: impl Into<String>) -> Result<Self, ConstructionError> {
        Ok(Self {
            name: validate_name(EntityKind::Pipeline, name)?,
            activities: Vec::new(),
            parameters: Parameters::new(),
            state: PipelineRunState::new(),
        })
    }

    pub fn with_activities(mut self, activities: Vec<Activity>) -> Self {
        self.activities = activities;
        self
    }

    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Append an activity to the end of the pipeline
    pub fn add_activity(&mut self, activity: Activity) {
        self.activities.push(activity);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Get the first activity with the given name
    pub fn activity(&self, name: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.name() == name)
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Full state of the latest run
    pub fn state(&self) -> &PipelineRunState {
        &self.state
    }

    pub fn run_status(&self) -> RunStatus {
        self.state.status
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        self.state.failure_reason
    }

    pub fn failure_message(&self) -> Option<&str> {
        self.state.failure_message.as_deref()
    }

    /// Run every activity in order, stopping at the first failure
    ///
    /// Recognized variables returned by one activity are passed to the next,
    /// then pipeline parameters override any activity parameter of the same
    /// name. The outcome is recorded on the pipeline and returned.
    pub async fn run(&mut self, verbose: bool) -> RunStatus {
        self.state.start();
        for activity in &mut self.activities {
            activity.reset();
        }
        let total = self.activities.len();
        let prefix = format!("[Pipeline: {}]", self.name);

        info!("Starting pipeline {} ({} activities)", self.name, total);
        if verbose {
            println!("\n{} -> Starting...", prefix);
        }

        let mut previous_output = Value::Null;

        for (i, activity) in self.activities.iter_mut().enumerate() {
            let step = format!("{} --> ({}/{}) [Activity: {}]", prefix, i + 1, total, activity.name());
            if verbose {
                println!("{} Initializing...", step);
            }

            let mut params = activity.parameters().clone();

            let propagated = match extract_propagated(&previous_output) {
                Ok(propagated) => propagated,
                Err(e) => {
                    warn!("Pipeline {} rejected output before activity {}: {}", self.name, activity.name(), e);
                    self.state.fail(FailureReason::InvalidConfiguration, Some(e.to_string()));
                    if verbose {
                        println!("{} Rejected previous output: {}", step, e);
                    }
                    break;
                }
            };

            let dropped = dropped_keys(&previous_output);
            if !dropped.is_empty() {
                debug!("Dropping unrecognized output keys before {}: {:?}", activity.name(), dropped);
            }

            if verbose {
                for key in propagated.keys() {
                    println!("{} Inheriting output variable from previous activity: {}", step, key);
                }
            }
            params.extend(propagated);

            let inherited = inherit_pipeline_parameters(&mut params, &self.parameters);
            if !inherited.is_empty() {
                debug!("Activity {} inherits pipeline parameters {:?}", activity.name(), inherited);
            }
            if verbose {
                for key in &inherited {
                    println!("{} Inheriting parameter from pipeline: {}", step, key);
                }
            }

            if verbose {
                println!("{} Starting...", step);
            }

            previous_output = activity.run_with(params).await;

            if verbose {
                println!("{} Done with status = {}.", step, activity.run_status());
            }

            if activity.run_status() == RunStatus::Failed {
                let message = activity.failure_reason().map(str::to_string);
                self.state.fail(FailureReason::ActivityFailed, message);
                if verbose {
                    println!("\n{} -> Failed!", prefix);
                    println!("{} -> failure_reason = {}", prefix, FailureReason::ActivityFailed);
                    println!(
                        "{} -> failure_message = {}\n",
                        prefix,
                        self.state.failure_message.as_deref().unwrap_or_default()
                    );
                }
                break;
            }
        }

        if !self.state.status.is_terminal() {
            self.state.succeed();
        }

        info!("Pipeline {} finished with status {}", self.name, self.state.status);
        if verbose {
            println!("{} -> Done with status = {}.\n", prefix, self.state.status);
        }

        self.state.status
    }
}
