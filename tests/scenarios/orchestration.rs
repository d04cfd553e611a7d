//! Test: Orchestration - independent pipelines under one orchestrator

use crate::helpers::*;
use data_factory::core::config::OrchestrationConfig;
use data_factory::core::{ConstructionError, FailureReason, Pipeline, RunStatus};
use data_factory::execution::Orchestrator;
use serde_json::{json, Value};

fn pipeline_with(name: &str, task: &RecordingTask) -> Pipeline {
    Pipeline::new(name)
        .unwrap()
        .with_activities(vec![activity("work", task)])
}

/// Test that duplicate names fail before anything runs
#[tokio::test]
async fn test_duplicate_pipeline_names_fail_construction() {
    let task = RecordingTask::returning(Value::Null);

    let result = Orchestrator::new(vec![
        pipeline_with("daily", &task),
        pipeline_with("weekly", &task),
        pipeline_with("daily", &task),
    ]);

    assert!(matches!(
        result,
        Err(ConstructionError::DuplicatePipelineNames(ref names)) if names == &vec!["daily".to_string()]
    ));
    assert_eq!(task.call_count(), 0);
}

/// Test that N succeeding pipelines all report Succeeded
#[tokio::test]
async fn test_all_pipelines_succeed() {
    let task = RecordingTask::returning(Value::Null);
    let names = ["alpha", "beta", "gamma", "delta"];

    let mut orchestrator =
        Orchestrator::new(names.iter().map(|n| pipeline_with(n, &task)).collect()).unwrap();
    orchestrator.run_pipelines(true).await;

    let statuses = orchestrator.run_statuses();
    assert_eq!(statuses.len(), names.len());
    for name in names {
        assert_eq!(statuses.get(name), Some(&RunStatus::Succeeded));
    }
    assert_eq!(task.call_count(), names.len());
}

/// Test that a failed pipeline does not stop the rest, and no output crosses pipelines
#[tokio::test]
async fn test_failure_does_not_halt_orchestrator() {
    let producer = RecordingTask::returning(json!({"df_spark": "frame"}));
    let broken = RecordingTask::failing("disk full");
    let consumer = RecordingTask::returning(Value::Null);

    let mut orchestrator = Orchestrator::new(vec![
        pipeline_with("produce", &producer),
        pipeline_with("broken", &broken),
        pipeline_with("consume", &consumer),
    ])
    .unwrap();

    orchestrator.run_pipelines(false).await;

    let statuses = orchestrator.run_statuses();
    assert_eq!(statuses.get("produce"), Some(&RunStatus::Succeeded));
    assert_eq!(statuses.get("broken"), Some(&RunStatus::Failed));
    assert_eq!(statuses.get("consume"), Some(&RunStatus::Succeeded));
    assert!(!consumer.last_call().contains_key("df_spark"));
    assert!(!orchestrator.all_succeeded());

    let broken = orchestrator.pipeline("broken").unwrap();
    assert_eq!(broken.failure_reason(), Some(FailureReason::ActivityFailed));
    assert_eq!(broken.failure_message(), Some("disk full"));
}

/// Test a YAML orchestration end to end with built-in actions
#[tokio::test]
async fn test_config_driven_orchestration() {
    let yaml = r#"
pipelines:
  - name: ingest
    parameters:
      table: "orders"
    activities:
      - name: extract
        action: emit
        parameters:
          df_spark: "orders_raw"
          note: "dropped"
      - name: load
        action: emit
        parameters:
          table: "default_table"
  - name: broken
    activities:
      - name: explode
        action: fail
        parameters:
          message: "no route to host"
      - name: never
        action: noop
"#;

    let config = OrchestrationConfig::from_yaml(yaml).unwrap();
    let mut orchestrator = config.to_orchestrator().unwrap();
    orchestrator.run_pipelines(false).await;

    let ingest = orchestrator.pipeline("ingest").unwrap();
    assert_pipeline_succeeded(ingest);
    let load = ingest.activity("load").unwrap().last_parameters().unwrap();
    assert_eq!(load.get("df_spark"), Some(&json!("orders_raw")));
    assert_eq!(load.get("table"), Some(&json!("orders")));
    assert!(!load.contains_key("note"));

    let broken = orchestrator.pipeline("broken").unwrap();
    assert_pipeline_failed(broken, "no route to host");
    assert_activity_status(broken, "never", RunStatus::NotStarted);

    let summaries = orchestrator.summaries();
    assert_eq!(summaries.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(), vec!["ingest", "broken"]);
}
