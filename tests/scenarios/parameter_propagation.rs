//! Test: Parameter Propagation - output hand-off and pipeline overrides

use crate::helpers::*;
use data_factory::core::{Pipeline, RunStatus};
use serde_json::{json, Value};

/// Test that df_spark flows to the next activity and other keys do not
#[tokio::test]
async fn test_recognized_output_is_propagated() {
    let producer = RecordingTask::returning(json!({"df_spark": {"rows": 3}, "row_count": 3}));
    let consumer = RecordingTask::returning(Value::Null);

    let mut pipeline = Pipeline::new("handoff").unwrap().with_activities(vec![
        activity("produce", &producer),
        activity("consume", &consumer).with_parameters(params([("df_spark", json!("stale"))])),
    ]);

    pipeline.run(false).await;

    assert_eq!(pipeline.run_status(), RunStatus::Succeeded);
    let received = consumer.last_call();
    assert_eq!(received.get("df_spark"), Some(&json!({"rows": 3})));
    assert!(!received.contains_key("row_count"));
}

/// Test that outputs only reach the immediately following activity
#[tokio::test]
async fn test_output_reaches_next_activity_only() {
    let producer = RecordingTask::returning(json!({"df_spark": "frame"}));
    let middle = RecordingTask::returning(Value::Null);
    let last = RecordingTask::returning(Value::Null);

    let mut pipeline = Pipeline::new("three_steps").unwrap().with_activities(vec![
        activity("produce", &producer),
        activity("middle", &middle),
        activity("last", &last),
    ]);

    pipeline.run(false).await;

    assert_eq!(middle.last_call().get("df_spark"), Some(&json!("frame")));
    assert!(!last.last_call().contains_key("df_spark"));
}

/// Test that pipeline parameters win over activity parameters
#[tokio::test]
async fn test_pipeline_parameter_overrides_activity_default() {
    let task = RecordingTask::returning(Value::Null);

    let mut pipeline = Pipeline::new("scoped")
        .unwrap()
        .with_parameters(params([("region", json!("eu")), ("owner", json!("data_team"))]))
        .with_activities(vec![activity("load", &task)
            .with_parameters(params([("region", json!("us")), ("limit", json!(100))]))]);

    pipeline.run(false).await;

    let received = task.last_call();
    assert_eq!(received.get("region"), Some(&json!("eu")));
    assert_eq!(received.get("limit"), Some(&json!(100)));
    assert!(
        !received.contains_key("owner"),
        "pipeline-only parameters are not injected"
    );
}

/// Test that a pipeline parameter also overrides a propagated output of the same name
#[tokio::test]
async fn test_pipeline_parameter_overrides_propagated_output() {
    let producer = RecordingTask::returning(json!({"df_spark": "from_activity"}));
    let consumer = RecordingTask::returning(Value::Null);

    let mut pipeline = Pipeline::new("pinned")
        .unwrap()
        .with_parameters(params([("df_spark", json!("from_pipeline"))]))
        .with_activities(vec![activity("produce", &producer), activity("consume", &consumer)]);

    pipeline.run(false).await;

    assert_eq!(consumer.last_call().get("df_spark"), Some(&json!("from_pipeline")));
}

/// Test that a failed activity passes nothing forward
#[tokio::test]
async fn test_failed_activity_output_is_empty() {
    let failing = RecordingTask::failing("boom");
    let mut pipeline = Pipeline::new("halted")
        .unwrap()
        .with_activities(vec![activity("fail", &failing)]);

    pipeline.run(false).await;

    assert_eq!(pipeline.activities()[0].run_status(), RunStatus::Failed);
    assert_eq!(pipeline.activities()[0].last_parameters().map(|p| p.len()), Some(0));
}
