//! Test: Failure Handling - the first failing activity stops the pipeline

use crate::helpers::*;
use data_factory::core::{Activity, Parameters, Pipeline, RunStatus};
use serde_json::Value;

/// Test that a failure short-circuits the remaining activities
#[tokio::test]
async fn test_failure_short_circuits() {
    let a = RecordingTask::returning(Value::Null);
    let b = RecordingTask::failing("upstream table missing");
    let c = RecordingTask::returning(Value::Null);

    let mut pipeline = Pipeline::new("etl").unwrap().with_activities(vec![
        activity("a", &a),
        activity("b", &b),
        activity("c", &c),
    ]);

    let status = pipeline.run(false).await;

    assert_eq!(status, RunStatus::Failed);
    assert_activity_status(&pipeline, "a", RunStatus::Succeeded);
    assert_activity_status(&pipeline, "b", RunStatus::Failed);
    assert_activity_status(&pipeline, "c", RunStatus::NotStarted);
    assert_eq!(c.call_count(), 0);

    assert_pipeline_failed(&pipeline, "upstream table missing");
    assert_eq!(
        pipeline.failure_message(),
        pipeline.activity("b").unwrap().failure_reason()
    );
}

/// Test that run() never surfaces an activity failure as a panic or error
#[tokio::test]
async fn test_panicking_action_fails_only_its_activity() {
    let explode = |_: &Parameters| -> anyhow::Result<Value> { panic!("index out of range") };
    let after = RecordingTask::returning(Value::Null);

    let mut pipeline = Pipeline::new("fragile").unwrap().with_activities(vec![
        Activity::new("explode", explode).unwrap(),
        activity("after", &after),
    ]);

    pipeline.run(false).await;

    assert_pipeline_failed(&pipeline, "action panicked: index out of range");
    assert_activity_status(&pipeline, "after", RunStatus::NotStarted);
}

/// Test failing the first activity leaves everything else untouched
#[tokio::test]
async fn test_first_activity_failure() {
    let first = RecordingTask::failing("bad credentials");
    let second = RecordingTask::returning(Value::Null);

    let mut pipeline = Pipeline::new("auth_first").unwrap().with_activities(vec![
        activity("login", &first),
        activity("fetch", &second),
    ]);

    pipeline.run(true).await;

    assert_pipeline_failed(&pipeline, "bad credentials");
    assert_eq!(second.call_count(), 0);
}
