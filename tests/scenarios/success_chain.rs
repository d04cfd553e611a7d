//! Test: Success Chain - every activity runs in order and the pipeline succeeds

use crate::helpers::*;
use data_factory::core::{Activity, Parameters, Pipeline, RunStatus};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Test that all activities run and the pipeline ends Succeeded
#[tokio::test]
async fn test_basic_pipeline_flow() {
    let first = RecordingTask::returning(Value::Null);
    let second = RecordingTask::returning(Value::Null);
    let third = RecordingTask::returning(Value::Null);

    let mut pipeline = Pipeline::new("my_pipeline").unwrap().with_activities(vec![
        activity("activity1", &first).with_parameters(params([("parameter", json!("value1"))])),
        activity("activity2", &second).with_parameters(params([("parameter", json!("value2"))])),
        activity("activity3", &third).with_parameters(params([("parameter", json!("value3"))])),
    ]);

    assert_eq!(pipeline.run_status(), RunStatus::NotStarted);

    let status = pipeline.run(false).await;

    assert_eq!(status, RunStatus::Succeeded);
    assert_pipeline_succeeded(&pipeline);
    for name in ["activity1", "activity2", "activity3"] {
        assert_activity_status(&pipeline, name, RunStatus::Succeeded);
    }
    assert_eq!(first.last_call().get("parameter"), Some(&json!("value1")));
    assert_eq!(second.last_call().get("parameter"), Some(&json!("value2")));
    assert_eq!(third.last_call().get("parameter"), Some(&json!("value3")));
}

/// Test that activities run strictly in insertion order
#[tokio::test]
async fn test_activities_run_in_order() {
    let order = Arc::new(Mutex::new(Vec::new()));

    let mut pipeline = Pipeline::new("ordered").unwrap();
    for name in ["extract", "transform", "load"] {
        let order = Arc::clone(&order);
        let record = move |_: &Parameters| -> anyhow::Result<Value> {
            order.lock().unwrap().push(name.to_string());
            Ok(Value::Null)
        };
        pipeline.add_activity(Activity::new(name, record).unwrap());
    }

    pipeline.run(true).await;

    assert_pipeline_succeeded(&pipeline);
    assert_eq!(*order.lock().unwrap(), vec!["extract", "transform", "load"]);
}
