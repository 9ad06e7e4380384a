// End-to-end tests for the predictor orchestration, using /bin/sh as a
// stand-in predictor so real subprocesses, pipes and exit codes are involved.

#![cfg(unix)]

use std::time::{Duration, Instant};

use uuid::Uuid;

use energy_api::error::AppError;
use energy_api::models::PredictionRequest;
use energy_api::services::PredictionService;

fn sh(script: &str, timeout: Duration) -> PredictionService {
    PredictionService::new("sh", vec!["-c".to_string(), script.to_string()], timeout)
}

fn empty_request() -> PredictionRequest {
    PredictionRequest {
        readings: Vec::new(),
        devices: Vec::new(),
    }
}

#[tokio::test]
async fn well_formed_output_parses_into_predictions() {
    let service = sh(
        r#"cat > /dev/null; echo '{"predictions":[{"timestamp":"2024-06-16T00:00:00Z","predictedWattage":420.5}],"success":true}'"#,
        Duration::from_secs(5),
    );

    let response = service.predict(&empty_request()).await.unwrap();

    assert!(response.success);
    assert_eq!(response.predictions.len(), 1);
    assert_eq!(response.predictions[0].predicted_wattage, 420.5);
}

#[tokio::test]
async fn non_zero_exit_surfaces_stderr_text() {
    let service = sh(
        "cat > /dev/null; echo 'model file missing' >&2; exit 3",
        Duration::from_secs(5),
    );

    let result = service.predict(&empty_request()).await;

    match result {
        Err(AppError::PredictionProcess(msg)) => {
            assert!(msg.contains("model file missing"), "message was: {}", msg);
            assert!(msg.contains('3'), "exit code missing from: {}", msg);
        }
        other => panic!("expected PredictionProcess, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn malformed_stdout_with_zero_exit_is_a_parse_error() {
    let service = sh(
        "cat > /dev/null; echo 'Loading model... done'",
        Duration::from_secs(5),
    );

    let result = service.predict(&empty_request()).await;

    assert!(matches!(result, Err(AppError::PredictionParse(_))));
}

#[tokio::test]
async fn self_reported_failure_is_a_process_error() {
    let service = sh(
        r#"cat > /dev/null; echo '{"predictions":[],"success":false}'"#,
        Duration::from_secs(5),
    );

    let result = service.predict(&empty_request()).await;

    assert!(matches!(result, Err(AppError::PredictionProcess(_))));
}

#[tokio::test]
async fn hung_predictor_times_out_and_is_terminated() {
    // A surviving predictor would touch this marker once its sleep ends.
    let marker = std::env::temp_dir().join(format!("energy-api-predictor-{}", Uuid::new_v4()));
    let service = sh(
        &format!("sleep 1; touch '{}'", marker.display()),
        Duration::from_millis(200),
    );

    let started = Instant::now();
    let result = service.predict(&empty_request()).await;
    let elapsed = started.elapsed();

    assert!(matches!(result, Err(AppError::PredictionTimeout)));
    // The call must return at the timeout, not after the child's sleep
    assert!(elapsed < Duration::from_secs(2), "took {:?}", elapsed);

    // Wait past the point where a leaked child would have written the
    // marker; it must never appear.
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(
        !marker.exists(),
        "predictor outlived the timeout and wrote {}",
        marker.display()
    );
}

#[tokio::test]
async fn partial_output_before_timeout_is_discarded() {
    let service = sh(
        r#"printf '{"predictions":['; sleep 5"#,
        Duration::from_millis(200),
    );

    let result = service.predict(&empty_request()).await;

    assert!(matches!(result, Err(AppError::PredictionTimeout)));
}

#[tokio::test]
async fn missing_predictor_binary_is_a_process_error() {
    let service = PredictionService::new(
        "definitely-not-a-real-predictor-binary",
        Vec::new(),
        Duration::from_secs(1),
    );

    let result = service.predict(&empty_request()).await;

    assert!(matches!(result, Err(AppError::PredictionProcess(_))));
}

#[tokio::test]
async fn concurrent_predictions_do_not_interfere() {
    let service = sh(
        r#"cat > /dev/null; echo '{"predictions":[],"success":true}'"#,
        Duration::from_secs(5),
    );

    let (req_a, req_b, req_c) = (empty_request(), empty_request(), empty_request());
    let (a, b, c) = tokio::join!(
        service.predict(&req_a),
        service.predict(&req_b),
        service.predict(&req_c),
    );

    assert!(a.is_ok() && b.is_ok() && c.is_ok());
}

#[tokio::test]
async fn predictor_receives_the_request_on_stdin() {
    // The stand-in predictor echoes back a fixed response only if the
    // request document arrived intact on stdin.
    let service = sh(
        r#"grep -q '"readings"' && echo '{"predictions":[],"success":true}' || { echo 'no payload' >&2; exit 1; }"#,
        Duration::from_secs(5),
    );

    let response = service.predict(&empty_request()).await.unwrap();
    assert!(response.success);
}
