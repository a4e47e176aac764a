use std::sync::{Arc, Mutex};

use rust_value_aggregation::aggregate::Report;
use rust_value_aggregation::classify::InvalidReason;
use rust_value_aggregation::ingestion::{aggregate_path, IngestionOptions, SourceFormat};
use rust_value_aggregation::observability::{
    AggregationObserver, Severity, SourceContext, TokenEvent,
};
use rust_value_aggregation::{Classified, IngestionError};

#[derive(Default)]
struct RecordingObserver {
    invalid: Mutex<Vec<(usize, String, InvalidReason)>>,
    finished: Mutex<Vec<Report>>,
    failures: Mutex<Vec<Severity>>,
    alerts: Mutex<Vec<Severity>>,
}

impl AggregationObserver for RecordingObserver {
    fn on_token(&self, event: &TokenEvent<'_>) {
        if let Classified::Invalid(reason) = event.outcome {
            self.invalid
                .lock()
                .unwrap()
                .push((event.index, event.token.to_string(), reason));
        }
    }

    fn on_finished(&self, report: &Report) {
        self.finished.lock().unwrap().push(report.clone());
    }

    fn on_source_failure(&self, _ctx: &SourceContext, severity: Severity, _error: &IngestionError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &SourceContext, severity: Severity, _error: &IngestionError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options_with(obs: &Arc<RecordingObserver>) -> IngestionOptions {
    IngestionOptions {
        observer: Some(obs.clone()),
        alert_at_or_above: Severity::Critical,
        ..Default::default()
    }
}

#[test]
fn observer_receives_each_invalid_entry() {
    let obs = Arc::new(RecordingObserver::default());
    let report = aggregate_path("tests/fixtures/values.csv", &options_with(&obs));

    let invalid = obs.invalid.lock().unwrap().clone();
    assert_eq!(
        invalid,
        vec![
            (1, "\"abc\"".to_string(), InvalidReason::NotANumber),
            (3, "\"\"".to_string(), InvalidReason::Empty),
        ]
    );
    assert_eq!(obs.finished.lock().unwrap().clone(), vec![report]);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = IngestionOptions {
        format: Some(SourceFormat::Json),
        ..options_with(&obs)
    };

    // Missing file -> Io error -> Critical
    let report = aggregate_path("tests/fixtures/does_not_exist.json", &opts);
    assert!(report.is_empty());

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![Severity::Critical]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![Severity::Critical]);
    assert!(obs.finished.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_without_alert_for_non_critical_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = IngestionOptions {
        json: rust_value_aggregation::ingestion::JsonOptions {
            pointer: Some("/nope".to_string()),
        },
        ..options_with(&obs)
    };

    // Unresolved pointer -> Error severity (not Critical) -> should not alert
    let _ = aggregate_path("tests/fixtures/nested.json", &opts);

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![Severity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn lower_alert_threshold_alerts_on_errors() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = IngestionOptions {
        json: rust_value_aggregation::ingestion::JsonOptions {
            pointer: Some("/nope".to_string()),
        },
        alert_at_or_above: Severity::Error,
        ..options_with(&obs)
    };

    let _ = aggregate_path("tests/fixtures/nested.json", &opts);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![Severity::Error]);
}

#[test]
fn undecodable_json_file_is_an_error_without_alert() {
    let path = std::env::temp_dir().join(format!(
        "rust-value-aggregation-bad-utf8-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, b"[1, \"\xff\", 2]").unwrap();

    let obs = Arc::new(RecordingObserver::default());
    let report = aggregate_path(&path, &options_with(&obs));
    assert!(report.is_empty());

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![Severity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
    let _ = std::fs::remove_file(&path);
}
