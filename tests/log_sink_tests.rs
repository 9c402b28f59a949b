//! Log sink delivery tests

use std::sync::Arc;
use std::time::{Duration, Instant};

use minilinker::config::LogSinkConfig;
use minilinker::services::{
    HttpLogSink, LogEvent, LogPackage, LogSink, RedirectOutcome, RedirectResolver,
    sink_from_config,
};
use minilinker::storage::UrlRegistry;

fn unreachable_sink() -> Arc<dyn LogSink> {
    // nothing listens on the discard port locally
    Arc::new(
        HttpLogSink::new(
            "http://127.0.0.1:9/evaluation-service/logs",
            Some("test"),
            Duration::from_secs(2),
        )
        .unwrap(),
    )
}

#[tokio::test]
async fn test_http_sink_returns_immediately_inside_runtime() {
    let sink = unreachable_sink();
    let started = Instant::now();
    for i in 0..10 {
        sink.log(LogEvent::error(LogPackage::Handler, format!("Row {}: Invalid URL entered", i)));
    }
    assert!(started.elapsed() < Duration::from_millis(500));
}

#[tokio::test]
async fn test_failed_delivery_does_not_affect_resolution() {
    let resolver = RedirectResolver::new(unreachable_sink());
    let registry = UrlRegistry::new();

    let outcome = resolver.resolve("missing", &registry, chrono::Utc::now());
    assert_eq!(outcome, RedirectOutcome::NotFound);
}

#[test]
fn test_enabled_config_builds_remote_sink() {
    let config = LogSinkConfig {
        enabled: true,
        endpoint: "http://127.0.0.1:9/logs".to_string(),
        auth_token: None,
        timeout_secs: 1,
    };
    let sink = sink_from_config(&config);
    let started = Instant::now();
    sink.log(LogEvent::info(LogPackage::Config, "remote sink ready"));
    assert!(started.elapsed() < Duration::from_millis(500));
}
