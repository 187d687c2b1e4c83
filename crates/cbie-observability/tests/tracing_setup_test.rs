use cbie_core::config::ObservabilityConfig;
use cbie_observability::tracing_setup::spans::names;
use cbie_observability::{analysis_span, build_filter, clustering_span, init_tracing};

#[test]
fn second_init_reports_already_installed() {
    let config = ObservabilityConfig {
        log_level: "debug".into(),
        json_logs: true,
    };
    let first = init_tracing(&config);
    let second = init_tracing(&config);
    assert!(!second || !first);
}

#[test]
fn invalid_level_falls_back_without_panicking() {
    let config = ObservabilityConfig {
        log_level: "not a [valid directive".into(),
        json_logs: false,
    };
    let _ = build_filter(&config);
}

#[test]
fn span_macros_expand() {
    let span = analysis_span!("user-1", 3usize);
    let _guard = span.enter();
    let inner = clustering_span!(3usize);
    drop(inner);
    assert_eq!(names::ANALYSIS, "cbie.analysis");
}
