//! Lifecycle precondition checks: operations that need a chart id or a
//! credential fail before any network call.

use datawrapper_rs::api::ACCESS_TOKEN_ENV;
use datawrapper_rs::charts::{ChartModel, LineChart};
use datawrapper_rs::{Client, Error, ExportOptions};

#[test]
fn persistence_operations_require_an_id() {
    let mut chart = LineChart::new();
    assert!(chart.base.chart_id.is_none());

    let err = chart.update(Some("token")).unwrap_err();
    assert!(matches!(err, Error::Precondition(_)), "{err}");
    assert!(err.to_string().contains("update"), "{err}");

    let err = chart.publish(Some("token")).unwrap_err();
    assert!(err.to_string().contains("publish"), "{err}");

    let err = chart.delete(Some("token")).unwrap_err();
    assert!(err.to_string().contains("delete"), "{err}");

    let err = chart.duplicate(Some("token")).unwrap_err();
    assert!(err.to_string().contains("duplicate"), "{err}");

    let err = chart.fork(Some("token")).unwrap_err();
    assert!(err.to_string().contains("fork"), "{err}");

    let err = chart
        .export(&ExportOptions::default(), "chart.png", Some("token"))
        .unwrap_err();
    assert!(err.to_string().contains("export"), "{err}");
}

#[test]
fn missing_credential_is_a_precondition_error() {
    // The id check runs first, so use a client directly to probe the
    // credential resolution order: explicit argument, else environment,
    // else a precondition error naming the variable.
    unsafe { std::env::remove_var(ACCESS_TOKEN_ENV) };
    let err = Client::new(None).unwrap_err();
    assert!(matches!(err, Error::Precondition(_)), "{err}");
    assert!(err.to_string().contains(ACCESS_TOKEN_ENV), "{err}");

    unsafe { std::env::set_var(ACCESS_TOKEN_ENV, "env-token") };
    assert!(Client::new(None).is_ok());
    assert!(Client::new(Some("explicit")).is_ok());
    unsafe { std::env::remove_var(ACCESS_TOKEN_ENV) };
}
