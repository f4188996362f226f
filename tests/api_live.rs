//! Live API tests. Run with: `cargo test --features online -- --nocapture`
//! Requires DATAWRAPPER_ACCESS_TOKEN with chart read/write scopes.
#![cfg(feature = "online")]

use datawrapper_rs::charts::{ChartModel, LineChart, get_chart};
use datawrapper_rs::{AnyChart, ExportFormat, ExportOptions, Table};

#[test]
fn create_update_publish_export_delete() {
    let mut chart = LineChart::new();
    chart.base.title = "datawrapper-rs live test".to_string();
    chart.base.data =
        Table::from_csv("date,value\n2020/01,1\n2020/02,3\n2020/03,2\n").unwrap();

    let chart_id = chart.create(None).unwrap();
    assert!(!chart_id.is_empty());
    assert_eq!(chart.base.chart_id.as_deref(), Some(chart_id.as_str()));

    chart.base.intro = "Updated by the live test".to_string();
    let updated_id = chart.update(None).unwrap();
    assert_eq!(updated_id, chart_id);

    chart.publish(None).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = chart
        .export(
            &ExportOptions {
                format: ExportFormat::Png,
                width: 600,
                ..Default::default()
            },
            dir.path().join("chart"),
            None,
        )
        .unwrap();
    assert!(path.exists());
    assert!(std::fs::metadata(&path).unwrap().len() > 0);

    // Fetch back through the dispatcher and verify the type and title.
    let fetched = get_chart(&chart_id, None).unwrap();
    match &fetched {
        AnyChart::Line(line) => {
            assert_eq!(line.base.title, "datawrapper-rs live test");
            assert_eq!(line.base.intro, "Updated by the live test");
        }
        other => panic!("expected a line chart, got {:?}", other.chart_type()),
    }

    chart.delete(None).unwrap();
    assert!(chart.base.chart_id.is_none());
}

#[test]
fn folders_are_listable() {
    let client = datawrapper_rs::Client::new(None).unwrap();
    let folders = client.folders().unwrap();
    assert!(folders.is_object() || folders.is_array());
}
