//! The tabular dataset attached to a chart.
//!
//! Data travels to the API as UTF-8 CSV with a header row and comes back as
//! CSV text that may be comma- or tab-delimited. In the model it is a
//! row-oriented table of JSON scalars.

use csv::{ReaderBuilder, WriterBuilder};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A row-oriented table: ordered column names plus rows of JSON scalars.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new() -> Self {
        Table::default()
    }

    /// Build from explicit column names and rows. Every row must have one
    /// cell per column.
    pub fn from_columns(
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    ) -> Result<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::validation(
                    "data",
                    format!(
                        "row {i} has {} cells but the table has {} columns",
                        row.len(),
                        columns.len()
                    ),
                ));
            }
        }
        Ok(Table { columns, rows })
    }

    /// Build from a list of field-named records. The first record fixes the
    /// initial column order; columns introduced by later records are
    /// appended, and missing cells become null.
    pub fn from_records(records: &[Map<String, Value>]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| record.get(c).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        Table { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.columns.is_empty()
    }

    /// Encode as UTF-8 CSV with a header row. An empty table yields an
    /// empty string.
    pub fn to_csv(&self) -> Result<String> {
        if self.is_empty() {
            return Ok(String::new());
        }
        let mut wtr = WriterBuilder::new().from_writer(Vec::new());
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(cell_to_field))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| Error::Response(format!("csv buffer flush failed: {e}")))?;
        String::from_utf8(bytes).map_err(|e| Error::Response(format!("csv is not utf-8: {e}")))
    }

    /// Decode CSV text, auto-detecting comma vs tab delimiting from the
    /// header line. Numeric-looking cells are parsed into numbers.
    pub fn from_csv(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Table::new());
        }
        let header = text.lines().next().unwrap_or("");
        let delimiter = if header.matches('\t').count() > header.matches(',').count() {
            b'\t'
        } else {
            b','
        };
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(text.as_bytes());
        let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let mut row: Vec<Value> = record.iter().map(field_to_cell).collect();
            row.resize(columns.len(), Value::Null);
            rows.push(row);
        }
        Ok(Table { columns, rows })
    }
}

fn cell_to_field(cell: &Value) -> String {
    match cell {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn field_to_cell(field: &str) -> Value {
    if field.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = field.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(x) = field.parse::<f64>() {
        if x.is_finite() {
            return Value::from(x);
        }
    }
    Value::String(field.to_string())
}

impl<'de> Deserialize<'de> for Table {
    /// Accepts either a list of field-named records or an explicit
    /// `{columns, rows}` object.
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        use serde::de::Error as _;
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Table::new()),
            Value::Array(items) => {
                let mut records = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Object(record) => records.push(record),
                        other => {
                            return Err(D::Error::custom(format!(
                                "table records must be objects, got {other}"
                            )));
                        }
                    }
                }
                Ok(Table::from_records(&records))
            }
            Value::Object(mut obj) => {
                let columns: Vec<String> =
                    serde_json::from_value(obj.remove("columns").unwrap_or(Value::Null))
                        .map_err(D::Error::custom)?;
                let rows: Vec<Vec<Value>> =
                    serde_json::from_value(obj.remove("rows").unwrap_or_else(|| Value::Array(vec![])))
                        .map_err(D::Error::custom)?;
                Table::from_columns(columns, rows).map_err(D::Error::custom)
            }
            other => Err(D::Error::custom(format!(
                "table must be a list of records or a columns/rows object, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Table {
        Table::from_columns(
            vec!["date".into(), "Temperature".into()],
            vec![
                vec![json!("2020/01"), json!(15.0)],
                vec![json!("2020/02"), json!(18)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn csv_has_header_and_rows() {
        let csv = sample().to_csv().unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("date,Temperature"));
        assert_eq!(lines.next(), Some("2020/01,15"));
        assert_eq!(lines.next(), Some("2020/02,18"));
    }

    #[test]
    fn empty_table_is_empty_string() {
        assert_eq!(Table::new().to_csv().unwrap(), "");
        assert!(Table::from_csv("").unwrap().is_empty());
    }

    #[test]
    fn from_csv_detects_tabs() {
        let table = Table::from_csv("a\tb\n1\t2\n").unwrap();
        assert_eq!(table.columns(), &["a".to_string(), "b".to_string()]);
        assert_eq!(table.rows()[0], vec![json!(1), json!(2)]);
    }

    #[test]
    fn from_csv_parses_numbers_and_keeps_text() {
        let table = Table::from_csv("name,value\nBerlin,3.5\nParis,\n").unwrap();
        assert_eq!(table.rows()[0], vec![json!("Berlin"), json!(3.5)]);
        assert_eq!(table.rows()[1], vec![json!("Paris"), Value::Null]);
    }

    #[test]
    fn records_fix_column_order_and_fill_gaps() {
        let records = vec![
            json!({"city": "Berlin", "pop": 3_700_000}),
            json!({"city": "Paris", "pop": 2_100_000, "country": "FR"}),
        ];
        let records: Vec<Map<String, Value>> = records
            .into_iter()
            .map(|r| r.as_object().unwrap().clone())
            .collect();
        let table = Table::from_records(&records);
        assert_eq!(
            table.columns(),
            &["city".to_string(), "pop".to_string(), "country".to_string()]
        );
        assert_eq!(table.rows()[0][2], Value::Null);
    }

    #[test]
    fn mismatched_row_width_is_rejected() {
        let err = Table::from_columns(vec!["a".into()], vec![vec![json!(1), json!(2)]]);
        assert!(err.is_err());
    }

    #[test]
    fn loose_config_accepts_record_lists() {
        let table: Table =
            serde_json::from_value(json!([{"x": 1, "y": 2}, {"x": 3, "y": 4}])).unwrap();
        assert_eq!(table.columns(), &["x".to_string(), "y".to_string()]);
        assert_eq!(table.rows().len(), 2);
    }

    #[test]
    fn csv_roundtrip_preserves_cells() {
        let table = sample();
        let back = Table::from_csv(&table.to_csv().unwrap()).unwrap();
        assert_eq!(back.columns(), table.columns());
        assert_eq!(back.rows()[0][0], json!("2020/01"));
        assert_eq!(back.rows()[0][1], json!(15));
    }
}
