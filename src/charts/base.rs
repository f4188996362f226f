//! Fields and behavior shared by every chart type.
//!
//! [`BaseChart`] carries the identity, description, publish/sharing and
//! data-transform state common to all charts, and builds the shared wire
//! document envelope: `{type, title, language, theme?, metadata: {data,
//! describe, visualize, publish, annotate, custom}}`. The per-chart-type
//! models embed a `BaseChart` and layer their own `visualize` keys on top.
//!
//! [`ChartModel`] provides the shared lifecycle: an unsaved chart (no id)
//! gains one through `create`; `update` re-persists field state; `publish`
//! makes it publicly viewable; `delete` clears the id; `duplicate`/`fork`
//! produce new, independent persisted charts. Every operation that needs a
//! chart id or a credential fails with a precondition error before any
//! network traffic.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::{Client, ExportOptions};
use crate::charts::ChartType;
use crate::charts::enums::{ColumnType, UploadMethod};
use crate::error::{Error, Result};
use crate::fields::FieldSpec;
use crate::table::Table;

/// A chart color: an index into the theme palette or an explicit hex
/// string.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteColor {
    Index(i64),
    Hex(String),
}

impl Default for PaletteColor {
    fn default() -> Self {
        PaletteColor::Index(0)
    }
}

impl PaletteColor {
    pub fn to_wire(&self) -> Value {
        match self {
            PaletteColor::Index(i) => json!(i),
            PaletteColor::Hex(color) => json!(color),
        }
    }

    pub fn from_wire(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => Ok(PaletteColor::Index(n.as_i64().unwrap_or(0))),
            Value::String(s) => Ok(PaletteColor::Hex(s.clone())),
            other => Err(Error::validation(
                "base-color",
                format!("expected a palette index or color string, got {other}"),
            )),
        }
    }
}

impl From<i64> for PaletteColor {
    fn from(index: i64) -> Self {
        PaletteColor::Index(index)
    }
}

impl From<&str> for PaletteColor {
    fn from(color: &str) -> Self {
        PaletteColor::Hex(color.to_string())
    }
}

impl Serialize for PaletteColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            PaletteColor::Index(i) => serializer.serialize_i64(*i),
            PaletteColor::Hex(color) => serializer.serialize_str(color),
        }
    }
}

impl<'de> Deserialize<'de> for PaletteColor {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        PaletteColor::from_wire(&raw).map_err(serde::de::Error::custom)
    }
}

/// Formatting options for one data column in the "Check and Describe" step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnFormat {
    /// The data column this format applies to.
    pub column: String,
    #[serde(rename = "type", alias = "column_type")]
    pub column_type: ColumnType,
    /// Whether the column is ignored when drawing the chart.
    pub ignore: bool,
    #[serde(rename = "number-prepend", alias = "number_prepend")]
    pub number_prepend: String,
    #[serde(rename = "number-append", alias = "number_append")]
    pub number_append: String,
    /// Divisor exponent applied to the column's numbers; `None` leaves the
    /// provider default.
    #[serde(
        rename = "number-divisor",
        alias = "number_divisor",
        skip_serializing_if = "Option::is_none"
    )]
    pub number_divisor: Option<String>,
}

impl Default for ColumnFormat {
    fn default() -> Self {
        ColumnFormat {
            column: String::new(),
            column_type: ColumnType::Auto,
            ignore: false,
            number_prepend: String::new(),
            number_append: String::new(),
            number_divisor: None,
        }
    }
}

impl ColumnFormat {
    pub fn new(column: impl Into<String>) -> Self {
        ColumnFormat {
            column: column.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.column.is_empty() {
            return Err(Error::validation(
                "column",
                "a column format requires a column name",
            ));
        }
        Ok(())
    }
}

/// The `metadata.data` section: how the uploaded table is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub transpose: bool,
    #[serde(rename = "vertical-header", alias = "vertical_header")]
    pub vertical_header: bool,
    #[serde(rename = "horizontal-header", alias = "horizontal_header")]
    pub horizontal_header: bool,
    #[serde(rename = "column-order", alias = "column_order")]
    pub column_order: Vec<i64>,
    #[serde(rename = "column-format", alias = "column_format")]
    pub column_format: Vec<ColumnFormat>,
    /// An external data source URL.
    #[serde(rename = "external-data", alias = "external_data")]
    pub external_data: String,
    #[serde(rename = "use-datawrapper-cdn", alias = "use_datawrapper_cdn")]
    pub use_datawrapper_cdn: bool,
    #[serde(rename = "upload-method", alias = "upload_method")]
    pub upload_method: UploadMethod,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            transpose: false,
            vertical_header: true,
            horizontal_header: true,
            column_order: Vec::new(),
            column_format: Vec::new(),
            external_data: String::new(),
            use_datawrapper_cdn: true,
            upload_method: UploadMethod::Copy,
        }
    }
}

impl Transform {
    pub fn validate(&self) -> Result<()> {
        for format in &self.column_format {
            format.validate()?;
        }
        Ok(())
    }

    fn to_wire(&self) -> Result<Value> {
        self.validate()?;
        Ok(serde_json::to_value(self)?)
    }

    /// Parse the wire section. The API sometimes returns `column-format`
    /// as a mapping keyed by column name; normalize it to the list form
    /// first.
    fn from_wire(section: Option<&Value>) -> Result<Self> {
        let Some(section) = section else {
            return Ok(Transform::default());
        };
        let mut section = section.clone();
        if let Some(obj) = section.as_object_mut() {
            if let Some(Value::Object(by_column)) = obj.get("column-format").cloned() {
                let list: Vec<Value> = by_column
                    .into_iter()
                    .map(|(column, config)| {
                        let mut entry = config;
                        if let Some(entry_obj) = entry.as_object_mut() {
                            entry_obj.insert("column".into(), json!(column));
                        }
                        entry
                    })
                    .collect();
                obj.insert("column-format".into(), Value::Array(list));
            }
        }
        serde_json::from_value(section).map_err(|e| Error::validation("transform", e.to_string()))
    }
}

/// State shared by every chart type.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BaseChart {
    /// Assigned by `create()`; `None` while the chart is unsaved.
    pub chart_id: Option<String>,

    /// The chart's tabular dataset.
    pub data: Table,

    /// Column interpretation settings for the dataset.
    #[serde(alias = "transformations")]
    pub transform: Transform,

    /// The headline above the chart.
    pub title: String,
    /// Intro text above the chart.
    pub intro: String,
    /// Footnotes below the chart.
    pub notes: String,
    #[serde(rename = "source-name", alias = "source_name")]
    pub source_name: String,
    #[serde(rename = "source-url", alias = "source_url")]
    pub source_url: String,
    pub byline: String,
    /// Alternative description for screen readers.
    #[serde(rename = "aria-description", alias = "aria_description")]
    pub aria_description: String,
    #[serde(rename = "hide-title", alias = "hide_title")]
    pub hide_title: bool,

    /// Locale controlling separators and month/weekday names.
    pub language: String,
    pub theme: String,

    #[serde(rename = "autoDarkMode", alias = "auto_dark_mode")]
    pub auto_dark_mode: bool,
    #[serde(rename = "dark-mode-invert", alias = "dark_mode_invert")]
    pub dark_mode_invert: bool,
    #[serde(rename = "get-the-data", alias = "get_the_data")]
    pub get_the_data: bool,
    #[serde(rename = "download-image", alias = "download_image")]
    pub download_image: bool,
    #[serde(rename = "download-pdf", alias = "download_pdf")]
    pub download_pdf: bool,
    #[serde(rename = "download-svg", alias = "download_svg")]
    pub download_svg: bool,
    pub embed: bool,
    #[serde(rename = "force-attribution", alias = "force_attribution")]
    pub force_attribution: bool,
    pub share_buttons: bool,
    pub share_url: String,
    pub logo: bool,
    pub logo_id: String,

    /// Free-form tags stored under `metadata.custom`.
    pub custom: Map<String, Value>,

    #[serde(skip)]
    pub(crate) client: Option<Client>,
}

impl Default for BaseChart {
    fn default() -> Self {
        BaseChart {
            chart_id: None,
            data: Table::new(),
            transform: Transform::default(),
            title: String::new(),
            intro: String::new(),
            notes: String::new(),
            source_name: String::new(),
            source_url: String::new(),
            byline: String::new(),
            aria_description: String::new(),
            hide_title: false,
            language: "en-US".to_string(),
            theme: String::new(),
            auto_dark_mode: false,
            dark_mode_invert: true,
            get_the_data: false,
            download_image: false,
            download_pdf: false,
            download_svg: false,
            embed: false,
            force_attribution: false,
            share_buttons: false,
            share_url: String::new(),
            logo: false,
            logo_id: String::new(),
            custom: Map::new(),
            client: None,
        }
    }
}

// The cached client is connection state, not chart state.
impl PartialEq for BaseChart {
    fn eq(&self, other: &Self) -> bool {
        self.chart_id == other.chart_id
            && self.data == other.data
            && self.transform == other.transform
            && self.title == other.title
            && self.intro == other.intro
            && self.notes == other.notes
            && self.source_name == other.source_name
            && self.source_url == other.source_url
            && self.byline == other.byline
            && self.aria_description == other.aria_description
            && self.hide_title == other.hide_title
            && self.language == other.language
            && self.theme == other.theme
            && self.auto_dark_mode == other.auto_dark_mode
            && self.dark_mode_invert == other.dark_mode_invert
            && self.get_the_data == other.get_the_data
            && self.download_image == other.download_image
            && self.download_pdf == other.download_pdf
            && self.download_svg == other.download_svg
            && self.embed == other.embed
            && self.force_attribution == other.force_attribution
            && self.share_buttons == other.share_buttons
            && self.share_url == other.share_url
            && self.logo == other.logo
            && self.logo_id == other.logo_id
            && self.custom == other.custom
    }
}

impl BaseChart {
    /// Reuse the cached client or build one, resolving the credential.
    pub(crate) fn ensure_client(&mut self, access_token: Option<&str>) -> Result<Client> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }
        let client = Client::new(access_token)?;
        self.client = Some(client.clone());
        Ok(client)
    }
}

/// The accepted field names of [`BaseChart`], consulted by every chart
/// type's unknown-key check.
pub(crate) const BASE_FIELDS: &[FieldSpec] = &[
    FieldSpec::aliased("chart_type", "chart-type"),
    FieldSpec::new("chart_id"),
    FieldSpec::new("data"),
    FieldSpec::aliased("transform", "transformations"),
    FieldSpec::new("title"),
    FieldSpec::new("intro"),
    FieldSpec::new("notes"),
    FieldSpec::aliased("source_name", "source-name"),
    FieldSpec::aliased("source_url", "source-url"),
    FieldSpec::new("byline"),
    FieldSpec::aliased("aria_description", "aria-description"),
    FieldSpec::aliased("hide_title", "hide-title"),
    FieldSpec::new("language"),
    FieldSpec::new("theme"),
    FieldSpec::aliased("auto_dark_mode", "autoDarkMode"),
    FieldSpec::aliased("dark_mode_invert", "dark-mode-invert"),
    FieldSpec::aliased("get_the_data", "get-the-data"),
    FieldSpec::aliased("download_image", "download-image"),
    FieldSpec::aliased("download_pdf", "download-pdf"),
    FieldSpec::aliased("download_svg", "download-svg"),
    FieldSpec::new("embed"),
    FieldSpec::aliased("force_attribution", "force-attribution"),
    FieldSpec::new("share_buttons"),
    FieldSpec::new("share_url"),
    FieldSpec::new("logo"),
    FieldSpec::new("logo_id"),
    FieldSpec::new("custom"),
];

/// Build the shared document envelope for `chart`. Chart types merge their
/// own keys into `metadata.visualize` (and `metadata.axes`) afterwards.
pub(crate) fn serialize_base(chart: &BaseChart, chart_type: ChartType) -> Result<Value> {
    let mut document = Map::new();
    document.insert("type".into(), json!(chart_type.as_str()));
    document.insert("title".into(), json!(chart.title));
    document.insert("language".into(), json!(chart.language));
    if !chart.theme.is_empty() {
        document.insert("theme".into(), json!(chart.theme));
    }

    let metadata = json!({
        "data": chart.transform.to_wire()?,
        "describe": {
            "intro": chart.intro,
            "byline": chart.byline,
            "source-name": chart.source_name,
            "source-url": chart.source_url,
            "aria-description": chart.aria_description,
            "hide-title": chart.hide_title,
            "number-format": "-",
            "number-divisor": 0,
            "number-prepend": "",
            "number-append": "",
        },
        "visualize": {
            "dark-mode-invert": chart.dark_mode_invert,
            "sharing": {
                "enabled": chart.share_buttons,
                "url": chart.share_url,
                "auto": false,
            },
        },
        "publish": {
            "autoDarkMode": chart.auto_dark_mode,
            "force-attribution": chart.force_attribution,
            "blocks": {
                "get-the-data": chart.get_the_data,
                "download-image": chart.download_image,
                "download-pdf": chart.download_pdf,
                "download-svg": chart.download_svg,
                "embed": chart.embed,
                "logo": {
                    "id": chart.logo_id,
                    "enabled": chart.logo,
                },
            },
        },
        "annotate": {
            "notes": chart.notes,
            "byline": chart.byline,
        },
        "custom": chart.custom,
    });
    document.insert("metadata".into(), metadata);
    Ok(Value::Object(document))
}

/// Extract the shared fields from a wire document. The tabular data lives
/// behind a separate endpoint and is filled in by the fetch path.
pub(crate) fn deserialize_base(document: &Value) -> Result<BaseChart> {
    fn section<'a>(
        metadata: Option<&'a Map<String, Value>>,
        name: &str,
    ) -> Option<&'a Map<String, Value>> {
        metadata.and_then(|m| m.get(name)).and_then(Value::as_object)
    }
    fn string_of(map: Option<&Map<String, Value>>, key: &str) -> String {
        map.and_then(|m| m.get(key))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
    fn bool_of(map: Option<&Map<String, Value>>, key: &str, default: bool) -> bool {
        map.and_then(|m| m.get(key))
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    let metadata = document.get("metadata").and_then(Value::as_object);
    let describe = section(metadata, "describe");
    let annotate = section(metadata, "annotate");
    let publish = section(metadata, "publish");
    let visualize = section(metadata, "visualize");
    let blocks = publish
        .and_then(|p| p.get("blocks"))
        .and_then(Value::as_object);
    let blocks_logo = blocks
        .and_then(|b| b.get("logo"))
        .and_then(Value::as_object);
    let sharing = visualize
        .and_then(|v| v.get("sharing"))
        .and_then(Value::as_object);

    Ok(BaseChart {
        chart_id: document
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string),
        data: Table::new(),
        transform: Transform::from_wire(metadata.and_then(|m| m.get("data")))?,
        title: document
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        intro: string_of(describe, "intro"),
        notes: string_of(annotate, "notes"),
        source_name: string_of(describe, "source-name"),
        source_url: string_of(describe, "source-url"),
        byline: string_of(describe, "byline"),
        aria_description: string_of(describe, "aria-description"),
        hide_title: bool_of(describe, "hide-title", false),
        language: match document.get("language").and_then(Value::as_str) {
            Some(language) if !language.is_empty() => language.to_string(),
            _ => "en-US".to_string(),
        },
        theme: document
            .get("theme")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        auto_dark_mode: bool_of(publish, "autoDarkMode", false),
        dark_mode_invert: bool_of(visualize, "dark-mode-invert", true),
        get_the_data: bool_of(blocks, "get-the-data", false),
        download_image: bool_of(blocks, "download-image", false),
        download_pdf: bool_of(blocks, "download-pdf", false),
        download_svg: bool_of(blocks, "download-svg", false),
        embed: bool_of(blocks, "embed", false),
        force_attribution: bool_of(publish, "force-attribution", false),
        share_buttons: bool_of(sharing, "enabled", false),
        share_url: string_of(sharing, "url"),
        logo: bool_of(blocks_logo, "enabled", false),
        logo_id: string_of(blocks_logo, "id"),
        custom: metadata
            .and_then(|m| m.get("custom"))
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default(),
        client: None,
    })
}

/// The `metadata.visualize` section of a document under construction.
pub(crate) fn visualize_mut(document: &mut Value) -> &mut Map<String, Value> {
    document["metadata"]["visualize"]
        .as_object_mut()
        .expect("serialize_base always creates metadata.visualize")
}

/// A named section of `metadata` on a wire document being read.
pub(crate) fn metadata_section<'a>(
    document: &'a Value,
    name: &str,
) -> Option<&'a Map<String, Value>> {
    document
        .get("metadata")
        .and_then(Value::as_object)
        .and_then(|m| m.get(name))
        .and_then(Value::as_object)
}

/// The subset of a serialized document the create/patch endpoints accept.
fn api_payload(document: &Value) -> Value {
    let mut payload = Map::new();
    for key in ["title", "type", "language", "theme", "metadata"] {
        if let Some(value) = document.get(key) {
            payload.insert(key.to_string(), value.clone());
        }
    }
    Value::Object(payload)
}

/// The shared lifecycle and (de)serialization contract for chart models.
pub trait ChartModel: Sized {
    /// The wire type tag this model serializes as.
    const CHART_TYPE: ChartType;

    fn base(&self) -> &BaseChart;
    fn base_mut(&mut self) -> &mut BaseChart;

    /// Assemble the full wire document from current field state. Pure; no
    /// I/O.
    fn serialize_model(&self) -> Result<Value>;

    /// Reconstruct a model from a wire document. Pure; the tabular data is
    /// attached separately by [`ChartModel::get`].
    fn deserialize_model(document: &Value) -> Result<Self>;

    /// Fetch a persisted chart and its data, verifying the type tag.
    fn get(chart_id: &str, access_token: Option<&str>) -> Result<Self> {
        let client = Client::new(access_token)?;
        let document = client.chart(chart_id)?;
        let tag = document
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if tag != Self::CHART_TYPE.as_str() {
            return Err(Error::validation(
                "type",
                format!(
                    "chart {chart_id} has type {tag:?}, expected {:?}; \
                     use get_chart() for type dispatch",
                    Self::CHART_TYPE.as_str()
                ),
            ));
        }
        let csv = client.chart_data(chart_id)?;
        let mut chart = Self::deserialize_model(&document)?;
        let base = chart.base_mut();
        base.data = Table::from_csv(&csv)?;
        base.chart_id = Some(chart_id.to_string());
        base.client = Some(client);
        Ok(chart)
    }

    /// Create the chart remotely, upload its data if any, and store the
    /// assigned id. Returns the new id.
    fn create(&mut self, access_token: Option<&str>) -> Result<String> {
        let payload = api_payload(&self.serialize_model()?);
        let client = self.base_mut().ensure_client(access_token)?;
        let response = client.create_chart(&payload)?;
        let chart_id = response
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                Error::Response(format!("create returned no chart id: {response}"))
            })?;
        self.base_mut().chart_id = Some(chart_id.clone());
        self.upload_data(&client, &chart_id)?;
        Ok(chart_id)
    }

    /// Re-persist current field state against the existing id.
    fn update(&mut self, access_token: Option<&str>) -> Result<String> {
        let chart_id = self.require_id("update")?;
        let payload = api_payload(&self.serialize_model()?);
        let client = self.base_mut().ensure_client(access_token)?;
        client.update_chart(&chart_id, &payload)?;
        self.upload_data(&client, &chart_id)?;
        Ok(chart_id)
    }

    /// Make the persisted chart publicly viewable.
    fn publish(&mut self, access_token: Option<&str>) -> Result<Value> {
        let chart_id = self.require_id("publish")?;
        let client = self.base_mut().ensure_client(access_token)?;
        client.publish_chart(&chart_id)
    }

    /// Export the persisted chart to a file; returns the written path.
    fn export(
        &mut self,
        options: &ExportOptions,
        path: impl AsRef<std::path::Path>,
        access_token: Option<&str>,
    ) -> Result<std::path::PathBuf> {
        let chart_id = self.require_id("export")?;
        let client = self.base_mut().ensure_client(access_token)?;
        client.export_chart_to_file(&chart_id, options, path)
    }

    /// Delete the persisted chart and clear the id, returning the model to
    /// its unsaved state.
    fn delete(&mut self, access_token: Option<&str>) -> Result<()> {
        let chart_id = self.require_id("delete")?;
        let client = self.base_mut().ensure_client(access_token)?;
        client.delete_chart(&chart_id)?;
        self.base_mut().chart_id = None;
        Ok(())
    }

    /// Copy the persisted chart; returns the independent copy's id.
    fn duplicate(&mut self, access_token: Option<&str>) -> Result<String> {
        let chart_id = self.require_id("duplicate")?;
        let client = self.base_mut().ensure_client(access_token)?;
        let response = client.copy_chart(&chart_id)?;
        new_chart_id("duplicate", &response)
    }

    /// Fork the persisted chart; returns the fork's id.
    fn fork(&mut self, access_token: Option<&str>) -> Result<String> {
        let chart_id = self.require_id("fork")?;
        let client = self.base_mut().ensure_client(access_token)?;
        let response = client.fork_chart(&chart_id)?;
        new_chart_id("fork", &response)
    }

    /// Move the persisted chart into a folder.
    fn move_to_folder(&mut self, folder_id: i64, access_token: Option<&str>) -> Result<()> {
        let chart_id = self.require_id("move")?;
        let client = self.base_mut().ensure_client(access_token)?;
        client.move_chart(&chart_id, folder_id)?;
        Ok(())
    }

    #[doc(hidden)]
    fn require_id(&self, op: &str) -> Result<String> {
        self.base().chart_id.clone().ok_or_else(|| {
            Error::precondition(format!(
                "cannot {op} a chart without an id; call create() first or set chart_id"
            ))
        })
    }

    #[doc(hidden)]
    fn upload_data(&self, client: &Client, chart_id: &str) -> Result<()> {
        if self.base().data.is_empty() {
            return Ok(());
        }
        client.put_chart_data(chart_id, self.base().data.to_csv()?)
    }
}

fn new_chart_id(op: &str, response: &Value) -> Result<String> {
    response
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::Response(format!("{op} returned no chart id: {response}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chart_builds_minimal_envelope() {
        let chart = BaseChart::default();
        let document = serialize_base(&chart, ChartType::Line).unwrap();
        assert_eq!(document["type"], json!("d3-lines"));
        assert_eq!(document["title"], json!(""));
        assert_eq!(document["language"], json!("en-US"));
        // Empty theme is omitted entirely.
        assert!(document.get("theme").is_none());
        let metadata = document["metadata"].as_object().unwrap();
        for key in ["data", "describe", "visualize", "publish", "annotate", "custom"] {
            assert!(metadata.contains_key(key), "missing {key}");
        }
        assert_eq!(metadata["data"]["upload-method"], json!("copy"));
        assert_eq!(metadata["publish"]["blocks"]["embed"], json!(false));
    }

    #[test]
    fn envelope_roundtrip_preserves_base_fields() {
        let chart = BaseChart {
            title: "Turnout".to_string(),
            intro: "An intro".to_string(),
            notes: "A note".to_string(),
            source_name: "Eurostat".to_string(),
            source_url: "https://example.org".to_string(),
            byline: "Data desk".to_string(),
            theme: "datawrapper".to_string(),
            hide_title: true,
            embed: true,
            logo: true,
            logo_id: "brand".to_string(),
            share_buttons: true,
            share_url: "https://example.org/share".to_string(),
            ..Default::default()
        };
        let document = serialize_base(&chart, ChartType::Bar).unwrap();
        let back = deserialize_base(&document).unwrap();
        assert_eq!(back, chart);
    }

    #[test]
    fn column_format_dict_form_is_normalized() {
        let section = json!({
            "column-format": {
                "sales": {"type": "number", "number-prepend": "$"},
            }
        });
        let transform = Transform::from_wire(Some(&section)).unwrap();
        assert_eq!(transform.column_format.len(), 1);
        assert_eq!(transform.column_format[0].column, "sales");
        assert_eq!(transform.column_format[0].column_type, ColumnType::Number);
        assert_eq!(transform.column_format[0].number_prepend, "$");
    }

    #[test]
    fn column_format_without_column_fails_validation() {
        let transform = Transform {
            column_format: vec![ColumnFormat::default()],
            ..Default::default()
        };
        assert!(transform.to_wire().is_err());
    }

    #[test]
    fn api_payload_keeps_only_accepted_keys() {
        let document = json!({
            "type": "d3-bars",
            "title": "t",
            "language": "en-US",
            "metadata": {},
            "axes": {"groups": "Group"},
        });
        let payload = api_payload(&document);
        let obj = payload.as_object().unwrap();
        assert!(obj.contains_key("metadata"));
        assert!(!obj.contains_key("axes"));
    }

    #[test]
    fn palette_color_accepts_index_and_hex() {
        assert_eq!(
            PaletteColor::from_wire(&json!(3)).unwrap(),
            PaletteColor::Index(3)
        );
        assert_eq!(
            PaletteColor::from_wire(&json!("#123456")).unwrap(),
            PaletteColor::Hex("#123456".to_string())
        );
        assert!(PaletteColor::from_wire(&json!([1])).is_err());
    }
}
