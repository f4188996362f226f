//! Synchronous client for the Datawrapper API (v3).
//!
//! This is the transport the chart models call through: a thin wrapper over
//! blocking HTTP verbs with bearer-token auth, plus the chart endpoints
//! (metadata, data, create/patch, publish, export, copy/fork/move, delete,
//! folders). Responses are decoded JSON objects or raw text; non-success
//! statuses surface as [`Error::Api`] (or [`Error::RateLimited`] for 429)
//! with the status and body attached.
//!
//! ### Notes
//! - The access token resolves once at client construction: the explicit
//!   argument wins, else the `DATAWRAPPER_ACCESS_TOKEN` environment
//!   variable, else construction fails with a precondition error.
//! - Every call is a blocking request with the client's default timeouts;
//!   there is no built-in retry. Callers needing resilience wrap calls
//!   themselves.
//!
//! Typical usage:
//! ```no_run
//! # use datawrapper_rs::api::Client;
//! let client = Client::new(None)?; // reads DATAWRAPPER_ACCESS_TOKEN
//! let metadata = client.chart("abcde")?;
//! # Ok::<(), datawrapper_rs::Error>(())
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response};
use reqwest::redirect::Policy;
use serde_json::Value;

use crate::error::{Error, Result};

const BASE_URL: &str = "https://api.datawrapper.de/v3";

/// Environment variable consulted when no token is passed explicitly.
pub const ACCESS_TOKEN_ENV: &str = "DATAWRAPPER_ACCESS_TOKEN";

// Allow -, _, . unescaped in path segments (chart ids are alphanumeric,
// folder ids numeric; this keeps anything else from breaking the path).
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(segment: &str) -> String {
    percent_encoding::utf8_percent_encode(segment.trim(), SAFE).to_string()
}

/// Output format for chart exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Pdf,
    Svg,
}

impl ExportFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Svg => "svg",
        }
    }
}

/// Layout parameters for a chart export.
///
/// The defaults mirror the API's: a 400px-wide PNG at 2x zoom with a 20px
/// border, light mode, opaque background.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Measurement unit for width/height/border: `px`, `mm` or `inch`.
    pub unit: String,
    /// Color mode: `rgb` or `cmyk`.
    pub mode: String,
    pub width: u32,
    /// Leave unset to let the provider derive the height.
    pub height: Option<u32>,
    /// Export only the plot area, without header and footer.
    pub plain: bool,
    /// Size multiplier for PNG exports.
    pub zoom: u32,
    /// Size multiplier for PDF exports.
    pub scale: u32,
    pub border_width: u32,
    pub border_color: Option<String>,
    pub transparent: bool,
    /// Logo display: `auto`, `on` or `off`.
    pub logo: String,
    pub logo_id: Option<String>,
    pub dark: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            format: ExportFormat::Png,
            unit: "px".to_string(),
            mode: "rgb".to_string(),
            width: 400,
            height: None,
            plain: false,
            zoom: 2,
            scale: 1,
            border_width: 20,
            border_color: None,
            transparent: false,
            logo: "auto".to_string(),
            logo_id: None,
            dark: false,
        }
    }
}

impl ExportOptions {
    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("unit", self.unit.clone()),
            ("mode", self.mode.clone()),
            ("width", self.width.to_string()),
            ("plain", self.plain.to_string()),
            ("zoom", self.zoom.to_string()),
            ("scale", self.scale.to_string()),
            ("borderWidth", self.border_width.to_string()),
            ("transparent", self.transparent.to_string()),
            ("logo", self.logo.clone()),
            ("dark", self.dark.to_string()),
        ];
        if let Some(height) = self.height {
            query.push(("height", height.to_string()));
        }
        if let Some(color) = &self.border_color {
            query.push(("borderColor", color.clone()));
        }
        if let Some(id) = &self.logo_id {
            query.push(("logoId", id.clone()));
        }
        query
    }
}

/// Blocking Datawrapper API client.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    token: String,
    http: HttpClient,
}

impl Client {
    /// Build a client, resolving the credential once: the explicit
    /// `access_token` wins, else `DATAWRAPPER_ACCESS_TOKEN`, else a
    /// precondition error.
    pub fn new(access_token: Option<&str>) -> Result<Self> {
        Self::with_base_url(access_token, BASE_URL)
    }

    /// Like [`Client::new`] with a custom base URL; useful for pointing the
    /// client at a test server.
    pub fn with_base_url(access_token: Option<&str>, base_url: &str) -> Result<Self> {
        let token = match access_token {
            Some(token) if !token.is_empty() => token.to_string(),
            _ => std::env::var(ACCESS_TOKEN_ENV)
                .ok()
                .filter(|t| !t.is_empty())
                .ok_or_else(|| {
                    Error::precondition(format!(
                        "no Datawrapper access token provided; set {ACCESS_TOKEN_ENV} \
                         or pass one explicitly"
                    ))
                })?,
        };
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("datawrapper_rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Ok(Client {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn send(&self, op: String, request: RequestBuilder) -> Result<Response> {
        log::debug!("{op}");
        let response = request
            .bearer_auth(&self.token)
            .send()
            .map_err(|source| Error::Http {
                op: op.clone(),
                source,
            })?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        if status.as_u16() == 429 {
            return Err(Error::RateLimited { op, body });
        }
        Err(Error::Api {
            op,
            status: status.as_u16(),
            body,
        })
    }

    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response> {
        let url = self.url(path);
        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.send(format!("GET {url}"), request)
    }

    fn get_json(&self, path: &str) -> Result<Value> {
        let url = self.url(path);
        self.get(path, &[])?
            .json()
            .map_err(|source| Error::Http {
                op: format!("GET {url}"),
                source,
            })
    }

    fn post_json(&self, path: &str, body: Option<&Value>) -> Result<Value> {
        let url = self.url(path);
        let mut request = self.http.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = self.send(format!("POST {url}"), request)?;
        let text = response.text().map_err(|source| Error::Http {
            op: format!("POST {url}"),
            source,
        })?;
        if text.is_empty() {
            // Some POST endpoints acknowledge without a body.
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(Error::from)
    }

    fn patch_json(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url(path);
        let request = self.http.patch(&url).json(body);
        self.send(format!("PATCH {url}"), request)?
            .json()
            .map_err(|source| Error::Http {
                op: format!("PATCH {url}"),
                source,
            })
    }

    fn put_body(&self, path: &str, content_type: &'static str, body: String) -> Result<()> {
        let url = self.url(path);
        let request = self
            .http
            .put(&url)
            .header("content-type", content_type)
            .body(body);
        self.send(format!("PUT {url}"), request)?;
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        let request = self.http.delete(&url);
        // An empty response body on delete is success.
        self.send(format!("DELETE {url}"), request)?;
        Ok(())
    }

    //
    // Chart endpoints
    //

    /// Fetch a chart's metadata document.
    pub fn chart(&self, chart_id: &str) -> Result<Value> {
        self.get_json(&format!("/charts/{}", enc(chart_id)))
    }

    /// Fetch a chart's tabular data as CSV text.
    pub fn chart_data(&self, chart_id: &str) -> Result<String> {
        let path = format!("/charts/{}/data", enc(chart_id));
        let url = self.url(&path);
        self.get(&path, &[])?.text().map_err(|source| Error::Http {
            op: format!("GET {url}"),
            source,
        })
    }

    /// Create a chart from a wire document; returns the API's response,
    /// which carries the new chart id.
    pub fn create_chart(&self, payload: &Value) -> Result<Value> {
        self.post_json("/charts", Some(payload))
    }

    /// Patch an existing chart's metadata.
    pub fn update_chart(&self, chart_id: &str, payload: &Value) -> Result<Value> {
        self.patch_json(&format!("/charts/{}", enc(chart_id)), payload)
    }

    /// Replace a chart's data body with CSV text.
    pub fn put_chart_data(&self, chart_id: &str, csv: String) -> Result<()> {
        self.put_body(&format!("/charts/{}/data", enc(chart_id)), "text/csv", csv)
    }

    /// Make a persisted chart publicly viewable.
    pub fn publish_chart(&self, chart_id: &str) -> Result<Value> {
        self.post_json(&format!("/charts/{}/publish", enc(chart_id)), None)
    }

    /// Export a chart to an image format, returning the raw bytes.
    pub fn export_chart(&self, chart_id: &str, options: &ExportOptions) -> Result<Vec<u8>> {
        let path = format!(
            "/charts/{}/export/{}",
            enc(chart_id),
            options.format.as_str()
        );
        let url = self.url(&path);
        let response = self.get(&path, &options.query())?;
        let bytes = response.bytes().map_err(|source| Error::Http {
            op: format!("GET {url}"),
            source,
        })?;
        Ok(bytes.to_vec())
    }

    /// Export a chart and write it to `path`, forcing the extension to
    /// match the format. Returns the final path.
    pub fn export_chart_to_file(
        &self,
        chart_id: &str,
        options: &ExportOptions,
        path: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let bytes = self.export_chart(chart_id, options)?;
        let filepath = path.as_ref().with_extension(options.format.as_str());
        std::fs::write(&filepath, bytes)?;
        log::debug!("chart {chart_id} exported to {}", filepath.display());
        Ok(filepath)
    }

    /// Duplicate a chart into the caller's account; returns the copy's
    /// metadata.
    pub fn copy_chart(&self, chart_id: &str) -> Result<Value> {
        self.post_json(&format!("/charts/{}/copy", enc(chart_id)), None)
    }

    /// Fork a river chart; returns the fork's metadata.
    pub fn fork_chart(&self, chart_id: &str) -> Result<Value> {
        self.post_json(&format!("/charts/{}/fork", enc(chart_id)), None)
    }

    /// Move a chart into a folder.
    pub fn move_chart(&self, chart_id: &str, folder_id: i64) -> Result<Value> {
        self.patch_json(
            &format!("/charts/{}", enc(chart_id)),
            &serde_json::json!({"folderId": folder_id}),
        )
    }

    /// Delete a chart. An empty response body is success.
    pub fn delete_chart(&self, chart_id: &str) -> Result<()> {
        self.delete(&format!("/charts/{}", enc(chart_id)))
    }

    /// List the folders the token can see.
    pub fn folders(&self) -> Result<Value> {
        self.get_json("/folders")
    }
}
