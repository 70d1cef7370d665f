//! Upload responses as JSON and HTML

use fseq_core::{ValidationReport, ValidationResult};
use md5::{Digest, Md5};
use serde::Serialize;

/// Name, size and checksum of an uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub name: String,
    pub size: usize,
    pub md5: String,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            name: name.into(),
            size: bytes.len(),
            md5: md5_hex(bytes),
        }
    }
}

/// The part of a report shown to uploaders
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub frame_count: u32,
    pub step_time_ms: u8,
    pub duration_secs: f64,
    pub command_count: u32,
    pub memory_usage_ratio: f64,
}

impl From<&ValidationReport> for ValidationSummary {
    fn from(report: &ValidationReport) -> Self {
        Self {
            frame_count: report.frame_count,
            step_time_ms: report.step_time_ms,
            duration_secs: report.duration_secs,
            command_count: report.command_count,
            memory_usage_ratio: report.memory_usage_ratio,
        }
    }
}

/// Outcome of validating one upload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadResponse {
    pub valid: bool,
    pub file: FileInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Stable tag of the rejection, e.g. `"ChannelCountError"`
    #[serde(rename = "errorKind", skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
}

impl UploadResponse {
    /// Describe `bytes` and the result of validating them
    pub fn from_outcome(name: impl Into<String>, bytes: &[u8], result: &ValidationResult) -> Self {
        let file = FileInfo::new(name, bytes);
        match result {
            Ok(report) => Self {
                valid: true,
                file,
                validation: Some(report.into()),
                error: None,
                error_kind: None,
            },
            Err(error) => Self {
                valid: false,
                file,
                validation: None,
                error: Some(error.to_string()),
                error_kind: Some(error.kind()),
            },
        }
    }

    /// HTML fragment for browser uploads
    pub fn to_html(&self) -> String {
        let name = escape_html(&self.file.name);
        let mut html = String::new();
        match (&self.validation, &self.error) {
            (Some(summary), _) => {
                html.push_str("<div class=\"fseq-result valid\">\n");
                html.push_str(&format!("  <h3>{name} is valid</h3>\n"));
                html.push_str("  <ul>\n");
                html.push_str(&format!("    <li>Frames: {}</li>\n", summary.frame_count));
                html.push_str(&format!("    <li>Step time: {} ms</li>\n", summary.step_time_ms));
                html.push_str(&format!("    <li>Duration: {:.3} s</li>\n", summary.duration_secs));
                html.push_str(&format!("    <li>Commands: {}</li>\n", summary.command_count));
                html.push_str(&format!(
                    "    <li>Memory usage: {:.2}%</li>\n",
                    summary.memory_usage_ratio * 100.0
                ));
                html.push_str("  </ul>\n");
            }
            (None, error) => {
                html.push_str("<div class=\"fseq-result invalid\">\n");
                html.push_str(&format!("  <h3>{name} is invalid</h3>\n"));
                html.push_str(&format!(
                    "  <p class=\"error\">{}</p>\n",
                    escape_html(error.as_deref().unwrap_or("Unknown error"))
                ));
            }
        }
        html.push_str(&format!(
            "  <p class=\"file\">{} bytes, md5 {}</p>\n</div>\n",
            self.file.size, self.file.md5
        ));
        html
    }
}

/// Body returned when the form carried no sequence file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MissingUpload {
    pub status: bool,
    pub message: &'static str,
}

impl Default for MissingUpload {
    fn default() -> Self {
        Self {
            status: false,
            message: "No file uploaded",
        }
    }
}

/// Lowercase hex md5 of `bytes`
pub fn md5_hex(bytes: &[u8]) -> String {
    format!("{:x}", Md5::digest(bytes))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
