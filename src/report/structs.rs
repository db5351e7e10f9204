use crate::report::fields::{FIELD_LABELS, ReportField, VideoQuery};
use crate::report::parsing::{format_report_date, line_value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A container report decoded in a single pass.
///
/// For every field only the first matching line is kept, in report order. All recognised
/// lines are kept as well, for display as a raw dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    fields: BTreeMap<ReportField, String>,
    lines: Vec<String>,
}

impl VideoMetadata {
    /// Scans the report line by line. Empty input yields an empty record.
    pub fn parse(report: &str) -> Self {
        let mut metadata = Self::default();
        for line in report.lines() {
            let line = line.trim();
            let mut recognised = false;
            for (field, _) in FIELD_LABELS {
                if field.matches(line) {
                    recognised = true;
                    metadata
                        .fields
                        .entry(*field)
                        .or_insert_with(|| line.to_string());
                }
            }
            if recognised {
                metadata.lines.push(line.to_string());
            }
        }
        metadata
    }

    /// The first trimmed line carrying `field`.
    pub fn line(&self, field: ReportField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// The value part (after the first colon) of the first line carrying `field`.
    pub fn value(&self, field: ReportField) -> Option<&str> {
        self.line(field).and_then(line_value)
    }

    /// Every recognised line, trimmed, in report order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Answers `query`, or returns its documented default string.
    pub fn answer(&self, query: VideoQuery) -> String {
        let found = match query {
            VideoQuery::Date => self.value(ReportField::Date).and_then(format_report_date),
            VideoQuery::Dimensions => {
                match (
                    self.non_empty_value(ReportField::PixelWidth),
                    self.non_empty_value(ReportField::PixelHeight),
                ) {
                    (Some(width), Some(height)) => Some(format!("{width}x{height}")),
                    _ => None,
                }
            }
            VideoQuery::Duration => self
                .line(ReportField::Duration)
                .map(|line| format!("Duration: {line}")),
            VideoQuery::MultiplexingApplication => self
                .value(ReportField::MultiplexingApplication)
                .map(str::to_string),
            VideoQuery::WritingApplication => self
                .value(ReportField::WritingApplication)
                .map(|app| format!("Writing application: {app}")),
            VideoQuery::DocumentType => self
                .value(ReportField::DocumentType)
                .map(|doc_type| format!("File Type: {doc_type}")),
            VideoQuery::CodecId => self
                .value(ReportField::CodecId)
                .map(|codec| format!("Codec ID: {codec}")),
        };

        found.unwrap_or_else(|| {
            tracing::debug!("{query:?} not found in container report");
            query.default_answer().to_string()
        })
    }

    fn non_empty_value(&self, field: ReportField) -> Option<&str> {
        self.value(field).filter(|v| !v.is_empty())
    }

    pub fn date(&self) -> String {
        self.answer(VideoQuery::Date)
    }

    pub fn dimensions(&self) -> String {
        self.answer(VideoQuery::Dimensions)
    }

    pub fn duration(&self) -> String {
        self.answer(VideoQuery::Duration)
    }

    pub fn multiplexing_application(&self) -> String {
        self.answer(VideoQuery::MultiplexingApplication)
    }

    pub fn writing_application(&self) -> String {
        self.answer(VideoQuery::WritingApplication)
    }

    pub fn document_type(&self) -> String {
        self.answer(VideoQuery::DocumentType)
    }

    pub fn codec_id(&self) -> String {
        self.answer(VideoQuery::CodecId)
    }
}
