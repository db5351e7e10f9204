use serde::{Deserialize, Serialize};

/// A field the container report tool prints, recognised by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportField {
    Duration,
    Title,
    MultiplexingApplication,
    WritingApplication,
    TrackNumber,
    TrackType,
    CodecId,
    PixelWidth,
    PixelHeight,
    Channels,
    SamplingFrequency,
    Date,
    DocumentType,
}

/// Label table. A line belongs to a field when it contains any of the field's labels;
/// one line may belong to several fields.
pub const FIELD_LABELS: &[(ReportField, &[&str])] = &[
    (ReportField::Duration, &["Duration"]),
    (ReportField::Title, &["Title"]),
    (
        ReportField::MultiplexingApplication,
        &["Multiplexing application", "Muxing application"],
    ),
    (ReportField::WritingApplication, &["Writing application"]),
    (ReportField::TrackNumber, &["Track number"]),
    (ReportField::TrackType, &["Track type"]),
    (ReportField::CodecId, &["Codec ID"]),
    (ReportField::PixelWidth, &["Pixel width"]),
    (ReportField::PixelHeight, &["Pixel height"]),
    (ReportField::Channels, &["Channels"]),
    (ReportField::SamplingFrequency, &["Sampling frequency"]),
    (ReportField::Date, &["Date"]),
    (ReportField::DocumentType, &["Document type"]),
];

impl ReportField {
    pub fn labels(self) -> &'static [&'static str] {
        FIELD_LABELS
            .iter()
            .find(|(field, _)| *field == self)
            .map(|(_, labels)| *labels)
            .unwrap_or_default()
    }

    pub fn matches(self, line: &str) -> bool {
        self.labels().iter().any(|label| line.contains(label))
    }
}

/// The display queries answered from a report, each with the exact string returned
/// when the report doesn't carry the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VideoQuery {
    Date,
    Dimensions,
    Duration,
    MultiplexingApplication,
    WritingApplication,
    DocumentType,
    CodecId,
}

impl VideoQuery {
    pub const ALL: [VideoQuery; 7] = [
        Self::Date,
        Self::Dimensions,
        Self::Duration,
        Self::MultiplexingApplication,
        Self::WritingApplication,
        Self::DocumentType,
        Self::CodecId,
    ];

    pub const fn default_answer(self) -> &'static str {
        match self {
            Self::Date => "Date not found.",
            Self::Dimensions => "Dimensions not found.",
            Self::Duration => "Duration not found.",
            Self::MultiplexingApplication => "Multiplexing Application: Not found",
            Self::WritingApplication => "",
            Self::DocumentType => "File Type: Not found",
            Self::CodecId => "Codec ID: Not found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_labels() {
        for (field, labels) in FIELD_LABELS {
            assert!(!labels.is_empty(), "{field:?} has no labels");
            assert_eq!(field.labels(), *labels);
        }
        assert_eq!(FIELD_LABELS.len(), 13);
    }

    #[test]
    fn test_matching_is_case_sensitive_substring() {
        assert!(ReportField::Duration.matches("| + Duration: 00:00:10.000000000"));
        assert!(!ReportField::Duration.matches("|  + Default duration: 33.367ms"));
        assert!(ReportField::MultiplexingApplication.matches("| + Muxing application: libebml"));
        assert!(ReportField::CodecId.matches("|  + Codec ID: V_MPEG4/ISO/AVC"));
    }
}
