//! Parsing of the text report a container inspection tool (`mkvinfo`) prints for a video.
//!
//! The report is decoded once into a [`VideoMetadata`]; every display query is then
//! answered from that record with first-match-wins semantics and a fixed default string
//! per query.
mod fields;
mod parsing;
mod runner;
mod structs;

pub use fields::{FIELD_LABELS, ReportField, VideoQuery};
pub use parsing::{VIDEO_DATE_DISPLAY, format_report_date, line_value};
pub use runner::run_report_tool;
pub use structs::VideoMetadata;
