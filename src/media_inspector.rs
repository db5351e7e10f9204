use crate::MediaInspectorError;
use crate::exif::{ExifStatus, ImageMetadata, parse_exif};
use crate::report::{VideoMetadata, VideoQuery, run_report_tool};
use crate::structs::{ImageReport, InspectResult, VideoReport};
use crate::utils::{MediaKind, strip_scheme};
use bon::bon;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The container report tool used when none is configured.
pub const DEFAULT_REPORT_PROGRAM: &str = "mkvinfo";

/// How long a report tool run may take before it's killed.
pub const DEFAULT_REPORT_TIMEOUT: Duration = Duration::from_secs(30);

/// Answers metadata queries for the photos and videos a camera app shows.
///
/// Every query takes a file locator, which may carry a URI scheme (`file:///...`); the
/// scheme is stripped before the file is touched. Queries never fail: unreadable files,
/// a missing report tool or malformed metadata all degrade to the query's default answer.
///
/// Use the builder pattern to construct an instance:
/// ```rust
/// # use std::time::Duration;
/// # use media_inspector::MediaInspector;
/// let inspector = MediaInspector::builder()
///     .report_program("/usr/bin/mkvinfo")
///     .report_timeout(Duration::from_secs(5))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct MediaInspector {
    report_program: PathBuf,
    report_timeout: Duration,
}

impl Default for MediaInspector {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[bon]
impl MediaInspector {
    /// Constructs a `MediaInspector` via a builder pattern.
    ///
    /// # Builder Arguments
    ///
    /// * `report_program: PathBuf` - (Default: `mkvinfo`) The container inspection tool run
    ///   for videos. It receives the video path as its only argument and must print its
    ///   report to standard output. Looked up in `PATH` when not absolute.
    /// * `report_timeout: Duration` - (Default: 30 s) How long to wait for the tool before
    ///   killing it and answering with defaults.
    #[builder]
    pub fn new(
        #[builder(into, default = PathBuf::from(DEFAULT_REPORT_PROGRAM))] report_program: PathBuf,
        #[builder(default = DEFAULT_REPORT_TIMEOUT)] report_timeout: Duration,
    ) -> Self {
        Self {
            report_program,
            report_timeout,
        }
    }

    pub fn report_program(&self) -> &Path {
        &self.report_program
    }

    pub fn report_timeout(&self) -> Duration {
        self.report_timeout
    }

    /// Reads the file behind `locator` and decodes its EXIF segment.
    ///
    /// An unreadable file is logged and parsed as an empty buffer, so the record comes
    /// back empty with a non-success status.
    pub async fn image_metadata(&self, locator: &str) -> (ImageMetadata, ExifStatus) {
        self.image_metadata_at(Path::new(strip_scheme(locator))).await
    }

    /// Like [`MediaInspector::image_metadata`], for a plain filesystem path. No scheme is
    /// stripped, so paths containing a colon are read as-is.
    #[tracing::instrument(skip(self))]
    pub async fn image_metadata_at(&self, path: &Path) -> (ImageMetadata, ExifStatus) {
        let bytes = tokio::fs::read(path)
            .await
            .inspect_err(|e| tracing::warn!("Can't read file {}: {e}", path.display()))
            .unwrap_or_default();
        if bytes.is_empty() {
            tracing::warn!("No bytes to parse for {}", path.display());
        }

        let (metadata, status) = parse_exif(&bytes);
        if !status.is_success() {
            tracing::warn!("Error parsing EXIF: code {}", status.code());
        }
        (metadata, status)
    }

    /// Runs the report tool on the file behind `locator` and decodes its output.
    ///
    /// If the tool can't be started, fails, or times out, the failure is logged and an
    /// empty record is returned, which answers every query with its default.
    pub async fn video_metadata(&self, locator: &str) -> VideoMetadata {
        self.video_metadata_at(Path::new(strip_scheme(locator))).await
    }

    /// Like [`MediaInspector::video_metadata`], for a plain filesystem path.
    #[tracing::instrument(skip(self))]
    pub async fn video_metadata_at(&self, path: &Path) -> VideoMetadata {
        if path.as_os_str().is_empty() {
            return VideoMetadata::default();
        }
        let report = run_report_tool(&self.report_program, path, self.report_timeout)
            .await
            .inspect_err(|e| tracing::warn!("Error executing container report tool: {e}"))
            .unwrap_or_default();
        VideoMetadata::parse(&report)
    }

    /// Decodes the file once and answers every query for it.
    ///
    /// The parser is chosen by file extension, see [`MediaKind::from_path`].
    ///
    /// # Errors
    ///
    /// * [`MediaInspectorError::UnsupportedMedia`]: the extension is neither a known
    ///   image nor a known video extension.
    pub async fn inspect(&self, locator: &str) -> Result<InspectResult, MediaInspectorError> {
        self.inspect_path(Path::new(strip_scheme(locator))).await
    }

    /// Like [`MediaInspector::inspect`], for a plain filesystem path such as one returned
    /// by [`crate::utils::list_files_walkdir_filtered`]. No scheme is stripped.
    ///
    /// # Errors
    ///
    /// * [`MediaInspectorError::UnsupportedMedia`]: see [`MediaInspector::inspect`].
    pub async fn inspect_path(&self, path: &Path) -> Result<InspectResult, MediaInspectorError> {
        let kind = MediaKind::from_path(path)
            .ok_or_else(|| MediaInspectorError::UnsupportedMedia(path.to_path_buf()))?;
        Ok(self.inspect_path_as(path, kind).await)
    }

    /// Like [`MediaInspector::inspect`], with the parser chosen by the caller.
    pub async fn inspect_as(&self, locator: &str, kind: MediaKind) -> InspectResult {
        self.inspect_path_as(Path::new(strip_scheme(locator)), kind).await
    }

    async fn inspect_path_as(&self, path: &Path, kind: MediaKind) -> InspectResult {
        match kind {
            MediaKind::Image => {
                let (metadata, status) = self.image_metadata_at(path).await;
                InspectResult::Image(ImageReport::new(path.to_path_buf(), metadata, status))
            }
            MediaKind::Video => {
                let metadata = self.video_metadata_at(path).await;
                InspectResult::Video(VideoReport::new(path.to_path_buf(), &metadata))
            }
        }
    }

    /// Deletes the file behind `locator`. Returns `false` if it doesn't exist or can't be
    /// removed.
    #[tracing::instrument(skip(self))]
    pub async fn delete_media(&self, locator: &str) -> bool {
        let path = Path::new(strip_scheme(locator));
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return false;
        }
        tokio::fs::remove_file(path)
            .await
            .inspect_err(|e| tracing::warn!("Failed to delete {}: {e}", path.display()))
            .is_ok()
    }

    // --- Photo queries ---

    async fn answer_image(&self, locator: &str, answer: fn(&ImageMetadata) -> String) -> String {
        if locator.is_empty() {
            return String::new();
        }
        let (metadata, _) = self.image_metadata(locator).await;
        answer(&metadata)
    }

    /// e.g. `"Mar 09, 2024 \n 18:04"`, or `"Invalid date/time"`.
    pub async fn picture_date(&self, locator: &str) -> String {
        self.answer_image(locator, ImageMetadata::capture_date).await
    }

    /// e.g. `"Google Pixel 3a"`.
    pub async fn camera_hardware(&self, locator: &str) -> String {
        self.answer_image(locator, ImageMetadata::hardware).await
    }

    /// e.g. `"4032 x 3024"`.
    pub async fn dimensions(&self, locator: &str) -> String {
        self.answer_image(locator, ImageMetadata::dimensions).await
    }

    /// e.g. `"f/2.8"`.
    pub async fn f_stop(&self, locator: &str) -> String {
        self.answer_image(locator, ImageMetadata::f_stop).await
    }

    /// e.g. `"1/125 s"`.
    pub async fn exposure(&self, locator: &str) -> String {
        self.answer_image(locator, ImageMetadata::exposure).await
    }

    /// e.g. `"ISO: 200"`.
    pub async fn iso_speed(&self, locator: &str) -> String {
        self.answer_image(locator, ImageMetadata::iso).await
    }

    /// e.g. `"-0.666667 EV"`.
    pub async fn exposure_bias(&self, locator: &str) -> String {
        self.answer_image(locator, ImageMetadata::exposure_bias_ev).await
    }

    /// e.g. `"35mm focal length: 27 mm"`.
    pub async fn focal_length_standard(&self, locator: &str) -> String {
        self.answer_image(locator, ImageMetadata::focal_length_standard)
            .await
    }

    /// e.g. `"4.44 mm"`.
    pub async fn focal_length(&self, locator: &str) -> String {
        self.answer_image(locator, ImageMetadata::focal_length_mm).await
    }

    pub async fn flash(&self, locator: &str) -> bool {
        if locator.is_empty() {
            return false;
        }
        let (metadata, _) = self.image_metadata(locator).await;
        metadata.flash_fired()
    }

    // --- Video queries ---

    async fn answer_video(&self, locator: &str, query: VideoQuery) -> String {
        self.video_metadata(locator).await.answer(query)
    }

    /// e.g. `"Jul 4, 2023 \n 09:05"`, or `"Date not found."`.
    pub async fn video_date(&self, locator: &str) -> String {
        self.answer_video(locator, VideoQuery::Date).await
    }

    /// e.g. `"1920x1080"`, or `"Dimensions not found."`.
    pub async fn video_dimensions(&self, locator: &str) -> String {
        self.answer_video(locator, VideoQuery::Dimensions).await
    }

    pub async fn duration(&self, locator: &str) -> String {
        self.answer_video(locator, VideoQuery::Duration).await
    }

    pub async fn multiplexing_application(&self, locator: &str) -> String {
        self.answer_video(locator, VideoQuery::MultiplexingApplication)
            .await
    }

    pub async fn writing_application(&self, locator: &str) -> String {
        self.answer_video(locator, VideoQuery::WritingApplication)
            .await
    }

    pub async fn document_type(&self, locator: &str) -> String {
        self.answer_video(locator, VideoQuery::DocumentType).await
    }

    pub async fn codec_id(&self, locator: &str) -> String {
        self.answer_video(locator, VideoQuery::CodecId).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exif::ByteOrder;
    use crate::exif::tags::*;
    use crate::exif::testing::{FieldValue, TiffBuilder};
    use crate::utils::list_files_walkdir_filtered;
    use std::fs;
    use tempfile::TempDir;

    fn write_photo(dir: &TempDir) -> PathBuf {
        write_photo_in(dir.path())
    }

    fn write_photo_in(dir: &Path) -> PathBuf {
        let jpeg = TiffBuilder::new(ByteOrder::LittleEndian)
            .ifd0(MAKE, FieldValue::Ascii("Google"))
            .ifd0(MODEL, FieldValue::Ascii("Pixel 3a"))
            .exif(EXPOSURE_TIME, FieldValue::Rational(1, 125))
            .exif(F_NUMBER, FieldValue::Rational(28, 10))
            .exif(ISO_SPEED_RATINGS, FieldValue::Short(200))
            .exif(EXPOSURE_BIAS_VALUE, FieldValue::SignedRational(1, 2))
            .exif(FOCAL_LENGTH, FieldValue::Rational(444, 100))
            .exif(FOCAL_LENGTH_IN_35MM_FILM, FieldValue::Short(27))
            .exif(FLASH, FieldValue::Short(0x10))
            .exif(DATE_TIME_ORIGINAL, FieldValue::Ascii("2024:03:09 18:04:58"))
            .exif(PIXEL_X_DIMENSION, FieldValue::Long(4032))
            .exif(PIXEL_Y_DIMENSION, FieldValue::Long(3024))
            .jpeg();
        let path = dir.join("IMG_20240309_180458.jpg");
        fs::write(&path, jpeg).expect("write test photo");
        path
    }

    fn locator(path: &Path) -> String {
        format!("file://{}", path.display())
    }

    const REPORT: &str = "\
|+ Document type: matroska
| + Multiplexing application: libebml v1.4.4 + libmatroska v1.7.1
| + Writing application: mkvmerge v79.0 64-bit
| + Duration: 00:00:04.004000000
| + Date: 2024-01-15 08:30:00 UTC
|  + Codec ID: V_MPEG4/ISO/AVC
|   + Pixel width: 1920
|   + Pixel height: 1080
|  + Codec ID: A_AAC
";

    #[tokio::test]
    async fn test_photo_queries() -> Result<(), MediaInspectorError> {
        let dir = tempfile::tempdir()?;
        let photo = locator(&write_photo(&dir));
        let inspector = MediaInspector::default();

        // --- Assertions ---
        assert_eq!(inspector.picture_date(&photo).await, "Mar 09, 2024 \n 18:04");
        assert_eq!(inspector.camera_hardware(&photo).await, "Google Pixel 3a");
        assert_eq!(inspector.dimensions(&photo).await, "4032 x 3024");
        assert_eq!(inspector.f_stop(&photo).await, "f/2.8");
        assert_eq!(inspector.exposure(&photo).await, "1/125 s");
        assert_eq!(inspector.iso_speed(&photo).await, "ISO: 200");
        assert_eq!(inspector.exposure_bias(&photo).await, "0.5 EV");
        assert_eq!(
            inspector.focal_length_standard(&photo).await,
            "35mm focal length: 27 mm"
        );
        assert_eq!(inspector.focal_length(&photo).await, "4.44 mm");
        assert!(!inspector.flash(&photo).await);

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_locator_short_circuits() {
        let inspector = MediaInspector::default();

        assert_eq!(inspector.picture_date("").await, "");
        assert_eq!(inspector.camera_hardware("").await, "");
        assert_eq!(inspector.dimensions("").await, "");
        assert_eq!(inspector.f_stop("").await, "");
        assert_eq!(inspector.exposure("").await, "");
        assert_eq!(inspector.iso_speed("").await, "");
        assert_eq!(inspector.exposure_bias("").await, "");
        assert_eq!(inspector.focal_length_standard("").await, "");
        assert_eq!(inspector.focal_length("").await, "");
        assert!(!inspector.flash("").await);
    }

    #[tokio::test]
    async fn test_unreadable_photo_degrades_to_defaults() {
        let inspector = MediaInspector::default();
        let missing = "file:///nonexistent/dir/IMG_0001.jpg";

        let (metadata, status) = inspector.image_metadata(missing).await;
        assert_eq!(metadata, ImageMetadata::default());
        assert_ne!(status, ExifStatus::Success);

        assert_eq!(inspector.picture_date(missing).await, "Invalid date/time");
        assert_eq!(inspector.exposure(missing).await, "");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_video_queries_from_report_tool() -> Result<(), MediaInspectorError> {
        let dir = tempfile::tempdir()?;
        // `cat` prints the file, so a text file holding a report stands in for a video.
        let video = dir.path().join("VID_20240115_083000.mkv");
        fs::write(&video, REPORT)?;
        let video = locator(&video);
        let inspector = MediaInspector::builder().report_program("cat").build();

        assert_eq!(inspector.video_date(&video).await, "Jan 15, 2024 \n 08:30");
        assert_eq!(inspector.video_dimensions(&video).await, "1920x1080");
        assert_eq!(
            inspector.duration(&video).await,
            "Duration: | + Duration: 00:00:04.004000000"
        );
        assert_eq!(
            inspector.multiplexing_application(&video).await,
            "libebml v1.4.4 + libmatroska v1.7.1"
        );
        assert_eq!(
            inspector.writing_application(&video).await,
            "Writing application: mkvmerge v79.0 64-bit"
        );
        assert_eq!(inspector.document_type(&video).await, "File Type: matroska");
        assert_eq!(inspector.codec_id(&video).await, "Codec ID: V_MPEG4/ISO/AVC");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_report_tool_gives_defaults() {
        let inspector = MediaInspector::builder()
            .report_program("/nonexistent/mkvinfo")
            .build();
        let video = "file:///nonexistent/VID_0001.mkv";

        for query in VideoQuery::ALL {
            assert_eq!(
                inspector.answer_video(video, query).await,
                query.default_answer()
            );
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_report_tool_timeout_gives_defaults() {
        let inspector = MediaInspector::builder()
            .report_program("sleep")
            .report_timeout(Duration::from_millis(100))
            .build();

        // `sleep 5` never finishes in time
        assert_eq!(inspector.video_dimensions("5").await, "Dimensions not found.");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_inspect_routes_by_extension() -> Result<(), MediaInspectorError> {
        let dir = tempfile::tempdir()?;
        let photo = write_photo(&dir);
        let video = dir.path().join("clip.webm");
        fs::write(&video, REPORT)?;
        let inspector = MediaInspector::builder().report_program("cat").build();

        match inspector.inspect(&locator(&photo)).await? {
            InspectResult::Image(report) => {
                assert_eq!(report.status, ExifStatus::Success);
                assert_eq!(report.f_stop, "f/2.8");
                assert_eq!(report.exif.iso_speed, Some(200));
            }
            other => panic!("expected an image report, got {other:?}"),
        }

        match inspector.inspect(&locator(&video)).await? {
            InspectResult::Video(report) => {
                assert_eq!(report.dimensions, "1920x1080");
                assert_eq!(report.codec_id, "Codec ID: V_MPEG4/ISO/AVC");
                assert_eq!(report.lines.len(), 9);
            }
            other => panic!("expected a video report, got {other:?}"),
        }

        let unsupported = inspector.inspect("file:///tmp/notes.txt").await;
        assert!(matches!(
            unsupported,
            Err(MediaInspectorError::UnsupportedMedia(_))
        ));

        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_walked_path_with_colon_is_read_as_is() -> Result<(), MediaInspectorError> {
        let root = tempfile::tempdir()?;
        let album = root.path().join("2024-03-09 18:04");
        fs::create_dir_all(&album)?;
        let photo = write_photo_in(&album);
        let inspector = MediaInspector::default();

        let files = list_files_walkdir_filtered(root.path(), false)
            .map_err(std::io::Error::other)?;
        assert_eq!(files, vec![photo.clone()]);

        match inspector.inspect_path(&files[0]).await? {
            InspectResult::Image(report) => {
                assert_eq!(report.path, photo);
                assert_eq!(report.status, ExifStatus::Success);
                assert_eq!(report.f_stop, "f/2.8");
            }
            other => panic!("expected an image report, got {other:?}"),
        }

        // The same path as a locator needs a scheme, or the colon is taken as one.
        assert_eq!(inspector.f_stop(&locator(&photo)).await, "f/2.8");
        let (_, status) = inspector.image_metadata(&photo.to_string_lossy()).await;
        assert_ne!(status, ExifStatus::Success);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_media() -> Result<(), MediaInspectorError> {
        let dir = tempfile::tempdir()?;
        let photo = write_photo(&dir);
        let inspector = MediaInspector::default();

        assert!(inspector.delete_media(&locator(&photo)).await);
        assert!(!photo.exists());
        // already gone
        assert!(!inspector.delete_media(&locator(&photo)).await);
        assert!(!inspector.delete_media("").await);

        Ok(())
    }
}
