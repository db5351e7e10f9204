use crate::MediaInspectorError;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Runs the container report tool on `media_file` and returns its standard output.
///
/// The tool gets the path as its only argument. Standard error is logged, a non-zero
/// exit status is logged but whatever was printed is still returned. The child is
/// killed if it doesn't finish within `timeout`.
///
/// # Errors
///
/// * [`MediaInspectorError::ReportSpawn`]: the program can't be started (e.g. not installed).
/// * [`MediaInspectorError::ReportTimeout`]: the program ran longer than `timeout`.
/// * [`MediaInspectorError::Io`]: reading the program's output failed.
pub async fn run_report_tool(
    program: &Path,
    media_file: &Path,
    timeout: Duration,
) -> Result<String, MediaInspectorError> {
    let child = Command::new(program)
        .arg(media_file)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| MediaInspectorError::ReportSpawn {
            program: program.to_path_buf(),
            source,
        })?;

    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| MediaInspectorError::ReportTimeout(timeout))??;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        tracing::debug!("{} error output: {}", program.display(), stderr.trim());
    }
    if !output.status.success() {
        tracing::warn!(
            "{} exited with {} for {}",
            program.display(),
            output.status,
            media_file.display()
        );
    }

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    tracing::trace!("full container report: {stdout}");
    Ok(stdout)
}
