use std::io::Write;
use std::path::Path;

use crate::error::ReportError;
use crate::report::Report;

/// Compact JSON followed by exactly one newline.
pub fn render(report: &Report) -> Result<String, ReportError> {
    let mut json = serde_json::to_string(report)?;
    json.push('\n');
    Ok(json)
}

/// Render `report` and replace the contents of `path` with it.
///
/// The bytes are written to a temporary file next to `path` and renamed over
/// it, so the target either keeps its old content or holds the whole report.
/// An existing target keeps its permissions; a new one gets `0o644`.
/// Returns the number of bytes written.
pub fn write_report(path: &Path, report: &Report) -> Result<usize, ReportError> {
    let content = render(report)?;
    let write_err = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
    temp.write_all(content.as_bytes()).map_err(write_err)?;
    if let Some(permissions) = target_permissions(path) {
        temp.as_file()
            .set_permissions(permissions)
            .map_err(write_err)?;
    }
    temp.as_file().sync_all().map_err(write_err)?;
    temp.persist(path).map_err(|e| write_err(e.error))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Report written");
    Ok(content.len())
}

/// Permissions the written report should end up with. The temp file is
/// created `0o600`.
fn target_permissions(path: &Path) -> Option<std::fs::Permissions> {
    if let Ok(metadata) = std::fs::metadata(path) {
        return Some(metadata.permissions());
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(std::fs::Permissions::from_mode(0o644))
    }
    #[cfg(not(unix))]
    {
        None
    }
}
