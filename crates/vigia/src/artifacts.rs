//! Failure artifacts on disk.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::driver::Screenshot;
use crate::result::VigiaResult;

/// Directory under the output dir receiving failure screenshots.
pub const SCREENSHOT_DIR: &str = "screenshots";

/// File name for a failure screenshot: `{testname}_{%Y-%m-%d_%H-%M-%S}.png`.
#[must_use]
pub fn screenshot_file_name(test_name: &str, at: DateTime<Local>) -> String {
    format!("{}_{}.png", test_name, at.format("%Y-%m-%d_%H-%M-%S"))
}

/// Write a failure screenshot under `{output_dir}/screenshots/`, creating
/// the directory as needed. Returns the path of the written file.
///
/// # Errors
///
/// Returns [`VigiaError::Io`] when the directory or file cannot be written.
///
/// [`VigiaError::Io`]: crate::result::VigiaError::Io
pub fn save_failure_screenshot(
    output_dir: &Path,
    test_name: &str,
    screenshot: &Screenshot,
) -> VigiaResult<PathBuf> {
    let dir = output_dir.join(SCREENSHOT_DIR);
    std::fs::create_dir_all(&dir)?;

    let path = dir.join(screenshot_file_name(test_name, Local::now()));
    std::fs::write(&path, &screenshot.data)?;
    info!(test_name, path = %path.display(), "failure screenshot saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_file_name_embeds_test_and_timestamp() {
        let at = Local.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(
            screenshot_file_name("test_login_TC04", at),
            "test_login_TC04_2024-01-15_10-30-00.png"
        );
    }

    #[test]
    fn test_save_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let shot = Screenshot::new(vec![0x89, b'P', b'N', b'G']);

        let path = save_failure_screenshot(dir.path(), "test_login_TC04", &shot).unwrap();

        assert!(path.starts_with(dir.path().join(SCREENSHOT_DIR)));
        assert_eq!(std::fs::read(&path).unwrap(), shot.data);
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("test_login_TC04_"));
        assert!(name.ends_with(".png"));
    }
}
