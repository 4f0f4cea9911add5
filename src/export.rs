//! Render sink: hands finished markup to stdout, a file or the clipboard.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;

/// Where rendered markup goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// Standard output
    Stdout,
    /// A file, written atomically
    File(PathBuf),
    /// The system clipboard
    Clipboard,
}

impl ExportTarget {
    /// Picks a target from CLI-style options: an explicit file wins, then the
    /// clipboard flag, otherwise stdout.
    #[must_use]
    pub fn choose(out: Option<PathBuf>, clipboard: bool) -> Self {
        match out {
            Some(path) => Self::File(path),
            None if clipboard => Self::Clipboard,
            None => Self::Stdout,
        }
    }
}

/// Writes `html` to `target`.
pub fn export_html(html: &str, target: &ExportTarget) -> Result<()> {
    match target {
        ExportTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(html.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")
        }
        ExportTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            let temp_path = path.with_extension("html.tmp");
            std::fs::write(&temp_path, html).with_context(|| {
                format!("Failed to write to temporary file: {}", temp_path.display())
            })?;
            std::fs::rename(&temp_path, path)
                .with_context(|| format!("Failed to rename temporary file to: {}", path.display()))
        }
        ExportTarget::Clipboard => {
            let mut clipboard = arboard::Clipboard::new().context("Failed to access clipboard")?;
            clipboard
                .set_text(html)
                .context("Failed to copy HTML to clipboard")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_choose_target() {
        assert_eq!(ExportTarget::choose(None, false), ExportTarget::Stdout);
        assert_eq!(ExportTarget::choose(None, true), ExportTarget::Clipboard);
        assert_eq!(
            ExportTarget::choose(Some(PathBuf::from("out.html")), true),
            ExportTarget::File(PathBuf::from("out.html"))
        );
    }

    #[test]
    fn test_export_to_file() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("build").join("email.html");
        export_html("<p>hi</p>", &ExportTarget::File(path.clone()))?;
        assert_eq!(std::fs::read_to_string(&path)?, "<p>hi</p>");
        Ok(())
    }

    #[test]
    fn test_export_to_stdout_succeeds() -> Result<()> {
        export_html("<p>hi</p>", &ExportTarget::Stdout)
    }
}
