use crate::ports::outbound::OutputPresenter;
use crate::shared::error::AibomError;
use crate::shared::security::validate_not_symlink;
use crate::shared::Result;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// FileSystemWriter adapter for writing a report to a file
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    /// Validates that the parent directory exists before writing
    fn validate_parent_directory(&self) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if parent != Path::new("") && !parent.is_dir() {
                return Err(AibomError::FileWriteError {
                    path: self.output_path.clone(),
                    details: format!("Parent directory does not exist: {}", parent.display()),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, content: &str) -> Result<()> {
        self.validate_parent_directory()?;
        validate_not_symlink(&self.output_path, "write")?;

        fs::write(&self.output_path, content).map_err(|e| AibomError::FileWriteError {
            path: self.output_path.clone(),
            details: e.to_string(),
        })?;

        eprintln!("📄 Report saved to: {}", self.output_path.display());
        Ok(())
    }
}

/// StdoutPresenter adapter for writing a report to stdout
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        let write = |out: &mut io::StdoutLock<'_>| -> io::Result<()> {
            out.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                out.write_all(b"\n")?;
            }
            out.flush()
        };
        write(&mut stdout).map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_writer_success() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("report.json");

        let writer = FileSystemWriter::new(output_path.clone());
        writer.present("{\"groups\": {}}").unwrap();

        assert_eq!(fs::read_to_string(&output_path).unwrap(), "{\"groups\": {}}");
    }

    #[test]
    fn test_file_writer_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("report.html");
        fs::write(&output_path, "old").unwrap();

        FileSystemWriter::new(output_path.clone())
            .present("new")
            .unwrap();
        assert_eq!(fs::read_to_string(&output_path).unwrap(), "new");
    }

    #[test]
    fn test_file_writer_parent_directory_not_found() {
        let output_path = PathBuf::from("/nonexistent/directory/report.json");

        let result = FileSystemWriter::new(output_path).present("content");
        let err_string = result.unwrap_err().to_string();
        assert!(err_string.contains("Parent directory does not exist"));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_writer_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let real = temp_dir.path().join("real.json");
        let link = temp_dir.path().join("link.json");
        fs::write(&real, "original").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let result = FileSystemWriter::new(link).present("overwritten");
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&real).unwrap(), "original");
    }

    #[test]
    fn test_stdout_presenter_success() {
        let presenter = StdoutPresenter::new();
        assert!(presenter.present("{}\n").is_ok());
    }
}
