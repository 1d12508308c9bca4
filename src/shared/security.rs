use crate::shared::error::AibomError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum input file size (100 MB). Saved AI-BOM exports of large
/// organizations stay well below this.
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
/// A path that does not exist yet is accepted (the caller is about to create it).
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            anyhow::bail!(
                "Failed to read metadata for {} operation on {}: {}",
                operation,
                path.display(),
                e
            )
        }
    };

    if metadata.is_symlink() {
        return Err(AibomError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "{} operations on symbolic links are not allowed",
                operation
            ),
            hint: "Point the option at a regular file instead of a link".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
/// - The file is larger than [`MAX_FILE_SIZE`]
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| AibomError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if metadata.is_symlink() {
        return Err(AibomError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Symbolic links are not allowed for input files".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(AibomError::FileReadError {
            path: path.to_path_buf(),
            details: format!("{} is not a regular file", file_description),
        }
        .into());
    }

    validate_file_size(metadata.len(), path, MAX_FILE_SIZE)
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(AibomError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes.",
                file_size, max_size
            ),
            hint: "Split the input into smaller files".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Reads a regular file to a string after running [`validate_regular_file`]
pub fn read_regular_file(path: &Path, file_description: &str) -> Result<String> {
    validate_regular_file(path, file_description)?;
    fs::read_to_string(path).map_err(|e| {
        AibomError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_validate_not_symlink_regular_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("report.json");
        fs::write(&file_path, "{}").unwrap();

        assert!(validate_not_symlink(&file_path, "write").is_ok());
    }

    #[test]
    fn test_validate_not_symlink_missing_path_is_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("not-yet-written.html");

        assert!(validate_not_symlink(&file_path, "write").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_not_symlink_rejects_link() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target.json");
        let link = temp_dir.path().join("link.json");
        fs::write(&target, "{}").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let err = validate_not_symlink(&link, "write").unwrap_err();
        assert!(err.to_string().contains("Security violation"));
    }

    #[test]
    fn test_validate_regular_file_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_regular_file(temp_dir.path(), "policy file");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("not a regular file"));
    }

    #[test]
    fn test_validate_regular_file_missing() {
        let result = validate_regular_file(Path::new("/nonexistent/policy.yml"), "policy file");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_file_size_exceeds_limit() {
        let path = PathBuf::from("/test/aiboms.json");
        let result = validate_file_size(MAX_FILE_SIZE + 1, &path, MAX_FILE_SIZE);
        assert!(result.unwrap_err().to_string().contains("too large"));
    }

    #[test]
    fn test_read_regular_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("policy.yml");
        fs::write(&file_path, "reject: []").unwrap();

        let content = read_regular_file(&file_path, "policy file").unwrap();
        assert_eq!(content, "reject: []");
    }
}
