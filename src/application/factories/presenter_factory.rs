use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::PathBuf;

/// Where a rendered report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    Stdout,
    File(PathBuf),
}

impl PresenterType {
    /// `File` for `Some(path)`, otherwise `Stdout`
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(PresenterType::Stdout, PresenterType::File)
    }
}

/// Factory for creating output presenters
pub struct PresenterFactory;

impl PresenterFactory {
    /// Creates a presenter for a report destination
    ///
    /// # Examples
    /// ```
    /// use aibom_tools::application::factories::{PresenterFactory, PresenterType};
    ///
    /// let presenter = PresenterFactory::create(PresenterType::Stdout);
    /// ```
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_stdout_presenter() {
        let presenter = PresenterFactory::create(PresenterType::Stdout);
        // Verify it doesn't panic when created
        assert!(std::mem::size_of_val(&presenter) > 0);
    }

    #[test]
    fn test_create_file_presenter() {
        let path = PathBuf::from("/tmp/aibom-report.json");
        let presenter = PresenterFactory::create(PresenterType::File(path));
        assert!(std::mem::size_of_val(&presenter) > 0);
    }

    #[test]
    fn test_presenter_type_from_path() {
        assert_eq!(PresenterType::from_path(None), PresenterType::Stdout);
        assert_eq!(
            PresenterType::from_path(Some(PathBuf::from("report.html"))),
            PresenterType::File(PathBuf::from("report.html"))
        );
    }
}
