/// Filesystem adapters for file I/O operations
mod file_reader;
mod file_writer;
mod saved_aibom_source;

pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use saved_aibom_source::FileAibomSource;
