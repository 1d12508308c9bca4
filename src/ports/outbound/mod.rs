/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (vendor API, file system, console).
pub mod aibom_source;
pub mod output_presenter;
pub mod policy_reader;
pub mod progress_reporter;
pub mod report_formatter;

pub use aibom_source::AibomSource;
pub use output_presenter::OutputPresenter;
pub use policy_reader::PolicyReader;
pub use progress_reporter::ProgressReporter;
pub use report_formatter::ReportFormatter;
