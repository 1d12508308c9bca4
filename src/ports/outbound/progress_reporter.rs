/// ProgressReporter port for reporting progress during a scan
///
/// Output goes to stderr so it never mixes with a report written to stdout.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress of a counted operation (e.g. AI-BOM fetches)
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a warning or a non-fatal error
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
