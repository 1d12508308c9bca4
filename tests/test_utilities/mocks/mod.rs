/// Mock implementations for testing
mod mock_aibom_source;
mod mock_policy_reader;
mod mock_progress_reporter;

pub use mock_aibom_source::MockAibomSource;
pub use mock_policy_reader::MockPolicyReader;
pub use mock_progress_reporter::MockProgressReporter;
