use crate::aibom_aggregation::policies::Policy;
use crate::shared::Result;
use std::path::Path;

/// PolicyReader port for loading a forbidden-model policy
pub trait PolicyReader {
    /// Loads and validates the policy at `path`
    ///
    /// # Errors
    /// Returns `InvalidPolicy` naming `path` if the file is missing,
    /// unparseable, or has an invalid `reject` list.
    fn load_policy(&self, path: &Path) -> Result<Policy>;
}
