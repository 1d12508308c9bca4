use crate::aibom_aggregation::domain::TargetDescriptor;
use crate::shared::Result;
use async_trait::async_trait;
use serde_json::Value;

/// AibomSource port for discovering targets and retrieving their AI-BOMs
///
/// Implemented by the Snyk REST client and by the offline file source.
/// Implementations must be `Send + Sync` so fetches can run concurrently.
#[async_trait]
pub trait AibomSource: Send + Sync {
    /// Lists every target in scope, in a stable order
    ///
    /// # Errors
    /// Returns an error if the target listing itself cannot be retrieved.
    async fn list_targets(&self) -> Result<Vec<TargetDescriptor>>;

    /// Retrieves the raw AI-BOM document of one target
    ///
    /// # Errors
    /// Returns an error if the document cannot be retrieved. Callers treat
    /// this as a per-target failure, not a fatal one.
    async fn fetch_aibom(&self, target: &TargetDescriptor) -> Result<Value>;
}
