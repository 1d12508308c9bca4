use aibom_tools::prelude::*;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock AibomSource serving canned documents per target
///
/// Clones share the fetch counter, so a test can keep a handle after moving
/// the source into a use case.
#[derive(Clone)]
pub struct MockAibomSource {
    targets: Vec<(TargetDescriptor, std::result::Result<Value, String>)>,
    should_fail_listing: bool,
    fetch_count: Arc<AtomicUsize>,
}

impl MockAibomSource {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            should_fail_listing: false,
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A GitHub target returning `document`
    pub fn with_document(self, name: &str, document: Value) -> Self {
        self.with_integration(name, "github", document)
    }

    pub fn with_integration(mut self, name: &str, integration: &str, document: Value) -> Self {
        let descriptor = Self::descriptor(name, integration);
        self.targets.push((descriptor, Ok(document)));
        self
    }

    pub fn with_fetch_error(mut self, name: &str, error: &str) -> Self {
        let descriptor = Self::descriptor(name, "github");
        self.targets.push((descriptor, Err(error.to_string())));
        self
    }

    pub fn with_listing_failure() -> Self {
        Self {
            should_fail_listing: true,
            ..Self::new()
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    fn descriptor(name: &str, integration: &str) -> TargetDescriptor {
        TargetDescriptor::new(
            format!("target-{}", name),
            name,
            "org-test",
            Some(integration.to_string()),
        )
    }
}

impl Default for MockAibomSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AibomSource for MockAibomSource {
    async fn list_targets(&self) -> Result<Vec<TargetDescriptor>> {
        if self.should_fail_listing {
            anyhow::bail!("Mock AI-BOM source listing failure");
        }
        Ok(self.targets.iter().map(|(d, _)| d.clone()).collect())
    }

    async fn fetch_aibom(&self, target: &TargetDescriptor) -> Result<Value> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        match self.targets.iter().find(|(d, _)| d.id == target.id) {
            Some((_, Ok(document))) => Ok(document.clone()),
            Some((_, Err(message))) => anyhow::bail!("{}", message),
            None => anyhow::bail!("Unknown target: {}", target.name),
        }
    }
}
