use crate::aibom_aggregation::domain::{FailureStage, Target, TargetDescriptor, TargetFailure};
use crate::aibom_aggregation::services::{run_scan, ReportMetadataGenerator, ScanOutcome};
use crate::application::dto::{ScanRequest, ScanResponse};
use crate::ports::outbound::{AibomSource, ProgressReporter};
use crate::shared::error::AibomError;
use crate::shared::Result;
use futures::stream::{self, StreamExt};

/// RunScanUseCase - Core use case for AI-BOM aggregation
///
/// Lists targets, skips unsupported ones, fetches the remaining AI-BOMs
/// concurrently and hands them, in listing order, to the aggregation core.
///
/// # Type Parameters
/// * `S` - AibomSource implementation (Snyk API or saved file)
/// * `R` - ProgressReporter implementation
pub struct RunScanUseCase<S, R> {
    source: S,
    progress_reporter: R,
}

impl<S, R> RunScanUseCase<S, R>
where
    S: AibomSource,
    R: ProgressReporter,
{
    /// Creates a new RunScanUseCase with injected dependencies
    pub fn new(source: S, progress_reporter: R) -> Self {
        Self {
            source,
            progress_reporter,
        }
    }

    /// Executes the scan
    ///
    /// A target whose fetch or normalization fails is reported and listed
    /// in the summary; the scan continues with the others.
    ///
    /// # Errors
    /// Returns an error if the target listing fails, or if `fail_on_empty`
    /// is set and no target produced a usable AI-BOM.
    pub async fn execute(&self, request: ScanRequest) -> Result<ScanResponse> {
        // Step 1: Discover targets
        let descriptors = self.list_and_report_targets().await?;

        // Step 2: Drop non-SCM targets
        let (supported, skipped_targets) = self.partition_supported(descriptors);

        // Step 3: Fetch AI-BOMs, order preserved
        let (documents, fetch_failures) =
            self.fetch_documents(&supported, request.concurrency).await;

        // Step 4: Aggregate, evaluate and group
        let mut outcome = run_scan(
            documents.clone(),
            request.policy.as_ref(),
            request.type_filter.as_ref(),
            request.group_by,
        );
        outcome.summary.add_failures(fetch_failures);
        self.report_outcome(&outcome);

        if request.fail_on_empty && outcome.inventory.targets().is_empty() {
            return Err(AibomError::Validation {
                message: format!(
                    "No target produced a usable AI-BOM ({} failed, {} skipped)",
                    outcome.summary.failures.len(),
                    skipped_targets.len()
                ),
            }
            .into());
        }

        Ok(ScanResponse::new(
            outcome,
            documents,
            skipped_targets,
            ReportMetadataGenerator::generate_default(),
        ))
    }

    async fn list_and_report_targets(&self) -> Result<Vec<TargetDescriptor>> {
        self.progress_reporter.report("🔍 Retrieving targets...");

        let descriptors = self.source.list_targets().await?;

        self.progress_reporter
            .report(&format!("🎯 Found {} target(s)", descriptors.len()));
        Ok(descriptors)
    }

    /// Splits descriptors into scannable targets and the names of skipped ones
    fn partition_supported(
        &self,
        descriptors: Vec<TargetDescriptor>,
    ) -> (Vec<TargetDescriptor>, Vec<String>) {
        let (supported, unsupported): (Vec<_>, Vec<_>) = descriptors
            .into_iter()
            .partition(TargetDescriptor::is_supported);

        for descriptor in &unsupported {
            self.progress_reporter.report(&format!(
                "   ⏭️  Skipping {} (unsupported integration: {})",
                descriptor.name,
                descriptor.integration_type.as_deref().unwrap_or("unknown")
            ));
        }

        self.progress_reporter.report(&format!(
            "📊 Processing {} supported target(s)...",
            supported.len()
        ));

        let skipped = unsupported.into_iter().map(|d| d.name).collect();
        (supported, skipped)
    }

    /// Fetches every AI-BOM with at most `concurrency` requests in flight
    async fn fetch_documents(
        &self,
        descriptors: &[TargetDescriptor],
        concurrency: usize,
    ) -> (Vec<Target>, Vec<TargetFailure>) {
        let total = descriptors.len();
        let mut documents = Vec::with_capacity(total);
        let mut failures = Vec::new();

        let mut fetches = stream::iter(descriptors)
            .map(|descriptor| async move { (descriptor, self.source.fetch_aibom(descriptor).await) })
            .buffered(concurrency.max(1));

        let mut completed = 0;
        while let Some((descriptor, result)) = fetches.next().await {
            completed += 1;
            match result {
                Ok(document) => documents.push(Target::new(&descriptor.name, document)),
                Err(e) => {
                    let reason = format!("{:#}", e);
                    tracing::debug!(target_name = %descriptor.name, error = %reason, "AI-BOM fetch failed");
                    self.progress_reporter.report_error(&format!(
                        "   ❌ Error fetching {}: {}",
                        descriptor.name, reason
                    ));
                    failures.push(TargetFailure::new(&descriptor.name, FailureStage::Fetch, reason));
                }
            }
            self.progress_reporter
                .report_progress(completed, total, Some(&descriptor.name));
        }

        (documents, failures)
    }

    fn report_outcome(&self, outcome: &ScanOutcome) {
        for failure in outcome
            .summary
            .failures
            .iter()
            .filter(|f| f.stage == FailureStage::Normalize)
        {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Skipping {}: {}",
                failure.target_name, failure.reason
            ));
        }

        self.progress_reporter.report_completion(&format!(
            "🎉 Scan complete: {} AI component(s) across {} target(s)",
            outcome.summary.total_components, outcome.summary.targets_scanned
        ));
    }
}
