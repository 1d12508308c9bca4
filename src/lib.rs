//! aibom-tools - AI-BOM aggregation tool for Snyk organizations and groups
//!
//! This library fetches the AI Bill of Materials of every supported target,
//! normalizes the heterogeneous document shapes into one inventory, checks
//! it against a forbidden-model policy and renders grouped reports. It
//! follows hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`aibom_aggregation`): Normalization, policy and grouping logic
//! - **Application Layer** (`application`): Use cases, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use aibom_tools::prelude::*;
//! use std::path::Path;
//!
//! # async fn example() -> Result<()> {
//! // Re-aggregate a saved report offline
//! let source = FileAibomSource::load(Path::new("aibom_report.json"))?;
//! let use_case = RunScanUseCase::new(source, StderrProgressReporter::new());
//!
//! let response = use_case.execute(ScanRequest::new(GroupBy::Repository)).await?;
//! let model = ReportReadModelBuilder::build(&response);
//!
//! let output = GroupedJsonFormatter::new().format(&model)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod aibom_aggregation;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileAibomSource, FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        ConsoleSummaryFormatter, GroupedJsonFormatter, HtmlFormatter, LegacyJsonFormatter,
    };
    pub use crate::adapters::outbound::network::{ApiScope, SnykAibomClient};
    pub use crate::aibom_aggregation::domain::{
        ComponentRecord, ComponentType, FailureStage, Inventory, PolicyStatus, Target, TargetDescriptor,
        TypeFilter,
    };
    pub use crate::aibom_aggregation::policies::{ForbiddenModelPolicy, Policy};
    pub use crate::aibom_aggregation::services::{
        run_scan, Aggregator, ComponentNormalizer, GroupBy, GroupedReport, ReportGrouper,
    };
    pub use crate::application::dto::{OutputFormat, ScanRequest, ScanResponse};
    pub use crate::application::read_models::{ReportReadModel, ReportReadModelBuilder};
    pub use crate::application::use_cases::RunScanUseCase;
    pub use crate::ports::outbound::{
        AibomSource, OutputPresenter, PolicyReader, ProgressReporter, ReportFormatter,
    };
    pub use crate::shared::Result;
}
