//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of a scan for the formatters.

pub mod component_view;
pub mod report_read_model;
pub mod report_read_model_builder;

pub use component_view::ComponentView;
pub use report_read_model::{DocumentView, ReportMetadataView, ReportReadModel};
pub use report_read_model_builder::ReportReadModelBuilder;
