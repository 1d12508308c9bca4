pub mod component_record;
pub mod component_type;
pub mod inventory;
pub mod report_metadata;
pub mod target;
pub mod type_filter;

pub use component_record::{ComponentRecord, PolicyStatus, PolicyViolation};
pub use component_type::ComponentType;
pub use inventory::{FailureStage, Inventory, TargetFailure};
pub use report_metadata::ReportMetadata;
pub use target::{Target, TargetDescriptor, SUPPORTED_INTEGRATIONS};
pub use type_filter::TypeFilter;
