/// Domain layer - AI-BOM normalization, policy evaluation, aggregation and grouping
///
/// Everything below this module is synchronous and free of I/O.
pub mod domain;
pub mod policies;
pub mod services;
