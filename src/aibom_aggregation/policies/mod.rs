mod forbidden_model_policy;

pub use forbidden_model_policy::{ForbiddenModelPolicy, Policy};
