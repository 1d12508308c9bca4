/// Network adapters for the Snyk REST API
mod snyk_client;

pub use snyk_client::{ApiScope, SnykAibomClient, DEFAULT_API_URL};
