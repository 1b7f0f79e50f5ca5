pub mod config;
pub mod models;
pub mod auth;
pub mod domain;
pub mod postnl;
pub mod api;

// Re-export commonly used types
pub use config::{Config, ConfigError};

pub use models::{
    AddressQuery, Candidate, HouseNumber, BestMatch, VerificationResponse,
};

pub use domain::{extract_query, verify_candidates, ValidationError};

pub use postnl::{AddressProvider, PostNlClient, ProviderError, ProviderResponse};
