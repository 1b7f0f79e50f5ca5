// Domain layer - request validation and verdict logic with no HTTP concerns

pub mod verification;

// Domain error type - no HTTP concerns
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing postcode or house number")]
    MissingRequiredFields,
}

// Re-export commonly used types and functions
pub use verification::{extract_query, parse_body, verify_candidates};
