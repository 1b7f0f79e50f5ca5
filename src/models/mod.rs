pub mod address;
pub mod candidate;
pub mod response;

pub use address::AddressQuery;
pub use candidate::{Candidate, HouseNumber};
pub use response::{BestMatch, VerificationResponse};
