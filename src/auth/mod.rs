pub mod client_token;

pub use client_token::{authorize, CLIENT_TOKEN_HEADER};
