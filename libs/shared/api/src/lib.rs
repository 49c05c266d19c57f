pub mod client;
pub mod token;

pub use client::ApiClient;
pub use token::{authorization_value, format_token_type, AnonymousToken, TokenProvider};
