pub mod client;
pub mod error;

pub use client::EbirdClient;
pub use error::EbirdError;
