pub mod client;
pub mod error;
pub mod name;
pub mod types;

pub use client::WikiClient;
pub use error::WikiError;
pub use name::clean_name;
