pub mod auth;
pub mod catalog;
pub mod client;
pub mod command;
pub mod directory;
pub mod error;
pub mod feed;
pub mod fixtures;
pub mod profile;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{ClientConfig, KoalaClient, SeedData};
pub use error::{KoalaError, KoalaResult};
pub use types::{GeoPoint, User};
