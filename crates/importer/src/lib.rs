pub mod error;
pub mod seed;

pub use error::{ImporterError, Result};
pub use seed::{
    loader::{ImportSummary, SeedLoader},
    models::SeedDocument,
    validator::{SeedValidator, ValidationReport},
};
