//! Categories and the assignment engine that fills them.

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{CategoryError, CategoryResult};
pub use manager::CategoryManager;
pub use models::{AgeRange, Category, CategoryId, CategoryKind};
