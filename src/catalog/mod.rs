mod builtin;
mod error;
mod loader;

pub use error::CatalogError;
pub use loader::StarCatalog;
