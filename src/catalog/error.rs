use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog directory not found: {0}")]
    DirectoryNotFound(String),
    #[error("catalog file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("invalid catalog {file}: {message}")]
    InvalidCatalog { file: String, message: String },
    #[error("unknown body: {0}")]
    UnknownBody(String),
}
