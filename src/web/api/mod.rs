pub mod bodies;
pub mod error;
pub mod health;
pub mod sky;
