pub mod engine;
pub mod image;
pub mod layout;
pub mod types;
