pub mod document;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod services;

pub use document::{Document, DocumentRef, Fields};
pub use errors::CoreError;
