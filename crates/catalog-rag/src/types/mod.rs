//! Core types for the RAG engine

pub mod message;
pub mod product;

pub use message::{Message, Role};
pub use product::{Document, Product};
