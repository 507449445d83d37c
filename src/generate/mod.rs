//! External image-generation boundary

pub mod client;

pub use client::{build_parts, GenerateClient, GenerateError, GenerateTask, ImageBlob};
