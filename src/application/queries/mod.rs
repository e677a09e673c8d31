//! Application Queries

pub mod handlers;
mod voice_queries;

pub use voice_queries::ListVoices;
