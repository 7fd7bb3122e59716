//! Wire types for the Gemini `generateContent` endpoint used by `artisan-enhance`.

mod base64_serde;

pub mod config;
pub mod content;
pub mod enums;
pub mod models;
pub mod response;
