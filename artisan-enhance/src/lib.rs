//! Product photo enhancement through the Gemini image models.
//!
//! A product photo and a prompt are sent to `generateContent`. The first inline
//! image of the first candidate is saved as `<output_dir>/<uuid>_enhanced.png`.
//! Every failure falls back to the original photo path.

pub mod client;
pub mod enhance;
mod env;
pub mod error;
pub mod image_io;
pub mod models;

#[cfg(test)]
mod test_support;

pub use artisan_enhance_types as types;

pub use client::{Client, ClientBuilder, ClientConfig, HttpOptions};
pub use enhance::{enhance_product_image, EnhanceConfig, EnhanceOutcome, Enhancer};
pub use error::{Error, Result};
