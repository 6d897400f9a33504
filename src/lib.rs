#![deny(missing_docs)]

//! A command-line client for the Google Gemini AI API.
//!
//! The crate turns flags and `text`/`file` arguments into a single
//! `generateContent` request, sends it with a stored API key and prints the
//! provider's response.

pub mod builder;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod parts;

pub use client::GeminiClient;
pub use config::KeyStore;
pub use error::{GeminiCliError, Result};
