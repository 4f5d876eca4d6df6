#![deny(warnings)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
//! `versewright` is a crate for writing poems with language models hosted on
//! [Hugging Face].
//!
//! Fill in a [`GenerationRequest`] (theme, emotion, [`Style`], [`Form`],
//! [`Length`], [`Temperature`], [`Model`] and [`Provider`]) and hand it to a
//! [`Session`] along with your access token. The session builds the
//! [`Prompt`], sends it with a [`Client`] and keeps the latest
//! [`GenerationResult`], which can be exported as a `.txt` [`Download`].
//!
//! [Hugging Face]: <https://huggingface.co/docs/inference-providers>
//! [`Style`]: prompt::Style
//! [`Form`]: prompt::Form
//! [`Length`]: prompt::Length
//! [`Temperature`]: prompt::Temperature
//! [`Download`]: export::Download
//!
//! See the `demos` directory for a command-line example.

pub mod key;
pub use key::Key;

pub mod client;
pub use client::Client;

pub mod model;
pub use model::{Model, Provider};

pub mod prompt;
pub use prompt::Prompt;

pub mod request;
pub use request::GenerationRequest;

pub mod response;
pub use response::{GenerationResult, Response};

pub mod session;
pub use session::Session;

pub mod export;

#[cfg(feature = "markdown")]
/// Markdown utilities for rendering poems.
pub mod markdown;

#[cfg(feature = "html")]
/// Renders poems to HTML.
pub mod html;

/// Re-exports of commonly used crates to avoid version conflicts and reduce
/// dependency bloat.
pub mod exports {
    pub use futures;
    #[cfg(feature = "log")]
    pub use log;
    #[cfg(feature = "markdown")]
    pub use pulldown_cmark;
    #[cfg(feature = "markdown")]
    pub use pulldown_cmark_to_cmark;
    pub use reqwest;
    pub use serde;
    pub use serde_json;
    pub use tempfile;
}
