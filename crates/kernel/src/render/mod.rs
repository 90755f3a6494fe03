//! Result formatting: escaping, excerpts and the showcase list markup.

pub mod escape;
pub mod excerpt;
mod formatter;
mod fragment;

pub use escape::{escape_html, escape_text, escape_url, sanitize_markup};
pub use formatter::{DEFAULT_BLOCK_CLASS, DEFAULT_NO_RESULTS_TEXT, ResultFormatter, WRAPPER_CLASS};
pub use fragment::{LIST_CLASS, RenderedFragment};
