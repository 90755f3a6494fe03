//! Block registry and the showcase block.
//!
//! This module provides:
//! - BlockTypeDefinition: block metadata plus a typed render callback
//! - BlockRegistry: explicit registration at startup
//! - DynamicContentBlock: the showcase block renderer

pub mod dynamic_content;
mod registry;
mod types;

pub use dynamic_content::{BLOCK_NAME, DynamicContentBlock};
pub use registry::BlockRegistry;
pub use types::{BlockError, BlockRenderer, BlockTypeDefinition, RenderContext, wrapper_class};
