//! Dynamic Content Showcase Kernel Library
//!
//! Content selection planning, result formatting, and the block host that
//! wires them to a content store. The HTTP server entry point is the
//! `showcase` binary.

pub mod block;
pub mod cli;
pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod fixtures;
pub mod render;
pub mod routes;
pub mod selection;
pub mod state;
pub mod taxonomy;
