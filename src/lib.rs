//! SWOT Agent - LLM-backed SWOT analysis for shops and branches
//!
//! This crate turns a shop name and optional uploaded data into a prompt,
//! sends it to a text-completion model, and extracts a structured SWOT
//! result and a readable narrative from the free-text reply.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
