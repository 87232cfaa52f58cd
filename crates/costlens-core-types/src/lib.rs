//! Core types shared across costlens facilities
//!
//! This crate provides the canonical schema constants used by both the
//! logging facility in `costlens-core` and the command handlers in
//! `costlens-cli`:
//!
//! - **Field keys**: structured logging field names
//! - **Event names**: operation lifecycle markers

pub mod schema;
