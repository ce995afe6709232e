//! Core types for the Eden Festival schedule tools.
//!
//! This crate holds everything that does not touch a terminal:
//! - `event` and `tags` for the schedule data model and its normalization
//! - `storage` for the key-value blobs and cross-tab change watching
//! - `schedule` and `registry` for the two persisted stores
//! - `propagation`, `prompt`, `autocomplete` and `transfer` for the editor helpers
//! - `config` for the user configuration file
//! - `editor` and `public` for the two front-ends' controllers

pub mod autocomplete;
pub mod config;
pub mod editor;
pub mod error;
pub mod event;
pub mod propagation;
pub mod prompt;
pub mod public;
pub mod registry;
pub mod schedule;
pub mod storage;
pub mod tags;
pub mod transfer;

pub use error::{EdenError, EdenResult};
pub use event::Event;
