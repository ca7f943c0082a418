#![doc = "template-import: loads app template directories and imports them into the panel template API."]

//! Each immediate subdirectory of the base directory with a `data.yml` is one
//! template. Templates are normalized into [`template::Template`] records and
//! POSTed as JSON arrays of up to [`config::BATCH_SIZE`] records.
//!
//! # Navigation
//! - Loading: [`discover::discover_templates`], [`discover::load_template`]
//! - Delivery: [`synchronise::synchronise`] over any [`contract::Uploader`]
//! - Binary entrypoint: [`cli::run`]

pub mod cli;
pub mod config;
pub mod contract;
pub mod discover;
pub mod load_config;
pub mod synchronise;
pub mod template;
pub mod upload;

pub use cli::{run, Cli};
