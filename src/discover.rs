//! Discovery of template directories under a base directory.
//!
//! Every immediate subdirectory holding a `data.yml` is a template directory. Each
//! one is loaded on its own: a broken directory is logged and skipped, and only a
//! failure to list the base directory stops the run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::{COMPOSE_FILE, LOGO_PNG_FILE, LOGO_SVG_FILE, METADATA_FILE};
use crate::template::{data_uri, Template};

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("failed to read directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reasons a single template directory is skipped.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("error reading {}: {source}", .path.display())]
    ReadMetadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error parsing {}: {reason}", .path.display())]
    ParseMetadata { path: PathBuf, reason: String },
    #[error("error reading {file} for {slug}: {source}")]
    ReadCompose {
        slug: String,
        file: &'static str,
        #[source]
        source: io::Error,
    },
}

/// Loads every template directory directly under `base_dir`, in file-name order.
pub fn discover_templates(base_dir: &Path) -> Result<Vec<Template>, DiscoverError> {
    info!(base_dir = %base_dir.display(), "Scanning for template directories");

    let entries = fs::read_dir(base_dir).map_err(|source| {
        error!(error = ?source, base_dir = %base_dir.display(), "Failed to list base directory");
        DiscoverError::ReadDir {
            path: base_dir.to_path_buf(),
            source,
        }
    })?;

    let mut dirs: Vec<(String, PathBuf)> = Vec::new();
    for entry_res in entries {
        let entry = match entry_res {
            Ok(entry) => entry,
            Err(e) => {
                error!(error = ?e, base_dir = %base_dir.display(), "Failed to read directory entry");
                println!("Error reading directory entry in {}: {}", base_dir.display(), e);
                continue;
            }
        };
        match entry.file_type() {
            Ok(ft) if ft.is_dir() => {
                let name = entry.file_name().to_string_lossy().into_owned();
                dirs.push((name, entry.path()));
            }
            Ok(_) => {}
            Err(e) => {
                error!(error = ?e, path = %entry.path().display(), "Failed to read file type");
            }
        }
    }
    dirs.sort_by(|a, b| a.0.cmp(&b.0));

    let mut templates = Vec::new();
    for (name, path) in dirs {
        match metadata_present(&path) {
            Ok(true) => {}
            Ok(false) => {
                debug!(dir = %name, "No {} found, not a template directory", METADATA_FILE);
                continue;
            }
            Err(e) => {
                error!(error = ?e, dir = %path.display(), "Failed to check for {}", METADATA_FILE);
                println!("Skipping {}: error checking {}: {}", name, METADATA_FILE, e);
                continue;
            }
        }
        match load_template(&path) {
            Ok(template) => {
                info!(slug = %template.slug, "Loaded template");
                println!("Loaded template: {}", name);
                templates.push(template);
            }
            Err(e) => {
                error!(error = %e, dir = %path.display(), "Skipping template directory");
                println!("Skipping {}: {}", name, e);
            }
        }
    }

    info!(count = templates.len(), "Template discovery finished");
    Ok(templates)
}

/// Whether `dir` holds a metadata file. Only a missing file is `Ok(false)`; any
/// other stat failure is an error for the caller to report.
fn metadata_present(dir: &Path) -> io::Result<bool> {
    dir.join(METADATA_FILE).try_exists()
}

/// Loads one template directory into a [`Template`].
///
/// The slug is the directory's base name. A missing or unreadable compose manifest
/// discards the record; an unreadable logo only drops the `icon` field.
pub fn load_template(dir: &Path) -> Result<Template, TemplateError> {
    let slug = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let metadata_path = dir.join(METADATA_FILE);
    let raw = fs::read_to_string(&metadata_path).map_err(|source| TemplateError::ReadMetadata {
        path: metadata_path.clone(),
        source,
    })?;
    let metadata = parse_metadata(&raw).map_err(|reason| TemplateError::ParseMetadata {
        path: metadata_path.clone(),
        reason,
    })?;
    debug!(slug = %slug, keys = metadata.len(), "Parsed template metadata");

    let compose_path = dir.join(COMPOSE_FILE);
    let compose = fs::read(&compose_path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|source| TemplateError::ReadCompose {
            slug: slug.clone(),
            file: COMPOSE_FILE,
            source,
        })?;

    let icon = load_icon(dir, &slug);

    Ok(Template::from_metadata(slug, metadata, compose, icon))
}

/// Parses a metadata document into a string-keyed mapping. An empty document is an
/// empty mapping. `<<` merge keys are resolved before conversion.
fn parse_metadata(raw: &str) -> Result<Map<String, Value>, String> {
    let mut doc: serde_yaml::Value = serde_yaml::from_str(raw).map_err(|e| e.to_string())?;
    doc.apply_merge().map_err(|e| e.to_string())?;
    match doc {
        serde_yaml::Value::Null => Ok(Map::new()),
        serde_yaml::Value::Mapping(_) => match serde_json::to_value(&doc) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err("metadata is not a mapping".to_string()),
            Err(e) => Err(e.to_string()),
        },
        _ => Err("metadata is not a mapping".to_string()),
    }
}

/// Picks `logo.svg` over `logo.png`. An existing but unreadable logo is logged and
/// yields no icon; the other format is not tried.
fn load_icon(dir: &Path, slug: &str) -> Option<String> {
    let (path, mime) = [(LOGO_SVG_FILE, "image/svg+xml"), (LOGO_PNG_FILE, "image/png")]
        .into_iter()
        .map(|(file, mime)| (dir.join(file), mime))
        .find(|(path, _)| path.exists())?;

    match fs::read(&path) {
        Ok(bytes) => Some(data_uri(mime, &bytes)),
        Err(e) => {
            warn!(error = ?e, path = %path.display(), "Failed to read logo, continuing without icon");
            println!("Error reading logo for {}: {}", slug, e);
            None
        }
    }
}
