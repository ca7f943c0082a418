//! Typed template record as sent to the import API.
//!
//! A template directory's `data.yml` is free-form, so only the fields this tool
//! derives or rewrites are typed. Every other key of the metadata document is kept
//! in [`Template::extra`] and serialized back at the top level of the record.

use serde::Serialize;
use serde_json::{Map, Value};

/// One template record, serialized as a flat JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    /// Base name of the template directory. Always overrides a `slug` in the metadata.
    pub slug: String,
    /// Raw text of the compose manifest.
    pub compose: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environments: Option<Environments>,
    /// `data:<mime>;base64,<payload>` URI built from the directory's logo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Remaining metadata keys, passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `environments` field after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Environments {
    /// Reshaped from a mapping of variable name to attributes.
    List(Vec<Environment>),
    /// Any other shape found in the metadata, left as it was.
    Raw(Value),
}

/// One environment variable definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Environment {
    pub name: String,
    /// `description`, `type`, `default` and whatever else the entry declares.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Template {
    /// Builds a record from a parsed metadata mapping and the directory's files.
    ///
    /// `slug` and `compose` keys in `metadata` are replaced. A metadata `icon` is
    /// only replaced when a logo was found.
    pub fn from_metadata(
        slug: String,
        mut metadata: Map<String, Value>,
        compose: String,
        icon: Option<String>,
    ) -> Self {
        metadata.remove("slug");
        metadata.remove("compose");
        if icon.is_some() {
            metadata.remove("icon");
        }
        let environments = metadata.remove("environments").map(|value| match value {
            Value::Object(map) => Environments::List(environments_to_list(map)),
            other => Environments::Raw(other),
        });

        Template {
            slug,
            compose,
            environments,
            icon,
            extra: metadata,
        }
    }
}

/// Reshapes `{NAME: {attrs..}}` into `[{name: NAME, attrs..}]`.
///
/// Entries whose value is not a mapping are dropped. The output follows the key
/// order of `environments`. An attribute called `name` is deliberately discarded:
/// the key wins over whatever the entry declares.
pub fn environments_to_list(environments: Map<String, Value>) -> Vec<Environment> {
    environments
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::Object(mut attributes) => {
                attributes.remove("name");
                Some(Environment { name, attributes })
            }
            _ => None,
        })
        .collect()
}

/// Formats a base64 data URI for `bytes`.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
