use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// All entity ids are 64-bit integers, matching the host platform's
/// numeric content ids.
pub type FileId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Supported file languages.
///
/// Each kind maps to one admin content type and one frontend registry
/// (styles or scripts). New languages extend this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Css,
    Js,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Css => "css",
            FileKind::Js => "js",
        }
    }

    /// Content type used when serving a file of this kind raw.
    pub fn content_type(&self) -> &'static str {
        match self {
            FileKind::Css => "text/css; charset=UTF-8",
            FileKind::Js => "application/javascript; charset=UTF-8",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "css" => Ok(FileKind::Css),
            "js" => Ok(FileKind::Js),
            other => Err(CoreError::Validation(format!(
                "Unsupported file kind '{other}'"
            ))),
        }
    }
}
