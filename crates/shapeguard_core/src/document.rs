//! Declarative contract documents.
//!
//! A document lists types and interfaces in JSON so a kernel can be populated
//! without code. Interfaces are registered in list order, so a base must be
//! listed before anything that extends it.

use crate::kind::KindDef;
use crate::shape::ShapeDefinition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// One interface declaration inside a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterfaceDeclaration {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default)]
    pub fields: ShapeDefinition,
}

/// Full set of declarations loaded into a kernel at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractDocument {
    #[serde(default)]
    pub kinds: BTreeMap<String, KindDef>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceDeclaration>,
}

impl ContractDocument {
    pub fn from_json_str(raw: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(raw).map_err(DocumentError::Parse)
    }

    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let raw = std::fs::read_to_string(path).map_err(DocumentError::Io)?;
        Self::from_json_str(&raw)
    }
}

/// Counts of definitions registered by one document load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub kinds: usize,
    pub interfaces: usize,
}

/// Document read/parse errors.
#[derive(Debug)]
pub enum DocumentError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read contract document: {err}"),
            Self::Parse(err) => write!(f, "invalid contract document: {err}"),
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}
