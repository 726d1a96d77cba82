//! Static pack metadata consumed by the host's sandboxing layer.
//!
//! Data, not logic: the formula's name and parameter shape, and the network
//! domains the pack may contact beyond the host's primary fetch scope.

use crate::allowlist::RESIZED_IMAGE_DOMAIN;
use serde::Serialize;

/// Value type a formula declares for its result or a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueType {
    String,
}

/// A single declared formula parameter.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub value_type: ValueType,
    pub description: &'static str,
}

/// Host-facing declaration of the Checksum formula.
#[derive(Debug, Clone, Serialize)]
pub struct FormulaManifest {
    pub name: &'static str,
    pub description: &'static str,
    pub result_type: ValueType,
    pub parameters: Vec<ParameterSpec>,
    /// Domains the formula may contact in addition to the host's primary
    /// fetch scope, which already covers hosted-file attachments.
    pub additional_network_domains: Vec<&'static str>,
}

/// The Checksum formula's manifest.
pub fn manifest() -> FormulaManifest {
    FormulaManifest {
        name: "Checksum",
        description: "Returns the SHA1 hash of a file that has been uploaded to Coda.",
        result_type: ValueType::String,
        parameters: vec![ParameterSpec {
            name: "file",
            value_type: ValueType::String,
            description: "The file or image that has been uploaded to your Coda doc \
                          (not compatible with Image URL columns).",
        }],
        additional_network_domains: vec![RESIZED_IMAGE_DOMAIN],
    }
}
