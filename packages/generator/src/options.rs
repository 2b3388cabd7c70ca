use serde::{Deserialize, Serialize};

/// Settings that shape generated output without changing its semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOptions {
    /// Write the `Code generated ... DO NOT EDIT.` header
    #[serde(default = "default_header")]
    pub header: bool,
}

fn default_header() -> bool {
    true
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self { header: true }
    }
}
