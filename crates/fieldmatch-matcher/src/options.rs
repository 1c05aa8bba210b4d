//! Matching options.
//!
//! Options are read from JSON (camelCase keys, every key optional):
//!
//! ```json
//! { "typeIdentity": "exact" }
//! ```

use serde::{Deserialize, Serialize};

/// How a field's qualified type is compared with an expected type identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeIdentityMode {
    /// The qualified type ends with the expected text.
    ///
    /// A literal string suffix: `vendor/pkg.Foo` matches `pkg.Foo`, and so
    /// does `mypkg.Foo`. Tolerates differing import-path prefixes such as
    /// vendored copies of a package.
    #[default]
    Suffix,
    /// The qualified type equals the expected text.
    Exact,
}

impl TypeIdentityMode {
    pub fn matches(self, qualified_type: &str, expected: &str) -> bool {
        match self {
            Self::Suffix => qualified_type.ends_with(expected),
            Self::Exact => qualified_type == expected,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchOptions {
    pub type_identity: TypeIdentityMode,
}

impl MatchOptions {
    pub fn from_json_str(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    #[must_use]
    pub const fn with_type_identity(mut self, mode: TypeIdentityMode) -> Self {
        self.type_identity = mode;
        self
    }
}
