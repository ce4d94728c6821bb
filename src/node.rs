use std::fmt;
use uuid::Uuid;

/// Identity of this process, used as the recipient of mining rewards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeIdentity(String);

impl NodeIdentity {
    /// A random UUID v4 rendered as 32 hex characters without dashes.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Use a fixed identity. Blank values are refused.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into().trim().to_string();
        if id.is_empty() { None } else { Some(Self(id)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
