// @generated by uidl. Do not edit.

use serde::{Deserialize, Serialize};

/// Type constant of every event in the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "NAMED_RENAMED")]
    NamedRenamed,
}

impl EventType {
    pub const ALL: &'static [Self] = &[Self::NamedRenamed];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::NamedRenamed => "NAMED_RENAMED",
        }
    }

    /// Tag of the message in [`type_ids`](super::type_ids)
    pub fn type_id(&self) -> &'static str {
        match *self {
            Self::NamedRenamed => "Named.renamed",
        }
    }
}
