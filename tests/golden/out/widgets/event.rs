// @generated by uidl. Do not edit.

use serde::{Deserialize, Serialize};

/// Any event declared in the schema, tagged by type id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum Event {
    #[serde(rename = "Named.renamed")]
    NamedRenamed(super::named::RenamedEvent),
}

impl Event {
    pub fn type_id(&self) -> &'static str {
        match *self {
            Self::NamedRenamed(_) => super::named::RenamedEvent::TYPE_ID,
        }
    }

    pub fn event_type(&self) -> super::EventType {
        match *self {
            Self::NamedRenamed(_) => super::EventType::NamedRenamed,
        }
    }
}

impl From<super::named::RenamedEvent> for Event {
    fn from(message: super::named::RenamedEvent) -> Self {
        Self::NamedRenamed(message)
    }
}
