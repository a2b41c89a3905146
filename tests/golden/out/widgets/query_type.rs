// @generated by uidl. Do not edit.

use serde::{Deserialize, Serialize};

/// Type constant of every query in the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryType {
    #[serde(rename = "LABEL_MEASURE")]
    LabelMeasure,
}

impl QueryType {
    pub const ALL: &'static [Self] = &[Self::LabelMeasure];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::LabelMeasure => "LABEL_MEASURE",
        }
    }

    /// Tag of the message in [`type_ids`](super::type_ids)
    pub fn type_id(&self) -> &'static str {
        match *self {
            Self::LabelMeasure => "Label.measure",
        }
    }
}
