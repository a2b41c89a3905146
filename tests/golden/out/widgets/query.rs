// @generated by uidl. Do not edit.

use serde::{Deserialize, Serialize};

/// Any query declared in the schema, tagged by type id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum Query {
    #[serde(rename = "Label.measure")]
    LabelMeasure(super::label::MeasureQuery),
}

impl Query {
    pub fn type_id(&self) -> &'static str {
        match *self {
            Self::LabelMeasure(_) => super::label::MeasureQuery::TYPE_ID,
        }
    }

    pub fn query_type(&self) -> super::QueryType {
        match *self {
            Self::LabelMeasure(_) => super::QueryType::LabelMeasure,
        }
    }
}

impl From<super::label::MeasureQuery> for Query {
    fn from(message: super::label::MeasureQuery) -> Self {
        Self::LabelMeasure(message)
    }
}
