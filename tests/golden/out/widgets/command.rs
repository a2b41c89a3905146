// @generated by uidl. Do not edit.

use serde::{Deserialize, Serialize};

/// Any command declared in the schema, tagged by type id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum Command {
    #[serde(rename = "Component.setVisible")]
    ComponentSetVisible(super::component::SetVisibleCommand),
}

impl Command {
    pub fn type_id(&self) -> &'static str {
        match *self {
            Self::ComponentSetVisible(_) => super::component::SetVisibleCommand::TYPE_ID,
        }
    }
}

impl From<super::component::SetVisibleCommand> for Command {
    fn from(message: super::component::SetVisibleCommand) -> Self {
        Self::ComponentSetVisible(message)
    }
}
