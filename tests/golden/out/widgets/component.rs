// @generated by uidl from widgets.dto. Do not edit.
#![allow(unused_imports)]

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::*;

/// `Component`
///
/// Abstract in the schema: fields of this type are carried as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    #[serde(default = "Component::default_visible", skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl Component {
    pub const TYPE_ID: &'static str = "Component";

    pub fn new() -> Self {
        Self {
            visible: Self::default_visible(),
        }
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    fn default_visible() -> Option<bool> {
        Some(true)
    }
}

/// `command setVisible(boolean visible)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetVisibleCommand {
    pub visible: bool,
}

impl SetVisibleCommand {
    pub const TYPE_ID: &'static str = "Component.setVisible";

    pub fn new(visible: bool) -> Self {
        Self { visible }
    }
}
