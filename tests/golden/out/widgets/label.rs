// @generated by uidl from widgets.dto. Do not edit.
#![allow(unused_imports)]

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::*;

/// `Label`, extends [`Component`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    #[serde(default = "Label::default_visible", skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    pub name: String,
    #[serde(default = "Label::default_align", skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(default = "Label::default_children", skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ComponentReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<HashMap<String, String>>,
}

impl Label {
    pub const TYPE_ID: &'static str = "Label";

    pub fn new(name: String) -> Self {
        Self {
            visible: Self::default_visible(),
            name,
            align: Self::default_align(),
            children: Self::default_children(),
            attributes: None,
        }
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn with_name(mut self, name: String) -> Self {
        self.name = name;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn with_children(mut self, children: Vec<ComponentReference>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_attributes(mut self, attributes: HashMap<String, String>) -> Self {
        self.attributes = Some(attributes);
        self
    }

    fn default_visible() -> Option<bool> {
        Some(true)
    }

    fn default_align() -> Option<Align> {
        Some(Align::Left)
    }

    fn default_children() -> Option<Vec<ComponentReference>> {
        Some(Vec::new())
    }
}

impl Named for Label {
    fn name(&self) -> &String {
        &self.name
    }
}

/// `query measure(int maxWidth)` returns `double`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureQuery {
    pub max_width: i32,
}

impl MeasureQuery {
    pub const TYPE_ID: &'static str = "Label.measure";

    pub fn new(max_width: i32) -> Self {
        Self { max_width }
    }
}

/// Result of [`MeasureQuery`]
pub type MeasureQueryResult = f64;
