// @generated by uidl from widgets.dto. Do not edit.
#![allow(unused_imports)]

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::*;

/// `Named`
pub trait Named {
    fn name(&self) -> &String;
}

/// `event renamed(String oldName)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenamedEvent {
    pub old_name: String,
}

impl RenamedEvent {
    pub const TYPE_ID: &'static str = "Named.renamed";

    pub fn new(old_name: String) -> Self {
        Self { old_name }
    }
}
