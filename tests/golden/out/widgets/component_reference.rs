// @generated by uidl from widgets.dto. Do not edit.
#![allow(unused_imports)]

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::*;

/// Identifies a [`Component`] instance, or one of a subclass, by id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentReference {
    pub id: String,
}

impl ComponentReference {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl From<&str> for ComponentReference {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
