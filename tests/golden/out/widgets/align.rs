// @generated by uidl from widgets.dto. Do not edit.
#![allow(unused_imports)]

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::*;

/// `Align`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Align {
    #[serde(rename = "LEFT")]
    Left,
    #[serde(rename = "TOP_RIGHT")]
    TopRight,
}

impl Align {
    pub const ALL: &'static [Self] = &[Self::Left, Self::TopRight];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Left => "LEFT",
            Self::TopRight => "TOP_RIGHT",
        }
    }
}
