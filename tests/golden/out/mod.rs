// @generated by uidl. Do not edit.

pub mod widgets;
