// @generated by uidl. Do not edit.

pub mod align;
pub mod command;
pub mod component;
pub mod component_reference;
pub mod event;
pub mod event_type;
pub mod label;
pub mod named;
pub mod object_type;
pub mod query;
pub mod query_type;
pub mod type_ids;

pub use align::Align;
pub use command::Command;
pub use component::Component;
pub use component_reference::ComponentReference;
pub use event::Event;
pub use event_type::EventType;
pub use label::Label;
pub use named::Named;
pub use object_type::ObjectType;
pub use query::Query;
pub use query_type::QueryType;
