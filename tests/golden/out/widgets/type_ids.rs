// @generated by uidl. Do not edit.

/// `(type id, path below this package)`, sorted by type id
pub const TYPE_IDS: &[(&str, &str)] = &[
    ("Align", "align::Align"),
    ("Component", "component::Component"),
    ("Component.setVisible", "component::SetVisibleCommand"),
    ("Label", "label::Label"),
    ("Label.measure", "label::MeasureQuery"),
    ("Named.renamed", "named::RenamedEvent"),
];

pub fn rust_path(type_id: &str) -> Option<&'static str> {
    TYPE_IDS
        .binary_search_by(|(id, _)| (*id).cmp(type_id))
        .ok()
        .map(|index| TYPE_IDS[index].1)
}
