//! Identifier case conversions shared by the model and the emitter

/// `UiRichTextEditor` -> `ui_rich_text_editor`, `UiHTMLView` -> `ui_html_view`,
/// `VISIBLE_IF_FOCUSED` -> `visible_if_focused`
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev != '_' && (prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)) {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// `imageUploadTooBig` -> `IMAGE_UPLOAD_TOO_BIG`
pub fn screaming_snake_case(name: &str) -> String {
    snake_case(name).to_uppercase()
}

/// `setUploadUrl` -> `SetUploadUrl`, `VISIBLE_IF_FOCUSED` -> `VisibleIfFocused`
pub fn pascal_case(name: &str) -> String {
    if name.contains('_') || name.chars().all(|c| !c.is_lowercase()) {
        return name
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let lower = part.to_lowercase();
                capitalize(&lower)
            })
            .collect();
    }
    capitalize(name)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "box", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "yield", "abstract", "become", "do", "final",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual",
];

/// Snake-case identifier usable as a Rust field or function name
pub fn field_ident(name: &str) -> String {
    let snake = snake_case(name);
    if RUST_KEYWORDS.contains(&snake.as_str()) {
        // `self`, `Self`, `super` and `crate` cannot be raw identifiers
        if matches!(snake.as_str(), "self" | "super" | "crate") {
            format!("{}_", snake)
        } else {
            format!("r#{}", snake)
        }
    } else {
        snake
    }
}
