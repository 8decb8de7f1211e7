//! Conversion between raw keys and computed attribute names.
//!
//! Raw keys are `snake_case` or hyphenated; computed attributes are named in
//! `camelCase`, the way accessor methods usually are.

/// Convert a raw key (`bar_baz`, `bar-baz`, `bar baz`) into its camelCase
/// attribute name (`barBaz`).
pub fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());

    for word in key.split(['_', '-', ' ']).filter(|word| !word.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    lower_first(&out)
}

/// Convert a camelCase attribute name (`methodAttribute`) back into its
/// snake_case key (`method_attribute`).
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);

    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else if ch == '-' || ch == ' ' {
            out.push('_');
        } else {
            out.push(ch);
        }
    }

    out
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
