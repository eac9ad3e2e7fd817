/// Normalizes a make or model name for storage and comparison.
///
/// Trims, collapses runs of whitespace and lowercases the whole string, then
/// uppercases every word character that follows a non-word character:
/// `"  mERCEDES-benz  c class"` becomes `"Mercedes-Benz C Class"`.
pub fn normalize_name(name: &str) -> String {
    let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut normalized = String::with_capacity(collapsed.len());
    let mut at_boundary = true;
    for c in collapsed.to_lowercase().chars() {
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && at_boundary {
            normalized.extend(c.to_uppercase());
        } else {
            normalized.push(c);
        }
        at_boundary = !is_word;
    }

    normalized
}
