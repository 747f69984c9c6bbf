//! Naming of displaced artifacts and selection of the ones left behind.

/// Marker between the destination stem and the random token.
pub const STALE_MARKER: &str = "-stale-";

/// File name for a displaced artifact: `<stem>-stale-<token><ext>`.
/// `ext` includes its leading dot, or is empty.
pub fn stale_name(stem: &str, token: &str, ext: &str) -> String {
    format!("{stem}{STALE_MARKER}{token}{ext}")
}

/// Whether `name` is a displaced artifact of the destination with this stem and extension.
pub fn is_stale_name(name: &str, stem: &str, ext: &str) -> bool {
    let token = name
        .strip_prefix(stem)
        .and_then(|rest| rest.strip_prefix(STALE_MARKER))
        .and_then(|rest| rest.strip_suffix(ext));
    matches!(token, Some(t) if !t.is_empty() && t.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// Entries of a directory listing that are displaced artifacts for `stem`/`ext`, in listing order.
pub fn stale_entries<I, S>(entries: I, stem: &str, ext: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .filter(|name| is_stale_name(name.as_ref(), stem, ext))
        .map(|name| name.as_ref().to_string())
        .collect()
}
