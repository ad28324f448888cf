use std::path::Path;

use crate::model::FileName;

/// Derive the note file name (the name links use) from a path.
///
/// The last path component with its `.md` extension removed. Backslashes
/// are treated as separators so Windows-style paths behave the same.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use notesite_core::note_file_name;
///
/// assert_eq!(note_file_name(Path::new("garden/My Note.md")), "My Note");
/// assert_eq!(note_file_name(Path::new("note.md")), "note");
/// assert_eq!(note_file_name(Path::new("image.png")), "image.png");
/// ```
pub fn note_file_name(path: &Path) -> FileName {
    let s = path.to_string_lossy().replace('\\', "/");
    let last = s.rsplit('/').next().unwrap_or_default();
    last.strip_suffix(".md").unwrap_or(last).to_string()
}

/// Slugify a note file name into a URL-safe route segment.
///
/// Rules:
/// - Convert to lowercase
/// - Preserve Unicode letters and digits
/// - Replace whitespace and dots with hyphens
/// - Remove ASCII special characters (parentheses, exclamation marks, etc.)
/// - Trim leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use notesite_core::slugify;
///
/// assert_eq!(slugify("My Cool Note"), "my-cool-note");
/// assert_eq!(slugify("Rust (Ownership)!"), "rust-ownership");
/// assert_eq!(slugify("你好 World"), "你好-world");
/// assert_eq!(slugify("v1.2 notes"), "v1-2-notes");
/// assert_eq!(slugify("!!!"), "");
/// ```
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphabetic() || c.is_numeric() || c == '-' || c == '_' {
                Some(c)
            } else if c.is_whitespace() || c == '.' {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .trim_matches('-')
        .to_string()
}

/// Normalize a file or tree entry name for case/whitespace-insensitive
/// comparison.
///
/// Drops a `.md` extension and parentheses, folds whitespace runs into a
/// single `-`, and lowercases.
///
/// # Examples
///
/// ```
/// use notesite_core::normalize_file_name;
///
/// assert_eq!(normalize_file_name("My Note.md"), "my-note");
/// assert_eq!(normalize_file_name("my  note"), "my-note");
/// assert_eq!(normalize_file_name("Rust (Book)"), "rust-book");
/// ```
pub fn normalize_file_name(name: &str) -> String {
    let name = name.trim();
    let name = name.strip_suffix(".md").unwrap_or(name);
    name.replace(['(', ')'], "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}
