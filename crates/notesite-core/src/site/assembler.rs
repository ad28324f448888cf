use crate::model::Note;
use crate::parser::parse_markdown;
use crate::utils::{note_file_name, slugify};
use std::path::Path;

/// Build a Note from its path (relative to the notes root) and source text.
///
/// The slug is derived from the file name unless the frontmatter carries a
/// `slug` string, which is slugified and used instead.
pub fn assemble_note(path: &Path, content: &str) -> Note {
    let parse_result = parse_markdown(content);
    let file_name = note_file_name(path);

    let slug = parse_result
        .frontmatter
        .as_ref()
        .and_then(|fm| fm.get("slug"))
        .and_then(|v| v.as_str())
        .map(slugify)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| slugify(&file_name));

    Note {
        file_name,
        slug,
        path: path.to_path_buf(),
        title: parse_result.title,
        frontmatter: parse_result.frontmatter,
        links: parse_result.links,
        digest: parse_result.digest,
    }
}
