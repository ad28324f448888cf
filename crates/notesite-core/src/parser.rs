use crate::model::{DocLink, LinkKind};
use pulldown_cmark::{Event, LinkType, MetadataBlockKind, Options, Parser, Tag, TagEnd};
use sha2::{Digest, Sha256};

pub(crate) struct ParseResult {
    pub links: Vec<DocLink>,
    pub title: Option<String>,
    pub frontmatter: Option<serde_json::Value>,
    pub digest: String,
}

/// Link or image whose label text is still being collected
struct PendingLink {
    destination: String,
    title: Option<String>,
    kind: LinkKind,
    start: usize,
    label: String,
}

pub(crate) fn parse_markdown(text: &str) -> ParseResult {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_WIKILINKS);
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);

    let parser = Parser::new_ext(text, options);

    let mut links = Vec::new();
    let mut title = None;
    let mut frontmatter = None;

    let mut pending: Vec<PendingLink> = Vec::new();
    let mut heading_text: Option<String> = None;

    let mut in_frontmatter = false;
    let mut frontmatter_content = String::new();

    for (event, range) in parser.into_offset_iter() {
        match event {
            Event::Start(Tag::MetadataBlock(MetadataBlockKind::YamlStyle)) => {
                in_frontmatter = true;
            }
            Event::End(TagEnd::MetadataBlock(MetadataBlockKind::YamlStyle)) => {
                in_frontmatter = false;
                if let Ok(json) = serde_yaml::from_str::<serde_json::Value>(&frontmatter_content) {
                    if let Some(t) = json.get("title").and_then(|v| v.as_str()) {
                        title = Some(t.to_string());
                    }
                    frontmatter = Some(json);
                }
            }

            Event::Start(Tag::Heading { level, .. }) => {
                if level as u8 == 1 && title.is_none() {
                    heading_text = Some(String::new());
                }
            }
            Event::End(TagEnd::Heading(..)) => {
                if let Some(text) = heading_text.take() {
                    let text = text.trim();
                    if !text.is_empty() && title.is_none() {
                        title = Some(text.to_string());
                    }
                }
            }

            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title: link_title,
                ..
            }) => {
                // Email autolinks come without their scheme
                let destination = if link_type == LinkType::Email {
                    format!("mailto:{dest_url}")
                } else {
                    dest_url.to_string()
                };
                pending.push(PendingLink {
                    destination,
                    title: non_empty(&link_title),
                    kind: link_kind(link_type),
                    start: range.start,
                    label: String::new(),
                });
            }
            Event::Start(Tag::Image {
                dest_url,
                title: image_title,
                ..
            }) => {
                pending.push(PendingLink {
                    destination: dest_url.to_string(),
                    title: non_empty(&image_title),
                    kind: LinkKind::Image,
                    start: range.start,
                    label: String::new(),
                });
            }
            Event::End(TagEnd::Link) | Event::End(TagEnd::Image) => {
                if let Some(link) = pending.pop() {
                    links.push(DocLink {
                        destination: link.destination,
                        title: link.title,
                        label: link.label,
                        kind: link.kind,
                        span: link.start..range.end,
                    });
                }
            }

            Event::Text(s) | Event::Code(s) => {
                if in_frontmatter {
                    frontmatter_content.push_str(&s);
                    continue;
                }
                if let Some(link) = pending.last_mut() {
                    link.label.push_str(&s);
                }
                if let Some(heading) = heading_text.as_mut() {
                    heading.push_str(&s);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(link) = pending.last_mut() {
                    link.label.push(' ');
                }
            }
            _ => {}
        }
    }

    ParseResult {
        links,
        title,
        frontmatter,
        digest: compute_digest(text),
    }
}

pub(crate) fn compute_digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text);
    format!("{:x}", hasher.finalize())
}

fn link_kind(link_type: LinkType) -> LinkKind {
    match link_type {
        LinkType::Inline => LinkKind::Inline,
        LinkType::Autolink => LinkKind::Autolink,
        LinkType::Email => LinkKind::Email,
        LinkType::WikiLink { .. } => LinkKind::WikiLink,
        _ => LinkKind::Reference,
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
