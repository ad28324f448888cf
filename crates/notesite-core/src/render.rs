use log::debug;
use serde::Serialize;

use crate::link::{is_absolute_url, Destination, LinkResolver};
use crate::model::{FileName, LinkKind, Note};

/// A link ready for the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedLink {
    pub destination: Destination,
    pub title: Option<String>,
    pub label: String,
    pub kind: LinkKind,
}

/// A destination that named neither a known note nor an absolute URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedLink {
    pub source: FileName,
    pub destination: String,
}

#[derive(Debug, Default)]
pub struct RenderOutput {
    pub links: Vec<RenderedLink>,
    pub unresolved: Vec<UnresolvedLink>,
}

/// Resolve every link of a note, in document order.
pub fn render_links(note: &Note, resolver: &mut LinkResolver<'_>) -> RenderOutput {
    let mut output = RenderOutput::default();

    for link in &note.links {
        let destination = if link.kind == LinkKind::Image {
            Destination::RawLink(resolver.make_absolute_url(&link.destination))
        } else {
            resolver.resolve(&link.destination)
        };

        if link.kind != LinkKind::Image
            && matches!(destination, Destination::RawLink(_))
            && !link.destination.starts_with('#')
            && !is_absolute_url(&link.destination)
        {
            debug!(
                "{}: unresolved link `{}`",
                resolver.current_file(),
                link.destination
            );
            output.unresolved.push(UnresolvedLink {
                source: resolver.current_file().to_string(),
                destination: link.destination.clone(),
            });
        }

        output.links.push(RenderedLink {
            destination,
            title: link.title.clone(),
            label: link.label.clone(),
            kind: link.kind,
        });
    }

    output
}
