//! Documentation comments to HTML.
//!
//! Comments are CommonMark (with GFM tables and strikethrough). A link whose
//! destination starts with `$` names a declaration, e.g.
//! `[push]($mylib::Vec::push)`, and is rewritten to that declaration's URL.
//! A reference to a hidden declaration keeps its text but loses the link.

use crate::diag::Diagnostics;
use crate::error::RenderError;
use crate::links::Linker;
use crate::model::EntityId;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use std::sync::LazyLock;

// `a::b::c`, optional leading `::`, destructors and operators allowed.
static RE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(::)?(~?[A-Za-z_][A-Za-z0-9_]*|\(anonymous\)|operator\S+)",
        r"(::(~?[A-Za-z_][A-Za-z0-9_]*|\(anonymous\)|operator\S+))*$"
    ))
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Full,
    /// Only the first top-level block.
    Summary,
}

/// Render the whole comment, as shown on a declaration's own page.
pub fn render_full(
    comment: &str,
    linker: &Linker<'_>,
    from: EntityId,
    diag: &mut Diagnostics,
) -> Result<String, RenderError> {
    render(comment, Mode::Full, linker, from, diag)
}

/// Render the leading synopsis, as shown in member listings.
pub fn render_summary(
    comment: &str,
    linker: &Linker<'_>,
    from: EntityId,
    diag: &mut Diagnostics,
) -> Result<String, RenderError> {
    render(comment, Mode::Summary, linker, from, diag)
}

fn render(
    comment: &str,
    mode: Mode,
    linker: &Linker<'_>,
    from: EntityId,
    diag: &mut Diagnostics,
) -> Result<String, RenderError> {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let mut events: Vec<Event<'_>> = Vec::new();
    // One entry per open link: whether its start tag was emitted.
    let mut open_links: Vec<bool> = Vec::new();
    let mut depth = 0usize;

    for event in Parser::new_ext(comment, options) {
        match &event {
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }

        match event {
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                let dest_url = match dest_url.strip_prefix('$') {
                    Some(reference) => resolve_reference(reference, linker, from, diag)?,
                    None => Some(dest_url.into_string()),
                };
                open_links.push(dest_url.is_some());
                if let Some(dest_url) = dest_url {
                    events.push(Event::Start(Tag::Link {
                        link_type,
                        dest_url: CowStr::from(dest_url),
                        title,
                        id,
                    }));
                }
            }
            Event::End(TagEnd::Link) => {
                if open_links.pop().unwrap_or(true) {
                    events.push(Event::End(TagEnd::Link));
                }
            }
            other => events.push(other),
        }

        if mode == Mode::Summary && depth == 0 && !events.is_empty() {
            break;
        }
    }

    let mut out = String::with_capacity(comment.len() * 2);
    html::push_html(&mut out, events.into_iter());
    Ok(out)
}

/// URL for a `$` reference, or `None` when the target is hidden.
fn resolve_reference(
    reference: &str,
    linker: &Linker<'_>,
    from: EntityId,
    diag: &mut Diagnostics,
) -> Result<Option<String>, RenderError> {
    let reference = reference.trim();
    if !RE_REFERENCE.is_match(reference) {
        return Err(RenderError::MalformedReference(reference.to_owned()));
    }
    let target = linker
        .db()
        .lookup(reference)
        .ok_or_else(|| RenderError::UnknownReference(reference.to_owned()))?;
    Ok(linker.url_for(from, target, diag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Options as SiteOptions;
    use crate::database::tests::db_from;
    use crate::database::Database;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn db() -> Database {
        db_from(json!([
            {"kind": "record", "namespace": [{"named": "n"}], "name": "Vec"},
            {"kind": "function", "namespace": [{"named": "n"}], "records": ["Vec"], "name": "push"},
            {"kind": "record", "namespace": [{"named": "n"}], "name": "Impl", "hidden": true},
            {"kind": "function", "namespace": [{"named": "n"}], "name": "f"},
            {"kind": "record", "namespace": [{"named": "n"}, "anonymous"], "name": "Detail"}
        ]))
    }

    fn full(comment: &str) -> (Result<String, RenderError>, Diagnostics) {
        let db = db();
        let options = SiteOptions::new("out");
        let linker = Linker::new(&db, &options);
        let from = db.lookup("n::f").unwrap();
        let mut diag = Diagnostics::new();
        let html = render_full(comment, &linker, from, &mut diag);
        (html, diag)
    }

    fn summary(comment: &str) -> Result<String, RenderError> {
        let db = db();
        let options = SiteOptions::new("out");
        let linker = Linker::new(&db, &options);
        let from = db.lookup("n::f").unwrap();
        render_summary(comment, &linker, from, &mut Diagnostics::new())
    }

    #[test]
    fn resolves_declaration_references() {
        let (html, diag) = full("Returns a [Vec]($n::Vec). See [push]($::n::Vec::push).");
        assert_eq!(
            html.unwrap(),
            "<p>Returns a <a href=\"/n/class.Vec.html\">Vec</a>. \
             See <a href=\"/n/class.Vec.html#method.push\">push</a>.</p>\n"
        );
        assert!(diag.is_empty());
    }

    #[test]
    fn hidden_reference_becomes_plain_text() {
        let (html, diag) = full("Backed by [`Impl`]($n::Impl).");
        assert_eq!(html.unwrap(), "<p>Backed by <code>Impl</code>.</p>\n");
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn anonymous_namespace_reference_becomes_plain_text() {
        let (html, diag) = full("Uses [Detail]($n::(anonymous)::Detail).");
        assert_eq!(html.unwrap(), "<p>Uses Detail.</p>\n");
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn external_links_pass_through() {
        let (html, _) = full("See [the docs](https://example.com/x).");
        assert_eq!(
            html.unwrap(),
            "<p>See <a href=\"https://example.com/x\">the docs</a>.</p>\n"
        );
    }

    #[test]
    fn unknown_reference_fails() {
        let (html, _) = full("See [g]($n::g).");
        assert_eq!(html, Err(RenderError::UnknownReference("n::g".into())));
    }

    #[test]
    fn malformed_reference_fails() {
        let (html, _) = full("See [g]($n::).");
        assert_eq!(html, Err(RenderError::MalformedReference("n::".into())));
    }

    #[test]
    fn summary_is_first_block_only() {
        let html = summary("First *line*\ncontinues.\n\nSecond paragraph with [bad]($nope).").unwrap();
        assert_eq!(html, "<p>First <em>line</em>\ncontinues.</p>\n");
    }

    #[test]
    fn full_renders_every_block() {
        let (html, _) = full("One.\n\n```\ncode < here\n```\n");
        assert_eq!(
            html.unwrap(),
            "<p>One.</p>\n<pre><code>code &lt; here\n</code></pre>\n"
        );
    }
}
