//! Page generators — one per page-level entity kind, dispatched by `match`.
//!
//! Every generator builds an [`Element`] tree for the page body; this module
//! wraps it in the shared document shell (head, stylesheets, overview header
//! with the breadcrumb path) and serializes it once.

mod alias;
mod concept;
mod field;
mod function;
mod namespace;
mod record;
mod signature;

use crate::config::Options;
use crate::database::Database;
use crate::diag::Diagnostics;
use crate::error::{GenerateError, RenderError};
use crate::html::{render_document, Element, Node};
use crate::links::Linker;
use crate::markdown;
use crate::model::*;
use std::path::PathBuf;

/// How much of a function is shown where it is listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Name only, linking to the function's page.
    Short,
    /// Every overload with its full signature.
    Long,
    /// [`Style::Long`] plus `requires` constraints.
    LongWithConstraints,
}

impl Style {
    fn is_long(self) -> bool {
        self != Style::Short
    }
}

/// A rendered page, not yet written.
#[derive(Debug)]
pub struct Page {
    /// Relative to the output root.
    pub path: PathBuf,
    pub html: String,
}

/// Outcome of rendering one entity, with the diagnostics it recorded.
#[derive(Debug)]
pub struct Rendered {
    pub id: EntityId,
    /// `Ok(None)` when the entity is hidden or has no page of its own.
    pub page: Result<Option<Page>, GenerateError>,
    pub diagnostics: Diagnostics,
}

/// Render the page for `id`. Pure: reads the database, writes nothing.
pub fn render_page(linker: Linker<'_>, options: &Options, id: EntityId) -> Rendered {
    let mut cx = Context {
        linker,
        options,
        diag: Diagnostics::new(),
    };
    let page = cx.page(id);
    Rendered {
        id,
        page,
        diagnostics: cx.diag,
    }
}

pub(crate) struct Context<'a> {
    linker: Linker<'a>,
    options: &'a Options,
    diag: Diagnostics,
}

impl<'a> Context<'a> {
    fn db(&self) -> &'a Database {
        self.linker.db()
    }

    fn page(&mut self, id: EntityId) -> Result<Option<Page>, GenerateError> {
        let db = self.db();
        let entity = db.get(id);
        if entity.hidden() {
            return Ok(None);
        }
        let Some(path) = self.linker.file_path_for(id) else {
            return Ok(None);
        };

        let body = match entity {
            Entity::Namespace(ns) => namespace::page(self, id, ns),
            Entity::Record(record) => record::page(self, id, record),
            Entity::Function(function) => function::page(self, id, function),
            Entity::Concept(concept) => concept::page(self, id, concept),
            Entity::Alias(alias) => alias::page(self, id, alias),
            Entity::Field(_) => return Ok(None),
        }
        .map_err(|source| GenerateError::Render {
            entity: entity_label(db, id),
            kind: entity.kind(),
            source,
        })?;

        Ok(Some(Page {
            path,
            html: self.document(id, body),
        }))
    }

    fn document(&self, id: EntityId, body: Element) -> String {
        let qualified = self.db().qualified_name(id);
        let title = if qualified.is_empty() {
            self.options.title.clone()
        } else {
            format!("{qualified} - {}", self.options.title)
        };

        let mut head = Element::new("head");
        head.push(Element::new("meta").attr("charset", "utf-8"));
        head.push(
            Element::new("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1"),
        );
        head.push(Element::new("title").text(title));
        for href in self.options.stylesheet_urls() {
            head.push(
                Element::new("link")
                    .attr("rel", "stylesheet")
                    .attr("href", href),
            );
        }
        if let Some(favicon) = &self.options.favicon {
            head.push(Element::new("link").attr("rel", "icon").attr("href", favicon));
        }

        let root = Element::new("html")
            .attr("lang", "en")
            .child(head)
            .child(Element::new("body").child(body));
        render_document(&root)
    }

    /// Link to `to`, or plain text when it is hidden.
    fn link(&mut self, from: EntityId, to: EntityId, class: &str, text: &str) -> Node {
        match self.linker.url_for(from, to, &mut self.diag) {
            Some(url) => Element::new("a")
                .class(class)
                .attr("href", url)
                .text(text)
                .into(),
            None => Node::Text(text.to_owned()),
        }
    }

    /// A type in a signature: linked when it names a visible declaration.
    fn type_ref(&mut self, from: EntityId, ty: &TypeRef) -> Node {
        match self.linker.type_url(from, ty, &mut self.diag) {
            Some(url) => Element::new("a")
                .class("type-name")
                .attr("title", ty.name.as_str())
                .attr("href", url)
                .text(ty.short())
                .into(),
            None => Node::Text(ty.short().to_owned()),
        }
    }

    fn description(
        &mut self,
        from: EntityId,
        comment: Option<&str>,
        style: Style,
    ) -> Result<Element, RenderError> {
        let mut div = Element::div("description");
        div.add_class(if style.is_long() { "long" } else { "short" });
        if let Some(comment) = comment {
            let html = if style.is_long() {
                markdown::render_full(comment, &self.linker, from, &mut self.diag)?
            } else {
                markdown::render_summary(comment, &self.linker, from, &mut self.diag)?
            };
            div.push_raw(html);
        }
        Ok(div)
    }

    /// Summary of an entity listed in its scope that also has its own page.
    ///
    /// A comment that fails to render already fails that page, so the
    /// listing shows an empty summary and keeps none of its diagnostics.
    fn listed_summary(&mut self, id: EntityId, comment: Option<&str>) -> Element {
        let recorded = self.diag.len();
        match self.description(id, comment, Style::Short) {
            Ok(div) => div,
            Err(_) => {
                self.diag.truncate(recorded);
                Element::div("description").class("short")
            }
        }
    }

    /// The page's overview block: a header naming the entity kind followed
    /// by the project name and the path of enclosing scopes.
    fn overview(&mut self, id: EntityId, label: &str) -> Element {
        let mut header = Element::div("section-header");
        header.push(Element::new("span").text(label));
        for node in self.cpp_path(id) {
            header.push(node);
        }
        Element::div("section").class("overview").child(header)
    }

    fn cpp_path(&mut self, id: EntityId) -> Vec<Node> {
        let db = self.db();
        let mut nodes: Vec<Node> = vec![Element::new("a")
            .class("project-name")
            .attr("href", self.linker.href(EntityId::GLOBAL))
            .text(self.options.project_name.as_str())
            .into()];

        let mut chain = db.ancestors(id);
        if id != EntityId::GLOBAL {
            chain.push(id);
        }
        for scope in chain {
            nodes.push(Element::text_span("namespace-dots", "::").into());
            let entity = db.get(scope);
            let class = path_class(entity.kind());
            if entity.name().is_empty() {
                // Unnamed namespaces have no page to link to.
                nodes.push(Element::text_span(class, ANONYMOUS).into());
            } else {
                nodes.push(self.link(id, scope, class, entity.name()));
            }
        }
        nodes
    }
}

fn path_class(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Namespace => "namespace-name",
        EntityKind::Record | EntityKind::Alias => "type-name",
        EntityKind::Function => "function-name",
        EntityKind::Concept => "concept-name",
        EntityKind::Field => "field-name",
    }
}

/// How an entity is named in failure reports.
fn entity_label(db: &Database, id: EntityId) -> String {
    let name = db.qualified_name(id);
    if name.is_empty() {
        "(global)".to_owned()
    } else {
        name
    }
}

/// A titled `<div class="section">` around a list of items.
fn section(class: &str, title: &str, items: Element) -> Element {
    Element::div("section")
        .class(class)
        .child(Element::div("section-header").single_line().text(title))
        .child(items)
}

fn section_list() -> Element {
    Element::new("ul").class("section-items")
}

fn section_item() -> Element {
    Element::new("li").class("section-item")
}

/// A namespace, type, concept or alias listed in its scope: the linked name
/// and a summary of its comment.
fn named_reference(cx: &mut Context<'_>, id: EntityId, class: &str) -> Element {
    let header = cx.db().get(id).header();
    let name = cx.link(id, id, class, header.display_name());
    let mut item = section_item();
    item.push(Element::div("item-name").single_line().child(name));
    item.push(cx.listed_summary(id, header.comment()));
    item
}

/// Visible members of one bucket, in discovery order.
fn visible<'d>(db: &'d Database, ids: &'d [EntityId]) -> impl Iterator<Item = EntityId> + 'd {
    ids.iter().copied().filter(move |id| !db.get(*id).hidden())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::tests::db_from;
    use serde_json::json;

    fn render(db: &Database, path: &str) -> Rendered {
        let options = Options::new("out");
        let id = if path.is_empty() {
            EntityId::GLOBAL
        } else {
            db.lookup(path).unwrap()
        };
        render_page(Linker::new(db, &options), &options, id)
    }

    fn html(db: &Database, path: &str) -> String {
        render(db, path).page.unwrap().unwrap().html
    }

    #[test]
    fn head_has_title_and_default_stylesheet() {
        let db = db_from(json!([
            {"kind": "function", "namespace": [{"named": "a"}], "name": "f"}
        ]));
        let html = html(&db, "a::f");
        assert!(html.starts_with("<!DOCTYPE html>\n"));
        assert!(html.contains("<title>a::f - Documentation</title>"));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"/cppdoc.css\">"));
    }

    #[test]
    fn breadcrumb_links_project_and_ancestors() {
        let db = db_from(json!([
            {"kind": "record", "namespace": [{"named": "a"}, {"named": "b"}], "name": "R"}
        ]));
        let html = html(&db, "a::b::R");
        assert!(html.contains("<a class=\"project-name\" href=\"/index.html\">Project</a>"));
        assert!(html.contains("<a class=\"namespace-name\" href=\"/a/index.html\">a</a>"));
        assert!(html.contains("<a class=\"namespace-name\" href=\"/a/b/index.html\">b</a>"));
        assert!(html.contains("<a class=\"type-name\" href=\"/a/b/class.R.html\">R</a>"));
    }

    #[test]
    fn hidden_and_memberless_entities_have_no_page() {
        let db = db_from(json!([
            {"kind": "record", "name": "R"},
            {"kind": "field", "records": ["R"], "name": "x", "type": {"name": "int"}},
            {"kind": "function", "name": "secret", "hidden": true}
        ]));
        assert!(render(&db, "R::x").page.unwrap().is_none());
        assert!(render(&db, "secret").page.unwrap().is_none());
    }

    #[test]
    fn render_failure_names_the_entity() {
        let db = db_from(json!([
            {"kind": "function", "namespace": [{"named": "n"}], "name": "f", "comment": "See [g]($n::g)."}
        ]));
        let err = render(&db, "n::f").page.unwrap_err();
        assert_eq!(
            err.to_string(),
            "function `n::f`: reference to unknown declaration `n::g`"
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let db = db_from(json!([
            {"kind": "namespace", "name": "n", "comment": "Top."},
            {"kind": "record", "namespace": [{"named": "n"}], "name": "B"},
            {"kind": "record", "namespace": [{"named": "n"}], "name": "A"},
            {"kind": "function", "namespace": [{"named": "n"}], "name": "f"}
        ]));
        assert_eq!(html(&db, "n"), html(&db, "n"));
    }
}
