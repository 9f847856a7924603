//! Output paths, anchors and URLs for every linkable entity.
//!
//! The site mirrors the symbol hierarchy: namespace `a::b` is
//! `a/b/index.html`, record `a::R` is `a/class.R.html` and its nested
//! declarations live under `a/R/`. Fields and record methods have no page of
//! their own; they are anchors on their owner's page.

use crate::config::Options;
use crate::database::Database;
use crate::diag::{Diagnostic, Diagnostics};
use crate::model::*;
use std::path::PathBuf;

/// Make one path segment filesystem- and URL-safe.
///
/// ASCII alphanumerics and `_` are kept; every other byte becomes `-XX`.
/// `-` never appears in a C++ identifier, so distinct names stay distinct.
pub fn sanitize(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("-{byte:02x}"));
        }
    }
    out
}

#[derive(Clone, Copy)]
pub struct Linker<'a> {
    db: &'a Database,
    base_url: &'a str,
}

impl<'a> Linker<'a> {
    pub fn new(db: &'a Database, options: &'a Options) -> Self {
        Self {
            db,
            base_url: &options.base_url,
        }
    }

    /// Whether the entity gets its own page.
    pub fn has_page(&self, id: EntityId) -> bool {
        match self.db.get(id) {
            Entity::Namespace(_) | Entity::Record(_) | Entity::Concept(_) | Entity::Alias(_) => true,
            Entity::Function(_) => self.db.get(self.db.parent(id)).kind() == EntityKind::Namespace,
            Entity::Field(_) => false,
        }
    }

    /// Page path relative to the output root; `None` for anchor-only members.
    pub fn file_path_for(&self, id: EntityId) -> Option<PathBuf> {
        self.page_segments(id).map(|segments| segments.iter().collect())
    }

    fn page_segments(&self, id: EntityId) -> Option<Vec<String>> {
        if !self.has_page(id) {
            return None;
        }
        let entity = self.db.get(id);
        let header = entity.header();
        if header.namespace_path.is_root() {
            return Some(vec!["index.html".to_owned()]);
        }

        let mut segments = scope_dir(header);
        let name = sanitize(header.display_name());
        match entity {
            Entity::Namespace(_) => {
                segments.push(name);
                segments.push("index.html".to_owned());
            }
            Entity::Record(record) => {
                segments.push(format!("{}.{name}.html", record.record_type.as_str()));
            }
            Entity::Function(_) => segments.push(format!("fn.{name}.html")),
            Entity::Concept(_) => segments.push(format!("concept.{name}.html")),
            Entity::Alias(_) => segments.push(format!("alias.{name}.html")),
            Entity::Field(_) => return None,
        }
        Some(segments)
    }

    /// In-page anchor of a member without its own page.
    pub fn anchor_for(&self, id: EntityId) -> Option<String> {
        if self.has_page(id) {
            return None;
        }
        let entity = self.db.get(id);
        let name = sanitize(entity.name());
        let owner = self.db.get(self.db.parent(id)).kind();
        Some(match (entity.kind(), owner) {
            (EntityKind::Field, EntityKind::Namespace) => format!("variable.{name}"),
            (EntityKind::Field, _) => format!("field.{name}"),
            _ => format!("method.{name}"),
        })
    }

    /// Anchor of one overload, unique within the page that shows it.
    pub fn overload_anchor(&self, id: EntityId, index: usize) -> String {
        match self.anchor_for(id) {
            Some(anchor) => format!("{anchor}.{index}"),
            None => format!("overload.{index}"),
        }
    }

    /// Site-rooted URL of the entity, without any visibility check.
    pub fn href(&self, id: EntityId) -> String {
        match self.page_segments(id) {
            Some(segments) => format!("{}{}", self.base_url, segments.join("/")),
            None => {
                let owner = self.href(self.db.parent(id));
                let anchor = self.anchor_for(id).unwrap_or_default();
                format!("{owner}#{anchor}")
            }
        }
    }

    /// URL to link `to` from a page about `from`.
    ///
    /// A hidden target has no page: the reference is recorded in `diag` and
    /// `None` is returned, and the caller renders plain text.
    pub fn url_for(&self, from: EntityId, to: EntityId, diag: &mut Diagnostics) -> Option<String> {
        let target = self.db.get(to);
        if target.hidden() {
            diag.push(Diagnostic::hidden_reference(target, self.db.get(from)));
            return None;
        }
        Some(self.href(to))
    }

    /// URL for a type used in a signature. Types outside the database have
    /// no URL and no diagnostic.
    pub fn type_url(&self, from: EntityId, ty: &TypeRef, diag: &mut Diagnostics) -> Option<String> {
        let target = self.db.lookup(ty.target.as_deref()?)?;
        self.url_for(from, target, diag)
    }

    pub fn db(&self) -> &'a Database {
        self.db
    }
}

fn scope_dir(header: &Header) -> Vec<String> {
    header
        .namespace_path
        .display_segments()
        .chain(header.record_path.iter().map(String::as_str))
        .map(sanitize)
        .collect()
}
