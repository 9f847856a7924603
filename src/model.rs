//! Declaration model for the symbol database — format-agnostic.
//!
//! The same types are deserialized from the discovery tool's JSON sightings
//! and stored in the [`Database`](crate::database::Database) arena, so a
//! sighting and its canonical entity share one shape.

use serde::Deserialize;
use std::fmt;

/// Dense index into the database arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct EntityId(pub(crate) u32);

impl EntityId {
    /// The global namespace, always the first entity.
    pub const GLOBAL: EntityId = EntityId(0);

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One scope segment of a namespace path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    Global,
    Anonymous,
    Named(String),
}

/// Scope segments from the global scope inward.
///
/// Always starts with [`Namespace::Global`], except for the path of the
/// global namespace itself, which is empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "Vec<Namespace>")]
pub struct NamespacePath(Vec<Namespace>);

impl NamespacePath {
    /// Path of the global namespace entity (no segments at all).
    pub fn root() -> Self {
        NamespacePath(Vec::new())
    }

    pub fn segments(&self) -> &[Namespace] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// True when any segment is an unnamed namespace.
    pub fn is_anonymous(&self) -> bool {
        self.0.iter().any(|n| *n == Namespace::Anonymous)
    }

    /// The first `len` segments.
    pub fn prefix(&self, len: usize) -> NamespacePath {
        NamespacePath(self.0[..len.min(self.0.len())].to_vec())
    }

    /// This path extended by one inner segment.
    pub fn child(&self, segment: Namespace) -> NamespacePath {
        let mut segments = if self.0.is_empty() {
            vec![Namespace::Global]
        } else {
            self.0.clone()
        };
        segments.push(segment);
        NamespacePath(segments)
    }

    /// Display names of the non-global segments, outermost first.
    pub fn display_segments(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|n| match n {
            Namespace::Global => None,
            Namespace::Anonymous => Some(ANONYMOUS),
            Namespace::Named(name) => Some(name.as_str()),
        })
    }
}

impl Default for NamespacePath {
    fn default() -> Self {
        NamespacePath(vec![Namespace::Global])
    }
}

impl From<Vec<Namespace>> for NamespacePath {
    fn from(segments: Vec<Namespace>) -> Self {
        let mut path = vec![Namespace::Global];
        path.extend(segments.into_iter().filter(|n| *n != Namespace::Global));
        NamespacePath(path)
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.display_segments().collect::<Vec<_>>().join("::");
        if joined.is_empty() {
            f.write_str("(global)")
        } else {
            f.write_str(&joined)
        }
    }
}

/// Literal used wherever an unnamed namespace is displayed.
pub const ANONYMOUS: &str = "(anonymous)";

/// Entity kind, one per variant of [`Entity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Namespace,
    Record,
    Function,
    Concept,
    Field,
    Alias,
}

impl EntityKind {
    /// Human-readable description used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Namespace => "namespace",
            EntityKind::Record => "record",
            EntityKind::Function => "function",
            EntityKind::Concept => "concept",
            EntityKind::Field => "field",
            EntityKind::Alias => "type alias",
        }
    }

    /// Which C++ name table an entity of this kind lives in.
    pub fn name_kind(self) -> NameKind {
        match self {
            EntityKind::Namespace => NameKind::Namespace,
            EntityKind::Record | EntityKind::Concept | EntityKind::Alias => NameKind::Type,
            EntityKind::Function | EntityKind::Field => NameKind::Value,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    Namespace,
    Type,
    Value,
}

/// Deduplication and lookup key of a declaration.
///
/// Two sightings of the same logical declaration from different translation
/// units produce equal identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub namespace_path: NamespacePath,
    pub record_path: Vec<String>,
    pub name: String,
    pub name_kind: NameKind,
}

/// Fields every declaration carries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Header {
    pub name: String,
    #[serde(default, rename = "namespace")]
    pub namespace_path: NamespacePath,
    /// Enclosing records, outermost first.
    #[serde(default, rename = "records")]
    pub record_path: Vec<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub comment: Option<String>,
    /// Source file of the first sighting.
    #[serde(default)]
    pub source: Option<String>,
    /// Enclosing namespace or record; assigned on insertion.
    #[serde(skip)]
    pub parent: EntityId,
}

impl Header {
    pub fn new(name: impl Into<String>, namespace_path: NamespacePath) -> Self {
        Self {
            name: name.into(),
            namespace_path,
            record_path: Vec::new(),
            hidden: false,
            comment: None,
            source: None,
            parent: EntityId::GLOBAL,
        }
    }

    /// Name as displayed: unnamed namespaces show as `(anonymous)`.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            ANONYMOUS
        } else {
            &self.name
        }
    }

    /// `a::b::Record::name`; empty for the global namespace.
    pub fn qualified_name(&self) -> String {
        if self.namespace_path.is_root() {
            return String::new();
        }
        let mut parts: Vec<&str> = self.namespace_path.display_segments().collect();
        parts.extend(self.record_path.iter().map(String::as_str));
        parts.push(self.display_name());
        parts.join("::")
    }

    /// The comment, if it has any non-whitespace text.
    pub fn comment(&self) -> Option<&str> {
        non_empty(self.comment.as_deref())
    }
}

pub(crate) fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

/// Members of a namespace or record, bucketed by kind.
///
/// Each bucket keeps first-discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Members {
    pub namespaces: Vec<EntityId>,
    pub records: Vec<EntityId>,
    pub functions: Vec<EntityId>,
    pub concepts: Vec<EntityId>,
    pub fields: Vec<EntityId>,
    pub aliases: Vec<EntityId>,
}

impl Members {
    pub fn bucket(&self, kind: EntityKind) -> &[EntityId] {
        match kind {
            EntityKind::Namespace => &self.namespaces,
            EntityKind::Record => &self.records,
            EntityKind::Function => &self.functions,
            EntityKind::Concept => &self.concepts,
            EntityKind::Field => &self.fields,
            EntityKind::Alias => &self.aliases,
        }
    }

    pub fn push(&mut self, kind: EntityKind, id: EntityId) {
        let bucket = match kind {
            EntityKind::Namespace => &mut self.namespaces,
            EntityKind::Record => &mut self.records,
            EntityKind::Function => &mut self.functions,
            EntityKind::Concept => &mut self.concepts,
            EntityKind::Field => &mut self.fields,
            EntityKind::Alias => &mut self.aliases,
        };
        bucket.push(id);
    }
}

/// Reference to a type from a signature.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeRef {
    /// Fully spelled type, shown as a tooltip.
    pub name: String,
    /// Possibly-elided spelling shown inline.
    #[serde(default)]
    pub short_name: Option<String>,
    /// Qualified path of the declaration this type names, if known.
    #[serde(default)]
    pub target: Option<String>,
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_name: None,
            target: None,
        }
    }

    pub fn short(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub default_value: Option<String>,
}

/// cv/ref qualification of a non-static member function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodQualifier {
    #[default]
    Mutable,
    Const,
    ConstLvalue,
    ConstRvalue,
    MutableLvalue,
    MutableRvalue,
}

impl MethodQualifier {
    /// Text written after the parameter list.
    pub fn suffix(self) -> &'static str {
        match self {
            MethodQualifier::Mutable => "",
            MethodQualifier::Const => " const",
            MethodQualifier::ConstLvalue => " const&",
            MethodQualifier::ConstRvalue => " const&&",
            MethodQualifier::MutableLvalue => " &",
            MethodQualifier::MutableRvalue => " &&",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialMember {
    Constructor,
    Destructor,
    Conversion,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MethodSpecifier {
    pub is_static: bool,
    pub is_virtual: bool,
    pub is_volatile: bool,
    pub qualifier: MethodQualifier,
    pub special: Option<SpecialMember>,
}

/// One concrete signature of a [`FunctionElement`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FunctionOverload {
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeRef>,
    pub template_params: Vec<String>,
    /// `requires` expressions; empty when unconstrained.
    pub constraints: Vec<String>,
    pub method: Option<MethodSpecifier>,
    pub is_deleted: bool,
    /// Overload-specific documentation; the function's comment is used
    /// when absent.
    pub comment: Option<String>,
}

/// What makes two overloads the same overload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pub parameter_types: Vec<String>,
    pub qualifier: MethodQualifier,
    pub is_volatile: bool,
}

impl FunctionOverload {
    pub fn signature(&self) -> Signature {
        let method = self.method.as_ref();
        Signature {
            parameter_types: self.parameters.iter().map(|p| p.ty.name.clone()).collect(),
            qualifier: method.map_or(MethodQualifier::Mutable, |m| m.qualifier),
            is_volatile: method.is_some_and(|m| m.is_volatile),
        }
    }

    pub fn is_static(&self) -> bool {
        self.method.as_ref().is_some_and(|m| m.is_static)
    }

    pub fn special(&self) -> Option<SpecialMember> {
        self.method.as_ref().and_then(|m| m.special)
    }

    /// Constructors, destructors and conversions have no written return.
    pub fn has_return(&self) -> bool {
        self.special().is_none()
    }

    pub fn comment(&self) -> Option<&str> {
        non_empty(self.comment.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NamespaceElement {
    #[serde(flatten)]
    pub header: Header,
    #[serde(skip)]
    pub members: Members,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    #[default]
    Class,
    Struct,
    Union,
}

impl RecordType {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordType::Class => "class",
            RecordType::Struct => "struct",
            RecordType::Union => "union",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordElement {
    #[serde(flatten)]
    pub header: Header,
    #[serde(default)]
    pub record_type: RecordType,
    #[serde(default)]
    pub template_params: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub is_final: bool,
    #[serde(skip)]
    pub members: Members,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FunctionElement {
    #[serde(flatten)]
    pub header: Header,
    /// Discovery order; merges only append.
    #[serde(default)]
    pub overloads: Vec<FunctionOverload>,
}

impl FunctionElement {
    pub fn is_operator(&self) -> bool {
        self.header.name.starts_with("operator")
            && !self.header.name[8..].starts_with(|c: char| c.is_alphanumeric() || c == '_')
    }

    /// Comment shown for the whole overload set: the function's own, else
    /// the first documented overload's.
    pub fn summary_comment(&self) -> Option<&str> {
        self.header
            .comment()
            .or_else(|| self.overloads.iter().find_map(FunctionOverload::comment))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConceptElement {
    #[serde(flatten)]
    pub header: Header,
    #[serde(default)]
    pub template_params: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldElement {
    #[serde(flatten)]
    pub header: Header,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeAliasElement {
    #[serde(flatten)]
    pub header: Header,
    pub target: TypeRef,
    #[serde(default)]
    pub template_params: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
}

/// Any declaration tracked by the database.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Namespace(NamespaceElement),
    Record(RecordElement),
    Function(FunctionElement),
    Concept(ConceptElement),
    Field(FieldElement),
    Alias(TypeAliasElement),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Namespace(_) => EntityKind::Namespace,
            Entity::Record(_) => EntityKind::Record,
            Entity::Function(_) => EntityKind::Function,
            Entity::Concept(_) => EntityKind::Concept,
            Entity::Field(_) => EntityKind::Field,
            Entity::Alias(_) => EntityKind::Alias,
        }
    }

    pub fn header(&self) -> &Header {
        match self {
            Entity::Namespace(e) => &e.header,
            Entity::Record(e) => &e.header,
            Entity::Function(e) => &e.header,
            Entity::Concept(e) => &e.header,
            Entity::Field(e) => &e.header,
            Entity::Alias(e) => &e.header,
        }
    }

    pub fn header_mut(&mut self) -> &mut Header {
        match self {
            Entity::Namespace(e) => &mut e.header,
            Entity::Record(e) => &mut e.header,
            Entity::Function(e) => &mut e.header,
            Entity::Concept(e) => &mut e.header,
            Entity::Field(e) => &mut e.header,
            Entity::Alias(e) => &mut e.header,
        }
    }

    pub fn name(&self) -> &str {
        &self.header().name
    }

    pub fn hidden(&self) -> bool {
        self.header().hidden
    }

    pub fn members(&self) -> Option<&Members> {
        match self {
            Entity::Namespace(e) => Some(&e.members),
            Entity::Record(e) => Some(&e.members),
            _ => None,
        }
    }

    pub fn members_mut(&mut self) -> Option<&mut Members> {
        match self {
            Entity::Namespace(e) => Some(&mut e.members),
            Entity::Record(e) => Some(&mut e.members),
            _ => None,
        }
    }

    pub fn identity(&self) -> Identity {
        let header = self.header();
        Identity {
            namespace_path: header.namespace_path.clone(),
            record_path: header.record_path.clone(),
            name: header.name.clone(),
            name_kind: self.kind().name_kind(),
        }
    }

    /// Declared inside, or itself being, an unnamed namespace.
    pub fn in_anonymous_scope(&self) -> bool {
        let header = self.header();
        header.namespace_path.is_anonymous()
            || matches!(self, Entity::Namespace(ns) if !header.namespace_path.is_root() && ns.header.name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_always_starts_at_global() {
        let path = NamespacePath::from(vec![Namespace::Named("a".into())]);
        assert_eq!(path.segments()[0], Namespace::Global);
        assert_eq!(path.segments().len(), 2);
    }

    #[test]
    fn qualified_name_renders_anonymous() {
        let path = NamespacePath::from(vec![
            Namespace::Named("a".into()),
            Namespace::Anonymous,
        ]);
        let mut header = Header::new("f", path);
        header.record_path = vec!["R".into()];
        assert_eq!(header.qualified_name(), "a::(anonymous)::R::f");
    }

    #[test]
    fn overload_signature_ignores_names_and_comments() {
        let a = FunctionOverload {
            parameters: vec![Parameter {
                name: "x".into(),
                ty: TypeRef::new("int"),
                default_value: None,
            }],
            comment: Some("doc".into()),
            ..Default::default()
        };
        let mut b = a.clone();
        b.parameters[0].name = "y".into();
        b.comment = None;
        assert_eq!(a.signature(), b.signature());

        b.method = Some(MethodSpecifier {
            qualifier: MethodQualifier::Const,
            ..Default::default()
        });
        assert_ne!(a.signature(), b.signature());
    }

    #[test]
    fn operator_detection() {
        let mut f = FunctionElement {
            header: Header::new("operator==", NamespacePath::default()),
            overloads: Vec::new(),
        };
        assert!(f.is_operator());
        f.header.name = "operator_helper".into();
        assert!(!f.is_operator());
        f.header.name = "operate".into();
        assert!(!f.is_operator());
    }

    #[test]
    fn deserializes_tagged_sighting() {
        let entity: Entity = serde_json::from_str(
            r#"{"kind": "field", "namespace": [{"named": "n"}], "name": "x",
                "type": {"name": "int"}, "is_static": true}"#,
        )
        .unwrap();
        assert_eq!(entity.kind(), EntityKind::Field);
        assert_eq!(entity.header().qualified_name(), "n::x");
    }
}
