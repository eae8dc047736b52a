//! Declaration tree.
//!
//! Nodes live in a flat arena and refer to each other by [`DeclId`]. Parent
//! links make the enclosing-type chain of any declaration an index walk.

use serde::Serialize;

use crate::types::DeclaredType;

/// Index of a node in a [`DeclTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclId(usize);

impl DeclId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Kind of type-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    Struct,
    Class,
    Actor,
    Enum,
    Protocol,
    Extension,
}

impl DeclKind {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "struct" => Some(Self::Struct),
            "class" => Some(Self::Class),
            "actor" => Some(Self::Actor),
            "enum" => Some(Self::Enum),
            "protocol" => Some(Self::Protocol),
            "extension" => Some(Self::Extension),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Struct => "struct",
            Self::Class => "class",
            Self::Actor => "actor",
            Self::Enum => "enum",
            Self::Protocol => "protocol",
            Self::Extension => "extension",
        }
    }

    /// Whether a fixture factory can be generated for this kind.
    ///
    /// Classes additionally need to be `final`, see [`DeclNode::is_markable`].
    pub fn is_markable(&self) -> bool {
        matches!(self, Self::Struct | Self::Class | Self::Actor)
    }
}

impl std::fmt::Display for DeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A `let`/`var` member of a type declaration, one per identifier binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    /// Classified type annotation; a binding without one borrows the next
    /// binding's type in `let a, b: Int`
    pub declared_type: Option<DeclaredType>,
    pub has_initializer: bool,
    /// Has a getter or expression body rather than observers
    pub is_computed: bool,
    /// Declared `static` or `class`
    pub is_static: bool,
    pub line: usize,
}

impl Property {
    /// Stored instance property that the memberwise initializer must receive.
    pub fn is_required_stored(&self) -> bool {
        !self.is_static && !self.is_computed && !self.has_initializer
    }
}

/// A type-level declaration.
#[derive(Debug, Clone)]
pub struct DeclNode {
    pub kind: DeclKind,
    /// Declared name; dotted for extensions of nested types
    pub name: String,
    pub line: usize,
    /// Declaration modifiers such as `public` or `final`, attributes excluded
    pub modifiers: Vec<String>,
    /// Doc line comments directly preceding the declaration
    pub doc_comments: Vec<String>,
    pub properties: Vec<Property>,
    pub children: Vec<DeclId>,
    pub parent: Option<DeclId>,
}

impl DeclNode {
    pub fn new(kind: DeclKind, name: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            name: name.into(),
            line,
            modifiers: Vec::new(),
            doc_comments: Vec::new(),
            properties: Vec::new(),
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn is_final(&self) -> bool {
        self.modifiers.iter().any(|modifier| modifier == "final")
    }

    /// Whether a fixture factory can be generated for this declaration.
    /// Classes must be `final`.
    pub fn is_markable(&self) -> bool {
        match self.kind {
            DeclKind::Class => self.is_final(),
            kind => kind.is_markable(),
        }
    }
}

/// Arena of declarations for one source file.
#[derive(Debug, Clone, Default)]
pub struct DeclTree {
    nodes: Vec<DeclNode>,
    roots: Vec<DeclId>,
}

impl DeclTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node under `parent` (or at file scope) and return its id.
    pub fn push(&mut self, mut node: DeclNode, parent: Option<DeclId>) -> DeclId {
        let id = DeclId(self.nodes.len());
        node.parent = parent;
        self.nodes.push(node);
        match parent.and_then(|p| self.nodes.get_mut(p.0)) {
            Some(owner) => owner.children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn get(&self, id: DeclId) -> &DeclNode {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: DeclId) -> &mut DeclNode {
        &mut self.nodes[id.0]
    }

    /// File-scope declarations in source order.
    pub fn roots(&self) -> &[DeclId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Enclosing declarations of `id`, innermost first.
    pub fn ancestors(&self, id: DeclId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(id).parent,
        }
    }
}

/// Iterator over parent links.
pub struct Ancestors<'a> {
    tree: &'a DeclTree,
    next: Option<DeclId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a DeclNode;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.tree.get(id);
        self.next = node.parent;
        Some(node)
    }
}
