//! Syntax-tree nodes.

use phan_core::LineSpan;

use crate::NodeKind;

/// One child slot of a node: either a subtree or a scalar leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Node(Box<Node>),
    Str(String),
    Int(i64),
    Float(f64),
    /// An empty slot (e.g. no `extends`, no default value).
    Null,
}

impl Child {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Child::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Child::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Child::Null)
    }

    /// Whether this slot holds a node of `kind`.
    pub fn is_kind(&self, kind: NodeKind) -> bool {
        self.as_node().is_some_and(|node| node.kind == kind)
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(Box::new(node))
    }
}

impl From<Option<Node>> for Child {
    fn from(node: Option<Node>) -> Self {
        node.map_or(Child::Null, Child::from)
    }
}

impl From<&str> for Child {
    fn from(s: &str) -> Self {
        Child::Str(s.to_string())
    }
}

impl From<String> for Child {
    fn from(s: String) -> Self {
        Child::Str(s)
    }
}

impl From<i64> for Child {
    fn from(value: i64) -> Self {
        Child::Int(value)
    }
}

impl From<f64> for Child {
    fn from(value: f64) -> Self {
        Child::Float(value)
    }
}

/// A syntax-tree node as handed over by the parser.
///
/// The meaning of `flags` and of each child index depends on `kind`. All
/// accessors return `Option` so that a malformed tree can be reported instead
/// of panicking.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub flags: u32,
    /// First line (1-based). `0` when unknown.
    pub line: u32,
    pub end_line: Option<u32>,
    pub doc_comment: Option<String>,
    pub children: Vec<Child>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            flags: 0,
            line: 0,
            end_line: None,
            doc_comment: None,
            children: Vec::new(),
        }
    }

    // === Builder Methods ===

    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Set the first line.
    pub fn at(mut self, line: u32) -> Self {
        self.line = line;
        self
    }

    pub fn with_end_line(mut self, end_line: u32) -> Self {
        self.end_line = Some(end_line);
        self
    }

    pub fn with_doc_comment(mut self, doc_comment: impl Into<String>) -> Self {
        self.doc_comment = Some(doc_comment.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children<C: Into<Child>>(mut self, children: impl IntoIterator<Item = C>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    // === Accessors ===

    pub fn child(&self, index: usize) -> Option<&Child> {
        self.children.get(index)
    }

    pub fn child_node(&self, index: usize) -> Option<&Node> {
        self.child(index).and_then(Child::as_node)
    }

    pub fn child_str(&self, index: usize) -> Option<&str> {
        self.child(index).and_then(Child::as_str)
    }

    /// Subtree children, skipping scalar leaves and empty slots.
    pub fn child_nodes(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(Child::as_node)
    }

    pub fn span(&self) -> LineSpan {
        LineSpan::new(self.line, self.end_line)
    }

    pub fn doc_comment(&self) -> Option<&str> {
        self.doc_comment.as_deref()
    }

    /// Count of nodes in this subtree, including itself.
    pub fn size(&self) -> usize {
        1 + self.child_nodes().map(Node::size).sum::<usize>()
    }
}
