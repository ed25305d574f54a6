//! Doc-comment facts.
//!
//! Pass one only needs a handful of tags from a declaration's doc comment:
//! `@var`, `@param`, `@return` and `@deprecated`. Everything else in the
//! comment is ignored.

use std::sync::LazyLock;

use regex::Regex;

use crate::UnionType;

static VAR_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@var\s+([^\s$*]+)(?:\s+\$(\w+))?").expect("valid @var pattern")
});

static PARAM_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@param\s+([^\s$*]+)(?:\s+(?:\.\.\.)?&?\$(\w+))?").expect("valid @param pattern")
});

static RETURN_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@return\s+([^\s$*]+)").expect("valid @return pattern"));

static DEPRECATED_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@deprecated\b").expect("valid @deprecated pattern"));

/// A typed entry from `@var` or `@param`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentParameter {
    /// Variable name without the `$`, when the tag names one.
    pub name: Option<String>,
    pub union_type: UnionType,
}

/// Facts extracted from a doc comment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Comment {
    is_deprecated: bool,
    variables: Vec<CommentParameter>,
    parameters: Vec<CommentParameter>,
    return_type: Option<UnionType>,
}

impl Comment {
    /// A comment with no facts.
    pub fn none() -> Self {
        Self::default()
    }

    /// Parse a raw doc comment. Never fails; unrecognized text is ignored.
    pub fn from_doc_comment(text: &str) -> Self {
        if text.is_empty() {
            return Self::none();
        }

        let variables = VAR_TAG
            .captures_iter(text)
            .map(|caps| CommentParameter {
                name: caps.get(2).map(|m| m.as_str().to_string()),
                union_type: UnionType::from_doc_annotation(&caps[1]),
            })
            .collect();

        let parameters = PARAM_TAG
            .captures_iter(text)
            .map(|caps| CommentParameter {
                name: caps.get(2).map(|m| m.as_str().to_string()),
                union_type: UnionType::from_doc_annotation(&caps[1]),
            })
            .collect();

        let return_type = RETURN_TAG
            .captures(text)
            .map(|caps| UnionType::from_doc_annotation(&caps[1]));

        Self {
            is_deprecated: DEPRECATED_TAG.is_match(text),
            variables,
            parameters,
            return_type,
        }
    }

    /// Parse an optional doc comment, treating `None` as empty.
    pub fn from_optional(text: Option<&str>) -> Self {
        text.map(Self::from_doc_comment).unwrap_or_default()
    }

    pub fn is_deprecated(&self) -> bool {
        self.is_deprecated
    }

    /// `@var` entries in declaration order.
    pub fn variables(&self) -> &[CommentParameter] {
        &self.variables
    }

    /// The `@var` entry for the property at `index` within its declaration
    /// group, preferring an entry that names `name` explicitly.
    pub fn variable_for(&self, index: usize, name: &str) -> Option<&CommentParameter> {
        self.variables
            .iter()
            .find(|var| var.name.as_deref() == Some(name))
            .or_else(|| self.variables.get(index).filter(|var| var.name.is_none()))
    }

    /// `@param` entries in declaration order.
    pub fn parameters(&self) -> &[CommentParameter] {
        &self.parameters
    }

    pub fn return_type(&self) -> Option<&UnionType> {
        self.return_type.as_ref()
    }
}
