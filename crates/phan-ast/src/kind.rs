//! Node kind tags.

use std::fmt;

/// The kind tag of a syntax-tree node.
///
/// The set is closed: a consumer matching on it gets exhaustiveness checking
/// instead of a catch-all branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // === Structure ===
    /// A sequence of statements; also the root of a source unit.
    StmtList,
    Namespace,
    Use,
    GroupUse,
    UseElem,

    // === Declarations ===
    Class,
    UseTrait,
    TraitAdaptations,
    Method,
    FuncDecl,
    Closure,
    ClosureUses,
    ParamList,
    Param,
    PropDecl,
    PropElem,
    ClassConstDecl,
    ConstElem,
    ConstDecl,

    // === Names ===
    Name,
    NameList,

    // === Calls ===
    Call,
    StaticCall,
    MethodCall,
    ArgList,
    New,

    // === Expressions ===
    Var,
    Dim,
    Prop,
    StaticProp,
    Const,
    ClassConstFetch,
    Array,
    ArrayElem,
    Assign,
    BinaryOp,
    UnaryOp,
    Conditional,
    Encaps,
    MagicConst,

    // === Control flow ===
    If,
    IfElem,
    Switch,
    SwitchList,
    SwitchCase,
    While,
    DoWhile,
    For,
    Foreach,
    Try,
    Catch,
    CatchList,
    Throw,
    Return,
    Echo,
    Print,
    Global,
    Static,
    Unset,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::StmtList => "StmtList",
            NodeKind::Namespace => "Namespace",
            NodeKind::Use => "Use",
            NodeKind::GroupUse => "GroupUse",
            NodeKind::UseElem => "UseElem",
            NodeKind::Class => "Class",
            NodeKind::UseTrait => "UseTrait",
            NodeKind::TraitAdaptations => "TraitAdaptations",
            NodeKind::Method => "Method",
            NodeKind::FuncDecl => "FuncDecl",
            NodeKind::Closure => "Closure",
            NodeKind::ClosureUses => "ClosureUses",
            NodeKind::ParamList => "ParamList",
            NodeKind::Param => "Param",
            NodeKind::PropDecl => "PropDecl",
            NodeKind::PropElem => "PropElem",
            NodeKind::ClassConstDecl => "ClassConstDecl",
            NodeKind::ConstElem => "ConstElem",
            NodeKind::ConstDecl => "ConstDecl",
            NodeKind::Name => "Name",
            NodeKind::NameList => "NameList",
            NodeKind::Call => "Call",
            NodeKind::StaticCall => "StaticCall",
            NodeKind::MethodCall => "MethodCall",
            NodeKind::ArgList => "ArgList",
            NodeKind::New => "New",
            NodeKind::Var => "Var",
            NodeKind::Dim => "Dim",
            NodeKind::Prop => "Prop",
            NodeKind::StaticProp => "StaticProp",
            NodeKind::Const => "Const",
            NodeKind::ClassConstFetch => "ClassConstFetch",
            NodeKind::Array => "Array",
            NodeKind::ArrayElem => "ArrayElem",
            NodeKind::Assign => "Assign",
            NodeKind::BinaryOp => "BinaryOp",
            NodeKind::UnaryOp => "UnaryOp",
            NodeKind::Conditional => "Conditional",
            NodeKind::Encaps => "Encaps",
            NodeKind::MagicConst => "MagicConst",
            NodeKind::If => "If",
            NodeKind::IfElem => "IfElem",
            NodeKind::Switch => "Switch",
            NodeKind::SwitchList => "SwitchList",
            NodeKind::SwitchCase => "SwitchCase",
            NodeKind::While => "While",
            NodeKind::DoWhile => "DoWhile",
            NodeKind::For => "For",
            NodeKind::Foreach => "Foreach",
            NodeKind::Try => "Try",
            NodeKind::Catch => "Catch",
            NodeKind::CatchList => "CatchList",
            NodeKind::Throw => "Throw",
            NodeKind::Return => "Return",
            NodeKind::Echo => "Echo",
            NodeKind::Print => "Print",
            NodeKind::Global => "Global",
            NodeKind::Static => "Static",
            NodeKind::Unset => "Unset",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
