//! Pass One - register every declaration of a source unit.
//!
//! The walk is a depth-first, pre-order, left-to-right traversal. Each node
//! is dispatched on its kind, which may derive a new [`Context`] and register
//! entities in the [`CodeBase`]; then, unless the kind is terminal, each
//! subtree child is walked in order.
//!
//! ## Context flow
//!
//! ```text
//!            running context ──────────────▶ child 1 ──┐
//!                 ▲                                     │ namespace scope only
//!                 └─────────────────────────────────────┘
//!            running context ──────────────▶ child 2 ...
//! ```
//!
//! A child sees the context as left by its earlier siblings. What a child
//! hands back is limited to its namespace scope: a namespace declaration
//! changes the namespace for everything after it, and a `use` declaration
//! adds aliases for everything after it. Class, method, closure and
//! conditional scopes end with the subtree that opened them.
//!
//! ## Failures
//!
//! A declaration that cannot be registered (a property outside a class, a
//! malformed node) is reported as a diagnostic at its line. Its subtree is
//! skipped and the walk continues with the next sibling.

use phan_ast::{Child, Node, NodeKind, ParamFlags, UseKind};
use phan_core::{
    Class, ClassConstant, ClassFlags, Comment, Diagnostic, Diagnostics, Issue, Method, Modifiers,
    NAMESPACE_SEPARATOR, Property, RegistrationError, UnionType,
};
use phan_registry::CodeBase;

use crate::compat::check_compatibility;
use crate::resolve::{DeclarationKind, resolve_class_name, resolve_fqsen};
use crate::types::{type_from_child, type_from_type_node};
use crate::{Configuration, Context};

/// Name given to classes declared without one.
pub const ANONYMOUS_CLASS_NAME: &str = "class@anonymous";

const CONSTRUCTOR_NAME: &str = "__construct";
const INVOKE_NAME: &str = "__invoke";

/// Builtins whose use means a function reads its arguments dynamically.
const ARGUMENT_INTROSPECTION_FUNCTIONS: &[&str] = &["func_get_args", "func_get_arg", "func_num_args"];

/// Output of pass one over a single source unit.
#[derive(Debug)]
pub struct PassOneOutput {
    /// Context at the end of the unit. Callers usually only need its namespace.
    pub context: Context,
    /// Diagnostics reported while walking, in source order.
    pub diagnostics: Diagnostics,
    /// Classes, interfaces and traits registered from this unit.
    pub classes_registered: usize,
    /// Methods registered from this unit.
    pub methods_registered: usize,
    /// Free functions registered from this unit.
    pub functions_registered: usize,
}

/// What to do after a node has been dispatched.
enum Visit {
    /// Walk the node's subtree children with this context.
    Descend(Context),
    /// Do not walk the children.
    Terminal(Context),
}

/// Pass 1: register declarations into the shared code base.
///
/// The code base is borrowed for the whole walk, which keeps each probe and
/// insert of a declaration atomic with respect to other units.
pub struct PassOne<'a> {
    code_base: &'a mut CodeBase,
    config: &'a Configuration,
    diagnostics: Diagnostics,
    classes_registered: usize,
    methods_registered: usize,
    functions_registered: usize,
}

impl<'a> PassOne<'a> {
    pub fn new(code_base: &'a mut CodeBase, config: &'a Configuration) -> Self {
        Self {
            code_base,
            config,
            diagnostics: Diagnostics::new(),
            classes_registered: 0,
            methods_registered: 0,
            functions_registered: 0,
        }
    }

    /// Walk the tree of `file`, starting from a fresh context spanning the root.
    #[cfg_attr(feature = "profiling", profiling::function)]
    #[tracing::instrument(level = "debug", skip(self, root), fields(nodes = root.size()))]
    pub fn run(mut self, file: &str, root: &Node) -> PassOneOutput {
        let context = Context::new(file).with_span(root.span());
        let context = self.walk(root, context);

        tracing::debug!(
            namespace = context.namespace(),
            classes = self.classes_registered,
            methods = self.methods_registered,
            functions = self.functions_registered,
            diagnostics = self.diagnostics.count(),
            "pass one finished"
        );

        PassOneOutput {
            context,
            diagnostics: self.diagnostics,
            classes_registered: self.classes_registered,
            methods_registered: self.methods_registered,
            functions_registered: self.functions_registered,
        }
    }

    /// Walk one subtree and return the context it leaves behind.
    pub fn walk(&mut self, node: &Node, context: Context) -> Context {
        tracing::trace!(kind = %node.kind, line = node.line, "visit");

        let mut context = match self.visit(node, context) {
            Visit::Descend(context) => context,
            Visit::Terminal(context) => return context,
        };

        for child in node.child_nodes() {
            let child_context = self.walk(child, context.clone());
            context = match child.kind {
                NodeKind::Namespace | NodeKind::Use | NodeKind::GroupUse => {
                    context.with_namespace_scope_of(&child_context)
                }
                _ => context.with_namespace(child_context.namespace()),
            };
        }
        context
    }

    // ==========================================================================
    // Dispatch
    // ==========================================================================

    fn visit(&mut self, node: &Node, context: Context) -> Visit {
        match node.kind {
            NodeKind::Namespace => {
                let name = node.child_str(0).unwrap_or_default();
                Visit::Descend(context.enter_namespace(name))
            }

            NodeKind::If => {
                self.code_base.increment_conditionals();
                Visit::Descend(context.with_conditional(true))
            }

            NodeKind::Use => {
                let kind = UseKind::from_flags(node.flags);
                self.declaration(node, context, |pass, node, context| {
                    pass.visit_use(node, context, kind, None)
                })
            }

            NodeKind::GroupUse => match self.visit_group_use(node, context.clone()) {
                Ok(context) => Visit::Terminal(context),
                Err(issue) => self.fail(node, context, issue),
            },

            NodeKind::Class => self.declaration(node, context, Self::visit_class),
            NodeKind::UseTrait => self.declaration(node, context, Self::visit_use_trait),
            NodeKind::Method => self.declaration(node, context, Self::visit_method),
            NodeKind::FuncDecl => self.declaration(node, context, Self::visit_function),

            NodeKind::PropDecl => {
                if let Err(issue) = self.visit_prop_decl(node, &context) {
                    self.report(&context, node.line, issue);
                }
                Visit::Terminal(context)
            }

            NodeKind::ClassConstDecl => {
                if let Err(issue) = self.visit_class_const_decl(node, &context) {
                    self.report(&context, node.line, issue);
                }
                Visit::Terminal(context)
            }

            NodeKind::Closure => {
                self.code_base.increment_closures();
                Visit::Descend(context.with_closure_scope())
            }

            NodeKind::Call => {
                if !self.visit_argument_introspection(node, &context) {
                    self.check_compatibility(node, &context);
                }
                Visit::Descend(context)
            }

            NodeKind::StaticCall => {
                self.visit_static_call(node, &context);
                self.check_compatibility(node, &context);
                Visit::Descend(context)
            }

            NodeKind::Dim
            | NodeKind::MethodCall
            | NodeKind::Return
            | NodeKind::Print
            | NodeKind::Echo => {
                self.check_compatibility(node, &context);
                Visit::Descend(context)
            }

            NodeKind::StmtList
            | NodeKind::UseElem
            | NodeKind::TraitAdaptations
            | NodeKind::ClosureUses
            | NodeKind::ParamList
            | NodeKind::Param
            | NodeKind::PropElem
            | NodeKind::ConstElem
            | NodeKind::ConstDecl
            | NodeKind::Name
            | NodeKind::NameList
            | NodeKind::ArgList
            | NodeKind::New
            | NodeKind::Var
            | NodeKind::Prop
            | NodeKind::StaticProp
            | NodeKind::Const
            | NodeKind::ClassConstFetch
            | NodeKind::Array
            | NodeKind::ArrayElem
            | NodeKind::Assign
            | NodeKind::BinaryOp
            | NodeKind::UnaryOp
            | NodeKind::Conditional
            | NodeKind::Encaps
            | NodeKind::MagicConst
            | NodeKind::IfElem
            | NodeKind::Switch
            | NodeKind::SwitchList
            | NodeKind::SwitchCase
            | NodeKind::While
            | NodeKind::DoWhile
            | NodeKind::For
            | NodeKind::Foreach
            | NodeKind::Try
            | NodeKind::Catch
            | NodeKind::CatchList
            | NodeKind::Throw
            | NodeKind::Global
            | NodeKind::Static
            | NodeKind::Unset => Visit::Descend(context),
        }
    }

    /// Run a declaration visitor. On failure the declaration is reported and
    /// its subtree skipped.
    fn declaration(
        &mut self,
        node: &Node,
        context: Context,
        visit: impl FnOnce(&mut Self, &Node, &Context) -> Result<Context, Issue>,
    ) -> Visit {
        match visit(self, node, &context) {
            Ok(context) => Visit::Descend(context),
            Err(issue) => self.fail(node, context, issue),
        }
    }

    fn fail(&mut self, node: &Node, context: Context, issue: Issue) -> Visit {
        self.report(&context, node.line, issue);
        Visit::Terminal(context)
    }

    fn report(&mut self, context: &Context, line: u32, issue: Issue) {
        let diagnostic = Diagnostic::from_issue(&issue, context.file(), line);
        tracing::warn!(
            kind = %diagnostic.kind,
            file = context.file(),
            line,
            "{}",
            diagnostic.message
        );
        self.diagnostics.add_diagnostic(diagnostic);
    }

    fn check_compatibility(&mut self, node: &Node, context: &Context) {
        if let Some(issue) = check_compatibility(self.config, context, node) {
            self.report(context, node.line, issue);
        }
    }

    fn is_conditional(&self, context: &Context) -> bool {
        self.config.record_conditional_declarations && context.is_conditional()
    }

    // ==========================================================================
    // Use statements
    // ==========================================================================

    /// Add an alias for each element. An element's own kind overrides the
    /// statement's; `prefix` is the shared prefix of a group use.
    fn visit_use(
        &mut self,
        node: &Node,
        context: &Context,
        kind: Option<UseKind>,
        prefix: Option<&str>,
    ) -> Result<Context, Issue> {
        let mut context = context.clone();
        for element in node.child_nodes() {
            if element.kind != NodeKind::UseElem {
                return Err(Issue::malformed(node.kind.as_str(), "expected use element"));
            }
            let target = element
                .child_str(0)
                .filter(|target| !target.is_empty())
                .ok_or_else(|| Issue::malformed("UseElem", "missing import target"))?;
            let kind = UseKind::from_flags(element.flags)
                .or(kind)
                .ok_or_else(|| Issue::malformed("UseElem", "missing import kind"))?;

            let target = match prefix {
                Some(prefix) => format!(
                    "{}{NAMESPACE_SEPARATOR}{}",
                    prefix.trim_matches(NAMESPACE_SEPARATOR),
                    target.trim_start_matches(NAMESPACE_SEPARATOR)
                ),
                None => target.trim_start_matches(NAMESPACE_SEPARATOR).to_string(),
            };
            let alias = match element.child_str(1) {
                Some(alias) => alias,
                None => target
                    .rsplit(NAMESPACE_SEPARATOR)
                    .next()
                    .unwrap_or(target.as_str()),
            };

            tracing::debug!(?kind, alias, target = %target, "use alias");
            context = context.with_alias(kind, alias, &target);
        }
        Ok(context)
    }

    fn visit_group_use(&mut self, node: &Node, context: Context) -> Result<Context, Issue> {
        let prefix = node
            .child_str(0)
            .ok_or_else(|| Issue::malformed("GroupUse", "missing prefix"))?;
        let list = node
            .child_node(1)
            .ok_or_else(|| Issue::malformed("GroupUse", "missing element list"))?;
        self.visit_use(list, &context, UseKind::from_flags(node.flags), Some(prefix))
    }

    // ==========================================================================
    // Classes
    // ==========================================================================

    fn visit_class(&mut self, node: &Node, context: &Context) -> Result<Context, Issue> {
        let flags = ClassFlags::from_bits_truncate(node.flags);
        let name = match node.child_str(0).filter(|name| !name.is_empty()) {
            Some(name) => name,
            None if flags.is_anonymous() || node.child(0).is_some_and(Child::is_null) => {
                ANONYMOUS_CLASS_NAME
            }
            None => return Err(Issue::malformed("Class", "missing class name")),
        };

        let fqsen = resolve_fqsen(self.code_base, context, name, DeclarationKind::Class)?;

        let parent = node
            .child_node(1)
            .and_then(|parent| resolve_class_name(context, parent));
        let interfaces = node
            .child_node(2)
            .map(|list| {
                list.child_nodes()
                    .filter_map(|name| resolve_class_name(context, name))
                    .collect()
            })
            .unwrap_or_default();

        let span = node.span();
        let class = Class::new(fqsen.clone(), name, context.source(span), flags)
            .with_comment(Comment::from_optional(node.doc_comment()))
            .with_parent(parent)
            .with_interfaces(interfaces)
            .conditional(self.is_conditional(context));

        self.code_base.add_class(class)?;
        self.code_base.increment_classes();
        self.classes_registered += 1;
        tracing::debug!(fqsen = %fqsen, line = node.line, "registered class");

        Ok(context.with_class_fqsen(fqsen).with_span(span))
    }

    fn visit_use_trait(&mut self, node: &Node, context: &Context) -> Result<Context, Issue> {
        let class_fqsen = context
            .class_fqsen()
            .ok_or_else(|| Issue::malformed("UseTrait", "trait use outside a class"))?;
        let names = node
            .child_node(0)
            .filter(|list| list.kind == NodeKind::NameList)
            .ok_or_else(|| Issue::malformed("UseTrait", "missing trait list"))?;

        let class = self
            .code_base
            .class_mut(class_fqsen)
            .ok_or_else(|| RegistrationError::UnknownClass(class_fqsen.clone()))?;
        for name in names.child_nodes() {
            if let Some(trait_fqsen) = resolve_class_name(context, name) {
                tracing::debug!(class = %class_fqsen, used = %trait_fqsen, "trait use");
                class.add_trait(trait_fqsen);
            }
        }
        self.code_base.increment_traits();
        Ok(context.clone())
    }

    fn visit_method(&mut self, node: &Node, context: &Context) -> Result<Context, Issue> {
        let name = node
            .child_str(0)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Issue::malformed("Method", "missing method name"))?;
        let fqsen = resolve_fqsen(self.code_base, context, name, DeclarationKind::Method)?;
        let class_fqsen = fqsen
            .class_fqsen()
            .ok_or_else(|| Issue::InvalidMethodDeclaration { name: name.to_string() })?;

        let span = node.span();
        let comment = Comment::from_optional(node.doc_comment());
        let return_type = comment.return_type().cloned();
        let method = Method::new(fqsen.clone(), name, context.source(span))
            .with_modifiers(Modifiers::from_bits_truncate(node.flags))
            .with_return_type(return_type)
            .with_comment(comment)
            .conditional(self.is_conditional(context));

        self.code_base.add_method(method)?;
        self.code_base.increment_methods();
        self.methods_registered += 1;
        tracing::debug!(fqsen = %fqsen, line = node.line, "registered method");

        let class = self
            .code_base
            .class_mut(&class_fqsen)
            .ok_or(RegistrationError::UnknownClass(class_fqsen.clone()))?;
        if name.eq_ignore_ascii_case(CONSTRUCTOR_NAME) {
            class.require_parent_constructor_call();
        } else if name.eq_ignore_ascii_case(INVOKE_NAME) {
            class.mark_callable();
        }

        Ok(context.with_method_fqsen(fqsen).with_span(span))
    }

    // ==========================================================================
    // Class members
    // ==========================================================================

    fn visit_prop_decl(&mut self, node: &Node, context: &Context) -> Result<(), Issue> {
        let class_fqsen = context
            .class_fqsen()
            .cloned()
            .ok_or(Issue::InvalidPropertyDeclaration)?;
        let comment = Comment::from_optional(node.doc_comment());
        let modifiers = Modifiers::from_bits_truncate(node.flags);

        let elements = node
            .child_nodes()
            .filter(|element| element.kind == NodeKind::PropElem);
        for (index, element) in elements.enumerate() {
            let line = line_or(element, node);
            let Some(name) = element.child_str(0).filter(|name| !name.is_empty()) else {
                self.report(context, line, Issue::malformed("PropElem", "missing property name"));
                continue;
            };

            let inferred = type_from_child(context, element.child(1).unwrap_or(&Child::Null));
            let element_comment = Comment::from_optional(element.doc_comment());
            let doc_type = comment
                .variable_for(index, name)
                .or_else(|| element_comment.variable_for(0, name))
                .map(|var| var.union_type.clone())
                .filter(|doc_type| !doc_type.is_none());

            let declared_type = match doc_type {
                Some(doc_type) if inferred.is_null() => {
                    Some(doc_type.merge(&UnionType::from_name("null")))
                }
                Some(doc_type) => {
                    if self.config.check_property_doc_types
                        && !inferred.is_none()
                        && !inferred.is_equivalent_to(&doc_type)
                    {
                        let issue = Issue::PropertyTypeMismatch {
                            property: name.to_string(),
                            declared: doc_type.to_string(),
                            inferred: inferred.to_string(),
                        };
                        self.report(context, line, issue);
                    }
                    Some(doc_type)
                }
                None => None,
            };

            let property = Property::new(name, inferred, modifiers, context.source(element.span()))
                .with_declared_type(declared_type);
            self.code_base
                .class_mut(&class_fqsen)
                .ok_or_else(|| RegistrationError::UnknownClass(class_fqsen.clone()))?
                .add_property(property);
            tracing::debug!(class = %class_fqsen, property = name, "registered property");
        }
        Ok(())
    }

    fn visit_class_const_decl(&mut self, node: &Node, context: &Context) -> Result<(), Issue> {
        let class_fqsen = context
            .class_fqsen()
            .cloned()
            .ok_or(Issue::InvalidConstantDeclaration)?;
        let modifiers = Modifiers::from_bits_truncate(node.flags);

        for element in node.child_nodes() {
            let line = line_or(element, node);
            let Some(name) = element
                .child_str(0)
                .filter(|_| element.kind == NodeKind::ConstElem)
            else {
                self.report(context, line, Issue::malformed("ConstElem", "missing constant name"));
                continue;
            };

            let union_type = type_from_child(context, element.child(1).unwrap_or(&Child::Null));
            let constant = ClassConstant::new(name, union_type, modifiers, context.source(element.span()));
            self.code_base
                .class_mut(&class_fqsen)
                .ok_or_else(|| RegistrationError::UnknownClass(class_fqsen.clone()))?
                .add_constant(constant);
        }
        Ok(())
    }

    // ==========================================================================
    // Functions
    // ==========================================================================

    fn visit_function(&mut self, node: &Node, context: &Context) -> Result<Context, Issue> {
        let name = node
            .child_str(0)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Issue::malformed("FuncDecl", "missing function name"))?;
        let fqsen = resolve_fqsen(self.code_base, context, name, DeclarationKind::Function)?;

        let span = node.span();
        let comment = Comment::from_optional(node.doc_comment());
        let signature = ParameterCounts::of(node.child_node(1));
        let return_type = node
            .child_node(3)
            .and_then(|ty| type_from_type_node(context, ty))
            .or_else(|| comment.return_type().cloned());

        let mut function = Method::new(fqsen.clone(), name, context.source(span))
            .with_modifiers(Modifiers::from_bits_truncate(node.flags))
            .with_parameter_counts(signature.required, signature.optional)
            .with_return_type(return_type)
            .with_comment(comment)
            .conditional(self.is_conditional(context));
        if signature.variadic {
            function.accept_unlimited_parameters();
        }

        self.code_base.add_method(function)?;
        self.code_base.increment_functions();
        self.functions_registered += 1;
        tracing::debug!(fqsen = %fqsen, line = node.line, "registered function");

        Ok(context.with_method_fqsen(fqsen).with_span(span))
    }

    // ==========================================================================
    // Calls
    // ==========================================================================

    /// Mark the enclosing method or function when `node` calls one of the
    /// argument-introspection builtins. Returns whether it did.
    fn visit_argument_introspection(&mut self, node: &Node, context: &Context) -> bool {
        let Some(callee) = node
            .child_node(0)
            .filter(|callee| callee.kind == NodeKind::Name)
            .and_then(|callee| callee.child_str(0))
        else {
            return false;
        };
        let callee = callee.trim_start_matches(NAMESPACE_SEPARATOR);
        if !ARGUMENT_INTROSPECTION_FUNCTIONS
            .iter()
            .any(|name| name.eq_ignore_ascii_case(callee))
        {
            return false;
        }

        if !context.is_in_closure_scope() {
            if let Some(method) = context
                .method_fqsen()
                .and_then(|fqsen| self.code_base.method_mut(fqsen))
            {
                method.accept_unlimited_parameters();
                tracing::debug!(fqsen = %method.fqsen, "accepts unlimited parameters");
            }
        }
        true
    }

    /// Record a `parent::__construct()` call on the enclosing class.
    fn visit_static_call(&mut self, node: &Node, context: &Context) {
        let calls_parent = node
            .child_node(0)
            .filter(|class| class.kind == NodeKind::Name)
            .and_then(|class| class.child_str(0))
            .is_some_and(|class| class.eq_ignore_ascii_case("parent"));
        let calls_constructor = node
            .child_str(1)
            .is_some_and(|method| method.eq_ignore_ascii_case(CONSTRUCTOR_NAME));
        if !(calls_parent && calls_constructor) {
            return;
        }

        if let Some(class) = context
            .class_fqsen()
            .and_then(|fqsen| self.code_base.class_mut(fqsen))
        {
            class.set_parent_constructor_called();
            tracing::debug!(class = %class.fqsen, "parent constructor called");
        }
    }
}

/// Parameter counts of a function signature.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ParameterCounts {
    required: u32,
    optional: u32,
    variadic: bool,
}

impl ParameterCounts {
    /// A parameter with a default or the variadic flag is optional.
    fn of(params: Option<&Node>) -> Self {
        let mut counts = Self::default();
        let params = params
            .into_iter()
            .flat_map(|params| params.child_nodes())
            .filter(|param| param.kind == NodeKind::Param);
        for param in params {
            if ParamFlags::from_bits_truncate(param.flags).contains(ParamFlags::VARIADIC) {
                counts.variadic = true;
                counts.optional += 1;
            } else if param.child(2).is_some_and(|default| !default.is_null()) {
                counts.optional += 1;
            } else {
                counts.required += 1;
            }
        }
        counts
    }
}

/// The node's own line, or the enclosing node's when the tree left it unset.
fn line_or(node: &Node, enclosing: &Node) -> u32 {
    if node.line > 0 { node.line } else { enclosing.line }
}
