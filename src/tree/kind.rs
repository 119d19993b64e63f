use std::fmt;

use tree_sitter::Node;

/// Typed syntactic-kind tag for the Java constructs the matcher
/// distinguishes.
///
/// Each variant maps to one grammar kind of the tree-sitter Java grammar.
/// Nodes of any other grammar kind (expressions, statements, literals)
/// never carry a `TreeKind` and can only be reached through the untyped
/// parts of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeKind {
    CompilationUnit,
    Package,
    Import,
    Class,
    Interface,
    Enum,
    Record,
    AnnotationType,
    Method,
    Constructor,
    Field,
    Parameter,
    SpreadParameter,
    ReceiverParameter,
    LocalVariable,
    Variable,
    Cast,
    NewObject,
    InstanceOf,
    TypeParameter,
    TypeBound,
    TypeArguments,
    Wildcard,
    ArrayType,
    GenericType,
    AnnotatedType,
}

impl TreeKind {
    /// Map a grammar kind string to a `TreeKind`.
    pub fn from_grammar(kind: &str) -> Option<Self> {
        match kind {
            "program" => Some(TreeKind::CompilationUnit),
            "package_declaration" => Some(TreeKind::Package),
            "import_declaration" => Some(TreeKind::Import),
            "class_declaration" => Some(TreeKind::Class),
            "interface_declaration" => Some(TreeKind::Interface),
            "enum_declaration" => Some(TreeKind::Enum),
            "record_declaration" => Some(TreeKind::Record),
            "annotation_type_declaration" => Some(TreeKind::AnnotationType),
            "method_declaration" => Some(TreeKind::Method),
            "constructor_declaration" => Some(TreeKind::Constructor),
            "field_declaration" => Some(TreeKind::Field),
            "formal_parameter" => Some(TreeKind::Parameter),
            "spread_parameter" => Some(TreeKind::SpreadParameter),
            "receiver_parameter" => Some(TreeKind::ReceiverParameter),
            "local_variable_declaration" => Some(TreeKind::LocalVariable),
            "variable_declarator" => Some(TreeKind::Variable),
            "cast_expression" => Some(TreeKind::Cast),
            "object_creation_expression" => Some(TreeKind::NewObject),
            "instanceof_expression" => Some(TreeKind::InstanceOf),
            "type_parameter" => Some(TreeKind::TypeParameter),
            "type_bound" => Some(TreeKind::TypeBound),
            "type_arguments" => Some(TreeKind::TypeArguments),
            "wildcard" => Some(TreeKind::Wildcard),
            "array_type" => Some(TreeKind::ArrayType),
            "generic_type" => Some(TreeKind::GenericType),
            "annotated_type" => Some(TreeKind::AnnotatedType),
            _ => None,
        }
    }

    /// Classify a tree node.
    pub fn from_node(node: Node<'_>) -> Option<Self> {
        Self::from_grammar(node.kind())
    }

    /// The grammar kind string this tag corresponds to.
    pub fn grammar_kind(&self) -> &'static str {
        match self {
            TreeKind::CompilationUnit => "program",
            TreeKind::Package => "package_declaration",
            TreeKind::Import => "import_declaration",
            TreeKind::Class => "class_declaration",
            TreeKind::Interface => "interface_declaration",
            TreeKind::Enum => "enum_declaration",
            TreeKind::Record => "record_declaration",
            TreeKind::AnnotationType => "annotation_type_declaration",
            TreeKind::Method => "method_declaration",
            TreeKind::Constructor => "constructor_declaration",
            TreeKind::Field => "field_declaration",
            TreeKind::Parameter => "formal_parameter",
            TreeKind::SpreadParameter => "spread_parameter",
            TreeKind::ReceiverParameter => "receiver_parameter",
            TreeKind::LocalVariable => "local_variable_declaration",
            TreeKind::Variable => "variable_declarator",
            TreeKind::Cast => "cast_expression",
            TreeKind::NewObject => "object_creation_expression",
            TreeKind::InstanceOf => "instanceof_expression",
            TreeKind::TypeParameter => "type_parameter",
            TreeKind::TypeBound => "type_bound",
            TreeKind::TypeArguments => "type_arguments",
            TreeKind::Wildcard => "wildcard",
            TreeKind::ArrayType => "array_type",
            TreeKind::GenericType => "generic_type",
            TreeKind::AnnotatedType => "annotated_type",
        }
    }

    /// Returns true for class, interface, enum, record, and annotation
    /// type declarations.
    pub fn is_class_like(self) -> bool {
        matches!(
            self,
            TreeKind::Class
                | TreeKind::Interface
                | TreeKind::Enum
                | TreeKind::Record
                | TreeKind::AnnotationType
        )
    }

    /// Returns true for method and constructor declarations.
    pub fn is_method_like(self) -> bool {
        matches!(self, TreeKind::Method | TreeKind::Constructor)
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TreeKind::CompilationUnit => "compilation unit",
            TreeKind::Package => "package declaration",
            TreeKind::Import => "import declaration",
            TreeKind::Class => "class",
            TreeKind::Interface => "interface",
            TreeKind::Enum => "enum",
            TreeKind::Record => "record",
            TreeKind::AnnotationType => "annotation type",
            TreeKind::Method => "method",
            TreeKind::Constructor => "constructor",
            TreeKind::Field => "field declaration",
            TreeKind::Parameter => "parameter",
            TreeKind::SpreadParameter => "varargs parameter",
            TreeKind::ReceiverParameter => "receiver parameter",
            TreeKind::LocalVariable => "local variable declaration",
            TreeKind::Variable => "variable declarator",
            TreeKind::Cast => "cast",
            TreeKind::NewObject => "object creation",
            TreeKind::InstanceOf => "instanceof",
            TreeKind::TypeParameter => "type parameter",
            TreeKind::TypeBound => "type bound",
            TreeKind::TypeArguments => "type arguments",
            TreeKind::Wildcard => "wildcard",
            TreeKind::ArrayType => "array type",
            TreeKind::GenericType => "generic type",
            TreeKind::AnnotatedType => "annotated type",
        })
    }
}
