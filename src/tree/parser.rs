use crate::tree::errors::ParseError;
use crate::tree::kind::TreeKind;
use crate::tree::path::named_children;
use ast_grep_language::{LanguageExt, SupportLang};
use tree_sitter::{Node, Parser, Tree};

/// Tree-sitter parser wrapper for Java source code.
pub struct JavaParser {
    parser: Parser,
}

impl JavaParser {
    /// Create a new Java parser.
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        // Get the tree-sitter Language from ast-grep-language
        let ts_lang = SupportLang::Java.get_ts_language();
        parser
            .set_language(&ts_lang)
            .map_err(|_| ParseError::LanguageSet)?;

        Ok(Self { parser })
    }

    /// Parse source code into a tree-sitter Tree.
    pub fn parse(&mut self, source: &str) -> Result<Tree, ParseError> {
        self.parser
            .parse(source, None)
            .ok_or(ParseError::ParseFailed)
    }

    /// Parse source code and return the tree along with the source.
    pub fn parse_with_source<'a>(
        &mut self,
        source: &'a str,
    ) -> Result<ParsedSource<'a>, ParseError> {
        let tree = self.parse(source)?;
        Ok(ParsedSource { source, tree })
    }
}

/// A parsed compilation unit: one source file with its tree-sitter tree.
pub struct ParsedSource<'a> {
    pub source: &'a str,
    pub tree: Tree,
}

impl<'a> ParsedSource<'a> {
    /// Get the root node of the tree.
    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Check if the tree contains any ERROR nodes.
    pub fn has_errors(&self) -> bool {
        has_error_nodes(self.tree.root_node())
    }

    /// Get all ERROR nodes in the tree.
    pub fn error_nodes(&self) -> Vec<ErrorNode> {
        let mut errors = Vec::new();
        collect_error_nodes(self.tree.root_node(), &mut errors);
        errors
    }

    /// Extract text for a node's byte range.
    pub fn node_text(&self, node: Node<'_>) -> &'a str {
        &self.source[node.byte_range()]
    }

    /// The name of this unit's package, or `None` for the unnamed package.
    pub fn package_name(&self) -> Option<&'a str> {
        let package = named_children(self.root_node())
            .find(|n| TreeKind::from_node(*n) == Some(TreeKind::Package))?;
        self.declared_name(package)
    }

    /// The declared name of a node, where the grammar gives it one.
    ///
    /// Declarations carry their name in the `name` field. Field and local
    /// variable declarations answer with their first declarator's name;
    /// package declarations with the (possibly qualified) package name.
    pub fn declared_name(&self, node: Node<'_>) -> Option<&'a str> {
        match TreeKind::from_node(node) {
            Some(TreeKind::Package) => named_children(node)
                .find(|n| matches!(n.kind(), "identifier" | "scoped_identifier"))
                .map(|n| self.node_text(n)),
            Some(TreeKind::Field) | Some(TreeKind::LocalVariable) => {
                let declarator = node.child_by_field_name("declarator")?;
                self.declared_name(declarator)
            }
            Some(TreeKind::TypeParameter) => named_children(node)
                .find(|n| matches!(n.kind(), "type_identifier" | "identifier"))
                .map(|n| self.node_text(n)),
            _ => node
                .child_by_field_name("name")
                .map(|n| self.node_text(n)),
        }
    }
}

/// Information about an ERROR node in the parse tree.
#[derive(Debug, Clone)]
pub struct ErrorNode {
    pub byte_start: usize,
    pub byte_end: usize,
    pub start_point: tree_sitter::Point,
    pub end_point: tree_sitter::Point,
}

fn has_error_nodes(node: Node<'_>) -> bool {
    if node.is_error() || node.is_missing() {
        return true;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if has_error_nodes(child) {
            return true;
        }
    }

    false
}

fn collect_error_nodes(node: Node<'_>, errors: &mut Vec<ErrorNode>) {
    if node.is_error() || node.is_missing() {
        errors.push(ErrorNode {
            byte_start: node.start_byte(),
            byte_end: node.end_byte(),
            start_point: node.start_position(),
            end_point: node.end_position(),
        });
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_error_nodes(child, errors);
    }
}
