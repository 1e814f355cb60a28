//! TypeScript front-end
//!
//! Parses with tree-sitter-typescript and lowers the concrete syntax tree
//! into a [`SourceUnit`]. A parser is created per call, so the front-end is
//! `Send + Sync` and can be shared across rayon workers.

pub mod common;
mod lowering;
pub mod node_kinds;

use crate::errors::{ExtractError, Result};
use crate::features::parsing::domain::SourceUnit;
use crate::features::parsing::ports::SourceFrontend;
use common::{first_syntax_error, node_to_span};
use lowering::Lowering;
use std::path::Path;
use tree_sitter::Parser as TSParser;

/// Grammar variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    TypeScript,
    Tsx,
}

impl Dialect {
    /// `.tsx`/`.jsx` use the TSX grammar, everything else plain TypeScript
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("tsx") | Some("jsx") => Dialect::Tsx,
            _ => Dialect::TypeScript,
        }
    }

    fn language(self) -> tree_sitter::Language {
        match self {
            Dialect::TypeScript => tree_sitter_typescript::language_typescript(),
            Dialect::Tsx => tree_sitter_typescript::language_tsx(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptFrontend {
    dialect: Dialect,
}

impl TypeScriptFrontend {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn for_path(path: &Path) -> Self {
        Self::new(Dialect::for_path(path))
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }
}

impl SourceFrontend for TypeScriptFrontend {
    fn parse(&self, source: &str, file_path: &str) -> Result<SourceUnit> {
        let mut parser = TSParser::new();
        parser
            .set_language(&self.dialect.language())
            .map_err(|e| ExtractError::parse_error(format!("failed to load grammar: {}", e)))?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ExtractError::parse_error(format!("{}: parser returned no tree", file_path)))?;

        let root = tree.root_node();
        if let Some(error) = first_syntax_error(&root) {
            let span = node_to_span(&error);
            let what = if error.is_missing() {
                format!("missing {}", error.kind())
            } else {
                "syntax error".to_string()
            };
            return Err(ExtractError::parse_error(format!("{}:{}: {}", file_path, span, what)));
        }

        let statements = Lowering::new(source).program(&root)?;
        tracing::debug!(
            file = file_path,
            statements = statements.len(),
            "source lowered"
        );
        Ok(SourceUnit::new(file_path, statements))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext, "ts" | "tsx" | "js" | "jsx" | "mts" | "cts" | "mjs" | "cjs")
    }

    fn language_name(&self) -> &'static str {
        match self.dialect {
            Dialect::TypeScript => "typescript",
            Dialect::Tsx => "tsx",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::features::parsing::domain::{ClassMember, ExpressionKind, StatementKind};

    fn parse(source: &str) -> Result<SourceUnit> {
        TypeScriptFrontend::default().parse(source, "test.ts")
    }

    #[test]
    fn test_lowers_function_and_call() {
        let unit = parse("function add(a: number, b: number): number { return a + b; }\nadd(1, 2);").unwrap();
        assert_eq!(unit.statements.len(), 2);
        match &unit.statements[0].kind {
            StatementKind::FunctionDeclaration(f) => {
                assert_eq!(f.name, "add");
                assert_eq!(f.parameters, vec!["a", "b"]);
                assert_eq!(f.body.as_ref().map(Vec::len), Some(1));
            }
            other => panic!("expected function, got {:?}", other),
        }
        match &unit.statements[1].kind {
            StatementKind::Expression(e) => {
                assert!(matches!(&e.kind, ExpressionKind::Call { arguments, .. } if arguments.len() == 2));
            }
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_span_is_one_indexed() {
        let unit = parse("\n  let x = 1;").unwrap();
        assert_eq!(unit.statements[0].span.start_line, 2);
        assert_eq!(unit.statements[0].span.start_col, 3);
    }

    #[test]
    fn test_if_else_and_while() {
        let unit = parse("let i = 0; while (i < 3) { if (i == 1) { i = i + 2; } else i++; }").unwrap();
        let StatementKind::While { body, .. } = &unit.statements[1].kind else {
            panic!("expected while");
        };
        let StatementKind::Block(inner) = &body.kind else {
            panic!("expected block body");
        };
        assert!(matches!(
            &inner[0].kind,
            StatementKind::If { else_branch: Some(_), .. }
        ));
    }

    #[test]
    fn test_class_members() {
        let unit = parse(
            "class P { x = 1; constructor(v) { this.x = v; } value() { return this.x; } }",
        )
        .unwrap();
        let StatementKind::ClassDeclaration(class) = &unit.statements[0].kind else {
            panic!("expected class");
        };
        assert_eq!(class.name, "P");
        assert!(matches!(class.members[0], ClassMember::Property { .. }));
        assert!(matches!(class.members[1], ClassMember::Constructor(_)));
        assert!(matches!(class.members[2], ClassMember::Method(_)));
    }

    #[test]
    fn test_type_only_declarations_are_skipped() {
        let unit = parse("interface I { a: number }\ntype T = string;\nlet v = 1 as number;").unwrap();
        assert_eq!(unit.statements.len(), 1);
    }

    #[test]
    fn test_strings_decode_escapes() {
        let unit = parse("let s = \"a\\tb\";").unwrap();
        let StatementKind::VariableDeclaration(decls) = &unit.statements[0].kind else {
            panic!("expected declaration");
        };
        let init = decls[0].initializer.as_ref().unwrap();
        assert_eq!(init.kind, ExpressionKind::String("a\tb".to_string()));
    }

    #[test]
    fn test_unsupported_node_kind() {
        let err = parse("for (let i = 0; i < 3; i++) {}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedConstruct);
        assert!(err.to_string().contains("for_statement"));
    }

    #[test]
    fn test_template_substitution_rejected() {
        let err = parse("let s = `a${1}`;").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedConstruct);
        assert!(parse("let s = `plain`;").is_ok());
    }

    #[test]
    fn test_syntax_error_reports_position() {
        let err = parse("let = ;").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("test.ts:1:"));
    }

    #[test]
    fn test_dialect_for_path() {
        assert_eq!(Dialect::for_path(Path::new("a/b.tsx")), Dialect::Tsx);
        assert_eq!(Dialect::for_path(Path::new("a/b.ts")), Dialect::TypeScript);
        assert!(TypeScriptFrontend::default().supports_extension("js"));
        assert!(!TypeScriptFrontend::default().supports_extension("py"));
    }
}
