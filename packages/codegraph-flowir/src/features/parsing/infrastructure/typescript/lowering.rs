//! Concrete syntax tree → AST lowering
//!
//! Type annotations are dropped; type-only declarations are skipped. Node
//! kinds without a lowering rule fail with `UnsupportedConstruct`.

use super::common::{field, has_token, named_children, node_text, node_to_span};
use super::node_kinds::{self as kinds, fields};
use crate::errors::{ExtractError, Result};
use crate::features::parsing::domain::{
    ClassDeclaration, ClassMember, Expression, ExpressionKind, FunctionDeclaration,
    ObjectProperty, Statement, StatementKind, VariableDeclarator,
};
use tree_sitter::Node;

/// Signatures without a body (overloads, abstract members)
const FUNCTION_SIGNATURE: &str = "function_signature";
const METHOD_SIGNATURE: &str = "method_signature";
const ABSTRACT_METHOD_SIGNATURE: &str = "abstract_method_signature";

/// Anonymous modifier tokens a method may carry that change its semantics
const UNSUPPORTED_METHOD_MODIFIERS: &[&str] = &["get", "set", "static", "async", "*"];

pub struct Lowering<'s> {
    source: &'s str,
}

impl<'s> Lowering<'s> {
    pub fn new(source: &'s str) -> Self {
        Self { source }
    }

    fn text(&self, node: &Node) -> &'s str {
        node_text(node, self.source)
    }

    fn unsupported(node: &Node) -> ExtractError {
        ExtractError::unsupported(node.kind(), Some(node_to_span(node)))
    }

    pub fn program(&self, root: &Node) -> Result<Vec<Statement>> {
        if root.kind() != kinds::PROGRAM {
            return Err(Self::unsupported(root));
        }
        self.statement_list(root)
    }

    fn statement_list(&self, node: &Node) -> Result<Vec<Statement>> {
        let mut statements = Vec::new();
        for child in named_children(node) {
            if let Some(stmt) = self.statement(&child)? {
                statements.push(stmt);
            }
        }
        Ok(statements)
    }

    /// `None` for statements with no runtime meaning
    fn statement(&self, node: &Node) -> Result<Option<Statement>> {
        let span = node_to_span(node);
        let kind = match node.kind() {
            kinds::EXPRESSION_STATEMENT => {
                let inner = named_children(node)
                    .into_iter()
                    .next()
                    .ok_or_else(|| ExtractError::malformed("empty expression statement", Some(span)))?;
                StatementKind::Expression(self.expression(&inner)?)
            }
            kinds::LEXICAL_DECLARATION | kinds::VARIABLE_DECLARATION => {
                StatementKind::VariableDeclaration(self.declarators(node)?)
            }
            kinds::FUNCTION_DECLARATION | FUNCTION_SIGNATURE => {
                StatementKind::FunctionDeclaration(self.function(node)?)
            }
            kinds::CLASS_DECLARATION => StatementKind::ClassDeclaration(self.class(node)?),
            kinds::IF_STATEMENT => {
                let condition = self.expression(&field(node, fields::CONDITION)?)?;
                let then_branch = self.required_statement(&field(node, fields::CONSEQUENCE)?)?;
                let else_branch = match node.child_by_field_name(fields::ALTERNATIVE) {
                    Some(alternative) => Some(Box::new(self.else_clause(&alternative)?)),
                    None => None,
                };
                StatementKind::If {
                    condition,
                    then_branch: Box::new(then_branch),
                    else_branch,
                }
            }
            kinds::WHILE_STATEMENT => StatementKind::While {
                condition: self.expression(&field(node, fields::CONDITION)?)?,
                body: Box::new(self.required_statement(&field(node, fields::BODY)?)?),
            },
            kinds::RETURN_STATEMENT => {
                let value = match named_children(node).first() {
                    Some(value) => Some(self.expression(value)?),
                    None => None,
                };
                StatementKind::Return(value)
            }
            kinds::STATEMENT_BLOCK => StatementKind::Block(self.statement_list(node)?),
            kinds::BREAK_STATEMENT | kinds::CONTINUE_STATEMENT => {
                if node.child_by_field_name(fields::LABEL).is_some() {
                    return Err(ExtractError::unsupported(
                        format!("labeled {}", node.kind()),
                        Some(span),
                    ));
                }
                if node.kind() == kinds::BREAK_STATEMENT {
                    StatementKind::Break
                } else {
                    StatementKind::Continue
                }
            }
            kinds::EMPTY_STATEMENT => StatementKind::Empty,
            kinds::INTERFACE_DECLARATION
            | kinds::TYPE_ALIAS_DECLARATION
            | kinds::AMBIENT_DECLARATION => return Ok(None),
            _ => return Err(Self::unsupported(node)),
        };
        Ok(Some(Statement::new(kind, span)))
    }

    /// Branch and loop bodies; a type-only declaration there becomes Empty
    fn required_statement(&self, node: &Node) -> Result<Statement> {
        Ok(self
            .statement(node)?
            .unwrap_or_else(|| Statement::new(StatementKind::Empty, node_to_span(node))))
    }

    fn else_clause(&self, node: &Node) -> Result<Statement> {
        if node.kind() != kinds::ELSE_CLAUSE {
            return self.required_statement(node);
        }
        let body = named_children(node)
            .into_iter()
            .next()
            .ok_or_else(|| ExtractError::malformed("else without statement", Some(node_to_span(node))))?;
        self.required_statement(&body)
    }

    fn declarators(&self, node: &Node) -> Result<Vec<VariableDeclarator>> {
        let mut declarators = Vec::new();
        for child in named_children(node) {
            if child.kind() != kinds::VARIABLE_DECLARATOR {
                continue;
            }
            let name = field(&child, fields::NAME)?;
            if name.kind() != kinds::IDENTIFIER {
                return Err(ExtractError::unsupported(
                    format!("destructuring {}", name.kind()),
                    Some(node_to_span(&name)),
                ));
            }
            let initializer = match child.child_by_field_name(fields::VALUE) {
                Some(value) => Some(self.expression(&value)?),
                None => None,
            };
            declarators.push(VariableDeclarator {
                name: self.text(&name).to_string(),
                initializer,
                span: node_to_span(&child),
            });
        }
        Ok(declarators)
    }

    fn function(&self, node: &Node) -> Result<FunctionDeclaration> {
        let name = field(node, fields::NAME)?;
        let body = match node.child_by_field_name(fields::BODY) {
            Some(body) => Some(self.statement_list(&body)?),
            None => None,
        };
        Ok(FunctionDeclaration {
            name: self.text(&name).to_string(),
            parameters: self.parameters(&field(node, fields::PARAMETERS)?)?,
            body,
            span: node_to_span(node),
        })
    }

    fn parameters(&self, node: &Node) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for param in named_children(node) {
            match param.kind() {
                kinds::REQUIRED_PARAMETER | kinds::OPTIONAL_PARAMETER => {
                    let pattern = field(&param, fields::PATTERN)?;
                    if pattern.kind() == kinds::THIS {
                        // `this: T` annotates the receiver and is not a parameter
                        continue;
                    }
                    if pattern.kind() != kinds::IDENTIFIER {
                        return Err(ExtractError::unsupported(
                            format!("parameter pattern {}", pattern.kind()),
                            Some(node_to_span(&pattern)),
                        ));
                    }
                    if param.child_by_field_name(fields::VALUE).is_some() {
                        return Err(ExtractError::unsupported(
                            "default parameter value",
                            Some(node_to_span(&param)),
                        ));
                    }
                    names.push(self.text(&pattern).to_string());
                }
                _ => return Err(Self::unsupported(&param)),
            }
        }
        Ok(names)
    }

    fn class(&self, node: &Node) -> Result<ClassDeclaration> {
        let name = field(node, fields::NAME)?;
        let body = field(node, fields::BODY)?;
        let mut members = Vec::new();
        for member in named_children(&body) {
            match member.kind() {
                kinds::METHOD_DEFINITION | METHOD_SIGNATURE | ABSTRACT_METHOD_SIGNATURE => {
                    if let Some(token) = UNSUPPORTED_METHOD_MODIFIERS
                        .iter()
                        .find(|t| has_token(&member, t))
                    {
                        return Err(ExtractError::unsupported(
                            format!("{} method", token),
                            Some(node_to_span(&member)),
                        ));
                    }
                    let decl = self.function(&member)?;
                    if decl.name == kinds::CONSTRUCTOR_NAME {
                        members.push(ClassMember::Constructor(decl));
                    } else {
                        members.push(ClassMember::Method(decl));
                    }
                }
                kinds::PUBLIC_FIELD_DEFINITION => {
                    if has_token(&member, "static") {
                        return Err(ExtractError::unsupported(
                            "static field",
                            Some(node_to_span(&member)),
                        ));
                    }
                    let name = field(&member, fields::NAME)?;
                    let initializer = match member.child_by_field_name(fields::VALUE) {
                        Some(value) => Some(self.expression(&value)?),
                        None => None,
                    };
                    members.push(ClassMember::Property {
                        name: self.text(&name).to_string(),
                        initializer,
                        span: node_to_span(&member),
                    });
                }
                _ => return Err(Self::unsupported(&member)),
            }
        }
        Ok(ClassDeclaration {
            name: self.text(&name).to_string(),
            members,
            span: node_to_span(node),
        })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Expressions
    // ═══════════════════════════════════════════════════════════════════

    pub fn expression(&self, node: &Node) -> Result<Expression> {
        let span = node_to_span(node);
        let boxed = |n: Node| -> Result<Box<Expression>> { Ok(Box::new(self.expression(&n)?)) };

        let kind = match node.kind() {
            kinds::NUMBER => ExpressionKind::Number(parse_number(self.text(node)).ok_or_else(
                || ExtractError::unsupported(format!("numeric literal {}", self.text(node)), Some(span)),
            )?),
            kinds::STRING => ExpressionKind::String(self.string_value(node)),
            kinds::TEMPLATE_STRING => {
                if named_children(node)
                    .iter()
                    .any(|c| c.kind() == kinds::TEMPLATE_SUBSTITUTION)
                {
                    return Err(ExtractError::unsupported("template substitution", Some(span)));
                }
                let raw = self.text(node);
                ExpressionKind::String(
                    raw.strip_prefix('`')
                        .and_then(|s| s.strip_suffix('`'))
                        .unwrap_or(raw)
                        .to_string(),
                )
            }
            kinds::TRUE => ExpressionKind::Boolean(true),
            kinds::FALSE => ExpressionKind::Boolean(false),
            kinds::NULL => ExpressionKind::Null,
            kinds::UNDEFINED => ExpressionKind::Undefined,
            kinds::IDENTIFIER => ExpressionKind::Identifier(self.text(node).to_string()),
            kinds::THIS => ExpressionKind::This,
            kinds::PARENTHESIZED_EXPRESSION => {
                let inner = named_children(node)
                    .into_iter()
                    .next()
                    .ok_or_else(|| ExtractError::malformed("empty parentheses", Some(span)))?;
                ExpressionKind::Parenthesized(boxed(inner)?)
            }
            kinds::AS_EXPRESSION
            | kinds::SATISFIES_EXPRESSION
            | kinds::NON_NULL_EXPRESSION
            | kinds::TYPE_ASSERTION => {
                // the runtime operand is the last named child of `<T>x`
                // and the first of `x as T`, `x satisfies T`, `x!`
                let children = named_children(node);
                let operand = if node.kind() == kinds::TYPE_ASSERTION {
                    children.last()
                } else {
                    children.first()
                };
                return match operand {
                    Some(operand) => self.expression(operand),
                    None => Err(ExtractError::malformed("empty type assertion", Some(span))),
                };
            }
            kinds::BINARY_EXPRESSION => ExpressionKind::Binary {
                operator: self.text(&field(node, fields::OPERATOR)?).to_string(),
                left: boxed(field(node, fields::LEFT)?)?,
                right: boxed(field(node, fields::RIGHT)?)?,
            },
            kinds::UNARY_EXPRESSION => ExpressionKind::Unary {
                operator: self.text(&field(node, fields::OPERATOR)?).to_string(),
                operand: boxed(field(node, fields::ARGUMENT)?)?,
            },
            kinds::ASSIGNMENT_EXPRESSION => ExpressionKind::Assignment {
                operator: "=".to_string(),
                target: boxed(field(node, fields::LEFT)?)?,
                value: boxed(field(node, fields::RIGHT)?)?,
            },
            kinds::AUGMENTED_ASSIGNMENT_EXPRESSION => ExpressionKind::Assignment {
                operator: self.text(&field(node, fields::OPERATOR)?).to_string(),
                target: boxed(field(node, fields::LEFT)?)?,
                value: boxed(field(node, fields::RIGHT)?)?,
            },
            kinds::UPDATE_EXPRESSION => {
                let operator = field(node, fields::OPERATOR)?;
                let argument = field(node, fields::ARGUMENT)?;
                ExpressionKind::Update {
                    operator: self.text(&operator).to_string(),
                    prefix: operator.start_byte() < argument.start_byte(),
                    target: boxed(argument)?,
                }
            }
            kinds::CALL_EXPRESSION => {
                self.reject_optional_chain(node)?;
                let arguments = field(node, fields::ARGUMENTS)?;
                if arguments.kind() == kinds::TEMPLATE_STRING {
                    return Err(ExtractError::unsupported("tagged template", Some(span)));
                }
                ExpressionKind::Call {
                    callee: boxed(field(node, fields::FUNCTION)?)?,
                    arguments: self.arguments(Some(arguments))?,
                }
            }
            kinds::NEW_EXPRESSION => ExpressionKind::New {
                callee: boxed(field(node, fields::CONSTRUCTOR)?)?,
                arguments: self.arguments(node.child_by_field_name(fields::ARGUMENTS))?,
            },
            kinds::MEMBER_EXPRESSION => {
                self.reject_optional_chain(node)?;
                let property = field(node, fields::PROPERTY)?;
                if property.kind() != kinds::PROPERTY_IDENTIFIER {
                    return Err(Self::unsupported(&property));
                }
                ExpressionKind::PropertyAccess {
                    object: boxed(field(node, fields::OBJECT)?)?,
                    property: self.text(&property).to_string(),
                }
            }
            kinds::SUBSCRIPT_EXPRESSION => {
                self.reject_optional_chain(node)?;
                ExpressionKind::ElementAccess {
                    object: boxed(field(node, fields::OBJECT)?)?,
                    index: boxed(field(node, fields::INDEX)?)?,
                }
            }
            kinds::ARRAY => {
                let mut elements = Vec::new();
                for element in named_children(node) {
                    elements.push(self.expression(&element)?);
                }
                ExpressionKind::ArrayLiteral(elements)
            }
            kinds::OBJECT => ExpressionKind::ObjectLiteral(self.object_properties(node)?),
            _ => return Err(Self::unsupported(node)),
        };
        Ok(Expression::new(kind, span))
    }

    fn reject_optional_chain(&self, node: &Node) -> Result<()> {
        let optional = (0..node.child_count())
            .filter_map(|i| node.child(i))
            .any(|c| c.kind() == kinds::OPTIONAL_CHAIN);
        if optional {
            Err(ExtractError::unsupported("optional chaining", Some(node_to_span(node))))
        } else {
            Ok(())
        }
    }

    fn arguments(&self, node: Option<Node>) -> Result<Vec<Expression>> {
        let Some(node) = node else {
            return Ok(Vec::new());
        };
        named_children(&node)
            .iter()
            .map(|arg| self.expression(arg))
            .collect()
    }

    fn object_properties(&self, node: &Node) -> Result<Vec<ObjectProperty>> {
        let mut properties = Vec::new();
        for child in named_children(node) {
            let span = node_to_span(&child);
            match child.kind() {
                kinds::PAIR => {
                    let key = field(&child, fields::KEY)?;
                    let key = match key.kind() {
                        kinds::PROPERTY_IDENTIFIER | kinds::NUMBER => self.text(&key).to_string(),
                        kinds::STRING => self.string_value(&key),
                        _ => return Err(Self::unsupported(&key)),
                    };
                    properties.push(ObjectProperty {
                        key,
                        value: self.expression(&field(&child, fields::VALUE)?)?,
                        span,
                    });
                }
                kinds::SHORTHAND_PROPERTY_IDENTIFIER => {
                    let name = self.text(&child).to_string();
                    properties.push(ObjectProperty {
                        key: name.clone(),
                        value: Expression::new(ExpressionKind::Identifier(name), span),
                        span,
                    });
                }
                _ => return Err(Self::unsupported(&child)),
            }
        }
        Ok(properties)
    }

    /// Contents of a quoted string with escapes decoded
    fn string_value(&self, node: &Node) -> String {
        let mut value = String::new();
        for part in named_children(node) {
            match part.kind() {
                kinds::STRING_FRAGMENT => value.push_str(self.text(&part)),
                kinds::ESCAPE_SEQUENCE => value.push_str(&unescape(self.text(&part))),
                _ => {}
            }
        }
        value
    }
}

/// Decimal, hex, octal and binary literals with `_` separators; BigInt
/// literals are rejected
fn parse_number(text: &str) -> Option<f64> {
    if text.ends_with('n') {
        return None;
    }
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();
    let radix = |digits: &str, radix: u32| u64::from_str_radix(digits, radix).ok().map(|v| v as f64);
    if let Some(hex) = lower.strip_prefix("0x") {
        radix(hex, 16)
    } else if let Some(oct) = lower.strip_prefix("0o") {
        radix(oct, 8)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        radix(bin, 2)
    } else if lower.starts_with('.') {
        format!("0{}", lower).parse().ok()
    } else {
        lower.parse().ok()
    }
}

fn unescape(sequence: &str) -> String {
    let body = sequence.strip_prefix('\\').unwrap_or(sequence);
    match body {
        "n" => "\n".to_string(),
        "t" => "\t".to_string(),
        "r" => "\r".to_string(),
        "0" => "\0".to_string(),
        "b" => "\u{8}".to_string(),
        "f" => "\u{c}".to_string(),
        "v" => "\u{b}".to_string(),
        _ => {
            let code = body
                .strip_prefix("u{")
                .and_then(|s| s.strip_suffix('}'))
                .or_else(|| body.strip_prefix('u'))
                .or_else(|| body.strip_prefix('x'));
            match code.and_then(|hex| u32::from_str_radix(hex, 16).ok()).and_then(char::from_u32) {
                Some(c) => c.to_string(),
                // line continuations and identity escapes (`\"`, `\\`)
                None => body.trim_start_matches(['\r', '\n']).to_string(),
            }
        }
    }
}
