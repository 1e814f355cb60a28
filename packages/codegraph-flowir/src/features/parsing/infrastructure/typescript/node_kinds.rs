//! TypeScript tree-sitter node kinds and field names
//!
//! These constants match the node type names of the tree-sitter-typescript
//! grammar.

// Program structure
pub const PROGRAM: &str = "program";
pub const STATEMENT_BLOCK: &str = "statement_block";

// Declarations
pub const FUNCTION_DECLARATION: &str = "function_declaration";
pub const CLASS_DECLARATION: &str = "class_declaration";
pub const LEXICAL_DECLARATION: &str = "lexical_declaration";
pub const VARIABLE_DECLARATION: &str = "variable_declaration";
pub const VARIABLE_DECLARATOR: &str = "variable_declarator";

// Type-only declarations, erased at runtime
pub const INTERFACE_DECLARATION: &str = "interface_declaration";
pub const TYPE_ALIAS_DECLARATION: &str = "type_alias_declaration";
pub const AMBIENT_DECLARATION: &str = "ambient_declaration";

// Class members
pub const CLASS_BODY: &str = "class_body";
pub const METHOD_DEFINITION: &str = "method_definition";
pub const PUBLIC_FIELD_DEFINITION: &str = "public_field_definition";
pub const CONSTRUCTOR_NAME: &str = "constructor";

// Parameters
pub const REQUIRED_PARAMETER: &str = "required_parameter";
pub const OPTIONAL_PARAMETER: &str = "optional_parameter";

// Statements
pub const EXPRESSION_STATEMENT: &str = "expression_statement";
pub const IF_STATEMENT: &str = "if_statement";
pub const ELSE_CLAUSE: &str = "else_clause";
pub const WHILE_STATEMENT: &str = "while_statement";
pub const RETURN_STATEMENT: &str = "return_statement";
pub const BREAK_STATEMENT: &str = "break_statement";
pub const CONTINUE_STATEMENT: &str = "continue_statement";
pub const EMPTY_STATEMENT: &str = "empty_statement";

// Expressions
pub const IDENTIFIER: &str = "identifier";
pub const THIS: &str = "this";
pub const NUMBER: &str = "number";
pub const STRING: &str = "string";
pub const STRING_FRAGMENT: &str = "string_fragment";
pub const ESCAPE_SEQUENCE: &str = "escape_sequence";
pub const TEMPLATE_STRING: &str = "template_string";
pub const TEMPLATE_SUBSTITUTION: &str = "template_substitution";
pub const TRUE: &str = "true";
pub const FALSE: &str = "false";
pub const NULL: &str = "null";
pub const UNDEFINED: &str = "undefined";
pub const PARENTHESIZED_EXPRESSION: &str = "parenthesized_expression";
pub const BINARY_EXPRESSION: &str = "binary_expression";
pub const UNARY_EXPRESSION: &str = "unary_expression";
pub const ASSIGNMENT_EXPRESSION: &str = "assignment_expression";
pub const AUGMENTED_ASSIGNMENT_EXPRESSION: &str = "augmented_assignment_expression";
pub const UPDATE_EXPRESSION: &str = "update_expression";
pub const CALL_EXPRESSION: &str = "call_expression";
pub const NEW_EXPRESSION: &str = "new_expression";
pub const MEMBER_EXPRESSION: &str = "member_expression";
pub const SUBSCRIPT_EXPRESSION: &str = "subscript_expression";
pub const ARRAY: &str = "array";
pub const OBJECT: &str = "object";
pub const PAIR: &str = "pair";
pub const SHORTHAND_PROPERTY_IDENTIFIER: &str = "shorthand_property_identifier";
pub const PROPERTY_IDENTIFIER: &str = "property_identifier";
pub const OPTIONAL_CHAIN: &str = "optional_chain";

// Type-level wrappers around a runtime expression
pub const AS_EXPRESSION: &str = "as_expression";
pub const SATISFIES_EXPRESSION: &str = "satisfies_expression";
pub const NON_NULL_EXPRESSION: &str = "non_null_expression";
pub const TYPE_ASSERTION: &str = "type_assertion";

// Error recovery
pub const ERROR: &str = "ERROR";

/// Field names used by the lowering
pub mod fields {
    pub const NAME: &str = "name";
    pub const PARAMETERS: &str = "parameters";
    pub const BODY: &str = "body";
    pub const PATTERN: &str = "pattern";
    pub const VALUE: &str = "value";
    pub const CONDITION: &str = "condition";
    pub const CONSEQUENCE: &str = "consequence";
    pub const ALTERNATIVE: &str = "alternative";
    pub const LEFT: &str = "left";
    pub const RIGHT: &str = "right";
    pub const OPERATOR: &str = "operator";
    pub const ARGUMENT: &str = "argument";
    pub const FUNCTION: &str = "function";
    pub const ARGUMENTS: &str = "arguments";
    pub const CONSTRUCTOR: &str = "constructor";
    pub const OBJECT: &str = "object";
    pub const PROPERTY: &str = "property";
    pub const INDEX: &str = "index";
    pub const KEY: &str = "key";
    pub const LABEL: &str = "label";
}
