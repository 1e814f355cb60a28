//! Source operator tokens → IR operator tags

use crate::features::ir_graph::{BinaryOperator, UnaryOperator};

pub fn binary_operator(token: &str) -> Option<BinaryOperator> {
    use BinaryOperator::*;
    let op = match token {
        "+" => Add,
        "-" => Sub,
        "*" => Mul,
        "/" => Div,
        "%" => Mod,
        "<" => Less,
        ">" => Greater,
        "<=" => LessEq,
        ">=" => GreaterEq,
        "==" => Eq,
        "!=" => NotEq,
        "===" => StrictEq,
        "!==" => StrictNotEq,
        "&&" => And,
        "||" => Or,
        "&" => BitAnd,
        "|" => BitOr,
        "^" => BitXor,
        "<<" => Shl,
        ">>" => Shr,
        ">>>" => UShr,
        _ => return None,
    };
    Some(op)
}

pub fn unary_operator(token: &str) -> Option<UnaryOperator> {
    match token {
        "+" => Some(UnaryOperator::Plus),
        "-" => Some(UnaryOperator::Minus),
        "!" => Some(UnaryOperator::Not),
        _ => None,
    }
}

/// Binary operator applied by a compound assignment (`+=` → `+`)
pub fn compound_assignment_operator(token: &str) -> Option<BinaryOperator> {
    match token.strip_suffix('=') {
        Some(base) if !base.is_empty() && !matches!(base, "=" | "!" | "<" | ">" | "==" | "!=") => {
            binary_operator(base).filter(|op| {
                !matches!(op, BinaryOperator::And | BinaryOperator::Or)
            })
        }
        _ => None,
    }
}

/// Binary operator applied by `++` / `--`
pub fn update_operator(token: &str) -> Option<BinaryOperator> {
    match token {
        "++" => Some(BinaryOperator::Add),
        "--" => Some(BinaryOperator::Sub),
        _ => None,
    }
}
