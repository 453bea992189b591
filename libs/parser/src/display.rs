//! Human-readable tree rendering, used by the driver's verbose flag.

use crate::tree_node::{AssignmentExpression, BinaryExpression, Expression};

/// Renders the expression tree as an indented multi-line diagram
pub fn render(expr: &Expression) -> String {
    let mut out = String::new();
    render_node(expr, "", "", &mut out);
    out
}

fn label(expr: &Expression) -> String {
    match expr {
        Expression::Number(n) => n.to_string(),
        Expression::Variable(name) => name.clone(),
        Expression::Binary(BinaryExpression::Add(..)) => String::from("+"),
        Expression::Binary(BinaryExpression::Subtract(..)) => String::from("-"),
        Expression::Binary(BinaryExpression::Multiply(..)) => String::from("*"),
        Expression::Binary(BinaryExpression::Divide(..)) => String::from("/"),
        Expression::Assignment(AssignmentExpression { identifier, .. }) => {
            format!("{} =", identifier)
        }
        Expression::Declaration(name, _) => format!("var {}", name),
        Expression::Block(_) => String::from("block"),
        Expression::Return(_) => String::from("return"),
        Expression::If(_) => String::from("if"),
        Expression::Undefined => String::from("undefined"),
    }
}

fn render_node(expr: &Expression, prefix: &str, child_prefix: &str, out: &mut String) {
    out.push_str(prefix);
    out.push_str(&label(expr));
    out.push('\n');

    let children = expr.children();
    let last = children.len().saturating_sub(1);

    for (index, child) in children.iter().enumerate() {
        if index == last {
            render_node(
                child,
                &format!("{}└── ", child_prefix),
                &format!("{}    ", child_prefix),
                out,
            );
        } else {
            render_node(
                child,
                &format!("{}├── ", child_prefix),
                &format!("{}│   ", child_prefix),
                out,
            );
        }
    }
}
