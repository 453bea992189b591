use std::collections::BTreeSet;

#[derive(Debug, PartialEq, Eq)]
pub enum BinaryExpression {
    Add(Box<Expression>, Box<Expression>),
    Subtract(Box<Expression>, Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    Divide(Box<Expression>, Box<Expression>),
}

impl BinaryExpression {
    /// The operand pair, in left/right source order
    pub fn operands(&self) -> (&Expression, &Expression) {
        match self {
            BinaryExpression::Add(l, r)
            | BinaryExpression::Subtract(l, r)
            | BinaryExpression::Multiply(l, r)
            | BinaryExpression::Divide(l, r) => (l, r),
        }
    }
}

impl std::fmt::Display for BinaryExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryExpression::Add(l, r) => write!(f, "({} + {})", l, r),
            BinaryExpression::Subtract(l, r) => write!(f, "({} - {})", l, r),
            BinaryExpression::Multiply(l, r) => write!(f, "({} * {})", l, r),
            BinaryExpression::Divide(l, r) => write!(f, "({} / {})", l, r),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct AssignmentExpression {
    pub identifier: String,
    pub expression: Box<Expression>,
}

impl std::fmt::Display for AssignmentExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} = {})", self.identifier, self.expression)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct BlockExpression(pub Vec<Expression>);

impl std::fmt::Display for BlockExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ {}; }}",
            self.0
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<String>>()
                .join("; ")
        )
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct IfExpression {
    pub condition: Box<Expression>,
    pub body: Box<Expression>,
    pub else_branch: Option<Box<Expression>>,
}

impl std::fmt::Display for IfExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(if ({}) {}", self.condition, self.body)?;
        if let Some(else_branch) = &self.else_branch {
            write!(f, " else {}", else_branch)?;
        }
        write!(f, ")")
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Expression {
    Number(i32),
    Variable(String),
    Binary(BinaryExpression),
    Assignment(AssignmentExpression),
    Declaration(String, Box<Expression>),
    Block(BlockExpression),
    Return(Box<Expression>),
    If(IfExpression),
    Undefined,
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Number(n) => write!(f, "{}", n),
            Expression::Variable(id) => write!(f, "{}", id),
            Expression::Binary(e) => write!(f, "{}", e),
            Expression::Assignment(e) => write!(f, "{}", e),
            Expression::Declaration(id, e) => write!(f, "(var {} = {})", id, e),
            Expression::Block(e) => write!(f, "{}", e),
            Expression::Return(e) => write!(f, "(return {})", e),
            Expression::If(e) => write!(f, "{}", e),
            Expression::Undefined => write!(f, "undefined"),
        }
    }
}

impl Expression {
    /// Ordered read-only view of this node's sub-expressions. Bound names
    /// (assignment targets, declaration names) are payload, not children.
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Expression::Number(_) | Expression::Variable(_) | Expression::Undefined => Vec::new(),
            Expression::Binary(bin) => {
                let (l, r) = bin.operands();
                vec![l, r]
            }
            Expression::Assignment(assign) => vec![&*assign.expression],
            Expression::Declaration(_, value) => vec![&**value],
            Expression::Block(block) => block.0.iter().collect(),
            Expression::Return(value) => vec![&**value],
            Expression::If(if_expr) => {
                let mut children = vec![&*if_expr.condition, &*if_expr.body];
                if let Some(else_branch) = &if_expr.else_branch {
                    children.push(&**else_branch);
                }
                children
            }
        }
    }

    /// Pre-order traversal: visits this node, then each child in order
    pub fn visit<'a>(&'a self, visitor: &mut impl FnMut(&'a Expression)) {
        visitor(self);
        for child in self.children() {
            child.visit(visitor);
        }
    }

    /// The distinct variable names introduced by declarations anywhere in
    /// this tree. `BTreeSet` iteration yields them in lexicographic order,
    /// which fixes stack-slot assignment for the compiler.
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut vars = BTreeSet::new();
        self.visit(&mut |e| {
            if let Expression::Declaration(name, _) = e {
                vars.insert(name.as_str());
            }
        });
        vars
    }
}
