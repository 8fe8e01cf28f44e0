use crate::error::Span;

/// Expression tree with values computed during parsing.
///
/// Children are owned exclusively by their parent and every node's `value`
/// is fixed when the node is built; nothing walks the tree to evaluate it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Leaf {
        value: f64,
        span: Span,
    },
    BinaryOp {
        operator: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        value: f64,
        span: Span,
    },
}

impl Expr {
    pub fn value(&self) -> f64 {
        match self {
            Expr::Leaf { value, .. } => *value,
            Expr::BinaryOp { value, .. } => *value,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Expr::Leaf { span, .. } => *span,
            Expr::BinaryOp { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Subtract => '-',
            BinaryOp::Multiply => '*',
            BinaryOp::Divide => '/',
        }
    }

    /// Plain IEEE 754 arithmetic; infinities and NaN pass through.
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOp::Add => left + right,
            BinaryOp::Subtract => left - right,
            BinaryOp::Multiply => left * right,
            BinaryOp::Divide => left / right,
        }
    }
}
