use std::rc::Rc;

/// A location in the source text.
///
/// Lines and columns are 1-based. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// The source line.
    pub line:   usize,
    /// The column within the line.
    pub column: usize,
}

impl Position {
    /// Creates a position from a line and a column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the raw constants that can appear directly in source
/// code. Array literals are expressions, since their elements are evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Float(f64),
    /// A string literal with escapes already resolved.
    String(String),
    /// A boolean literal, spelled by the lexicon's `TRUE`/`FALSE` tokens.
    Bool(bool),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Every variant records the position of the token that introduced it, which
/// runtime errors report back to the harness.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal {
        /// The constant value.
        value:    LiteralValue,
        /// Position in the source code.
        position: Position,
    },
    /// Reference to a binding by name.
    Identifier {
        /// Name of the binding.
        name:     String,
        /// Position in the source code.
        position: Position,
    },
    /// A unary operation (negation, logical or bitwise not).
    Unary {
        /// The unary operator to apply.
        op:       UnaryOperator,
        /// The operand expression.
        expr:     Box<Self>,
        /// Position in the source code.
        position: Position,
    },
    /// A binary operation.
    Binary {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Position of the operator.
        position: Position,
    },
    /// `condition ? then_expr : else_expr`
    Ternary {
        /// The condition, tested for truthiness.
        condition: Box<Self>,
        /// Value when the condition is truthy.
        then_expr: Box<Self>,
        /// Value when the condition is falsy.
        else_expr: Box<Self>,
        /// Position of the `?`.
        position:  Position,
    },
    /// Call of any callable expression, e.g. `f(x)` or `fs[0](x)`.
    Call {
        /// The expression producing the callee.
        callee:    Box<Self>,
        /// Argument expressions.
        arguments: Vec<Self>,
        /// Position of the opening parenthesis.
        position:  Position,
    },
    /// Indexing expression, e.g. `items[2]`.
    Index {
        /// The indexed sequence.
        target:   Box<Self>,
        /// The index expression.
        index:    Box<Self>,
        /// Position of the opening bracket.
        position: Position,
    },
    /// Slicing expression, e.g. `items[1:-1]`.
    Slice {
        /// The sliced sequence.
        target:   Box<Self>,
        /// Inclusive start bound; defaults to the beginning.
        start:    Option<Box<Self>>,
        /// Exclusive end bound; defaults to the end.
        end:      Option<Box<Self>>,
        /// Position of the opening bracket.
        position: Position,
    },
    /// Array literal expression.
    ArrayLiteral {
        /// Elements of the array.
        elements: Vec<Self>,
        /// Position in the source code.
        position: Position,
    },
}

impl Expr {
    /// Gets the source position from `self`.
    /// ## Example
    /// ```
    /// use lexiscript::ast::{Expr, Position};
    ///
    /// let expr = Expr::Identifier { name:     "x".to_string(),
    ///                               position: Position::new(5, 3), };
    ///
    /// assert_eq!(expr.position().line, 5);
    /// ```
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Literal { position, .. }
            | Self::Identifier { position, .. }
            | Self::Unary { position, .. }
            | Self::Binary { position, .. }
            | Self::Ternary { position, .. }
            | Self::Call { position, .. }
            | Self::Index { position, .. }
            | Self::Slice { position, .. }
            | Self::ArrayLiteral { position, .. } => *position,
        }
    }
}

/// A user-defined function declaration.
///
/// Declarations are shared through `Rc` so that every function value created
/// from them points at the same immutable body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// The name of the function.
    pub name:     String,
    /// The parameter names.
    pub params:   Vec<String>,
    /// The statements executed when the function is called.
    pub body:     Vec<Statement>,
    /// How many function bodies enclose this declaration. Zero at top level.
    pub depth:    usize,
    /// Position of the declaration keyword.
    pub position: Position,
}

impl FunctionDecl {
    /// A declaration nested in another function's body is private to that
    /// function's scope.
    #[must_use]
    pub const fn is_private(&self) -> bool {
        self.depth > 0
    }
}

/// The assignable forms on the left of `=`.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    /// `name = ...`
    Variable(String),
    /// `sequence[index] = ...`
    Index {
        /// The indexed array.
        target: Box<Expr>,
        /// The element index.
        index:  Box<Expr>,
    },
}

/// Direction of an inclusive range loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeDirection {
    /// `start -> end`
    Ascending,
    /// `start <- end`
    Descending,
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A user-defined function declaration.
    Function(Rc<FunctionDecl>),
    /// An assignment; compound forms are desugared by the parser.
    Assign {
        /// What is being assigned.
        target:   AssignTarget,
        /// The assigned value.
        value:    Expr,
        /// Position in the source code.
        position: Position,
    },
    /// `if` with an optional condition and an optional `else` branch.
    If {
        /// The condition; an omitted condition always runs the block.
        condition:   Option<Expr>,
        /// Statements run when the condition holds.
        then_branch: Vec<Statement>,
        /// Statements run otherwise. `else if` nests another `If` here.
        else_branch: Option<Vec<Statement>>,
        /// Position in the source code.
        position:    Position,
    },
    /// `for name in sequence { ... }`
    ForEach {
        /// The loop variable.
        var:      String,
        /// The array or string being iterated.
        iterable: Expr,
        /// The loop body.
        body:     Vec<Statement>,
        /// Position in the source code.
        position: Position,
    },
    /// `for name in start -> end { ... }` and `for name in start <- end { ... }`
    ForRange {
        /// The loop variable.
        var:       String,
        /// The first value bound to the loop variable.
        start:     Expr,
        /// The last value bound to the loop variable.
        end:       Expr,
        /// Whether the range counts up or down.
        direction: RangeDirection,
        /// The loop body.
        body:      Vec<Statement>,
        /// Position in the source code.
        position:  Position,
    },
    /// `while condition { ... }`
    While {
        /// The loop condition, tested before every iteration.
        condition: Expr,
        /// The loop body.
        body:      Vec<Statement>,
        /// Position in the source code.
        position:  Position,
    },
    /// `while { ... }` with the condition omitted.
    InfiniteLoop {
        /// The loop body.
        body:     Vec<Statement>,
        /// Position in the source code.
        position: Position,
    },
    /// The `EXIT` statement, leaving the innermost loop.
    Break {
        /// Position in the source code.
        position: Position,
    },
    /// The `RETURN` statement.
    Return {
        /// The returned value, if any.
        value:    Option<Expr>,
        /// Position in the source code.
        position: Position,
    },
    /// The `PRINT` statement.
    Print {
        /// Values written to the output, in order.
        arguments: Vec<Expr>,
        /// Position in the source code.
        position:  Position,
    },
    /// An expression evaluated for its side effects.
    Expression {
        /// The expression to evaluate.
        expr:     Expr,
        /// Position in the source code.
        position: Position,
    },
    /// A nested `{ ... }` block. Blocks do not open a scope.
    Block {
        /// Statements inside the block.
        statements: Vec<Statement>,
        /// Position in the source code.
        position:   Position,
    },
}

/// A parsed submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level statements, in source order.
    pub statements: Vec<Statement>,
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`), always producing a float
    Div,
    /// Modulo (`%`)
    Mod,
    /// Exponentiation (`**`)
    Pow,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Logical and, short-circuiting
    And,
    /// Logical or, short-circuiting
    Or,
    /// Bitwise and (`&`)
    BitAnd,
    /// Bitwise or (`|`)
    BitOr,
    /// Bitwise exclusive or (`^`)
    BitXor,
    /// Left shift (`<<`)
    ShiftLeft,
    /// Arithmetic right shift (`>>`)
    ShiftRight,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (`-x`).
    Negate,
    /// Logical not, spelled by the lexicon's `NOT` token.
    Not,
    /// Bitwise complement (`~x`).
    BitNot,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, BitAnd, BitOr, BitXor, Div, Equal, Greater, GreaterEqual, Less, LessEqual,
            Mod, Mul, NotEqual, Or, Pow, ShiftLeft, ShiftRight, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Pow => "**",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            And => "and",
            Or => "or",
            BitAnd => "&",
            BitOr => "|",
            BitXor => "^",
            ShiftLeft => "<<",
            ShiftRight => ">>",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Negate => "-",
            Self::Not => "not",
            Self::BitNot => "~",
        };
        write!(f, "{operator}")
    }
}
