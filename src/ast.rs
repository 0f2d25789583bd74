use std::{fmt, rc::Rc};

/// A prefix (unary) operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrefixOperator {
    /// Logical negation (`!x`).
    Not,
    /// Arithmetic negation (`-x`).
    Negate,
}

/// An infix (binary) operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InfixOperator {
    /// Addition (`+`), also string concatenation.
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Remainder (`%`)
    Mod,
    /// Equal to (`==`)
    Eq,
    /// Not equal to (`!=`)
    NotEq,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// `Expr` covers all expression forms of the language, from literals and
/// identifiers to operators, collections, conditionals, loops, function
/// literals and calls. Each variant carries the source line of its leading
/// token for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Reference to a binding by name.
    Identifier {
        /// Name of the binding.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A 64-bit signed integer literal.
    IntegerLiteral {
        /// The literal value.
        value: i64,
        /// Line number in the source code.
        line:  usize,
    },
    /// A boolean literal: `true` or `false`.
    BooleanLiteral {
        /// The literal value.
        value: bool,
        /// Line number in the source code.
        line:  usize,
    },
    /// A string literal.
    StringLiteral {
        /// The literal text, without the surrounding quotes.
        value: String,
        /// Line number in the source code.
        line:  usize,
    },
    /// An array literal (e.g. `[1, 2, 3]`).
    ArrayLiteral {
        /// Element expressions, in source order.
        elements: Vec<Expr>,
        /// Line number in the source code.
        line:     usize,
    },
    /// A function literal (e.g. `fn(x, y) { x + y }`).
    ///
    /// Parameters and body are reference counted so that runtime function
    /// values can share them without cloning the subtree.
    FunctionLiteral {
        /// Parameter names, in declaration order.
        parameters: Rc<Vec<String>>,
        /// The function body.
        body:       Rc<BlockStatement>,
        /// Line number in the source code.
        line:       usize,
    },
    /// A prefix operation (e.g. `-x`, `!ready`).
    Prefix {
        /// The operator to apply.
        op:    PrefixOperator,
        /// The operand expression.
        right: Box<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
    /// An infix operation (e.g. `a + b`).
    Infix {
        /// Left operand.
        left:  Box<Expr>,
        /// The operator.
        op:    InfixOperator,
        /// Right operand.
        right: Box<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
    /// An index operation (e.g. `items[0]`).
    Index {
        /// The indexed collection.
        collection: Box<Expr>,
        /// The index expression.
        index:      Box<Expr>,
        /// Line number in the source code.
        line:       usize,
    },
    /// A call expression (e.g. `add(1, 2)`).
    Call {
        /// The expression producing the callee.
        callee:    Box<Expr>,
        /// Argument expressions, in source order.
        arguments: Vec<Expr>,
        /// Line number in the source code.
        line:      usize,
    },
    /// A conditional expression with an optional `else` branch.
    If {
        /// The condition expression.
        condition:   Box<Expr>,
        /// Block evaluated when the condition is truthy.
        consequence: BlockStatement,
        /// Block evaluated when the condition is falsy, if present.
        alternative: Option<BlockStatement>,
        /// Line number in the source code.
        line:        usize,
    },
    /// A pre-test loop expression.
    While {
        /// The condition expression, re-evaluated before every iteration.
        condition: Box<Expr>,
        /// The loop body.
        body:      BlockStatement,
        /// Line number in the source code.
        line:      usize,
    },
}

impl Expr {
    /// Gets the source line this expression starts on.
    ///
    /// ## Example
    /// ```
    /// use quill::ast::Expr;
    ///
    /// let expr = Expr::Identifier { name: "x".to_string(),
    ///                               line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Identifier { line, .. }
            | Self::IntegerLiteral { line, .. }
            | Self::BooleanLiteral { line, .. }
            | Self::StringLiteral { line, .. }
            | Self::ArrayLiteral { line, .. }
            | Self::FunctionLiteral { line, .. }
            | Self::Prefix { line, .. }
            | Self::Infix { line, .. }
            | Self::Index { line, .. }
            | Self::Call { line, .. }
            | Self::If { line, .. }
            | Self::While { line, .. } => *line,
        }
    }
}

/// A single statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A binding introduced with `let`.
    ///
    /// `let` is the only binding form; a second `let` of the same name in
    /// the same scope replaces the earlier binding.
    Let {
        /// The bound name.
        name:  String,
        /// The initializer expression.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// A `return` statement.
    Return {
        /// The returned expression.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// A bare expression evaluated for its value.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
}

impl Statement {
    /// Gets the source line this statement starts on.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Let { line, .. } | Self::Return { line, .. } | Self::Expression { line, .. } => {
                *line
            },
        }
    }
}

/// A brace-delimited sequence of statements, used for function bodies and
/// the branches of `if` and `while`.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    /// Statements inside the block, in source order.
    pub statements: Vec<Statement>,
    /// Line number of the opening brace.
    pub line:       usize,
}

/// The root of a parsed source text: an ordered sequence of top-level
/// statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// The top-level statements, in source order.
    pub statements: Vec<Statement>,
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Not => "!",
            Self::Negate => "-",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use InfixOperator::{
            Add, Div, Eq, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEq, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Eq => "==",
            NotEq => "!=",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for Expr {
    /// Renders the canonical form of the expression.
    ///
    /// Prefix and infix operations are fully parenthesized, which makes the
    /// rendering an unambiguous record of how the parser grouped operands.
    ///
    /// ## Example
    /// ```
    /// let program = quill::parse("a + b * c").unwrap();
    ///
    /// assert_eq!(program.to_string(), "(a + (b * c))");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier { name, .. } => write!(f, "{name}"),
            Self::IntegerLiteral { value, .. } => write!(f, "{value}"),
            Self::BooleanLiteral { value, .. } => write!(f, "{value}"),
            Self::StringLiteral { value, .. } => write!(f, "{value}"),
            Self::ArrayLiteral { elements, .. } => {
                write!(f, "[")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            },
            Self::FunctionLiteral { parameters, body, .. } => {
                write!(f, "fn({}) {{ {body} }}", parameters.join(", "))
            },
            Self::Prefix { op, right, .. } => write!(f, "({op}{right})"),
            Self::Infix { left, op, right, .. } => write!(f, "({left} {op} {right})"),
            Self::Index { collection, index, .. } => write!(f, "({collection}[{index}])"),
            Self::Call { callee, arguments, .. } => {
                write!(f, "{callee}(")?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            },
            Self::If { condition,
                       consequence,
                       alternative,
                       .. } => {
                write!(f, "if {condition} {{ {consequence} }}")?;
                if let Some(alternative) = alternative {
                    write!(f, " else {{ {alternative} }}")?;
                }
                Ok(())
            },
            Self::While { condition, body, .. } => write!(f, "while {condition} {{ {body} }}"),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Let { name, value, .. } => write!(f, "let {name} = {value};"),
            Self::Return { value, .. } => write!(f, "return {value};"),
            Self::Expression { expr, .. } => write!(f, "{expr}"),
        }
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, statement) in self.statements.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}
