use logos::Logos;

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Integer literal tokens, such as `42`. A literal too large for `i64`
    /// fails to lex and surfaces as [`Token::Illegal`].
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// String literal tokens. The literal is the text between two double
    /// quotes, with no escape processing. An unterminated string runs to
    /// the end of the input.
    #[regex(r#""[^"]*"?"#, parse_string)]
    Str(String),
    /// Boolean literal tokens, `true` or `false`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// `let`
    #[token("let")]
    Let,
    /// `fn`
    #[token("fn")]
    Function,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `return`
    #[token("return")]
    Return,
    /// `while`
    #[token("while")]
    While,
    /// Identifier tokens; binding names such as `x` or `counter`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `=`
    #[token("=")]
    Assign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `!`
    #[token("!")]
    Bang,
    /// `*`
    #[token("*")]
    Asterisk,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `==`
    #[token("==")]
    Eq,
    /// `!=`
    #[token("!=")]
    NotEq,
    /// `<`
    #[token("<")]
    Lt,
    /// `>`
    #[token(">")]
    Gt,
    /// `<=`
    #[token("<=")]
    Le,
    /// `>=`
    #[token(">=")]
    Ge,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// End of input. A literal NUL also ends the stream, matching the
    /// read-cursor sentinel of C-style scanners.
    #[token("\0")]
    Eof,
    /// Any character no other rule recognizes.
    #[regex(r".", illegal_slice, priority = 1)]
    Illegal(String),

    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,
    /// Newlines are skipped, but counted for error reporting.
    #[regex(r"\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    Newline,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Parses an integer literal from the current token slice.
///
/// Returns `None` when the digits do not fit an `i64`, which turns the
/// slice into an unlexable span.
fn parse_integer(lex: &mut logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Strips the quotes from a string literal slice.
///
/// The closing quote may be absent when the string runs to the end of the
/// input. Newlines inside the literal are counted toward the line number.
fn parse_string(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    lex.extras.line += slice.matches('\n').count();

    let body = slice.strip_prefix('"').unwrap_or(slice);
    body.strip_suffix('"').unwrap_or(body).to_string()
}

/// Captures the text of an unrecognized character.
fn illegal_slice(lex: &mut logos::Lexer<Token>) -> String {
    lex.slice().to_string()
}

impl Token {
    /// Returns the kind tag of this token, as printed by the token dump.
    ///
    /// ## Example
    /// ```
    /// use quill::interpreter::lexer::Token;
    ///
    /// assert_eq!(Token::Let.kind_name(), "LET");
    /// assert_eq!(Token::Plus.kind_name(), "+");
    /// assert_eq!(Token::Eof.kind_name(), "END");
    /// ```
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "INT",
            Self::Str(_) => "STRING",
            Self::Bool(true) => "TRUE",
            Self::Bool(false) => "FALSE",
            Self::Let => "LET",
            Self::Function => "FUNCTION",
            Self::If => "IF",
            Self::Else => "ELSE",
            Self::Return => "RETURN",
            Self::While => "WHILE",
            Self::Identifier(_) => "IDENT",
            Self::Assign => "=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Bang => "!",
            Self::Asterisk => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Eof => "END",
            Self::Illegal(_) => "ILLEGAL",
            Self::Comment | Self::Newline | Self::Ignored => "SKIPPED",
        }
    }
}

impl std::fmt::Display for Token {
    /// Renders the literal text of the token.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Str(value) | Self::Identifier(value) | Self::Illegal(value) => {
                write!(f, "{value}")
            },
            Self::Bool(value) => write!(f, "{value}"),
            Self::Let => write!(f, "let"),
            Self::Function => write!(f, "fn"),
            Self::If => write!(f, "if"),
            Self::Else => write!(f, "else"),
            Self::Return => write!(f, "return"),
            Self::While => write!(f, "while"),
            Self::Eof | Self::Comment | Self::Newline | Self::Ignored => Ok(()),
            other => write!(f, "{}", other.kind_name()),
        }
    }
}

/// A restartable token source over one piece of source text.
///
/// The lexer produces one token per call, advancing an internal cursor.
/// After the input is exhausted it returns [`Token::Eof`] forever, so the
/// token stream is effectively infinite with a fixed point at the end.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, Token>,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer over the given source text, starting at line 1.
    ///
    /// ## Example
    /// ```
    /// use quill::interpreter::lexer::{Lexer, Token};
    ///
    /// let mut lexer = Lexer::new("let five = 5;");
    ///
    /// assert_eq!(lexer.next_token(), (Token::Let, 1));
    /// assert_eq!(lexer.next_token(), (Token::Identifier("five".to_string()), 1));
    /// ```
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { inner: Token::lexer_with_extras(source, LexerExtras { line: 1 }), }
    }

    /// Returns the next token together with the line it starts on.
    pub fn next_token(&mut self) -> (Token, usize) {
        match self.inner.next() {
            Some(Ok(token)) => (token, self.inner.extras.line),
            Some(Err(())) => {
                (Token::Illegal(self.inner.slice().to_string()), self.inner.extras.line)
            },
            None => (Token::Eof, self.inner.extras.line),
        }
    }
}
