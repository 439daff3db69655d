use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("int", TokenKind::Int);
        map.insert("void", TokenKind::Void);
        map.insert("return", TokenKind::Return);
        map.insert("while", TokenKind::While);
        map
    };
}

/// Returns the reserved-word kind for `word`, if it is one. Matching is
/// exact and case-sensitive.
pub fn lookup_keyword(word: &str) -> Option<TokenKind> {
    RESERVED_LOOKUP.get(word).copied()
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EndOfFile,
    Error,

    // Reserved
    If,
    Else,
    Int,
    Void,
    Return,
    While,

    Plus,      // +
    Minus,     // -
    Times,     // *
    Divide,    // /
    Lt,        // <
    Lte,       // <=
    Gt,        // >
    Gte,       // >=
    Eq,        // ==
    Neq,       // !=
    Assign,    // =
    Increment, // ++
    Decrement, // --

    Semi,
    Comma,
    LParen,
    RParen,
    LBrack,
    RBrack,
    LBrace,
    RBrace,

    Id,
    Num,
}

// `Num` must stay the last variant.
const KIND_COUNT: usize = TokenKind::Num as usize + 1;

// `ALL` lists every kind exactly once, in declaration order.
const _: () = {
    let mut i = 0;
    while i < KIND_COUNT {
        assert!(TokenKind::ALL[i] as usize == i);
        i += 1;
    }
};

impl TokenKind {
    /// Every kind in declaration order, so `ALL[k as usize] == k`.
    pub const ALL: [TokenKind; KIND_COUNT] = [
        TokenKind::EndOfFile,
        TokenKind::Error,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::Int,
        TokenKind::Void,
        TokenKind::Return,
        TokenKind::While,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Times,
        TokenKind::Divide,
        TokenKind::Lt,
        TokenKind::Lte,
        TokenKind::Gt,
        TokenKind::Gte,
        TokenKind::Eq,
        TokenKind::Neq,
        TokenKind::Assign,
        TokenKind::Increment,
        TokenKind::Decrement,
        TokenKind::Semi,
        TokenKind::Comma,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::LBrack,
        TokenKind::RBrack,
        TokenKind::LBrace,
        TokenKind::RBrace,
        TokenKind::Id,
        TokenKind::Num,
    ];

    /// Canonical uppercase name, as printed in token tables.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::EndOfFile => "END_OF_FILE",
            TokenKind::Error => "ERROR",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Int => "INT",
            TokenKind::Void => "VOID",
            TokenKind::Return => "RETURN",
            TokenKind::While => "WHILE",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Times => "TIMES",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Lt => "LT",
            TokenKind::Lte => "LTE",
            TokenKind::Gt => "GT",
            TokenKind::Gte => "GTE",
            TokenKind::Eq => "EQ",
            TokenKind::Neq => "NEQ",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Increment => "INCREMENT",
            TokenKind::Decrement => "DECREMENT",
            TokenKind::Semi => "SEMI",
            TokenKind::Comma => "COMMA",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrack => "LBRACK",
            TokenKind::RBrack => "RBRACK",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Id => "ID",
            TokenKind::Num => "NUM",
        }
    }

    /// The fixed lexeme of a reserved word, operator or punctuator.
    pub fn spelling(self) -> Option<&'static str> {
        let spelling = match self {
            TokenKind::EndOfFile | TokenKind::Error | TokenKind::Id | TokenKind::Num => return None,
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Int => "int",
            TokenKind::Void => "void",
            TokenKind::Return => "return",
            TokenKind::While => "while",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Times => "*",
            TokenKind::Divide => "/",
            TokenKind::Lt => "<",
            TokenKind::Lte => "<=",
            TokenKind::Gt => ">",
            TokenKind::Gte => ">=",
            TokenKind::Eq => "==",
            TokenKind::Neq => "!=",
            TokenKind::Assign => "=",
            TokenKind::Increment => "++",
            TokenKind::Decrement => "--",
            TokenKind::Semi => ";",
            TokenKind::Comma => ",",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrack => "[",
            TokenKind::RBrack => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
        };

        Some(spelling)
    }

    pub fn is_reserved(self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Else
                | TokenKind::Int
                | TokenKind::Void
                | TokenKind::Return
                | TokenKind::While
        )
    }
}

/// Free-function form of [`TokenKind::name`].
pub fn token_kind_name(kind: TokenKind) -> &'static str {
    kind.name()
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A classified lexeme and the 1-based line/column of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?} at {}:{}", self.kind, self.lexeme, self.line, self.column)
    }
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) -> Token {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    pub fn eof(line: usize, column: usize) -> Token {
        Token::new(TokenKind::EndOfFile, String::new(), line, column)
    }

    /// An error token for one offending byte. ASCII bytes are kept as
    /// they are; anything else is written as `\xNN`.
    pub fn error(byte: u8, line: usize, column: usize) -> Token {
        let lexeme = if byte.is_ascii() {
            (byte as char).to_string()
        } else {
            format!("\\x{:02X}", byte)
        };

        Token::new(TokenKind::Error, lexeme, line, column)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfFile
    }

    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }
}
