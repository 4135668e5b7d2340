//! Token types for the query lexer.

use super::Pos;

/// Query language keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Queries
    Select,
    From,
    Where,
    Group,
    By,
    Order,
    Asc,
    Desc,
    Limit,
    Into,
    As,
    On,

    // Mutation
    Delete,
    Insert,
    Values,

    // Administration
    Create,
    Drop,
    Alter,
    List,
    Database,
    Databases,
    User,
    With,
    Password,
    Series,
    Measurement,
    Measurements,
    Tag,
    Field,
    Keys,

    // Continuous queries
    Continuous,
    Query,
    Queries,
    Begin,
    End,

    // Retention policies
    Retention,
    Policy,
    Duration,
    Replication,
    Default,

    // Permissions
    Grant,
    Revoke,
    To,
    Read,
    Write,
    All,
    Privileges,

    // Reserved
    Exists,
    Explain,
    If,
    Inner,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SELECT" => Some(Self::Select),
            "FROM" => Some(Self::From),
            "WHERE" => Some(Self::Where),
            "GROUP" => Some(Self::Group),
            "BY" => Some(Self::By),
            "ORDER" => Some(Self::Order),
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            "LIMIT" => Some(Self::Limit),
            "INTO" => Some(Self::Into),
            "AS" => Some(Self::As),
            "ON" => Some(Self::On),
            "DELETE" => Some(Self::Delete),
            "INSERT" => Some(Self::Insert),
            "VALUES" => Some(Self::Values),
            "CREATE" => Some(Self::Create),
            "DROP" => Some(Self::Drop),
            "ALTER" => Some(Self::Alter),
            "LIST" => Some(Self::List),
            "DATABASE" => Some(Self::Database),
            "DATABASES" => Some(Self::Databases),
            "USER" => Some(Self::User),
            "WITH" => Some(Self::With),
            "PASSWORD" => Some(Self::Password),
            "SERIES" => Some(Self::Series),
            "MEASUREMENT" => Some(Self::Measurement),
            "MEASUREMENTS" => Some(Self::Measurements),
            "TAG" => Some(Self::Tag),
            "FIELD" => Some(Self::Field),
            "KEYS" => Some(Self::Keys),
            "CONTINUOUS" => Some(Self::Continuous),
            "QUERY" => Some(Self::Query),
            "QUERIES" => Some(Self::Queries),
            "BEGIN" => Some(Self::Begin),
            "END" => Some(Self::End),
            "RETENTION" => Some(Self::Retention),
            "POLICY" => Some(Self::Policy),
            "DURATION" => Some(Self::Duration),
            "REPLICATION" => Some(Self::Replication),
            "DEFAULT" => Some(Self::Default),
            "GRANT" => Some(Self::Grant),
            "REVOKE" => Some(Self::Revoke),
            "TO" => Some(Self::To),
            "READ" => Some(Self::Read),
            "WRITE" => Some(Self::Write),
            "ALL" => Some(Self::All),
            "PRIVILEGES" => Some(Self::Privileges),
            "EXISTS" => Some(Self::Exists),
            "EXPLAIN" => Some(Self::Explain),
            "IF" => Some(Self::If),
            "INNER" => Some(Self::Inner),
            _ => None,
        }
    }

    /// Returns the keyword as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Group => "GROUP",
            Self::By => "BY",
            Self::Order => "ORDER",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Limit => "LIMIT",
            Self::Into => "INTO",
            Self::As => "AS",
            Self::On => "ON",
            Self::Delete => "DELETE",
            Self::Insert => "INSERT",
            Self::Values => "VALUES",
            Self::Create => "CREATE",
            Self::Drop => "DROP",
            Self::Alter => "ALTER",
            Self::List => "LIST",
            Self::Database => "DATABASE",
            Self::Databases => "DATABASES",
            Self::User => "USER",
            Self::With => "WITH",
            Self::Password => "PASSWORD",
            Self::Series => "SERIES",
            Self::Measurement => "MEASUREMENT",
            Self::Measurements => "MEASUREMENTS",
            Self::Tag => "TAG",
            Self::Field => "FIELD",
            Self::Keys => "KEYS",
            Self::Continuous => "CONTINUOUS",
            Self::Query => "QUERY",
            Self::Queries => "QUERIES",
            Self::Begin => "BEGIN",
            Self::End => "END",
            Self::Retention => "RETENTION",
            Self::Policy => "POLICY",
            Self::Duration => "DURATION",
            Self::Replication => "REPLICATION",
            Self::Default => "DEFAULT",
            Self::Grant => "GRANT",
            Self::Revoke => "REVOKE",
            Self::To => "TO",
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::All => "ALL",
            Self::Privileges => "PRIVILEGES",
            Self::Exists => "EXISTS",
            Self::Explain => "EXPLAIN",
            Self::If => "IF",
            Self::Inner => "INNER",
        }
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Special
    /// Unrecognized character.
    Illegal,
    /// End of input.
    Eof,
    /// A run of whitespace.
    Ws,

    // Literals
    /// Identifier (e.g., cpu_load)
    Ident,
    /// Number literal (e.g., 12345.67)
    Number,
    /// Duration literal (e.g., 13h)
    DurationVal,
    /// Quoted string (e.g., "abc" or 'abc')
    String,
    /// Unterminated quoted string.
    BadString,
    /// Unknown escape sequence inside a quoted string.
    BadEscape,
    /// TRUE
    True,
    /// FALSE
    False,

    // Operators
    /// +
    Add,
    /// -
    Sub,
    /// *
    Mul,
    /// /
    Div,
    /// AND
    And,
    /// OR
    Or,
    /// =
    Eq,
    /// !=
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,

    /// Keyword
    Keyword(Keyword),
}

impl TokenKind {
    /// Returns the canonical spelling of the token kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Illegal => "ILLEGAL",
            Self::Eof => "EOF",
            Self::Ws => "WS",
            Self::Ident => "IDENT",
            Self::Number => "NUMBER",
            Self::DurationVal => "DURATION_VAL",
            Self::String => "STRING",
            Self::BadString => "BADSTRING",
            Self::BadEscape => "BADESCAPE",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Dot => ".",
            Self::Keyword(kw) => kw.as_str(),
        }
    }

    /// Returns the operator precedence (higher binds tighter, 0 for non-operators).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 3,
            Self::Add | Self::Sub => 4,
            Self::Mul | Self::Div => 5,
            _ => 0,
        }
    }

    /// Returns true for binary operator tokens.
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        self.precedence() > 0
    }

    /// Returns true if this is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, Self::Keyword(kw) if *kw == keyword)
    }
}

/// Classifies a scanned word as a keyword, word operator, boolean, or identifier.
#[must_use]
pub fn lookup(ident: &str) -> TokenKind {
    if let Some(keyword) = Keyword::from_str(ident) {
        return TokenKind::Keyword(keyword);
    }
    match ident.to_ascii_uppercase().as_str() {
        "AND" => TokenKind::And,
        "OR" => TokenKind::Or,
        "TRUE" => TokenKind::True,
        "FALSE" => TokenKind::False,
        _ => TokenKind::Ident,
    }
}

/// A token with its position and literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Where the token starts.
    pub pos: Pos,
    /// The literal text; empty for fixed-spelling tokens.
    pub lit: String,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, pos: Pos, lit: impl Into<String>) -> Self {
        Self {
            kind,
            pos,
            lit: lit.into(),
        }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Text reported for this token in "found ..." errors: the literal when
    /// there is one, otherwise the canonical spelling.
    #[must_use]
    pub fn describe(&self) -> &str {
        if self.lit.is_empty() {
            self.kind.as_str()
        } else {
            &self.lit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("SELECT"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("select"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("SeLeCt"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("not_a_keyword"), None);
    }

    #[test]
    fn test_keyword_as_str() {
        assert_eq!(Keyword::Select.as_str(), "SELECT");
        assert_eq!(Keyword::Retention.as_str(), "RETENTION");
        assert_eq!(Keyword::Privileges.as_str(), "PRIVILEGES");
    }

    #[test]
    fn test_keyword_spelling_round_trips() {
        for kw in [
            Keyword::Measurements,
            Keyword::Continuous,
            Keyword::Replication,
            Keyword::Explain,
        ] {
            assert_eq!(Keyword::from_str(kw.as_str()), Some(kw));
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("from"), TokenKind::Keyword(Keyword::From));
        assert_eq!(lookup("and"), TokenKind::And);
        assert_eq!(lookup("Or"), TokenKind::Or);
        assert_eq!(lookup("TRUE"), TokenKind::True);
        assert_eq!(lookup("false"), TokenKind::False);
        assert_eq!(lookup("cpu"), TokenKind::Ident);
    }

    #[test]
    fn test_precedence() {
        assert_eq!(TokenKind::Or.precedence(), 1);
        assert_eq!(TokenKind::And.precedence(), 2);
        assert_eq!(TokenKind::LtEq.precedence(), 3);
        assert_eq!(TokenKind::Sub.precedence(), 4);
        assert_eq!(TokenKind::Div.precedence(), 5);
        assert_eq!(TokenKind::Comma.precedence(), 0);
        assert!(TokenKind::Mul.is_operator());
        assert!(!TokenKind::Keyword(Keyword::Select).is_operator());
    }

    #[test]
    fn test_token_describe() {
        let eof = Token::new(TokenKind::Eof, Pos::default(), "");
        let ident = Token::new(TokenKind::Ident, Pos::default(), "blah");
        let kw = Token::new(TokenKind::Keyword(Keyword::To), Pos::default(), "to");
        assert_eq!(eof.describe(), "EOF");
        assert_eq!(ident.describe(), "blah");
        assert_eq!(kw.describe(), "to");
    }

    #[test]
    fn test_token_as_keyword() {
        let select = Token::new(TokenKind::Keyword(Keyword::Select), Pos::new(0, 0), "SELECT");
        let plus = Token::new(TokenKind::Add, Pos::new(0, 0), "");
        assert_eq!(select.as_keyword(), Some(Keyword::Select));
        assert_eq!(plus.as_keyword(), None);
    }
}
