use std::fmt;

// ── Token ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenKind {
    // Punctuation
    Semicolon,
    Comma,
    OpenParen,
    CloseParen,
    Colon,
    Period,
    Quotation,
    // Literals
    String,
    Number,
    // Keywords
    Window,
    Layout,
    Flow,
    Grid,
    Button,
    Label,
    Panel,
    Textfield,
    Group,
    Radio,
    End,
    // Sentinels
    NotFound,
    /// Never stored in a token stream; the parser synthesizes it past the end.
    EndOfFile,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Semicolon  => "Semicolon",
            TokenKind::Comma      => "Comma",
            TokenKind::OpenParen  => "OpenParen",
            TokenKind::CloseParen => "CloseParen",
            TokenKind::Colon      => "Colon",
            TokenKind::Period     => "Period",
            TokenKind::Quotation  => "Quotation",
            TokenKind::String     => "String",
            TokenKind::Number     => "Number",
            TokenKind::Window     => "Window",
            TokenKind::Layout     => "Layout",
            TokenKind::Flow       => "Flow",
            TokenKind::Grid       => "Grid",
            TokenKind::Button     => "Button",
            TokenKind::Label      => "Label",
            TokenKind::Panel      => "Panel",
            TokenKind::Textfield  => "Textfield",
            TokenKind::Group      => "Group",
            TokenKind::Radio      => "Radio",
            TokenKind::End        => "End",
            TokenKind::NotFound   => "NotFound",
            TokenKind::EndOfFile  => "EndOfFile",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self { kind, lexeme: lexeme.into() }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {:?}]", self.kind, self.lexeme)
    }
}

/// Exact, case-sensitive keyword lookup.
pub fn keyword(word: &str) -> Option<TokenKind> {
    Some(match word {
        "Window"    => TokenKind::Window,
        "Layout"    => TokenKind::Layout,
        "Flow"      => TokenKind::Flow,
        "Grid"      => TokenKind::Grid,
        "Group"     => TokenKind::Group,
        "Label"     => TokenKind::Label,
        "Button"    => TokenKind::Button,
        "Panel"     => TokenKind::Panel,
        "Radio"     => TokenKind::Radio,
        "Textfield" => TokenKind::Textfield,
        "End"       => TokenKind::End,
        _ => return None,
    })
}

/// Maps one of `" ( ) , : ; .` to its kind.
pub fn punctuation(ch: char) -> Option<TokenKind> {
    Some(match ch {
        '"' => TokenKind::Quotation,
        '(' => TokenKind::OpenParen,
        ')' => TokenKind::CloseParen,
        ',' => TokenKind::Comma,
        ':' => TokenKind::Colon,
        ';' => TokenKind::Semicolon,
        '.' => TokenKind::Period,
        _ => return None,
    })
}

fn is_digits(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
}

// ── Lexer ─────────────────────────────────────────────────────────────────

/// Contextual state carried between lexemes (and across lines).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexerMode {
    #[default]
    Default,
    InParenthesis,
    InQuotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexerOptions {
    /// Outside parentheses and quotes, only digit runs become `Number`;
    /// any other unknown word becomes `NotFound`. When unset, every
    /// unknown word is lexed as `Number`.
    pub strict_numbers: bool,
}

/// Line-oriented lexer. Feed it lines with [`Lexer::scan_line`], then take
/// the tokens with [`Lexer::finish`].
#[derive(Debug, Default)]
pub struct Lexer {
    tokens: Vec<Token>,
    mode: LexerMode,
    last: Option<TokenKind>,
    options: LexerOptions,
}

impl Lexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LexerOptions) -> Self {
        Self { options, ..Self::default() }
    }

    pub fn mode(&self) -> LexerMode {
        self.mode
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn finish(self) -> Vec<Token> {
        self.tokens
    }

    /// Scan one source line. Blank lines and lines starting with `/` are
    /// comments and yield nothing.
    pub fn scan_line(&mut self, line: &str) {
        if line.is_empty() || line.starts_with('/') {
            return;
        }

        let mut chars = line.chars().peekable();
        while let Some(&ch) = chars.peek() {
            if ch.is_alphanumeric() {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if !c.is_alphanumeric() {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                let kind = self.classify_word(&word);
                self.push(kind, word);
            } else if let Some(kind) = punctuation(ch) {
                chars.next();
                self.push(kind, ch.to_string());
            } else {
                // whitespace and unknown punctuation are separators
                chars.next();
            }
        }
    }

    fn classify_word(&self, word: &str) -> TokenKind {
        match self.mode {
            LexerMode::InQuotation => TokenKind::String,
            LexerMode::InParenthesis => {
                if is_digits(word) { TokenKind::Number } else { TokenKind::NotFound }
            }
            LexerMode::Default => match keyword(word) {
                Some(kind) => kind,
                None if self.options.strict_numbers && !is_digits(word) => TokenKind::NotFound,
                None => TokenKind::Number,
            },
        }
    }

    /// Appends a classified lexeme, applying the mode transitions.
    fn push(&mut self, kind: TokenKind, lexeme: String) {
        match self.mode {
            LexerMode::InParenthesis => {
                self.append(kind, lexeme);
                if kind == TokenKind::CloseParen {
                    self.mode = LexerMode::Default;
                }
            }
            LexerMode::InQuotation if kind == TokenKind::Quotation => {
                if self.last == Some(TokenKind::Quotation) {
                    self.append(TokenKind::String, String::new());
                }
                self.append(kind, lexeme);
                self.mode = LexerMode::Default;
            }
            LexerMode::InQuotation => {
                if self.last == Some(TokenKind::String) {
                    if let Some(prev) = self.tokens.last_mut() {
                        prev.lexeme.push(' ');
                        prev.lexeme.push_str(&lexeme);
                        return;
                    }
                }
                self.append(TokenKind::String, lexeme);
            }
            LexerMode::Default => {
                self.append(kind, lexeme);
                match kind {
                    TokenKind::Quotation => self.mode = LexerMode::InQuotation,
                    TokenKind::OpenParen => self.mode = LexerMode::InParenthesis,
                    _ => {}
                }
            }
        }
    }

    fn append(&mut self, kind: TokenKind, lexeme: String) {
        self.last = Some(kind);
        self.tokens.push(Token { kind, lexeme });
    }
}

// ── Entry points ──────────────────────────────────────────────────────────

pub fn tokenize<I>(lines: I) -> Vec<Token>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    tokenize_with(lines, LexerOptions::default())
}

pub fn tokenize_with<I>(lines: I, options: LexerOptions) -> Vec<Token>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut lexer = Lexer::with_options(options);
    for line in lines {
        lexer.scan_line(line.as_ref());
    }
    let tokens = lexer.finish();
    if log::log_enabled!(log::Level::Trace) {
        log::trace!("token stream:\n{}", format_tokens(&tokens));
    }
    tokens
}

pub fn tokenize_str(src: &str) -> Vec<Token> {
    tokenize(src.lines())
}

/// Debug rendering of a token stream, five tokens per line.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .chunks(5)
        .map(|row| row.iter().map(Token::to_string).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}
