// Minimal C++ tokenizer for binding idioms
//
// Produces just enough structure to match `set_function` and
// `new_usertype` registrations: identifiers, string literals, and
// punctuation. Comments are dropped, so parentheses or semicolons inside
// comments and literals never look like statement boundaries.

/// Kind of token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `[A-Za-z_][A-Za-z0-9_]*`
    Ident,
    /// Quoted literal; `text` holds the content without quotes
    Str,
    /// Punctuation, including the two-character `::` and `->`
    Punct,
    /// Numbers, non-ASCII runs, unterminated quotes
    Other,
}

/// A token borrowing from the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the first character (opening quote for literals)
    pub start: usize,
    /// Byte offset one past the last character (closing quote for literals)
    pub end: usize,
}

impl<'a> Token<'a> {
    pub fn is_punct(&self, p: &str) -> bool {
        self.kind == TokenKind::Punct && self.text == p
    }

    pub fn is_ident(&self, name: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == name
    }
}

/// Tokenize C++ source text
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    Lexer::new(source).collect()
}

struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn token(&self, kind: TokenKind, start: usize, end: usize) -> Token<'a> {
        Token {
            kind,
            text: &self.src[start..end],
            start,
            end,
        }
    }

    /// Skip whitespace and comments; returns false at end of input
    fn skip_trivia(&mut self) -> bool {
        while let Some(b) = self.peek(0) {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if b == b'/' && self.peek(1) == Some(b'/') {
                while let Some(c) = self.peek(0) {
                    if c == b'\n' {
                        break;
                    }
                    self.pos += 1;
                }
            } else if b == b'/' && self.peek(1) == Some(b'*') {
                self.pos += 2;
                loop {
                    match self.peek(0) {
                        None => break,
                        Some(b'*') if self.peek(1) == Some(b'/') => {
                            self.pos += 2;
                            break;
                        }
                        Some(_) => self.pos += 1,
                    }
                }
            } else {
                return true;
            }
        }
        false
    }

    /// Quoted literal starting at the current quote byte
    fn quoted(&mut self, quote: u8) -> Token<'a> {
        let start = self.pos;
        let mut i = start + 1;
        while let Some(&b) = self.bytes.get(i) {
            if b == b'\\' {
                i += 2;
            } else if b == quote {
                self.pos = i + 1;
                return Token {
                    kind: TokenKind::Str,
                    text: &self.src[start + 1..i],
                    start,
                    end: i + 1,
                };
            } else if b == b'\n' {
                break;
            } else {
                i += 1;
            }
        }
        // Unterminated: emit the lone quote and resume after it
        self.pos = start + 1;
        self.token(TokenKind::Other, start, start + 1)
    }

    /// Raw string `R"delim(...)delim"`, `pos` is at the opening quote
    fn raw_string(&mut self, start: usize) -> Option<Token<'a>> {
        let open = self.pos;
        let rest = &self.src[open + 1..];
        let paren = rest.find('(')?;
        let delim = &rest[..paren];
        let bad_delim = |c: char| c.is_whitespace() || c == ')' || c == '\\';
        if delim.len() > 16 || delim.contains(bad_delim) {
            return None;
        }
        let body_start = open + 1 + paren + 1;
        let closing = format!("){}\"", delim);
        let close = self.src[body_start..].find(&closing)?;
        let body_end = body_start + close;
        self.pos = body_end + closing.len();
        Some(Token {
            kind: TokenKind::Str,
            text: &self.src[body_start..body_end],
            start,
            end: self.pos,
        })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if !self.skip_trivia() {
            return None;
        }

        let start = self.pos;
        let b = self.bytes[start];

        if b == b'_' || b.is_ascii_alphabetic() {
            while matches!(self.peek(0), Some(c) if c == b'_' || c.is_ascii_alphanumeric()) {
                self.pos += 1;
            }
            let ident = &self.src[start..self.pos];
            if self.peek(0) == Some(b'"') && matches!(ident, "R" | "LR" | "uR" | "UR" | "u8R") {
                if let Some(tok) = self.raw_string(start) {
                    return Some(tok);
                }
            }
            return Some(self.token(TokenKind::Ident, start, self.pos));
        }

        if b.is_ascii_digit() {
            while matches!(
                self.peek(0),
                Some(c) if c == b'_' || c == b'.' || c == b'\'' || c.is_ascii_alphanumeric()
            ) {
                self.pos += 1;
            }
            return Some(self.token(TokenKind::Other, start, self.pos));
        }

        if b == b'"' || b == b'\'' {
            return Some(self.quoted(b));
        }

        if !b.is_ascii() {
            while matches!(self.peek(0), Some(c) if !c.is_ascii()) {
                self.pos += 1;
            }
            return Some(self.token(TokenKind::Other, start, self.pos));
        }

        let pair = (b, self.peek(1));
        let len = if matches!(pair, (b':', Some(b':')) | (b'-', Some(b'>'))) {
            2
        } else {
            1
        };
        self.pos += len;
        Some(self.token(TokenKind::Punct, start, self.pos))
    }
}
