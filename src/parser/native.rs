// sol2 binding extractor for C++ sources
//
// Recognizes two registration idioms:
//
//   lua.set_function("name", ...);
//   lua.new_usertype<T>("Exposed", "key", value, ..., sol::constructors<...>());
//
// Anything that does not fit these shapes is ignored.

use crate::config::ScanConfig;
use crate::model::{ApiModel, UsertypeDescriptor};
use crate::parser::tokens::{tokenize, Token, TokenKind};
use tracing::debug;

/// Name prefixes that mark a usertype key as a method
pub const METHOD_PREFIXES: &[&str] = &[
    "get", "set", "add", "remove", "to", "from", "on", "with", "make", "create", "build", "apply",
    "update", "clear", "push", "pop",
];

/// How a usertype key is exposed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Method,
}

/// Classify a usertype key by naming convention.
///
/// A key is a method when it starts with one of [`METHOD_PREFIXES`]
/// (ASCII case-insensitive) and the prefix ends at a word boundary: end of
/// the key, a character other than a letter, digit or `_`, or a camelCase
/// step (lowercase prefix end followed by an uppercase letter).
pub fn classify_key(key: &str) -> MemberKind {
    let is_method = METHOD_PREFIXES.iter().any(|prefix| {
        let head = match key.as_bytes().get(..prefix.len()) {
            Some(head) => head,
            None => return false,
        };
        if !head.eq_ignore_ascii_case(prefix.as_bytes()) {
            return false;
        }
        let last = head[head.len() - 1];
        match key[prefix.len()..].chars().next() {
            None => true,
            Some(c) if c.is_alphanumeric() || c == '_' => {
                last.is_ascii_lowercase() && c.is_uppercase()
            }
            Some(_) => true,
        }
    });

    if is_method {
        MemberKind::Method
    } else {
        MemberKind::Field
    }
}

/// Extractor for sol2 registrations in C++ source text
#[derive(Debug, Clone)]
pub struct NativeExtractor {
    receivers: Vec<String>,
}

impl NativeExtractor {
    /// Create an extractor accepting the given `set_function` receivers
    pub fn new(receivers: Vec<String>) -> Self {
        Self { receivers }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.receivers.clone())
    }

    /// Extract all registrations in `source` into `model`
    pub fn extract(&self, source: &str, model: &mut ApiModel) {
        let tokens = tokenize(source);
        self.extract_functions(&tokens, model);
        extract_usertypes(source, &tokens, model);
    }

    fn is_receiver(&self, tok: &Token<'_>) -> bool {
        tok.kind == TokenKind::Ident && self.receivers.iter().any(|r| r == tok.text)
    }

    /// `<receiver> . set_function ( "name"`
    fn extract_functions(&self, tokens: &[Token<'_>], model: &mut ApiModel) {
        for window in tokens.windows(5) {
            if !self.is_receiver(&window[0])
                || !window[1].is_punct(".")
                || !window[2].is_ident("set_function")
                || !window[3].is_punct("(")
                || window[4].kind != TokenKind::Str
            {
                continue;
            }
            let name = window[4].text.trim();
            if name.is_empty() {
                continue;
            }
            debug!("global function {}", name);
            model.globals.insert(name.to_string());
        }
    }
}

impl Default for NativeExtractor {
    fn default() -> Self {
        Self::from_config(&ScanConfig::default())
    }
}

/// A matched `new_usertype` registration
struct Registration<'t, 'a> {
    exposed: &'a str,
    body: &'t [Token<'a>],
    /// Index of the first token after the terminating `;`
    next: usize,
}

fn extract_usertypes(source: &str, tokens: &[Token<'_>], model: &mut ApiModel) {
    let mut i = 0;
    while i < tokens.len() {
        if !tokens[i].is_ident("new_usertype") {
            i += 1;
            continue;
        }
        match match_registration(tokens, i) {
            Some(reg) => {
                debug!("usertype {} ({} body tokens)", reg.exposed, reg.body.len());
                apply_body(source, reg.body, model.usertype_mut(reg.exposed));
                i = reg.next;
            }
            None => i += 1,
        }
    }
}

/// `new_usertype < T... > ( "Exposed" , body ) ;`
fn match_registration<'t, 'a>(tokens: &'t [Token<'a>], at: usize) -> Option<Registration<'t, 'a>> {
    let at_tok = |i: usize| tokens.get(i);

    if !at_tok(at + 1)?.is_punct("<") {
        return None;
    }
    let close_angle = (at + 2..tokens.len()).find(|&i| tokens[i].is_punct(">"))?;
    if close_angle == at + 2 {
        return None;
    }
    if !at_tok(close_angle + 1)?.is_punct("(") {
        return None;
    }
    let name = at_tok(close_angle + 2)?;
    if name.kind != TokenKind::Str || name.text.trim().is_empty() {
        return None;
    }
    let exposed = name.text.trim();

    let after_name = close_angle + 3;
    let sep = at_tok(after_name)?;
    if sep.is_punct(")") && at_tok(after_name + 1)?.is_punct(";") {
        return Some(Registration {
            exposed,
            body: &tokens[after_name..after_name],
            next: after_name + 2,
        });
    }
    if !sep.is_punct(",") {
        return None;
    }

    // First `)` directly followed by `;`; not bracket-balanced.
    let body_start = after_name + 1;
    let end = (body_start..tokens.len().saturating_sub(1))
        .find(|&i| tokens[i].is_punct(")") && tokens[i + 1].is_punct(";"))?;

    Some(Registration {
        exposed,
        body: &tokens[body_start..end],
        next: end + 2,
    })
}

/// Collect keys and constructor lists from a registration body
fn apply_body(source: &str, body: &[Token<'_>], usertype: &mut UsertypeDescriptor) {
    for (i, tok) in body.iter().enumerate() {
        if tok.kind == TokenKind::Str && !tok.text.is_empty() {
            if body.get(i + 1).is_some_and(|next| next.is_punct(",")) {
                let key = tok.text.to_string();
                match classify_key(&key) {
                    MemberKind::Method => usertype.methods.insert(key),
                    MemberKind::Field => usertype.fields.insert(key),
                };
            }
            continue;
        }

        if let Some(signature) = constructor_signature(source, &body[i..]) {
            usertype.add_constructor(signature);
        }
    }
}

/// `sol :: constructors < ... >` at the start of `tokens`
fn constructor_signature<'a>(source: &'a str, tokens: &[Token<'_>]) -> Option<&'a str> {
    if tokens.len() < 5
        || !tokens[0].is_ident("sol")
        || !tokens[1].is_punct("::")
        || !tokens[2].is_ident("constructors")
        || !tokens[3].is_punct("<")
    {
        return None;
    }
    let close = (4..tokens.len()).find(|&i| tokens[i].is_punct(">"))?;
    if close == 4 {
        return None;
    }
    let signature = source[tokens[3].end..tokens[close].start].trim();
    (!signature.is_empty()).then_some(signature)
}
