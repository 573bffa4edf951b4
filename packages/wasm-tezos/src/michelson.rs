//! Michelson literals to Micheline JSON
//!
//! Turns contract call arguments such as `Pair 0 (Pair "a" 255)` into the JSON
//! form carried in `Transaction::parameters`:
//!
//! - `"text"` becomes `{ "string": "text" }`
//! - `42` becomes `{ "int": "42" }`
//! - `0xbeef` becomes `{ "bytes": "beef" }`
//! - `Prim a b` becomes `{ "prim": "Prim", "args": [a, b] }` and a bare `Prim`
//!   becomes `{ "prim": "Prim" }`

use crate::error::WasmTezosError;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Open,
    Close,
    Str(String),
    Int(String),
    Bytes(String),
    Prim(String),
}

fn tokenize(text: &str) -> Result<Vec<Token>, WasmTezosError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ')' => {
                chars.next();
                tokens.push(Token::Close);
            }
            '"' => {
                chars.next();
                let mut value = String::new();
                let mut closed = false;
                while let Some((_, c)) = chars.next() {
                    match c {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\\' => match chars.next() {
                            Some((_, escaped)) => value.push(escaped),
                            None => break,
                        },
                        c => value.push(c),
                    }
                }
                if !closed {
                    return Err(WasmTezosError::InvalidInput(format!(
                        "Unterminated string in {:?}",
                        text
                    )));
                }
                tokens.push(Token::Str(value));
            }
            _ => {
                let mut end = text.len();
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_whitespace() || c == '(' || c == ')' || c == '"' {
                        end = i;
                        break;
                    }
                    chars.next();
                }
                tokens.push(classify(&text[start..end], text)?);
            }
        }
    }

    Ok(tokens)
}

fn classify(word: &str, text: &str) -> Result<Token, WasmTezosError> {
    if let Some(hex) = word.strip_prefix("0x") {
        if hex.len() % 2 == 0 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(Token::Bytes(hex.to_ascii_lowercase()));
        }
    } else {
        let digits = word.strip_prefix('-').unwrap_or(word);
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            return Ok(Token::Int(word.to_string()));
        }
        if word.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            && word.starts_with(|c: char| c.is_ascii_uppercase())
        {
            return Ok(Token::Prim(word.to_string()));
        }
    }
    Err(WasmTezosError::InvalidInput(format!(
        "Unexpected token {:?} in {:?}",
        word, text
    )))
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    text: &'a str,
}

impl Parser<'_> {
    fn error(&self, reason: &str) -> WasmTezosError {
        WasmTezosError::InvalidInput(format!("{} in {:?}", reason, self.text))
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// A primitive application or a single literal
    fn expression(&mut self) -> Result<Value, WasmTezosError> {
        let Some(Token::Prim(name)) = self.peek().cloned() else {
            return self.argument();
        };
        self.pos += 1;

        let mut args = Vec::new();
        while !matches!(self.peek(), None | Some(Token::Close)) {
            args.push(self.argument()?);
        }
        if args.is_empty() {
            Ok(json!({ "prim": name }))
        } else {
            Ok(json!({ "prim": name, "args": args }))
        }
    }

    /// A literal, a bare primitive or a parenthesized expression
    fn argument(&mut self) -> Result<Value, WasmTezosError> {
        match self.next() {
            Some(Token::Str(value)) => Ok(json!({ "string": value })),
            Some(Token::Int(value)) => Ok(json!({ "int": value })),
            Some(Token::Bytes(value)) => Ok(json!({ "bytes": value })),
            Some(Token::Prim(name)) => Ok(json!({ "prim": name })),
            Some(Token::Open) => {
                let value = self.expression()?;
                match self.next() {
                    Some(Token::Close) => Ok(value),
                    _ => Err(self.error("Unbalanced parentheses")),
                }
            }
            Some(Token::Close) => Err(self.error("Unbalanced parentheses")),
            None => Err(self.error("Unexpected end of input")),
        }
    }
}

/// Encode a Michelson literal as Micheline JSON
pub fn encode_args(text: &str) -> Result<Value, WasmTezosError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(WasmTezosError::InvalidInput("Empty Michelson expression".to_string()));
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        text,
    };
    let value = parser.expression()?;
    if parser.peek().is_some() {
        return Err(parser.error("Unbalanced parentheses"));
    }

    tracing::trace!(len = text.len(), "encoded michelson arguments");
    Ok(value)
}
