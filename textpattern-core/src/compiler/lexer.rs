use core::{
    ops::Range,
    str::CharIndices,
};

use super::{
    ParseError,
    PositionedError,
};

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Token<'a> {
    /// Join operator: "+"
    Join,

    /// A quoted text: "\"...\""
    /// Contains the text between the quotes with escape sequences still in place.
    Text(&'a str),

    /// A run of uppercase letters and underscores naming a method: "RANDOM"
    Identifier(&'a str),

    /// Argument list open token: "("
    GroupOpen,
    /// Argument list close token: ")"
    GroupClose,

    /// The raw method argument between "(" and ")".
    /// Only emitted on request of the parser, see [Lexer::method_argument].
    Argument(&'a str),

    /// Any character which does not start a token
    Unknown(char),
}

pub struct Lexer<'a> {
    input: &'a str,
    iter: CharIndices<'a>,

    token_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            iter: input.char_indices(),

            token_start: 0,
        }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn token_range(&self) -> Range<usize> {
        self.token_start..self.iter.offset()
    }

    fn is_identifier_char(value: char) -> bool {
        value.is_ascii_uppercase() || value == '_'
    }

    /// Get the token from a specific char if the character is a token on its own
    fn char_to_token(&self, value: char) -> Option<Token<'a>> {
        Some(match value {
            '+' => Token::Join,
            '(' => Token::GroupOpen,
            ')' => Token::GroupClose,
            _ => return None,
        })
    }

    pub fn next_token(&mut self) -> Result<Option<Token<'a>>, PositionedError<ParseError>> {
        loop {
            let Some((token_pos, token)) = self.iter.next() else {
                /* end reached */
                self.token_start = self.input.len();
                return Ok(None);
            };

            if token.is_whitespace() {
                /* whitespaces between tokens are insignificant */
                continue;
            }

            self.token_start = token_pos;
            if token == '"' {
                return self.quoted_text().map(Some);
            }

            if let Some(token) = self.char_to_token(token) {
                return Ok(Some(token));
            }

            if Self::is_identifier_char(token) {
                let mut iter_local = self.iter.clone();
                let token_end = loop {
                    let Some((position, token)) = iter_local.next() else {
                        break self.input.len();
                    };

                    if !Self::is_identifier_char(token) {
                        break position;
                    }

                    self.iter.next();
                };

                return Ok(Some(Token::Identifier(&self.input[token_pos..token_end])));
            }

            return Ok(Some(Token::Unknown(token)));
        }
    }

    /// Lex the remainder of a quoted text. The opening quote has already been consumed.
    fn quoted_text(&mut self) -> Result<Token<'a>, PositionedError<ParseError>> {
        let content_start = self.token_start + 1;
        loop {
            let Some((position, token)) = self.iter.next() else {
                return Err(PositionedError::new(
                    self.token_start..self.input.len(),
                    ParseError::UnterminatedText,
                ));
            };

            match token {
                '\\' => {
                    /* an escaped quote does not terminate the text */
                    if matches!(self.iter.clone().next(), Some((_, '"'))) {
                        self.iter.next();
                    }
                }
                '"' => return Ok(Token::Text(&self.input[content_start..position])),
                _ => {}
            }
        }
    }

    /// Consume the given character if it immediately follows the last token.
    /// Whitespaces are not skipped.
    pub fn next_is(&mut self, expected: char) -> bool {
        let mut iter_local = self.iter.clone();
        match iter_local.next() {
            Some((position, value)) if value == expected => {
                self.token_start = position;
                self.iter = iter_local;
                true
            }
            _ => false,
        }
    }

    /// Lex the argument of a method up to the closing ")".
    /// The closing parenthesis is consumed but not part of the argument,
    /// the token range however includes it.
    ///
    /// Returns `None` if the input ends before the argument has been closed.
    pub fn method_argument(&mut self) -> Option<Token<'a>> {
        let argument_start = self.iter.offset();
        loop {
            let (position, token) = self.iter.next()?;
            if token == ')' {
                self.token_start = argument_start;
                return Some(Token::Argument(&self.input[argument_start..position]));
            }
        }
    }
}

/// Replace the escaped quotes of a text token with plain quotes.
pub fn unescape_text(value: &str) -> alloc::string::String {
    value.replace("\\\"", "\"")
}
