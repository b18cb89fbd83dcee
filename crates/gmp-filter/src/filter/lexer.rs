//! Lexer (tokenizer) for filter expressions.

use std::iter::Peekable;
use std::str::Chars;

use super::error::FilterError;

/// Characters that separate a keyword from its value.
const RELATION_CHARS: [char; 5] = ['=', '~', '>', '<', ':'];

/// A raw, unconverted term as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTerm {
    /// Text before the relation (empty for bare values).
    pub keyword: String,
    /// The relation characters as typed (empty for bare values).
    pub relation: String,
    /// The value, unquoted.
    pub value: String,
    /// Whether any part of the value was double-quoted.
    pub quoted: bool,
}

impl RawTerm {
    fn bare(value: String, quoted: bool) -> Self {
        Self {
            keyword: String::new(),
            relation: String::new(),
            value,
            quoted,
        }
    }
}

/// A raw term with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedTerm {
    /// The raw term.
    pub term: RawTerm,
    /// The byte position where the term starts (0-indexed).
    pub position: usize,
}

/// Result of tokenizing a filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerResult {
    /// The terms successfully read, in input order.
    pub terms: Vec<PositionedTerm>,
    /// Fragments that were dropped or degraded.
    pub errors: Vec<FilterError>,
}

/// Lexer for filter expressions.
///
/// Splits the input at whitespace (outside double quotes) and each token at
/// its first run of relation characters.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    position: usize,
    errors: Vec<FilterError>,
}

fn is_relation_char(c: char) -> bool {
    RELATION_CHARS.contains(&c)
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
            errors: Vec::new(),
        }
    }

    /// Peeks at the next character without consuming it.
    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    /// Consumes and returns the next character, updating position.
    fn next_char(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            self.position += ch.len_utf8();
        }
        c
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(&c) = self.peek() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Reads a double-quoted string, consuming both quotes.
    ///
    /// `\"` and `\\` are unescaped. A missing closing quote consumes the rest
    /// of the input and is recorded as an error.
    fn read_quoted_string(&mut self) -> String {
        let start = self.position;
        // Consume the opening quote
        self.next_char();

        let mut result = String::new();
        loop {
            match self.next_char() {
                Some('"') => return result,
                Some('\\') => {
                    if let Some(escaped) = self.next_char() {
                        result.push(escaped);
                    }
                }
                Some(c) => result.push(c),
                None => {
                    tracing::debug!(position = start, "unterminated quote in filter");
                    self.errors.push(FilterError::UnterminatedQuote { position: start });
                    return result;
                }
            }
        }
    }

    /// Reads up to whitespace, unquoting any double-quoted sections.
    ///
    /// With `stop_at_relation`, also stops before a relation character.
    /// Returns the text and whether a quoted section was seen.
    fn read_segment(&mut self, stop_at_relation: bool) -> (String, bool) {
        let mut segment = String::new();
        let mut quoted = false;

        while let Some(&c) = self.peek() {
            if c.is_whitespace() || (stop_at_relation && is_relation_char(c)) {
                break;
            }
            if c == '"' {
                segment.push_str(&self.read_quoted_string());
                quoted = true;
            } else if let Some(c) = self.next_char() {
                segment.push(c);
            }
        }

        (segment, quoted)
    }

    /// Reads a run of relation characters.
    fn read_relation(&mut self) -> String {
        let mut relation = String::new();
        while let Some(&c) = self.peek() {
            if !is_relation_char(c) {
                break;
            }
            relation.push(c);
            self.next_char();
        }
        relation
    }

    /// Returns the next term with its position, or None at end of input.
    ///
    /// Fragments that cannot form a term (a keyword and relation without a
    /// value) are recorded as errors and skipped.
    pub fn next_term(&mut self) -> Option<PositionedTerm> {
        loop {
            self.skip_whitespace();
            self.peek()?;
            let start = self.position;

            let (head, head_quoted) = self.read_segment(true);
            let relation = self.read_relation();

            if relation.is_empty() {
                return Some(PositionedTerm {
                    term: RawTerm::bare(head, head_quoted),
                    position: start,
                });
            }

            let (value, value_quoted) = self.read_segment(false);

            if head_quoted {
                // A quoted keyword is not a keyword; keep the text as typed.
                return Some(PositionedTerm {
                    term: RawTerm::bare(format!("{head}{relation}{value}"), true),
                    position: start,
                });
            }

            if value.is_empty() && !value_quoted {
                let fragment = format!("{head}{relation}");
                tracing::debug!(%fragment, position = start, "dropping term without value");
                self.errors.push(FilterError::malformed_term(fragment, start));
                continue;
            }

            if relation.chars().count() > 1 {
                tracing::debug!(%relation, position = start, "unknown relation in filter");
                self.errors.push(FilterError::UnknownRelation {
                    relation: relation.clone(),
                    position: start + head.len(),
                });
            }

            return Some(PositionedTerm {
                term: RawTerm {
                    keyword: head,
                    relation,
                    value,
                    quoted: value_quoted,
                },
                position: start,
            });
        }
    }

    /// Collects all terms (without positions).
    #[cfg(test)]
    pub fn tokenize(self) -> Vec<RawTerm> {
        self.tokenize_with_errors()
            .terms
            .into_iter()
            .map(|pt| pt.term)
            .collect()
    }

    /// Collects all terms and any errors encountered.
    pub fn tokenize_with_errors(mut self) -> LexerResult {
        let mut terms = Vec::new();
        while let Some(positioned_term) = self.next_term() {
            terms.push(positioned_term);
        }
        LexerResult {
            terms,
            errors: self.errors,
        }
    }
}
