//! Regex text parser
//!
//! Parses Python `re` syntax into the [`RegexNode`] tree. The node shapes
//! follow Python's own parser: a class with a single literal collapses to
//! `Literal`/`NotLiteral`, and a negated class carries [`SetItem::Negate`]
//! as its first item.

use crate::error::{Error, Result};
use crate::ir::{AnchorKind, Category, RegexNode, SetItem};

/// Parse a pattern into its top-level construct sequence
///
/// The empty pattern parses to an empty sequence; rejecting it is the
/// compiler's job.
pub fn parse(pattern: &str) -> Result<Vec<RegexNode>> {
    let mut parser = Parser::new(pattern);
    let nodes = parser.parse_alternation()?;

    match parser.peek() {
        Some(')') => Err(parser.syntax(parser.pos, "unbalanced parenthesis")),
        Some(c) => Err(parser.syntax(parser.pos, format!("unexpected character {:?}", c))),
        None => Ok(nodes),
    }
}

struct Parser<'a> {
    pattern: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(pattern: &'a str) -> Self {
        Self {
            pattern,
            chars: pattern.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn syntax(&self, offset: usize, message: impl Into<String>) -> Error {
        Error::PatternSyntax {
            pattern: self.pattern.to_string(),
            offset,
            message: message.into(),
        }
    }

    /// alternation := sequence ('|' sequence)*
    fn parse_alternation(&mut self) -> Result<Vec<RegexNode>> {
        let mut alternatives = vec![self.parse_sequence()?];
        while self.eat('|') {
            alternatives.push(self.parse_sequence()?);
        }

        if alternatives.len() == 1 {
            Ok(alternatives.swap_remove(0))
        } else {
            Ok(vec![RegexNode::Branch(alternatives)])
        }
    }

    fn parse_sequence(&mut self) -> Result<Vec<RegexNode>> {
        let mut items = Vec::new();

        while let Some(c) = self.peek() {
            let start = self.pos;
            match c {
                '|' | ')' => break,
                '?' => {
                    self.pos += 1;
                    self.push_repeat(&mut items, 0, Some(1), start)?;
                }
                '*' => {
                    self.pos += 1;
                    self.push_repeat(&mut items, 0, None, start)?;
                }
                '+' => {
                    self.pos += 1;
                    self.push_repeat(&mut items, 1, None, start)?;
                }
                '{' => match self.parse_braces()? {
                    Some((low, high)) => self.push_repeat(&mut items, low, high, start)?,
                    None => {
                        // Not a valid quantifier: Python reads the brace literally
                        self.pos += 1;
                        items.push(RegexNode::Literal('{'));
                    }
                },
                _ => {
                    if let Some(node) = self.parse_atom()? {
                        items.push(node);
                    }
                }
            }
        }

        Ok(items)
    }

    /// Wrap the last item of `items` in a repetition
    fn push_repeat(
        &mut self,
        items: &mut Vec<RegexNode>,
        low: u32,
        high: Option<u32>,
        start: usize,
    ) -> Result<()> {
        let item = match items.pop() {
            Some(item) if item.is_repeatable() => item,
            Some(RegexNode::MaxRepeat { .. }) => return Err(self.syntax(start, "multiple repeat")),
            _ => return Err(self.syntax(start, "nothing to repeat")),
        };

        if self.eat('?') {
            log::debug!(
                "lazy quantifier at offset {} in {:?} matches the same language as its greedy form",
                start,
                self.pattern
            );
        }

        items.push(RegexNode::repeat(low, high, vec![item]));
        Ok(())
    }

    /// Parse `{m}`, `{m,}`, `{,n}`, `{m,n}` starting at the current `{`
    ///
    /// Returns `None` and leaves the position untouched when the text is not
    /// a well-formed quantifier.
    fn parse_braces(&mut self) -> Result<Option<(u32, Option<u32>)>> {
        let start = self.pos;
        self.pos += 1;

        if self.peek() == Some('}') {
            self.pos = start;
            return Ok(None);
        }

        let lo = self.take_digits();
        let hi = if self.eat(',') {
            self.take_digits()
        } else {
            lo.clone()
        };

        if !self.eat('}') {
            self.pos = start;
            return Ok(None);
        }

        let low = match lo.as_str() {
            "" => 0,
            digits => self.repeat_count(digits, start)?,
        };
        let high = match hi.as_str() {
            "" => None,
            digits => Some(self.repeat_count(digits, start)?),
        };

        if let Some(high) = high {
            if high < low {
                return Err(self.syntax(start, "min repeat greater than max repeat"));
            }
        }

        Ok(Some((low, high)))
    }

    fn take_digits(&mut self) -> String {
        let mut digits = String::new();
        while let Some(c) = self.peek().filter(|c| c.is_ascii_digit()) {
            digits.push(c);
            self.pos += 1;
        }
        digits
    }

    fn repeat_count(&self, digits: &str, start: usize) -> Result<u32> {
        digits
            .parse::<u32>()
            .map_err(|_| self.syntax(start, "the repetition number is too large"))
    }

    /// Parse one atom; `None` for constructs that produce no node (comments)
    fn parse_atom(&mut self) -> Result<Option<RegexNode>> {
        let start = self.pos;
        let c = match self.next() {
            Some(c) => c,
            None => return Ok(None),
        };

        match c {
            '(' => self.parse_group(start),
            '[' => self.parse_class(start).map(Some),
            '.' => Ok(Some(RegexNode::AnyChar)),
            '^' => Ok(Some(RegexNode::Anchor(AnchorKind::StartOfLine))),
            '$' => Ok(Some(RegexNode::Anchor(AnchorKind::EndOfLine))),
            '\\' => self.parse_escape(start).map(Some),
            c => Ok(Some(RegexNode::Literal(c))),
        }
    }

    fn parse_group(&mut self, start: usize) -> Result<Option<RegexNode>> {
        if self.eat('?') {
            match self.next() {
                Some(':') => {}
                Some('P') => match self.next() {
                    Some('<') => self.parse_group_name(start)?,
                    Some('=') => return Err(Error::unsupported("backreference `(?P=...)`")),
                    _ => return Err(self.syntax(start, "unknown extension ?P")),
                },
                Some('<') => match self.peek() {
                    Some('=') | Some('!') => {
                        return Err(Error::unsupported("lookbehind assertion"));
                    }
                    _ => self.parse_group_name(start)?,
                },
                Some('=') | Some('!') => return Err(Error::unsupported("lookahead assertion")),
                Some('#') => {
                    while let Some(c) = self.next() {
                        if c == ')' {
                            return Ok(None);
                        }
                    }
                    return Err(self.syntax(start, "missing ), unterminated comment"));
                }
                Some('(') => return Err(Error::unsupported("conditional group")),
                Some(c) if c.is_ascii_alphabetic() || c == '-' => {
                    return Err(Error::unsupported(format!("inline flags `(?{}...)`", c)));
                }
                Some(c) => return Err(self.syntax(start, format!("unknown extension ?{}", c))),
                None => return Err(self.syntax(start, "unexpected end of pattern")),
            }
        }

        let body = self.parse_alternation()?;
        if !self.eat(')') {
            return Err(self.syntax(start, "missing ), unterminated subpattern"));
        }

        Ok(Some(RegexNode::Subpattern(body)))
    }

    /// Consume `name>` of a named group; names are not modeled beyond validation
    fn parse_group_name(&mut self, start: usize) -> Result<()> {
        let mut name = String::new();
        loop {
            match self.next() {
                Some('>') => break,
                Some(c) => name.push(c),
                None => return Err(self.syntax(start, "missing >, unterminated name")),
            }
        }

        let mut chars = name.chars();
        let valid = match chars.next() {
            None => return Err(self.syntax(start, "missing group name")),
            Some(first) => {
                (first.is_alphabetic() || first == '_')
                    && chars.all(|c| c.is_alphanumeric() || c == '_')
            }
        };

        if valid {
            Ok(())
        } else {
            Err(self.syntax(start, format!("bad character in group name {:?}", name)))
        }
    }

    /// Escape outside of a class; the backslash is already consumed
    fn parse_escape(&mut self, start: usize) -> Result<RegexNode> {
        let c = self
            .next()
            .ok_or_else(|| self.syntax(start, "bad escape (end of pattern)"))?;

        if let Some(category) = Category::from_escape(c) {
            return Ok(RegexNode::Category(category));
        }

        match c {
            'A' => Ok(RegexNode::Anchor(AnchorKind::StartOfText)),
            'Z' => Ok(RegexNode::Anchor(AnchorKind::EndOfText)),
            'b' => Ok(RegexNode::Anchor(AnchorKind::WordBoundary)),
            'B' => Ok(RegexNode::Anchor(AnchorKind::NonWordBoundary)),
            '1'..='9' => Err(Error::unsupported(format!("backreference `\\{}`", c))),
            c => self.parse_char_escape(c, start).map(RegexNode::Literal),
        }
    }

    /// Escapes that denote a single character, shared by both contexts
    fn parse_char_escape(&mut self, c: char, start: usize) -> Result<char> {
        match c {
            'n' => Ok('\n'),
            't' => Ok('\t'),
            'r' => Ok('\r'),
            'f' => Ok('\u{0c}'),
            'v' => Ok('\u{0b}'),
            'a' => Ok('\u{07}'),
            '0' => {
                let mut code = 0u32;
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(digit) => {
                            code = code * 8 + digit;
                            self.pos += 1;
                        }
                        None => break,
                    }
                }
                char::from_u32(code).ok_or_else(|| self.syntax(start, "bad octal escape"))
            }
            'x' => self.parse_hex_escape(2, start),
            'u' => self.parse_hex_escape(4, start),
            'U' => self.parse_hex_escape(8, start),
            'p' | 'P' => Err(Error::unsupported(format!(
                "unicode property escape `\\{}`",
                c
            ))),
            c if c.is_ascii_alphanumeric() => Err(self.syntax(start, format!("bad escape \\{}", c))),
            c => Ok(c),
        }
    }

    fn parse_hex_escape(&mut self, width: usize, start: usize) -> Result<char> {
        let mut code = 0u32;
        for _ in 0..width {
            let digit = self
                .peek()
                .and_then(|d| d.to_digit(16))
                .ok_or_else(|| self.syntax(start, "incomplete hexadecimal escape"))?;
            code = code * 16 + digit;
            self.pos += 1;
        }
        char::from_u32(code)
            .ok_or_else(|| self.syntax(start, format!("bad escape: invalid code point {:#x}", code)))
    }

    /// Character class; the opening `[` is already consumed
    fn parse_class(&mut self, start: usize) -> Result<RegexNode> {
        let negated = self.eat('^');
        let mut items = Vec::new();
        let mut first = true;

        loop {
            let item_start = self.pos;
            let c = self
                .next()
                .ok_or_else(|| self.syntax(start, "unterminated character set"))?;

            if c == ']' && !first {
                break;
            }
            first = false;

            let lo = if c == '\\' {
                self.parse_class_escape(item_start)?
            } else {
                SetItem::Literal(c)
            };

            if !self.eat('-') {
                items.push(lo);
                continue;
            }

            let range_start = self.pos;
            let hi = match self.next() {
                None => return Err(self.syntax(start, "unterminated character set")),
                Some(']') => {
                    // Trailing '-' is literal and the class ends here
                    items.push(lo);
                    items.push(SetItem::Literal('-'));
                    break;
                }
                Some('\\') => self.parse_class_escape(range_start)?,
                Some(c) => SetItem::Literal(c),
            };

            match (lo, hi) {
                (SetItem::Literal(lo), SetItem::Literal(hi)) if lo <= hi => {
                    items.push(SetItem::Range(lo, hi));
                }
                _ => return Err(self.syntax(item_start, "bad character range")),
            }
        }

        Ok(match (negated, items.as_slice()) {
            (false, [SetItem::Literal(c)]) => RegexNode::Literal(*c),
            (true, [SetItem::Literal(c)]) => RegexNode::NotLiteral(*c),
            _ => {
                if negated {
                    items.insert(0, SetItem::Negate);
                }
                RegexNode::CharSet { items, negated }
            }
        })
    }

    /// Escape inside a class; the backslash is already consumed
    fn parse_class_escape(&mut self, start: usize) -> Result<SetItem> {
        let c = self
            .next()
            .ok_or_else(|| self.syntax(start, "bad escape (end of pattern)"))?;

        if let Some(category) = Category::from_escape(c) {
            return Ok(SetItem::Category(category));
        }

        match c {
            'b' => Ok(SetItem::Literal('\u{08}')),
            c => self.parse_char_escape(c, start).map(SetItem::Literal),
        }
    }
}
