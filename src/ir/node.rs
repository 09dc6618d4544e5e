//! Regex abstract syntax tree produced by the parser

use std::fmt;

/// Shorthand character categories (`\d`, `\D`, `\s`, `\S`, `\w`, `\W`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Digit,
    NotDigit,
    Space,
    NotSpace,
    Word,
    NotWord,
}

impl Category {
    /// Map the letter following a backslash to its category
    pub fn from_escape(c: char) -> Option<Self> {
        match c {
            'd' => Some(Category::Digit),
            'D' => Some(Category::NotDigit),
            's' => Some(Category::Space),
            'S' => Some(Category::NotSpace),
            'w' => Some(Category::Word),
            'W' => Some(Category::NotWord),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let escape = match self {
            Category::Digit => "\\d",
            Category::NotDigit => "\\D",
            Category::Space => "\\s",
            Category::NotSpace => "\\S",
            Category::Word => "\\w",
            Category::NotWord => "\\W",
        };
        write!(f, "{}", escape)
    }
}

/// Zero-width position assertions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    /// `^`
    StartOfLine,
    /// `\A`
    StartOfText,
    /// `$`
    EndOfLine,
    /// `\Z`
    EndOfText,
    /// `\b`
    WordBoundary,
    /// `\B`
    NonWordBoundary,
}

impl fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorKind::StartOfLine => write!(f, "anchor `^`"),
            AnchorKind::StartOfText => write!(f, "anchor `\\A`"),
            AnchorKind::EndOfLine => write!(f, "anchor `$`"),
            AnchorKind::EndOfText => write!(f, "anchor `\\Z`"),
            AnchorKind::WordBoundary => write!(f, "word boundary `\\b`"),
            AnchorKind::NonWordBoundary => write!(f, "non-word boundary `\\B`"),
        }
    }
}

/// One entry of a character class
///
/// A negated class carries `Negate` as its first item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetItem {
    Negate,
    Literal(char),
    Range(char, char),
    Category(Category),
}

/// A node of the parsed regex tree
///
/// Sequences (the top level, group bodies, repeated items and branch
/// alternatives) are plain `Vec<RegexNode>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegexNode {
    /// `a`
    Literal(char),
    /// `[^a]`
    NotLiteral(char),
    /// `.`
    AnyChar,
    /// `(...)`, `(?:...)`, `(?P<name>...)`
    Subpattern(Vec<RegexNode>),
    /// `x?`, `x*`, `x+`, `x{m,n}`; `high` is `None` when unbounded
    MaxRepeat {
        low: u32,
        high: Option<u32>,
        child: Vec<RegexNode>,
    },
    /// `[abc]`, `[^a-z\d]`
    CharSet { items: Vec<SetItem>, negated: bool },
    /// `ab|cd`
    Branch(Vec<Vec<RegexNode>>),
    /// `a-z` outside of a class context
    Range(char, char),
    /// `\d`, `\s`, `\w` and their negations
    Category(Category),
    /// `^`, `$`, `\A`, `\Z`, `\b`, `\B`
    Anchor(AnchorKind),
}

impl RegexNode {
    pub fn repeat(low: u32, high: Option<u32>, child: Vec<RegexNode>) -> Self {
        RegexNode::MaxRepeat { low, high, child }
    }

    /// Whether a quantifier may follow this node
    pub fn is_repeatable(&self) -> bool {
        !matches!(self, RegexNode::Anchor(_) | RegexNode::MaxRepeat { .. })
    }
}
