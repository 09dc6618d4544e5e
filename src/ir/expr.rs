//! Symbolic regex algebra understood by the solver backend

use std::fmt;

/// Highest code point matched by `.` and used as the universe for negation
pub const ANY_CHAR_MAX: char = '\u{7f}';

/// A regex-algebra expression
///
/// Trees are built bottom-up by the compiler and never shared or mutated,
/// so structural equality is the notion of "same expression".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymbolicExpr {
    Char(char),
    Range(char, char),
    Concat(Vec<SymbolicExpr>),
    Union(Vec<SymbolicExpr>),
    Intersect(Vec<SymbolicExpr>),
    Complement(Box<SymbolicExpr>),
    Star(Box<SymbolicExpr>),
    Plus(Box<SymbolicExpr>),
    Optional(Box<SymbolicExpr>),
    /// `expr{low,high}`; `high` is `None` when unbounded
    Loop {
        expr: Box<SymbolicExpr>,
        low: u32,
        high: Option<u32>,
    },
}

impl SymbolicExpr {
    /// Every ASCII character, 0 through 127 inclusive
    pub fn any_char() -> Self {
        SymbolicExpr::Range('\0', ANY_CHAR_MAX)
    }

    /// Set difference `lhs \ rhs`
    pub fn minus(lhs: SymbolicExpr, rhs: SymbolicExpr) -> Self {
        SymbolicExpr::Intersect(vec![lhs, SymbolicExpr::complement(rhs)])
    }

    pub fn complement(expr: SymbolicExpr) -> Self {
        SymbolicExpr::Complement(Box::new(expr))
    }

    pub fn star(expr: SymbolicExpr) -> Self {
        SymbolicExpr::Star(Box::new(expr))
    }

    pub fn plus(expr: SymbolicExpr) -> Self {
        SymbolicExpr::Plus(Box::new(expr))
    }

    pub fn optional(expr: SymbolicExpr) -> Self {
        SymbolicExpr::Optional(Box::new(expr))
    }

    pub fn bounded(expr: SymbolicExpr, low: u32, high: Option<u32>) -> Self {
        SymbolicExpr::Loop {
            expr: Box::new(expr),
            low,
            high,
        }
    }

    /// Strings that contain a match of `expr` somewhere: `.*(expr).*`
    pub fn containing(expr: SymbolicExpr) -> Self {
        SymbolicExpr::Concat(vec![
            SymbolicExpr::star(SymbolicExpr::any_char()),
            expr,
            SymbolicExpr::star(SymbolicExpr::any_char()),
        ])
    }
}

/// Write a character the way SMT-LIB string literals spell it
fn write_char(f: &mut fmt::Formatter<'_>, c: char) -> fmt::Result {
    if (' '..'\u{7f}').contains(&c) && c != '"' && c != '\\' {
        write!(f, "{}", c)
    } else {
        write!(f, "\\u{{{:x}}}", c as u32)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, op: &str, items: &[SymbolicExpr]) -> fmt::Result {
    write!(f, "({}", op)?;
    for item in items {
        write!(f, " {}", item)?;
    }
    write!(f, ")")
}

/// SMT-LIB rendering, used for verbose and debug output
impl fmt::Display for SymbolicExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolicExpr::Char(c) => {
                write!(f, "(str.to_re \"")?;
                write_char(f, *c)?;
                write!(f, "\")")
            }
            SymbolicExpr::Range(lo, hi) => {
                write!(f, "(re.range \"")?;
                write_char(f, *lo)?;
                write!(f, "\" \"")?;
                write_char(f, *hi)?;
                write!(f, "\")")
            }
            SymbolicExpr::Concat(items) => write_list(f, "re.++", items),
            SymbolicExpr::Union(items) => write_list(f, "re.union", items),
            SymbolicExpr::Intersect(items) => write_list(f, "re.inter", items),
            SymbolicExpr::Complement(inner) => write!(f, "(re.comp {})", inner),
            SymbolicExpr::Star(inner) => write!(f, "(re.* {})", inner),
            SymbolicExpr::Plus(inner) => write!(f, "(re.+ {})", inner),
            SymbolicExpr::Optional(inner) => write!(f, "(re.opt {})", inner),
            SymbolicExpr::Loop { expr, low, high } => match high {
                Some(high) => write!(f, "((_ re.loop {} {}) {})", low, high, expr),
                None => write!(f, "(re.++ ((_ re.loop {} {}) {}) (re.* {}))", low, low, expr, expr),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_any_char_covers_ascii() {
        assert_eq!(SymbolicExpr::any_char(), SymbolicExpr::Range('\0', '\u{7f}'));
    }

    #[test]
    fn test_minus_is_intersection_with_complement() {
        let diff = SymbolicExpr::minus(SymbolicExpr::any_char(), SymbolicExpr::Char('a'));
        assert_eq!(
            diff,
            SymbolicExpr::Intersect(vec![
                SymbolicExpr::any_char(),
                SymbolicExpr::Complement(Box::new(SymbolicExpr::Char('a'))),
            ])
        );
    }

    #[test]
    fn test_containing_wraps_in_any_star() {
        let any_star = SymbolicExpr::star(SymbolicExpr::any_char());
        assert_eq!(
            SymbolicExpr::containing(SymbolicExpr::Char('b')),
            SymbolicExpr::Concat(vec![any_star.clone(), SymbolicExpr::Char('b'), any_star])
        );
    }

    #[test]
    fn test_display_smtlib() {
        let expr = SymbolicExpr::Concat(vec![
            SymbolicExpr::Char('a'),
            SymbolicExpr::optional(SymbolicExpr::Range('0', '9')),
        ]);
        assert_eq!(
            expr.to_string(),
            "(re.++ (str.to_re \"a\") (re.opt (re.range \"0\" \"9\")))"
        );
        assert_eq!(
            SymbolicExpr::any_char().to_string(),
            "(re.range \"\\u{0}\" \"\\u{7f}\")"
        );
        assert_eq!(
            SymbolicExpr::bounded(SymbolicExpr::Char('x'), 2, Some(3)).to_string(),
            "((_ re.loop 2 3) (str.to_re \"x\"))"
        );
    }
}
