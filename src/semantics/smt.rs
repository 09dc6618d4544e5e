//! Z3 binding for the symbolic regex algebra

use crate::ir::SymbolicExpr;
use std::time::Duration;
use z3::ast::Regexp;
use z3::{Params, Solver};

/// Configuration for the SMT solver
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Timeout for each satisfiability check (None means no timeout)
    pub timeout: Option<Duration>,
}

impl SolverConfig {
    /// Create a config with no timeout
    pub fn no_timeout() -> Self {
        Self { timeout: None }
    }

    /// Create a config with a specific timeout in seconds
    pub fn with_timeout_secs(secs: u64) -> Self {
        Self {
            timeout: Some(Duration::from_secs(secs)),
        }
    }
}

/// Create a Z3 solver with the given configuration
pub fn create_solver_with_config(cfg: &SolverConfig) -> Solver {
    let solver = Solver::new();
    if let Some(timeout) = cfg.timeout {
        let mut params = Params::new();
        params.set_u32("timeout", timeout.as_millis().min(u32::MAX as u128) as u32);
        solver.set_params(&params);
    }
    solver
}

/// Lower an algebra expression to a Z3 regular expression
pub fn lower(expr: &SymbolicExpr) -> Regexp {
    match expr {
        SymbolicExpr::Char(c) => Regexp::literal(&escape_char(*c)),
        SymbolicExpr::Range(lo, hi) => lower_range(*lo, *hi),
        SymbolicExpr::Concat(items) => match lower_all(items).as_slice() {
            [] => Regexp::literal(""),
            [single] => single.clone(),
            parts => Regexp::concat(&parts.iter().collect::<Vec<_>>()),
        },
        SymbolicExpr::Union(items) => match lower_all(items).as_slice() {
            [] => Regexp::empty(),
            [single] => single.clone(),
            parts => Regexp::union(&parts.iter().collect::<Vec<_>>()),
        },
        SymbolicExpr::Intersect(items) => match lower_all(items).as_slice() {
            [] => Regexp::full(),
            [single] => single.clone(),
            parts => Regexp::intersect(&parts.iter().collect::<Vec<_>>()),
        },
        SymbolicExpr::Complement(inner) => lower(inner).complement(),
        SymbolicExpr::Star(inner) => lower(inner).star(),
        SymbolicExpr::Plus(inner) => lower(inner).plus(),
        SymbolicExpr::Optional(inner) => lower(inner).option(),
        SymbolicExpr::Loop { expr, low, high } => {
            let inner = lower(expr);
            match high {
                Some(high) => inner.r#loop(*low, *high),
                None => Regexp::concat(&[&inner.r#loop(*low, *low), &inner.star()]),
            }
        }
    }
}

fn lower_all(items: &[SymbolicExpr]) -> Vec<Regexp> {
    items.iter().map(lower).collect()
}

fn lower_range(lo: char, hi: char) -> Regexp {
    if lo > hi {
        return Regexp::empty();
    }
    if lo != '\0' {
        return Regexp::range(&lo, &hi);
    }

    // NUL cannot be passed to `range` as a C string; spell it as an escape
    let nul = Regexp::literal(&escape_char('\0'));
    if hi == '\0' {
        nul
    } else {
        Regexp::union(&[&nul, &Regexp::range(&'\u{1}', &hi)])
    }
}

/// Z3 string-constant escape for a single character
pub fn escape_char(c: char) -> String {
    format!("\\u{{{:x}}}", c as u32)
}

/// Escape every character so Z3 reads the text back verbatim
pub fn escape_literal(s: &str) -> String {
    s.chars().map(escape_char).collect()
}

/// Decode the escapes Z3 uses when printing string values
///
/// Handles `\u{h..h}`, `\uhhhh` and `\xhh`; any other backslash is literal.
pub fn unescape_model_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '\\' {
            if let Some((c, used)) = decode_escape(&chars[i + 1..]) {
                out.push(c);
                i += 1 + used;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out
}

/// Decode one escape body (the text after the backslash)
fn decode_escape(rest: &[char]) -> Option<(char, usize)> {
    fn hex(digits: &[char]) -> Option<char> {
        if digits.is_empty() || !digits.iter().all(|d| d.is_ascii_hexdigit()) {
            return None;
        }
        let text: String = digits.iter().collect();
        char::from_u32(u32::from_str_radix(&text, 16).ok()?)
    }

    match rest {
        ['u', '{', tail @ ..] => {
            let close = tail.iter().position(|&c| c == '}')?;
            if close > 5 {
                return None;
            }
            Some((hex(&tail[..close])?, close + 3))
        }
        ['u', digits @ ..] if digits.len() >= 4 => Some((hex(&digits[..4])?, 5)),
        ['x', digits @ ..] if digits.len() >= 2 => Some((hex(&digits[..2])?, 3)),
        _ => None,
    }
}
