//! Regex semantics compiler: `RegexNode` trees to the symbolic regex algebra

use crate::error::{Error, Result};
use crate::ir::{Category, RegexNode, SetItem, SymbolicExpr};

/// Compile a construct sequence (a whole pattern, a group body, a repeated
/// item or a branch alternative)
///
/// A single construct compiles directly, without a wrapping concatenation.
pub fn compile_sequence(nodes: &[RegexNode]) -> Result<SymbolicExpr> {
    match nodes {
        [] => Err(Error::EmptyRegex),
        [node] => compile(node),
        nodes => nodes
            .iter()
            .map(compile)
            .collect::<Result<Vec<_>>>()
            .map(SymbolicExpr::Concat),
    }
}

/// Compile a single construct
pub fn compile(node: &RegexNode) -> Result<SymbolicExpr> {
    match node {
        RegexNode::Literal(c) => Ok(SymbolicExpr::Char(*c)),
        RegexNode::NotLiteral(c) => Ok(SymbolicExpr::minus(
            SymbolicExpr::any_char(),
            SymbolicExpr::Char(*c),
        )),
        RegexNode::AnyChar => Ok(SymbolicExpr::any_char()),
        // Captures are not modeled, so a group is just its body
        RegexNode::Subpattern(children) => compile_sequence(children),
        RegexNode::MaxRepeat { low, high, child } => {
            let inner = compile_sequence(child)?;
            Ok(match (*low, *high) {
                (0, Some(1)) => SymbolicExpr::optional(inner),
                (0, None) => SymbolicExpr::star(inner),
                (1, None) => SymbolicExpr::plus(inner),
                (low, high) => SymbolicExpr::bounded(inner, low, high),
            })
        }
        RegexNode::CharSet { items, negated } => {
            if *negated {
                // items[0] is the negation marker
                let members = items.get(1..).unwrap_or_default();
                Ok(SymbolicExpr::minus(
                    SymbolicExpr::any_char(),
                    compile_set_items(members)?,
                ))
            } else {
                compile_set_items(items)
            }
        }
        RegexNode::Branch(alternatives) => alternatives
            .iter()
            .map(|alt| compile_sequence(alt))
            .collect::<Result<Vec<_>>>()
            .map(SymbolicExpr::Union),
        RegexNode::Range(lo, hi) => Ok(SymbolicExpr::Range(*lo, *hi)),
        RegexNode::Category(category) => Ok(compile_category(*category)),
        RegexNode::Anchor(kind) => Err(Error::unsupported(kind.to_string())),
    }
}

fn compile_set_items(items: &[SetItem]) -> Result<SymbolicExpr> {
    items
        .iter()
        .map(compile_set_item)
        .collect::<Result<Vec<_>>>()
        .map(SymbolicExpr::Union)
}

fn compile_set_item(item: &SetItem) -> Result<SymbolicExpr> {
    match item {
        SetItem::Literal(c) => Ok(SymbolicExpr::Char(*c)),
        SetItem::Range(lo, hi) => Ok(SymbolicExpr::Range(*lo, *hi)),
        SetItem::Category(category) => Ok(compile_category(*category)),
        SetItem::Negate => Err(Error::unsupported(
            "negation marker in a non-leading class position",
        )),
    }
}

/// Translate a category; negated categories are `AnyChar` minus the positive one
pub fn compile_category(category: Category) -> SymbolicExpr {
    match category {
        Category::Digit => SymbolicExpr::Range('0', '9'),
        Category::Space => SymbolicExpr::Union(
            [' ', '\t', '\n', '\r', '\u{0c}', '\u{0b}']
                .into_iter()
                .map(SymbolicExpr::Char)
                .collect(),
        ),
        Category::Word => SymbolicExpr::Union(vec![
            SymbolicExpr::Range('a', 'z'),
            SymbolicExpr::Range('A', 'Z'),
            SymbolicExpr::Range('0', '9'),
            SymbolicExpr::Char('_'),
        ]),
        Category::NotDigit => negate_category(Category::Digit),
        Category::NotSpace => negate_category(Category::Space),
        Category::NotWord => negate_category(Category::Word),
    }
}

fn negate_category(positive: Category) -> SymbolicExpr {
    SymbolicExpr::minus(SymbolicExpr::any_char(), compile_category(positive))
}

/// Parse and compile a pattern in one step
pub fn compile_pattern(pattern: &str) -> Result<SymbolicExpr> {
    let nodes = crate::parser::parse(pattern)?;
    compile_sequence(&nodes)
}
