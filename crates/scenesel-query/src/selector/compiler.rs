//! Token stream to selector groups.
//!
//! A single left-to-right pass. The compiler keeps one group under
//! construction; whitespace flushes it. Inside `[...]` words, strings and
//! operator characters feed the open attribute selector, which is always the
//! last selector of the current group.
//!
//! Malformed input never fails: unknown punctuation is dropped, a stray `]`
//! is a no-op, and a bare string outside brackets is ignored.

use scenesel_common::warning::warn_once;

use super::{AttributeSelector, OPERATOR_CHARS, Selector, SelectorGroup};
use crate::tokenizer::{Token, tokenize};

/// Compile selector text into an ordered list of groups.
///
/// Never fails; an empty or whitespace-only selector compiles to no groups.
#[must_use]
pub fn compile(raw: &str) -> Vec<SelectorGroup> {
    compile_tokens(tokenize(raw))
}

/// Compile an already tokenized selector.
#[must_use]
pub fn compile_tokens(tokens: impl IntoIterator<Item = Token>) -> Vec<SelectorGroup> {
    let mut compiler = SelectorCompiler::default();
    for token in tokens {
        compiler.feed(token);
    }
    compiler.finish()
}

#[derive(Debug, Default)]
struct SelectorCompiler {
    groups: Vec<SelectorGroup>,
    current: SelectorGroup,
}

impl SelectorCompiler {
    fn feed(&mut self, token: Token) {
        match token {
            // [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
            Token::Whitespace => self.flush(),

            Token::Hash(id) => self.push(Selector::ById(id)),

            Token::Delim(c) => self.delim(c),

            Token::Ident(word) => match self.open_attribute() {
                Some(attr) => attr.push_param(word),
                None => self.push(Selector::ByType(word)),
            },

            Token::String(literal) => match self.open_attribute() {
                Some(attr) => attr.push_param(literal),
                None => {
                    log::debug!(target: "selector", "string \"{literal}\" outside brackets ignored");
                }
            },

            Token::Function(name) => warn_once(
                "selector",
                &format!("functional notation '{name}(' is not supported and was ignored"),
            ),

            Token::Number(_) | Token::BadString => {
                log::debug!(target: "selector", "ignored token {token:?}");
            }

            Token::EOF => {}
        }
    }

    fn delim(&mut self, c: char) {
        // `]` and operator characters belong to an open attribute selector
        // before they mean anything else.
        if let Some(attr) = self.open_attribute() {
            if c == ']' {
                attr.close();
                return;
            }
            if OPERATOR_CHARS.contains(&c) {
                attr.push_operator(c);
                return;
            }
        }

        match c {
            // [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
            '>' => self.current.direct_children_only = true,
            '[' => self.push(Selector::ByAttribute(AttributeSelector::new())),
            '*' => self.push(Selector::All),
            '.' => warn_once("selector", "class selectors ('.') are not supported"),
            ':' => warn_once("selector", "pseudo-classes (':') are not supported"),
            ',' => warn_once("selector", "selector lists (',') are not supported"),
            '+' | '~' => warn_once(
                "selector",
                &format!("sibling combinator '{c}' is not supported"),
            ),
            _ => log::trace!(target: "selector", "dropped punctuation '{c}'"),
        }
    }

    /// The last selector of the current group, if it is an unclosed attribute selector.
    fn open_attribute(&mut self) -> Option<&mut AttributeSelector> {
        match self.current.selectors.last_mut() {
            Some(Selector::ByAttribute(attr)) if !attr.closed => Some(attr),
            _ => None,
        }
    }

    fn push(&mut self, selector: Selector) {
        self.current.selectors.push(selector);
    }

    /// Emit the current group if it holds anything. A pending `>` on an empty
    /// group is kept for the selectors that follow.
    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let group = std::mem::take(&mut self.current);
        log::trace!(target: "selector", "group complete: {group}");
        self.groups.push(group);
    }

    fn finish(mut self) -> Vec<SelectorGroup> {
        self.flush();
        self.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_attribute_requires_unclosed_last_selector() {
        let mut compiler = SelectorCompiler::default();
        assert!(compiler.open_attribute().is_none());

        compiler.feed(Token::Delim('['));
        assert!(compiler.open_attribute().is_some());

        compiler.feed(Token::Delim(']'));
        assert!(compiler.open_attribute().is_none());
    }

    #[test]
    fn test_flush_keeps_pending_child_flag() {
        let mut compiler = SelectorCompiler::default();
        compiler.feed(Token::Delim('>'));
        compiler.feed(Token::Whitespace);
        assert!(compiler.groups.is_empty());
        assert!(compiler.current.direct_children_only);
    }

    #[test]
    fn test_stray_close_bracket_is_noop() {
        let mut compiler = SelectorCompiler::default();
        compiler.feed(Token::ident("rect"));
        compiler.feed(Token::Delim(']'));
        assert_eq!(compiler.current.selectors, vec![Selector::ByType("rect".into())]);
    }
}
