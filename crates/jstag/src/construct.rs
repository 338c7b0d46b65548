//! Construct recognition.
//!
//! A single line of mini-language text is classified into exactly one
//! [`Construct`]. Patterns are tested in priority order and the first match
//! wins, so the more specific keywords are checked before the keywords they
//! start with (`elseif` before `else`, `endeach` before `end`).
//!
//! | Priority | Line starts with | Construct |
//! |----------|------------------|-----------|
//! | 1 | `=` | [`Construct::Expression`] |
//! | 2 | `elseif` | [`Construct::Conditional`] ([`ConditionalKind::ElseIf`]) |
//! | 3 | `else` | [`Construct::Conditional`] ([`ConditionalKind::Else`]) |
//! | 4 | `endeach` | [`Construct::LoopEnd`] |
//! | 5 | `end` | [`Construct::BlockEnd`] |
//! | 6 | `each` | [`Construct::LoopStart`] |
//! | 7 | `if` | [`Construct::Conditional`] ([`ConditionalKind::If`]) |
//! | 8 | anything else | [`Construct::Raw`] |
//!
//! `elseif` and `if` are keywords only when followed by whitespace, `(`, or
//! the end of the line. The other prefixes match literally.

use log::trace;

/// Collection name used when an `each` line names none.
pub const DEFAULT_COLLECTION: &str = "collection";

/// Loop variable name used when an `each` line names none.
pub const DEFAULT_ITEM: &str = "item";

/// The branch a conditional opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionalKind {
    If,
    ElseIf,
    Else,
}

/// The classified meaning of one line or filter argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Construct {
    /// Echo a value: `= model.get('name')`.
    Expression { code: String },

    /// Open or continue a conditional. `Else` carries no condition.
    Conditional {
        kind: ConditionalKind,
        condition: Option<String>,
    },

    /// Open a loop over `collection`, binding each element to `item`.
    LoopStart { collection: String, item: String },

    /// Close a loop opened by [`Construct::LoopStart`].
    LoopEnd,

    /// A plain `end`. Whether it closes a loop or a conditional is decided by
    /// the caller, never inferred from surrounding text.
    BlockEnd { closes_loop: bool },

    /// Passthrough for text that matches no pattern.
    Raw { text: String },
}

impl Construct {
    /// Builds an `if` conditional.
    pub fn if_(condition: impl Into<String>) -> Self {
        Self::Conditional {
            kind: ConditionalKind::If,
            condition: Some(condition.into()),
        }
    }

    /// Builds an `else if` conditional.
    pub fn else_if(condition: impl Into<String>) -> Self {
        Self::Conditional {
            kind: ConditionalKind::ElseIf,
            condition: Some(condition.into()),
        }
    }

    /// Builds an `else` branch.
    pub fn else_() -> Self {
        Self::Conditional {
            kind: ConditionalKind::Else,
            condition: None,
        }
    }

    /// Builds a loop start, falling back to [`DEFAULT_COLLECTION`] and
    /// [`DEFAULT_ITEM`] for missing names.
    pub fn loop_start(collection: Option<&str>, item: Option<&str>) -> Self {
        Self::LoopStart {
            collection: collection.unwrap_or(DEFAULT_COLLECTION).to_string(),
            item: item.unwrap_or(DEFAULT_ITEM).to_string(),
        }
    }
}

/// Classifies one line of mini-language text.
///
/// Never fails: a line that matches no pattern becomes [`Construct::Raw`]
/// holding the line unchanged.
///
/// # Example
///
/// ```rust
/// use jstag::{recognize, Construct};
///
/// assert_eq!(
///     recognize("each tabs tab"),
///     Construct::LoopStart { collection: "tabs".into(), item: "tab".into() }
/// );
/// assert_eq!(recognize("foo();"), Construct::Raw { text: "foo();".into() });
/// ```
pub fn recognize(line: &str) -> Construct {
    let construct = if let Some(code) = line.strip_prefix('=') {
        Construct::Expression {
            code: code.trim().to_string(),
        }
    } else if let Some(rest) = keyword(line, "elseif") {
        Construct::else_if(strip_terminator(rest.trim_start()))
    } else if line.starts_with("else") {
        Construct::else_()
    } else if line.starts_with("endeach") {
        Construct::LoopEnd
    } else if let Some(rest) = line.strip_prefix("end") {
        Construct::BlockEnd {
            closes_loop: is_loop_hint(rest),
        }
    } else if line.starts_with("each") {
        let mut names = line.split_whitespace().skip(1);
        Construct::loop_start(names.next(), names.next())
    } else if let Some(rest) = keyword(line, "if") {
        Construct::if_(rest.trim_start())
    } else {
        Construct::Raw {
            text: line.to_string(),
        }
    };

    trace!("recognized {:?} as {:?}", line, construct);
    construct
}

/// Removes exactly one trailing line terminator (`\r\n`, `\n` or `\r`).
///
/// Filter arguments that arrive as a whole block keep the block's final
/// newline; it must not end up inside the emitted condition.
pub fn strip_terminator(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .or_else(|| text.strip_suffix('\r'))
        .unwrap_or(text)
}

/// Returns true when an `end` hint asks to close a loop.
pub(crate) fn is_loop_hint(hint: &str) -> bool {
    hint.trim() == "each"
}

/// Matches `word` at the start of `line` when it stands alone as a keyword.
fn keyword<'a>(line: &'a str, word: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(word)?;
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() || c == '(' => Some(rest),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod expression {
        use super::*;

        #[test]
        fn strips_marker_and_whitespace() {
            assert_eq!(
                recognize("=  model.get('name')  "),
                Construct::Expression {
                    code: "model.get('name')".into()
                }
            );
        }

        #[test]
        fn bare_marker_is_empty_expression() {
            assert_eq!(recognize("="), Construct::Expression { code: "".into() });
        }

        #[test]
        fn wins_over_keywords() {
            assert_eq!(
                recognize("=if"),
                Construct::Expression { code: "if".into() }
            );
        }
    }

    mod conditionals {
        use super::*;

        #[test]
        fn if_condition() {
            assert_eq!(recognize("if a > 1"), Construct::if_("a > 1"));
        }

        #[test]
        fn if_with_paren() {
            assert_eq!(recognize("if(a)"), Construct::if_("(a)"));
        }

        #[test]
        fn bare_if_has_empty_condition() {
            assert_eq!(recognize("if"), Construct::if_(""));
        }

        #[test]
        fn identifier_starting_with_if_is_raw() {
            assert_eq!(
                recognize("iffy()"),
                Construct::Raw {
                    text: "iffy()".into()
                }
            );
        }

        #[test]
        fn elseif_is_not_else() {
            assert_eq!(recognize("elseif b"), Construct::else_if("b"));
        }

        #[test]
        fn elseif_drops_one_terminator() {
            assert_eq!(recognize("elseif b\n"), Construct::else_if("b"));
        }

        #[test]
        fn else_branch() {
            assert_eq!(recognize("else"), Construct::else_());
        }
    }

    mod loops {
        use super::*;

        #[test]
        fn each_defaults() {
            assert_eq!(
                recognize("each"),
                Construct::loop_start(Some("collection"), Some("item"))
            );
        }

        #[test]
        fn each_collection_only() {
            assert_eq!(recognize("each tabs"), Construct::loop_start(Some("tabs"), None));
        }

        #[test]
        fn each_ignores_extra_tokens() {
            assert_eq!(
                recognize("each  tabs\ttab extra"),
                Construct::loop_start(Some("tabs"), Some("tab"))
            );
        }

        #[test]
        fn endeach_is_not_end() {
            assert_eq!(recognize("endeach"), Construct::LoopEnd);
            assert_eq!(recognize("end"), Construct::BlockEnd { closes_loop: false });
        }

        #[test]
        fn end_with_each_hint_closes_loop() {
            assert_eq!(
                recognize("end each"),
                Construct::BlockEnd { closes_loop: true }
            );
        }
    }

    #[test]
    fn unmatched_line_is_raw() {
        assert_eq!(
            recognize("var x = 1;"),
            Construct::Raw {
                text: "var x = 1;".into()
            }
        );
    }

    #[test]
    fn strip_terminator_removes_one() {
        assert_eq!(strip_terminator("x>0\n"), "x>0");
        assert_eq!(strip_terminator("x>0\r\n"), "x>0");
        assert_eq!(strip_terminator("x>0\n\n"), "x>0\n");
        assert_eq!(strip_terminator("x>0"), "x>0");
    }
}
