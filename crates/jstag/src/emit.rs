//! Tag emission.
//!
//! Every construct becomes exactly one tag. Expressions use the echo
//! delimiter `<%=`, everything else the statement delimiter `<%`:
//!
//! | Construct | Tag |
//! |-----------|-----|
//! | `Expression(code)` | `<%= code %>` |
//! | `Conditional(If, c)` | `<% if(c) { %>` |
//! | `Conditional(ElseIf, c)` | `<% } else if(c) { %>` |
//! | `Conditional(Else)` | `<% } else { %>` |
//! | `LoopStart(coll, item)` | `<% coll.each(function(item) { %>` |
//! | `LoopEnd` | `<% }); %>` |
//! | `BlockEnd(closes_loop = false)` | `<% } %>` |
//! | `BlockEnd(closes_loop = true)` | `<% }); %>` |
//! | `Raw(text)` | `<% text %>` |
//!
//! Payload text is written as-is; nothing is escaped.

use std::fmt;

use crate::construct::{ConditionalKind, Construct};

/// Opening delimiter of a statement tag.
pub const OPEN: &str = "<%";

/// Opening delimiter of an echo tag.
pub const OPEN_ECHO: &str = "<%=";

/// Closing delimiter shared by both tag kinds.
pub const CLOSE: &str = "%>";

/// Renders a construct as a single inline tag.
///
/// # Example
///
/// ```rust
/// use jstag::{emit, recognize};
///
/// assert_eq!(emit(&recognize("if a > 1")), "<% if(a > 1) { %>");
/// assert_eq!(emit(&recognize("= a.get('y')")), "<%= a.get('y') %>");
/// ```
pub fn emit(construct: &Construct) -> String {
    construct.to_string()
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = match self {
            Construct::Expression { .. } => OPEN_ECHO,
            _ => OPEN,
        };
        write!(f, "{} ", open)?;

        match self {
            Construct::Expression { code } => f.write_str(code)?,
            Construct::Conditional { kind, condition } => {
                let condition = condition.as_deref().unwrap_or_default();
                match kind {
                    ConditionalKind::If => write!(f, "if({}) {{", condition)?,
                    ConditionalKind::ElseIf => write!(f, "}} else if({}) {{", condition)?,
                    ConditionalKind::Else => f.write_str("} else {")?,
                }
            }
            Construct::LoopStart { collection, item } => {
                write!(f, "{}.each(function({}) {{", collection, item)?
            }
            Construct::LoopEnd | Construct::BlockEnd { closes_loop: true } => f.write_str("});")?,
            Construct::BlockEnd { closes_loop: false } => f.write_str("}")?,
            Construct::Raw { text } => f.write_str(text)?,
        }

        write!(f, " {}", CLOSE)
    }
}
