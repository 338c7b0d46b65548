//! Host-side rendering options.

use serde::Deserialize;

/// Prefix applied to filter and helper names by default.
pub const DEFAULT_PREFIX: &str = "jst_";

/// Options controlling how filters are bound into a host environment.
///
/// Every field has a default, so a YAML document only needs the keys it
/// changes:
///
/// ```rust
/// use jstag_render::RenderConfig;
///
/// let config = RenderConfig::from_yaml("compile_text: true").unwrap();
/// assert!(config.compile_text);
/// assert_eq!(config.prefix, "jst_");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Prefix for registered names (`jst_if`, `jst_link_to`, ...).
    pub prefix: String,
    /// Pre-resolve `= ...` fragments of the `js` filter.
    pub compile_text: bool,
    /// Strip leading indentation from block body lines.
    pub strip_indent: bool,
    /// Drop whitespace-only block body lines.
    pub skip_blank_lines: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            compile_text: false,
            strip_indent: true,
            skip_blank_lines: true,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a configuration from YAML text.
    pub fn from_yaml(text: &str) -> crate::Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn compile_text(mut self, enabled: bool) -> Self {
        self.compile_text = enabled;
        self
    }

    pub fn strip_indent(mut self, enabled: bool) -> Self {
        self.strip_indent = enabled;
        self
    }

    pub fn skip_blank_lines(mut self, enabled: bool) -> Self {
        self.skip_blank_lines = enabled;
        self
    }

    /// The host-visible name for `name`.
    pub fn qualified(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    /// Splits a host block into body lines.
    ///
    /// Line terminators (`\n` or `\r\n`) are removed. Indentation and blank
    /// lines are handled per [`strip_indent`](Self::strip_indent) and
    /// [`skip_blank_lines`](Self::skip_blank_lines).
    pub fn split_body(&self, text: &str) -> Vec<String> {
        text.lines()
            .map(|line| if self.strip_indent { line.trim_start() } else { line })
            .filter(|line| !(self.skip_blank_lines && line.trim().is_empty()))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.prefix, "jst_");
        assert!(!config.compile_text);
        assert!(config.strip_indent);
        assert!(config.skip_blank_lines);
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = RenderConfig::from_yaml("prefix: ''\nskip_blank_lines: false").unwrap();
        assert_eq!(config.prefix, "");
        assert!(!config.skip_blank_lines);
        assert!(config.strip_indent);
    }

    #[test]
    fn test_from_yaml_empty() {
        assert_eq!(RenderConfig::from_yaml("").unwrap(), RenderConfig::default());
    }

    #[test]
    fn test_from_yaml_invalid() {
        let err = RenderConfig::from_yaml("compile_text: maybe").unwrap_err();
        assert!(matches!(err, crate::RenderError::Config(_)));
    }

    #[test]
    fn test_split_body_dedents_and_skips_blanks() {
        let config = RenderConfig::default();
        assert_eq!(
            config.split_body("\n  = a\r\n\n    if b\n  end\n"),
            vec!["= a", "if b", "end"]
        );
    }

    #[test]
    fn test_split_body_verbatim() {
        let config = RenderConfig::new().strip_indent(false).skip_blank_lines(false);
        assert_eq!(config.split_body("  x\n\ny"), vec!["  x", "", "y"]);
    }

    #[test]
    fn test_qualified() {
        assert_eq!(RenderConfig::new().prefix("tpl_").qualified("js"), "tpl_js");
    }
}
