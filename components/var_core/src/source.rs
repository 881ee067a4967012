//! Source context attached to errors.
//!
//! A [`SourceInfo`] records where a failure happened and keeps the offending
//! source line together with its immediate neighbours, so a reporter can
//! print the line and a caret underline without holding on to the whole
//! source buffer.

/// Location and snippet context for a diagnostic.
///
/// # Examples
///
/// ```
/// use var_core::SourceInfo;
///
/// let info = SourceInfo::capture("main.vr", "var x = blabla;\n", (1, 9), 6, "main");
/// assert_eq!(info.line_str, "var x = blabla;");
/// assert_eq!(info.caret_line(), "        ^^^^^^");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceInfo {
    /// File the source came from
    pub file: String,
    /// Function the failure happened in
    pub function: String,
    /// 1-based line
    pub line: u32,
    /// 1-based column, 0 when unknown
    pub column: u32,
    /// Underline width in characters
    pub width: u32,
    /// The line before `line`, empty when there is none
    pub line_before: String,
    /// The text of `line`
    pub line_str: String,
    /// The line after `line`, empty when there is none
    pub line_after: String,
}

impl SourceInfo {
    /// A location-only record without snippet context.
    pub fn at(file: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
        SourceInfo {
            file: file.into(),
            function: function.into(),
            line,
            ..SourceInfo::default()
        }
    }

    /// Capture the context around `(line, column)` from `source`.
    ///
    /// The source is scanned once and the scan stops after the line that
    /// follows the target; only the target line and its neighbours are kept.
    pub fn capture(
        file: impl Into<String>,
        source: &str,
        (line, column): (u32, u32),
        width: u32,
        function: impl Into<String>,
    ) -> Self {
        let mut info = SourceInfo {
            file: file.into(),
            function: function.into(),
            line,
            column,
            width,
            ..SourceInfo::default()
        };

        let target = line as u64;
        let mut cur_line: u64 = 1;
        for c in source.chars() {
            if c == '\n' {
                if cur_line >= target + 1 {
                    break;
                }
                cur_line += 1;
                continue;
            }
            if target >= 2 && cur_line == target - 1 {
                info.line_before.push(c);
            } else if cur_line == target {
                info.line_str.push(c);
            } else if cur_line == target + 1 {
                info.line_after.push(c);
            }
        }
        info
    }

    /// The caret underline aligned to `column`.
    ///
    /// Tabs in the source line are reproduced so the underline stays
    /// aligned in a terminal. If the column lies beyond the line a single
    /// caret is appended.
    pub fn caret_line(&self) -> String {
        let mut out = String::new();
        let mut cur_col: u32 = 0;
        for c in self.line_str.chars() {
            cur_col += 1;
            if cur_col == self.column {
                out.extend(std::iter::repeat('^').take(self.width as usize));
                return out;
            }
            out.push(if c == '\t' { '\t' } else { ' ' });
        }
        out.push('^');
        out
    }

    /// Multi-line snippet: location header, the source line and the caret
    /// underline.
    pub fn render(&self) -> String {
        let mut out = format!("  at {}:{}", self.file, self.line);
        if self.column > 0 {
            out.push_str(&format!(":{}", self.column));
        }
        if !self.function.is_empty() {
            out.push_str(&format!(" in {}", self.function));
        }
        if !self.line_str.is_empty() {
            out.push('\n');
            out.push_str(&self.line_str);
            if self.column > 0 {
                out.push('\n');
                out.push_str(&self.caret_line());
            }
        }
        out
    }
}
