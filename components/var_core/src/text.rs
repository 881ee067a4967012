//! Owned, mutable text.
//!
//! Positions taken by [`Text`] methods are character positions, not byte
//! offsets, so multi-byte characters are never split.

use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::sprintf::format_values;
use crate::{Value, VarError, VarResult};

/// Owned character buffer used by the `String` variant of [`Value`].
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Text {
    data: String,
}

impl Text {
    /// Create an empty text
    pub fn new() -> Self {
        Text::default()
    }

    /// Printf-style construction, see [`crate::sprintf`].
    ///
    /// # Examples
    ///
    /// ```
    /// use var_core::{Text, Value};
    ///
    /// let text = Text::format("%s=%03d", &[Value::from("id"), Value::from(7)]).unwrap();
    /// assert_eq!(text.as_str(), "id=007");
    /// ```
    pub fn format(fmt: &str, args: &[Value]) -> VarResult<Text> {
        format_values(fmt, args).map(Text::from)
    }

    /// Borrow the underlying string
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Consume into the underlying string
    pub fn into_string(self) -> String {
        self.data
    }

    /// Number of characters
    pub fn size(&self) -> usize {
        self.data.chars().count()
    }

    /// Whether the text is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append another text
    pub fn append(&mut self, other: &str) -> &mut Self {
        self.data.push_str(other);
        self
    }

    fn resolve_index(&self, index: i64) -> VarResult<usize> {
        let size = self.size();
        let resolved = if index < 0 { index + size as i64 } else { index };
        if resolved < 0 || resolved as usize >= size {
            return Err(VarError::index_out_of_range(index, size));
        }
        Ok(resolved as usize)
    }

    /// The character at `index`; negative indices count from the end
    pub fn char_at(&self, index: i64) -> VarResult<char> {
        let pos = self.resolve_index(index)?;
        self.data
            .chars()
            .nth(pos)
            .ok_or_else(|| VarError::index_out_of_range(index, self.size()))
    }

    /// Replace the character at `index`
    pub fn set_char(&mut self, index: i64, c: char) -> VarResult<()> {
        let pos = self.resolve_index(index)?;
        self.data = self
            .data
            .chars()
            .enumerate()
            .map(|(i, old)| if i == pos { c } else { old })
            .collect();
        Ok(())
    }

    /// Characters in `start..end` (end exclusive)
    pub fn substr(&self, start: usize, end: usize) -> VarResult<Text> {
        let size = self.size();
        if start > end || end > size {
            return Err(VarError::invalid_index(format!(
                "invalid range {}..{} for text of size {}.",
                start, end, size
            )));
        }
        Ok(self.data.chars().skip(start).take(end - start).collect::<String>().into())
    }

    /// Whether the text begins with `prefix`
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.data.starts_with(prefix)
    }

    /// Whether the text ends with `suffix`
    pub fn ends_with(&self, suffix: &str) -> bool {
        self.data.ends_with(suffix)
    }

    /// Character position of the first occurrence of `needle`
    pub fn find(&self, needle: &str) -> Option<usize> {
        self.data
            .find(needle)
            .map(|byte| self.data[..byte].chars().count())
    }

    /// Whether `needle` occurs in the text
    pub fn contains(&self, needle: &str) -> bool {
        self.data.contains(needle)
    }

    /// Upper-cased copy
    pub fn to_upper(&self) -> Text {
        self.data.to_uppercase().into()
    }

    /// Lower-cased copy
    pub fn to_lower(&self) -> Text {
        self.data.to_lowercase().into()
    }

    /// Copy without leading and trailing whitespace
    pub fn strip(&self) -> Text {
        self.data.trim().into()
    }

    /// Split on `delimiter`
    pub fn split(&self, delimiter: &str) -> VarResult<Vec<Text>> {
        if delimiter.is_empty() {
            return Err(VarError::value_error("empty delimiter."));
        }
        Ok(self.data.split(delimiter).map(Text::from).collect())
    }

    /// Join `parts` with this text as separator
    pub fn join(&self, parts: &[Text]) -> Text {
        parts
            .iter()
            .map(Text::as_str)
            .collect::<Vec<_>>()
            .join(&self.data)
            .into()
    }

    /// Parse as a decimal integer
    pub fn to_int(&self) -> VarResult<i64> {
        self.data.trim().parse::<i64>().map_err(|_| {
            VarError::value_error(format!("cannot convert \"{}\" to int.", self.data))
        })
    }

    /// Parse as a float
    pub fn to_float(&self) -> VarResult<f64> {
        self.data.trim().parse::<f64>().map_err(|_| {
            VarError::value_error(format!("cannot convert \"{}\" to float.", self.data))
        })
    }

    /// The 1-based `line` of a multi-line buffer, without its newline.
    pub fn get_line(&self, line: usize) -> VarResult<Text> {
        if line == 0 {
            return Err(VarError::invalid_index("line numbers start at 1."));
        }
        self.data
            .split('\n')
            .nth(line - 1)
            .map(|l| Text::from(l.strip_suffix('\r').unwrap_or(l)))
            .ok_or_else(|| {
                VarError::invalid_index(format!("line {} is beyond the end of the text.", line))
            })
    }

    /// Repeat `count` times; a count of zero or less yields empty text.
    ///
    /// Fails with a ValueError when the result can't be allocated.
    pub fn repeat(&self, count: i64) -> VarResult<Text> {
        if count <= 0 || self.data.is_empty() {
            return Ok(Text::new());
        }
        let count = usize::try_from(count).map_err(|_| repeat_too_large())?;
        let len = self.data.len().checked_mul(count).ok_or_else(repeat_too_large)?;
        let mut out = String::new();
        out.try_reserve_exact(len).map_err(|_| repeat_too_large())?;
        for _ in 0..count {
            out.push_str(&self.data);
        }
        Ok(Text::from(out))
    }

    /// 64-bit hash of the content
    pub fn hash_code(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.data.hash(&mut hasher);
        hasher.finish()
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}

fn repeat_too_large() -> VarError {
    VarError::value_error("repeated text is too large.")
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text { data: s.to_string() }
    }
}

impl From<String> for Text {
    fn from(data: String) -> Self {
        Text { data }
    }
}

impl From<char> for Text {
    fn from(c: char) -> Self {
        Text { data: c.to_string() }
    }
}

impl std::ops::Add<&Text> for &Text {
    type Output = Text;

    fn add(self, rhs: &Text) -> Text {
        let mut out = self.clone();
        out.append(rhs.as_str());
        out
    }
}
