#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Byte offset or byte length in spec source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct TextSize(u32);

impl TextSize {
    #[must_use]
    pub const fn from(offset: u32) -> Self {
        Self(offset)
    }

    #[must_use]
    pub const fn into(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }
}

/// Half-open byte span of spec source text, used by error spans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct TextRange {
    start: TextSize,
    end: TextSize,
}

impl TextRange {
    #[must_use]
    pub const fn new(start: TextSize, end: TextSize) -> Self {
        Self { start, end }
    }

    /// Range of `len` bytes beginning at `start`.
    #[must_use]
    pub const fn at(start: TextSize, len: TextSize) -> Self {
        Self {
            start,
            end: TextSize(start.0 + len.0),
        }
    }

    #[must_use]
    pub const fn start(self) -> TextSize {
        self.start
    }

    #[must_use]
    pub const fn end(self) -> TextSize {
        self.end
    }

    #[must_use]
    pub const fn len(self) -> TextSize {
        TextSize(self.end.0 - self.start.0)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }
}

#[cfg(feature = "diagnostics")]
impl From<TextRange> for miette::SourceSpan {
    fn from(range: TextRange) -> Self {
        use miette::SourceOffset;
        Self::new(
            SourceOffset::from(range.start().into() as usize),
            range.len().into() as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_size_from_into() {
        let size = TextSize::from(42);
        assert_eq!(size.into(), 42);
        assert_eq!(TextSize::zero().into(), 0);
    }

    #[test]
    fn test_text_range_at() {
        let range = TextRange::at(TextSize::from(5), TextSize::from(3));
        assert_eq!(range.start().into(), 5);
        assert_eq!(range.end().into(), 8);
        assert_eq!(range.len().into(), 3);
    }

    #[test]
    fn test_text_range_empty() {
        let range = TextRange::at(TextSize::from(7), TextSize::zero());
        assert!(range.is_empty());
        assert!(!TextRange::new(TextSize::from(1), TextSize::from(4)).is_empty());
    }
}
