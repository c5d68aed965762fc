use crate::error::{Result, SheetError};

/// A contiguous, inclusive span of worksheet columns such as `C:K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    /// 0-based index of the first column.
    pub first: usize,
    /// 0-based index of the last column (inclusive).
    pub last: usize,
}

impl ColumnSpan {
    /// Parse `"C:K"` style column spans (a single letter group is a one-column span)
    pub fn parse(notation: &str) -> Result<Self> {
        let parts: Vec<&str> = notation.split(':').collect();
        match parts.as_slice() {
            [single] => {
                let col = parse_column_letters(single)?;
                Ok(Self { first: col, last: col })
            }
            [start, end] => {
                let a = parse_column_letters(start)?;
                let b = parse_column_letters(end)?;
                Ok(Self {
                    first: a.min(b),
                    last: a.max(b),
                })
            }
            _ => Err(SheetError::InvalidColumnLetters(notation.to_string())),
        }
    }

    /// Number of columns in the span
    #[must_use]
    pub fn width(&self) -> usize {
        self.last - self.first + 1
    }

    /// Iterate over the 0-based column indices
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        self.first..=self.last
    }
}

/// Convert column letters to 0-based column index
/// A=0, B=1, ... Z=25, AA=26, AB=27, ...
pub fn parse_column_letters(col_str: &str) -> Result<usize> {
    let upper = col_str.trim().to_uppercase();
    if upper.is_empty() {
        return Err(SheetError::InvalidColumnLetters(col_str.to_string()));
    }

    let mut col = 0usize;
    for &b in upper.as_bytes() {
        if !b.is_ascii_uppercase() {
            return Err(SheetError::InvalidColumnLetters(col_str.to_string()));
        }
        col = col * 26 + (b - b'A') as usize + 1;
    }

    Ok(col - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_column_letters() {
        assert_eq!(parse_column_letters("A").unwrap(), 0);
        assert_eq!(parse_column_letters("C").unwrap(), 2);
        assert_eq!(parse_column_letters("K").unwrap(), 10);
        assert_eq!(parse_column_letters("AA").unwrap(), 26);
        assert_eq!(parse_column_letters("v").unwrap(), 21);
        assert!(parse_column_letters("").is_err());
        assert!(parse_column_letters("C1").is_err());
    }

    #[test]
    fn test_column_span() {
        let span = ColumnSpan::parse("C:K").unwrap();
        assert_eq!((span.first, span.last), (2, 10));
        assert_eq!(span.width(), 9);

        let span = ColumnSpan::parse("D:V").unwrap();
        assert_eq!(span.width(), 19);

        // Reversed spans are normalised
        assert_eq!(ColumnSpan::parse("P:C").unwrap(), ColumnSpan::parse("C:P").unwrap());
        assert_eq!(ColumnSpan::parse("D").unwrap().width(), 1);
        assert!(ColumnSpan::parse("A:B:C").is_err());
    }
}
