//! Selection ranges and splicing
//!
//! Accessibility layers report selections in UTF-16 code units, so all range
//! arithmetic here happens on UTF-16 and is converted back at the end.

/// A character range in UTF-16 code units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRange {
    pub location: usize,
    pub length: usize,
}

impl TextRange {
    pub const fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Clamp the range so that it lies within a value of `len` code units
    pub fn clamp_to(&self, len: usize) -> Self {
        let location = self.location.min(len);
        let length = self.length.min(len - location);
        Self { location, length }
    }
}

fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Replace `range` of `value` with `replacement`.
///
/// The range is clamped to the current value length and widened so that it
/// never splits a surrogate pair.
pub fn splice_utf16(value: &str, range: TextRange, replacement: &str) -> String {
    let units: Vec<u16> = value.encode_utf16().collect();
    let range = range.clamp_to(units.len());

    let mut start = range.location;
    let mut end = range.location + range.length;
    if start > 0 && start < units.len() && is_low_surrogate(units[start]) {
        start -= 1;
    }
    if end < units.len() && is_low_surrogate(units[end]) {
        end += 1;
    }

    let mut spliced = Vec::with_capacity(units.len() + replacement.len());
    spliced.extend_from_slice(&units[..start]);
    spliced.extend(replacement.encode_utf16());
    spliced.extend_from_slice(&units[end..]);

    String::from_utf16_lossy(&spliced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splices_middle_of_value() {
        let out = splice_utf16("please fix my code now", TextRange::new(7, 11), "refactor main.rs");
        assert_eq!(out, "please refactor main.rs now");
    }

    #[test]
    fn insertion_with_empty_range() {
        let out = splice_utf16("ab", TextRange::new(1, 0), "X");
        assert_eq!(out, "aXb");
    }

    #[test]
    fn clamps_range_past_end() {
        let out = splice_utf16("hello", TextRange::new(3, 50), "p!");
        assert_eq!(out, "help!");

        let out = splice_utf16("hello", TextRange::new(99, 4), "!");
        assert_eq!(out, "hello!");
    }

    #[test]
    fn clamp_to_keeps_valid_range() {
        assert_eq!(TextRange::new(2, 3).clamp_to(10), TextRange::new(2, 3));
        assert_eq!(TextRange::new(8, 5).clamp_to(10), TextRange::new(8, 2));
        assert_eq!(TextRange::new(12, 5).clamp_to(10), TextRange::new(10, 0));
    }

    #[test]
    fn ranges_are_utf16_units() {
        // "é" is one UTF-16 unit, the emoji is two
        let value = "é😀x";
        let out = splice_utf16(value, TextRange::new(1, 2), "y");
        assert_eq!(out, "éyx");
    }

    #[test]
    fn never_splits_a_surrogate_pair() {
        let value = "a😀b";
        // Range starts inside the pair
        let out = splice_utf16(value, TextRange::new(2, 1), "Z");
        assert_eq!(out, "aZb");
        // Range ends inside the pair
        let out = splice_utf16(value, TextRange::new(0, 2), "Z");
        assert_eq!(out, "Zb");
    }
}
