// 📅 Masked Date Input
// Reformats typed digits into DD/MM/YYYY as the user types, separators included

/// Maximum digits in a DD/MM/YYYY date.
pub const MAX_DIGITS: usize = 8;

const SEPARATOR: char = '/';

/// Strip non-digits, keep the first 8, and insert `/` after the 2nd and 4th digit.
///
/// `"1"` stays `"1"`, `"12"` becomes `"12/"`, `"123456789"` becomes `"12/34/5678"`.
pub fn mask_date(raw: &str) -> String {
    let mut masked = String::with_capacity(MAX_DIGITS + 2);

    for (i, ch) in raw.chars().filter(|c| c.is_ascii_digit()).take(MAX_DIGITS).enumerate() {
        masked.push(ch);
        if i == 1 || i == 3 {
            masked.push(SEPARATOR);
        }
    }

    masked
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskOutcome {
    /// The write came from the mask itself; leave the buffer alone.
    Suppressed,
    Masked(String),
}

/// Guarded form of [`mask_date`]: with `suppress` set the buffer is not touched.
pub fn apply_mask(buffer: &str, suppress: bool) -> MaskOutcome {
    if suppress {
        MaskOutcome::Suppressed
    } else {
        MaskOutcome::Masked(mask_date(buffer))
    }
}

// ============================================================================
// DATE FIELD
// ============================================================================

/// Text buffer of a date input. Every write goes through the mask, and the
/// cursor always ends up after the last character.
#[derive(Debug, Clone, Default)]
pub struct DateField {
    text: String,
    cursor: usize,
    updating: bool,
}

impl DateField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append a keystroke. Non-digits are dropped by the mask.
    pub fn insert_char(&mut self, ch: char) {
        let mut next = self.text.clone();
        next.push(ch);
        self.write(next);
    }

    /// Remove the last digit together with any separator that trails it.
    pub fn backspace(&mut self) {
        let next = match self.text.rfind(|c: char| c.is_ascii_digit()) {
            Some(pos) => self.text[..pos].to_string(),
            None => String::new(),
        };
        self.write(next);
    }

    /// Programmatic load, e.g. when a stored record is copied into the form.
    pub fn set_text(&mut self, value: &str) {
        self.write(value.to_string());
    }

    pub fn clear(&mut self) {
        self.write(String::new());
    }

    fn write(&mut self, value: String) {
        self.text = value;
        self.on_write();
    }

    fn on_write(&mut self) {
        let masked = match apply_mask(&self.text, self.updating) {
            MaskOutcome::Suppressed => return,
            MaskOutcome::Masked(masked) => masked,
        };

        self.updating = true;
        self.write(masked);
        self.cursor = self.text.len();
        self.updating = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// d[0:2] + "/" + d[2:4] + "/" + d[4:8], trailing empty segments omitted
    fn expected_mask(digits: &str) -> String {
        let d: String = digits.chars().take(MAX_DIGITS).collect();
        let mut out = String::new();
        out.push_str(&d[..d.len().min(2)]);
        if d.len() >= 2 {
            out.push('/');
        }
        if d.len() > 2 {
            out.push_str(&d[2..d.len().min(4)]);
        }
        if d.len() >= 4 {
            out.push('/');
        }
        if d.len() > 4 {
            out.push_str(&d[4..]);
        }
        out
    }

    #[test]
    fn test_mask_matches_segment_rule_for_all_lengths() {
        let source = "314159265358";
        for n in 0..=source.len() {
            let digits = &source[..n];
            assert_eq!(mask_date(digits), expected_mask(digits), "length {}", n);
        }
    }

    #[test]
    fn test_mask_edge_cases() {
        assert_eq!(mask_date(""), "");
        assert_eq!(mask_date("1"), "1");
        assert_eq!(mask_date("12"), "12/");
        assert_eq!(mask_date("1234"), "12/34/");
        assert_eq!(mask_date("1234567890"), "12/34/5678");
    }

    #[test]
    fn test_mask_strips_non_digits() {
        assert_eq!(mask_date("12/03/2024"), "12/03/2024");
        assert_eq!(mask_date("a1b2-c3 4"), "12/34/");
        assert_eq!(mask_date("//"), "");
    }

    #[test]
    fn test_mask_is_idempotent() {
        for raw in ["", "1", "12", "123", "12/34/5", "12/34/5678"] {
            let once = mask_date(raw);
            assert_eq!(mask_date(&once), once);
        }
    }

    #[test]
    fn test_apply_mask_suppressed() {
        assert_eq!(apply_mask("12345", true), MaskOutcome::Suppressed);
        assert_eq!(apply_mask("12345", false), MaskOutcome::Masked("12/34/5".to_string()));
    }

    #[test]
    fn test_typing_inserts_separators_and_moves_cursor() {
        let mut field = DateField::new();
        for ch in "25122024".chars() {
            field.insert_char(ch);
            assert_eq!(field.cursor(), field.text().len());
        }
        assert_eq!(field.text(), "25/12/2024");

        field.insert_char('9');
        assert_eq!(field.text(), "25/12/2024");
    }

    #[test]
    fn test_typed_separators_do_not_duplicate() {
        let mut field = DateField::new();
        for ch in "25/12/2024".chars() {
            field.insert_char(ch);
        }
        assert_eq!(field.text(), "25/12/2024");
    }

    #[test]
    fn test_programmatic_set_does_not_recurse_or_duplicate() {
        let mut field = DateField::new();
        field.set_text("01/01/2000");
        assert_eq!(field.text(), "01/01/2000");

        // writing the masked value back is a fixed point
        let current = field.text().to_string();
        field.set_text(&current);
        assert_eq!(field.text(), "01/01/2000");
        assert_eq!(field.cursor(), 10);
    }

    #[test]
    fn test_backspace_removes_last_digit() {
        let mut field = DateField::new();
        field.set_text("12");
        assert_eq!(field.text(), "12/");

        field.backspace();
        assert_eq!(field.text(), "1");

        field.set_text("12345");
        assert_eq!(field.text(), "12/34/5");
        field.backspace();
        assert_eq!(field.text(), "12/34/");
        field.backspace();
        assert_eq!(field.text(), "12/3");

        field.clear();
        field.backspace();
        assert!(field.is_empty());
        assert_eq!(field.cursor(), 0);
    }
}
