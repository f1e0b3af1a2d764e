//! Number formatting for the stepper's text field.
//!
//! The controller never formats numbers itself. It asks a [`NumberFormat`]
//! (shared with the host as `Rc<dyn NumberFormat>`) to render the stored
//! value and to parse whatever the user typed. [`DecimalFormat`] is the
//! built-in formatter used when the host doesn't supply one:
//!
//! ```rust
//! use stepper_core::{DecimalFormat, NumberFormat};
//!
//! let ints = DecimalFormat::new();
//! assert_eq!(ints.format(12345.0), "12,345");
//! assert_eq!(ints.parse("1,024"), Some(1024.0));
//! assert_eq!(ints.parse("1.5"), None);
//!
//! let tenths = DecimalFormat::new().fraction_digits(1, 1);
//! assert_eq!(tenths.format(-2.0), "-2.0");
//! assert_eq!(tenths.parse(" 3.5 "), Some(3.5));
//! ```

/// Converts between the stepper's numeric value and its display text.
pub trait NumberFormat {
    fn format(&self, value: f64) -> String;
    /// `None` when `text` is not a number under this format's rules.
    fn parse(&self, text: &str) -> Option<f64>;
}

/// Decimal style formatter: grouped integer digits and a bounded number of
/// fraction digits.
#[derive(Clone, Debug, PartialEq)]
pub struct DecimalFormat {
    pub min_fraction_digits: usize,
    pub max_fraction_digits: usize,
    pub allows_floats: bool,
    pub grouping_separator: Option<char>,
    pub decimal_separator: char,
}

impl Default for DecimalFormat {
    fn default() -> Self {
        Self {
            min_fraction_digits: 0,
            max_fraction_digits: 0,
            allows_floats: false,
            grouping_separator: Some(','),
            decimal_separator: '.',
        }
    }
}

impl DecimalFormat {
    /// Integers only, grouped by thousands.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fraction_digits(mut self, min: usize, max: usize) -> Self {
        self.min_fraction_digits = min.min(max);
        self.max_fraction_digits = max;
        self.allows_floats = max > 0;
        self
    }

    pub fn allows_floats(mut self, allows: bool) -> Self {
        self.allows_floats = allows;
        self
    }

    pub fn grouping(mut self, separator: Option<char>) -> Self {
        self.grouping_separator = separator;
        self
    }

    pub fn decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    fn group(&self, int_digits: &str) -> String {
        let Some(sep) = self.grouping_separator else {
            return int_digits.to_string();
        };
        let len = int_digits.len();
        let mut out = String::with_capacity(len + len / 3);
        for (i, ch) in int_digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(sep);
            }
            out.push(ch);
        }
        out
    }
}

impl NumberFormat for DecimalFormat {
    fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        let rendered = format!("{:.*}", self.max_fraction_digits, value.abs());
        let (int_digits, frac_digits) = match rendered.split_once('.') {
            Some((i, f)) => (i, f),
            None => (rendered.as_str(), ""),
        };

        let mut frac = frac_digits.to_string();
        while frac.len() > self.min_fraction_digits && frac.ends_with('0') {
            frac.pop();
        }

        // "-0" and "-0.0" read as zero
        let is_zero = int_digits.chars().chain(frac.chars()).all(|c| c == '0');

        let mut out = String::with_capacity(rendered.len() + 8);
        if value.is_sign_negative() && !is_zero {
            out.push('-');
        }
        out.push_str(&self.group(int_digits));
        if !frac.is_empty() {
            out.push(self.decimal_separator);
            out.push_str(&frac);
        }
        out
    }

    fn parse(&self, text: &str) -> Option<f64> {
        let text = text.trim();
        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (int_part, frac_part) = match body.split_once(self.decimal_separator) {
            Some((i, f)) => (i, Some(f)),
            None => (body, None),
        };
        if frac_part.is_some() && !self.allows_floats {
            return None;
        }

        let mut normalized = String::with_capacity(body.len() + 2);
        if negative {
            normalized.push('-');
        }

        let mut int_digits = 0usize;
        let mut prev_digit = false;
        for ch in int_part.chars() {
            if ch.is_ascii_digit() {
                normalized.push(ch);
                int_digits += 1;
                prev_digit = true;
            } else if Some(ch) == self.grouping_separator && prev_digit {
                prev_digit = false;
            } else {
                return None;
            }
        }
        if !int_part.is_empty() && !prev_digit {
            // trailing grouping separator
            return None;
        }

        let frac = frac_part.unwrap_or("");
        if !frac.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if int_digits == 0 && frac.is_empty() {
            return None;
        }
        if int_digits == 0 {
            normalized.push('0');
        }
        if !frac.is_empty() {
            normalized.push('.');
            normalized.push_str(frac);
        }

        let value: f64 = normalized.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(if value == 0.0 { 0.0 } else { value })
    }
}
