//! Numeric literals.
//!
//! The scanner fixes a literal's extent and shape (radix, fraction,
//! exponent, `r`/`i` suffixes) and hands the cleaned digits to the consumer.
//! Values are only computed where the lexer itself must judge them: float
//! range warnings and the exact fraction of a rational float.

use garnet_ir::{ExprState, NumberLit, NumberSuffix, TokenKind, TokenValue};

use crate::lex_error::{LexErrorKind, LexWarningKind};
use crate::Lexer;

impl Lexer {
    /// `first` is the first digit, or `+` directly before one.
    pub(crate) fn scan_number(&mut self, first: u8) {
        self.state = ExprState::END;
        let first = if first == b'+' {
            match self.cursor.next_in_line() {
                Some(d) => d,
                None => return self.emit(TokenKind::UPlus),
            }
        } else {
            first
        };
        if first == b'0' {
            match self.cursor.peek() {
                Some(b'x' | b'X') => {
                    return self.prefixed_integer(16, "Hexadecimal number without hex-digits.");
                }
                Some(b'b' | b'B') => {
                    return self.prefixed_integer(2, "Binary number without digits.");
                }
                Some(b'd' | b'D') => {
                    return self.prefixed_integer(10, "Decimal number without digits.");
                }
                Some(b'o' | b'O') => {
                    return self.prefixed_integer(8, "numeric literal without digits");
                }
                Some(b'_' | b'0'..=b'9') => return self.octal_integer(),
                _ => {}
            }
        }
        self.decimal(first);
    }

    /// Digits of `radix` separated by single underscores. Returns the digits
    /// and whether the run ended on an underscore.
    fn scan_digits(&mut self, radix: u32, leading_underscore: bool) -> (String, bool) {
        let mut digits = String::new();
        let mut underscore = false;
        if !leading_underscore && self.cursor.peek_is(b'_') {
            return (digits, false);
        }
        while let Some(b) = self.cursor.peek() {
            if b == b'_' {
                if underscore {
                    break;
                }
                underscore = true;
            } else if char::from(b).is_digit(radix) {
                underscore = false;
                digits.push(char::from(b));
            } else {
                break;
            }
            self.cursor.skip(1);
        }
        (digits, underscore)
    }

    /// `0x`, `0b`, `0d` or `0o`; the prefix letter is next.
    fn prefixed_integer(&mut self, radix: u32, without_digits: &'static str) {
        self.cursor.skip(1);
        let (digits, trailing) = self.scan_digits(radix, false);
        if digits.is_empty() {
            self.error(LexErrorKind::NumberWithoutDigits {
                message: without_digits,
            });
            if self.cursor.peek_is(b'_') {
                self.cursor.skip(1);
            }
            return self.emit_integer("0".to_owned(), radix, NumberSuffix::None);
        }
        if trailing {
            self.error(LexErrorKind::TrailingUnderscore);
        }
        let suffix = self.number_suffix(true);
        self.emit_integer(digits, radix, suffix);
    }

    /// `0` followed by digits or `_`: octal.
    fn octal_integer(&mut self) {
        let (digits, trailing) = self.scan_digits(10, true);
        let mut radix = 8;
        if digits.bytes().any(|d| d > b'7') {
            self.error(LexErrorKind::IllegalOctalDigit);
            radix = 10;
        }
        if trailing {
            self.error(LexErrorKind::TrailingUnderscore);
        }
        let digits = if digits.is_empty() { "0".to_owned() } else { digits };
        let suffix = self.number_suffix(true);
        self.emit_integer(digits, radix, suffix);
    }

    fn decimal(&mut self, first: u8) {
        let mut text = String::from(char::from(first));
        let (more, mut trailing) = self.scan_digits(10, true);
        text.push_str(&more);

        let mut point = None;
        if !trailing
            && self.cursor.peek_is(b'.')
            && self.cursor.peek_at(1).is_some_and(|b| b.is_ascii_digit())
        {
            self.cursor.skip(1);
            point = Some(text.len());
            text.push('.');
            let (fraction, t) = self.scan_digits(10, false);
            text.push_str(&fraction);
            trailing = t;
        }

        let mut exponent = false;
        if !trailing && matches!(self.cursor.peek(), Some(b'e' | b'E')) {
            let sign = self.cursor.peek_at(1).filter(|&b| b == b'+' || b == b'-');
            let digit_at = if sign.is_some() { 2 } else { 1 };
            if self.cursor.peek_at(digit_at).is_some_and(|b| b.is_ascii_digit()) {
                self.cursor.skip(digit_at);
                text.push('e');
                if let Some(sign) = sign {
                    text.push(char::from(sign));
                }
                let (digits, t) = self.scan_digits(10, false);
                text.push_str(&digits);
                trailing = t;
                exponent = true;
            }
        }

        if trailing {
            self.error(LexErrorKind::TrailingUnderscore);
        }
        if point.is_none() && !exponent {
            let suffix = self.number_suffix(true);
            return self.emit_integer(text, 10, suffix);
        }

        let suffix = self.number_suffix(!exponent);
        let mut fraction = None;
        if suffix.is_rational() {
            if let Some(point) = point {
                fraction = self.rational_fraction(&text, point);
            }
        } else {
            self.check_float_range(&text);
        }
        let kind = if suffix.is_imaginary() {
            TokenKind::Imaginary
        } else if suffix.is_rational() {
            TokenKind::Rational
        } else {
            TokenKind::Float
        };
        self.emit_value(
            kind,
            TokenValue::Number(NumberLit {
                text,
                radix: 10,
                float: true,
                suffix,
                fraction,
            }),
        );
    }

    /// Trailing `r` and `i` markers. A marker directly followed by another
    /// identifier character is not a suffix, and the whole run is left
    /// unread.
    fn number_suffix(&mut self, allow_rational: bool) -> NumberSuffix {
        let start = self.cursor.pos();
        let (mut rational, mut imaginary) = (false, false);
        loop {
            match self.cursor.peek() {
                Some(b'i') if !imaginary => imaginary = true,
                Some(b'r') if allow_rational && !rational && !imaginary => rational = true,
                Some(b) if !b.is_ascii() || b.is_ascii_alphabetic() || b == b'_' => {
                    self.cursor.seek_in_line(start);
                    return NumberSuffix::None;
                }
                _ => break,
            }
            self.cursor.skip(1);
        }
        match (rational, imaginary) {
            (true, true) => NumberSuffix::RationalImaginary,
            (true, false) => NumberSuffix::Rational,
            (false, true) => NumberSuffix::Imaginary,
            (false, false) => NumberSuffix::None,
        }
    }

    fn emit_integer(&mut self, text: String, radix: u32, suffix: NumberSuffix) {
        let kind = if suffix.is_imaginary() {
            TokenKind::Imaginary
        } else if suffix.is_rational() {
            TokenKind::Rational
        } else {
            TokenKind::Integer
        };
        self.emit_value(
            kind,
            TokenValue::Number(NumberLit {
                text,
                radix,
                float: false,
                suffix,
                fraction: None,
            }),
        );
    }

    /// `1.25r` is exactly `125/100`.
    fn rational_fraction(&mut self, text: &str, point: usize) -> Option<(i64, i64)> {
        let numerator: String = text.chars().filter(|&c| c != '.').collect();
        let scale = text.len() - point - 1;
        let value = numerator.parse::<i64>().ok().and_then(|n| {
            let d = u32::try_from(scale).ok().and_then(|s| 10_i64.checked_pow(s))?;
            Some((n, d))
        });
        if value.is_none() {
            self.error(LexErrorKind::RationalOutOfRange {
                denominator: format!("1{}", "0".repeat(scale)),
                numerator,
            });
        }
        value
    }

    fn check_float_range(&mut self, text: &str) {
        let Ok(value) = text.parse::<f64>() else {
            return;
        };
        let mantissa = text.split('e').next().unwrap_or(text);
        let underflow = value == 0.0 && mantissa.bytes().any(|b| matches!(b, b'1'..=b'9'));
        if value.is_infinite() || underflow {
            self.warn(LexWarningKind::FloatOutOfRange {
                text: text.to_owned(),
            });
        }
    }
}
