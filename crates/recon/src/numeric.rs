//! Fixed-point parsing of quantities as they appear in receipt exports.
//!
//! Exports mix `.` and `,` as the decimal separator and sometimes carry
//! stray spaces, so these scanners work byte by byte instead of going
//! through `str::parse`. Liters are returned as integer milliliters.

use crate::error::NumberError;

fn is_separator(b: u8) -> bool {
    b == b'.' || b == b','
}

fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

fn push_digit(acc: i64, digit: u8, raw: &str) -> Result<i64, NumberError> {
    acc.checked_mul(10)
        .and_then(|v| v.checked_add(i64::from(digit - b'0')))
        .ok_or_else(|| NumberError::Overflow(raw.to_string()))
}

/// Parse decimal text into thousandths (`"1,5"` -> 1500).
///
/// Three fractional digits are kept; the fourth only decides round-half-up,
/// anything after it is ignored.
pub fn parse_decimal_to_milli(raw: &str) -> Result<i64, NumberError> {
    let mut int_part: i64 = 0;
    let mut frac_part: i64 = 0;
    let mut frac_digits = 0;
    let mut round_digit: Option<u8> = None;
    let mut saw_digit = false;
    let mut seen_sep = false;

    for &b in raw.as_bytes() {
        match b {
            b'0'..=b'9' => {
                saw_digit = true;
                if !seen_sep {
                    int_part = push_digit(int_part, b, raw)?;
                } else if frac_digits < 3 {
                    frac_part = frac_part * 10 + i64::from(b - b'0');
                    frac_digits += 1;
                } else if round_digit.is_none() {
                    round_digit = Some(b - b'0');
                }
            }
            _ if is_separator(b) => {
                if seen_sep {
                    return Err(NumberError::Invalid(raw.to_string()));
                }
                seen_sep = true;
            }
            _ if is_blank(b) => {}
            _ => return Err(NumberError::Invalid(raw.to_string())),
        }
    }

    if !saw_digit {
        return Err(NumberError::Empty);
    }

    while frac_digits < 3 {
        frac_part *= 10;
        frac_digits += 1;
    }

    let mut milli = int_part
        .checked_mul(1000)
        .and_then(|v| v.checked_add(frac_part))
        .ok_or_else(|| NumberError::Overflow(raw.to_string()))?;
    if round_digit.is_some_and(|d| d >= 5) {
        milli = milli
            .checked_add(1)
            .ok_or_else(|| NumberError::Overflow(raw.to_string()))?;
    }
    Ok(milli)
}

/// Parse a count. Returns the integer part and whether the value is whole;
/// `"1,5"` gives `(1, false)`, `"2,00"` gives `(2, true)`.
pub fn parse_whole_number(raw: &str) -> Result<(i64, bool), NumberError> {
    let mut int_part: i64 = 0;
    let mut saw_digit = false;
    let mut seen_sep = false;
    let mut non_zero_fraction = false;

    for &b in raw.as_bytes() {
        match b {
            b'0'..=b'9' => {
                saw_digit = true;
                if !seen_sep {
                    int_part = push_digit(int_part, b, raw)?;
                } else if b != b'0' {
                    non_zero_fraction = true;
                }
            }
            _ if is_separator(b) => {
                if seen_sep {
                    return Err(NumberError::Invalid(raw.to_string()));
                }
                seen_sep = true;
            }
            _ if is_blank(b) => {}
            _ => return Err(NumberError::Invalid(raw.to_string())),
        }
    }

    if !saw_digit {
        return Err(NumberError::Empty);
    }
    Ok((int_part, !non_zero_fraction))
}

/// Like [`parse_whole_number`], but a fractional value is an error.
pub fn parse_whole_count(raw: &str) -> Result<i64, NumberError> {
    match parse_whole_number(raw)? {
        (count, true) => Ok(count),
        (_, false) => Err(NumberError::NotWhole(raw.to_string())),
    }
}

/// Find a liters marker such as `0,5 l` or `1.5L` in a product label.
///
/// Returns `Ok(None)` when the label has no number directly followed by
/// an `l`. A number that is followed by `l` but is malformed is an error.
pub fn parse_liters_from_label(label: &str) -> Result<Option<i64>, NumberError> {
    let bytes = label.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let start = i;
        i += 1;
        while i < bytes.len() && (bytes[i].is_ascii_digit() || is_separator(bytes[i])) {
            i += 1;
        }
        let number = &label[start..i];

        let mut j = i;
        while j < bytes.len() && is_blank(bytes[j]) {
            j += 1;
        }
        if j < bytes.len() && (bytes[j] == b'l' || bytes[j] == b'L') {
            return parse_decimal_to_milli(number).map(Some);
        }
    }

    Ok(None)
}

/// Bottle unit size in milliliters taken from a product label.
pub fn bottle_size_ml(label: &str) -> Result<Option<i64>, NumberError> {
    match parse_liters_from_label(label)? {
        Some(ml) if ml <= 0 => Err(NumberError::InvalidLiters),
        other => Ok(other),
    }
}
