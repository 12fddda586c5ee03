//! Rollover duration literals.
//!
//! Accepts the signed duration syntax used by the Cloud Foundry tooling:
//! an optional sign followed by one or more `<decimal><unit>` components,
//! e.g. `90s`, `1.5h`, `1h30m`, `-1m`. The bare literal `0` needs no unit.
//!
//! Pure functions, no I/O.

use std::time::Duration;

use anyhow::Result;

use crate::domain::error::RolloverError;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Largest magnitude representable by a signed 64-bit nanosecond count.
const MAX_POSITIVE: u64 = i64::MAX as u64;
const MAX_NEGATIVE: u64 = MAX_POSITIVE + 1;

/// A parsed duration literal that remembers its sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedDuration {
    /// `true` when the literal carried a leading `-` and a non-zero magnitude.
    pub negative: bool,
    /// Absolute value of the literal.
    pub magnitude: Duration,
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Consume leading ASCII digits, returning the value and the rest.
/// `None` on overflow.
fn leading_int(s: &str) -> Option<(u64, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut value: u64 = 0;
    for b in s[..end].bytes() {
        value = value
            .checked_mul(10)?
            .checked_add(u64::from(b - b'0'))?;
        if value > MAX_NEGATIVE {
            return None;
        }
    }
    Some((value, &s[end..]))
}

/// Consume the digits after a decimal point. Digits past the precision of
/// `u64` are skipped rather than rejected.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut value: u64 = 0;
    let mut scale = 1.0_f64;
    let mut overflow = false;
    for b in s[..end].bytes() {
        if overflow {
            continue;
        }
        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
        {
            Some(v) => {
                value = v;
                scale *= 10.0;
            }
            None => overflow = true,
        }
    }
    (value, scale, &s[end..])
}

/// Parse a signed duration literal.
///
/// # Errors
///
/// Returns `RolloverError::InvalidDuration`, `MissingUnit` or `UnknownUnit`
/// when the literal is malformed or overflows 64-bit nanoseconds.
pub fn parse_signed(input: &str) -> Result<SignedDuration> {
    let invalid = || RolloverError::InvalidDuration(input.to_string());

    let mut s = input;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    if s == "0" {
        return Ok(SignedDuration {
            negative: false,
            magnitude: Duration::ZERO,
        });
    }
    if s.is_empty() {
        return Err(invalid().into());
    }

    let mut total: u64 = 0;
    while !s.is_empty() {
        if !s.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid().into());
        }

        let before = s.len();
        let (mut value, rest) = leading_int(s).ok_or_else(invalid)?;
        let had_int = rest.len() != before;
        s = rest;

        let mut fraction = 0;
        let mut scale = 1.0;
        let mut had_fraction = false;
        if let Some(rest) = s.strip_prefix('.') {
            let before = rest.len();
            let (f, sc, rest) = leading_fraction(rest);
            had_fraction = rest.len() != before;
            fraction = f;
            scale = sc;
            s = rest;
        }
        if !had_int && !had_fraction {
            return Err(invalid().into());
        }

        let unit_end = s
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        let unit = &s[..unit_end];
        if unit.is_empty() {
            return Err(RolloverError::MissingUnit(input.to_string()).into());
        }
        let nanos = unit_nanos(unit).ok_or_else(|| RolloverError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;
        s = &s[unit_end..];

        value = value.checked_mul(nanos).ok_or_else(invalid)?;
        if value > MAX_NEGATIVE {
            return Err(invalid().into());
        }
        if fraction > 0 {
            #[allow(
                clippy::cast_precision_loss,
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss
            )]
            let extra = (fraction as f64 * (nanos as f64 / scale)) as u64;
            value = value.checked_add(extra).ok_or_else(invalid)?;
            if value > MAX_NEGATIVE {
                return Err(invalid().into());
            }
        }
        total = total.checked_add(value).ok_or_else(invalid)?;
        if total > MAX_NEGATIVE {
            return Err(invalid().into());
        }
    }

    if !negative && total > MAX_POSITIVE {
        return Err(invalid().into());
    }

    Ok(SignedDuration {
        negative: negative && total > 0,
        magnitude: Duration::from_nanos(total),
    })
}

/// Parse the rollover duration argument, rejecting negative values.
///
/// Zero is accepted and means "no pause between steps".
///
/// # Errors
///
/// Returns a parse error for malformed literals and
/// `RolloverError::NegativeDuration` for negative ones.
pub fn parse_rollover_duration(input: &str) -> Result<Duration> {
    let parsed = parse_signed(input)?;
    if parsed.negative {
        return Err(RolloverError::NegativeDuration.into());
    }
    Ok(parsed.magnitude)
}
