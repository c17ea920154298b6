//! UTCTime and GeneralizedTime: `YYMMDDHHMMSSZ` and `YYYYMMDDHHMMSSZ`.

use crate::{ErrorKind, Result};
use alloc::vec::Vec;
use core::fmt;

/// A calendar instant in UTC, to the second.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Time {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

fn is_leap(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Parse exactly `N` ASCII digits.
fn digits<const N: usize>(bytes: &[u8]) -> Result<u16> {
    if bytes.len() != N || !bytes.iter().all(u8::is_ascii_digit) {
        return Err(ErrorKind::Malformed.into());
    }
    Ok(bytes.iter().fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0')))
}

impl Time {
    /// 1970-01-01T00:00:00Z
    pub const EPOCH: Time = Time { year: 1970, month: 1, day: 1, hour: 0, minute: 0, second: 0 };

    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Result<Self> {
        let valid = year <= 9999
            && (1..=12).contains(&month)
            && day >= 1
            && day <= days_in_month(year, month)
            && hour < 24
            && minute < 60
            && second < 60;
        if !valid {
            return Err(ErrorKind::Malformed.into());
        }
        Ok(Self { year, month, day, hour, minute, second })
    }

    /// `MMDDHHMMSSZ` after the year digits.
    ///
    /// Seconds are required in both rule sets: a shorter form would re-encode
    /// longer than it was read.
    fn decode_rest(year: u16, rest: &[u8]) -> Result<Self> {
        let (body, zulu) = rest.split_at(rest.len().saturating_sub(1));
        if zulu != b"Z" || body.len() != 10 {
            return Err(ErrorKind::Malformed.into());
        }
        Self::new(
            year,
            digits::<2>(&body[0..2])? as u8,
            digits::<2>(&body[2..4])? as u8,
            digits::<2>(&body[4..6])? as u8,
            digits::<2>(&body[6..8])? as u8,
            digits::<2>(&body[8..10])? as u8,
        )
    }

    pub(crate) fn decode_utc(content: &[u8]) -> Result<Self> {
        if content.len() < 2 {
            return Err(ErrorKind::Malformed.into());
        }
        let yy = digits::<2>(&content[..2])?;
        let year = if yy >= 50 { 1900 + yy } else { 2000 + yy };
        Self::decode_rest(year, &content[2..])
    }

    pub(crate) fn decode_generalized(content: &[u8]) -> Result<Self> {
        if content.len() < 4 {
            return Err(ErrorKind::Malformed.into());
        }
        let year = digits::<4>(&content[..4])?;
        Self::decode_rest(year, &content[4..])
    }

    /// UTCTime covers the years 1950 through 2049 only.
    pub(crate) fn encode_utc(&self) -> Result<Vec<u8>> {
        if !(1950..=2049).contains(&self.year) {
            return Err(ErrorKind::Malformed.into());
        }
        let mut out = Vec::with_capacity(13);
        push_two(&mut out, (self.year % 100) as u8);
        self.push_rest(&mut out);
        Ok(out)
    }

    pub(crate) fn encode_generalized(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(15);
        push_two(&mut out, (self.year / 100) as u8);
        push_two(&mut out, (self.year % 100) as u8);
        self.push_rest(&mut out);
        out
    }

    fn push_rest(&self, out: &mut Vec<u8>) {
        for part in [self.month, self.day, self.hour, self.minute, self.second] {
            push_two(out, part);
        }
        out.push(b'Z');
    }
}

fn push_two(out: &mut Vec<u8>, value: u8) {
    out.push(b'0' + value / 10);
    out.push(b'0' + value % 10);
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Time;
    use crate::ErrorKind;

    #[test]
    fn utc_time_window() {
        let time = Time::decode_utc(b"491231235959Z").unwrap();
        assert_eq!(time, Time::new(2049, 12, 31, 23, 59, 59).unwrap());
        let time = Time::decode_utc(b"500101000000Z").unwrap();
        assert_eq!(time.year, 1950);
        assert_eq!(time.encode_utc().unwrap(), b"500101000000Z");

        assert!(Time::new(2050, 1, 1, 0, 0, 0).unwrap().encode_utc().is_err());
    }

    #[test]
    fn generalized_time() {
        let time = Time::decode_generalized(b"20240229120000Z").unwrap();
        assert_eq!(time.encode_generalized(), b"20240229120000Z");
        assert_eq!(
            Time::decode_generalized(b"20230229120000Z").unwrap_err().kind(),
            ErrorKind::Malformed
        );
    }

    #[test]
    fn grammar_is_fixed() {
        for bad in [
            &b"2401011200Z"[..],
            b"240101120000",
            b"240101120000+0100",
            b"241301120000Z",
            b"240101246000Z",
            b"24010112000aZ",
        ] {
            assert_eq!(Time::decode_utc(bad).unwrap_err().kind(), ErrorKind::Malformed);
        }
        assert_eq!(Time::decode_generalized(b"20240101120000.5Z").unwrap_err().kind(), ErrorKind::Malformed);
    }
}
