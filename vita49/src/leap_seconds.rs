// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Collaborator interface for leap-second lookups, used to reconcile a VRT
timestamp's TSI=UTC integer-seconds field against a GPS/TAI epoch.

This crate does not ship a leap-second table. Callers that need exact
calendar conversion between UTC and GPS/TAI time should supply one via
[`LeapSecondsProvider`]; `vita49` itself only consumes the table to offset
between those epochs where requested.
*/

/// Provides the number of leap seconds inserted since the GPS epoch
/// (1980-01-06T00:00:00 UTC) as of a given UTC timestamp.
pub trait LeapSecondsProvider {
    /// Returns the cumulative leap second count at `utc_seconds` (seconds
    /// since the Unix epoch, UTC).
    fn leap_seconds(&self, utc_seconds: i64) -> i32;
}

/// A [`LeapSecondsProvider`] that always reports zero leap seconds. Useful
/// as a default when no table is available and callers are willing to
/// accept UTC/GPS timestamps as equivalent.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct NoLeapSeconds;

impl LeapSecondsProvider for NoLeapSeconds {
    fn leap_seconds(&self, _utc_seconds: i64) -> i32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_leap_seconds_is_always_zero() {
        assert_eq!(NoLeapSeconds.leap_seconds(0), 0);
        assert_eq!(NoLeapSeconds.leap_seconds(i64::MAX), 0);
    }
}
