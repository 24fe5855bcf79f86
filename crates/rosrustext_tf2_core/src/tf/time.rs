use serde::{Deserialize, Serialize};

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Point in time, shaped like `builtin_interfaces/msg/Time`.
///
/// `Time::ZERO` is the tf2 convention for "latest available".
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Time {
    pub sec: i32,
    pub nanosec: u32,
}

impl Time {
    pub const ZERO: Time = Time { sec: 0, nanosec: 0 };

    pub const fn new(sec: i32, nanosec: u32) -> Self {
        Self { sec, nanosec }
    }

    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

/// Span of time, shaped like `builtin_interfaces/msg/Duration`.
///
/// Sent verbatim to the resolver. Zero means "no explicit deadline hint";
/// what the resolver does with it is resolver-defined.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Duration {
    pub sec: i32,
    pub nanosec: u32,
}

impl Duration {
    pub const ZERO: Duration = Duration { sec: 0, nanosec: 0 };

    pub const fn new(sec: i32, nanosec: u32) -> Self {
        Self { sec, nanosec }
    }

    /// Nearest `Duration` to `secs`, or `None` when `secs` is NaN, infinite,
    /// or outside the `i32` seconds range.
    pub fn from_secs_f64(secs: f64) -> Option<Self> {
        if !secs.is_finite() {
            return None;
        }
        let whole = secs.floor();
        let mut nanosec = ((secs - whole) * NANOS_PER_SEC as f64).round() as u64;
        let mut sec = whole;
        // rounding can carry a full second
        if nanosec >= NANOS_PER_SEC {
            sec += 1.0;
            nanosec = 0;
        }
        if sec < i32::MIN as f64 || sec > i32::MAX as f64 {
            return None;
        }
        Some(Self {
            sec: sec as i32,
            nanosec: nanosec as u32,
        })
    }

    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    pub fn is_negative(self) -> bool {
        self.sec < 0
    }
}

impl From<std::time::Duration> for Duration {
    fn from(d: std::time::Duration) -> Self {
        Self {
            sec: i32::try_from(d.as_secs()).unwrap_or(i32::MAX),
            nanosec: d.subsec_nanos(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_from_secs_f64_handles_fractions_and_negatives() {
        assert_eq!(Duration::from_secs_f64(0.25), Some(Duration::new(0, 250_000_000)));
        assert_eq!(Duration::from_secs_f64(2.0), Some(Duration::new(2, 0)));
        assert_eq!(Duration::from_secs_f64(-0.5), Some(Duration::new(-1, 500_000_000)));
        assert_eq!(Duration::from_secs_f64(0.9999999999), Some(Duration::new(1, 0)));
    }

    #[test]
    fn duration_from_secs_f64_rejects_unrepresentable_input() {
        assert_eq!(Duration::from_secs_f64(f64::NAN), None);
        assert_eq!(Duration::from_secs_f64(f64::INFINITY), None);
        assert_eq!(Duration::from_secs_f64(f64::NEG_INFINITY), None);
        assert_eq!(Duration::from_secs_f64(i32::MAX as f64 + 1.0), None);
        assert_eq!(Duration::from_secs_f64(i32::MIN as f64 - 1.0), None);
        assert_eq!(
            Duration::from_secs_f64(i32::MAX as f64),
            Some(Duration::new(i32::MAX, 0))
        );
    }

    #[test]
    fn duration_from_std_saturates() {
        let d: Duration = std::time::Duration::from_millis(1500).into();
        assert_eq!(d, Duration::new(1, 500_000_000));
        let huge: Duration = std::time::Duration::from_secs(u64::MAX).into();
        assert_eq!(huge.sec, i32::MAX);
    }
}
