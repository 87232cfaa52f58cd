use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Half-open time interval `[start, end)` scoping a snapshot or an asset observation
///
/// A missing bound marks the window as unbounded on that side. Windows are
/// immutable `Copy` values, so every asset of a snapshot can hold the same
/// window without sharing any mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Window {
    #[serde(default)]
    start: Option<DateTime<Utc>>,
    #[serde(default)]
    end: Option<DateTime<Utc>>,
}

impl Window {
    /// Create a window; `None` on either side means unbounded
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// Create a window with both bounds set
    pub fn closed(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::new(Some(start), Some(end))
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// True when either bound is missing
    pub fn is_open(&self) -> bool {
        self.start.is_none() || self.end.is_none()
    }

    /// Length of the window, or `None` if it is open
    pub fn duration(&self) -> Option<Duration> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Length of the window in fractional hours, or `None` if it is open
    pub fn hours(&self) -> Option<f64> {
        self.duration().map(|d| d.num_milliseconds() as f64 / 3_600_000.0)
    }

    /// Whether `instant` falls inside `[start, end)`
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        let after_start = self.start.map_or(true, |s| instant >= s);
        let before_end = self.end.map_or(true, |e| instant < e);
        after_start && before_end
    }

    /// Smallest window covering both `self` and `other`
    ///
    /// An unbounded side on either input stays unbounded.
    pub fn expand(&self, other: &Window) -> Window {
        let start = match (self.start, other.start) {
            (Some(a), Some(b)) => Some(a.min(b)),
            _ => None,
        };
        let end = match (self.end, other.end) {
            (Some(a), Some(b)) => Some(a.max(b)),
            _ => None,
        };
        Window { start, end }
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fmt_bound = |b: Option<DateTime<Utc>>| {
            b.map(|t| t.to_rfc3339()).unwrap_or_else(|| "unbounded".to_string())
        };
        write!(f, "[{}, {})", fmt_bound(self.start), fmt_bound(self.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_equality_is_exact_on_both_bounds() {
        assert_eq!(Window::closed(ts(0), ts(4)), Window::closed(ts(0), ts(4)));
        assert_ne!(Window::closed(ts(0), ts(4)), Window::closed(ts(0), ts(5)));
        assert_ne!(Window::closed(ts(0), ts(4)), Window::new(Some(ts(0)), None));
        assert_eq!(Window::new(None, None), Window::default());
    }

    #[test]
    fn test_open_windows() {
        let w = Window::new(Some(ts(1)), None);
        assert!(w.is_open());
        assert!(w.duration().is_none());
        assert!(w.contains(ts(23)));
        assert!(!w.contains(ts(0)));
    }

    #[test]
    fn test_hours_and_half_open_contains() {
        let w = Window::closed(ts(2), ts(8));
        assert_eq!(w.hours(), Some(6.0));
        assert!(w.contains(ts(2)));
        assert!(!w.contains(ts(8)));
    }

    #[test]
    fn test_expand() {
        let a = Window::closed(ts(2), ts(4));
        let b = Window::closed(ts(3), ts(9));
        assert_eq!(a.expand(&b), Window::closed(ts(2), ts(9)));

        let open = Window::new(None, Some(ts(5)));
        assert_eq!(a.expand(&open), Window::new(None, Some(ts(5))));
    }

    #[test]
    fn test_serde_round_trip_with_unbounded_end() {
        let w = Window::new(Some(ts(1)), None);
        let json = serde_json::to_string(&w).unwrap();
        let back: Window = serde_json::from_str(&json).unwrap();
        assert_eq!(w, back);

        let missing: Window = serde_json::from_str("{}").unwrap();
        assert!(missing.is_open());
    }
}
