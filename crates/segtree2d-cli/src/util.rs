use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering::Relaxed;
use std::time::Duration;

// spell-checker:ignore subsec

/// Print all [`HDuration`]s as (fractional) seconds
pub static DURATIONS_AS_SECS: AtomicBool = AtomicBool::new(false);

/// Human-readable durations
pub struct HDuration(pub Duration);

impl fmt::Display for HDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.0;
        if DURATIONS_AS_SECS.load(Relaxed) {
            return write!(f, "{:.6} s", d.as_secs_f64());
        }
        let s = d.as_secs();
        if s >= 60 {
            let (m, s) = (s / 60, s % 60);
            let (h, m) = (m / 60, m % 60);
            if h == 0 {
                return write!(f, "{m} m {s} s");
            }
            return write!(f, "{h} h {m} m {s} s");
        }
        if s != 0 {
            return write!(f, "{:.3} s", d.as_secs_f32());
        }
        match (d.subsec_millis(), d.subsec_micros()) {
            (0, 0) => write!(f, "{} ns", d.subsec_nanos()),
            (0, us) => write!(f, "{us} us"),
            (ms, _) => write!(f, "{ms} ms"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn human_readable() {
        let fmt = |d| HDuration(d).to_string();
        assert_eq!(fmt(Duration::from_nanos(250)), "250 ns");
        assert_eq!(fmt(Duration::from_micros(12)), "12 us");
        assert_eq!(fmt(Duration::from_millis(999)), "999 ms");
        assert_eq!(fmt(Duration::from_millis(1500)), "1.500 s");
        assert_eq!(fmt(Duration::from_secs(61)), "1 m 1 s");
        assert_eq!(fmt(Duration::from_secs(3 * 3600 + 120)), "3 h 2 m 0 s");
    }
}
