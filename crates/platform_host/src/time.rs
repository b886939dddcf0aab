//! Wall-clock helpers for event stamps and the taskbar clock.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Hours and minutes of a wall-clock instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    /// Hour of day, `0..24`.
    pub hour: u32,
    /// Minute of hour, `0..60`.
    pub minute: u32,
}

impl ClockTime {
    /// Formats as zero-padded 24-hour `HH:MM`.
    pub fn hh_mm(self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Returns the wall-clock time of `unix_ms`.
///
/// Browsers report local time; other targets report UTC.
pub fn clock_time_at(unix_ms: u64) -> ClockTime {
    #[cfg(target_arch = "wasm32")]
    {
        let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(unix_ms as f64));
        ClockTime {
            hour: date.get_hours(),
            minute: date.get_minutes(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let minutes_of_day = (unix_ms / 60_000) % (24 * 60);
        ClockTime {
            hour: (minutes_of_day / 60) as u32,
            minute: (minutes_of_day % 60) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_formats_zero_padded() {
        assert_eq!(ClockTime { hour: 7, minute: 5 }.hh_mm(), "07:05");
        assert_eq!(ClockTime { hour: 23, minute: 59 }.hh_mm(), "23:59");
    }

    #[test]
    fn clock_time_wraps_at_midnight_on_native_targets() {
        let one_day_and_ninety_minutes = (24 * 60 + 90) * 60_000;
        assert_eq!(
            clock_time_at(one_day_and_ninety_minutes),
            ClockTime {
                hour: 1,
                minute: 30
            }
        );
    }
}
