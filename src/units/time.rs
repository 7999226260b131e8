use serde::{Deserialize, Serialize};

use super::linear::{self, LinearUnit};

/// 시간 단위. 내부 기준은 초이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    Second,
    Millisecond,
    Minute,
    Hour,
    Day,
    Week,
}

impl LinearUnit for TimeUnit {
    const BASE: &'static str = "s";
    const ALL: &'static [Self] = &[
        TimeUnit::Second,
        TimeUnit::Millisecond,
        TimeUnit::Minute,
        TimeUnit::Hour,
        TimeUnit::Day,
        TimeUnit::Week,
    ];

    fn factor(self) -> f64 {
        match self {
            TimeUnit::Second => 1.0,
            TimeUnit::Millisecond => 0.001,
            TimeUnit::Minute => 60.0,
            TimeUnit::Hour => 3600.0,
            TimeUnit::Day => 86_400.0,
            TimeUnit::Week => 604_800.0,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            TimeUnit::Second => "s",
            TimeUnit::Millisecond => "ms",
            TimeUnit::Minute => "min",
            TimeUnit::Hour => "h",
            TimeUnit::Day => "d",
            TimeUnit::Week => "wk",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            TimeUnit::Second => &["sec", "second", "seconds"],
            TimeUnit::Millisecond => &["millisecond"],
            TimeUnit::Minute => &["minute", "minutes"],
            TimeUnit::Hour => &["hr", "hour", "hours"],
            TimeUnit::Day => &["day", "days"],
            TimeUnit::Week => &["week", "weeks"],
        }
    }
}

/// 시간을 변환한다.
pub fn convert_time(value: f64, from: TimeUnit, to: TimeUnit) -> f64 {
    linear::convert(value, from, to)
}

/// 시/분/초를 초로 합산한다.
pub fn hms_to_seconds(hours: f64, minutes: f64, seconds: f64) -> f64 {
    linear::to_base(hours, TimeUnit::Hour) + linear::to_base(minutes, TimeUnit::Minute) + seconds
}

/// 시간(h)을 `5h 30m` 형태로 표시한다. 분은 반올림한다.
pub fn format_hours(hours: f64) -> String {
    let total_minutes = (hours.max(0.0) * 60.0).round() as u64;
    format!("{}h {:02}m", total_minutes / 60, total_minutes % 60)
}
