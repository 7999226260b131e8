use serde::{Deserialize, Serialize};

use super::linear::{self, LinearUnit};

/// 속도 단위. 내부 기준은 m/s이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedUnit {
    MeterPerSecond,
    KilometerPerHour,
    MilePerHour,
    FootPerSecond,
    Knot,
}

impl LinearUnit for SpeedUnit {
    const BASE: &'static str = "m/s";
    const ALL: &'static [Self] = &[
        SpeedUnit::MeterPerSecond,
        SpeedUnit::KilometerPerHour,
        SpeedUnit::MilePerHour,
        SpeedUnit::FootPerSecond,
        SpeedUnit::Knot,
    ];

    fn factor(self) -> f64 {
        match self {
            SpeedUnit::MeterPerSecond => 1.0,
            SpeedUnit::KilometerPerHour => 1.0 / 3.6,
            SpeedUnit::MilePerHour => 0.44704,
            SpeedUnit::FootPerSecond => 0.3048,
            SpeedUnit::Knot => 1852.0 / 3600.0,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            SpeedUnit::MeterPerSecond => "m/s",
            SpeedUnit::KilometerPerHour => "km/h",
            SpeedUnit::MilePerHour => "mph",
            SpeedUnit::FootPerSecond => "ft/s",
            SpeedUnit::Knot => "kn",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            SpeedUnit::MeterPerSecond => &["mps"],
            SpeedUnit::KilometerPerHour => &["kph", "kmh"],
            SpeedUnit::MilePerHour => &["mi/h"],
            SpeedUnit::FootPerSecond => &["fps"],
            SpeedUnit::Knot => &["knot", "kt"],
        }
    }
}

/// 속도를 변환한다.
pub fn convert_speed(value: f64, from: SpeedUnit, to: SpeedUnit) -> f64 {
    linear::convert(value, from, to)
}
