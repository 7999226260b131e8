use serde::{Deserialize, Serialize};

use super::linear::{self, LinearUnit};

/// 길이 단위. 내부 기준은 미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    Meter,
    Millimeter,
    Centimeter,
    Kilometer,
    Inch,
    Foot,
    Yard,
    Mile,
    NauticalMile,
}

impl LinearUnit for LengthUnit {
    const BASE: &'static str = "m";
    const ALL: &'static [Self] = &[
        LengthUnit::Meter,
        LengthUnit::Millimeter,
        LengthUnit::Centimeter,
        LengthUnit::Kilometer,
        LengthUnit::Inch,
        LengthUnit::Foot,
        LengthUnit::Yard,
        LengthUnit::Mile,
        LengthUnit::NauticalMile,
    ];

    fn factor(self) -> f64 {
        match self {
            LengthUnit::Meter => 1.0,
            LengthUnit::Millimeter => 0.001,
            LengthUnit::Centimeter => 0.01,
            LengthUnit::Kilometer => 1000.0,
            LengthUnit::Inch => 0.0254,
            LengthUnit::Foot => 0.3048,
            LengthUnit::Yard => 0.9144,
            LengthUnit::Mile => 1609.344,
            LengthUnit::NauticalMile => 1852.0,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Meter => "m",
            LengthUnit::Millimeter => "mm",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Kilometer => "km",
            LengthUnit::Inch => "in",
            LengthUnit::Foot => "ft",
            LengthUnit::Yard => "yd",
            LengthUnit::Mile => "mi",
            LengthUnit::NauticalMile => "nmi",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            LengthUnit::Meter => &["meter", "metre"],
            LengthUnit::Millimeter => &["millimeter"],
            LengthUnit::Centimeter => &["centimeter"],
            LengthUnit::Kilometer => &["kilometer", "kilometre"],
            LengthUnit::Inch => &["inch"],
            LengthUnit::Foot => &["foot", "feet"],
            LengthUnit::Yard => &["yard"],
            LengthUnit::Mile => &["mile"],
            LengthUnit::NauticalMile => &["nm", "nautical-mile"],
        }
    }
}

/// 길이를 다른 단위로 변환한다.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    linear::convert(value, from, to)
}
