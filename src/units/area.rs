use serde::{Deserialize, Serialize};

use super::linear::{self, LinearUnit};

/// 면적 단위. 내부 기준은 제곱미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaUnit {
    SquareMeter,
    SquareKilometer,
    SquareCentimeter,
    SquareMillimeter,
    Hectare,
    Acre,
    SquareFoot,
    SquareInch,
    SquareYard,
    SquareMile,
}

impl LinearUnit for AreaUnit {
    const BASE: &'static str = "m2";
    const ALL: &'static [Self] = &[
        AreaUnit::SquareMeter,
        AreaUnit::SquareKilometer,
        AreaUnit::SquareCentimeter,
        AreaUnit::SquareMillimeter,
        AreaUnit::Hectare,
        AreaUnit::Acre,
        AreaUnit::SquareFoot,
        AreaUnit::SquareInch,
        AreaUnit::SquareYard,
        AreaUnit::SquareMile,
    ];

    fn factor(self) -> f64 {
        match self {
            AreaUnit::SquareMeter => 1.0,
            AreaUnit::SquareKilometer => 1.0e6,
            AreaUnit::SquareCentimeter => 1.0e-4,
            AreaUnit::SquareMillimeter => 1.0e-6,
            AreaUnit::Hectare => 1.0e4,
            // 국제 에이커 = 43,560 ft²
            AreaUnit::Acre => 4046.856_422_4,
            AreaUnit::SquareFoot => 0.092_903_04,
            AreaUnit::SquareInch => 0.000_645_16,
            AreaUnit::SquareYard => 0.836_127_36,
            AreaUnit::SquareMile => 2_589_988.110_336,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            AreaUnit::SquareMeter => "m2",
            AreaUnit::SquareKilometer => "km2",
            AreaUnit::SquareCentimeter => "cm2",
            AreaUnit::SquareMillimeter => "mm2",
            AreaUnit::Hectare => "ha",
            AreaUnit::Acre => "ac",
            AreaUnit::SquareFoot => "ft2",
            AreaUnit::SquareInch => "in2",
            AreaUnit::SquareYard => "yd2",
            AreaUnit::SquareMile => "mi2",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            AreaUnit::SquareMeter => &["m^2", "sqm", "square-meter"],
            AreaUnit::SquareKilometer => &["km^2", "square-kilometer"],
            AreaUnit::SquareCentimeter => &["cm^2"],
            AreaUnit::SquareMillimeter => &["mm^2"],
            AreaUnit::Hectare => &["hectare"],
            AreaUnit::Acre => &["acre"],
            AreaUnit::SquareFoot => &["ft^2", "sqft", "square-feet", "square-foot"],
            AreaUnit::SquareInch => &["in^2", "sqin"],
            AreaUnit::SquareYard => &["yd^2", "sqyd"],
            AreaUnit::SquareMile => &["mi^2", "sqmi"],
        }
    }
}

/// 면적을 변환한다.
pub fn convert_area(value: f64, from: AreaUnit, to: AreaUnit) -> f64 {
    linear::convert(value, from, to)
}
