use serde::{Deserialize, Serialize};

use super::linear::{self, LinearUnit};

/// 체적 단위. 내부 기준은 입방미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeUnit {
    CubicMeter,
    Liter,
    Milliliter,
    CubicFoot,
    CubicInch,
    UsGallon,
    ImperialGallon,
    UsQuart,
    UsCup,
    UsFluidOunce,
}

/// 미국 갤런 [m³]
pub const US_GALLON_M3: f64 = 0.003_785_411_784;
/// 영국 갤런 [m³]
pub const IMPERIAL_GALLON_M3: f64 = 0.004_546_09;

impl LinearUnit for VolumeUnit {
    const BASE: &'static str = "m3";
    const ALL: &'static [Self] = &[
        VolumeUnit::CubicMeter,
        VolumeUnit::Liter,
        VolumeUnit::Milliliter,
        VolumeUnit::CubicFoot,
        VolumeUnit::CubicInch,
        VolumeUnit::UsGallon,
        VolumeUnit::ImperialGallon,
        VolumeUnit::UsQuart,
        VolumeUnit::UsCup,
        VolumeUnit::UsFluidOunce,
    ];

    fn factor(self) -> f64 {
        match self {
            VolumeUnit::CubicMeter => 1.0,
            VolumeUnit::Liter => 0.001,
            VolumeUnit::Milliliter => 1.0e-6,
            VolumeUnit::CubicFoot => 0.028_316_846_592,
            VolumeUnit::CubicInch => 1.638_706_4e-5,
            VolumeUnit::UsGallon => US_GALLON_M3,
            VolumeUnit::ImperialGallon => IMPERIAL_GALLON_M3,
            VolumeUnit::UsQuart => US_GALLON_M3 / 4.0,
            VolumeUnit::UsCup => US_GALLON_M3 / 16.0,
            VolumeUnit::UsFluidOunce => US_GALLON_M3 / 128.0,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            VolumeUnit::CubicMeter => "m3",
            VolumeUnit::Liter => "l",
            VolumeUnit::Milliliter => "ml",
            VolumeUnit::CubicFoot => "ft3",
            VolumeUnit::CubicInch => "in3",
            VolumeUnit::UsGallon => "gal",
            VolumeUnit::ImperialGallon => "imp-gal",
            VolumeUnit::UsQuart => "qt",
            VolumeUnit::UsCup => "cup",
            VolumeUnit::UsFluidOunce => "fl-oz",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            VolumeUnit::CubicMeter => &["m^3"],
            VolumeUnit::Liter => &["liter", "litre"],
            VolumeUnit::Milliliter => &["milliliter", "cc"],
            VolumeUnit::CubicFoot => &["ft^3", "cuft"],
            VolumeUnit::CubicInch => &["in^3", "cuin"],
            VolumeUnit::UsGallon => &["us-gal", "gallon"],
            VolumeUnit::ImperialGallon => &["uk-gal"],
            VolumeUnit::UsQuart => &["quart"],
            VolumeUnit::UsCup => &["cups"],
            VolumeUnit::UsFluidOunce => &["floz"],
        }
    }
}

/// 체적을 변환한다.
pub fn convert_volume(value: f64, from: VolumeUnit, to: VolumeUnit) -> f64 {
    linear::convert(value, from, to)
}
