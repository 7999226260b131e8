use serde::{Deserialize, Serialize};

use super::linear::{self, LinearUnit};

/// 질량 단위. 내부 기준은 kg이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MassUnit {
    Kilogram,
    Gram,
    Milligram,
    Tonne,
    Pound,
    Ounce,
    Stone,
}

impl LinearUnit for MassUnit {
    const BASE: &'static str = "kg";
    const ALL: &'static [Self] = &[
        MassUnit::Kilogram,
        MassUnit::Gram,
        MassUnit::Milligram,
        MassUnit::Tonne,
        MassUnit::Pound,
        MassUnit::Ounce,
        MassUnit::Stone,
    ];

    fn factor(self) -> f64 {
        match self {
            MassUnit::Kilogram => 1.0,
            MassUnit::Gram => 0.001,
            MassUnit::Milligram => 1.0e-6,
            MassUnit::Tonne => 1000.0,
            MassUnit::Pound => 0.453_592_37,
            MassUnit::Ounce => 0.028_349_523_125,
            MassUnit::Stone => 6.350_293_18,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            MassUnit::Kilogram => "kg",
            MassUnit::Gram => "g",
            MassUnit::Milligram => "mg",
            MassUnit::Tonne => "t",
            MassUnit::Pound => "lb",
            MassUnit::Ounce => "oz",
            MassUnit::Stone => "st",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            MassUnit::Kilogram => &["kilogram"],
            MassUnit::Gram => &["gram"],
            MassUnit::Milligram => &["milligram"],
            MassUnit::Tonne => &["tonne", "ton"],
            MassUnit::Pound => &["lbs", "lbm", "pound"],
            MassUnit::Ounce => &["ounce"],
            MassUnit::Stone => &["stone"],
        }
    }
}

/// 질량을 변환한다.
pub fn convert_mass(value: f64, from: MassUnit, to: MassUnit) -> f64 {
    linear::convert(value, from, to)
}
