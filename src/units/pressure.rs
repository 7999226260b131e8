use serde::{Deserialize, Serialize};

use super::linear::{self, LinearUnit};

/// 압력 단위. 내부 기준은 Pa(절대 척도)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    Pascal,
    KiloPascal,
    MegaPascal,
    Bar,
    MilliBar,
    Psi,
    Atm,
    MmHg,
    KgPerCm2,
}

const PA_PER_BAR: f64 = 100_000.0;
const PA_PER_ATM: f64 = 101_325.0;

impl LinearUnit for PressureUnit {
    const BASE: &'static str = "pa";
    const ALL: &'static [Self] = &[
        PressureUnit::Pascal,
        PressureUnit::KiloPascal,
        PressureUnit::MegaPascal,
        PressureUnit::Bar,
        PressureUnit::MilliBar,
        PressureUnit::Psi,
        PressureUnit::Atm,
        PressureUnit::MmHg,
        PressureUnit::KgPerCm2,
    ];

    fn factor(self) -> f64 {
        match self {
            PressureUnit::Pascal => 1.0,
            PressureUnit::KiloPascal => 1000.0,
            PressureUnit::MegaPascal => 1.0e6,
            PressureUnit::Bar => PA_PER_BAR,
            PressureUnit::MilliBar => PA_PER_BAR / 1000.0,
            PressureUnit::Psi => 6894.757_293_168,
            PressureUnit::Atm => PA_PER_ATM,
            // 760 mmHg = 1 atm
            PressureUnit::MmHg => PA_PER_ATM / 760.0,
            PressureUnit::KgPerCm2 => 98_066.5,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            PressureUnit::Pascal => "pa",
            PressureUnit::KiloPascal => "kpa",
            PressureUnit::MegaPascal => "mpa",
            PressureUnit::Bar => "bar",
            PressureUnit::MilliBar => "mbar",
            PressureUnit::Psi => "psi",
            PressureUnit::Atm => "atm",
            PressureUnit::MmHg => "mmhg",
            PressureUnit::KgPerCm2 => "kgf/cm2",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            PressureUnit::Pascal => &["pascal"],
            PressureUnit::KiloPascal => &["kilopascal"],
            PressureUnit::MegaPascal => &["megapascal"],
            PressureUnit::Bar => &[],
            PressureUnit::MilliBar => &["millibar"],
            PressureUnit::Psi => &[],
            PressureUnit::Atm => &["atmosphere"],
            PressureUnit::MmHg => &["torr"],
            PressureUnit::KgPerCm2 => &["kg/cm2"],
        }
    }
}

/// 압력을 원하는 단위로 변환한다.
pub fn convert_pressure(value: f64, from: PressureUnit, to: PressureUnit) -> f64 {
    linear::convert(value, from, to)
}
