use serde::{Deserialize, Serialize};

use super::linear::{self, LinearUnit};

/// 에너지 단위. 내부 기준은 줄(J)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyUnit {
    Joule,
    Kilojoule,
    Calorie,
    KiloCalorie,
    WattHour,
    KilowattHour,
    Btu,
}

impl LinearUnit for EnergyUnit {
    const BASE: &'static str = "j";
    const ALL: &'static [Self] = &[
        EnergyUnit::Joule,
        EnergyUnit::Kilojoule,
        EnergyUnit::Calorie,
        EnergyUnit::KiloCalorie,
        EnergyUnit::WattHour,
        EnergyUnit::KilowattHour,
        EnergyUnit::Btu,
    ];

    fn factor(self) -> f64 {
        match self {
            EnergyUnit::Joule => 1.0,
            EnergyUnit::Kilojoule => 1000.0,
            EnergyUnit::Calorie => 4.184,
            EnergyUnit::KiloCalorie => 4184.0,
            EnergyUnit::WattHour => 3600.0,
            EnergyUnit::KilowattHour => 3.6e6,
            // IT Btu
            EnergyUnit::Btu => 1055.055_852_62,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            EnergyUnit::Joule => "j",
            EnergyUnit::Kilojoule => "kj",
            EnergyUnit::Calorie => "cal",
            EnergyUnit::KiloCalorie => "kcal",
            EnergyUnit::WattHour => "wh",
            EnergyUnit::KilowattHour => "kwh",
            EnergyUnit::Btu => "btu",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            EnergyUnit::Joule => &["joule"],
            EnergyUnit::Kilojoule => &["kilojoule"],
            EnergyUnit::Calorie => &["calorie"],
            EnergyUnit::KiloCalorie => &["kilocalorie"],
            EnergyUnit::WattHour => &["watt-hour"],
            EnergyUnit::KilowattHour => &["kilowatt-hour"],
            EnergyUnit::Btu => &[],
        }
    }
}

/// 에너지를 변환한다.
pub fn convert_energy(value: f64, from: EnergyUnit, to: EnergyUnit) -> f64 {
    linear::convert(value, from, to)
}
