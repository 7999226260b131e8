use serde::{Deserialize, Serialize};

use crate::units::{linear, TemperatureUnit};
use crate::units::{AreaUnit, EnergyUnit, LengthUnit, MassUnit, PressureUnit};
use crate::units::{SpeedUnit, TimeUnit, TorqueUnit, VolumeUnit};
use crate::validation::Choice;

/// 변환기가 다루는 물리량 종류를 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuantityKind {
    Area,
    Length,
    Mass,
    Volume,
    Torque,
    Speed,
    Time,
    Energy,
    Pressure,
    Temperature,
}

impl Choice for QuantityKind {
    const CHOICES: &'static [(&'static str, Self)] = &[
        ("area", QuantityKind::Area),
        ("length", QuantityKind::Length),
        ("mass", QuantityKind::Mass),
        ("volume", QuantityKind::Volume),
        ("torque", QuantityKind::Torque),
        ("speed", QuantityKind::Speed),
        ("time", QuantityKind::Time),
        ("energy", QuantityKind::Energy),
        ("pressure", QuantityKind::Pressure),
        ("temperature", QuantityKind::Temperature),
    ];
}

impl QuantityKind {
    /// 해당 물리량에 등록된 단위 기호 목록.
    pub fn unit_symbols(self) -> Vec<&'static str> {
        match self {
            QuantityKind::Area => linear::symbols::<AreaUnit>(),
            QuantityKind::Length => linear::symbols::<LengthUnit>(),
            QuantityKind::Mass => linear::symbols::<MassUnit>(),
            QuantityKind::Volume => linear::symbols::<VolumeUnit>(),
            QuantityKind::Torque => linear::symbols::<TorqueUnit>(),
            QuantityKind::Speed => linear::symbols::<SpeedUnit>(),
            QuantityKind::Time => linear::symbols::<TimeUnit>(),
            QuantityKind::Energy => linear::symbols::<EnergyUnit>(),
            QuantityKind::Pressure => linear::symbols::<PressureUnit>(),
            QuantityKind::Temperature => TemperatureUnit::ALL.iter().map(|u| u.symbol()).collect(),
        }
    }
}
