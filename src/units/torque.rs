use serde::{Deserialize, Serialize};

use super::linear::{self, LinearUnit};

/// 토크 단위. 내부 기준은 N·m이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TorqueUnit {
    NewtonMeter,
    KilonewtonMeter,
    NewtonCentimeter,
    PoundFoot,
    PoundInch,
    KilogramForceMeter,
    OunceForceInch,
}

impl LinearUnit for TorqueUnit {
    const BASE: &'static str = "n-m";
    const ALL: &'static [Self] = &[
        TorqueUnit::NewtonMeter,
        TorqueUnit::KilonewtonMeter,
        TorqueUnit::NewtonCentimeter,
        TorqueUnit::PoundFoot,
        TorqueUnit::PoundInch,
        TorqueUnit::KilogramForceMeter,
        TorqueUnit::OunceForceInch,
    ];

    fn factor(self) -> f64 {
        match self {
            TorqueUnit::NewtonMeter => 1.0,
            TorqueUnit::KilonewtonMeter => 1000.0,
            TorqueUnit::NewtonCentimeter => 0.01,
            // lbf(4.4482216152605 N) × ft(0.3048 m)
            TorqueUnit::PoundFoot => 1.355_817_948_331_400_4,
            TorqueUnit::PoundInch => 0.112_984_829_027_616_7,
            TorqueUnit::KilogramForceMeter => 9.806_65,
            TorqueUnit::OunceForceInch => 0.007_061_551_814_226_04,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            TorqueUnit::NewtonMeter => "n-m",
            TorqueUnit::KilonewtonMeter => "kn-m",
            TorqueUnit::NewtonCentimeter => "n-cm",
            TorqueUnit::PoundFoot => "lbf-ft",
            TorqueUnit::PoundInch => "lbf-in",
            TorqueUnit::KilogramForceMeter => "kgf-m",
            TorqueUnit::OunceForceInch => "ozf-in",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            TorqueUnit::NewtonMeter => &["nm", "n·m", "n.m"],
            TorqueUnit::KilonewtonMeter => &["knm", "kn·m"],
            TorqueUnit::NewtonCentimeter => &["ncm", "n·cm"],
            TorqueUnit::PoundFoot => &["ft-lb", "ft-lbf", "lb-ft"],
            TorqueUnit::PoundInch => &["in-lb", "in-lbf", "lb-in"],
            TorqueUnit::KilogramForceMeter => &["kgm", "kgf·m"],
            TorqueUnit::OunceForceInch => &["oz-in"],
        }
    }
}

/// 토크를 변환한다.
pub fn convert_torque(value: f64, from: TorqueUnit, to: TorqueUnit) -> f64 {
    linear::convert(value, from, to)
}
