use serde::{Deserialize, Serialize};

/// 온도 단위를 정의한다. 배율 하나로 표현되지 않으므로 선형 단위 표와 따로 둔다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Kelvin,
    Celsius,
    Fahrenheit,
    Rankine,
}

impl TemperatureUnit {
    pub const ALL: &'static [Self] = &[
        TemperatureUnit::Kelvin,
        TemperatureUnit::Celsius,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Rankine,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Kelvin => "k",
            TemperatureUnit::Celsius => "c",
            TemperatureUnit::Fahrenheit => "f",
            TemperatureUnit::Rankine => "r",
        }
    }

    /// 기호나 이름으로 단위를 찾는다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "k" | "kelvin" => Some(TemperatureUnit::Kelvin),
            "c" | "celsius" | "°c" => Some(TemperatureUnit::Celsius),
            "f" | "fahrenheit" | "°f" => Some(TemperatureUnit::Fahrenheit),
            "r" | "rankine" => Some(TemperatureUnit::Rankine),
            _ => None,
        }
    }
}

impl TemperatureUnit {
    /// 켈빈 기준 아핀 계수 `(배율, 영점 이동)`. K = (값 + 이동) × 배율.
    const fn affine(self) -> (f64, f64) {
        match self {
            TemperatureUnit::Kelvin => (1.0, 0.0),
            TemperatureUnit::Celsius => (1.0, 273.15),
            TemperatureUnit::Fahrenheit => (5.0 / 9.0, 459.67),
            TemperatureUnit::Rankine => (5.0 / 9.0, 0.0),
        }
    }

    pub fn to_kelvin(self, value: f64) -> f64 {
        let (scale, shift) = self.affine();
        (value + shift) * scale
    }

    pub fn from_kelvin(self, kelvin: f64) -> f64 {
        let (scale, shift) = self.affine();
        kelvin / scale - shift
    }
}

/// 절대 온도를 변환한다. 온도 차이에는 쓰지 않는다.
pub fn convert_temperature(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    to.from_kelvin(from.to_kelvin(value))
}
