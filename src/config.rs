use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::quantity::QuantityKind;
use crate::units::*;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
/// 언어팩 기본 디렉터리.
pub const DEFAULT_LOCALE_DIR: &str = "locales";

/// 사용 가능한 단위 시스템 프리셋을 정의한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitSystem {
    /// 미터법
    Metric,
    /// 영국식/야드파운드법
    Imperial,
}

/// 결과 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// 각 물리량별 기본 변환 대상 단위를 담는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultUnits {
    pub area: AreaUnit,
    pub length: LengthUnit,
    pub mass: MassUnit,
    pub volume: VolumeUnit,
    pub torque: TorqueUnit,
    pub speed: SpeedUnit,
    pub time: TimeUnit,
    pub energy: EnergyUnit,
    pub pressure: PressureUnit,
    pub temperature: TemperatureUnit,
}

impl Default for DefaultUnits {
    fn default() -> Self {
        Self::for_system(UnitSystem::Metric)
    }
}

impl DefaultUnits {
    /// 단위 시스템 프리셋에 맞는 기본 단위.
    pub fn for_system(system: UnitSystem) -> Self {
        match system {
            UnitSystem::Metric => Self {
                area: AreaUnit::SquareMeter,
                length: LengthUnit::Meter,
                mass: MassUnit::Kilogram,
                volume: VolumeUnit::Liter,
                torque: TorqueUnit::NewtonMeter,
                speed: SpeedUnit::KilometerPerHour,
                time: TimeUnit::Hour,
                energy: EnergyUnit::Kilojoule,
                pressure: PressureUnit::Bar,
                temperature: TemperatureUnit::Celsius,
            },
            UnitSystem::Imperial => Self {
                area: AreaUnit::SquareFoot,
                length: LengthUnit::Foot,
                mass: MassUnit::Pound,
                volume: VolumeUnit::UsGallon,
                torque: TorqueUnit::PoundFoot,
                speed: SpeedUnit::MilePerHour,
                time: TimeUnit::Hour,
                energy: EnergyUnit::Btu,
                pressure: PressureUnit::Psi,
                temperature: TemperatureUnit::Fahrenheit,
            },
        }
    }

    /// 물리량의 기본 단위 기호.
    pub fn symbol_for(&self, kind: QuantityKind) -> &'static str {
        match kind {
            QuantityKind::Area => self.area.symbol(),
            QuantityKind::Length => self.length.symbol(),
            QuantityKind::Mass => self.mass.symbol(),
            QuantityKind::Volume => self.volume.symbol(),
            QuantityKind::Torque => self.torque.symbol(),
            QuantityKind::Speed => self.speed.symbol(),
            QuantityKind::Time => self.time.symbol(),
            QuantityKind::Energy => self.energy.symbol(),
            QuantityKind::Pressure => self.pressure.symbol(),
            QuantityKind::Temperature => self.temperature.symbol(),
        }
    }
}

/// EAD 시뮬레이션 폼의 기본값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationDefaults {
    pub runs: u32,
    pub bins: u32,
    /// 지정하면 매번 같은 결과를 낸다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulationDefaults {
    fn default() -> Self {
        Self {
            runs: 10_000,
            bins: 20,
            seed: None,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `auto`, `ko`, `en`
    pub language: String,
    /// `ko.toml`, `en.toml` 언어팩을 찾을 디렉터리. 없으면 `locales`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale_dir: Option<PathBuf>,
    pub output: OutputFormat,
    /// 결과 소수점 자릿수
    pub decimals: usize,
    pub unit_system: UnitSystem,
    pub default_units: DefaultUnits,
    pub simulation: SimulationDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            locale_dir: None,
            output: OutputFormat::Text,
            decimals: 2,
            unit_system: UnitSystem::Metric,
            default_units: DefaultUnits::default(),
            simulation: SimulationDefaults::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        info!(path = %path.display(), "default config created");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 파일에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 단위 시스템을 바꾸고 기본 단위도 프리셋에 맞춘다.
    pub fn set_unit_system(&mut self, system: UnitSystem) {
        self.unit_system = system;
        self.default_units = DefaultUnits::for_system(system);
    }

    pub fn locale_pack_dir(&self) -> &Path {
        self.locale_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_LOCALE_DIR))
    }

    /// 설정 파일의 `language` 값. `auto`면 없는 것으로 본다.
    pub fn language_preference(&self) -> Option<&str> {
        match self.language.trim() {
            "" | "auto" => None,
            lang => Some(lang),
        }
    }
}
