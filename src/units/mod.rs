//! 단위 정의 및 변환 모듈 모음.

pub mod area;
pub mod energy;
pub mod length;
pub mod linear;
pub mod mass;
pub mod pressure;
pub mod speed;
pub mod temperature;
pub mod time;
pub mod torque;
pub mod volume;

pub use area::{convert_area, AreaUnit};
pub use energy::{convert_energy, EnergyUnit};
pub use length::{convert_length, LengthUnit};
pub use linear::LinearUnit;
pub use mass::{convert_mass, MassUnit};
pub use pressure::{convert_pressure, PressureUnit};
pub use speed::{convert_speed, SpeedUnit};
pub use temperature::{convert_temperature, TemperatureUnit};
pub use time::{convert_time, format_hours, hms_to_seconds, TimeUnit};
pub use torque::{convert_torque, TorqueUnit};
pub use volume::{convert_volume, VolumeUnit};
