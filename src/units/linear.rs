//! 기준 단위 대비 배율 하나로 정의되는 선형 단위 표.
//!
//! 각 단위 enum이 곧 불변 단위 표이다. 값은 원본 단위의 배율을 곱해 기준 단위로
//! 옮긴 뒤 목표 단위의 배율로 나눠 환산한다.

/// 기준 단위에 대한 배율로 정의되는 단위.
pub trait LinearUnit: Copy + PartialEq + 'static {
    /// 기준 단위 기호
    const BASE: &'static str;
    /// 표에 등록된 모든 단위. 첫 항목이 기준 단위이다.
    const ALL: &'static [Self];

    /// 1 단위가 기준 단위로 얼마인지.
    fn factor(self) -> f64;

    /// 대표 기호.
    fn symbol(self) -> &'static str;

    /// 입력 시 허용하는 별칭(소문자).
    fn aliases(self) -> &'static [&'static str] {
        &[]
    }
}

/// 기준 단위 값으로 환산한다.
pub fn to_base<U: LinearUnit>(value: f64, unit: U) -> f64 {
    value * unit.factor()
}

/// 기준 단위 값을 원하는 단위로 환산한다.
pub fn from_base<U: LinearUnit>(value_base: f64, unit: U) -> f64 {
    value_base / unit.factor()
}

/// 같은 물리량의 두 단위 사이를 변환한다.
pub fn convert<U: LinearUnit>(value: f64, from: U, to: U) -> f64 {
    if from == to {
        return value;
    }
    from_base(to_base(value, from), to)
}

/// 기호나 별칭으로 단위를 찾는다. 대소문자는 구분하지 않는다.
pub fn parse<U: LinearUnit>(s: &str) -> Option<U> {
    let key = s.trim().to_lowercase();
    U::ALL
        .iter()
        .copied()
        .find(|u| u.symbol().to_lowercase() == key || u.aliases().contains(&key.as_str()))
}

/// 표에 등록된 단위 기호 목록.
pub fn symbols<U: LinearUnit>() -> Vec<&'static str> {
    U::ALL.iter().map(|u| u.symbol()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{AreaUnit, EnergyUnit, LengthUnit, MassUnit, PressureUnit, SpeedUnit};
    use crate::units::{TimeUnit, TorqueUnit, VolumeUnit};

    fn assert_table_consistent<U: LinearUnit + std::fmt::Debug>() {
        assert_eq!(U::ALL[0].factor(), 1.0, "first entry must be the base unit");
        assert_eq!(U::ALL[0].symbol(), U::BASE);
        for unit in U::ALL {
            assert!(unit.factor() > 0.0, "{unit:?}");
            assert_eq!(parse::<U>(unit.symbol()), Some(*unit), "{unit:?}");
            for alias in unit.aliases() {
                assert_eq!(parse::<U>(alias), Some(*unit), "alias {alias}");
            }
        }
    }

    #[test]
    fn every_table_parses_its_own_symbols() {
        assert_table_consistent::<AreaUnit>();
        assert_table_consistent::<LengthUnit>();
        assert_table_consistent::<MassUnit>();
        assert_table_consistent::<VolumeUnit>();
        assert_table_consistent::<TorqueUnit>();
        assert_table_consistent::<SpeedUnit>();
        assert_table_consistent::<TimeUnit>();
        assert_table_consistent::<EnergyUnit>();
        assert_table_consistent::<PressureUnit>();
    }

    #[test]
    fn round_trip_returns_original_value() {
        for from in AreaUnit::ALL {
            for to in AreaUnit::ALL {
                let there = convert(123.456, *from, *to);
                let back = convert(there, *to, *from);
                assert!((back - 123.456).abs() < 1e-9 * 123.456, "{from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(parse::<AreaUnit>("  HA "), Some(AreaUnit::Hectare));
        assert_eq!(parse::<AreaUnit>("furlong"), None);
    }
}
