use serde::Serialize;
use thiserror::Error;

use crate::calculator::{Calculator, FieldKind, FieldSpec};
use crate::i18n::{keys, Label};
use crate::quantity::QuantityKind;
use crate::units::linear::{self, LinearUnit};
use crate::units::*;
use crate::validation::{choice_names, Choice, FormValues, ValidationErrors, Validator};

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("{kind:?}에 없는 단위: {unit}")]
    UnknownUnit { kind: QuantityKind, unit: String },
    /// 지원하지 않는 물리량
    #[error("지원하지 않는 물리량: {0}")]
    UnsupportedQuantity(String),
}

impl ConversionError {
    fn unknown(kind: QuantityKind, unit: &str) -> Self {
        ConversionError::UnknownUnit {
            kind,
            unit: unit.to_string(),
        }
    }
}

/// 물리량 이름 문자열을 해석한다.
pub fn parse_kind(s: &str) -> Result<QuantityKind, ConversionError> {
    QuantityKind::parse_choice(s).ok_or_else(|| ConversionError::UnsupportedQuantity(s.to_string()))
}

fn convert_linear<U: LinearUnit>(
    kind: QuantityKind,
    value: f64,
    from: &str,
    to: &str,
) -> Result<f64, ConversionError> {
    let from_unit = linear::parse::<U>(from).ok_or_else(|| ConversionError::unknown(kind, from))?;
    let to_unit = linear::parse::<U>(to).ok_or_else(|| ConversionError::unknown(kind, to))?;
    Ok(linear::convert(value, from_unit, to_unit))
}

/// 문자열로 전달된 단위명을 해석한 뒤 지정된 단위로 환산한다.
///
/// 단위 문자열 예시는 `ha`, `ft2`, `n-m`, `lbf-ft`, `C`, `psi` 등을 사용할 수 있다.
pub fn convert(
    kind: QuantityKind,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    match kind {
        QuantityKind::Area => convert_linear::<AreaUnit>(kind, value, from_unit_str, to_unit_str),
        QuantityKind::Length => convert_linear::<LengthUnit>(kind, value, from_unit_str, to_unit_str),
        QuantityKind::Mass => convert_linear::<MassUnit>(kind, value, from_unit_str, to_unit_str),
        QuantityKind::Volume => convert_linear::<VolumeUnit>(kind, value, from_unit_str, to_unit_str),
        QuantityKind::Torque => convert_linear::<TorqueUnit>(kind, value, from_unit_str, to_unit_str),
        QuantityKind::Speed => convert_linear::<SpeedUnit>(kind, value, from_unit_str, to_unit_str),
        QuantityKind::Time => convert_linear::<TimeUnit>(kind, value, from_unit_str, to_unit_str),
        QuantityKind::Energy => convert_linear::<EnergyUnit>(kind, value, from_unit_str, to_unit_str),
        QuantityKind::Pressure => {
            convert_linear::<PressureUnit>(kind, value, from_unit_str, to_unit_str)
        }
        QuantityKind::Temperature => {
            let from = TemperatureUnit::parse(from_unit_str)
                .ok_or_else(|| ConversionError::unknown(kind, from_unit_str))?;
            let to = TemperatureUnit::parse(to_unit_str)
                .ok_or_else(|| ConversionError::unknown(kind, to_unit_str))?;
            Ok(convert_temperature(value, from, to))
        }
    }
}

/// 단위 변환기 입력.
#[derive(Debug, Clone)]
pub struct UnitConversionInput {
    pub kind: QuantityKind,
    pub value: f64,
    pub from: String,
    pub to: String,
}

/// 단위 변환 결과.
#[derive(Debug, Clone, Serialize)]
pub struct UnitConversionResult {
    pub value: f64,
    pub from: String,
    pub result: f64,
    pub to: String,
    /// 역변환 결과. 입력값과 같아야 한다.
    pub round_trip: f64,
}

/// 폼 기반 단위 변환기.
pub struct UnitConverter;

const UNIT_CONVERTER_FIELDS: &[FieldSpec] = &[
    FieldSpec::choice("kind", Label::new("물리량", "Quantity"), choice_names::<QuantityKind>),
    FieldSpec::number("value", Label::new("값", "Value")),
    FieldSpec::new("from", Label::new("입력 단위", "From unit"), FieldKind::Text),
    FieldSpec::new("to", Label::new("변환 단위", "To unit"), FieldKind::Text),
];

impl Calculator for UnitConverter {
    const ID: &'static str = "unit-converter";
    const TITLE: Label = Label::new("단위 변환기", "Unit converter");

    type Input = UnitConversionInput;
    type Output = UnitConversionResult;

    fn fields() -> &'static [FieldSpec] {
        UNIT_CONVERTER_FIELDS
    }

    fn validate(form: &FormValues) -> Result<Self::Input, ValidationErrors> {
        let mut v = Validator::new(form);
        let kind = v.choice::<QuantityKind>("kind");
        // 온도 외에는 음수 물리량이 의미가 없지만 차이값 변환도 허용한다
        let value = v.number("value", &[]);
        let from = v.text("from");
        let to = v.text("to");
        if !v.has_error("kind") {
            for (field, unit) in [("from", &from), ("to", &to)] {
                let known = convert(kind, 1.0, unit, unit).is_ok();
                v.ensure(known, field, keys::RULE_UNKNOWN_UNIT);
            }
        }
        v.finish(UnitConversionInput {
            kind,
            value,
            from,
            to,
        })
    }

    fn compute(input: &Self::Input) -> Self::Output {
        // 검증에서 두 단위가 모두 확인되었으므로 실패하지 않는다
        let result = convert(input.kind, input.value, &input.from, &input.to).unwrap_or(f64::NAN);
        let round_trip = convert(input.kind, result, &input.to, &input.from).unwrap_or(f64::NAN);
        UnitConversionResult {
            value: input.value,
            from: input.from.clone(),
            result,
            to: input.to.clone(),
            round_trip,
        }
    }
}
