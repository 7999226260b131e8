use serde::Serialize;

use crate::calculator::{Calculator, FieldSpec};
use crate::i18n::{keys, Label};
use crate::validation::{FormValues, ValidationErrors, Validator};

/// 증감률 계산 입력.
#[derive(Debug, Clone)]
pub struct GrowthInput {
    /// 0이 아니어야 한다.
    pub initial: f64,
    pub final_value: f64,
    /// 기간 수. 있으면 연평균 성장률(CAGR)도 구한다.
    pub periods: Option<u32>,
}

/// 증감률 계산 결과.
#[derive(Debug, Clone, Serialize)]
pub struct GrowthResult {
    pub change: f64,
    /// (final − initial) / |initial| × 100
    pub percent_change: f64,
    /// 기간당 복리 성장률(%). 두 값이 모두 양수일 때만 정의된다.
    pub cagr_percent: Option<f64>,
}

pub fn compute_growth(input: &GrowthInput) -> GrowthResult {
    let change = input.final_value - input.initial;
    let cagr_percent = match input.periods {
        Some(n) if input.initial > 0.0 && input.final_value > 0.0 => {
            Some(((input.final_value / input.initial).powf(1.0 / f64::from(n)) - 1.0) * 100.0)
        }
        _ => None,
    };
    GrowthResult {
        change,
        percent_change: change / input.initial.abs() * 100.0,
        cagr_percent,
    }
}

pub struct PercentageGrowth;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::number("initial", Label::new("처음 값", "Initial value")),
    FieldSpec::number("final", Label::new("나중 값", "Final value")),
    FieldSpec::integer("periods", Label::new("기간 수(선택)", "Periods (optional)")).optional(),
];

impl Calculator for PercentageGrowth {
    const ID: &'static str = "percentage-growth";
    const TITLE: Label = Label::new("증감률", "Percentage growth");

    type Input = GrowthInput;
    type Output = GrowthResult;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(form: &FormValues) -> Result<Self::Input, ValidationErrors> {
        let mut v = Validator::new(form);
        let initial = v.number("initial", &[]);
        let final_value = v.number("final", &[]);
        let periods = v.optional_integer("periods", 1, 10_000).map(|n| n as u32);
        v.ensure(initial != 0.0, "initial", keys::RULE_GROWTH_INITIAL_ZERO);
        v.finish(GrowthInput {
            initial,
            final_value,
            periods,
        })
    }

    fn compute(input: &Self::Input) -> Self::Output {
        compute_growth(input)
    }
}
