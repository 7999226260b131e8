use serde::Serialize;

use crate::calculator::{Calculator, FieldSpec};
use crate::i18n::Label;
use crate::validation::{FormValues, Rule, ValidationErrors, Validator};

/// 보험료 부담 판정 기준(소득 대비 %). 2025년 ACA 기준값.
pub const DEFAULT_AFFORDABILITY_THRESHOLD_PCT: f64 = 9.02;

/// 보험료 부담 능력 계산 입력.
#[derive(Debug, Clone)]
pub struct AffordabilityInput {
    /// 연 소득. 0보다 커야 한다.
    pub annual_income: f64,
    pub monthly_premium: f64,
    /// 연간 본인부담 상한
    pub annual_oop_max: f64,
    pub threshold_pct: f64,
}

/// 보험료 부담 능력 계산 결과.
#[derive(Debug, Clone, Serialize)]
pub struct AffordabilityResult {
    pub annual_premium: f64,
    /// 연 보험료 / 소득 × 100
    pub premium_share_pct: f64,
    pub affordable: bool,
    /// 기준 이하가 되는 최대 월 보험료
    pub max_affordable_monthly_premium: f64,
    /// 보험료 + 본인부담 상한
    pub worst_case_annual_cost: f64,
    pub worst_case_share_pct: f64,
}

pub fn compute_affordability(input: &AffordabilityInput) -> AffordabilityResult {
    let annual_premium = input.monthly_premium * 12.0;
    let premium_share_pct = annual_premium / input.annual_income * 100.0;
    let worst_case_annual_cost = annual_premium + input.annual_oop_max;
    AffordabilityResult {
        annual_premium,
        premium_share_pct,
        affordable: premium_share_pct <= input.threshold_pct,
        max_affordable_monthly_premium: input.annual_income * input.threshold_pct / 100.0 / 12.0,
        worst_case_annual_cost,
        worst_case_share_pct: worst_case_annual_cost / input.annual_income * 100.0,
    }
}

pub struct InsuranceAffordability;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::number("annual_income", Label::new("연 소득", "Annual household income")),
    FieldSpec::number("monthly_premium", Label::new("월 보험료", "Monthly premium")),
    FieldSpec::number("annual_oop_max", Label::new("연간 본인부담 상한", "Annual out-of-pocket maximum"))
        .default("0"),
    FieldSpec::number("threshold", Label::new("부담 기준", "Affordability threshold"))
        .default("9.02")
        .unit("%"),
];

impl Calculator for InsuranceAffordability {
    const ID: &'static str = "insurance-affordability";
    const TITLE: Label = Label::new("보험료 부담 능력", "Insurance affordability");

    type Input = AffordabilityInput;
    type Output = AffordabilityResult;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(form: &FormValues) -> Result<Self::Input, ValidationErrors> {
        let mut v = Validator::new(form);
        let input = AffordabilityInput {
            annual_income: v.number("annual_income", &[Rule::Positive]),
            monthly_premium: v.number("monthly_premium", &[Rule::NonNegative]),
            annual_oop_max: v.number("annual_oop_max", &[Rule::NonNegative]),
            threshold_pct: v.number("threshold", &[Rule::Percent]),
        };
        v.finish(input)
    }

    fn compute(input: &Self::Input) -> Self::Output {
        compute_affordability(input)
    }
}
