use serde::Serialize;

use crate::calculator::{Calculator, ChartSeries, FieldSpec};
use crate::i18n::{keys, Label};
use crate::validation::{FormValues, Rule, ValidationErrors, Validator};

/// 장기요양 비용 계산 입력.
#[derive(Debug, Clone)]
pub struct LongTermCareInput {
    pub current_age: u32,
    /// 현재 나이보다 커야 한다.
    pub care_start_age: u32,
    /// 현재 물가 기준 연간 요양 비용
    pub annual_cost_today: f64,
    pub inflation_pct: f64,
    pub care_years: u32,
    /// 준비 기간 동안의 연 수익률(%)
    pub return_pct: f64,
}

/// 장기요양 비용 계산 결과.
#[derive(Debug, Clone, Serialize)]
pub struct LongTermCareResult {
    pub years_until_care: u32,
    pub first_year_cost: f64,
    pub total_cost: f64,
    /// 요양 시작까지 총액을 모으기 위한 월 저축액
    pub monthly_saving: f64,
    pub yearly_cost: ChartSeries,
}

/// 목표 금액을 `months` 개월 동안 월말 적립으로 모으는 데 필요한 월 납입액.
fn monthly_payment(target: f64, annual_return_pct: f64, months: u32) -> f64 {
    let r = annual_return_pct / 100.0 / 12.0;
    let n = f64::from(months);
    if r == 0.0 {
        target / n
    } else {
        target * r / ((1.0 + r).powf(n) - 1.0)
    }
}

pub fn compute_long_term_care(input: &LongTermCareInput) -> LongTermCareResult {
    let growth = 1.0 + input.inflation_pct / 100.0;
    let years_until_care = input.care_start_age - input.current_age;
    let first_year_cost = input.annual_cost_today * growth.powi(years_until_care as i32);

    let mut yearly_cost = ChartSeries::new("annual_cost");
    let mut total_cost = 0.0;
    for k in 0..input.care_years {
        let cost = first_year_cost * growth.powi(k as i32);
        total_cost += cost;
        yearly_cost.push((input.care_start_age + k).to_string(), cost);
    }

    LongTermCareResult {
        years_until_care,
        first_year_cost,
        total_cost,
        monthly_saving: monthly_payment(total_cost, input.return_pct, years_until_care * 12),
        yearly_cost,
    }
}

pub struct LongTermCare;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::integer("current_age", Label::new("현재 나이", "Current age")),
    FieldSpec::integer("care_start_age", Label::new("요양 시작 나이", "Care start age")),
    FieldSpec::number("annual_cost", Label::new("연간 요양 비용(현재가)", "Annual cost today")),
    FieldSpec::number("inflation", Label::new("요양비 상승률", "Care cost inflation")).default("3").unit("%"),
    FieldSpec::integer("care_years", Label::new("요양 기간", "Years of care")).default("3").unit("yr"),
    FieldSpec::number("return_rate", Label::new("저축 수익률", "Savings return")).default("5").unit("%"),
];

impl Calculator for LongTermCare {
    const ID: &'static str = "long-term-care";
    const TITLE: Label = Label::new("장기요양 비용", "Long-term care cost");

    type Input = LongTermCareInput;
    type Output = LongTermCareResult;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(form: &FormValues) -> Result<Self::Input, ValidationErrors> {
        let mut v = Validator::new(form);
        let input = LongTermCareInput {
            current_age: v.integer("current_age", 0, 120) as u32,
            care_start_age: v.integer("care_start_age", 1, 120) as u32,
            annual_cost_today: v.number("annual_cost", &[Rule::Positive]),
            inflation_pct: v.number("inflation", &[Rule::Range(0.0, 20.0)]),
            care_years: v.integer("care_years", 1, 50) as u32,
            return_pct: v.number("return_rate", &[Rule::Range(-50.0, 50.0)]),
        };
        if !v.has_error("current_age") {
            v.ensure(
                input.care_start_age > input.current_age,
                "care_start_age",
                keys::RULE_CARE_START_AGE,
            );
        }
        v.finish(input)
    }

    fn compute(input: &Self::Input) -> Self::Output {
        compute_long_term_care(input)
    }
}
