use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculator::{Calculator, FieldSpec};
use crate::i18n::{keys, Label};
use crate::validation::{choice_names, Choice, FormValues, Rule, ValidationErrors, Validator};

/// 2025년 HSA 납입 한도(USD).
pub const SELF_ONLY_LIMIT: f64 = 4_300.0;
pub const FAMILY_LIMIT: f64 = 8_550.0;
/// 55세 이상 추가 납입 한도
pub const CATCH_UP_LIMIT: f64 = 1_000.0;
pub const CATCH_UP_AGE: u32 = 55;
/// 급여 공제 납입 시 면제되는 FICA 세율(%)
pub const FICA_RATE_PCT: f64 = 7.65;

/// HDHP 가입 형태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Coverage {
    SelfOnly,
    Family,
}

impl Choice for Coverage {
    const CHOICES: &'static [(&'static str, Self)] =
        &[("self", Coverage::SelfOnly), ("family", Coverage::Family)];
}

impl Coverage {
    pub fn base_limit(self) -> f64 {
        match self {
            Coverage::SelfOnly => SELF_ONLY_LIMIT,
            Coverage::Family => FAMILY_LIMIT,
        }
    }
}

/// HSA 절세 효과 계산 입력.
#[derive(Debug, Clone)]
pub struct HsaInput {
    pub coverage: Coverage,
    pub age: u32,
    /// 본인 연간 납입액
    pub employee_contribution: f64,
    /// 회사 연간 납입액. 한도에 함께 포함된다.
    pub employer_contribution: f64,
    pub federal_rate_pct: f64,
    pub state_rate_pct: f64,
    /// 급여 공제(cafeteria plan)로 납입하는지. FICA 면제 여부를 정한다.
    pub payroll_deduction: bool,
}

/// HSA 절세 효과 계산 결과.
#[derive(Debug, Clone, Serialize)]
pub struct HsaResult {
    pub annual_limit: f64,
    /// 한도 안에서 공제되는 본인 납입액
    pub eligible_contribution: f64,
    pub excess_contribution: f64,
    pub federal_savings: f64,
    pub state_savings: f64,
    pub fica_savings: f64,
    pub total_savings: f64,
    /// 본인 납입액 − 절세액
    pub effective_cost: f64,
}

/// 연령을 반영한 연간 납입 한도.
pub fn annual_limit(coverage: Coverage, age: u32) -> f64 {
    let catch_up = if age >= CATCH_UP_AGE { CATCH_UP_LIMIT } else { 0.0 };
    coverage.base_limit() + catch_up
}

pub fn compute_hsa(input: &HsaInput) -> HsaResult {
    let limit = annual_limit(input.coverage, input.age);
    let room = (limit - input.employer_contribution).max(0.0);
    let eligible = input.employee_contribution.min(room);
    let excess = input.employee_contribution - eligible;
    if excess > 0.0 {
        warn!(excess, limit, "HSA contribution exceeds the annual limit");
    }

    let federal_savings = eligible * input.federal_rate_pct / 100.0;
    let state_savings = eligible * input.state_rate_pct / 100.0;
    let fica_savings = if input.payroll_deduction {
        eligible * FICA_RATE_PCT / 100.0
    } else {
        0.0
    };
    let total_savings = federal_savings + state_savings + fica_savings;
    HsaResult {
        annual_limit: limit,
        eligible_contribution: eligible,
        excess_contribution: excess,
        federal_savings,
        state_savings,
        fica_savings,
        total_savings,
        effective_cost: input.employee_contribution - total_savings,
    }
}

pub struct HsaTaxBenefit;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::flag("hdhp", Label::new("HDHP 가입", "Enrolled in an HDHP")),
    FieldSpec::choice("coverage", Label::new("가입 형태", "Coverage"), choice_names::<Coverage>).default("self"),
    FieldSpec::integer("age", Label::new("나이", "Age")),
    FieldSpec::number("employee_contribution", Label::new("본인 납입액", "Your contribution")),
    FieldSpec::number("employer_contribution", Label::new("회사 납입액", "Employer contribution")).default("0"),
    FieldSpec::number("federal_rate", Label::new("연방 한계세율", "Federal marginal rate")).default("22").unit("%"),
    FieldSpec::number("state_rate", Label::new("주 세율", "State tax rate")).default("0").unit("%"),
    FieldSpec::flag("payroll", Label::new("급여 공제 납입", "Payroll deduction")).default("yes"),
];

impl Calculator for HsaTaxBenefit {
    const ID: &'static str = "hsa-tax-benefit";
    const TITLE: Label = Label::new("HSA 절세 효과", "HSA tax benefit");

    type Input = HsaInput;
    type Output = HsaResult;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(form: &FormValues) -> Result<Self::Input, ValidationErrors> {
        let mut v = Validator::new(form);
        if form.contains("hdhp") {
            let hdhp = v.flag("hdhp", false);
            v.ensure(hdhp, "hdhp", keys::RULE_HDHP_REQUIRED);
        } else {
            v.text("hdhp");
        }
        let input = HsaInput {
            coverage: v.choice("coverage"),
            age: v.integer("age", 18, 120) as u32,
            employee_contribution: v.number("employee_contribution", &[Rule::NonNegative]),
            employer_contribution: v.number("employer_contribution", &[Rule::NonNegative]),
            federal_rate_pct: v.number("federal_rate", &[Rule::Percent]),
            state_rate_pct: v.number("state_rate", &[Rule::Percent]),
            payroll_deduction: v.flag("payroll", true),
        };
        v.finish(input)
    }

    fn compute(input: &Self::Input) -> Self::Output {
        compute_hsa(input)
    }
}
