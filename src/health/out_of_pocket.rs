use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::calculator::{Calculator, FieldSpec};
use crate::i18n::{keys, Label};
use crate::validation::{FormValues, Rule, ValidationErrors, Validator, MONEY_MAX};

/// 의료비 분담 계산 입력. 금액은 모두 소수 연산으로 다룬다.
#[derive(Debug, Clone)]
pub struct HealthCostInput {
    /// 이번 진료비 총액
    pub total_bill: Decimal,
    /// 연간 공제액(deductible)
    pub deductible: Decimal,
    /// 올해 이미 충족한 공제액. 공제액을 넘을 수 없다.
    pub deductible_met: Decimal,
    /// 공동부담률(%)
    pub coinsurance_pct: Decimal,
    /// 연간 본인부담 상한. 공제액 이상이어야 한다.
    pub oop_max: Decimal,
    /// 올해 이미 낸 본인부담금
    pub oop_spent: Decimal,
}

/// 의료비 분담 계산 결과.
#[derive(Debug, Clone, Serialize)]
pub struct HealthCostResult {
    #[serde(with = "rust_decimal::serde::float")]
    pub deductible_paid: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub coinsurance_paid: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub patient_total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub insurer_total: Decimal,
    /// 본인부담 상한에 걸려 금액이 줄었는지
    pub oop_cap_reached: bool,
    /// 이번 진료 후 남은 본인부담 한도
    #[serde(with = "rust_decimal::serde::float")]
    pub oop_remaining: Decimal,
}

/// 공제액 → 공동부담 → 본인부담 상한 순서로 분담액을 계산한다.
///
/// 공동부담액은 센트 단위로 반올림(0.5는 올림)한 뒤 상한을 적용한다.
/// 보험자 부담은 총액에서 환자 부담을 뺀 값이라 두 값의 합은 총액과 정확히 같다.
pub fn compute_health_cost(input: &HealthCostInput) -> HealthCostResult {
    let zero = Decimal::ZERO;
    let total = input.total_bill.max(zero);
    let remaining_deductible = (input.deductible - input.deductible_met).max(zero);
    let deductible_portion = remaining_deductible.min(total);
    let after_deductible = total - deductible_portion;
    let coinsurance_portion = (after_deductible * input.coinsurance_pct / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let cap = (input.oop_max - input.oop_spent).max(zero);
    let uncapped = deductible_portion + coinsurance_portion;
    let patient_total = uncapped.min(cap);
    let oop_cap_reached = uncapped > cap;

    // 상한에 걸리면 공제액 분담부터 채운다
    let deductible_paid = deductible_portion.min(patient_total);
    let coinsurance_paid = patient_total - deductible_paid;

    HealthCostResult {
        deductible_paid,
        coinsurance_paid,
        patient_total,
        insurer_total: total - patient_total,
        oop_cap_reached,
        oop_remaining: cap - patient_total,
    }
}

pub struct HealthCost;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::number("total_bill", Label::new("진료비 총액", "Total bill")),
    FieldSpec::number("deductible", Label::new("연간 공제액", "Annual deductible")),
    FieldSpec::number("deductible_met", Label::new("충족한 공제액", "Deductible already met")).default("0"),
    FieldSpec::number("coinsurance", Label::new("공동부담률", "Coinsurance")).default("20").unit("%"),
    FieldSpec::number("oop_max", Label::new("본인부담 상한", "Out-of-pocket maximum")),
    FieldSpec::number("oop_spent", Label::new("올해 낸 본인부담", "Out-of-pocket spent")).default("0"),
];

impl Calculator for HealthCost {
    const ID: &'static str = "health-cost";
    const TITLE: Label = Label::new("의료비 본인부담", "Health cost sharing");

    type Input = HealthCostInput;
    type Output = HealthCostResult;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(form: &FormValues) -> Result<Self::Input, ValidationErrors> {
        let mut v = Validator::new(form);
        let amount = &[Rule::Range(0.0, MONEY_MAX)];
        let input = HealthCostInput {
            total_bill: v.money("total_bill", amount),
            deductible: v.money("deductible", amount),
            deductible_met: v.money("deductible_met", amount),
            coinsurance_pct: v.money("coinsurance", &[Rule::Percent]),
            oop_max: v.money("oop_max", amount),
            oop_spent: v.money("oop_spent", amount),
        };
        if !v.has_error("deductible") {
            v.ensure(
                input.deductible_met <= input.deductible,
                "deductible_met",
                keys::RULE_DEDUCTIBLE_MET,
            );
            v.ensure(
                input.oop_max >= input.deductible,
                "oop_max",
                keys::RULE_OOP_BELOW_DEDUCTIBLE,
            );
        }
        v.finish(input)
    }

    fn compute(input: &Self::Input) -> Self::Output {
        compute_health_cost(input)
    }
}
