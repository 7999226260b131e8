use serde::Serialize;

use crate::calculator::{Calculator, FieldSpec};
use crate::i18n::Label;
use crate::validation::{FormValues, Rule, ValidationErrors, Validator};

/// 기대손실 계산 입력.
#[derive(Debug, Clone)]
pub struct ExpectedLossInput {
    pub ead: f64,
    /// 부도확률(%)
    pub pd_pct: f64,
    pub collateral_value: f64,
    /// 담보 헤어컷(%)
    pub haircut_pct: f64,
    /// 무담보 부분 회수율(%)
    pub recovery_pct: f64,
}

/// 기대손실 계산 결과.
#[derive(Debug, Clone, Serialize)]
pub struct ExpectedLossResult {
    pub secured_exposure: f64,
    pub unsecured_exposure: f64,
    /// 부도시 손실률(%)
    pub lgd_pct: f64,
    /// EL = PD × LGD × EAD
    pub expected_loss: f64,
    /// EAD 대비 기대손실(%)
    pub expected_loss_rate_pct: f64,
}

pub fn compute_expected_loss(input: &ExpectedLossInput) -> ExpectedLossResult {
    let haircut = input.haircut_pct / 100.0;
    let secured = input.ead.min(input.collateral_value * (1.0 - haircut)).max(0.0);
    let unsecured = input.ead - secured;
    let loss_given_default = unsecured * (1.0 - input.recovery_pct / 100.0);
    let lgd = loss_given_default / input.ead;
    let expected_loss = input.pd_pct / 100.0 * lgd * input.ead;
    ExpectedLossResult {
        secured_exposure: secured,
        unsecured_exposure: unsecured,
        lgd_pct: lgd * 100.0,
        expected_loss,
        expected_loss_rate_pct: expected_loss / input.ead * 100.0,
    }
}

pub struct ExpectedLoss;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::number("ead", Label::new("부도시 익스포저", "Exposure at default")),
    FieldSpec::number("pd", Label::new("부도확률", "Probability of default")).unit("%"),
    FieldSpec::number("collateral_value", Label::new("담보 가치", "Collateral value")).default("0"),
    FieldSpec::number("haircut", Label::new("담보 헤어컷", "Collateral haircut")).default("0").unit("%"),
    FieldSpec::number("recovery", Label::new("무담보 회수율", "Unsecured recovery")).default("0").unit("%"),
];

impl Calculator for ExpectedLoss {
    const ID: &'static str = "expected-loss";
    const TITLE: Label = Label::new("기대손실", "Expected loss");

    type Input = ExpectedLossInput;
    type Output = ExpectedLossResult;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(form: &FormValues) -> Result<Self::Input, ValidationErrors> {
        let mut v = Validator::new(form);
        let input = ExpectedLossInput {
            ead: v.number("ead", &[Rule::Positive]),
            pd_pct: v.number("pd", &[Rule::Percent]),
            collateral_value: v.number("collateral_value", &[Rule::NonNegative]),
            haircut_pct: v.number("haircut", &[Rule::Percent]),
            recovery_pct: v.number("recovery", &[Rule::Percent]),
        };
        v.finish(input)
    }

    fn compute(input: &Self::Input) -> Self::Output {
        compute_expected_loss(input)
    }
}
