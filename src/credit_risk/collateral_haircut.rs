use serde::Serialize;

use super::normal::inverse_normal_cdf;
use crate::calculator::{Calculator, FieldSpec};
use crate::i18n::Label;
use crate::validation::{FormValues, Rule, ValidationErrors, Validator};

/// 연간 영업일 수. 연 변동성을 보유 기간으로 환산할 때 쓴다.
pub const TRADING_DAYS_PER_YEAR: f64 = 250.0;
/// 통화 불일치 가산 헤어컷(10영업일 기준)
pub const FX_MISMATCH_HAIRCUT: f64 = 0.08;
const FX_REFERENCE_DAYS: f64 = 10.0;

/// 담보 헤어컷 계산 입력.
#[derive(Debug, Clone)]
pub struct CollateralHaircutInput {
    pub collateral_value: f64,
    pub exposure: f64,
    /// 담보 가치의 연 변동성(%)
    pub volatility_pct: f64,
    /// 보유(청산) 기간(영업일)
    pub holding_days: u32,
    pub confidence_pct: f64,
    /// 담보와 익스포저의 통화가 다른지
    pub currency_mismatch: bool,
}

/// 담보 헤어컷 계산 결과.
#[derive(Debug, Clone, Serialize)]
pub struct CollateralHaircutResult {
    pub z_score: f64,
    pub volatility_haircut_pct: f64,
    pub fx_haircut_pct: f64,
    /// 합산 헤어컷. 100%를 넘지 않는다.
    pub haircut_pct: f64,
    pub adjusted_collateral: f64,
    /// 조정 담보 / 익스포저
    pub coverage_ratio: f64,
    pub uncovered_exposure: f64,
}

/// VaR 방식 헤어컷: h = z(c)·σ·√(days/250), 통화 불일치 시 8%·√(days/10) 가산.
pub fn compute_collateral_haircut(input: &CollateralHaircutInput) -> CollateralHaircutResult {
    let days = f64::from(input.holding_days);
    let z = inverse_normal_cdf(input.confidence_pct / 100.0);
    let volatility_haircut = z * input.volatility_pct / 100.0 * (days / TRADING_DAYS_PER_YEAR).sqrt();
    let fx_haircut = if input.currency_mismatch {
        FX_MISMATCH_HAIRCUT * (days / FX_REFERENCE_DAYS).sqrt()
    } else {
        0.0
    };
    let haircut = (volatility_haircut + fx_haircut).clamp(0.0, 1.0);
    let adjusted = input.collateral_value * (1.0 - haircut);
    CollateralHaircutResult {
        z_score: z,
        volatility_haircut_pct: volatility_haircut * 100.0,
        fx_haircut_pct: fx_haircut * 100.0,
        haircut_pct: haircut * 100.0,
        adjusted_collateral: adjusted,
        coverage_ratio: adjusted / input.exposure,
        uncovered_exposure: (input.exposure - adjusted).max(0.0),
    }
}

pub struct CollateralHaircut;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::number("collateral_value", Label::new("담보 가치", "Collateral value")),
    FieldSpec::number("exposure", Label::new("익스포저", "Exposure")),
    FieldSpec::number("volatility", Label::new("담보 변동성", "Collateral volatility")).unit("%/yr"),
    FieldSpec::integer("holding_days", Label::new("보유 기간", "Holding period")).default("10").unit("days"),
    FieldSpec::number("confidence", Label::new("신뢰수준", "Confidence level")).default("99").unit("%"),
    FieldSpec::flag("currency_mismatch", Label::new("통화 불일치", "Currency mismatch")).default("no"),
];

impl Calculator for CollateralHaircut {
    const ID: &'static str = "collateral-haircut";
    const TITLE: Label = Label::new("담보 헤어컷", "Collateral haircut");

    type Input = CollateralHaircutInput;
    type Output = CollateralHaircutResult;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(form: &FormValues) -> Result<Self::Input, ValidationErrors> {
        let mut v = Validator::new(form);
        let input = CollateralHaircutInput {
            collateral_value: v.number("collateral_value", &[Rule::NonNegative]),
            exposure: v.number("exposure", &[Rule::Positive]),
            volatility_pct: v.number("volatility", &[Rule::Range(0.0, 500.0)]),
            holding_days: v.integer("holding_days", 1, 250) as u32,
            confidence_pct: v.number("confidence", &[Rule::Range(50.0, 99.99)]),
            currency_mismatch: v.flag("currency_mismatch", false),
        };
        v.finish(input)
    }

    fn compute(input: &Self::Input) -> Self::Output {
        compute_collateral_haircut(input)
    }
}
