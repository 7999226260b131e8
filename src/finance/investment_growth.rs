use serde::{Deserialize, Serialize};

use crate::calculator::{Calculator, ChartSeries, FieldSpec};
use crate::i18n::Label;
use crate::validation::{choice_names, Choice, FormValues, Rule, ValidationErrors, Validator};

/// 복리 주기.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compounding {
    Annual,
    SemiAnnual,
    Quarterly,
    Monthly,
    Daily,
}

impl Choice for Compounding {
    const CHOICES: &'static [(&'static str, Self)] = &[
        ("annual", Compounding::Annual),
        ("semi-annual", Compounding::SemiAnnual),
        ("quarterly", Compounding::Quarterly),
        ("monthly", Compounding::Monthly),
        ("daily", Compounding::Daily),
    ];
}

impl Compounding {
    /// 연간 복리 횟수.
    pub fn periods_per_year(self) -> u32 {
        match self {
            Compounding::Annual => 1,
            Compounding::SemiAnnual => 2,
            Compounding::Quarterly => 4,
            Compounding::Monthly => 12,
            Compounding::Daily => 365,
        }
    }
}

/// 투자 성장 계산 입력.
#[derive(Debug, Clone)]
pub struct InvestmentGrowthInput {
    pub principal: f64,
    /// 매월 납입액. 복리 주기에 맞춰 기간당 금액으로 나눠 넣는다.
    pub monthly_contribution: f64,
    /// 연 수익률(%)
    pub annual_rate_pct: f64,
    pub years: u32,
    pub compounding: Compounding,
}

/// 연말 잔액 한 줄.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearRow {
    pub year: u32,
    pub balance: f64,
    pub contributed: f64,
    pub interest: f64,
}

/// 투자 성장 계산 결과.
#[derive(Debug, Clone, Serialize)]
pub struct InvestmentGrowthResult {
    pub future_value: f64,
    /// 원금 + 누적 납입액
    pub total_contributed: f64,
    pub interest_earned: f64,
    pub yearly: Vec<YearRow>,
    pub balance_series: ChartSeries,
}

/// 기간 말 납입을 가정하여 기간별로 복리를 적용한다.
pub fn compute_investment_growth(input: &InvestmentGrowthInput) -> InvestmentGrowthResult {
    let n = input.compounding.periods_per_year();
    let rate = input.annual_rate_pct / 100.0 / f64::from(n);
    let per_period = input.monthly_contribution * 12.0 / f64::from(n);

    let mut balance = input.principal;
    let mut contributed = input.principal;
    let mut yearly = Vec::with_capacity(input.years as usize);
    let mut series = ChartSeries::new("balance");
    for year in 1..=input.years {
        for _ in 0..n {
            balance = balance * (1.0 + rate) + per_period;
            contributed += per_period;
        }
        yearly.push(YearRow {
            year,
            balance,
            contributed,
            interest: balance - contributed,
        });
        series.push(year.to_string(), balance);
    }

    InvestmentGrowthResult {
        future_value: balance,
        total_contributed: contributed,
        interest_earned: balance - contributed,
        yearly,
        balance_series: series,
    }
}

pub struct InvestmentGrowth;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::number("principal", Label::new("초기 투자금", "Initial investment")),
    FieldSpec::number("monthly_contribution", Label::new("월 납입액", "Monthly contribution")).default("0"),
    FieldSpec::number("annual_rate", Label::new("연 수익률", "Annual return")).unit("%"),
    FieldSpec::integer("years", Label::new("투자 기간", "Years")).unit("yr"),
    FieldSpec::choice("compounding", Label::new("복리 주기", "Compounding"), choice_names::<Compounding>)
        .default("monthly"),
];

impl Calculator for InvestmentGrowth {
    const ID: &'static str = "investment-growth";
    const TITLE: Label = Label::new("투자 성장", "Investment growth");

    type Input = InvestmentGrowthInput;
    type Output = InvestmentGrowthResult;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(form: &FormValues) -> Result<Self::Input, ValidationErrors> {
        let mut v = Validator::new(form);
        let input = InvestmentGrowthInput {
            principal: v.number("principal", &[Rule::NonNegative]),
            monthly_contribution: v.number("monthly_contribution", &[Rule::NonNegative]),
            annual_rate_pct: v.number("annual_rate", &[Rule::Range(-100.0, 100.0)]),
            years: v.integer("years", 1, 100) as u32,
            compounding: v.choice("compounding"),
        };
        v.finish(input)
    }

    fn compute(input: &Self::Input) -> Self::Output {
        compute_investment_growth(input)
    }
}
