use serde::Serialize;

use crate::calculator::{Calculator, FieldSpec};
use crate::i18n::{keys, Label};
use crate::units::hms_to_seconds;
use crate::validation::{FormValues, Rule, ValidationErrors, Validator};

/// 시간 비율 계산 입력. 모든 값은 초로 정규화되어 있고 부분 ≤ 전체이다.
#[derive(Debug, Clone)]
pub struct TimePercentageInput {
    /// 부분 시간(s)
    pub partial_s: f64,
    /// 전체 시간(s). 0보다 커야 한다.
    pub total_s: f64,
}

/// 시간 비율 계산 결과.
#[derive(Debug, Clone, Serialize)]
pub struct TimePercentageResult {
    pub partial_seconds: f64,
    pub total_seconds: f64,
    /// 부분/전체 × 100
    pub percentage: f64,
    /// 100 − 비율
    pub remainder_percentage: f64,
}

/// 부분 시간이 전체 시간에서 차지하는 비율을 구한다.
pub fn compute_time_percentage(input: &TimePercentageInput) -> TimePercentageResult {
    let percentage = input.partial_s / input.total_s * 100.0;
    TimePercentageResult {
        partial_seconds: input.partial_s,
        total_seconds: input.total_s,
        percentage,
        remainder_percentage: 100.0 - percentage,
    }
}

pub struct TimePercentage;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::number("partial_hours", Label::new("부분 시간(시)", "Partial hours")).default("0").unit("h"),
    FieldSpec::number("partial_minutes", Label::new("부분 시간(분)", "Partial minutes")).default("0").unit("min"),
    FieldSpec::number("partial_seconds", Label::new("부분 시간(초)", "Partial seconds")).default("0").unit("s"),
    FieldSpec::number("total_hours", Label::new("전체 시간(시)", "Total hours")).default("0").unit("h"),
    FieldSpec::number("total_minutes", Label::new("전체 시간(분)", "Total minutes")).default("0").unit("min"),
    FieldSpec::number("total_seconds", Label::new("전체 시간(초)", "Total seconds")).default("0").unit("s"),
];

impl Calculator for TimePercentage {
    const ID: &'static str = "time-percentage";
    const TITLE: Label = Label::new("시간 비율", "Percentage of time");

    type Input = TimePercentageInput;
    type Output = TimePercentageResult;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(form: &FormValues) -> Result<Self::Input, ValidationErrors> {
        let mut v = Validator::new(form);
        let nn = &[Rule::NonNegative];
        let partial_s = hms_to_seconds(
            v.number("partial_hours", nn),
            v.number("partial_minutes", nn),
            v.number("partial_seconds", nn),
        );
        let total_s = hms_to_seconds(
            v.number("total_hours", nn),
            v.number("total_minutes", nn),
            v.number("total_seconds", nn),
        );
        let any_error = |v: &Validator<'_>, fields: &[&str]| fields.iter().any(|f| v.has_error(f));
        if !any_error(&v, &["total_hours", "total_minutes", "total_seconds"]) {
            v.ensure(total_s > 0.0, "total_hours", keys::RULE_TOTAL_TIME_ZERO);
            if total_s > 0.0 && !any_error(&v, &["partial_hours", "partial_minutes", "partial_seconds"]) {
                v.ensure(
                    partial_s <= total_s,
                    "partial_hours",
                    keys::RULE_PARTIAL_EXCEEDS_TOTAL,
                );
            }
        }
        v.finish(TimePercentageInput { partial_s, total_s })
    }

    fn compute(input: &Self::Input) -> Self::Output {
        compute_time_percentage(input)
    }
}
