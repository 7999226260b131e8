use serde::Serialize;

use crate::calculator::{Calculator, FieldSpec};
use crate::i18n::{keys, Label};
use crate::validation::{FormValues, ValidationErrors, Validator};

/// 경사 계산 입력. 높이와 수평 거리는 같은 단위여야 한다.
#[derive(Debug, Clone)]
pub struct SlopeInput {
    pub rise: f64,
    /// 0이 아니어야 한다.
    pub run: f64,
}

/// 경사 계산 결과.
#[derive(Debug, Clone, Serialize)]
pub struct SlopeResult {
    /// 경사도(%) = rise/run × 100
    pub grade_percent: f64,
    /// 경사각(°)
    pub angle_deg: f64,
    /// `1:x` 표기의 x. 높이가 0이면 없다.
    pub ratio_run_per_rise: Option<f64>,
    /// 빗변 길이
    pub slope_length: f64,
}

/// 경사도와 각도를 구한다.
pub fn compute_slope(input: &SlopeInput) -> SlopeResult {
    let grade = input.rise / input.run;
    SlopeResult {
        grade_percent: grade * 100.0,
        angle_deg: input.rise.atan2(input.run).to_degrees(),
        ratio_run_per_rise: (input.rise != 0.0).then(|| (input.run / input.rise).abs()),
        slope_length: input.rise.hypot(input.run),
    }
}

pub struct Slope;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::number("rise", Label::new("높이 변화", "Rise")),
    FieldSpec::number("run", Label::new("수평 거리", "Run")),
];

impl Calculator for Slope {
    const ID: &'static str = "slope";
    const TITLE: Label = Label::new("경사도", "Slope grade");

    type Input = SlopeInput;
    type Output = SlopeResult;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(form: &FormValues) -> Result<Self::Input, ValidationErrors> {
        let mut v = Validator::new(form);
        let rise = v.number("rise", &[]);
        let run = v.number("run", &[]);
        v.ensure(run != 0.0, "run", keys::RULE_SLOPE_RUN_ZERO);
        v.finish(SlopeInput { rise, run })
    }

    fn compute(input: &Self::Input) -> Self::Output {
        compute_slope(input)
    }
}
