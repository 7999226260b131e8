use serde::Serialize;

use super::{plan_trip, BreakPolicy, TripPlan};
use super::{BREAK_INTERVAL_FIELD, BREAK_LENGTH_FIELD, DISTANCE_FIELD, SPEED_FIELD};
use crate::calculator::{Calculator, FieldSpec};
use crate::i18n::Label;
use crate::units::format_hours;
use crate::validation::{FormValues, Rule, ValidationErrors, Validator};

/// 운전 시간 계산 입력.
#[derive(Debug, Clone)]
pub struct DrivingTimeInput {
    pub distance: f64,
    /// 거리와 같은 길이 단위의 시속
    pub speed: f64,
    pub breaks: BreakPolicy,
}

/// 운전 시간 계산 결과.
#[derive(Debug, Clone, Serialize)]
pub struct DrivingTimeResult {
    #[serde(flatten)]
    pub plan: TripPlan,
    pub driving_time: String,
    pub total_time: String,
}

pub fn compute_driving_time(input: &DrivingTimeInput) -> DrivingTimeResult {
    let plan = plan_trip(input.distance, input.speed, input.breaks);
    DrivingTimeResult {
        driving_time: format_hours(plan.driving_hours),
        total_time: format_hours(plan.total_hours),
        plan,
    }
}

pub struct DrivingTime;

const FIELDS: &[FieldSpec] = &[
    DISTANCE_FIELD,
    SPEED_FIELD,
    BREAK_INTERVAL_FIELD,
    BREAK_LENGTH_FIELD,
];

impl Calculator for DrivingTime {
    const ID: &'static str = "driving-time";
    const TITLE: Label = Label::new("운전 시간", "Driving time");

    type Input = DrivingTimeInput;
    type Output = DrivingTimeResult;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(form: &FormValues) -> Result<Self::Input, ValidationErrors> {
        let mut v = Validator::new(form);
        let distance = v.number("distance", &[Rule::Positive]);
        let speed = v.number("speed", &[Rule::Positive]);
        let interval_h = v.number("break_interval", &[Rule::NonNegative]);
        let break_min = v.number("break_minutes", &[Rule::NonNegative]);
        v.finish(DrivingTimeInput {
            distance,
            speed,
            breaks: BreakPolicy {
                interval_h,
                break_min,
            },
        })
    }

    fn compute(input: &Self::Input) -> Self::Output {
        compute_driving_time(input)
    }
}
