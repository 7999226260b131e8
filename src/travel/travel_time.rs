use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;
use tracing::warn;

use super::{plan_trip, BreakPolicy, TripPlan};
use super::{BREAK_INTERVAL_FIELD, BREAK_LENGTH_FIELD, DISTANCE_FIELD, SPEED_FIELD};
use crate::calculator::{Calculator, FieldKind, FieldSpec};
use crate::i18n::Label;
use crate::units::format_hours;
use crate::validation::{FormValues, Rule, ValidationErrors, Validator};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// 도착 시각 계산 입력.
#[derive(Debug, Clone)]
pub struct TravelTimeInput {
    /// 출발지 현지 시각
    pub departure: NaiveDateTime,
    pub distance: f64,
    pub speed: f64,
    pub breaks: BreakPolicy,
    /// 도착지 시간대 − 출발지 시간대(h)
    pub timezone_shift_h: f64,
}

/// 도착 시각 계산 결과.
#[derive(Debug, Clone, Serialize)]
pub struct TravelTimeResult {
    #[serde(flatten)]
    pub plan: TripPlan,
    pub driving_time: String,
    pub total_time: String,
    pub departure: String,
    /// 도착지 현지 시각. 표현 범위를 넘으면 없다.
    pub arrival: Option<String>,
    /// 출발일 대비 도착일의 날짜 차이(도착지 기준)
    pub days_later: Option<i64>,
}

/// 출발 시각에 이동 시간과 시차를 더해 도착 시각을 구한다.
pub fn compute_travel_time(input: &TravelTimeInput) -> TravelTimeResult {
    let plan = plan_trip(input.distance, input.speed, input.breaks);
    let offset_s = ((plan.total_hours + input.timezone_shift_h) * 3600.0).round();
    let arrival = TimeDelta::try_seconds(offset_s as i64)
        .and_then(|delta| input.departure.checked_add_signed(delta));
    if arrival.is_none() {
        warn!(offset_s, "arrival time out of range");
    }
    TravelTimeResult {
        driving_time: format_hours(plan.driving_hours),
        total_time: format_hours(plan.total_hours),
        departure: input.departure.format(DATETIME_FORMAT).to_string(),
        arrival: arrival.map(|a| a.format(DATETIME_FORMAT).to_string()),
        days_later: arrival.map(|a| (a.date() - input.departure.date()).num_days()),
        plan,
    }
}

pub struct TravelTime;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("departure", Label::new("출발 일시", "Departure"), FieldKind::DateTime)
        .unit("YYYY-MM-DD HH:MM"),
    DISTANCE_FIELD,
    SPEED_FIELD,
    BREAK_INTERVAL_FIELD,
    BREAK_LENGTH_FIELD,
    FieldSpec::number("timezone_shift", Label::new("시차", "Time zone shift"))
        .default("0")
        .unit("h"),
];

impl Calculator for TravelTime {
    const ID: &'static str = "travel-time";
    const TITLE: Label = Label::new("도착 시각", "Travel time and arrival");

    type Input = TravelTimeInput;
    type Output = TravelTimeResult;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(form: &FormValues) -> Result<Self::Input, ValidationErrors> {
        let mut v = Validator::new(form);
        let departure = v.datetime("departure");
        let distance = v.number("distance", &[Rule::Positive]);
        let speed = v.number("speed", &[Rule::Positive]);
        let interval_h = v.number("break_interval", &[Rule::NonNegative]);
        let break_min = v.number("break_minutes", &[Rule::NonNegative]);
        let timezone_shift_h = v.number("timezone_shift", &[Rule::Range(-26.0, 26.0)]);
        v.finish(TravelTimeInput {
            departure,
            distance,
            speed,
            breaks: BreakPolicy {
                interval_h,
                break_min,
            },
            timezone_shift_h,
        })
    }

    fn compute(input: &Self::Input) -> Self::Output {
        compute_travel_time(input)
    }
}
