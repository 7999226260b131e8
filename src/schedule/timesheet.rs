use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::calculator::{Calculator, FieldKind, FieldSpec};
use crate::i18n::{keys, Label};
use crate::units::format_hours;
use crate::validation::{choice_names, Choice, FormValues, Rule, ValidationErrors, Validator};

const MINUTES_PER_DAY: f64 = 1440.0;

/// 출퇴근 기록 반올림 규칙.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingRule {
    /// 가장 가까운 단위로. 정확히 중간이면 올린다.
    Nearest,
    Down,
    Up,
}

impl Choice for RoundingRule {
    const CHOICES: &'static [(&'static str, Self)] = &[
        ("nearest", RoundingRule::Nearest),
        ("down", RoundingRule::Down),
        ("up", RoundingRule::Up),
    ];
}

impl RoundingRule {
    /// 자정 기준 분을 `increment` 분 단위로 맞춘다. 0이면 그대로 둔다.
    pub fn apply(self, minutes: f64, increment: u32) -> f64 {
        if increment == 0 {
            return minutes;
        }
        let inc = f64::from(increment);
        let steps = minutes / inc;
        let steps = match self {
            RoundingRule::Nearest => steps.round(),
            RoundingRule::Down => steps.floor(),
            RoundingRule::Up => steps.ceil(),
        };
        steps * inc
    }
}

/// 근무 시간 계산 입력.
#[derive(Debug, Clone)]
pub struct TimesheetInput {
    pub clock_in: NaiveTime,
    /// 출근보다 이르면 다음 날 퇴근으로 본다.
    pub clock_out: NaiveTime,
    /// 무급 휴게 시간(min)
    pub break_minutes: f64,
    /// 반올림 단위(min)
    pub increment_min: u32,
    pub rule: RoundingRule,
    pub hourly_rate: Option<f64>,
}

/// 근무 시간 계산 결과.
#[derive(Debug, Clone, Serialize)]
pub struct TimesheetResult {
    pub rounded_clock_in: String,
    pub rounded_clock_out: String,
    pub overnight: bool,
    /// 반올림 전 근무 시간(h, 휴게 제외)
    pub raw_hours: f64,
    /// 반올림 후 근무 시간(h, 휴게 제외)
    pub worked_hours: f64,
    pub worked_time: String,
    pub gross_pay: Option<f64>,
}

fn minutes_of_day(t: NaiveTime) -> f64 {
    f64::from(t.num_seconds_from_midnight()) / 60.0
}

fn format_clock(minutes: f64) -> String {
    let m = (minutes.round() as i64).rem_euclid(MINUTES_PER_DAY as i64);
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// (반올림된 출근, 반올림된 퇴근, 자정 넘김 여부). 퇴근은 필요하면 하루를 더한 값이다.
fn rounded_span(input_in: NaiveTime, input_out: NaiveTime, increment: u32, rule: RoundingRule) -> (f64, f64, bool) {
    let overnight = input_out < input_in;
    let start = rule.apply(minutes_of_day(input_in), increment);
    let mut end_raw = minutes_of_day(input_out);
    if overnight {
        end_raw += MINUTES_PER_DAY;
    }
    let end = rule.apply(end_raw, increment);
    (start, end.max(start), overnight)
}

fn raw_span_minutes(clock_in: NaiveTime, clock_out: NaiveTime) -> f64 {
    let span = minutes_of_day(clock_out) - minutes_of_day(clock_in);
    if span < 0.0 {
        span + MINUTES_PER_DAY
    } else {
        span
    }
}

/// 출퇴근 기록을 반올림하고 근무 시간과 급여를 구한다.
pub fn compute_timesheet(input: &TimesheetInput) -> TimesheetResult {
    let (start, end, overnight) =
        rounded_span(input.clock_in, input.clock_out, input.increment_min, input.rule);
    let raw_hours =
        (raw_span_minutes(input.clock_in, input.clock_out) - input.break_minutes).max(0.0) / 60.0;
    let worked_hours = (end - start - input.break_minutes).max(0.0) / 60.0;
    TimesheetResult {
        rounded_clock_in: format_clock(start),
        rounded_clock_out: format_clock(end),
        overnight,
        raw_hours,
        worked_hours,
        worked_time: format_hours(worked_hours),
        gross_pay: input.hourly_rate.map(|rate| rate * worked_hours),
    }
}

pub struct Timesheet;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("clock_in", Label::new("출근 시각", "Clock in"), FieldKind::Time).unit("HH:MM"),
    FieldSpec::new("clock_out", Label::new("퇴근 시각", "Clock out"), FieldKind::Time).unit("HH:MM"),
    FieldSpec::number("break_minutes", Label::new("휴게 시간", "Unpaid break"))
        .default("0")
        .unit("min"),
    FieldSpec::integer("increment", Label::new("반올림 단위", "Rounding increment"))
        .default("15")
        .unit("min"),
    FieldSpec::choice("rounding", Label::new("반올림 규칙", "Rounding rule"), choice_names::<RoundingRule>)
        .default("nearest"),
    FieldSpec::number("hourly_rate", Label::new("시급(선택)", "Hourly rate (optional)")).optional(),
];

impl Calculator for Timesheet {
    const ID: &'static str = "timesheet";
    const TITLE: Label = Label::new("근무 시간", "Timesheet");

    type Input = TimesheetInput;
    type Output = TimesheetResult;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(form: &FormValues) -> Result<Self::Input, ValidationErrors> {
        let mut v = Validator::new(form);
        let clock_in = v.time("clock_in");
        let clock_out = v.time("clock_out");
        let break_minutes = v.number("break_minutes", &[Rule::NonNegative]);
        let increment_min = v.integer("increment", 0, 60) as u32;
        let rule = v.choice::<RoundingRule>("rounding");
        let hourly_rate = v.optional_number("hourly_rate", &[Rule::NonNegative]);

        let punches_ok = !["clock_in", "clock_out", "increment", "rounding"]
            .iter()
            .any(|f| v.has_error(f));
        if punches_ok {
            let (start, end, _) = rounded_span(clock_in, clock_out, increment_min, rule);
            v.ensure(
                break_minutes <= end - start,
                "break_minutes",
                keys::RULE_BREAK_EXCEEDS_SHIFT,
            );
        }
        v.finish(TimesheetInput {
            clock_in,
            clock_out,
            break_minutes,
            increment_min,
            rule,
            hourly_rate,
        })
    }

    fn compute(input: &Self::Input) -> Self::Output {
        compute_timesheet(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_rounds_half_up() {
        assert_eq!(RoundingRule::Nearest.apply(487.5, 15), 495.0);
        assert_eq!(RoundingRule::Nearest.apply(487.0, 15), 480.0);
        assert_eq!(RoundingRule::Down.apply(494.0, 15), 480.0);
        assert_eq!(RoundingRule::Up.apply(481.0, 15), 495.0);
        assert_eq!(RoundingRule::Up.apply(481.0, 0), 481.0);
    }

    #[test]
    fn clock_format_wraps_midnight() {
        assert_eq!(format_clock(1440.0), "00:00");
        assert_eq!(format_clock(1530.0), "01:30");
    }
}
