//! 이동 관련 계산 모듈. 연료비, 운전 시간, 도착 시각을 다룬다.
//!
//! 운전 시간과 이동 시간 계산기는 같은 휴식 규칙([`plan_trip`])을 공유한다.

pub mod driving_time;
pub mod fuel_cost;
pub mod travel_time;

use serde::Serialize;

use crate::calculator::FieldSpec;
use crate::i18n::Label;

/// 부동소수 오차로 경계값에서 휴식이 빠지지 않도록 더하는 여유.
const BREAK_EPSILON: f64 = 1e-9;

/// 휴식 규칙.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakPolicy {
    /// 휴식 간격(h). 0이면 휴식 없음.
    pub interval_h: f64,
    /// 휴식 한 번의 길이(min)
    pub break_min: f64,
}

/// 휴식을 포함한 이동 계획.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TripPlan {
    pub driving_hours: f64,
    pub breaks: u32,
    pub break_hours: f64,
    pub total_hours: f64,
}

/// 운전 시간을 휴식 간격으로 나눈 몫(내림)을 휴식 횟수로 한다.
/// 간격을 다 채우지 못한 구간은 휴식을 주지 않는다.
pub fn count_breaks(driving_h: f64, interval_h: f64) -> u32 {
    if interval_h <= 0.0 {
        return 0;
    }
    (driving_h / interval_h + BREAK_EPSILON).floor() as u32
}

/// 거리와 평균 속도(같은 길이 단위)로 이동 계획을 세운다.
pub fn plan_trip(distance: f64, speed: f64, policy: BreakPolicy) -> TripPlan {
    let driving_hours = distance / speed;
    let breaks = count_breaks(driving_hours, policy.interval_h);
    let break_hours = f64::from(breaks) * policy.break_min / 60.0;
    TripPlan {
        driving_hours,
        breaks,
        break_hours,
        total_hours: driving_hours + break_hours,
    }
}

pub(crate) const DISTANCE_FIELD: FieldSpec =
    FieldSpec::number("distance", Label::new("거리", "Distance")).unit("km | mi");
pub(crate) const SPEED_FIELD: FieldSpec =
    FieldSpec::number("speed", Label::new("평균 속도", "Average speed")).unit("km/h | mph");
pub(crate) const BREAK_INTERVAL_FIELD: FieldSpec =
    FieldSpec::number("break_interval", Label::new("휴식 간격", "Break every"))
        .default("2")
        .unit("h");
pub(crate) const BREAK_LENGTH_FIELD: FieldSpec =
    FieldSpec::number("break_minutes", Label::new("휴식 시간", "Break length"))
        .default("15")
        .unit("min");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_intervals_earn_no_break() {
        assert_eq!(count_breaks(5.0, 2.0), 2);
        assert_eq!(count_breaks(1.99, 2.0), 0);
        assert_eq!(count_breaks(6.0, 2.0), 3);
        assert_eq!(count_breaks(0.6 * 10.0, 0.6), 10);
    }

    #[test]
    fn zero_interval_means_no_breaks() {
        assert_eq!(count_breaks(12.0, 0.0), 0);
    }

    #[test]
    fn plan_adds_break_time() {
        let plan = plan_trip(
            450.0,
            90.0,
            BreakPolicy {
                interval_h: 2.0,
                break_min: 15.0,
            },
        );
        assert_eq!(plan.breaks, 2);
        assert!((plan.total_hours - 5.5).abs() < 1e-12);
    }
}
