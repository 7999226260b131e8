use approx::assert_relative_eq;
use formula_toolbox::calculator::Calculator;
use formula_toolbox::i18n::keys;
use formula_toolbox::schedule::timesheet::Timesheet;
use formula_toolbox::travel::driving_time::DrivingTime;
use formula_toolbox::travel::fuel_cost::FuelCost;
use formula_toolbox::travel::travel_time::TravelTime;
use formula_toolbox::validation::{FieldErrorKind, FormValues};

#[test]
fn five_hour_drive_with_two_hour_interval_has_two_breaks() {
    let form = FormValues::new()
        .with("distance", "500")
        .with("speed", "100")
        .with("break_interval", "2")
        .with("break_minutes", "15");
    let out = DrivingTime::evaluate(&form).unwrap();
    assert_relative_eq!(out.plan.driving_hours, 5.0);
    assert_eq!(out.plan.breaks, 2);
    assert_relative_eq!(out.plan.total_hours, 5.5);
    assert_eq!(out.driving_time, "5h 00m");
    assert_eq!(out.total_time, "5h 30m");
}

#[test]
fn zero_interval_disables_breaks() {
    let form = FormValues::new()
        .with("distance", "900")
        .with("speed", "100")
        .with("break_interval", "0");
    let out = DrivingTime::evaluate(&form).unwrap();
    assert_eq!(out.plan.breaks, 0);
    assert_relative_eq!(out.plan.total_hours, 9.0);
}

#[test]
fn arrival_includes_breaks_and_time_zone() {
    let form = FormValues::new()
        .with("departure", "2026-03-01 08:00")
        .with("distance", "500")
        .with("speed", "100")
        .with("timezone_shift", "-1");
    let out = TravelTime::evaluate(&form).unwrap();
    assert_eq!(out.plan.breaks, 2);
    assert_eq!(out.arrival.as_deref(), Some("2026-03-01 12:30"));
    assert_eq!(out.days_later, Some(0));
}

#[test]
fn overnight_arrival_rolls_the_date() {
    let form = FormValues::new()
        .with("departure", "2026-12-31T22:00")
        .with("distance", "300")
        .with("speed", "100");
    let out = TravelTime::evaluate(&form).unwrap();
    assert_eq!(out.plan.breaks, 1);
    assert_eq!(out.arrival.as_deref(), Some("2027-01-01 01:15"));
    assert_eq!(out.days_later, Some(1));
}

#[test]
fn bad_departure_is_a_field_error() {
    let form = FormValues::new()
        .with("departure", "tomorrow")
        .with("distance", "-3")
        .with("speed", "100");
    let errs = TravelTime::evaluate(&form).unwrap_err();
    assert_eq!(errs.fields(), vec!["departure", "distance"]);
}

#[test]
fn metric_fuel_cost_round_trip_split() {
    let form = FormValues::new()
        .with("distance", "100")
        .with("efficiency", "8")
        .with("price", "2")
        .with("round_trip", "yes")
        .with("passengers", "2");
    let out = FuelCost::evaluate(&form).unwrap();
    assert_relative_eq!(out.trip_distance, 200.0);
    assert_relative_eq!(out.fuel_litres, 16.0);
    assert_relative_eq!(out.total_cost, 32.0);
    assert_relative_eq!(out.cost_per_passenger, 16.0);
    assert_relative_eq!(out.cost_per_distance, 0.16);
}

#[test]
fn us_mpg_and_gallon_price() {
    let form = FormValues::new()
        .with("distance", "300")
        .with("distance_unit", "mi")
        .with("efficiency", "30")
        .with("efficiency_unit", "mpg-us")
        .with("price", "3.5")
        .with("price_unit", "per-us-gal");
    let out = FuelCost::evaluate(&form).unwrap();
    assert_relative_eq!(out.total_cost, 35.0, epsilon = 1e-9);
    assert_relative_eq!(out.fuel_litres, 10.0 * 3.785_411_784, epsilon = 1e-9);
}

#[test]
fn fuel_cost_needs_at_least_one_passenger() {
    let form = FormValues::new()
        .with("distance", "10")
        .with("efficiency", "5")
        .with("price", "1")
        .with("passengers", "0");
    assert!(FuelCost::evaluate(&form).unwrap_err().has("passengers"));
}

#[test]
fn timesheet_rounds_each_punch_to_nearest() {
    let form = FormValues::new()
        .with("clock_in", "08:07")
        .with("clock_out", "17:02")
        .with("break_minutes", "30")
        .with("hourly_rate", "20");
    let out = Timesheet::evaluate(&form).unwrap();
    assert_eq!(out.rounded_clock_in, "08:00");
    assert_eq!(out.rounded_clock_out, "17:00");
    assert_relative_eq!(out.worked_hours, 8.5);
    assert_relative_eq!(out.raw_hours, (535.0 - 30.0) / 60.0);
    assert_relative_eq!(out.gross_pay.unwrap(), 170.0);
    assert_eq!(out.worked_time, "8h 30m");
}

#[test]
fn timesheet_round_down_and_up() {
    let down = Timesheet::evaluate(
        &FormValues::new()
            .with("clock_in", "08:14")
            .with("clock_out", "16:59")
            .with("rounding", "down"),
    )
    .unwrap();
    assert_eq!(down.rounded_clock_in, "08:00");
    assert_eq!(down.rounded_clock_out, "16:45");

    let up = Timesheet::evaluate(
        &FormValues::new()
            .with("clock_in", "08:01")
            .with("clock_out", "16:01")
            .with("rounding", "up"),
    )
    .unwrap();
    assert_eq!(up.rounded_clock_in, "08:15");
    assert_eq!(up.rounded_clock_out, "16:15");
    assert!(up.gross_pay.is_none());
}

#[test]
fn overnight_shift() {
    let form = FormValues::new()
        .with("clock_in", "22:00")
        .with("clock_out", "06:00");
    let out = Timesheet::evaluate(&form).unwrap();
    assert!(out.overnight);
    assert_relative_eq!(out.worked_hours, 8.0);
    assert_eq!(out.rounded_clock_out, "06:00");
}

#[test]
fn break_longer_than_shift_is_rejected() {
    let form = FormValues::new()
        .with("clock_in", "09:00")
        .with("clock_out", "10:00")
        .with("break_minutes", "90");
    let errs = Timesheet::evaluate(&form).unwrap_err();
    assert_eq!(
        errs.for_field("break_minutes").unwrap().kind,
        FieldErrorKind::Rule {
            key: keys::RULE_BREAK_EXCEEDS_SHIFT
        }
    );
}
