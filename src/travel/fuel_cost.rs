use serde::{Deserialize, Serialize};

use crate::calculator::{Calculator, FieldSpec};
use crate::i18n::Label;
use crate::units::linear;
use crate::units::volume::{IMPERIAL_GALLON_M3, US_GALLON_M3};
use crate::units::LengthUnit;
use crate::validation::{choice_names, Choice, FormValues, Rule, ValidationErrors, Validator};

/// 거리 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceUnit {
    Km,
    Mi,
}

impl Choice for DistanceUnit {
    const CHOICES: &'static [(&'static str, Self)] =
        &[("km", DistanceUnit::Km), ("mi", DistanceUnit::Mi)];
}

impl DistanceUnit {
    fn km_per_unit(self) -> f64 {
        match self {
            DistanceUnit::Km => 1.0,
            DistanceUnit::Mi => linear::to_base(1.0, LengthUnit::Mile) / 1000.0,
        }
    }
}

/// 연비 표기 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EfficiencyUnit {
    /// L/100km
    LitresPer100Km,
    /// km/L
    KmPerLitre,
    /// 미국 갤런 기준 mpg
    MpgUs,
    /// 영국 갤런 기준 mpg
    MpgUk,
}

impl Choice for EfficiencyUnit {
    const CHOICES: &'static [(&'static str, Self)] = &[
        ("l-per-100km", EfficiencyUnit::LitresPer100Km),
        ("km-per-l", EfficiencyUnit::KmPerLitre),
        ("mpg-us", EfficiencyUnit::MpgUs),
        ("mpg-uk", EfficiencyUnit::MpgUk),
    ];
}

/// 연료 가격의 기준 부피.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceUnit {
    PerLitre,
    PerUsGallon,
    PerUkGallon,
}

impl Choice for PriceUnit {
    const CHOICES: &'static [(&'static str, Self)] = &[
        ("per-litre", PriceUnit::PerLitre),
        ("per-us-gal", PriceUnit::PerUsGallon),
        ("per-uk-gal", PriceUnit::PerUkGallon),
    ];
}

fn us_gallon_l() -> f64 {
    US_GALLON_M3 * 1000.0
}

fn uk_gallon_l() -> f64 {
    IMPERIAL_GALLON_M3 * 1000.0
}

/// 연료비 계산 입력.
#[derive(Debug, Clone)]
pub struct FuelCostInput {
    /// 편도 거리
    pub distance: f64,
    pub distance_unit: DistanceUnit,
    pub efficiency: f64,
    pub efficiency_unit: EfficiencyUnit,
    pub price: f64,
    pub price_unit: PriceUnit,
    pub round_trip: bool,
    /// 1 이상
    pub passengers: u32,
}

/// 연료비 계산 결과.
#[derive(Debug, Clone, Serialize)]
pub struct FuelCostResult {
    /// 왕복이면 두 배가 된 총 주행 거리(입력 단위)
    pub trip_distance: f64,
    pub trip_distance_km: f64,
    pub fuel_litres: f64,
    pub total_cost: f64,
    pub cost_per_passenger: f64,
    /// 입력 거리 단위 1당 비용
    pub cost_per_distance: f64,
}

/// 주행 거리(km)에 필요한 연료량(L).
fn litres_needed(km: f64, efficiency: f64, unit: EfficiencyUnit) -> f64 {
    let km_per_mile = DistanceUnit::Mi.km_per_unit();
    match unit {
        EfficiencyUnit::LitresPer100Km => km * efficiency / 100.0,
        EfficiencyUnit::KmPerLitre => km / efficiency,
        EfficiencyUnit::MpgUs => km / km_per_mile / efficiency * us_gallon_l(),
        EfficiencyUnit::MpgUk => km / km_per_mile / efficiency * uk_gallon_l(),
    }
}

fn price_per_litre(price: f64, unit: PriceUnit) -> f64 {
    match unit {
        PriceUnit::PerLitre => price,
        PriceUnit::PerUsGallon => price / us_gallon_l(),
        PriceUnit::PerUkGallon => price / uk_gallon_l(),
    }
}

/// 연료비를 계산한다.
pub fn compute_fuel_cost(input: &FuelCostInput) -> FuelCostResult {
    let legs = if input.round_trip { 2.0 } else { 1.0 };
    let trip_distance = input.distance * legs;
    let trip_distance_km = trip_distance * input.distance_unit.km_per_unit();
    let fuel_litres = litres_needed(trip_distance_km, input.efficiency, input.efficiency_unit);
    let total_cost = fuel_litres * price_per_litre(input.price, input.price_unit);
    FuelCostResult {
        trip_distance,
        trip_distance_km,
        fuel_litres,
        total_cost,
        cost_per_passenger: total_cost / f64::from(input.passengers),
        cost_per_distance: total_cost / trip_distance,
    }
}

pub struct FuelCost;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::number("distance", Label::new("편도 거리", "Distance (one way)")),
    FieldSpec::choice("distance_unit", Label::new("거리 단위", "Distance unit"), choice_names::<DistanceUnit>)
        .default("km"),
    FieldSpec::number("efficiency", Label::new("연비", "Fuel efficiency")),
    FieldSpec::choice("efficiency_unit", Label::new("연비 단위", "Efficiency unit"), choice_names::<EfficiencyUnit>)
        .default("l-per-100km"),
    FieldSpec::number("price", Label::new("연료 가격", "Fuel price")),
    FieldSpec::choice("price_unit", Label::new("가격 기준", "Price per"), choice_names::<PriceUnit>)
        .default("per-litre"),
    FieldSpec::flag("round_trip", Label::new("왕복", "Round trip")).default("no"),
    FieldSpec::integer("passengers", Label::new("인원", "Passengers")).default("1"),
];

impl Calculator for FuelCost {
    const ID: &'static str = "fuel-cost";
    const TITLE: Label = Label::new("연료비", "Fuel cost");

    type Input = FuelCostInput;
    type Output = FuelCostResult;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(form: &FormValues) -> Result<Self::Input, ValidationErrors> {
        let mut v = Validator::new(form);
        let input = FuelCostInput {
            distance: v.number("distance", &[Rule::Positive]),
            distance_unit: v.choice("distance_unit"),
            efficiency: v.number("efficiency", &[Rule::Positive]),
            efficiency_unit: v.choice("efficiency_unit"),
            price: v.number("price", &[Rule::NonNegative]),
            price_unit: v.choice("price_unit"),
            round_trip: v.flag("round_trip", false),
            passengers: v.integer("passengers", 1, 100) as u32,
        };
        v.finish(input)
    }

    fn compute(input: &Self::Input) -> Self::Output {
        compute_fuel_cost(input)
    }
}
