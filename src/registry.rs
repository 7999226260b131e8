//! 등록된 계산기 목록.

use crate::calculator::DynCalculator;
use crate::conversion::UnitConverter;
use crate::credit_risk::collateral_haircut::CollateralHaircut;
use crate::credit_risk::ead_simulation::EadSimulation;
use crate::credit_risk::expected_loss::ExpectedLoss;
use crate::finance::investment_growth::InvestmentGrowth;
use crate::health::hsa::HsaTaxBenefit;
use crate::health::insurance_affordability::InsuranceAffordability;
use crate::health::long_term_care::LongTermCare;
use crate::health::out_of_pocket::HealthCost;
use crate::ratio::growth::PercentageGrowth;
use crate::ratio::slope::Slope;
use crate::ratio::time_percentage::TimePercentage;
use crate::schedule::timesheet::Timesheet;
use crate::travel::driving_time::DrivingTime;
use crate::travel::fuel_cost::FuelCost;
use crate::travel::travel_time::TravelTime;

static CALCULATORS: &[&dyn DynCalculator] = &[
    &TimePercentage,
    &Slope,
    &PercentageGrowth,
    &UnitConverter,
    &FuelCost,
    &DrivingTime,
    &TravelTime,
    &Timesheet,
    &InvestmentGrowth,
    &InsuranceAffordability,
    &HsaTaxBenefit,
    &HealthCost,
    &LongTermCare,
    &EadSimulation,
    &CollateralHaircut,
    &ExpectedLoss,
];

/// 메뉴 순서대로 모든 계산기.
pub fn all() -> &'static [&'static dyn DynCalculator] {
    CALCULATORS
}

/// id로 계산기를 찾는다.
pub fn find(id: &str) -> Option<&'static dyn DynCalculator> {
    CALCULATORS.iter().copied().find(|c| c.id() == id.trim())
}
