use std::str::FromStr;

use approx::assert_relative_eq;
use formula_toolbox::calculator::Calculator;
use formula_toolbox::health::hsa::HsaTaxBenefit;
use formula_toolbox::health::insurance_affordability::InsuranceAffordability;
use formula_toolbox::health::long_term_care::LongTermCare;
use formula_toolbox::health::out_of_pocket::HealthCost;
use formula_toolbox::i18n::keys;
use formula_toolbox::validation::{FieldErrorKind, FormValues};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn bill(total: &str) -> FormValues {
    FormValues::new()
        .with("total_bill", total)
        .with("deductible", "1000")
        .with("coinsurance", "20")
        .with("oop_max", "3000")
}

#[test]
fn deductible_then_coinsurance() {
    let out = HealthCost::evaluate(&bill("5000")).unwrap();
    assert_eq!(out.deductible_paid, dec!(1000));
    assert_eq!(out.coinsurance_paid, dec!(800));
    assert_eq!(out.patient_total, dec!(1800));
    assert_eq!(out.insurer_total, dec!(3200));
    assert!(!out.oop_cap_reached);
    assert_eq!(out.oop_remaining, dec!(1200));
}

#[test]
fn out_of_pocket_cap_limits_patient_share() {
    let out = HealthCost::evaluate(&bill("20000")).unwrap();
    assert!(out.oop_cap_reached);
    assert_eq!(out.patient_total, dec!(3000));
    assert_eq!(out.insurer_total, dec!(17000));
    assert_eq!(out.deductible_paid, dec!(1000));
    assert_eq!(out.coinsurance_paid, dec!(2000));
    assert_eq!(out.oop_remaining, dec!(0));
}

#[test]
fn patient_share_never_exceeds_cap() {
    for total in ["0", "10", "999", "1000", "1001", "7500", "11000", "1000000"] {
        for spent in ["0", "500", "2999"] {
            let form = bill(total).with("oop_spent", spent);
            let out = HealthCost::evaluate(&form).unwrap();
            let cap = dec!(3000) - Decimal::from_str(spent).unwrap();
            assert!(out.patient_total <= cap, "total={total} spent={spent}");
            assert_eq!(out.patient_total + out.insurer_total, Decimal::from_str(total).unwrap());
            assert!(out.insurer_total >= Decimal::ZERO);
        }
    }
}

#[test]
fn shares_add_up_to_the_bill_to_the_cent() {
    let rates = ["0", "7.5", "11.05", "20", "33.333", "66.67", "99.99", "100"];
    for i in 0..400u32 {
        let total = format!("{}.{:02}", i * 37 + 5, (i * 13) % 100);
        let rate = rates[i as usize % rates.len()];
        let form = FormValues::new()
            .with("total_bill", total.as_str())
            .with("deductible", "123.45")
            .with("coinsurance", rate)
            .with("oop_max", "1000000");
        let out = HealthCost::evaluate(&form).unwrap();
        assert_eq!(
            out.patient_total + out.insurer_total,
            Decimal::from_str(&total).unwrap(),
            "total={total} rate={rate}"
        );
        assert_eq!(out.deductible_paid + out.coinsurance_paid, out.patient_total);
        assert!(out.coinsurance_paid.scale() <= 2, "total={total} rate={rate}");
    }
}

#[test]
fn coinsurance_rounds_to_cents() {
    let form = FormValues::new()
        .with("total_bill", "7576.39")
        .with("deductible", "123.45")
        .with("coinsurance", "11.05")
        .with("oop_max", "100000");
    let out = HealthCost::evaluate(&form).unwrap();
    // 7452.94 * 11.05% = 823.549870
    assert_eq!(out.coinsurance_paid, dec!(823.55));
    assert_eq!(out.patient_total, dec!(947.00));
    assert_eq!(out.insurer_total, dec!(6629.39));
}

#[test]
fn partially_met_deductible() {
    let form = bill("600").with("deductible_met", "800");
    let out = HealthCost::evaluate(&form).unwrap();
    assert_eq!(out.deductible_paid, dec!(200));
    assert_eq!(out.coinsurance_paid, dec!(80));
}

#[test]
fn inconsistent_plan_values_are_rejected() {
    let form = bill("100").with("deductible_met", "1500").with("oop_max", "500");
    let errs = HealthCost::evaluate(&form).unwrap_err();
    assert_eq!(
        errs.for_field("deductible_met").unwrap().kind,
        FieldErrorKind::Rule {
            key: keys::RULE_DEDUCTIBLE_MET
        }
    );
    assert_eq!(
        errs.for_field("oop_max").unwrap().kind,
        FieldErrorKind::Rule {
            key: keys::RULE_OOP_BELOW_DEDUCTIBLE
        }
    );
}

fn hsa_form() -> FormValues {
    FormValues::new()
        .with("hdhp", "yes")
        .with("age", "40")
        .with("employee_contribution", "5000")
        .with("employer_contribution", "500")
}

#[test]
fn hsa_caps_contribution_at_limit() {
    let out = HsaTaxBenefit::evaluate(&hsa_form()).unwrap();
    assert_relative_eq!(out.annual_limit, 4300.0);
    assert_relative_eq!(out.eligible_contribution, 3800.0);
    assert_relative_eq!(out.excess_contribution, 1200.0);
    assert_relative_eq!(out.federal_savings, 836.0, epsilon = 1e-9);
    assert_relative_eq!(out.fica_savings, 290.7, epsilon = 1e-9);
    assert_relative_eq!(out.state_savings, 0.0);
    assert_relative_eq!(out.total_savings, 1126.7, epsilon = 1e-9);
    assert_relative_eq!(out.effective_cost, 5000.0 - 1126.7, epsilon = 1e-9);
}

#[test]
fn hsa_family_catch_up_limit() {
    let form = hsa_form().with("coverage", "family").with("age", "55").with("payroll", "no");
    let out = HsaTaxBenefit::evaluate(&form).unwrap();
    assert_relative_eq!(out.annual_limit, 9550.0);
    assert_relative_eq!(out.excess_contribution, 0.0);
    assert_relative_eq!(out.fica_savings, 0.0);
}

#[test]
fn hsa_requires_hdhp_enrolment() {
    let errs = HsaTaxBenefit::evaluate(&hsa_form().with("hdhp", "no")).unwrap_err();
    assert_eq!(
        errs.for_field("hdhp").unwrap().kind,
        FieldErrorKind::Rule {
            key: keys::RULE_HDHP_REQUIRED
        }
    );

    let mut form = hsa_form();
    form.remove("hdhp");
    let errs = HsaTaxBenefit::evaluate(&form).unwrap_err();
    assert_eq!(errs.for_field("hdhp").unwrap().kind, FieldErrorKind::Missing);
}

#[test]
fn premium_share_against_threshold() {
    let form = FormValues::new()
        .with("annual_income", "50000")
        .with("monthly_premium", "300")
        .with("annual_oop_max", "2000");
    let out = InsuranceAffordability::evaluate(&form).unwrap();
    assert_relative_eq!(out.annual_premium, 3600.0);
    assert_relative_eq!(out.premium_share_pct, 7.2, epsilon = 1e-9);
    assert!(out.affordable);
    assert_relative_eq!(out.max_affordable_monthly_premium, 375.833_333, epsilon = 1e-5);
    assert_relative_eq!(out.worst_case_annual_cost, 5600.0);
    assert_relative_eq!(out.worst_case_share_pct, 11.2, epsilon = 1e-9);

    let pricey = form.with("monthly_premium", "400");
    assert!(!InsuranceAffordability::evaluate(&pricey).unwrap().affordable);
}

#[test]
fn zero_income_is_rejected() {
    let form = FormValues::new()
        .with("annual_income", "0")
        .with("monthly_premium", "300");
    let errs = InsuranceAffordability::evaluate(&form).unwrap_err();
    assert_eq!(errs.for_field("annual_income").unwrap().kind, FieldErrorKind::MustBePositive);
}

fn care_form() -> FormValues {
    FormValues::new()
        .with("current_age", "64")
        .with("care_start_age", "65")
        .with("annual_cost", "100000")
        .with("inflation", "0")
        .with("care_years", "3")
        .with("return_rate", "0")
}

#[test]
fn flat_care_cost_without_returns() {
    let out = LongTermCare::evaluate(&care_form()).unwrap();
    assert_eq!(out.years_until_care, 1);
    assert_relative_eq!(out.total_cost, 300_000.0);
    assert_relative_eq!(out.monthly_saving, 25_000.0);
    assert_eq!(out.yearly_cost.points.len(), 3);
    assert_eq!(out.yearly_cost.points[0].label, "65");
}

#[test]
fn care_cost_inflates_until_start() {
    let out = LongTermCare::evaluate(&care_form().with("inflation", "3")).unwrap();
    assert_relative_eq!(out.first_year_cost, 103_000.0, epsilon = 1e-6);
    assert_relative_eq!(
        out.total_cost,
        103_000.0 * (1.0 + 1.03 + 1.03 * 1.03),
        epsilon = 1e-6
    );
}

#[test]
fn positive_return_lowers_monthly_saving() {
    let base = LongTermCare::evaluate(&care_form()).unwrap();
    let invested = LongTermCare::evaluate(&care_form().with("return_rate", "6")).unwrap();
    assert!(invested.monthly_saving < base.monthly_saving);
}

#[test]
fn care_must_start_after_current_age() {
    let form = care_form().with("care_start_age", "64");
    let errs = LongTermCare::evaluate(&form).unwrap_err();
    assert_eq!(
        errs.for_field("care_start_age").unwrap().kind,
        FieldErrorKind::Rule {
            key: keys::RULE_CARE_START_AGE
        }
    );
}
