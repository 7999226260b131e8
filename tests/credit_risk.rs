use approx::assert_relative_eq;
use formula_toolbox::calculator::{Calculator, DynCalculator};
use formula_toolbox::credit_risk::collateral_haircut::CollateralHaircut;
use formula_toolbox::credit_risk::ead_simulation::{
    analytical_exposure, simulate_ead, EadSimulation, EadSimulationInput, MAX_PRICE, MAX_QUANTITY,
};
use formula_toolbox::credit_risk::expected_loss::ExpectedLoss;
use formula_toolbox::validation::{FieldErrorKind, FormValues};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn at_the_money(simulations: u32) -> EadSimulationInput {
    EadSimulationInput {
        spot: 100.0,
        strike: 100.0,
        volatility_pct: 20.0,
        drift_pct: 5.0,
        horizon_years: 1.0,
        quantity: 1.0,
        simulations,
        confidence_pct: 95.0,
        bins: 20,
        seed: Some(42),
    }
}

#[test]
fn simulated_mean_converges_to_closed_form() {
    let input = at_the_money(100_000);
    let mut rng = StdRng::seed_from_u64(42);
    let out = simulate_ead(&input, &mut rng);
    assert_relative_eq!(out.analytical_ead, 10.99, epsilon = 0.01);
    assert!(
        (out.ead - out.analytical_ead).abs() < 0.3,
        "ead={} analytical={}",
        out.ead,
        out.analytical_ead
    );
    assert!(out.standard_error < 0.1);
    assert!(out.in_the_money_probability > 0.5 && out.in_the_money_probability < 0.62);
}

#[test]
fn same_seed_same_result() {
    let form = FormValues::new()
        .with("spot", "100")
        .with("strike", "100")
        .with("simulations", "2000")
        .with("seed", "7");
    let a = EadSimulation::evaluate(&form).unwrap();
    let b = EadSimulation::evaluate(&form).unwrap();
    assert_eq!(a.ead, b.ead);
    assert_eq!(a.pfe, b.pfe);
    assert_eq!(a.seed, Some(7));
}

#[test]
fn histogram_accounts_for_every_path() {
    let input = at_the_money(5000);
    let out = simulate_ead(&input, &mut StdRng::seed_from_u64(1));
    let total: u32 = out.histogram.iter().map(|b| b.count).sum();
    assert_eq!(total, 5000);
    assert_eq!(out.histogram.len(), 20);
    assert!(out.pfe >= out.ead);
    assert!(out.max_exposure >= out.pfe);
    assert_relative_eq!(out.histogram.last().unwrap().upper, out.max_exposure, epsilon = 1e-9);
}

#[test]
fn zero_strike_exposure_is_the_forward() {
    let input = EadSimulationInput {
        strike: 0.0,
        quantity: 2.0,
        ..at_the_money(1)
    };
    assert_relative_eq!(analytical_exposure(&input), 2.0 * 100.0 * 0.05_f64.exp(), epsilon = 1e-9);
}

#[test]
fn simulation_count_is_bounded() {
    let form = FormValues::new()
        .with("spot", "100")
        .with("strike", "90")
        .with("simulations", "1000000");
    assert!(EadSimulation::evaluate(&form).unwrap_err().has("simulations"));
}

#[test]
fn oversized_spot_is_rejected() {
    let form = FormValues::new()
        .with("spot", "1e308")
        .with("strike", "100")
        .with("drift", "50");
    let errs = EadSimulation::evaluate(&form).unwrap_err();
    assert_eq!(
        errs.for_field("spot").unwrap().kind,
        FieldErrorKind::OutOfRange {
            min: 0.0,
            max: MAX_PRICE
        }
    );
}

#[test]
fn extreme_accepted_inputs_stay_finite() {
    let form = FormValues::new()
        .with("spot", MAX_PRICE.to_string())
        .with("strike", "1")
        .with("volatility", "500")
        .with("drift", "100")
        .with("horizon", "100")
        .with("quantity", MAX_QUANTITY.to_string())
        .with("simulations", "2000")
        .with("seed", "11");
    let out = EadSimulation::evaluate(&form).unwrap();
    for value in [out.ead, out.pfe, out.max_exposure, out.analytical_ead, out.standard_error] {
        assert!(value.is_finite(), "{out:?}");
    }
    assert!(out.histogram.iter().all(|b| b.upper.is_finite()));
    let report = EadSimulation.run(&form).unwrap();
    assert!(report.get_f64("ead").is_some());
}

fn haircut_form() -> FormValues {
    FormValues::new()
        .with("collateral_value", "1000")
        .with("exposure", "1000")
        .with("volatility", "20")
}

#[test]
fn ten_day_haircut_at_99_percent() {
    let out = CollateralHaircut::evaluate(&haircut_form()).unwrap();
    assert_relative_eq!(out.z_score, 2.326_348, epsilon = 1e-5);
    assert_relative_eq!(out.haircut_pct, 9.305, epsilon = 1e-3);
    assert_relative_eq!(out.fx_haircut_pct, 0.0);
    assert_relative_eq!(out.adjusted_collateral, 1000.0 * (1.0 - out.haircut_pct / 100.0), epsilon = 1e-9);
    assert_relative_eq!(out.uncovered_exposure, 1000.0 - out.adjusted_collateral, epsilon = 1e-9);
}

#[test]
fn currency_mismatch_adds_fx_haircut() {
    let out = CollateralHaircut::evaluate(&haircut_form().with("currency_mismatch", "yes")).unwrap();
    assert_relative_eq!(out.fx_haircut_pct, 8.0, epsilon = 1e-9);
    assert_relative_eq!(out.haircut_pct, 17.305, epsilon = 1e-3);
}

#[test]
fn haircut_never_exceeds_full_value() {
    let form = haircut_form().with("volatility", "300").with("holding_days", "250");
    let out = CollateralHaircut::evaluate(&form).unwrap();
    assert_relative_eq!(out.haircut_pct, 100.0);
    assert_relative_eq!(out.adjusted_collateral, 0.0);
    assert_relative_eq!(out.uncovered_exposure, 1000.0);
}

#[test]
fn expected_loss_with_collateral() {
    let form = FormValues::new()
        .with("ead", "1000000")
        .with("pd", "2")
        .with("collateral_value", "600000")
        .with("haircut", "20")
        .with("recovery", "40");
    let out = ExpectedLoss::evaluate(&form).unwrap();
    assert_relative_eq!(out.secured_exposure, 480_000.0, epsilon = 1e-6);
    assert_relative_eq!(out.unsecured_exposure, 520_000.0, epsilon = 1e-6);
    assert_relative_eq!(out.lgd_pct, 31.2, epsilon = 1e-9);
    assert_relative_eq!(out.expected_loss, 6240.0, epsilon = 1e-6);
    assert_relative_eq!(out.expected_loss_rate_pct, 0.624, epsilon = 1e-9);
}

#[test]
fn fully_collateralised_loan_has_no_loss() {
    let form = FormValues::new()
        .with("ead", "1000")
        .with("pd", "5")
        .with("collateral_value", "5000")
        .with("haircut", "10");
    let out = ExpectedLoss::evaluate(&form).unwrap();
    assert_relative_eq!(out.unsecured_exposure, 0.0);
    assert_relative_eq!(out.expected_loss, 0.0);
}
