use approx::assert_relative_eq;
use formula_toolbox::calculator::Calculator;
use formula_toolbox::finance::investment_growth::InvestmentGrowth;
use formula_toolbox::validation::FormValues;

#[test]
fn annual_compounding_two_years() {
    let form = FormValues::new()
        .with("principal", "1000")
        .with("annual_rate", "10")
        .with("years", "2")
        .with("compounding", "annual");
    let out = InvestmentGrowth::evaluate(&form).unwrap();
    assert_relative_eq!(out.future_value, 1210.0, epsilon = 1e-9);
    assert_relative_eq!(out.total_contributed, 1000.0);
    assert_relative_eq!(out.interest_earned, 210.0, epsilon = 1e-9);
    let balances: Vec<f64> = out.yearly.iter().map(|r| r.balance).collect();
    assert_relative_eq!(balances[0], 1100.0, epsilon = 1e-9);
    assert_relative_eq!(balances[1], 1210.0, epsilon = 1e-9);
    assert_eq!(out.balance_series.points.len(), 2);
}

#[test]
fn contributions_without_interest() {
    let form = FormValues::new()
        .with("principal", "0")
        .with("monthly_contribution", "100")
        .with("annual_rate", "0")
        .with("years", "1");
    let out = InvestmentGrowth::evaluate(&form).unwrap();
    assert_relative_eq!(out.future_value, 1200.0, epsilon = 1e-9);
    assert_relative_eq!(out.total_contributed, 1200.0, epsilon = 1e-9);
    assert_relative_eq!(out.interest_earned, 0.0, epsilon = 1e-9);
}

#[test]
fn more_frequent_compounding_grows_faster() {
    let base = FormValues::new()
        .with("principal", "1000")
        .with("annual_rate", "6")
        .with("years", "10");
    let annual = InvestmentGrowth::evaluate(&base.clone().with("compounding", "annual")).unwrap();
    let daily = InvestmentGrowth::evaluate(&base.with("compounding", "daily")).unwrap();
    assert!(daily.future_value > annual.future_value);
    assert_relative_eq!(annual.future_value, 1000.0 * 1.06_f64.powi(10), epsilon = 1e-6);
}

#[test]
fn years_out_of_range() {
    let form = FormValues::new()
        .with("principal", "1000")
        .with("annual_rate", "5")
        .with("years", "0")
        .with("compounding", "weekly");
    let errs = InvestmentGrowth::evaluate(&form).unwrap_err();
    assert_eq!(errs.fields(), vec!["years", "compounding"]);
}
