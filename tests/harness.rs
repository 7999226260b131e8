use formula_toolbox::app::{
    apply_config_defaults, convert_line, describe_lines, list_lines, parse_assignments, AppError,
};
use formula_toolbox::conversion::ConversionError;
use formula_toolbox::calculator::{CalculatorError, FormSession};
use formula_toolbox::config::{Config, UnitSystem};
use formula_toolbox::i18n::{Language, Translator};
use formula_toolbox::registry;
use formula_toolbox::ui_cli::{parse_menu_selection, MenuChoice};
use formula_toolbox::validation::FormValues;

#[test]
fn registry_lists_every_calculator() {
    let ids: Vec<&str> = registry::all().iter().map(|c| c.id()).collect();
    for id in [
        "time-percentage",
        "slope",
        "percentage-growth",
        "unit-converter",
        "fuel-cost",
        "driving-time",
        "travel-time",
        "timesheet",
        "investment-growth",
        "insurance-affordability",
        "hsa-tax-benefit",
        "health-cost",
        "long-term-care",
        "ead-simulation",
        "collateral-haircut",
        "expected-loss",
    ] {
        assert!(ids.contains(&id), "missing {id}");
    }
    assert_eq!(ids.len(), 16);
    assert!(registry::find(" slope ").is_some());
    assert!(registry::find("boiler-efficiency").is_none());
}

#[test]
fn empty_form_never_computes() {
    for calc in registry::all() {
        match calc.run(&FormValues::new()) {
            Err(CalculatorError::Invalid(errors)) => assert!(!errors.is_empty(), "{}", calc.id()),
            other => panic!("{} computed from an empty form: {other:?}", calc.id()),
        }
    }
}

#[test]
fn session_recomputes_on_every_change() {
    let slope = registry::find("slope").unwrap();
    let mut session = FormSession::new(slope);
    assert!(session.outcome().is_none());

    assert!(session.set("rise", "1").is_err());
    assert_eq!(session.failed_fields(), vec!["run".to_string()]);

    session.set("run", "0");
    assert_eq!(session.failed_fields(), vec!["run".to_string()]);

    let report = session.set("run", "4").as_ref().unwrap();
    assert_eq!(report.get_f64("grade_percent"), Some(25.0));
    assert!(session.failed_fields().is_empty());
}

#[test]
fn report_keeps_output_order_and_renders_text() {
    let slope = registry::find("slope").unwrap();
    let form = FormValues::new().with("rise", "1").with("run", "4");
    let report = slope.run(&form).unwrap();

    let keys: Vec<&str> = report
        .outputs
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, ["grade_percent", "angle_deg", "ratio_run_per_rise", "slope_length"]);

    let text = report.render_text(&Translator::new(Language::En), 2);
    assert!(text.contains("grade percent: 25.00"), "{text}");
    assert!(text.contains("ratio run per rise: 4.00"), "{text}");
}

#[test]
fn chart_series_render_one_point_per_line() {
    let growth = registry::find("investment-growth").unwrap();
    let form = FormValues::new()
        .with("principal", "1000")
        .with("annual_rate", "10")
        .with("years", "2")
        .with("compounding", "annual");
    let text = growth.run(&form).unwrap().render_text(&Translator::new(Language::En), 0);
    assert!(text.contains("  1: 1100\n"), "{text}");
    assert!(text.contains("  2: 1210\n"), "{text}");
}

#[test]
fn assignments_parse_field_value_pairs() {
    let form = parse_assignments(&["rise = 3".to_string(), "note=a=b".to_string()]).unwrap();
    assert_eq!(form.get("rise"), Some("3"));
    assert_eq!(form.get("note"), Some("a=b"));

    for bad in ["rise", "=3"] {
        match parse_assignments(&[bad.to_string()]) {
            Err(AppError::BadAssignment(item)) => assert_eq!(item, bad),
            other => panic!("expected BadAssignment for {bad}: {other:?}"),
        }
    }
}

#[test]
fn converter_target_follows_unit_system() {
    let converter = registry::find("unit-converter").unwrap();
    let mut cfg = Config::default();

    let mut form = FormValues::new().with("kind", "length");
    apply_config_defaults(converter, &cfg, &mut form);
    assert_eq!(form.get("to"), Some("m"));

    cfg.set_unit_system(UnitSystem::Imperial);
    let mut form = FormValues::new().with("kind", "length").with("value", "1").with("from", "m");
    apply_config_defaults(converter, &cfg, &mut form);
    assert_eq!(form.get("to"), Some("ft"));
    let report = converter.run(&form).unwrap();
    assert!((report.get_f64("result").unwrap() - 3.280_839_895).abs() < 1e-6);

    let mut explicit = FormValues::new().with("kind", "length").with("to", "km");
    apply_config_defaults(converter, &cfg, &mut explicit);
    assert_eq!(explicit.get("to"), Some("km"));
}

#[test]
fn simulation_defaults_come_from_config() {
    let ead = registry::find("ead-simulation").unwrap();
    let mut cfg = Config::default();
    cfg.simulation.runs = 500;
    cfg.simulation.seed = Some(3);
    let mut form = FormValues::new();
    apply_config_defaults(ead, &cfg, &mut form);
    assert_eq!(form.get("simulations"), Some("500"));
    assert_eq!(form.get("bins"), Some("20"));
    assert_eq!(form.get("seed"), Some("3"));
}

#[test]
fn menu_selection() {
    assert!(matches!(parse_menu_selection("0"), Some(MenuChoice::Exit)));
    assert!(matches!(parse_menu_selection(" s "), Some(MenuChoice::Settings)));
    assert!(matches!(
        parse_menu_selection("1"),
        Some(MenuChoice::Calculator(c)) if c.id() == "time-percentage"
    ));
    assert!(matches!(
        parse_menu_selection("16"),
        Some(MenuChoice::Calculator(c)) if c.id() == "expected-loss"
    ));
    assert!(parse_menu_selection("17").is_none());
    assert!(parse_menu_selection("x").is_none());
    assert!(parse_menu_selection("").is_none());
}

#[test]
fn list_shows_every_calculator_with_its_title() {
    let lines = list_lines(&Translator::new(Language::En));
    assert_eq!(lines[0], "Available calculators:");
    assert_eq!(lines.len(), registry::all().len() + 1);
    assert!(lines[1].starts_with("  time-percentage "), "{}", lines[1]);
    assert!(
        lines.iter().any(|l| l.starts_with("  slope ") && l.ends_with("Slope grade")),
        "{lines:?}"
    );
}

#[test]
fn describe_marks_required_and_default_fields() {
    let tr = Translator::new(Language::En);
    let mut cfg = Config::default();

    let slope = describe_lines(&tr, &cfg, registry::find("slope").unwrap());
    assert_eq!(slope[0], "Slope grade (slope)");
    assert_eq!(slope.len(), 3);
    assert!(slope[1].starts_with("  rise "), "{}", slope[1]);
    assert!(slope[1].ends_with("Rise  required"), "{}", slope[1]);

    cfg.simulation.runs = 2500;
    let ead = describe_lines(&tr, &cfg, registry::find("ead-simulation").unwrap());
    let line = |name: &str| {
        ead.iter()
            .find(|l| l.trim_start().starts_with(name))
            .cloned()
            .unwrap_or_default()
    };
    assert!(line("simulations").ends_with("= 2500"), "{ead:?}");
    assert!(line("volatility").contains("[%/yr]"), "{ead:?}");
    assert!(line("volatility").ends_with("= 20"), "{ead:?}");
    assert!(line("seed").ends_with("  -"), "{ead:?}");
}

#[test]
fn convert_falls_back_to_configured_unit() {
    let tr = Translator::new(Language::En);
    let mut cfg = Config::default();
    assert_eq!(
        convert_line(&tr, &cfg, "length", 1.0, "km", None).unwrap(),
        "Result: 1 km = 1000.0000 m"
    );

    cfg.set_unit_system(UnitSystem::Imperial);
    let line = convert_line(&tr, &cfg, "temperature", 100.0, "C", None).unwrap();
    assert!(line.ends_with("= 212.0000 f"), "{line}");

    assert!(matches!(
        convert_line(&tr, &cfg, "luminosity", 1.0, "x", None),
        Err(AppError::Conversion(ConversionError::UnsupportedQuantity(_)))
    ));
}

#[test]
fn cross_field_rule_reopens_the_whole_form() {
    let care = registry::find("long-term-care").unwrap();
    let form = FormValues::new()
        .with("current_age", "120")
        .with("care_start_age", "120")
        .with("annual_cost", "50000");
    let mut session = FormSession::with_values(care, form);
    assert_eq!(session.failed_fields(), vec!["care_start_age".to_string()]);
    let all: Vec<&str> = care.field_specs().iter().map(|s| s.name).collect();
    assert_eq!(session.retry_fields(), all);

    session.set("current_age", "60");
    assert!(session.retry_fields().is_empty());
    assert!(matches!(session.outcome(), Some(Ok(_))));
}

#[test]
fn plain_field_errors_reopen_only_those_fields() {
    let slope = registry::find("slope").unwrap();
    let mut session = FormSession::new(slope);
    assert!(session.retry_fields().is_empty());
    session.set("rise", "x");
    assert_eq!(session.retry_fields(), vec!["rise", "run"]);
    session.set("run", "4");
    assert_eq!(session.retry_fields(), vec!["rise"]);
}
