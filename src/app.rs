use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::calculator::{Calculator, CalculatorError, DynCalculator, FieldKind, FieldSpec, Report};
use crate::cli::{Cli, Command};
use crate::config::{self, Config, ConfigError, OutputFormat};
use crate::conversion::{self, ConversionError, UnitConverter};
use crate::credit_risk::ead_simulation::EadSimulation;
use crate::i18n::{self, fill_template, keys, Translator};
use crate::quantity::QuantityKind;
use crate::registry;
use crate::ui_cli;
use crate::validation::{Choice, FormValues, ValidationErrors};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 단위 변환 오류
    #[error("단위 변환 오류: {0}")]
    Conversion(#[from] ConversionError),
    /// 입력 검증 실패. 필드별 메시지는 이미 출력되었다.
    #[error("입력값 오류 {0}건")]
    InvalidInput(usize),
    /// 결과 직렬화 오류
    #[error("결과 출력 오류: {0}")]
    Json(#[from] serde_json::Error),
    /// 등록되지 않은 계산기 id
    #[error("알 수 없는 계산기: {0}")]
    UnknownCalculator(String),
    /// `field=value` 형식이 아닌 인자
    #[error("`field=value` 형식이 아닙니다: {0}")]
    BadAssignment(String),
    /// 입력 스트림이 닫힘
    #[error("입력이 종료되었습니다")]
    InputClosed,
}

impl From<CalculatorError> for AppError {
    fn from(value: CalculatorError) -> Self {
        match value {
            CalculatorError::Invalid(errors) => AppError::InvalidInput(errors.len()),
            CalculatorError::Render(e) => AppError::Json(e),
        }
    }
}

/// 명령줄 인자를 해석해 해당 명령을 실행한다.
pub fn run(cli: Cli) -> Result<(), AppError> {
    let mut cfg = config::load_or_default(&cli.config)?;
    let lang = i18n::resolve_language(&cli.lang, cfg.language_preference());
    let tr = Translator::with_pack(lang, Some(cfg.locale_pack_dir()));
    debug!(lang = lang.code(), config = %cli.config.display(), "starting");

    match cli.command.unwrap_or(Command::Interactive) {
        Command::List => list(&tr),
        Command::Describe { id } => describe(&tr, &cfg, find(&id)?),
        Command::Run { id, set, json } => {
            let calc = find(&id)?;
            let mut form = parse_assignments(&set)?;
            apply_config_defaults(calc, &cfg, &mut form);
            let format = if json { OutputFormat::Json } else { cfg.output };
            run_once(&tr, &cfg, calc, &form, format)
        }
        Command::Convert {
            kind,
            value,
            from,
            to,
        } => convert(&tr, &cfg, &kind, value, &from, to.as_deref()),
        Command::Interactive => interactive(&tr, &mut cfg, &cli.config),
    }
}

fn find(id: &str) -> Result<&'static dyn DynCalculator, AppError> {
    registry::find(id).ok_or_else(|| AppError::UnknownCalculator(id.to_string()))
}

/// `field=value` 인자 목록을 폼 값으로 바꾼다.
pub fn parse_assignments(items: &[String]) -> Result<FormValues, AppError> {
    let mut form = FormValues::new();
    for item in items {
        let (field, value) = item
            .split_once('=')
            .filter(|(field, _)| !field.trim().is_empty())
            .ok_or_else(|| AppError::BadAssignment(item.clone()))?;
        form.set(field.trim(), value.trim());
    }
    Ok(form)
}

/// 설정에서 오는 필드 기본값. 스키마 기본값보다 먼저 적용된다.
pub fn config_default(
    calc: &dyn DynCalculator,
    cfg: &Config,
    field: &str,
    form: &FormValues,
) -> Option<String> {
    let id = calc.id();
    if id == EadSimulation::ID {
        return match field {
            "simulations" => Some(cfg.simulation.runs.to_string()),
            "bins" => Some(cfg.simulation.bins.to_string()),
            "seed" => cfg.simulation.seed.map(|s| s.to_string()),
            _ => None,
        };
    }
    if id == UnitConverter::ID && field == "to" {
        return form
            .get("kind")
            .and_then(QuantityKind::parse_choice)
            .map(|kind| cfg.default_units.symbol_for(kind).to_string());
    }
    None
}

/// 비어 있는 필드에 설정 기본값을 채운다.
pub fn apply_config_defaults(calc: &dyn DynCalculator, cfg: &Config, form: &mut FormValues) {
    for spec in calc.field_specs() {
        if form.contains(spec.name) {
            continue;
        }
        if let Some(value) = config_default(calc, cfg, spec.name, form) {
            form.set(spec.name, value);
        }
    }
}

/// `list` 명령의 출력 줄.
pub fn list_lines(tr: &Translator) -> Vec<String> {
    let mut lines = vec![tr.t(keys::LIST_HEADING)];
    for calc in registry::all() {
        lines.push(format!("  {:<24} {}", calc.id(), tr.label(&title_key(*calc), calc.title())));
    }
    lines
}

fn list(tr: &Translator) -> Result<(), AppError> {
    for line in list_lines(tr) {
        println!("{line}");
    }
    Ok(())
}

/// 계산기 제목의 언어팩 키.
pub fn title_key(calc: &dyn DynCalculator) -> String {
    format!("calculator.{}", calc.id())
}

/// 필드 라벨의 언어팩 키.
pub fn field_key(calc: &dyn DynCalculator, spec: &FieldSpec) -> String {
    format!("field.{}.{}", calc.id(), spec.name)
}

/// 필드 종류에 맞는 입력 안내.
pub fn field_hint(spec: &FieldSpec) -> Option<String> {
    match spec.kind {
        FieldKind::Choice(names) => Some(names().join(" | ")),
        FieldKind::Flag => Some("yes | no".to_string()),
        _ => spec.unit.map(str::to_string),
    }
}

/// `describe` 명령의 출력 줄. 기본값은 설정값이 스키마 기본값보다 앞선다.
pub fn describe_lines(tr: &Translator, cfg: &Config, calc: &dyn DynCalculator) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", tr.label(&title_key(calc), calc.title()), calc.id())];
    let empty = FormValues::new();
    for spec in calc.field_specs() {
        let default = config_default(calc, cfg, spec.name, &empty)
            .or_else(|| spec.default.filter(|d| !d.is_empty()).map(str::to_string));
        let status = match (&default, spec.is_required()) {
            (Some(d), _) => format!("= {d}"),
            (None, true) => tr.t(keys::DESCRIBE_REQUIRED),
            (None, false) => "-".to_string(),
        };
        let hint = field_hint(spec).map(|h| format!(" [{h}]")).unwrap_or_default();
        lines.push(format!(
            "  {:<22} {}{hint}  {status}",
            spec.name,
            tr.label(&field_key(calc, spec), spec.label)
        ));
    }
    lines
}

fn describe(tr: &Translator, cfg: &Config, calc: &dyn DynCalculator) -> Result<(), AppError> {
    for line in describe_lines(tr, cfg, calc) {
        println!("{line}");
    }
    Ok(())
}

/// 사용자 언어로 필드 오류 목록을 출력한다.
pub fn print_field_errors(tr: &Translator, calc: &dyn DynCalculator, errors: &ValidationErrors) {
    for err in errors.iter() {
        let label = calc
            .field_specs()
            .iter()
            .find(|s| s.name == err.field)
            .map(|s| tr.label(&field_key(calc, s), s.label))
            .unwrap_or_else(|| err.field.clone());
        eprintln!("  - {label}: {}", err.message(tr));
    }
}

/// 결과를 설정된 형식으로 그린다.
pub fn render_report(
    tr: &Translator,
    report: &Report,
    format: OutputFormat,
    decimals: usize,
) -> Result<String, AppError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => Ok(report.render_text(tr, decimals)),
    }
}

fn run_once(
    tr: &Translator,
    cfg: &Config,
    calc: &dyn DynCalculator,
    form: &FormValues,
    format: OutputFormat,
) -> Result<(), AppError> {
    match calc.run(form) {
        Ok(report) => {
            if format == OutputFormat::Text {
                println!("{}", tr.t(keys::RESULT_HEADING));
            }
            print!("{}", render_report(tr, &report, format, cfg.decimals)?);
            if format == OutputFormat::Json {
                println!();
            }
            Ok(())
        }
        Err(CalculatorError::Invalid(errors)) => {
            print_field_errors(tr, calc, &errors);
            Err(AppError::InvalidInput(errors.len()))
        }
        Err(e) => Err(e.into()),
    }
}

/// `convert` 명령의 결과 줄. `to`를 생략하면 설정의 기본 단위로 바꾼다.
pub fn convert_line(
    tr: &Translator,
    cfg: &Config,
    kind: &str,
    value: f64,
    from: &str,
    to: Option<&str>,
) -> Result<String, AppError> {
    let kind = conversion::parse_kind(kind)?;
    let to = to.unwrap_or_else(|| cfg.default_units.symbol_for(kind));
    let result = conversion::convert(kind, value, from, to)?;
    Ok(fill_template(
        &tr.t(keys::CONVERT_RESULT),
        &[
            ("value", value.to_string()),
            ("from", from.to_string()),
            ("result", format!("{result:.prec$}", prec = cfg.decimals.max(4))),
            ("to", to.to_string()),
        ],
    ))
}

fn convert(
    tr: &Translator,
    cfg: &Config,
    kind: &str,
    value: f64,
    from: &str,
    to: Option<&str>,
) -> Result<(), AppError> {
    println!("{}", convert_line(tr, cfg, kind, value, from, to)?);
    Ok(())
}

/// 대화형 메인 루프를 실행한다.
fn interactive(tr: &Translator, cfg: &mut Config, config_path: &Path) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            ui_cli::MenuChoice::Calculator(calc) => ui_cli::handle_form(tr, cfg, calc)?,
            ui_cli::MenuChoice::Settings => {
                ui_cli::handle_settings(tr, cfg)?;
                cfg.save(config_path)?;
                info!(path = %config_path.display(), "config saved");
            }
            ui_cli::MenuChoice::Exit => {
                cfg.save(config_path)?;
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
