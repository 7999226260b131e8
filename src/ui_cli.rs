use std::io::{self, BufRead, Write};

use crate::app::{self, AppError};
use crate::calculator::{CalculatorError, DynCalculator, FieldSpec, FormSession};
use crate::config::{Config, UnitSystem};
use crate::i18n::{fill_template, keys, Translator};
use crate::registry;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Clone, Copy)]
pub enum MenuChoice {
    Calculator(&'static dyn DynCalculator),
    Settings,
    Exit,
}

/// 메뉴 입력 한 줄을 해석한다. 번호는 1부터 시작한다.
pub fn parse_menu_selection(sel: &str) -> Option<MenuChoice> {
    match sel.trim() {
        "0" => Some(MenuChoice::Exit),
        "s" | "S" => Some(MenuChoice::Settings),
        other => {
            let n: usize = other.parse().ok()?;
            let calc = registry::all().get(n.checked_sub(1)?)?;
            Some(MenuChoice::Calculator(*calc))
        }
    }
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for (i, calc) in registry::all().iter().enumerate() {
        println!("{:>2}) {}", i + 1, tr.label(&app::title_key(*calc), calc.title()));
    }
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match parse_menu_selection(&sel) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 필드 하나의 프롬프트 문자열.
fn field_prompt(tr: &Translator, calc: &dyn DynCalculator, spec: &FieldSpec, default: Option<&str>) -> String {
    let mut prompt = tr.label(&app::field_key(calc, spec), spec.label);
    if let Some(hint) = app::field_hint(spec) {
        prompt.push_str(&fill_template(&tr.t(keys::FORM_CHOICES_HINT), &[("choices", hint)]));
    }
    if let Some(d) = default {
        prompt.push_str(&fill_template(&tr.t(keys::FORM_DEFAULT_HINT), &[("default", d.to_string())]));
    }
    prompt.push_str(": ");
    prompt
}

/// 폼 입력 중 이 값을 넣으면 계산을 취소하고 메뉴로 돌아간다.
pub const CANCEL_INPUT: &str = ":q";

/// 필드 하나를 입력받아 세션에 넣는다. 빈 입력은 `keep_current`면 지금 값을,
/// 아니면 설정 기본값을 쓴다. 취소하면 `false`.
fn prompt_field(
    tr: &Translator,
    cfg: &Config,
    session: &mut FormSession<'_>,
    spec: &FieldSpec,
    keep_current: bool,
) -> Result<bool, AppError> {
    let calc = session.calculator();
    let current = keep_current
        .then(|| session.values().get(spec.name).map(str::to_string))
        .flatten();
    let fallback = current.or_else(|| app::config_default(calc, cfg, spec.name, session.values()));
    let shown_default = fallback
        .as_deref()
        .or(spec.default.filter(|d| !d.is_empty()));
    let raw = read_line(&field_prompt(tr, calc, spec, shown_default))?;
    let value = match (raw.trim(), fallback) {
        (CANCEL_INPUT, _) => return Ok(false),
        ("", Some(d)) => d,
        (entered, _) => entered.to_string(),
    };
    session.set(spec.name, value);
    Ok(true)
}

/// 계산기 폼을 처리한다. 실패한 필드만 다시 묻고, 교차 필드 규칙이 깨졌으면 전체를 다시 묻는다.
pub fn handle_form(tr: &Translator, cfg: &Config, calc: &'static dyn DynCalculator) -> Result<(), AppError> {
    println!(
        "{}",
        fill_template(
            &tr.t(keys::FORM_HEADING),
            &[("title", tr.label(&app::title_key(calc), calc.title()))],
        )
    );
    let mut session = FormSession::new(calc);
    let mut pending: Vec<&'static str> = calc.field_specs().iter().map(|s| s.name).collect();
    let mut retrying = false;

    while !pending.is_empty() {
        if retrying {
            if let Some(Err(CalculatorError::Invalid(errors))) = session.outcome() {
                println!("{}", tr.t(keys::FORM_RETRY));
                app::print_field_errors(tr, calc, errors);
            }
        }
        for spec in calc.field_specs().iter().filter(|s| pending.contains(&s.name)) {
            if !prompt_field(tr, cfg, &mut session, spec, retrying)? {
                println!("{}", tr.t(keys::FORM_CANCELLED));
                return Ok(());
            }
        }
        pending = session.retry_fields();
        retrying = true;
    }

    match session.into_outcome() {
        Some(Ok(report)) => {
            println!("{}", tr.t(keys::RESULT_HEADING));
            print!("{}", app::render_report(tr, &report, cfg.output, cfg.decimals)?);
            Ok(())
        }
        Some(Err(e)) => Err(e.into()),
        None => Ok(()),
    }
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{}",
        fill_template(
            &tr.t(keys::SETTINGS_CURRENT_UNIT_SYSTEM),
            &[("system", format!("{:?}", cfg.unit_system))],
        )
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(&tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let system = match sel.trim() {
        "" => return Ok(()),
        "1" => UnitSystem::Metric,
        "2" => UnitSystem::Imperial,
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(());
        }
    };
    cfg.set_unit_system(system);
    println!(
        "{}",
        fill_template(
            &tr.t(keys::SETTINGS_SAVED),
            &[("system", format!("{system:?}"))],
        )
    );
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().lock().read_line(&mut buf)? == 0 {
        return Err(AppError::InputClosed);
    }
    Ok(buf)
}
