use std::collections::HashMap;
use std::fs;
use std::path::Path;

use sys_locale::get_locale;
use tracing::{debug, warn};

/// 메뉴, 안내, 검증 메시지 키.
pub mod keys {
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const FORM_HEADING: &str = "form.heading";
    pub const FORM_DEFAULT_HINT: &str = "form.default_hint";
    pub const FORM_CHOICES_HINT: &str = "form.choices_hint";
    pub const FORM_RETRY: &str = "form.retry";
    pub const FORM_CANCELLED: &str = "form.cancelled";
    pub const RESULT_HEADING: &str = "result.heading";
    pub const LIST_HEADING: &str = "list.heading";
    pub const DESCRIBE_REQUIRED: &str = "describe.required";

    pub const CONVERT_RESULT: &str = "convert.result";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_UNIT_SYSTEM: &str = "settings.current_unit_system";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const VALIDATION_MISSING: &str = "validation.missing";
    pub const VALIDATION_NOT_A_NUMBER: &str = "validation.not_a_number";
    pub const VALIDATION_NOT_AN_INTEGER: &str = "validation.not_an_integer";
    pub const VALIDATION_POSITIVE: &str = "validation.positive";
    pub const VALIDATION_NON_NEGATIVE: &str = "validation.non_negative";
    pub const VALIDATION_NON_ZERO: &str = "validation.non_zero";
    pub const VALIDATION_RANGE: &str = "validation.range";
    pub const VALIDATION_CHOICE: &str = "validation.choice";
    pub const VALIDATION_TIME: &str = "validation.time";
    pub const VALIDATION_DATETIME: &str = "validation.datetime";
    pub const VALIDATION_FLAG: &str = "validation.flag";

    pub const RULE_SLOPE_RUN_ZERO: &str = "rule.slope_run_zero";
    pub const RULE_TOTAL_TIME_ZERO: &str = "rule.total_time_zero";
    pub const RULE_PARTIAL_EXCEEDS_TOTAL: &str = "rule.partial_exceeds_total";
    pub const RULE_GROWTH_INITIAL_ZERO: &str = "rule.growth_initial_zero";
    pub const RULE_UNKNOWN_UNIT: &str = "rule.unknown_unit";
    pub const RULE_BREAK_EXCEEDS_SHIFT: &str = "rule.break_exceeds_shift";
    pub const RULE_CARE_START_AGE: &str = "rule.care_start_age";
    pub const RULE_OOP_BELOW_DEDUCTIBLE: &str = "rule.oop_below_deductible";
    pub const RULE_DEDUCTIBLE_MET: &str = "rule.deductible_met";
    pub const RULE_HDHP_REQUIRED: &str = "rule.hdhp_required";
}

/// 두 언어로 적은 표시 문자열. 언어팩으로 덮어쓸 수 있다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub ko: &'static str,
    pub en: &'static str,
}

impl Label {
    pub const fn new(ko: &'static str, en: &'static str) -> Self {
        Self { ko, en }
    }
}

/// 지원 언어.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    Ko,
    #[default]
    En,
}

impl Language {
    /// `ko`, `en-US`, `ko_KR.UTF-8` 같은 코드에서 언어를 고른다. `auto`나 모르는 언어는 None.
    pub fn parse(code: &str) -> Option<Self> {
        let primary = code.trim().split(['-', '_', '.']).next()?.to_ascii_lowercase();
        match primary.as_str() {
            "ko" => Some(Language::Ko),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }

    fn builtin(self, key: &str) -> Option<&'static str> {
        match self {
            Language::Ko => ko(key),
            Language::En => en(key).or_else(|| ko(key)),
        }
    }
}

/// 명령줄 → 설정 → 시스템 로케일 → `LANG` 순으로 언어를 정한다. 모두 없으면 영어.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> Language {
    Language::parse(cli_arg)
        .or_else(|| config_lang.and_then(Language::parse))
        .or_else(system_language)
        .unwrap_or_default()
}

/// 운영체제 로케일에서 언어를 추정한다.
pub fn system_language() -> Option<Language> {
    get_locale()
        .as_deref()
        .and_then(Language::parse)
        .or_else(|| std::env::var("LANG").ok().as_deref().and_then(Language::parse))
}

/// 사용자가 덮어쓴 문구 묶음. `<dir>/<lang>.toml` 파일 하나에 해당한다.
///
/// 중첩 테이블은 점으로 이은 키가 된다. `[rule] slope_run_zero = "..."`는
/// `rule.slope_run_zero` 키로 들어간다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalePack {
    entries: HashMap<String, String>,
}

impl LocalePack {
    pub fn parse(src: &str) -> Result<Self, toml::de::Error> {
        let root: toml::Table = toml::from_str(src)?;
        let mut entries = HashMap::new();
        let mut pending: Vec<(String, toml::Value)> = root.into_iter().collect();
        while let Some((key, value)) = pending.pop() {
            match value {
                toml::Value::String(text) => {
                    entries.insert(key, text);
                }
                toml::Value::Table(table) => {
                    pending.extend(table.into_iter().map(|(k, v)| (format!("{key}.{k}"), v)));
                }
                // 문자열이 아닌 값은 문구가 아니다
                _ => {}
            }
        }
        Ok(Self { entries })
    }

    /// 언어팩 파일을 읽는다. 파일이 없으면 None, 형식이 틀리면 경고 후 None.
    pub fn load(dir: &Path, lang: Language) -> Option<Self> {
        let path = dir.join(format!("{}.toml", lang.code()));
        let src = fs::read_to_string(&path).ok()?;
        match Self::parse(&src) {
            Ok(pack) => {
                debug!(path = %path.display(), entries = pack.len(), "locale pack loaded");
                Some(pack)
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "ignoring malformed locale pack");
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 현재 언어로 문구와 라벨을 고른다.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    lang: Language,
    pack: LocalePack,
}

impl Translator {
    /// 내장 문구만 쓰는 번역기.
    pub fn new(lang: Language) -> Self {
        Self {
            lang,
            pack: LocalePack::default(),
        }
    }

    /// `pack_dir`에 언어팩이 있으면 내장 문구보다 먼저 쓴다.
    pub fn with_pack(lang: Language, pack_dir: Option<&Path>) -> Self {
        let pack = pack_dir
            .and_then(|dir| LocalePack::load(dir, lang))
            .unwrap_or_default();
        Self { lang, pack }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 언어팩에만 있는 문구. 출력 이름처럼 내장 번역이 없는 키에 쓴다.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.pack.get(key).map(str::to_string)
    }

    /// 번역을 가져온다. 없으면 키 자체를 돌려준다.
    pub fn t(&self, key: &str) -> String {
        self.pack
            .get(key)
            .or_else(|| self.lang.builtin(key))
            .unwrap_or(key)
            .to_string()
    }

    /// 라벨을 현재 언어로 고른다. 언어팩에 `key`가 있으면 그것을 쓴다.
    pub fn label(&self, key: &str, label: Label) -> String {
        let text = self.pack.get(key).unwrap_or(match self.lang {
            Language::Ko => label.ko,
            Language::En => label.en,
        });
        text.to_string()
    }
}

/// `{name}` 자리표시자를 채운다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    vars.iter().fold(template.to_string(), |out, (name, value)| {
        out.replace(&format!("{{{name}}}"), value)
    })
}

/// 번역기 없이 쓰는 기본(한국어) 문구. 오류 `Display`에서 사용한다.
pub fn default_text(key: &str) -> String {
    ko(key).unwrap_or(key).to_string()
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    let text = match key {
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Formula Toolbox ===",
        MAIN_MENU_SETTINGS => "s) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        FORM_HEADING => "\n-- {title} --",
        FORM_DEFAULT_HINT => " [기본값 {default}]",
        FORM_CHOICES_HINT => " ({choices})",
        FORM_RETRY => "다음 항목을 다시 입력하세요. (Enter: 현재 값 유지, :q: 취소)",
        FORM_CANCELLED => "계산을 취소했습니다.",
        RESULT_HEADING => "결과:",
        LIST_HEADING => "사용 가능한 계산기:",
        DESCRIBE_REQUIRED => "필수",
        CONVERT_RESULT => "변환 결과: {value} {from} = {result} {to}",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_UNIT_SYSTEM => "현재 단위 시스템: {system}",
        SETTINGS_OPTIONS => "1) Metric  2) Imperial",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "단위 시스템이 {system} 로 설정되었습니다.",
        VALIDATION_MISSING => "값을 입력해야 합니다",
        VALIDATION_NOT_A_NUMBER => "숫자를 입력하세요",
        VALIDATION_NOT_AN_INTEGER => "정수를 입력하세요",
        VALIDATION_POSITIVE => "0보다 커야 합니다",
        VALIDATION_NON_NEGATIVE => "음수일 수 없습니다",
        VALIDATION_NON_ZERO => "0일 수 없습니다",
        VALIDATION_RANGE => "{min} ~ {max} 범위여야 합니다",
        VALIDATION_CHOICE => "다음 중 하나를 입력하세요: {allowed}",
        VALIDATION_TIME => "시각은 HH:MM 형식으로 입력하세요",
        VALIDATION_DATETIME => "일시는 YYYY-MM-DD HH:MM 형식으로 입력하세요",
        VALIDATION_FLAG => "yes 또는 no 로 입력하세요",
        RULE_SLOPE_RUN_ZERO => "수평 거리(run)는 0일 수 없습니다",
        RULE_TOTAL_TIME_ZERO => "전체 시간은 0보다 커야 합니다",
        RULE_PARTIAL_EXCEEDS_TOTAL => "부분 시간은 전체 시간을 넘을 수 없습니다",
        RULE_GROWTH_INITIAL_ZERO => "초기값이 0이면 증감률을 구할 수 없습니다",
        RULE_UNKNOWN_UNIT => "선택한 물리량에 없는 단위입니다",
        RULE_BREAK_EXCEEDS_SHIFT => "휴게 시간이 근무 시간보다 깁니다",
        RULE_CARE_START_AGE => "간병 시작 나이는 현재 나이보다 커야 합니다",
        RULE_OOP_BELOW_DEDUCTIBLE => "본인부담 상한액은 공제액 이상이어야 합니다",
        RULE_DEDUCTIBLE_MET => "이미 낸 공제액이 공제액보다 클 수 없습니다",
        RULE_HDHP_REQUIRED => "HSA는 고공제 건강보험(HDHP) 가입자만 이용할 수 있습니다",
        _ => return None,
    };
    Some(text)
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let text = match key {
        APP_EXIT => "Exiting.",
        MAIN_MENU_TITLE => "\n=== Formula Toolbox ===",
        MAIN_MENU_SETTINGS => "s) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please choose again.",
        FORM_HEADING => "\n-- {title} --",
        FORM_DEFAULT_HINT => " [default {default}]",
        FORM_CHOICES_HINT => " ({choices})",
        FORM_RETRY => "Please re-enter the following fields. (Enter keeps the current value, :q cancels)",
        FORM_CANCELLED => "Calculation cancelled.",
        RESULT_HEADING => "Result:",
        LIST_HEADING => "Available calculators:",
        DESCRIBE_REQUIRED => "required",
        CONVERT_RESULT => "Result: {value} {from} = {result} {to}",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_UNIT_SYSTEM => "Current unit system: {system}",
        SETTINGS_OPTIONS => "1) Metric  2) Imperial",
        SETTINGS_PROMPT_CHANGE => "Number to change (Enter to cancel): ",
        SETTINGS_INVALID => "Invalid input, keeping the current setting.",
        SETTINGS_SAVED => "Unit system set to {system}.",
        VALIDATION_MISSING => "is required",
        VALIDATION_NOT_A_NUMBER => "must be a number",
        VALIDATION_NOT_AN_INTEGER => "must be a whole number",
        VALIDATION_POSITIVE => "must be a positive number",
        VALIDATION_NON_NEGATIVE => "cannot be negative",
        VALIDATION_NON_ZERO => "cannot be zero",
        VALIDATION_RANGE => "must be between {min} and {max}",
        VALIDATION_CHOICE => "must be one of: {allowed}",
        VALIDATION_TIME => "must be a time like HH:MM",
        VALIDATION_DATETIME => "must be a date and time like YYYY-MM-DD HH:MM",
        VALIDATION_FLAG => "must be yes or no",
        RULE_SLOPE_RUN_ZERO => "Run cannot be zero",
        RULE_TOTAL_TIME_ZERO => "Total time must be greater than zero",
        RULE_PARTIAL_EXCEEDS_TOTAL => "Partial time cannot exceed the total time",
        RULE_GROWTH_INITIAL_ZERO => "Initial value cannot be zero",
        RULE_UNKNOWN_UNIT => "is not a unit of the selected quantity",
        RULE_BREAK_EXCEEDS_SHIFT => "Break is longer than the shift",
        RULE_CARE_START_AGE => "Care start age must exceed current age",
        RULE_OOP_BELOW_DEDUCTIBLE => "Out-of-pocket maximum must be at least the deductible",
        RULE_DEDUCTIBLE_MET => "Amount already met cannot exceed the deductible",
        RULE_HDHP_REQUIRED => "HSA contributions require enrollment in a high-deductible health plan",
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_codes_reduce_to_primary_language() {
        assert_eq!(Language::parse("ko_KR.UTF-8"), Some(Language::Ko));
        assert_eq!(Language::parse(" en-US "), Some(Language::En));
        assert_eq!(Language::parse("auto"), None);
        assert_eq!(Language::parse("fr"), None);
    }

    #[test]
    fn english_falls_back_to_key_for_unknown_entries() {
        let tr = Translator::new(Language::En);
        assert_eq!(tr.t(keys::RULE_SLOPE_RUN_ZERO), "Run cannot be zero");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn label_follows_language() {
        let label = Label::new("기울기", "Slope");
        assert_eq!(Translator::new(Language::Ko).label("x", label), "기울기");
        assert_eq!(Translator::new(Language::En).label("x", label), "Slope");
    }

    #[test]
    fn explicit_flag_wins_over_config() {
        assert_eq!(resolve_language("ko-KR", Some("en")), Language::Ko);
        assert_eq!(resolve_language("auto", Some("en")), Language::En);
    }

    #[test]
    fn nested_pack_tables_flatten_to_dotted_keys() {
        let pack = LocalePack::parse(
            "[rule]\nslope_run_zero = \"run ≠ 0\"\n[output.nested]\ndeep = \"x\"\nnumber = 3\n",
        )
        .unwrap();
        assert_eq!(pack.get("rule.slope_run_zero"), Some("run ≠ 0"));
        assert_eq!(pack.get("output.nested.deep"), Some("x"));
        assert_eq!(pack.len(), 2);
    }

    #[test]
    fn pack_overrides_builtin_text() {
        let tr = Translator {
            lang: Language::En,
            pack: LocalePack::parse("[main_menu]\nexit = \"q) Quit\"\n").unwrap(),
        };
        assert_eq!(tr.t(keys::MAIN_MENU_EXIT), "q) Quit");
        assert_eq!(tr.t(keys::MAIN_MENU_SETTINGS), "s) Settings");
    }

    #[test]
    fn template_fills_every_placeholder() {
        let s = fill_template("{a} and {b} and {a}", &[("a", "1".into()), ("b", "2".into())]);
        assert_eq!(s, "1 and 2 and 1");
    }
}
