//! 폼 입력 검증.
//!
//! 계산기는 사용자가 입력한 문자열 묶음([`FormValues`])을 받아 [`Validator`]로
//! 타입이 있는 입력값을 만든다. 한 번의 제출에서 발생한 필드 오류는 모두 모아
//! [`ValidationErrors`]로 돌려준다. 오류가 하나라도 있으면 계산은 수행되지 않는다.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::i18n::{self, fill_template, Translator};

/// 폼에서 넘어온 원시 입력값. 필드명 → 입력 문자열.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormValues {
    fields: BTreeMap<String, String>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// 필드를 채운 새 폼을 반환한다.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn remove(&mut self, field: &str) {
        self.fields.remove(field);
    }

    /// 공백을 제거한 값을 돌려준다. 빈 문자열은 입력하지 않은 것으로 본다.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormValues::new();
        for (k, v) in iter {
            form.set(k, v);
        }
        form
    }
}

/// 필드 하나가 실패한 이유.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldErrorKind {
    #[error("값을 입력해야 합니다")]
    Missing,
    #[error("숫자가 아닙니다")]
    NotANumber,
    #[error("정수가 아닙니다")]
    NotAnInteger,
    #[error("0보다 커야 합니다")]
    MustBePositive,
    #[error("음수일 수 없습니다")]
    MustBeNonNegative,
    #[error("0일 수 없습니다")]
    MustBeNonZero,
    #[error("{min} ~ {max} 범위여야 합니다")]
    OutOfRange { min: f64, max: f64 },
    #[error("허용 값: {}", .allowed.join(", "))]
    UnknownChoice { allowed: Vec<&'static str> },
    #[error("시각 형식은 HH:MM 입니다")]
    InvalidTime,
    #[error("일시 형식은 YYYY-MM-DD HH:MM 입니다")]
    InvalidDateTime,
    #[error("yes/no 로 입력하세요")]
    InvalidFlag,
    /// 계산기별 교차 필드 규칙 위반. `key`는 메시지 키이다.
    #[error("{}", i18n::default_text(.key))]
    Rule { key: &'static str },
}

impl FieldErrorKind {
    fn message_key(&self) -> &'static str {
        match self {
            FieldErrorKind::Missing => i18n::keys::VALIDATION_MISSING,
            FieldErrorKind::NotANumber => i18n::keys::VALIDATION_NOT_A_NUMBER,
            FieldErrorKind::NotAnInteger => i18n::keys::VALIDATION_NOT_AN_INTEGER,
            FieldErrorKind::MustBePositive => i18n::keys::VALIDATION_POSITIVE,
            FieldErrorKind::MustBeNonNegative => i18n::keys::VALIDATION_NON_NEGATIVE,
            FieldErrorKind::MustBeNonZero => i18n::keys::VALIDATION_NON_ZERO,
            FieldErrorKind::OutOfRange { .. } => i18n::keys::VALIDATION_RANGE,
            FieldErrorKind::UnknownChoice { .. } => i18n::keys::VALIDATION_CHOICE,
            FieldErrorKind::InvalidTime => i18n::keys::VALIDATION_TIME,
            FieldErrorKind::InvalidDateTime => i18n::keys::VALIDATION_DATETIME,
            FieldErrorKind::InvalidFlag => i18n::keys::VALIDATION_FLAG,
            FieldErrorKind::Rule { key } => *key,
        }
    }
}

/// 필드 단위 오류.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{field}: {kind}")]
pub struct FieldError {
    pub field: String,
    #[serde(flatten)]
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    /// 사용자 언어로 메시지를 만든다.
    pub fn message(&self, tr: &Translator) -> String {
        let template = tr.t(self.kind.message_key());
        match &self.kind {
            FieldErrorKind::OutOfRange { min, max } => fill_template(
                &template,
                &[("min", min.to_string()), ("max", max.to_string())],
            ),
            FieldErrorKind::UnknownChoice { allowed } => {
                fill_template(&template, &[("allowed", allowed.join(", "))])
            }
            _ => template,
        }
    }
}

/// 한 번의 제출에서 모인 필드 오류 전체.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Error)]
#[error("입력값 오류 {}건: {}", .errors.len(), summary(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// 특정 필드의 첫 오류.
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn has(&self, field: &str) -> bool {
        self.for_field(field).is_some()
    }

    /// 오류가 난 필드 이름(중복 제거, 발생 순서 유지).
    pub fn fields(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for e in &self.errors {
            if !out.contains(&e.field.as_str()) {
                out.push(&e.field);
            }
        }
        out
    }
}

/// 숫자 필드에 거는 제약.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    Positive,
    NonNegative,
    NonZero,
    /// 양 끝을 포함하는 범위
    Range(f64, f64),
    /// 0 ~ 100
    Percent,
}

impl Rule {
    fn check(self, value: f64) -> Result<(), FieldErrorKind> {
        match self {
            Rule::Positive if value <= 0.0 => Err(FieldErrorKind::MustBePositive),
            Rule::NonNegative if value < 0.0 => Err(FieldErrorKind::MustBeNonNegative),
            Rule::NonZero if value == 0.0 => Err(FieldErrorKind::MustBeNonZero),
            Rule::Range(min, max) if value < min || value > max => {
                Err(FieldErrorKind::OutOfRange { min, max })
            }
            Rule::Percent if !(0.0..=100.0).contains(&value) => Err(FieldErrorKind::OutOfRange {
                min: 0.0,
                max: 100.0,
            }),
            _ => Ok(()),
        }
    }
}

/// 선택형(enum) 필드가 구현한다. 이름은 소문자 kebab-case로 적는다.
pub trait Choice: Copy + PartialEq + 'static {
    const CHOICES: &'static [(&'static str, Self)];

    fn parse_choice(raw: &str) -> Option<Self> {
        let key = raw.trim().to_lowercase().replace(['_', ' '], "-");
        Self::CHOICES
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, v)| *v)
    }

    fn choice_name(self) -> &'static str {
        Self::CHOICES
            .iter()
            .find(|(_, v)| *v == self)
            .map_or("", |(name, _)| *name)
    }
}

/// 선택지 이름 목록. 필드 스키마에서 함수 포인터로 쓴다.
pub fn choice_names<T: Choice>() -> Vec<&'static str> {
    T::CHOICES.iter().map(|(name, _)| *name).collect()
}

/// 입력 하나를 파싱할 때 받아들이는 yes/no 표기.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" | "on" | "예" => Some(true),
        "n" | "no" | "false" | "0" | "off" | "아니오" => Some(false),
        _ => None,
    }
}

/// 금액 필드가 받는 최댓값.
pub const MONEY_MAX: f64 = 1e15;

/// 천 단위 구분자(`,` `_`)를 뺀다.
fn strip_separators(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, ',' | '_')).collect()
}

fn parse_number(raw: &str) -> Result<f64, FieldErrorKind> {
    match strip_separators(raw).trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FieldErrorKind::NotANumber),
    }
}

/// 폼 하나를 검증하며 오류를 모은다.
///
/// 각 메서드는 실패해도 기본값을 돌려주고 오류만 기록한다. 오류가 있으면
/// [`Validator::finish`]가 값을 버리고 오류 묶음을 반환한다.
pub struct Validator<'a> {
    form: &'a FormValues,
    errors: ValidationErrors,
}

impl<'a> Validator<'a> {
    pub fn new(form: &'a FormValues) -> Self {
        Self {
            form,
            errors: ValidationErrors::default(),
        }
    }

    fn fail(&mut self, field: &str, kind: FieldErrorKind) {
        self.errors.push(FieldError::new(field, kind));
    }

    fn required(&mut self, field: &str) -> Option<&'a str> {
        let raw = self.form.get(field);
        if raw.is_none() {
            self.fail(field, FieldErrorKind::Missing);
        }
        raw
    }

    fn checked(&mut self, field: &str, raw: &str, rules: &[Rule]) -> Option<f64> {
        let value = match parse_number(raw) {
            Ok(v) => v,
            Err(kind) => {
                self.fail(field, kind);
                return None;
            }
        };
        for rule in rules {
            if let Err(kind) = rule.check(value) {
                self.fail(field, kind);
                return None;
            }
        }
        Some(value)
    }

    /// 필수 숫자 필드.
    pub fn number(&mut self, field: &str, rules: &[Rule]) -> f64 {
        self.required(field)
            .and_then(|raw| self.checked(field, raw, rules))
            .unwrap_or(0.0)
    }

    /// 비워 둘 수 있는 숫자 필드.
    pub fn optional_number(&mut self, field: &str, rules: &[Rule]) -> Option<f64> {
        let raw = self.form.get(field)?;
        self.checked(field, raw, rules)
    }

    /// 필수 금액 필드. 입력 문자열을 그대로 소수로 읽어 이진 부동소수 오차가 없다.
    pub fn money(&mut self, field: &str, rules: &[Rule]) -> Decimal {
        let Some(raw) = self.required(field) else {
            return Decimal::ZERO;
        };
        if self.checked(field, raw, rules).is_none() {
            return Decimal::ZERO;
        }
        let cleaned = strip_separators(raw);
        let cleaned = cleaned.trim();
        Decimal::from_str(cleaned)
            .or_else(|_| Decimal::from_scientific(cleaned))
            .unwrap_or_else(|_| {
                self.fail(field, FieldErrorKind::NotANumber);
                Decimal::ZERO
            })
    }

    fn checked_integer(&mut self, field: &str, raw: &str, min: i64, max: i64) -> Option<i64> {
        let value = self.checked(field, raw, &[])?;
        if value.fract() != 0.0 {
            self.fail(field, FieldErrorKind::NotAnInteger);
            return None;
        }
        if value < min as f64 || value > max as f64 {
            self.fail(
                field,
                FieldErrorKind::OutOfRange {
                    min: min as f64,
                    max: max as f64,
                },
            );
            return None;
        }
        Some(value as i64)
    }

    /// 필수 정수 필드. 범위는 양 끝 포함.
    pub fn integer(&mut self, field: &str, min: i64, max: i64) -> i64 {
        self.required(field)
            .and_then(|raw| self.checked_integer(field, raw, min, max))
            .unwrap_or(min)
    }

    pub fn optional_integer(&mut self, field: &str, min: i64, max: i64) -> Option<i64> {
        let raw = self.form.get(field)?;
        self.checked_integer(field, raw, min, max)
    }

    /// 필수 선택 필드.
    pub fn choice<T: Choice>(&mut self, field: &str) -> T {
        let fallback = T::CHOICES[0].1;
        let Some(raw) = self.required(field) else {
            return fallback;
        };
        match T::parse_choice(raw) {
            Some(v) => v,
            None => {
                self.fail(
                    field,
                    FieldErrorKind::UnknownChoice {
                        allowed: choice_names::<T>(),
                    },
                );
                fallback
            }
        }
    }

    /// 필수 자유 입력 필드.
    pub fn text(&mut self, field: &str) -> String {
        self.required(field).unwrap_or_default().to_string()
    }

    /// yes/no 필드. 비어 있으면 `default`.
    pub fn flag(&mut self, field: &str, default: bool) -> bool {
        let Some(raw) = self.form.get(field) else {
            return default;
        };
        parse_flag(raw).unwrap_or_else(|| {
            self.fail(field, FieldErrorKind::InvalidFlag);
            default
        })
    }

    /// `HH:MM` 또는 `HH:MM:SS` 시각.
    pub fn time(&mut self, field: &str) -> NaiveTime {
        let Some(raw) = self.required(field) else {
            return NaiveTime::default();
        };
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .unwrap_or_else(|_| {
                self.fail(field, FieldErrorKind::InvalidTime);
                NaiveTime::default()
            })
    }

    /// `YYYY-MM-DD HH:MM` 일시. `T` 구분자도 받는다.
    pub fn datetime(&mut self, field: &str) -> NaiveDateTime {
        let Some(raw) = self.required(field) else {
            return NaiveDateTime::default();
        };
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
            .unwrap_or_else(|_| {
                self.fail(field, FieldErrorKind::InvalidDateTime);
                NaiveDateTime::default()
            })
    }

    /// 교차 필드 규칙. 해당 필드에 이미 오류가 있으면 건너뛴다.
    pub fn ensure(&mut self, ok: bool, field: &str, key: &'static str) {
        if !ok && !self.errors.has(field) {
            self.fail(field, FieldErrorKind::Rule { key });
        }
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.has(field)
    }

    /// 오류가 없으면 값을, 있으면 모은 오류를 반환한다.
    pub fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    fn form(pairs: &[(&str, &str)]) -> FormValues {
        pairs.iter().copied().collect()
    }

    #[test]
    fn collects_every_failing_field() {
        let f = form(&[("a", "abc"), ("c", "-1")]);
        let mut v = Validator::new(&f);
        v.number("a", &[]);
        v.number("b", &[]);
        v.number("c", &[Rule::NonNegative]);
        let errs = v.finish(()).unwrap_err();
        assert_eq!(errs.len(), 3);
        assert_eq!(errs.for_field("a").unwrap().kind, FieldErrorKind::NotANumber);
        assert_eq!(errs.for_field("b").unwrap().kind, FieldErrorKind::Missing);
        assert_eq!(
            errs.for_field("c").unwrap().kind,
            FieldErrorKind::MustBeNonNegative
        );
    }

    #[test]
    fn blank_input_counts_as_missing() {
        let f = form(&[("a", "   ")]);
        let mut v = Validator::new(&f);
        v.number("a", &[]);
        assert!(v.has_error("a"));
    }

    #[test]
    fn thousands_separators_are_ignored() {
        let f = form(&[("income", "52,000")]);
        let mut v = Validator::new(&f);
        assert_eq!(v.number("income", &[Rule::Positive]), 52_000.0);
        assert!(v.finish(()).is_ok());
    }

    #[test]
    fn infinity_is_not_a_number() {
        let f = form(&[("x", "inf")]);
        let mut v = Validator::new(&f);
        v.number("x", &[]);
        assert_eq!(
            v.finish(()).unwrap_err().for_field("x").unwrap().kind,
            FieldErrorKind::NotANumber
        );
    }

    #[test]
    fn percent_rule_bounds() {
        let f = form(&[("p", "100"), ("q", "100.5")]);
        let mut v = Validator::new(&f);
        assert_eq!(v.number("p", &[Rule::Percent]), 100.0);
        v.number("q", &[Rule::Percent]);
        let errs = v.finish(()).unwrap_err();
        assert!(!errs.has("p"));
        assert_eq!(
            errs.for_field("q").unwrap().kind,
            FieldErrorKind::OutOfRange {
                min: 0.0,
                max: 100.0
            }
        );
    }

    #[test]
    fn money_keeps_decimal_digits() {
        let f = form(&[("bill", "7,576.39"), ("rate", "1.5e1"), ("neg", "-3")]);
        let mut v = Validator::new(&f);
        assert_eq!(v.money("bill", &[Rule::NonNegative]), Decimal::new(757_639, 2));
        assert_eq!(v.money("rate", &[Rule::Percent]), Decimal::from(15));
        v.money("neg", &[Rule::NonNegative]);
        let errs = v.finish(()).unwrap_err();
        assert_eq!(errs.fields(), vec!["neg"]);
    }

    #[test]
    fn integer_rejects_fractions() {
        let f = form(&[("n", "2.5"), ("m", "7")]);
        let mut v = Validator::new(&f);
        v.integer("n", 1, 10);
        assert_eq!(v.integer("m", 1, 10), 7);
        let errs = v.finish(()).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs.for_field("n").unwrap().kind, FieldErrorKind::NotAnInteger);
    }

    #[test]
    fn ensure_does_not_stack_on_existing_error() {
        let f = form(&[("run", "x")]);
        let mut v = Validator::new(&f);
        v.number("run", &[]);
        v.ensure(false, "run", i18n::keys::RULE_SLOPE_RUN_ZERO);
        assert_eq!(v.finish(()).unwrap_err().len(), 1);
    }

    #[test]
    fn time_and_datetime_formats() {
        let f = form(&[("t", "08:07"), ("d", "2026-03-01T06:30"), ("bad", "8 o'clock")]);
        let mut v = Validator::new(&f);
        assert_eq!(v.time("t"), NaiveTime::from_hms_opt(8, 7, 0).unwrap());
        assert_eq!(v.datetime("d").to_string(), "2026-03-01 06:30:00");
        v.time("bad");
        let errs = v.finish(()).unwrap_err();
        assert_eq!(errs.fields(), vec!["bad"]);
    }

    #[test]
    fn flags_accept_common_spellings() {
        let f = form(&[("a", "Yes"), ("b", "0"), ("c", "maybe")]);
        let mut v = Validator::new(&f);
        assert!(v.flag("a", false));
        assert!(!v.flag("b", true));
        assert!(v.flag("missing", true));
        v.flag("c", false);
        assert_eq!(
            v.finish(()).unwrap_err().for_field("c").unwrap().kind,
            FieldErrorKind::InvalidFlag
        );
    }

    #[test]
    fn localized_range_message() {
        let err = FieldError::new("p", FieldErrorKind::OutOfRange { min: 0.0, max: 100.0 });
        assert_eq!(err.message(&Translator::new(Language::En)), "must be between 0 and 100");
    }
}
