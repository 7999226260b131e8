//! 모든 계산기가 공유하는 폼 → 검증 → 계산 → 결과 틀.
//!
//! 계산기 하나는 필드 스키마, 검증 함수, 순수 계산 함수만 정의한다.
//! 기본값 채우기, 결과 직렬화, 재계산은 여기서 한 번만 구현한다.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::i18n::{Label, Translator};
use crate::validation::{FieldErrorKind, FormValues, ValidationErrors};

/// 입력 필드 종류. 프롬프트와 스키마 설명에 쓴다.
#[derive(Clone, Copy)]
pub enum FieldKind {
    Number,
    Integer,
    /// 선택지 목록을 돌려주는 함수
    Choice(fn() -> Vec<&'static str>),
    Flag,
    /// `HH:MM`
    Time,
    /// `YYYY-MM-DD HH:MM`
    DateTime,
    /// 다른 필드에 따라 허용 값이 달라지는 자유 입력
    Text,
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Number => f.write_str("Number"),
            FieldKind::Integer => f.write_str("Integer"),
            FieldKind::Choice(names) => f.debug_tuple("Choice").field(&names()).finish(),
            FieldKind::Flag => f.write_str("Flag"),
            FieldKind::Time => f.write_str("Time"),
            FieldKind::DateTime => f.write_str("DateTime"),
            FieldKind::Text => f.write_str("Text"),
        }
    }
}

/// 입력 필드 하나의 스키마.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: Label,
    pub kind: FieldKind,
    /// 비워 두면 쓰는 값. 없으면 필수 입력이다.
    pub default: Option<&'static str>,
    /// 단위나 형식 안내
    pub unit: Option<&'static str>,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: Label, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            default: None,
            unit: None,
        }
    }

    pub const fn number(name: &'static str, label: Label) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub const fn integer(name: &'static str, label: Label) -> Self {
        Self::new(name, label, FieldKind::Integer)
    }

    pub const fn choice(
        name: &'static str,
        label: Label,
        names: fn() -> Vec<&'static str>,
    ) -> Self {
        Self::new(name, label, FieldKind::Choice(names))
    }

    pub const fn flag(name: &'static str, label: Label) -> Self {
        Self::new(name, label, FieldKind::Flag)
    }

    pub const fn default(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    /// 비워 둘 수 있는 필드. 기본값 없이 빈 값으로 둔다.
    pub const fn optional(self) -> Self {
        self.default("")
    }

    pub const fn unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// 차트용 점 하나.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// 차트에 그대로 넘길 수 있는 순서 있는 점 목록.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.points.push(ChartPoint {
            label: label.into(),
            value,
        });
    }
}

/// 계산기 하나.
///
/// `validate`는 기본값이 채워진 폼을 받는다. `compute`는 검증된 입력만 받으므로
/// 실패하지 않는다.
pub trait Calculator: Sync {
    const ID: &'static str;
    const TITLE: Label;

    type Input: fmt::Debug;
    type Output: Serialize;

    fn fields() -> &'static [FieldSpec];

    fn validate(form: &FormValues) -> Result<Self::Input, ValidationErrors>;

    fn compute(input: &Self::Input) -> Self::Output;

    /// 스키마 기본값을 채운 뒤 검증하고 계산한다.
    fn evaluate(form: &FormValues) -> Result<Self::Output, ValidationErrors> {
        let form = apply_defaults(Self::fields(), form);
        let input = Self::validate(&form)?;
        debug!(calculator = Self::ID, ?input, "calculating");
        Ok(Self::compute(&input))
    }
}

/// 비어 있는 필드에 스키마 기본값을 채운 사본을 만든다.
pub fn apply_defaults(fields: &[FieldSpec], form: &FormValues) -> FormValues {
    let mut filled = form.clone();
    for field in fields {
        if let (Some(default), false) = (field.default, form.contains(field.name)) {
            filled.set(field.name, default);
        }
    }
    filled
}

/// 계산 실행 실패.
#[derive(Debug, Error)]
pub enum CalculatorError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error("결과 직렬화 오류: {0}")]
    Render(#[from] serde_json::Error),
}

/// 표시 계층에 넘기는 결과. 이름 붙은 출력값의 JSON 객체이다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub calculator: &'static str,
    pub outputs: Value,
}

impl Report {
    pub fn new<T: Serialize>(calculator: &'static str, output: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            calculator,
            outputs: serde_json::to_value(output)?,
        })
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.outputs.get(name)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    /// 사람이 읽는 텍스트로 그린다. 실수는 `decimals` 자리까지 표시한다.
    pub fn render_text(&self, tr: &Translator, decimals: usize) -> String {
        let mut out = String::new();
        render_value(&mut out, tr, None, &self.outputs, 0, decimals);
        out
    }
}

fn output_label(tr: &Translator, key: &str) -> String {
    tr.lookup(&format!("output.{key}"))
        .unwrap_or_else(|| key.replace('_', " "))
}

fn format_scalar(value: &Value, decimals: usize) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Bool(b) => if *b { "yes" } else { "no" }.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) => format!("{f:.decimals$}"),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn render_value(
    out: &mut String,
    tr: &Translator,
    key: Option<&str>,
    value: &Value,
    depth: usize,
    decimals: usize,
) {
    let indent = "  ".repeat(depth);
    match value {
        Value::Object(map) => {
            // 차트 점은 `label: value` 한 줄로
            if let (Some(Value::String(label)), Some(v), 2) =
                (map.get("label"), map.get("value"), map.len())
            {
                out.push_str(&format!("{indent}{label}: {}\n", format_scalar(v, decimals)));
                return;
            }
            let inner = match key {
                Some(k) => {
                    out.push_str(&format!("{indent}{}:\n", output_label(tr, k)));
                    depth + 1
                }
                None => depth,
            };
            for (k, v) in map {
                render_value(out, tr, Some(k.as_str()), v, inner, decimals);
            }
        }
        Value::Array(items) => {
            if let Some(k) = key {
                out.push_str(&format!("{indent}{}:\n", output_label(tr, k)));
            }
            for item in items {
                render_value(out, tr, None, item, depth + 1, decimals);
            }
        }
        scalar => {
            let text = format_scalar(scalar, decimals);
            match key {
                Some(k) => out.push_str(&format!("{indent}{}: {text}\n", output_label(tr, k))),
                None => out.push_str(&format!("{indent}{text}\n")),
            }
        }
    }
}

/// 레지스트리에 담기 위한 객체 안전 계산기 인터페이스.
pub trait DynCalculator: Sync {
    fn id(&self) -> &'static str;
    fn title(&self) -> Label;
    fn field_specs(&self) -> &'static [FieldSpec];
    fn run(&self, form: &FormValues) -> Result<Report, CalculatorError>;
}

impl<C: Calculator> DynCalculator for C {
    fn id(&self) -> &'static str {
        C::ID
    }

    fn title(&self) -> Label {
        C::TITLE
    }

    fn field_specs(&self) -> &'static [FieldSpec] {
        <C as Calculator>::fields()
    }

    fn run(&self, form: &FormValues) -> Result<Report, CalculatorError> {
        let output = C::evaluate(form)?;
        Ok(Report::new(C::ID, &output)?)
    }
}

/// 폼 하나의 상태. 필드가 바뀔 때마다 결과를 다시 계산한다.
pub struct FormSession<'a> {
    calculator: &'a dyn DynCalculator,
    values: FormValues,
    outcome: Option<Result<Report, CalculatorError>>,
}

impl<'a> FormSession<'a> {
    pub fn new(calculator: &'a dyn DynCalculator) -> Self {
        Self {
            calculator,
            values: FormValues::new(),
            outcome: None,
        }
    }

    pub fn with_values(calculator: &'a dyn DynCalculator, values: FormValues) -> Self {
        let mut session = Self {
            calculator,
            values,
            outcome: None,
        };
        session.recompute();
        session
    }

    pub fn calculator(&self) -> &'a dyn DynCalculator {
        self.calculator
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// 필드를 바꾸고 즉시 재계산한다.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> &Result<Report, CalculatorError> {
        self.values.set(field, value);
        self.recompute()
    }

    /// 현재 값으로 다시 계산한다.
    pub fn recompute(&mut self) -> &Result<Report, CalculatorError> {
        self.outcome.insert(self.calculator.run(&self.values))
    }

    pub fn outcome(&self) -> Option<&Result<Report, CalculatorError>> {
        self.outcome.as_ref()
    }

    pub fn into_outcome(self) -> Option<Result<Report, CalculatorError>> {
        self.outcome
    }

    /// 마지막 계산에서 검증에 실패한 필드.
    pub fn failed_fields(&self) -> Vec<String> {
        match &self.outcome {
            Some(Err(CalculatorError::Invalid(errors))) => {
                errors.fields().into_iter().map(str::to_string).collect()
            }
            _ => Vec::new(),
        }
    }

    /// 다시 입력받을 필드(스키마 순서). 교차 필드 규칙 오류가 있으면 모든 필드이다.
    pub fn retry_fields(&self) -> Vec<&'static str> {
        let Some(Err(CalculatorError::Invalid(errors))) = &self.outcome else {
            return Vec::new();
        };
        let cross_field = errors
            .iter()
            .any(|e| matches!(e.kind, FieldErrorKind::Rule { .. }));
        self.calculator
            .field_specs()
            .iter()
            .filter(|s| cross_field || errors.has(s.name))
            .map(|s| s.name)
            .collect()
    }
}
