//! 핵심 계산 로직을 라이브러리로 분리하여 CLI 뿐 아니라 다른 화면에서도 쓸 수 있게 한다.
//!
//! 계산기마다 입력 스키마, 검증, 순수 계산 함수만 두고 폼 처리는
//! [`calculator`]의 공통 틀이 맡는다.

pub mod app;
pub mod calculator;
pub mod cli;
pub mod config;
pub mod conversion;
pub mod credit_risk;
pub mod finance;
pub mod health;
pub mod i18n;
pub mod quantity;
pub mod ratio;
pub mod registry;
pub mod schedule;
pub mod travel;
pub mod ui_cli;
pub mod units;
pub mod validation;
