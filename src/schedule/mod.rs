//! 근무 시간 계산 모듈.

pub mod timesheet;
