//! 투자 관련 계산 모듈.

pub mod investment_growth;
