//! 비율 계산 모듈. 분자/분모에 100을 곱하는 단순 공식들을 모아둔다.

pub mod growth;
pub mod slope;
pub mod time_percentage;
