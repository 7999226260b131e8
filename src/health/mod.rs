//! 의료비·보험 관련 계산 모듈.
//! 본인부담 분담, HSA 절세, 보험료 부담 능력, 장기요양 비용으로 구성한다.

pub mod hsa;
pub mod insurance_affordability;
pub mod long_term_care;
pub mod out_of_pocket;
