//! 신용위험 계산 모듈.
//!
//! 몬테카를로 EAD 시뮬레이션, VaR 방식 담보 헤어컷, 기대손실(EL = PD × LGD × EAD)로 구성한다.

pub mod collateral_haircut;
pub mod ead_simulation;
pub mod expected_loss;
pub mod normal;
