use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

use super::normal::{normal_cdf, standard_normal};
use crate::calculator::{Calculator, ChartSeries, FieldSpec};
use crate::i18n::Label;
use crate::validation::{FormValues, Rule, ValidationErrors, Validator};

/// 한 번에 돌릴 수 있는 최대 시뮬레이션 횟수.
pub const MAX_SIMULATIONS: u32 = 100_000;
pub const MAX_BINS: u32 = 200;
/// 현재가·행사가 상한. 수량 상한과 함께 두면 가장 긴 기간, 가장 큰 변동성에서도
/// 투영 가격과 익스포저가 유한하다.
pub const MAX_PRICE: f64 = 1e12;
pub const MAX_QUANTITY: f64 = 1e9;

/// EAD 시뮬레이션 입력.
#[derive(Debug, Clone)]
pub struct EadSimulationInput {
    /// 기초자산 현재가 S₀
    pub spot: f64,
    /// 행사가 K
    pub strike: f64,
    /// 연 변동성 σ(%)
    pub volatility_pct: f64,
    /// 연 기대수익률 μ(%)
    pub drift_pct: f64,
    /// 측정 기간 T(년)
    pub horizon_years: f64,
    /// 계약 수량 q
    pub quantity: f64,
    pub simulations: u32,
    /// PFE 신뢰수준(%)
    pub confidence_pct: f64,
    pub bins: u32,
    /// 있으면 같은 입력에 같은 결과를 낸다.
    pub seed: Option<u64>,
}

/// 히스토그램 구간 하나. `[lower, upper)`, 마지막 구간은 상한 포함.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u32,
}

/// EAD 시뮬레이션 결과.
#[derive(Debug, Clone, Serialize)]
pub struct EadSimulationResult {
    /// 평균 익스포저
    pub ead: f64,
    /// 신뢰수준 분위의 잠재 미래 익스포저
    pub pfe: f64,
    pub max_exposure: f64,
    /// 익스포저가 0보다 큰 경로 비율
    pub in_the_money_probability: f64,
    /// 닫힌 형태의 기대 익스포저
    pub analytical_ead: f64,
    /// 평균의 표준오차
    pub standard_error: f64,
    pub simulations: u32,
    pub seed: Option<u64>,
    pub histogram: Vec<HistogramBin>,
    pub histogram_series: ChartSeries,
}

/// 기하 브라운 운동으로 만기 가격을 한 번 투영한다.
fn project_price(input: &EadSimulationInput, z: f64) -> f64 {
    let sigma = input.volatility_pct / 100.0;
    let mu = input.drift_pct / 100.0;
    let t = input.horizon_years;
    input.spot * ((mu - 0.5 * sigma * sigma) * t + sigma * t.sqrt() * z).exp()
}

/// E[q·max(0, S_T − K)]. 시뮬레이션 평균이 수렴해야 하는 값이다.
pub fn analytical_exposure(input: &EadSimulationInput) -> f64 {
    let sigma = input.volatility_pct / 100.0;
    let mu = input.drift_pct / 100.0;
    let t = input.horizon_years;
    let forward = input.spot * (mu * t).exp();
    let per_unit = if input.strike <= 0.0 {
        forward
    } else if sigma == 0.0 {
        (forward - input.strike).max(0.0)
    } else {
        let vol_t = sigma * t.sqrt();
        let d1 = ((input.spot / input.strike).ln() + (mu + 0.5 * sigma * sigma) * t) / vol_t;
        let d2 = d1 - vol_t;
        forward * normal_cdf(d1) - input.strike * normal_cdf(d2)
    };
    input.quantity * per_unit
}

/// 정렬된 값에서 `q` 분위를 고른다(보간 없음, 순위 ⌈qN⌉).
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (q * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

/// `[0, max]`를 같은 폭으로 나눈 히스토그램.
pub fn histogram(values: &[f64], bins: u32, max: f64) -> Vec<HistogramBin> {
    let bins = bins.max(1);
    let width = max / f64::from(bins);
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: width * f64::from(i),
            upper: width * f64::from(i + 1),
            count: 0,
        })
        .collect();
    for &v in values {
        let idx = if width > 0.0 {
            ((v / width).floor() as usize).min(out.len() - 1)
        } else {
            0
        };
        out[idx].count += 1;
    }
    out
}

/// 주어진 난수 생성기로 시뮬레이션을 돌린다.
pub fn simulate_ead<R: Rng + ?Sized>(input: &EadSimulationInput, rng: &mut R) -> EadSimulationResult {
    let n = input.simulations.clamp(1, MAX_SIMULATIONS);
    let mut exposures: Vec<f64> = (0..n)
        .map(|_| {
            let s_t = project_price(input, standard_normal(rng));
            input.quantity * (s_t - input.strike).max(0.0)
        })
        .collect();

    let count = f64::from(n);
    let mean = exposures.iter().sum::<f64>() / count;
    let variance = if n > 1 {
        exposures.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / (count - 1.0)
    } else {
        0.0
    };
    let in_the_money = exposures.iter().filter(|&&e| e > 0.0).count() as f64 / count;

    exposures.sort_by(|a, b| a.total_cmp(b));
    let max_exposure = exposures.last().copied().unwrap_or(0.0);
    let pfe = quantile_sorted(&exposures, input.confidence_pct / 100.0);
    let histogram = histogram(&exposures, input.bins, max_exposure);

    let mut series = ChartSeries::new("exposure");
    for bin in &histogram {
        series.push(format!("{:.2}-{:.2}", bin.lower, bin.upper), f64::from(bin.count));
    }
    debug!(n, mean, pfe, "EAD simulation finished");

    EadSimulationResult {
        ead: mean,
        pfe,
        max_exposure,
        in_the_money_probability: in_the_money,
        analytical_ead: analytical_exposure(input),
        standard_error: (variance / count).sqrt(),
        simulations: n,
        seed: input.seed,
        histogram,
        histogram_series: series,
    }
}

/// 시드가 있으면 고정 시드로, 없으면 OS 엔트로피로 시뮬레이션한다.
pub fn compute_ead_simulation(input: &EadSimulationInput) -> EadSimulationResult {
    let mut rng = match input.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    simulate_ead(input, &mut rng)
}

pub struct EadSimulation;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::number("spot", Label::new("현재가", "Spot price")),
    FieldSpec::number("strike", Label::new("행사가", "Strike")),
    FieldSpec::number("volatility", Label::new("변동성", "Volatility")).default("20").unit("%/yr"),
    FieldSpec::number("drift", Label::new("기대수익률", "Drift")).default("5").unit("%/yr"),
    FieldSpec::number("horizon", Label::new("측정 기간", "Horizon")).default("1").unit("yr"),
    FieldSpec::number("quantity", Label::new("수량", "Quantity")).default("1"),
    FieldSpec::integer("simulations", Label::new("시뮬레이션 횟수", "Simulations")).default("10000"),
    FieldSpec::number("confidence", Label::new("신뢰수준", "Confidence level")).default("95").unit("%"),
    FieldSpec::integer("bins", Label::new("히스토그램 구간 수", "Histogram bins")).default("20"),
    FieldSpec::integer("seed", Label::new("난수 시드(선택)", "Random seed (optional)")).optional(),
];

impl Calculator for EadSimulation {
    const ID: &'static str = "ead-simulation";
    const TITLE: Label = Label::new("EAD 몬테카를로 시뮬레이션", "Monte Carlo EAD simulation");

    type Input = EadSimulationInput;
    type Output = EadSimulationResult;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(form: &FormValues) -> Result<Self::Input, ValidationErrors> {
        let mut v = Validator::new(form);
        let input = EadSimulationInput {
            spot: v.number("spot", &[Rule::Positive, Rule::Range(0.0, MAX_PRICE)]),
            strike: v.number("strike", &[Rule::Range(0.0, MAX_PRICE)]),
            volatility_pct: v.number("volatility", &[Rule::Range(0.0, 500.0)]),
            drift_pct: v.number("drift", &[Rule::Range(-100.0, 100.0)]),
            horizon_years: v.number("horizon", &[Rule::Positive, Rule::Range(0.0, 100.0)]),
            quantity: v.number("quantity", &[Rule::Positive, Rule::Range(0.0, MAX_QUANTITY)]),
            simulations: v.integer("simulations", 1, i64::from(MAX_SIMULATIONS)) as u32,
            confidence_pct: v.number("confidence", &[Rule::Range(50.0, 99.99)]),
            bins: v.integer("bins", 1, i64::from(MAX_BINS)) as u32,
            seed: v.optional_integer("seed", 0, i64::MAX).map(|s| s as u64),
        };
        v.finish(input)
    }

    fn compute(input: &Self::Input) -> Self::Output {
        compute_ead_simulation(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_uses_ceiling_rank() {
        let sorted: Vec<f64> = (1..=20).map(f64::from).collect();
        assert_eq!(quantile_sorted(&sorted, 0.95), 19.0);
        assert_eq!(quantile_sorted(&sorted, 1.0), 20.0);
        assert_eq!(quantile_sorted(&sorted, 0.0), 1.0);
    }

    #[test]
    fn histogram_puts_max_in_last_bin() {
        let bins = histogram(&[0.0, 0.5, 1.0, 2.0], 2, 2.0);
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![2, 2]);
        let flat = histogram(&[0.0, 0.0], 4, 0.0);
        assert_eq!(flat[0].count, 2);
    }
}
