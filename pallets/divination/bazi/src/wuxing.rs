//! # 五行力量分析
//!
//! ## 权重规则
//!
//! | 来源 | 权重 |
//! |------|------|
//! | 天干 | 1.0 |
//! | 地支本身五行 | 0.6 |
//! | 藏干本气 / 中气 / 余气 | 0.6 / 0.3 / 0.1 |
//! | 日主加成 | 3.0 |
//!
//! 旺衰按占比判定：≥ 25% 旺，≥ 15% 中，其余弱。

use core::fmt;
use core::ops::{Add, AddAssign};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::constants::{BRANCH_WEIGHT, MEDIUM_RATIO, RIZHU_BONUS, STEM_WEIGHT, STRONG_RATIO};
use crate::error::ValidationError;
use crate::types::{DiZhi, GanZhi, SiZhu, Strength, TianGan, WuXing};

// ============================================================================
// 五行权重
// ============================================================================

/// 五行权重表，以 `WuXing` 为下标
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct WuXingWeights([f64; 5]);

impl WuXingWeights {
	pub fn get(&self, wuxing: WuXing) -> f64 {
		self.0[wuxing.index()]
	}

	pub fn add_weight(&mut self, wuxing: WuXing, weight: f64) {
		self.0[wuxing.index()] += weight;
	}

	pub fn single(wuxing: WuXing, weight: f64) -> Self {
		let mut weights = Self::default();
		weights.add_weight(wuxing, weight);
		weights
	}

	pub fn total(&self) -> f64 {
		self.0.iter().sum()
	}

	/// 占比；总量为零时为 0
	pub fn ratio(&self, wuxing: WuXing) -> f64 {
		let total = self.total();
		if total > 0.0 {
			self.get(wuxing) / total
		} else {
			0.0
		}
	}

	pub fn strength(&self, wuxing: WuXing) -> Strength {
		let ratio = self.ratio(wuxing);
		if ratio >= STRONG_RATIO {
			Strength::Strong
		} else if ratio >= MEDIUM_RATIO {
			Strength::Medium
		} else {
			Strength::Weak
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = (WuXing, f64)> + '_ {
		WuXing::ALL.into_iter().map(|e| (e, self.get(e)))
	}

	/// 权重最大的五行；并列时取相生顺序靠前者
	pub fn dominant(&self) -> WuXing {
		self.iter()
			.fold((WuXing::Mu, f64::MIN), |best, (e, w)| if w > best.1 { (e, w) } else { best })
			.0
	}

	pub fn max(&self) -> f64 {
		self.0.iter().copied().fold(0.0, f64::max)
	}

	pub fn min(&self) -> f64 {
		self.0.iter().copied().fold(f64::INFINITY, f64::min)
	}

	/// 平衡度：最小值为零时为 0，否则 `1 - (max - min) / max`
	pub fn balance(&self) -> f64 {
		let (max, min) = (self.max(), self.min());
		if min > 0.0 && max > 0.0 {
			1.0 - (max - min) / max
		} else {
			0.0
		}
	}
}

impl Add for WuXingWeights {
	type Output = WuXingWeights;

	fn add(mut self, rhs: Self) -> Self {
		self += rhs;
		self
	}
}

impl AddAssign for WuXingWeights {
	fn add_assign(&mut self, rhs: Self) {
		for (lhs, rhs) in self.0.iter_mut().zip(rhs.0) {
			*lhs += rhs;
		}
	}
}

impl Serialize for WuXingWeights {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(5))?;
		for (e, w) in self.iter() {
			map.serialize_entry(&e.label(), &w)?;
		}
		map.end()
	}
}

// ============================================================================
// 分项权重
// ============================================================================

/// 地支的五行贡献：地支本身 + 各藏干
pub fn dizhi_weights(zhi: DiZhi) -> WuXingWeights {
	let mut weights = WuXingWeights::single(zhi.to_wuxing(), BRANCH_WEIGHT);
	for canggan in zhi.canggan() {
		weights.add_weight(canggan.gan.to_wuxing(), canggan.canggan_type.weight());
	}
	weights
}

/// 一柱的五行贡献
pub fn ganzhi_weights(ganzhi: GanZhi) -> WuXingWeights {
	WuXingWeights::single(ganzhi.gan.to_wuxing(), STEM_WEIGHT) + dizhi_weights(ganzhi.zhi)
}

/// 四柱五行权重（含日主加成）
pub fn calculate_weights(sizhu: &SiZhu) -> WuXingWeights {
	let mut weights = WuXingWeights::single(sizhu.rizhu().to_wuxing(), RIZHU_BONUS);
	for pillar in sizhu.pillars() {
		weights += ganzhi_weights(pillar);
	}
	weights
}

/// 五行出现次数：天干、地支本气五行、每个藏干各计一次，日主另计一次
pub fn calculate_counts(sizhu: &SiZhu) -> [u8; 5] {
	let mut counts = [0u8; 5];
	counts[sizhu.rizhu().to_wuxing().index()] += 1;
	for pillar in sizhu.pillars() {
		counts[pillar.gan.to_wuxing().index()] += 1;
		counts[pillar.zhi.to_wuxing().index()] += 1;
		for canggan in pillar.zhi.canggan() {
			counts[canggan.gan.to_wuxing().index()] += 1;
		}
	}
	counts
}

// ============================================================================
// 五行分析
// ============================================================================

/// 五行生克链（有向）
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct WuXingChain {
	pub from: WuXing,
	pub to: WuXing,
}

impl fmt::Display for WuXingChain {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}→{}", self.from, self.to)
	}
}

impl Serialize for WuXingChain {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

/// 命盘五行分析
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WuXingAnalysis {
	counts: [u8; 5],
	weights: WuXingWeights,
	strengths: [Strength; 5],
	balance: f64,
	generate_chains: Vec<WuXingChain>,
	overcome_chains: Vec<WuXingChain>,
}

impl WuXingAnalysis {
	pub fn from_weights(weights: WuXingWeights, counts: [u8; 5]) -> Self {
		let present: Vec<WuXing> = weights.iter().filter(|(_, w)| *w > 0.0).map(|(e, _)| e).collect();
		let chains = |relation: fn(WuXing) -> WuXing| -> Vec<WuXingChain> {
			present
				.iter()
				.filter(|e| present.contains(&relation(**e)))
				.map(|e| WuXingChain {
					from: *e,
					to: relation(*e),
				})
				.collect()
		};
		Self {
			counts,
			weights,
			strengths: WuXing::ALL.map(|e| weights.strength(e)),
			balance: weights.balance(),
			generate_chains: chains(WuXing::generates),
			overcome_chains: chains(WuXing::overcomes),
		}
	}

	pub fn counts(&self) -> [u8; 5] {
		self.counts
	}

	pub fn count(&self, wuxing: WuXing) -> u8 {
		self.counts[wuxing.index()]
	}

	pub fn weights(&self) -> &WuXingWeights {
		&self.weights
	}

	pub fn strength(&self, wuxing: WuXing) -> Strength {
		self.strengths[wuxing.index()]
	}

	pub fn balance(&self) -> f64 {
		self.balance
	}

	pub fn generate_chains(&self) -> &[WuXingChain] {
		&self.generate_chains
	}

	pub fn overcome_chains(&self) -> &[WuXingChain] {
		&self.overcome_chains
	}

	/// 旺的五行
	pub fn strong_elements(&self) -> Vec<WuXing> {
		WuXing::ALL.into_iter().filter(|e| self.strength(*e) == Strength::Strong).collect()
	}

	/// 弱的五行
	pub fn weak_elements(&self) -> Vec<WuXing> {
		WuXing::ALL.into_iter().filter(|e| self.strength(*e) == Strength::Weak).collect()
	}
}

/// 完整五行分析
pub fn calculate_wuxing(sizhu: &SiZhu) -> WuXingAnalysis {
	WuXingAnalysis::from_weights(calculate_weights(sizhu), calculate_counts(sizhu))
}

/// 由柱文本计算五行（如 `["庚午", "辛巳", "庚辰", "癸未"]`）
pub fn calculate_wuxing_from_labels(pillars: &[&str]) -> Result<WuXingAnalysis, ValidationError> {
	let sizhu = pillars.join(" ").parse::<SiZhu>()?;
	Ok(calculate_wuxing(&sizhu))
}

/// 日主旺衰：日主五行的旺衰
pub fn judge_rizhu_strength(rizhu: TianGan, analysis: &WuXingAnalysis) -> Strength {
	analysis.strength(rizhu.to_wuxing())
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;

	fn sample() -> SiZhu {
		"庚午 辛巳 庚辰 癸未".parse().unwrap()
	}

	#[test]
	fn test_dizhi_weights_include_branch_and_hidden_stems() {
		// 午：火 0.6 + 丁(火) 0.6 + 己(土) 0.3
		let wu = dizhi_weights(DiZhi::WU);
		assert_abs_diff_eq!(wu.get(WuXing::Huo), 1.2);
		assert_abs_diff_eq!(wu.get(WuXing::Tu), 0.3);
		assert_abs_diff_eq!(wu.total(), 1.5);
	}

	#[test]
	fn test_add_weight_and_sum_operators() {
		let mut weights = WuXingWeights::single(WuXing::Mu, 1.0);
		weights.add_weight(WuXing::Mu, 0.5);
		weights.add_weight(WuXing::Shui, 0.3);
		assert_abs_diff_eq!(weights.get(WuXing::Mu), 1.5);

		let sum = weights + WuXingWeights::single(WuXing::Shui, 0.7);
		assert_abs_diff_eq!(sum.get(WuXing::Shui), 1.0);
		assert_abs_diff_eq!(sum.total(), 2.5);
		// 加法不改动左值
		assert_abs_diff_eq!(weights.total(), 1.8);
	}

	#[test]
	fn test_sample_chart_weights() {
		let weights = calculate_weights(&sample());
		// 庚 ×2 + 辛 = 3.0，日主加成 3.0，巳中庚 0.3
		assert_abs_diff_eq!(weights.get(WuXing::Jin), 6.3, epsilon = 1e-9);
		assert_abs_diff_eq!(weights.get(WuXing::Huo), 2.7, epsilon = 1e-9);
		assert_abs_diff_eq!(weights.get(WuXing::Tu), 2.8, epsilon = 1e-9);
		assert_abs_diff_eq!(weights.get(WuXing::Shui), 1.1, epsilon = 1e-9);
		assert_abs_diff_eq!(weights.get(WuXing::Mu), 0.4, epsilon = 1e-9);
		assert_abs_diff_eq!(weights.total(), 13.3, epsilon = 1e-9);
		assert_eq!(weights.dominant(), WuXing::Jin);
	}

	#[test]
	fn test_strength_buckets_follow_ratio() {
		let analysis = calculate_wuxing(&sample());
		assert_eq!(analysis.strength(WuXing::Jin), Strength::Strong);
		assert_eq!(analysis.strength(WuXing::Huo), Strength::Medium);
		assert_eq!(analysis.strength(WuXing::Tu), Strength::Medium);
		assert_eq!(analysis.strength(WuXing::Shui), Strength::Weak);
		assert_eq!(analysis.strength(WuXing::Mu), Strength::Weak);
		assert_eq!(judge_rizhu_strength(TianGan::GENG, &analysis), Strength::Strong);
	}

	#[test]
	fn test_balance_zero_when_element_missing() {
		let weights = WuXingWeights::single(WuXing::Mu, 2.0);
		assert_eq!(weights.balance(), 0.0);
		let even = WuXing::ALL
			.into_iter()
			.fold(WuXingWeights::default(), |acc, e| acc + WuXingWeights::single(e, 1.0));
		assert_abs_diff_eq!(even.balance(), 1.0);
	}

	#[test]
	fn test_chains_only_between_present_elements() {
		let weights = WuXingWeights::single(WuXing::Mu, 1.0) + WuXingWeights::single(WuXing::Huo, 1.0);
		let analysis = WuXingAnalysis::from_weights(weights, [1, 1, 0, 0, 0]);
		assert_eq!(
			analysis.generate_chains(),
			&[WuXingChain {
				from: WuXing::Mu,
				to: WuXing::Huo
			}]
		);
		assert!(analysis.overcome_chains().is_empty());
		assert_eq!(analysis.generate_chains()[0].to_string(), "木→火");
	}

	#[test]
	fn test_counts_include_hidden_stems() {
		let counts = calculate_counts(&sample());
		// 金：庚 庚 辛 + 日主 + 巳中庚
		assert_eq!(counts[WuXing::Jin.index()], 5);
	}

	#[test]
	fn test_labels_entry_point_rejects_malformed() {
		assert!(calculate_wuxing_from_labels(&["庚午", "辛巳", "庚辰", "癸未"]).is_ok());
		assert_eq!(
			calculate_wuxing_from_labels(&["庚午", "辛X"]),
			Err(ValidationError::MalformedPillar("辛X".to_string()))
		);
		assert!(calculate_wuxing_from_labels(&["庚午", "辛巳"]).is_err());
	}
}
