//! # 婚恋模块 - 匹配算法
//!
//! 本模块提供八字合婚评分算法。
//!
//! ## 功能概述
//!
//! - **五行互补**：双方五行生克链、旺弱互补、平衡度
//! - **十神配合**：年、月、时三柱十神交叉配对
//! - **日主配合**：天干五合、良好组合、日主旺衰搭配
//! - **四柱对应**：年月日时逐柱相配，日柱计两倍
//! - **大运同步**：起运差、大运五行同步、关键年龄（可选维度）
//!
//! ## 算法权重
//!
//! | 维度 | 不含大运 | 含大运 |
//! |------|----------|--------|
//! | 五行互补 | 30% | 25% |
//! | 十神配合 | 25% | 15% |
//! | 日主配合 | 25% | 25% |
//! | 四柱对应 | 20% | 15% |
//! | 大运同步 | - | 20% |
//!
//! 总分 = Σ 权重 × 维度分，四舍五入后限制在 0-100。
//!
//! ## 使用示例
//!
//! ```
//! use bazi_chart::compute_chart;
//! use matchmaking_common::CompatibilityLevel;
//! use matchmaking_matching::score_compatibility;
//!
//! let chart = compute_chart(1990, 5, 15, 14).unwrap();
//! let result = score_compatibility(&chart, &chart);
//! assert_eq!(result.overall_score, 63);
//! assert_eq!(result.level, CompatibilityLevel::Good);
//! ```

pub mod bazi;
pub mod dayun;
pub mod shishen;
pub mod wuxing;

#[cfg(test)]
mod tests;

use bazi_chart::{BaziChart, DaYun};
use matchmaking_common::{
    CompatibilityAnalysis, CompatibilityLevel, CompatibilityResult, CompatibilityScorer,
    CyclesAnalysis,
};
use serde::{Deserialize, Serialize};

use bazi::{analyze_day_master, analyze_pillars};
use dayun::analyze_cycles;
use shishen::analyze_ten_gods;
use wuxing::analyze_five_elements;

// ============================================================================
// 错误
// ============================================================================

/// 合婚配置错误
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatchError {
    /// 维度权重之和必须为 1.0
    #[error("合婚权重之和应为 1.0，实际为 {sum}")]
    InvalidWeights { sum: f64 },
}

// ============================================================================
// 配置
// ============================================================================

/// 权重之和允许的误差
const WEIGHT_TOLERANCE: f64 = 1e-6;

/// 各维度权重
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringWeights {
    pub five_elements: f64,
    pub ten_gods: f64,
    pub day_master: f64,
    pub pillars: f64,
    #[serde(default)]
    pub cycles: f64,
}

impl ScoringWeights {
    /// 不含大运的默认权重
    pub const WITHOUT_CYCLES: Self = Self {
        five_elements: 0.30,
        ten_gods: 0.25,
        day_master: 0.25,
        pillars: 0.20,
        cycles: 0.0,
    };

    /// 含大运的默认权重
    pub const WITH_CYCLES: Self = Self {
        five_elements: 0.25,
        ten_gods: 0.15,
        day_master: 0.25,
        pillars: 0.15,
        cycles: 0.20,
    };

    pub fn sum(&self) -> f64 {
        self.five_elements + self.ten_gods + self.day_master + self.pillars + self.cycles
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(MatchError::InvalidWeights { sum });
        }
        Ok(())
    }
}

/// 合婚评分配置
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    /// 四维度评分时的权重
    pub without_cycles: ScoringWeights,
    /// 五维度（含大运）评分时的权重
    pub with_cycles: ScoringWeights,
    /// 维度分达到该值即视为良好
    pub good_threshold: u8,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            without_cycles: ScoringWeights::WITHOUT_CYCLES,
            with_cycles: ScoringWeights::WITH_CYCLES,
            good_threshold: 70,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<(), MatchError> {
        self.without_cycles.validate()?;
        self.with_cycles.validate()
    }
}

// ============================================================================
// 评分器
// ============================================================================

/// 八字合婚评分器
#[derive(Clone, Debug, Default)]
pub struct BaziMatcher {
    config: MatchConfig,
}

impl BaziMatcher {
    pub fn new(config: MatchConfig) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    fn evaluate(
        &self,
        a: &BaziChart,
        b: &BaziChart,
        cycles: Option<CyclesAnalysis>,
    ) -> CompatibilityResult {
        let five_elements = analyze_five_elements(a, b);
        let ten_gods = analyze_ten_gods(a, b);
        let day_master = analyze_day_master(a, b);
        let pillars = analyze_pillars(a, b);

        let weights = if cycles.is_some() {
            &self.config.with_cycles
        } else {
            &self.config.without_cycles
        };
        let cycles_score = cycles.as_ref().map_or(0, |c| c.score);

        let weighted = five_elements.score as f64 * weights.five_elements
            + ten_gods.score as f64 * weights.ten_gods
            + day_master.score as f64 * weights.day_master
            + pillars.score as f64 * weights.pillars
            + cycles_score as f64 * weights.cycles;
        let overall_score = weighted.round().clamp(0.0, 100.0) as u8;
        let level = CompatibilityLevel::from_score(overall_score);

        let threshold = self.config.good_threshold;
        let mut overall = Vec::new();
        if five_elements.score >= threshold {
            overall.push("五行相配度良好".to_string());
        }
        if ten_gods.score >= threshold {
            overall.push("十神互补性较好".to_string());
        }
        if day_master.score >= threshold {
            overall.push("日主组合适宜".to_string());
        }
        if pillars.score >= threshold {
            overall.push("四柱搭配和谐".to_string());
        }
        if cycles.as_ref().map_or(false, |c| c.score >= threshold) {
            overall.push("大运走势同步".to_string());
        }

        let analysis = CompatibilityAnalysis {
            five_elements,
            ten_gods,
            day_master,
            pillars,
            cycles,
            overall,
        };
        let recommendations = recommendations(overall_score, &analysis, threshold);

        log::debug!(
            target: "matching",
            "💞 合婚评分 {} × {}: {} ({})",
            a.sizhu(),
            b.sizhu(),
            overall_score,
            level.label()
        );

        CompatibilityResult {
            overall_score,
            level,
            analysis,
            recommendations,
        }
    }
}

impl CompatibilityScorer for BaziMatcher {
    fn score(&self, a: &BaziChart, b: &BaziChart) -> CompatibilityResult {
        self.evaluate(a, b, None)
    }

    fn score_with_cycles(
        &self,
        a: &BaziChart,
        b: &BaziChart,
        cycles_a: &[DaYun],
        cycles_b: &[DaYun],
    ) -> CompatibilityResult {
        self.evaluate(a, b, Some(analyze_cycles(cycles_a, cycles_b)))
    }
}

/// 按总分档位给出建议，并附上达到良好线的维度建议
fn recommendations(score: u8, analysis: &CompatibilityAnalysis, threshold: u8) -> Vec<String> {
    let bracket: [&str; 2] = match score {
        80..=100 => ["八字相配度极高，是理想的伴侣组合", "建议珍惜缘分，共同经营美好未来"],
        60..=79 => ["八字相配度良好，有较好的婚姻基础", "需要相互理解和包容，共同成长"],
        40..=59 => ["八字相配度一般，需要更多努力经营", "建议加强沟通，寻找共同兴趣"],
        _ => ["八字相配度较低，需要慎重考虑", "建议深入了解，评估是否适合"],
    };

    let mut result: Vec<String> = bracket.iter().map(|s| s.to_string()).collect();
    result.extend(analysis.overall.iter().cloned());

    let dimensions = [
        (analysis.five_elements.score, &analysis.five_elements.advice),
        (analysis.ten_gods.score, &analysis.ten_gods.advice),
        (analysis.day_master.score, &analysis.day_master.advice),
        (analysis.pillars.score, &analysis.pillars.advice),
    ];
    for (score, advice) in dimensions {
        if score >= threshold {
            result.extend(advice.iter().cloned());
        }
    }
    if let Some(cycles) = analysis.cycles.as_ref().filter(|c| c.score >= threshold) {
        result.extend(cycles.advice.iter().cloned());
    }

    result
}

/// 以默认配置计算两张命盘的合婚结果
pub fn score_compatibility(a: &BaziChart, b: &BaziChart) -> CompatibilityResult {
    BaziMatcher::default().score(a, b)
}
