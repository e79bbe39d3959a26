//! # 婚恋模块 - 配偶推荐
//!
//! 本模块根据用户命盘生成并评估候选配偶命盘。
//!
//! ## 功能概述
//!
//! - **候选日主**：日主配偶对照表；五行偏旺时改用制衡五行的天干
//! - **候选年份**：可替换的 `BirthYearPolicy`，默认传统年龄偏好
//! - **候选合成**：年份 × 日主 × 五行当令月时，逐一排盘
//! - **评分排序**：以 `CompatibilityScorer` 评分，按总分降序编号
//!
//! ## 推荐流程
//!
//! 1. 确定候选日主（最多 3 个）
//! 2. 确定候选年份（最多 3 个）
//! 3. 合成候选命盘，日主不在候选集合内的舍弃，达到上限即停止
//! 4. 与用户命盘合婚评分，生成优势与注意事项
//!
//! 没有候选人时返回空列表。

pub mod algorithm;
pub mod policy;


use bazi_chart::{compute_decade_cycles, BaziChart, DaYunConfig, Gender};
use matchmaking_common::{BirthYearPolicy, CompatibilityScorer, RankedCandidate};
use matchmaking_matching::BaziMatcher;
use serde::{Deserialize, Serialize};

use algorithm::{advantages, candidate_day_masters, considerations, synthesize_candidate, SEASON_COMBOS};
pub use policy::{SymmetricAgePolicy, TraditionalAgePolicy};

/// 名次以 `u8` 表示，候选人上限不超过该值
pub const MAX_RANKED_CANDIDATES: usize = u8::MAX as usize;

/// 推荐搜索配置
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// 计算候选人年龄的参考年份
    pub reference_year: u16,
    /// 候选人上限，超过 `MAX_RANKED_CANDIDATES` 时按其截断
    pub max_candidates: usize,
    /// 采用的候选年份数
    pub years_considered: usize,
    /// 采用的候选日主数
    pub day_masters_considered: usize,
    /// 某一五行占比超过该值时改用制衡五行的日主
    pub dominance_threshold: f64,
    /// 是否加入大运同步维度
    pub score_cycles: bool,
    /// 维度分达到该值计为优势
    pub good_threshold: u8,
    /// 大运同步维度所用的排运配置
    pub dayun: DaYunConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            reference_year: 2025,
            max_candidates: 5,
            years_considered: 3,
            day_masters_considered: 3,
            dominance_threshold: 0.3,
            score_cycles: true,
            good_threshold: 70,
            dayun: DaYunConfig::default(),
        }
    }
}

impl SearchConfig {
    /// 实际生效的候选人上限
    pub fn candidate_cap(&self) -> usize {
        self.max_candidates.min(MAX_RANKED_CANDIDATES)
    }
}

/// 配偶推荐器
pub struct SpouseRecommender<S = BaziMatcher, P = TraditionalAgePolicy> {
    scorer: S,
    policy: P,
    config: SearchConfig,
}

impl Default for SpouseRecommender {
    fn default() -> Self {
        Self::new(BaziMatcher::default(), TraditionalAgePolicy::default(), SearchConfig::default())
    }
}

impl<S: CompatibilityScorer, P: BirthYearPolicy> SpouseRecommender<S, P> {
    pub fn new(scorer: S, policy: P, config: SearchConfig) -> Self {
        Self { scorer, policy, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// 为 `gender` 的用户推荐异性候选人，按合婚总分降序排列
    pub fn recommend(&self, chart: &BaziChart, gender: Gender) -> Vec<RankedCandidate> {
        let user = chart.with_gender(gender);
        let config = &self.config;
        let cap = config.candidate_cap();

        let mut day_masters = candidate_day_masters(&user, config.dominance_threshold);
        day_masters.truncate(config.day_masters_considered);
        let mut years = self
            .policy
            .candidate_years(user.birth().year, gender, config.reference_year);
        years.truncate(config.years_considered);

        let user_cycles = if config.score_cycles {
            match compute_decade_cycles(&user, &config.dayun) {
                Ok(cycles) => Some(cycles),
                Err(e) => {
                    log::warn!(target: "recommendation", "⚠️ {} 无法排大运，不计大运同步: {}", user.sizhu(), e);
                    None
                }
            }
        } else {
            None
        };

        let mut candidates: Vec<BaziChart> = Vec::new();
        'search: for &year in &years {
            for &target in &day_masters {
                for combo in SEASON_COMBOS {
                    if candidates.len() >= cap {
                        break 'search;
                    }
                    if let Some(candidate) = synthesize_candidate(year, combo, target, gender.opposite()) {
                        if day_masters.contains(&candidate.rizhu()) {
                            log::debug!(
                                target: "recommendation",
                                "✅ 候选命盘 {} ({})",
                                candidate.sizhu(),
                                candidate.birth_date()
                            );
                            candidates.push(candidate);
                        }
                    }
                }
            }
        }

        let mut ranked: Vec<RankedCandidate> = candidates
            .into_iter()
            .map(|candidate| {
                let compatibility = match &user_cycles {
                    Some(cycles_a) => match compute_decade_cycles(&candidate, &config.dayun) {
                        Ok(cycles_b) => {
                            self.scorer.score_with_cycles(&user, &candidate, cycles_a, &cycles_b)
                        }
                        Err(e) => {
                            log::warn!(
                                target: "recommendation",
                                "⚠️ 候选命盘 {} 无法排大运，按四维度评分: {}",
                                candidate.sizhu(),
                                e
                            );
                            self.scorer.score(&user, &candidate)
                        }
                    },
                    None => self.scorer.score(&user, &candidate),
                };
                RankedCandidate {
                    rank: 0,
                    advantages: advantages(&compatibility, config.good_threshold),
                    considerations: considerations(&compatibility),
                    chart: candidate,
                    compatibility,
                }
            })
            .collect();

        // 稳定排序：同分者保持生成顺序
        ranked.sort_by(|a, b| b.score().cmp(&a.score()));
        for (i, candidate) in ranked.iter_mut().enumerate() {
            candidate.rank = u8::try_from(i + 1).unwrap_or(u8::MAX);
        }

        log::debug!(
            target: "recommendation",
            "💞 {} 推荐 {} 位候选人（年份 {:?}）",
            user.sizhu(),
            ranked.len(),
            years
        );
        ranked
    }
}

/// 以默认配置推荐候选配偶
pub fn recommend_counterparts(chart: &BaziChart, gender: Gender) -> Vec<RankedCandidate> {
    let recommender: SpouseRecommender = SpouseRecommender::default();
    recommender.recommend(chart, gender)
}
