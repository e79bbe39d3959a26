//! # 婚恋模块 - Trait 定义
//!
//! 合婚评分与候选年份策略的接口。

use crate::types::CompatibilityResult;
use bazi_chart::{BaziChart, DaYun, Gender};

/// 合婚评分 Trait
pub trait CompatibilityScorer {
    /// 四个静态维度的合婚评分
    fn score(&self, a: &BaziChart, b: &BaziChart) -> CompatibilityResult;

    /// 含大运同步维度的合婚评分
    fn score_with_cycles(
        &self,
        a: &BaziChart,
        b: &BaziChart,
        cycles_a: &[DaYun],
        cycles_b: &[DaYun],
    ) -> CompatibilityResult;
}

/// 候选出生年份策略 Trait
pub trait BirthYearPolicy {
    /// 给出候选人的出生年份，按优先顺序排列
    fn candidate_years(&self, user_birth_year: u16, user_gender: Gender, reference_year: u16) -> Vec<u16>;
}
