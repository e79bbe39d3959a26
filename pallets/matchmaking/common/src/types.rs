//! # 婚恋模块 - 共享类型定义
//!
//! 合婚评分结果与推荐候选人的数据结构。各维度分数均为 0-100 的整数。

use bazi_chart::{BaziChart, GanZhi, Strength};
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::Serialize;

// ============================================================================
// 合婚等级
// ============================================================================

/// 合婚等级
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq,
    Debug, Default, Serialize,
)]
pub enum CompatibilityLevel {
    /// 极佳（80-100分）
    Excellent = 0,
    /// 良好（60-79分）
    Good = 1,
    /// 一般（40-59分）
    #[default]
    Average = 2,
    /// 较差（20-39分）
    Poor = 3,
    /// 不宜（0-19分）
    Unsuitable = 4,
}

impl CompatibilityLevel {
    /// 根据评分获取等级
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Average,
            20..=39 => Self::Poor,
            _ => Self::Unsuitable,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "极佳",
            Self::Good => "良好",
            Self::Average => "一般",
            Self::Poor => "较差",
            Self::Unsuitable => "不宜",
        }
    }
}

// ============================================================================
// 各维度分析
// ============================================================================

/// 五行互补分析
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FiveElementsAnalysis {
    pub score: u8,
    /// 甲方五行生乙方五行的链
    pub generate_chains: Vec<String>,
    /// 甲方五行克乙方五行的链
    pub overcome_chains: Vec<String>,
    /// 旺弱互补的五行
    pub complementary: Vec<String>,
    /// 双方平均平衡度
    pub balance: f64,
    pub advice: Vec<String>,
}

/// 十神配合分析
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TenGodsAnalysis {
    pub score: u8,
    pub complementary_pairs: Vec<String>,
    pub conflicting_pairs: Vec<String>,
    pub advice: Vec<String>,
}

/// 日主组合类型
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq,
    Debug, Default, Serialize,
)]
pub enum DayMasterCombination {
    /// 天干五合
    Best = 0,
    /// 相生相助
    Good = 1,
    /// 普通
    #[default]
    Plain = 2,
}

/// 日主配合分析
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DayMasterAnalysis {
    pub score: u8,
    pub strength_a: Strength,
    pub strength_b: Strength,
    pub combination: DayMasterCombination,
    pub description: String,
    pub advice: Vec<String>,
}

/// 四柱对应分析
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PillarsAnalysis {
    pub score: u8,
    pub year_match: u8,
    pub month_match: u8,
    pub day_match: u8,
    pub hour_match: u8,
    /// 六冲记录（仅作参考，不计分）
    pub clashes: Vec<String>,
    pub advice: Vec<String>,
}

/// 关键年龄运势同步程度
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq,
    Debug, Serialize,
)]
pub enum SyncLevel {
    High = 0,
    Medium = 1,
    Low = 2,
}

/// 关键年龄的大运对照
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KeyAgeSync {
    pub age: u8,
    pub level: SyncLevel,
    pub ganzhi_a: GanZhi,
    pub ganzhi_b: GanZhi,
}

/// 大运同步分析
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CyclesAnalysis {
    pub score: u8,
    pub start_age_score: u8,
    pub element_sync_score: u8,
    pub key_ages: Vec<KeyAgeSync>,
    pub advice: Vec<String>,
}

/// 合婚分项分析
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompatibilityAnalysis {
    pub five_elements: FiveElementsAnalysis,
    pub ten_gods: TenGodsAnalysis,
    pub day_master: DayMasterAnalysis,
    pub pillars: PillarsAnalysis,
    /// 未提供大运时为 `None`
    pub cycles: Option<CyclesAnalysis>,
    /// 各维度综合评语
    pub overall: Vec<String>,
}

/// 合婚结果
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompatibilityResult {
    pub overall_score: u8,
    pub level: CompatibilityLevel,
    pub analysis: CompatibilityAnalysis,
    pub recommendations: Vec<String>,
}

// ============================================================================
// 推荐
// ============================================================================

/// 推荐候选人
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedCandidate {
    /// 名次（从 1 开始）
    pub rank: u8,
    /// 合成的候选命盘
    pub chart: BaziChart,
    pub compatibility: CompatibilityResult,
    pub advantages: Vec<String>,
    pub considerations: Vec<String>,
}

impl RankedCandidate {
    pub fn score(&self) -> u8 {
        self.compatibility.overall_score
    }
}
