//! # 推荐算法
//!
//! 候选日主、季节组合、候选命盘合成，以及推荐结果的优势与注意事项文案。
//!
//! 算法复杂度: O(年份 × 日主 × 季节组合)，三者均有上限。

use bazi_chart::calculations::calculate_day_ganzhi;
use bazi_chart::{BaziChart, BirthInput, Gender, TianGan, WuXing};
use matchmaking_common::CompatibilityResult;

// ============================================================================
// 候选日主
// ============================================================================

/// 日主配偶对照表（阴阳相配、五行互补）
///
/// 按日主天干索引排列：甲 乙 丙 丁 戊 己 庚 辛 壬 癸
const SPOUSE_DAY_MASTERS: [[TianGan; 3]; 10] = [
    [TianGan::JI, TianGan::GENG, TianGan::XIN],   // 甲：阳木配阴土、阳金、阴金
    [TianGan::GENG, TianGan::WU, TianGan::XIN],   // 乙：阴木配阳金、阳土、阴金
    [TianGan::XIN, TianGan::REN, TianGan::GUI],   // 丙：阳火配阴金、阳水、阴水
    [TianGan::REN, TianGan::GENG, TianGan::GUI],  // 丁：阴火配阳水、阳金、阴水
    [TianGan::GUI, TianGan::JIA, TianGan::YI],    // 戊：阳土配阴水、阳木、阴木
    [TianGan::JIA, TianGan::REN, TianGan::GUI],   // 己：阴土配阳木、阳水、阴水
    [TianGan::YI, TianGan::BING, TianGan::DING],  // 庚：阳金配阴木、阳火、阴火
    [TianGan::BING, TianGan::WU, TianGan::DING],  // 辛：阴金配阳火、阳土、阴火
    [TianGan::DING, TianGan::WU, TianGan::JI],    // 壬：阳水配阴火、阳土、阴土
    [TianGan::WU, TianGan::BING, TianGan::DING],  // 癸：阴水配阳土、阳火、阴火
];

/// 查表得到的配偶日主
pub fn spouse_day_masters(rizhu: TianGan) -> [TianGan; 3] {
    SPOUSE_DAY_MASTERS[rizhu.index() as usize]
}

/// 候选日主集合
///
/// 命盘某一五行占比超过 `dominance_threshold` 时，改用克制该五行、
/// 以及被该五行所生（泄其气）的天干，阴阳与日主相反者优先；
/// 否则使用对照表。
pub fn candidate_day_masters(chart: &BaziChart, dominance_threshold: f64) -> Vec<TianGan> {
    let weights = chart.wuxing_weights();
    let dominant = weights.dominant();
    let ratio = weights.ratio(dominant);

    if ratio > dominance_threshold {
        let opposite = !chart.rizhu().is_yang();
        let candidates = vec![
            TianGan::from_wuxing(dominant.overcome_by(), opposite),
            TianGan::from_wuxing(dominant.generates(), opposite),
            TianGan::from_wuxing(dominant.overcome_by(), !opposite),
            TianGan::from_wuxing(dominant.generates(), !opposite),
        ];
        log::debug!(
            target: "recommendation",
            "🔮 {} 偏旺（{:.2}），候选日主改为 {:?}",
            dominant,
            ratio,
            candidates.iter().map(|g| g.label()).collect::<String>()
        );
        candidates
    } else {
        spouse_day_masters(chart.rizhu()).to_vec()
    }
}

// ============================================================================
// 季节组合
// ============================================================================

/// 代表某一五行当令的月份与时辰
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeasonCombo {
    pub month: u8,
    pub hour: u8,
    pub wuxing: WuXing,
}

/// 五行当令组合：卯月卯时、午月午时、辰月辰时、酉月酉时、子月子时
pub const SEASON_COMBOS: [SeasonCombo; 5] = [
    SeasonCombo { month: 3, hour: 6, wuxing: WuXing::Mu },
    SeasonCombo { month: 6, hour: 12, wuxing: WuXing::Huo },
    SeasonCombo { month: 4, hour: 8, wuxing: WuXing::Tu },
    SeasonCombo { month: 9, hour: 18, wuxing: WuXing::Jin },
    SeasonCombo { month: 12, hour: 0, wuxing: WuXing::Shui },
];

/// 取日范围：各月中旬，均在当月节气之后
const DAY_RANGE: core::ops::RangeInclusive<u8> = 11..=20;

/// 在当月中旬找出日干为 `target` 的日期
///
/// 连续十日恰好覆盖十天干，因此总能找到。
pub fn day_with_stem(year: u16, month: u8, target: TianGan) -> Option<u8> {
    DAY_RANGE
        .into_iter()
        .find(|&day| calculate_day_ganzhi(year, month, day).gan == target)
}

/// 合成一张候选命盘
///
/// 日主不等于 `target` 时返回 `None`。
pub fn synthesize_candidate(
    year: u16,
    combo: SeasonCombo,
    target: TianGan,
    gender: Gender,
) -> Option<BaziChart> {
    let day = day_with_stem(year, combo.month, target)?;
    let birth = BirthInput::new(year, combo.month, day, combo.hour).with_gender(gender);
    match BaziChart::compute(birth) {
        Ok(chart) if chart.rizhu() == target => Some(chart),
        Ok(_) => None,
        Err(e) => {
            log::warn!(target: "recommendation", "⚠️ 候选命盘 {}-{}-{} 无法排盘: {}", year, combo.month, day, e);
            None
        }
    }
}

// ============================================================================
// 文案
// ============================================================================

/// 匹配优势
pub fn advantages(result: &CompatibilityResult, threshold: u8) -> Vec<String> {
    let analysis = &result.analysis;
    let mut advantages = Vec::new();

    if analysis.five_elements.score >= threshold {
        advantages.push("五行相配良好，气场和谐".to_string());
    }
    if analysis.ten_gods.score >= threshold {
        advantages.push("十神互补，性格相投".to_string());
    }
    if analysis.day_master.score >= threshold {
        advantages.push("日主相配，命理基础稳固".to_string());
    }
    if analysis.pillars.score >= threshold {
        advantages.push("四柱协调，家庭关系和睦".to_string());
    }
    if result.overall_score >= 80 {
        advantages.push("总体匹配度极高，是理想伴侣".to_string());
    }

    if advantages.is_empty() {
        advantages.push("基础匹配度尚可，需要更多磨合".to_string());
    }
    advantages
}

/// 注意事项
pub fn considerations(result: &CompatibilityResult) -> Vec<String> {
    let analysis = &result.analysis;
    let mut considerations = Vec::new();

    if analysis.five_elements.score < 50 {
        considerations.push("五行略有冲突，需注意情绪调节".to_string());
    }
    if analysis.ten_gods.score < 50 {
        considerations.push("十神关系需要更多理解与包容".to_string());
    }
    if analysis.day_master.score < 50 {
        considerations.push("日主强弱差异较大，需相互支持".to_string());
    }

    if considerations.is_empty() {
        considerations.push("匹配度良好，继续保持沟通".to_string());
    }
    considerations
}
