//! # 八字合婚 - 干支关系与柱对柱评分
//!
//! ## 天干地支索引
//!
//! - 天干: 甲(0) 乙(1) 丙(2) 丁(3) 戊(4) 己(5) 庚(6) 辛(7) 壬(8) 癸(9)
//! - 地支: 子(0) 丑(1) 寅(2) 卯(3) 辰(4) 巳(5) 午(6) 未(7) 申(8) 酉(9) 戌(10) 亥(11)
//!
//! ## 单柱相配分值
//!
//! | 关系 | 分值 |
//! |------|------|
//! | 天干相同 | +10 |
//! | 天干五行相生 | +8 |
//! | 天干五合 | +12 |
//! | 地支六合 | +15 |
//! | 地支三合 | +12 |
//! | 地支五行相生 | +6 |
//! | 天干 / 地支五行不相克 | 各 +3 |
//!
//! 单柱上限 25 分；日柱计两倍。

use bazi_chart::{BaziChart, DiZhi, GanZhi, Strength, TianGan, WuXing};
use matchmaking_common::{DayMasterAnalysis, DayMasterCombination, PillarsAnalysis};

/// 单柱相配上限
pub const PILLAR_MATCH_CAP: u8 = 25;

// ============================================================================
// 关系表
// ============================================================================

/// 天干五合对照表
/// 甲己合、乙庚合、丙辛合、丁壬合、戊癸合
const TIANGAN_HE_PAIRS: [(u8, u8); 5] = [
    (0, 5), // 甲己合
    (1, 6), // 乙庚合
    (2, 7), // 丙辛合
    (3, 8), // 丁壬合
    (4, 9), // 戊癸合
];

/// 日主良好组合（异性相生）
const TIANGAN_GOOD_PAIRS: [(u8, u8); 10] = [
    (0, 9), // 甲癸
    (1, 8), // 乙壬
    (2, 1), // 丙乙
    (3, 0), // 丁甲
    (4, 3), // 戊丁
    (5, 2), // 己丙
    (6, 5), // 庚己
    (7, 4), // 辛戊
    (8, 7), // 壬辛
    (9, 6), // 癸庚
];

/// 地支六合对照表
/// 子丑合、寅亥合、卯戌合、辰酉合、巳申合、午未合
const DIZHI_LIUHE_PAIRS: [(u8, u8); 6] = [
    (0, 1),  // 子丑合
    (2, 11), // 寅亥合
    (3, 10), // 卯戌合
    (4, 9),  // 辰酉合
    (5, 8),  // 巳申合
    (6, 7),  // 午未合
];

/// 地支三合局
/// 申子辰水局、寅午戌火局、巳酉丑金局、亥卯未木局
const DIZHI_SANHE_GROUPS: [[u8; 3]; 4] = [
    [8, 0, 4],  // 申子辰
    [2, 6, 10], // 寅午戌
    [5, 9, 1],  // 巳酉丑
    [11, 3, 7], // 亥卯未
];

/// 地支六冲对照表
/// 子午冲、丑未冲、寅申冲、卯酉冲、辰戌冲、巳亥冲
const DIZHI_LIUCHONG_PAIRS: [(u8, u8); 6] = [
    (0, 6),  // 子午冲
    (1, 7),  // 丑未冲
    (2, 8),  // 寅申冲
    (3, 9),  // 卯酉冲
    (4, 10), // 辰戌冲
    (5, 11), // 巳亥冲
];

fn in_pairs(pairs: &[(u8, u8)], a: u8, b: u8) -> bool {
    pairs
        .iter()
        .any(|&(x, y)| (a == x && b == y) || (a == y && b == x))
}

/// 检查天干是否五合
pub fn is_tiangan_he(stem1: TianGan, stem2: TianGan) -> bool {
    in_pairs(&TIANGAN_HE_PAIRS, stem1.index(), stem2.index())
}

/// 检查日主是否为良好组合
pub fn is_tiangan_good(stem1: TianGan, stem2: TianGan) -> bool {
    in_pairs(&TIANGAN_GOOD_PAIRS, stem1.index(), stem2.index())
}

/// 检查地支是否六合
pub fn is_dizhi_liuhe(branch1: DiZhi, branch2: DiZhi) -> bool {
    in_pairs(&DIZHI_LIUHE_PAIRS, branch1.index(), branch2.index())
}

/// 检查地支是否三合（同局不同支）
pub fn is_dizhi_sanhe(branch1: DiZhi, branch2: DiZhi) -> bool {
    branch1 != branch2
        && DIZHI_SANHE_GROUPS.iter().any(|group| {
            group.contains(&branch1.index()) && group.contains(&branch2.index())
        })
}

/// 检查地支是否六冲
pub fn is_dizhi_liuchong(branch1: DiZhi, branch2: DiZhi) -> bool {
    in_pairs(&DIZHI_LIUCHONG_PAIRS, branch1.index(), branch2.index())
}

/// 检查五行是否相生
pub fn is_wuxing_sheng(from: WuXing, to: WuXing) -> bool {
    from.generates() == to
}

/// 检查五行是否相克
pub fn is_wuxing_ke(from: WuXing, to: WuXing) -> bool {
    from.overcomes() == to
}

/// 任一方向相生
pub fn is_mutual_sheng(a: WuXing, b: WuXing) -> bool {
    is_wuxing_sheng(a, b) || is_wuxing_sheng(b, a)
}

/// 任一方向相克
pub fn is_mutual_ke(a: WuXing, b: WuXing) -> bool {
    is_wuxing_ke(a, b) || is_wuxing_ke(b, a)
}

// ============================================================================
// 四柱对应
// ============================================================================

/// 单柱相配度（0-25）
pub fn calculate_pillar_match(pillar1: GanZhi, pillar2: GanZhi) -> u8 {
    let (stem1, stem2) = (pillar1.gan, pillar2.gan);
    let (branch1, branch2) = (pillar1.zhi, pillar2.zhi);
    let mut score = 0u8;

    if stem1 == stem2 {
        score += 10;
    }
    if is_mutual_sheng(stem1.to_wuxing(), stem2.to_wuxing()) {
        score += 8;
    }
    if is_tiangan_he(stem1, stem2) {
        score += 12;
    }
    if is_dizhi_liuhe(branch1, branch2) {
        score += 15;
    }
    if is_dizhi_sanhe(branch1, branch2) {
        score += 12;
    }
    if is_mutual_sheng(branch1.to_wuxing(), branch2.to_wuxing()) {
        score += 6;
    }
    if !is_mutual_ke(stem1.to_wuxing(), stem2.to_wuxing()) {
        score += 3;
    }
    if !is_mutual_ke(branch1.to_wuxing(), branch2.to_wuxing()) {
        score += 3;
    }

    score.min(PILLAR_MATCH_CAP)
}

/// 四柱相配分析：年、月、时各计一次，日柱计两倍
pub fn analyze_pillars(a: &BaziChart, b: &BaziChart) -> PillarsAnalysis {
    let names = ["年柱", "月柱", "日柱", "时柱"];
    let pillars_a = a.sizhu().pillars();
    let pillars_b = b.sizhu().pillars();

    let matches: [u8; 4] =
        core::array::from_fn(|i| calculate_pillar_match(pillars_a[i], pillars_b[i]));
    let [year_match, month_match, day_match, hour_match] = matches;

    let total = year_match as u32 + month_match as u32 + day_match as u32 * 2 + hour_match as u32;

    let clashes = (0..4)
        .filter(|&i| is_dizhi_liuchong(pillars_a[i].zhi, pillars_b[i].zhi))
        .map(|i| format!("{}{}{}相冲", names[i], pillars_a[i].zhi, pillars_b[i].zhi))
        .collect();

    let mut advice = Vec::new();
    if year_match > 15 {
        advice.push("年柱相配，家庭背景相似".to_string());
    }
    if month_match > 15 {
        advice.push("月柱相配，性格特点互补".to_string());
    }
    if day_match > 15 {
        advice.push("日柱相配，婚姻基础牢固".to_string());
    }
    if hour_match > 15 {
        advice.push("时柱相配，晚年生活和谐".to_string());
    }

    PillarsAnalysis {
        score: total.min(100) as u8,
        year_match,
        month_match,
        day_match,
        hour_match,
        clashes,
        advice,
    }
}

// ============================================================================
// 日主配合
// ============================================================================

/// 日主配合分析
///
/// 基础 50 分；五合 +30，良好组合 +15；
/// 旺衰搭配：甲方旺乙方弱 +10，甲方弱乙方旺 +5，旺衰相同 +8。
pub fn analyze_day_master(a: &BaziChart, b: &BaziChart) -> DayMasterAnalysis {
    let (rizhu_a, rizhu_b) = (a.rizhu(), b.rizhu());
    let mut score = 50u8;

    let combination = if is_tiangan_he(rizhu_a, rizhu_b) {
        score += 30;
        DayMasterCombination::Best
    } else if is_tiangan_good(rizhu_a, rizhu_b) {
        score += 15;
        DayMasterCombination::Good
    } else {
        DayMasterCombination::Plain
    };

    let mut description = match combination {
        DayMasterCombination::Best => format!("{}{}相配（最佳组合）", rizhu_a, rizhu_b),
        DayMasterCombination::Good => format!("{}{}相配（良好组合）", rizhu_a, rizhu_b),
        DayMasterCombination::Plain => format!("{}{}组合", rizhu_a, rizhu_b),
    };

    let (strength_a, strength_b) = (a.rizhu_strength(), b.rizhu_strength());
    match (strength_a, strength_b) {
        (Strength::Strong, Strength::Weak) => {
            score += 10;
            description.push_str("，甲方强乙方弱");
        }
        (Strength::Weak, Strength::Strong) => {
            score += 5;
            description.push_str("，甲方弱乙方强");
        }
        (x, y) if x == y => {
            score += 8;
            description.push_str("，强弱相当");
        }
        _ => {}
    }

    DayMasterAnalysis {
        score: score.min(100),
        strength_a,
        strength_b,
        combination,
        advice: vec![description.clone()],
        description,
    }
}
