//! # 八字合婚 - 十神配合
//!
//! 双方年、月、时三柱十神两两交叉（3 × 3），基础 50 分：
//!
//! | 组合 | 分值 |
//! |------|------|
//! | 官财、印食、比劫 | +15 |
//! | 杀印、伤官生财、偏财配官 | +10 |
//! | 双七杀、双伤官、双劫财 | -12 |
//! | 双比肩 | -3 |
//! | 其余相同十神 | +3 |

use bazi_chart::{BaziChart, ShiShen};
use matchmaking_common::TenGodsAnalysis;

/// 最佳互补组合
const BEST_PAIRS: [(ShiShen, ShiShen); 3] = [
    (ShiShen::ZhengGuan, ShiShen::ZhengCai), // 官财相配
    (ShiShen::ZhengYin, ShiShen::ShiShen),   // 印食相生
    (ShiShen::BiJian, ShiShen::JieCai),      // 比劫相助
];

/// 良好组合
const GOOD_PAIRS: [(ShiShen, ShiShen); 3] = [
    (ShiShen::QiSha, ShiShen::ZhengYin),    // 杀印相生
    (ShiShen::ShangGuan, ShiShen::ZhengCai), // 伤官生财
    (ShiShen::PianCai, ShiShen::ZhengGuan), // 偏财配官
];

/// 需要谨慎的组合（同一十神重叠）
const CAUTION_SHISHEN: [ShiShen; 3] = [ShiShen::QiSha, ShiShen::ShangGuan, ShiShen::JieCai];

fn in_pairs(pairs: &[(ShiShen, ShiShen)], a: ShiShen, b: ShiShen) -> bool {
    pairs
        .iter()
        .any(|&(x, y)| (a == x && b == y) || (a == y && b == x))
}

pub fn analyze_ten_gods(a: &BaziChart, b: &BaziChart) -> TenGodsAnalysis {
    let (gods_a, gods_b) = (a.ten_gods(), b.ten_gods());
    let mut score: i32 = 50;
    let mut complementary_pairs = Vec::new();
    let mut conflicting_pairs = Vec::new();

    for god_a in gods_a.iter().map(|g| g.shishen) {
        for god_b in gods_b.iter().map(|g| g.shishen) {
            if in_pairs(&BEST_PAIRS, god_a, god_b) {
                complementary_pairs.push(format!("{}与{}相配", god_a, god_b));
                score += 15;
            } else if in_pairs(&GOOD_PAIRS, god_a, god_b) {
                complementary_pairs.push(format!("{}与{}相配", god_a, god_b));
                score += 10;
            } else if god_a == god_b && CAUTION_SHISHEN.contains(&god_a) {
                conflicting_pairs.push(format!("双{}相争", god_a));
                score -= 12;
            } else if god_a == god_b && god_a == ShiShen::BiJian {
                score -= 3;
            } else if god_a == god_b {
                score += 3;
            }
        }
    }

    let mut advice = Vec::new();
    if !complementary_pairs.is_empty() {
        advice.push(format!("十神互补：{}", complementary_pairs.join("，")));
    }
    if !conflicting_pairs.is_empty() {
        advice.push(format!("十神冲突：{}", conflicting_pairs.join("，")));
    }

    TenGodsAnalysis {
        score: score.clamp(0, 100) as u8,
        complementary_pairs,
        conflicting_pairs,
        advice,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazi_chart::compute_chart;

    #[test]
    fn test_identical_sample_charts() {
        // 十神：比肩 劫财 伤官
        let chart = compute_chart(1990, 5, 15, 14).unwrap();
        let analysis = analyze_ten_gods(&chart, &chart);
        // 50 - 3(双比肩) + 15 × 2(比劫) - 12 × 2(双劫财、双伤官)
        assert_eq!(analysis.score, 53);
        assert_eq!(analysis.complementary_pairs.len(), 2);
        assert_eq!(analysis.conflicting_pairs, vec!["双劫财相争", "双伤官相争"]);
    }

    #[test]
    fn test_pair_lookup_is_unordered() {
        assert!(in_pairs(&BEST_PAIRS, ShiShen::ZhengCai, ShiShen::ZhengGuan));
        assert!(in_pairs(&GOOD_PAIRS, ShiShen::ZhengYin, ShiShen::QiSha));
        assert!(!in_pairs(&BEST_PAIRS, ShiShen::QiSha, ShiShen::QiSha));
    }
}
