//! # 八字合婚 - 五行互补
//!
//! 以甲方五行为起点，考察其对乙方五行的生克：
//!
//! - 双方共有的五行每个 +10
//! - 甲方 X 生乙方 Y（双方各自存在）每条 +20
//! - 甲方 X 克乙方 Y 每条 -15
//! - 双方平均平衡度 × 20
//! - 同一五行一旺一弱 +5，同旺 -5，同弱 -3

use bazi_chart::{BaziChart, Strength, WuXing};
use matchmaking_common::FiveElementsAnalysis;

pub fn analyze_five_elements(a: &BaziChart, b: &BaziChart) -> FiveElementsAnalysis {
    let (wuxing_a, wuxing_b) = (a.wuxing(), b.wuxing());
    let has_a = |e: WuXing| wuxing_a.weights().get(e) > 0.0;
    let has_b = |e: WuXing| wuxing_b.weights().get(e) > 0.0;

    let mut score: i32 = 0;
    let mut generate_chains = Vec::new();
    let mut overcome_chains = Vec::new();
    let mut complementary = Vec::new();

    for e in WuXing::ALL {
        if has_a(e) && has_b(e) {
            score += 10;
        }
        if has_a(e) && has_b(e.generates()) {
            generate_chains.push(format!("{}→{}", e, e.generates()));
            score += 20;
        }
        if has_a(e) && has_b(e.overcomes()) {
            overcome_chains.push(format!("{}→{}", e, e.overcomes()));
            score -= 15;
        }

        match (wuxing_a.strength(e), wuxing_b.strength(e)) {
            (Strength::Strong, Strength::Weak) | (Strength::Weak, Strength::Strong) => {
                complementary.push(e.to_string());
                score += 5;
            }
            (Strength::Strong, Strength::Strong) => score -= 5,
            (Strength::Weak, Strength::Weak) => score -= 3,
            _ => {}
        }
    }

    let balance = (wuxing_a.balance() + wuxing_b.balance()) / 2.0;
    score += (balance * 20.0).round() as i32;

    let mut advice = Vec::new();
    if !generate_chains.is_empty() {
        advice.push(format!("五行相生关系良好：{}", generate_chains.join("，")));
    }
    if !overcome_chains.is_empty() {
        advice.push(format!("需要注意五行相克：{}", overcome_chains.join("，")));
    }
    if !complementary.is_empty() {
        advice.push(format!("五行旺弱互补：{}", complementary.join("、")));
    }
    if balance > 0.7 {
        advice.push("双方五行平衡度较好".to_string());
    }

    FiveElementsAnalysis {
        score: score.clamp(0, 100) as u8,
        generate_chains,
        overcome_chains,
        complementary,
        balance,
        advice,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazi_chart::compute_chart;

    #[test]
    fn test_identical_sample_charts() {
        let chart = compute_chart(1990, 5, 15, 14).unwrap();
        let analysis = analyze_five_elements(&chart, &chart);
        // 共有 5 × 10 + 相生 5 × 20 - 相克 5 × 15 + 平衡 1 - 同旺同弱 11
        assert_eq!(analysis.score, 65);
        assert_eq!(analysis.generate_chains.len(), 5);
        assert_eq!(analysis.overcome_chains.len(), 5);
        assert!(analysis.complementary.is_empty());
        assert_eq!(analysis.advice.len(), 2);
    }

    #[test]
    fn test_score_is_clamped() {
        let a = compute_chart(1990, 5, 15, 14).unwrap();
        let b = compute_chart(1984, 2, 5, 12).unwrap();
        let analysis = analyze_five_elements(&a, &b);
        assert!(analysis.score <= 100);
        assert!((0.0..=1.0).contains(&analysis.balance));
    }
}
