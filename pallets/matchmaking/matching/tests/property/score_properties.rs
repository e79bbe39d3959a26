//! 合婚评分性质测试

use bazi_chart::{compute_chart, compute_decade_cycles, BaziChart, BirthInput, DaYunConfig, Gender};
use matchmaking_common::{CompatibilityLevel, CompatibilityScorer};
use matchmaking_matching::{score_compatibility, BaziMatcher};
use proptest::prelude::*;

fn birth() -> impl Strategy<Value = (u16, u8, u8, u8)> {
    (1900u16..=2100, 1u8..=12, 1u8..=28, 0u8..=23)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn overall_score_is_bounded((y1, m1, d1, h1) in birth(), (y2, m2, d2, h2) in birth()) {
        let a = compute_chart(y1, m1, d1, h1).unwrap();
        let b = compute_chart(y2, m2, d2, h2).unwrap();
        let result = score_compatibility(&a, &b);
        prop_assert!(result.overall_score <= 100);
        prop_assert_eq!(result.level, CompatibilityLevel::from_score(result.overall_score));
        prop_assert!(result.recommendations.len() >= 2);
        for score in [
            result.analysis.five_elements.score,
            result.analysis.ten_gods.score,
            result.analysis.day_master.score,
            result.analysis.pillars.score,
        ] {
            prop_assert!(score <= 100);
        }
    }

    #[test]
    fn scoring_is_deterministic((y1, m1, d1, h1) in birth(), (y2, m2, d2, h2) in birth()) {
        let a = compute_chart(y1, m1, d1, h1).unwrap();
        let b = compute_chart(y2, m2, d2, h2).unwrap();
        prop_assert_eq!(score_compatibility(&a, &b), score_compatibility(&a, &b));
    }

    #[test]
    fn cycle_score_is_bounded((y1, m1, d1, h1) in birth(), (y2, m2, d2, h2) in birth()) {
        let chart = |y, m, d, h, g| -> BaziChart {
            BaziChart::compute(BirthInput::new(y, m, d, h).with_gender(g)).unwrap()
        };
        let a = chart(y1, m1, d1, h1, Gender::Male);
        let b = chart(y2, m2, d2, h2, Gender::Female);
        let config = DaYunConfig::default();
        let cycles_a = compute_decade_cycles(&a, &config).unwrap();
        let cycles_b = compute_decade_cycles(&b, &config).unwrap();

        let result = BaziMatcher::default().score_with_cycles(&a, &b, &cycles_a, &cycles_b);
        let cycles = result.analysis.cycles.as_ref().unwrap();
        prop_assert!(cycles.score <= 100);
        prop_assert!(result.overall_score <= 100);
    }
}
