//! 配偶推荐性质测试

use bazi_chart::{compute_chart, Gender};
use matchmaking_recommendation::{recommend_counterparts, SearchConfig, SpouseRecommender, TraditionalAgePolicy};
use matchmaking_matching::BaziMatcher;
use proptest::prelude::*;

fn gender() -> impl Strategy<Value = Gender> {
    prop_oneof![Just(Gender::Male), Just(Gender::Female)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn search_respects_candidate_cap(
        year in 1900u16..=2100,
        month in 1u8..=12,
        day in 1u8..=28,
        hour in 0u8..=23,
        gender in gender(),
    ) {
        let chart = compute_chart(year, month, day, hour).unwrap();
        let ranked = recommend_counterparts(&chart, gender);
        prop_assert!(ranked.len() <= SearchConfig::default().max_candidates);
        for (i, candidate) in ranked.iter().enumerate() {
            prop_assert_eq!(candidate.rank as usize, i + 1);
            prop_assert_eq!(candidate.chart.gender(), Some(gender.opposite()));
            prop_assert!(candidate.score() <= 100);
        }
    }

    #[test]
    fn custom_cap_is_honoured(
        year in 1975u16..=2000,
        month in 1u8..=12,
        day in 1u8..=28,
        cap in 0usize..=12,
    ) {
        let chart = compute_chart(year, month, day, 12).unwrap();
        let config = SearchConfig { max_candidates: cap, ..Default::default() };
        let recommender = SpouseRecommender::new(BaziMatcher::default(), TraditionalAgePolicy::default(), config);
        prop_assert!(recommender.recommend(&chart, Gender::Male).len() <= cap);
    }
}
