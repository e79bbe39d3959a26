use crate::*;
use bazi_chart::{compute_chart, compute_decade_cycles, BirthInput, DaYunConfig, Gender};
use matchmaking_common::DayMasterCombination;

fn sample() -> BaziChart {
    compute_chart(1990, 5, 15, 14).unwrap()
}

fn with_gender(year: u16, month: u8, day: u8, hour: u8, gender: Gender) -> BaziChart {
    BaziChart::compute(BirthInput::new(year, month, day, hour).with_gender(gender)).unwrap()
}

// ==================== 权重配置 ====================

#[test]
fn test_default_weights_sum_to_one() {
    assert!(ScoringWeights::WITHOUT_CYCLES.validate().is_ok());
    assert!(ScoringWeights::WITH_CYCLES.validate().is_ok());
    assert!(MatchConfig::default().validate().is_ok());
}

#[test]
fn test_invalid_weights_rejected() {
    let config = MatchConfig {
        without_cycles: ScoringWeights {
            five_elements: 0.5,
            ten_gods: 0.5,
            day_master: 0.5,
            pillars: 0.0,
            cycles: 0.0,
        },
        ..Default::default()
    };
    match BaziMatcher::new(config) {
        Err(MatchError::InvalidWeights { sum }) => approx::assert_abs_diff_eq!(sum, 1.5),
        other => panic!("unexpected: {:?}", other.map(|m| m.config().clone())),
    }
}

#[test]
fn test_config_from_json() {
    let config: MatchConfig = serde_json::from_str(r#"{ "good_threshold": 60 }"#).unwrap();
    assert_eq!(config.good_threshold, 60);
    assert_eq!(config.with_cycles, ScoringWeights::WITH_CYCLES);

    let unknown = serde_json::from_str::<MatchConfig>(r#"{ "threshold": 60 }"#);
    assert!(unknown.is_err());
}

// ==================== 合婚评分 ====================

#[test]
fn test_identical_charts() {
    let chart = sample();
    let result = score_compatibility(&chart, &chart);

    // 30% × 65 + 25% × 53 + 25% × 58 + 20% × 80
    assert_eq!(result.analysis.five_elements.score, 65);
    assert_eq!(result.analysis.ten_gods.score, 53);
    assert_eq!(result.analysis.day_master.score, 58);
    assert_eq!(result.analysis.pillars.score, 80);
    assert_eq!(result.overall_score, 63);
    assert_eq!(result.level, CompatibilityLevel::Good);
    assert!(result.analysis.cycles.is_none());

    // 同干日主：普通组合 + 强弱相当
    assert_eq!(result.analysis.day_master.combination, DayMasterCombination::Plain);
    assert_eq!(result.analysis.day_master.strength_a, result.analysis.day_master.strength_b);
}

#[test]
fn test_identical_charts_recommendations() {
    let chart = sample();
    let result = score_compatibility(&chart, &chart);
    assert_eq!(result.recommendations[0], "八字相配度良好，有较好的婚姻基础");
    assert_eq!(result.recommendations[1], "需要相互理解和包容，共同成长");
    // 只有四柱达到良好线
    assert_eq!(result.analysis.overall, vec!["四柱搭配和谐"]);
    assert!(result.recommendations.contains(&"四柱搭配和谐".to_string()));
}

#[test]
fn test_score_with_cycles() {
    let chart = with_gender(1990, 5, 15, 14, Gender::Male);
    let cycles = compute_decade_cycles(&chart, &DaYunConfig::default()).unwrap();
    let matcher = BaziMatcher::default();
    let result = matcher.score_with_cycles(&chart, &chart, &cycles, &cycles);

    // 25% × 65 + 15% × 53 + 25% × 58 + 15% × 80 + 20% × 82
    assert_eq!(result.analysis.cycles.as_ref().map(|c| c.score), Some(82));
    assert_eq!(result.overall_score, 67);
    assert!(result.analysis.overall.contains(&"大运走势同步".to_string()));
}

#[test]
fn test_day_master_good_pair() {
    // 1984-02-05 日主己，1990-05-15 日主庚
    let a = compute_chart(1984, 2, 5, 12).unwrap();
    let b = sample();
    assert_eq!(a.rizhu(), bazi_chart::TianGan::JI);
    let result = score_compatibility(&a, &b);
    assert_eq!(result.analysis.day_master.combination, DayMasterCombination::Good);
    assert!(result.analysis.day_master.score >= 65);
    assert!(result.overall_score <= 100);
}

#[test]
fn test_custom_threshold_changes_notes() {
    let chart = sample();
    let config = MatchConfig {
        good_threshold: 50,
        ..Default::default()
    };
    let result = BaziMatcher::new(config).unwrap().score(&chart, &chart);
    assert_eq!(
        result.analysis.overall,
        vec!["五行相配度良好", "十神互补性较好", "日主组合适宜", "四柱搭配和谐"]
    );
}

#[test]
fn test_level_boundaries() {
    assert_eq!(CompatibilityLevel::from_score(80), CompatibilityLevel::Excellent);
    assert_eq!(CompatibilityLevel::from_score(79), CompatibilityLevel::Good);
    assert_eq!(CompatibilityLevel::from_score(60), CompatibilityLevel::Good);
    assert_eq!(CompatibilityLevel::from_score(59), CompatibilityLevel::Average);
    assert_eq!(CompatibilityLevel::from_score(19), CompatibilityLevel::Unsuitable);
}
