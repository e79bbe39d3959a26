//! # 八字合婚 - 大运同步
//!
//! - 起运差：`max(0, 100 - 差值 × 10)`
//! - 五行同步：逐步对照大运天干五行，相生 100、相同 70、相克 30，取平均
//! - 关键年龄 20/25/30/35/40：双方都在运内时按同样规则评高、中、低
//!
//! 综合分 = 起运差 40% + 五行同步 60%

use bazi_chart::{DaYun, WuXing};
use matchmaking_common::{CyclesAnalysis, KeyAgeSync, SyncLevel};

use crate::bazi::{is_mutual_ke, is_mutual_sheng};

/// 关键年龄
pub const KEY_AGES: [u8; 5] = [20, 25, 30, 35, 40];

/// 大运天干五行对照分
fn element_sync(a: WuXing, b: WuXing) -> u8 {
    if is_mutual_sheng(a, b) {
        100
    } else if a == b {
        70
    } else if is_mutual_ke(a, b) {
        30
    } else {
        50
    }
}

fn sync_level(a: WuXing, b: WuXing) -> SyncLevel {
    if is_mutual_sheng(a, b) {
        SyncLevel::High
    } else if is_mutual_ke(a, b) {
        SyncLevel::Low
    } else {
        SyncLevel::Medium
    }
}

pub fn analyze_cycles(cycles_a: &[DaYun], cycles_b: &[DaYun]) -> CyclesAnalysis {
    let start_age_score = match (cycles_a.first(), cycles_b.first()) {
        (Some(a), Some(b)) => {
            let diff = (a.start_age - b.start_age).abs();
            (100.0 - diff * 10.0).max(0.0).round() as u8
        }
        _ => 0,
    };

    let overlap: Vec<u32> = cycles_a
        .iter()
        .zip(cycles_b)
        .map(|(a, b)| element_sync(a.ganzhi.gan.to_wuxing(), b.ganzhi.gan.to_wuxing()) as u32)
        .collect();
    let element_sync_score = if overlap.is_empty() {
        50
    } else {
        (overlap.iter().sum::<u32>() as f64 / overlap.len() as f64).round() as u8
    };

    let key_ages: Vec<KeyAgeSync> = KEY_AGES
        .iter()
        .filter_map(|&age| {
            let at = |cycles: &[DaYun]| cycles.iter().find(|d| d.contains_age(age as f64)).map(|d| d.ganzhi);
            let (ganzhi_a, ganzhi_b) = (at(cycles_a)?, at(cycles_b)?);
            Some(KeyAgeSync {
                age,
                level: sync_level(ganzhi_a.gan.to_wuxing(), ganzhi_b.gan.to_wuxing()),
                ganzhi_a,
                ganzhi_b,
            })
        })
        .collect();

    let score = (start_age_score as f64 * 0.4 + element_sync_score as f64 * 0.6).round() as u8;

    let mut advice = Vec::new();
    if start_age_score >= 80 {
        advice.push("起运时间接近，人生节奏同步".to_string());
    }
    if element_sync_score >= 70 {
        advice.push("大运五行相生相助，运势互相扶持".to_string());
    } else if element_sync_score < 50 {
        advice.push("大运五行多有相克，关键年份需多沟通".to_string());
    }
    let high: Vec<String> = key_ages
        .iter()
        .filter(|k| k.level == SyncLevel::High)
        .map(|k| k.age.to_string())
        .collect();
    if !high.is_empty() {
        advice.push(format!("{}岁前后运势同步", high.join("、")));
    }

    CyclesAnalysis {
        score: score.min(100),
        start_age_score,
        element_sync_score,
        key_ages,
        advice,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazi_chart::{compute_decade_cycles, BaziChart, BirthInput, DaYunConfig, Gender};

    fn cycles(year: u16, month: u8, day: u8, hour: u8, gender: Gender) -> Vec<DaYun> {
        let chart = BaziChart::compute(BirthInput::new(year, month, day, hour).with_gender(gender)).unwrap();
        compute_decade_cycles(&chart, &DaYunConfig::default()).unwrap()
    }

    #[test]
    fn test_identical_cycles() {
        let a = cycles(1990, 5, 15, 14, Gender::Male);
        let analysis = analyze_cycles(&a, &a);
        assert_eq!(analysis.start_age_score, 100);
        assert_eq!(analysis.element_sync_score, 70);
        assert_eq!(analysis.score, 82);
        assert!(analysis.key_ages.iter().all(|k| k.level == SyncLevel::Medium));
    }

    #[test]
    fn test_key_ages_require_both_charts_in_cycle() {
        let a = cycles(1990, 5, 15, 14, Gender::Male);
        let b = cycles(1990, 5, 15, 14, Gender::Female);
        let analysis = analyze_cycles(&a, &b);
        assert_eq!(analysis.key_ages.len(), KEY_AGES.len());
        // 起运约 7.2 岁与 3.2 岁，相差约 4 年
        assert!((55..=65).contains(&analysis.start_age_score));
    }

    #[test]
    fn test_empty_cycles_score_neutral() {
        let analysis = analyze_cycles(&[], &[]);
        assert_eq!(analysis.start_age_score, 0);
        assert_eq!(analysis.element_sync_score, 50);
        assert!(analysis.key_ages.is_empty());
    }

    #[test]
    fn test_element_sync_table() {
        assert_eq!(element_sync(WuXing::Mu, WuXing::Huo), 100);
        assert_eq!(element_sync(WuXing::Huo, WuXing::Mu), 100);
        assert_eq!(element_sync(WuXing::Jin, WuXing::Jin), 70);
        assert_eq!(element_sync(WuXing::Jin, WuXing::Mu), 30);
    }
}
