//! 排盘性质测试

use bazi_chart::calculations::{calculate_day_ganzhi, days_in_month};
use bazi_chart::solar::{days_between, from_julian_day, to_julian_day};
use bazi_chart::{
	calculate_shishen, compute_chart, compute_decade_cycles, BaziChart, BirthInput, DaYunConfig,
	Gender, GanZhi, TianGan, WuXing,
};
use proptest::prelude::*;

fn birth() -> impl Strategy<Value = (u16, u8, u8, u8)> {
	(1900u16..=2100, 1u8..=12, 0u8..=23).prop_flat_map(|(year, month, hour)| {
		(Just(year), Just(month), 1..=days_in_month(year, month), Just(hour))
	})
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	#[test]
	fn every_valid_birth_produces_a_chart((year, month, day, hour) in birth()) {
		let chart = compute_chart(year, month, day, hour).unwrap();
		for pillar in chart.sizhu().pillars() {
			// 四柱都在六十甲子内
			prop_assert!(pillar.index().is_some());
		}
		prop_assert_eq!(chart.rizhu(), chart.sizhu().day_zhu.gan);
		prop_assert!(!chart.is_degraded());
	}

	#[test]
	fn day_pillar_advances_one_step_per_day((year, month, day, _hour) in birth()) {
		prop_assume!(day < days_in_month(year, month));
		let today = calculate_day_ganzhi(year, month, day);
		let tomorrow = calculate_day_ganzhi(year, month, day + 1);
		prop_assert_eq!(today.next(), tomorrow);
	}

	#[test]
	fn month_branch_matches_month_stem_rule((year, month, day, hour) in birth()) {
		let chart = compute_chart(year, month, day, hour).unwrap();
		let sizhu = chart.sizhu();
		let month_offset = (sizhu.month_zhu.zhi.index() as i64 - 2).rem_euclid(12);
		let start = (sizhu.year_zhu.gan.index() as i64 % 5) * 2 + 2;
		prop_assert_eq!(sizhu.month_zhu.gan, TianGan::from_cycle(start + month_offset));
	}

	#[test]
	fn ten_gods_are_total(a in 0u8..10, b in 0u8..10) {
		let rizhu = TianGan::from_index(a).unwrap();
		let other = TianGan::from_index(b).unwrap();
		let same = calculate_shishen(rizhu, other) == calculate_shishen(rizhu, rizhu);
		prop_assert_eq!(same, a == b);
	}

	#[test]
	fn decade_pillars_are_consecutive((year, month, day, hour) in birth(), male in any::<bool>()) {
		let gender = if male { Gender::Male } else { Gender::Female };
		let chart = BaziChart::compute(BirthInput::new(year, month, day, hour).with_gender(gender)).unwrap();
		let dayun = compute_decade_cycles(&chart, &DaYunConfig::default()).unwrap();
		prop_assert_eq!(dayun.len(), 8);
		let step = if dayun[0].ganzhi == chart.sizhu().month_zhu.next() { 1 } else { -1 };
		prop_assert_eq!(dayun[0].ganzhi, chart.sizhu().month_zhu.offset(step));
		for pair in dayun.windows(2) {
			prop_assert_eq!(pair[0].ganzhi.offset(step), pair[1].ganzhi);
		}
		prop_assert!(dayun[0].start_age >= 0.0 && dayun[0].start_age <= 11.0);
	}

	#[test]
	fn chart_is_deterministic((year, month, day, hour) in birth()) {
		let a = compute_chart(year, month, day, hour).unwrap();
		let b = compute_chart(year, month, day, hour).unwrap();
		prop_assert_eq!(a.sizhu(), b.sizhu());
		prop_assert_eq!(a.rizhu(), b.rizhu());
		for e in WuXing::ALL {
			prop_assert_eq!(a.wuxing_weights().get(e).to_bits(), b.wuxing_weights().get(e).to_bits());
		}
	}

	#[test]
	fn day_pillar_repeats_every_sixty_days((year, month, day, _hour) in birth()) {
		prop_assume!(year < 2100);
		// 取正午换算，避免跨日舍入
		let jd = to_julian_day(year as i32, month, day as f64 + 0.5).value;
		let later = from_julian_day(jd + 60.0);
		prop_assert_eq!(
			days_between((year as i32, month, day), (later.year, later.month, later.day)),
			60
		);
		prop_assert_eq!(
			calculate_day_ganzhi(year, month, day),
			calculate_day_ganzhi(later.year as u16, later.month, later.day)
		);
	}

	#[test]
	fn element_weights_are_conserved((year, month, day, hour) in birth()) {
		let chart = compute_chart(year, month, day, hour).unwrap();
		let weights = chart.wuxing_weights();
		prop_assert!(weights.total() > 0.0);
		prop_assert_eq!(weights.iter().count(), 5);
		for (e, w) in weights.iter() {
			prop_assert!(w.is_finite() && w >= 0.0, "{} = {}", e, w);
		}
		let analysis = chart.wuxing();
		prop_assert_eq!(analysis.counts().len(), 5);
		prop_assert!(analysis.weights().total() > 0.0);
	}

	#[test]
	fn balance_stays_in_unit_interval((year, month, day, hour) in birth()) {
		let chart = compute_chart(year, month, day, hour).unwrap();
		let balance = chart.wuxing().balance();
		prop_assert!((0.0..=1.0).contains(&balance));
		prop_assert!((0.0..=1.0).contains(&chart.wuxing_weights().balance()));
	}

	#[test]
	fn sexagenary_index_roundtrip(index in 0u8..60) {
		prop_assert_eq!(GanZhi::from_index(index).unwrap().index(), Some(index));
	}
}
