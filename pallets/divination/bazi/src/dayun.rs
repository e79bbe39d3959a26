//! # 大运与流年
//!
//! ## 大运方向
//!
//! 阳男阴女顺排，阴男阳女逆排。大运干支由月柱按方向逐步推移。
//!
//! ## 起运岁数
//!
//! - `StartAgeMode::SolarTerm`：顺排量出生到下一个「节」，逆排量到上一个「节」，
//!   三天折一年、一天折四个月、一个时辰折十天
//! - `StartAgeMode::Fixed(n)`：固定 n 岁起运
//!
//! ## 流年
//!
//! 流年干支按公历年取 `(年 - 4) mod 60`，并标注所在大运。

use serde::{Deserialize, Serialize};

use crate::calculations::calculate_year_ganzhi;
use crate::chart::BaziChart;
use crate::error::{Error, InputField, Result, ValidationError};
use crate::shishen::{calculate_shishen, pillar_ten_gods, TenGod, TenGodSource};
use crate::solar;
use crate::types::{Estimate, GanZhi, Gender, TianGan};
use crate::wuxing::WuXingWeights;

// ============================================================================
// 配置
// ============================================================================

/// 起运岁数模式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartAgeMode {
	/// 按节气精确推算
	#[default]
	SolarTerm,
	/// 固定岁数
	Fixed(u8),
}

/// 大运配置
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DaYunConfig {
	pub start_age: StartAgeMode,
	/// 大运步数
	pub steps: u8,
	/// 流年推算截止岁数（含）
	pub max_age: u8,
}

impl DaYunConfig {
	/// 至少排一步大运
	pub fn validate(&self) -> Result<(), ValidationError> {
		if self.steps == 0 {
			return Err(ValidationError::out_of_range(
				InputField::DaYunSteps,
				0,
				1,
				u8::MAX as i64,
			));
		}
		Ok(())
	}
}

impl Default for DaYunConfig {
	fn default() -> Self {
		Self {
			start_age: StartAgeMode::SolarTerm,
			steps: 8,
			max_age: 100,
		}
	}
}

// ============================================================================
// 方向与起运
// ============================================================================

/// 大运方向
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DaYunDirection {
	Forward,
	Backward,
}

impl DaYunDirection {
	pub fn sign(self) -> i64 {
		match self {
			DaYunDirection::Forward => 1,
			DaYunDirection::Backward => -1,
		}
	}
}

/// 阳男阴女顺排，阴男阳女逆排
pub fn dayun_direction(gender: Gender, rizhu: TianGan) -> DaYunDirection {
	if (gender == Gender::Male) == rizhu.is_yang() {
		DaYunDirection::Forward
	} else {
		DaYunDirection::Backward
	}
}

/// 起运岁数
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StartAge {
	pub years: u8,
	pub months: u8,
	pub days: u8,
	/// 折算后的总岁数
	pub total_years: f64,
}

impl StartAge {
	pub fn fixed(years: u8) -> Self {
		Self {
			years,
			months: 0,
			days: 0,
			total_years: years as f64,
		}
	}

	/// 由出生到节的天数折算：3 天 = 1 年
	pub fn from_days(days: f64) -> Self {
		let days = days.abs();
		let total_years = days / 3.0;
		let years = total_years.floor();
		let total_months = (days - years * 3.0) * 4.0;
		let months = total_months.floor();
		let rest_days = ((total_months - months) * 30.0).floor().min(29.0);
		Self {
			years: years as u8,
			months: months as u8,
			days: rest_days as u8,
			total_years,
		}
	}
}

/// 计算起运岁数
pub fn calculate_start_age(
	chart: &BaziChart,
	direction: DaYunDirection,
	mode: StartAgeMode,
) -> Estimate<StartAge> {
	match mode {
		StartAgeMode::Fixed(years) => Estimate::exact(StartAge::fixed(years)),
		StartAgeMode::SolarTerm => {
			let birth = chart.birth_instant();
			let jie = match direction {
				DaYunDirection::Forward => solar::next_jie(birth),
				DaYunDirection::Backward => solar::previous_jie(birth),
			};
			jie.map(|jie| StartAge::from_days(jie.julian_day - birth))
		}
	}
}

// ============================================================================
// 大运
// ============================================================================

/// 一步大运
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DaYun {
	/// 第几步（从 0 开始）
	pub index: u8,
	pub start_age: f64,
	pub end_age: f64,
	pub start_year: i32,
	pub ganzhi: GanZhi,
	/// 大运天干的十神
	pub ten_god: TenGod,
	/// 干支五行各计 1
	pub wuxing: WuXingWeights,
}

impl DaYun {
	pub fn contains_age(&self, age: f64) -> bool {
		self.start_age <= age && age < self.end_age
	}
}

/// 排大运
pub fn compute_decade_cycles(chart: &BaziChart, config: &DaYunConfig) -> Result<Vec<DaYun>> {
	config.validate()?;
	let gender = chart.gender().ok_or(ValidationError::MissingGender)?;
	let rizhu = chart.rizhu();
	let direction = dayun_direction(gender, rizhu);
	let start = calculate_start_age(chart, direction, config.start_age);
	if start.degraded {
		log::warn!(target: "bazi", "⚠️ 起运岁数为降级估算");
	}
	let month_zhu = chart.sizhu().month_zhu;
	let birth_year = chart.birth().year as i32;

	let cycles = (0..config.steps)
		.map(|i| {
			let start_age = start.value.total_years + 10.0 * i as f64;
			let ganzhi = month_zhu.offset(direction.sign() * (i as i64 + 1));
			DaYun {
				index: i,
				start_age,
				end_age: start_age + 10.0,
				start_year: birth_year + start_age.floor() as i32,
				ganzhi,
				ten_god: TenGod {
					gan: ganzhi.gan,
					shishen: calculate_shishen(rizhu, ganzhi.gan),
					source: TenGodSource::Stem,
				},
				wuxing: WuXingWeights::single(ganzhi.gan.to_wuxing(), 1.0)
					+ WuXingWeights::single(ganzhi.zhi.to_wuxing(), 1.0),
			}
		})
		.collect::<Vec<_>>();

	log::debug!(
		target: "bazi",
		"🔮 大运: {:?} 起运 {:.2} 岁，共 {} 步",
		direction,
		start.value.total_years,
		cycles.len()
	);
	Ok(cycles)
}

// ============================================================================
// 流年
// ============================================================================

/// 一年流年
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LiuNian {
	pub age: u8,
	pub year: i32,
	pub ganzhi: GanZhi,
	/// 流年天干与藏干的十神
	pub ten_gods: Vec<TenGod>,
	/// 流年天干五行
	pub wuxing: WuXingWeights,
	/// 所在大运步数；超出大运范围为 `None`
	pub dayun_index: Option<u8>,
}

/// 流年干支
pub fn year_ganzhi(year: i32) -> GanZhi {
	calculate_year_ganzhi(year)
}

fn liunian(rizhu: TianGan, year: i32, age: u8, dayun_index: Option<u8>) -> LiuNian {
	let ganzhi = year_ganzhi(year);
	LiuNian {
		age,
		year,
		ganzhi,
		ten_gods: pillar_ten_gods(rizhu, ganzhi),
		wuxing: WuXingWeights::single(ganzhi.gan.to_wuxing(), 1.0),
		dayun_index,
	}
}

/// 从 `start_year`（对应 `start_age` 岁）起连续推算 `count` 年流年
pub fn compute_annual_cycles(
	rizhu: TianGan,
	start_year: i32,
	start_age: u8,
	count: u8,
) -> Vec<LiuNian> {
	(0..count)
		.map(|offset| {
			let age = start_age.saturating_add(offset);
			liunian(rizhu, start_year + offset as i32, age, None)
		})
		.collect()
}

/// 按命盘与大运推算流年：从首步大运起运岁数到 `max_age`
pub fn annual_cycles_for_chart(
	chart: &BaziChart,
	dayun: &[DaYun],
	config: &DaYunConfig,
) -> Result<Vec<LiuNian>> {
	let first = dayun.first().ok_or(Error::EmptyDaYun)?;
	let birth_year = chart.birth().year as i32;
	let first_age = first.start_age.floor().clamp(0.0, u8::MAX as f64) as u8;

	Ok((first_age..=config.max_age)
		.map(|age| {
			let index = dayun
				.iter()
				.find(|d| d.contains_age(age as f64))
				.map(|d| d.index);
			liunian(chart.rizhu(), birth_year + age as i32, age, index)
		})
		.collect())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::chart::BirthInput;
	use crate::types::ShiShen;
	use approx::assert_abs_diff_eq;

	fn chart(gender: Gender) -> BaziChart {
		BaziChart::compute(BirthInput::new(1990, 5, 15, 14).with_gender(gender)).unwrap()
	}

	#[test]
	fn test_direction_rules() {
		assert_eq!(dayun_direction(Gender::Male, TianGan::GENG), DaYunDirection::Forward);
		assert_eq!(dayun_direction(Gender::Female, TianGan::GENG), DaYunDirection::Backward);
		assert_eq!(dayun_direction(Gender::Male, TianGan::XIN), DaYunDirection::Backward);
		assert_eq!(dayun_direction(Gender::Female, TianGan::XIN), DaYunDirection::Forward);
	}

	#[test]
	fn test_start_age_breakdown() {
		let age = StartAge::from_days(7.5);
		assert_eq!((age.years, age.months, age.days), (2, 6, 0));
		assert_abs_diff_eq!(age.total_years, 2.5);
	}

	#[test]
	fn test_forward_start_age_measures_to_next_jie() {
		let male = chart(Gender::Male);
		let start = calculate_start_age(&male, DaYunDirection::Forward, StartAgeMode::SolarTerm);
		assert!(!start.degraded);
		assert_abs_diff_eq!(start.value.total_years, 7.2, epsilon = 0.1);
		assert_eq!(start.value.years, 7);
	}

	#[test]
	fn test_backward_start_age_measures_to_previous_jie() {
		let female = chart(Gender::Female);
		let start = calculate_start_age(&female, DaYunDirection::Backward, StartAgeMode::SolarTerm);
		assert_abs_diff_eq!(start.value.total_years, 3.16, epsilon = 0.1);
		assert_eq!(start.value.years, 3);
	}

	#[test]
	fn test_decade_pillars_step_from_month_pillar() {
		// 月柱辛巳：顺排壬午、癸未…，逆排庚辰、己卯…
		let forward = compute_decade_cycles(&chart(Gender::Male), &DaYunConfig::default()).unwrap();
		assert_eq!(forward.len(), 8);
		assert_eq!(forward[0].ganzhi.to_string(), "壬午");
		assert_eq!(forward[1].ganzhi.to_string(), "癸未");
		assert_eq!(forward[0].ten_god.shishen, ShiShen::ShiShen);

		let backward = compute_decade_cycles(&chart(Gender::Female), &DaYunConfig::default()).unwrap();
		assert_eq!(backward[0].ganzhi.to_string(), "庚辰");
		assert_eq!(backward[1].ganzhi.to_string(), "己卯");
	}

	#[test]
	fn test_decade_ages_are_ten_years_apart() {
		let cycles = compute_decade_cycles(&chart(Gender::Male), &DaYunConfig::default()).unwrap();
		for pair in cycles.windows(2) {
			assert_abs_diff_eq!(pair[1].start_age - pair[0].start_age, 10.0);
		}
		assert_eq!(cycles[0].start_year, 1997);
	}

	#[test]
	fn test_fixed_start_age_mode() {
		let config = DaYunConfig {
			start_age: StartAgeMode::Fixed(8),
			..Default::default()
		};
		let cycles = compute_decade_cycles(&chart(Gender::Male), &config).unwrap();
		assert_abs_diff_eq!(cycles[0].start_age, 8.0);
		assert_abs_diff_eq!(cycles[3].start_age, 38.0);
	}

	#[test]
	fn test_missing_gender_is_rejected() {
		let chart = BaziChart::compute(BirthInput::new(1990, 5, 15, 14)).unwrap();
		assert_eq!(
			compute_decade_cycles(&chart, &DaYunConfig::default()),
			Err(Error::Validation(ValidationError::MissingGender))
		);
	}

	#[test]
	fn test_zero_steps_is_rejected() {
		let config: DaYunConfig = serde_json::from_str(r#"{"steps":0}"#).unwrap();
		assert_eq!(
			compute_decade_cycles(&chart(Gender::Male), &config),
			Err(Error::Validation(ValidationError::OutOfRange {
				field: InputField::DaYunSteps,
				value: 0,
				min: 1,
				max: 255,
			}))
		);

		let one = DaYunConfig { steps: 1, ..Default::default() };
		assert_eq!(compute_decade_cycles(&chart(Gender::Male), &one).unwrap().len(), 1);
	}

	#[test]
	fn test_annual_cycles_are_consecutive() {
		let years = compute_annual_cycles(TianGan::GENG, 2024, 34, 3);
		assert_eq!(years.len(), 3);
		assert_eq!(years[0].ganzhi.to_string(), "甲辰");
		assert_eq!(years[1].ganzhi.to_string(), "乙巳");
		assert_eq!(years[2].age, 36);
		assert_eq!(years[0].ten_gods[0].shishen, ShiShen::PianYin);
	}

	#[test]
	fn test_annual_cycles_for_chart_cover_lifetime() {
		let chart = chart(Gender::Male);
		let config = DaYunConfig::default();
		let dayun = compute_decade_cycles(&chart, &config).unwrap();
		let years = annual_cycles_for_chart(&chart, &dayun, &config).unwrap();
		assert_eq!(years.first().unwrap().age, 7);
		assert_eq!(years.last().unwrap().age, 100);
		assert_eq!(years.first().unwrap().year, 1997);
		// 起运约 7.2 岁，7 岁尚未入运
		assert_eq!(years[0].dayun_index, None);
		assert_eq!(years[1].dayun_index, Some(0));
		// 8 步大运止于约 87 岁
		assert_eq!(years.last().unwrap().dayun_index, None);
	}

	#[test]
	fn test_annual_pillars_follow_year_rule_not_direction() {
		// 逆排命盘：流年仍逐年顺推，与按大运方向自日柱递推的旧算法不同
		let chart = chart(Gender::Female);
		let config = DaYunConfig::default();
		let dayun = compute_decade_cycles(&chart, &config).unwrap();
		let years = annual_cycles_for_chart(&chart, &dayun, &config).unwrap();

		assert_eq!(years[0].year, 1993);
		assert_eq!(years[0].ganzhi.to_string(), "癸酉");
		assert_eq!(years[1].ganzhi.to_string(), "甲戌");
		assert_eq!(years[0].ganzhi, calculate_year_ganzhi(1993));

		let sign = dayun_direction(Gender::Female, chart.rizhu()).sign();
		let stepped: Vec<String> = (0..2)
			.map(|i| chart.sizhu().day_zhu.offset(sign * i).to_string())
			.collect();
		assert_eq!(stepped, vec!["庚辰", "己卯"]);
		assert!(years.iter().zip(&stepped).all(|(y, s)| y.ganzhi.to_string() != *s));
	}

	#[test]
	fn test_annual_cycles_require_dayun() {
		let chart = chart(Gender::Male);
		assert_eq!(
			annual_cycles_for_chart(&chart, &[], &DaYunConfig::default()),
			Err(Error::EmptyDaYun)
		);
	}

	#[test]
	fn test_config_deserializes_with_defaults() {
		let config: DaYunConfig = serde_json::from_str(r#"{"start_age":{"fixed":3}}"#).unwrap();
		assert_eq!(config.start_age, StartAgeMode::Fixed(3));
		assert_eq!(config.steps, 8);
		assert!(serde_json::from_str::<DaYunConfig>(r#"{"stepz":1}"#).is_err());
	}
}
