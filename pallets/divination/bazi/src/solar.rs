//! # 节气与儒略日
//!
//! 基于低精度太阳视黄经公式（误差约 0.01°）的节气求解。
//!
//! - 儒略日：公历日期 ↔ JD（格里高利历，JD 以世界时 0 时为 .5）
//! - 太阳黄经：平黄经 + 中心差
//! - 节气时刻：在估算日期 ±10 天内二分，按环绕差值收敛
//!
//! 所有 JD 均为世界时；出生时间按北京时间 (UTC+8) 换算。

use core::fmt;

use serde::Serialize;

use crate::constants::{BEIJING_UTC_OFFSET_HOURS, SOLAR_TERM_LABELS};
use crate::types::Estimate;

/// J2000.0 历元
pub const J2000: f64 = 2_451_545.0;
/// 非有限输入时返回的参考儒略日（2000-01-01 0h UT）
pub const REFERENCE_JULIAN_DAY: f64 = 2_451_544.5;
/// 非有限输入时返回的参考黄经（J2000 平黄经）
pub const REFERENCE_LONGITUDE: f64 = 280.466_46;
/// 二分收敛容差（度）
pub const LONGITUDE_TOLERANCE: f64 = 0.1;
/// 二分最大迭代次数
pub const MAX_BISECTION_STEPS: u32 = 20;

const SEARCH_WINDOW_DAYS: f64 = 10.0;
const TROPICAL_YEAR_DAYS: f64 = 365.2422;

// ============================================================================
// 节气
// ============================================================================

/// 二十四节气（立春 = 0 … 大寒 = 23）
///
/// 偶数索引为「节」，决定月柱交接；奇数索引为「气」。
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
pub enum SolarTerm {
	LiChun,
	YuShui,
	JingZhe,
	ChunFen,
	QingMing,
	GuYu,
	LiXia,
	XiaoMan,
	MangZhong,
	XiaZhi,
	XiaoShu,
	DaShu,
	LiQiu,
	ChuShu,
	BaiLu,
	QiuFen,
	HanLu,
	ShuangJiang,
	LiDong,
	XiaoXue,
	DaXue,
	DongZhi,
	XiaoHan,
	DaHan,
}

impl SolarTerm {
	pub const ALL: [SolarTerm; 24] = [
		SolarTerm::LiChun,
		SolarTerm::YuShui,
		SolarTerm::JingZhe,
		SolarTerm::ChunFen,
		SolarTerm::QingMing,
		SolarTerm::GuYu,
		SolarTerm::LiXia,
		SolarTerm::XiaoMan,
		SolarTerm::MangZhong,
		SolarTerm::XiaZhi,
		SolarTerm::XiaoShu,
		SolarTerm::DaShu,
		SolarTerm::LiQiu,
		SolarTerm::ChuShu,
		SolarTerm::BaiLu,
		SolarTerm::QiuFen,
		SolarTerm::HanLu,
		SolarTerm::ShuangJiang,
		SolarTerm::LiDong,
		SolarTerm::XiaoXue,
		SolarTerm::DaXue,
		SolarTerm::DongZhi,
		SolarTerm::XiaoHan,
		SolarTerm::DaHan,
	];

	pub fn index(self) -> usize {
		self as usize
	}

	pub fn from_index(index: usize) -> Option<Self> {
		Self::ALL.get(index).copied()
	}

	pub fn label(self) -> &'static str {
		SOLAR_TERM_LABELS[self.index()]
	}

	/// 太阳视黄经（度）：立春 315°，每个节气 15°
	pub fn longitude(self) -> f64 {
		((315 + 15 * self.index()) % 360) as f64
	}

	/// 是否为「节」（月令交接点）
	pub fn is_jie(self) -> bool {
		self.index() % 2 == 0
	}

	/// 节对应的月序（寅月 = 0 … 丑月 = 11）
	pub fn month_index(self) -> Option<u8> {
		self.is_jie().then(|| (self.index() / 2) as u8)
	}
}

impl fmt::Display for SolarTerm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// 节气时刻
#[derive(Clone, Copy, PartialEq, Debug, Serialize)]
pub struct TermInstant {
	pub term: SolarTerm,
	/// 世界时儒略日
	pub julian_day: f64,
}

impl TermInstant {
	pub fn beijing_time(&self) -> CalendarDateTime {
		from_julian_day(self.julian_day + BEIJING_UTC_OFFSET_HOURS / 24.0)
	}
}

/// 公历日期时间
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct CalendarDateTime {
	pub year: i32,
	pub month: u8,
	pub day: u8,
	pub hour: u8,
	pub minute: u8,
}

impl fmt::Display for CalendarDateTime {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{:04}-{:02}-{:02} {:02}:{:02}",
			self.year, self.month, self.day, self.hour, self.minute
		)
	}
}

// ============================================================================
// 儒略日
// ============================================================================

/// 公历日期 → 儒略日（`day` 可带小数表示时刻）
pub fn to_julian_day(year: i32, month: u8, day: f64) -> Estimate<f64> {
	if !day.is_finite() {
		log::warn!(target: "bazi", "⚠️ 非有限日期参数 {}-{}-{}，使用参考儒略日", year, month, day);
		return Estimate::degraded(REFERENCE_JULIAN_DAY);
	}
	let (y, m) = if month <= 2 {
		(year - 1, month as i32 + 12)
	} else {
		(year, month as i32)
	};
	let a = (y as f64 / 100.0).floor();
	let b = 2.0 - a + (a / 4.0).floor();
	let jd = (365.25 * (y + 4716) as f64).floor() + (30.6001 * (m + 1) as f64).floor() + day + b
		- 1524.5;
	Estimate::exact(jd)
}

/// 整数儒略日数（日序号），用于日柱
pub fn day_number(year: i32, month: u8, day: u8) -> i64 {
	let jd = to_julian_day(year, month, day as f64).value;
	(jd + 0.5).floor() as i64
}

/// 两个公历日期之间的整日差 `to - from`
pub fn days_between(from: (i32, u8, u8), to: (i32, u8, u8)) -> i64 {
	day_number(to.0, to.1, to.2) - day_number(from.0, from.1, from.2)
}

/// 儒略日 → 公历日期时间（Meeus 算法）
pub fn from_julian_day(jd: f64) -> CalendarDateTime {
	let jd = if jd.is_finite() { jd } else { REFERENCE_JULIAN_DAY };
	let z = (jd + 0.5).floor();
	let f = jd + 0.5 - z;
	let a = if z < 2_299_161.0 {
		z
	} else {
		let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
		z + 1.0 + alpha - (alpha / 4.0).floor()
	};
	let b = a + 1524.0;
	let c = ((b - 122.1) / 365.25).floor();
	let d = (365.25 * c).floor();
	let e = ((b - d) / 30.6001).floor();

	let day = b - d - (30.6001 * e).floor();
	let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
	let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

	let minutes = ((f * 1440.0).floor() as i64).clamp(0, 1439);
	CalendarDateTime {
		year: year as i32,
		month: month as u8,
		day: day as u8,
		hour: (minutes / 60) as u8,
		minute: (minutes % 60) as u8,
	}
}

/// 北京时间出生时刻 → 世界时儒略日
pub fn birth_instant(year: i32, month: u8, day: u8, hour: u8, minute: u8) -> Estimate<f64> {
	let hours = hour as f64 + minute as f64 / 60.0 - BEIJING_UTC_OFFSET_HOURS;
	to_julian_day(year, month, day as f64).map(|jd| jd + hours / 24.0)
}

// ============================================================================
// 太阳黄经
// ============================================================================

/// 太阳视黄经（度，[0, 360)）
pub fn solar_longitude(jd: f64) -> Estimate<f64> {
	if !jd.is_finite() {
		log::warn!(target: "bazi", "⚠️ 非有限儒略日，使用参考黄经");
		return Estimate::degraded(REFERENCE_LONGITUDE);
	}
	let t = (jd - J2000) / 36_525.0;
	let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
	let m = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t).to_radians();
	let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
		+ (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
		+ 0.000_289 * (3.0 * m).sin();
	let longitude = (l0 + c).rem_euclid(360.0);
	if longitude.is_finite() {
		Estimate::exact(longitude)
	} else {
		Estimate::degraded(REFERENCE_LONGITUDE)
	}
}

/// 角度差规约到 [-180, 180)
fn wrap_degrees(delta: f64) -> f64 {
	(delta + 180.0).rem_euclid(360.0) - 180.0
}

/// 以春分为锚点估算节气日期
fn estimate_term_day(year: i32, target: f64) -> f64 {
	let equinox = to_julian_day(year, 3, 20.5).value;
	let offset = if target >= 285.0 { target - 360.0 } else { target };
	equinox + offset / 360.0 * TROPICAL_YEAR_DAYS
}

// ============================================================================
// 节气求解
// ============================================================================

/// 指定公历年内某节气的时刻
///
/// 小寒、大寒落在该年一月，其余节气依次排到十二月冬至。
/// 迭代预算用尽时返回当前区间中点，不视为失败。
pub fn solar_term_time(year: i32, term: SolarTerm) -> Estimate<TermInstant> {
	let target = term.longitude();
	let estimate = estimate_term_day(year, target);
	let (mut low, mut high) = (estimate - SEARCH_WINDOW_DAYS, estimate + SEARCH_WINDOW_DAYS);
	let mut degraded = false;

	for _ in 0..MAX_BISECTION_STEPS {
		let mid = (low + high) / 2.0;
		let longitude = solar_longitude(mid);
		degraded |= longitude.degraded;
		let diff = wrap_degrees(longitude.value - target);
		if diff.abs() < LONGITUDE_TOLERANCE {
			return Estimate {
				value: TermInstant {
					term,
					julian_day: mid,
				},
				degraded,
			};
		}
		if diff < 0.0 {
			low = mid;
		} else {
			high = mid;
		}
	}

	log::debug!(target: "bazi", "节气 {} ({}) 二分未收敛，取区间中点", term, year);
	Estimate {
		value: TermInstant {
			term,
			julian_day: (low + high) / 2.0,
		},
		degraded,
	}
}

/// 某年全部节气，按时间排序
pub fn solar_terms_of_year(year: i32) -> Estimate<Vec<TermInstant>> {
	collect_terms(year..=year, |_| true)
}

fn collect_terms(
	years: core::ops::RangeInclusive<i32>,
	keep: impl Fn(SolarTerm) -> bool,
) -> Estimate<Vec<TermInstant>> {
	let mut degraded = false;
	let mut terms = Vec::with_capacity(72);
	for year in years {
		for term in SolarTerm::ALL.into_iter().filter(|t| keep(*t)) {
			let instant = solar_term_time(year, term);
			degraded |= instant.degraded;
			terms.push(instant.value);
		}
	}
	terms.sort_by(|a, b| a.julian_day.total_cmp(&b.julian_day));
	Estimate {
		value: terms,
		degraded,
	}
}

/// 时刻前后三个公历年的节气表
fn terms_around(jd: f64, keep: impl Fn(SolarTerm) -> bool) -> (f64, Estimate<Vec<TermInstant>>) {
	let (jd, degraded) = if jd.is_finite() {
		(jd, false)
	} else {
		(REFERENCE_JULIAN_DAY, true)
	};
	let year = from_julian_day(jd).year;
	let mut terms = collect_terms(year - 1..=year + 1, keep);
	terms.degraded |= degraded;
	(jd, terms)
}

fn last_at_or_before(jd: f64, keep: impl Fn(SolarTerm) -> bool) -> Estimate<TermInstant> {
	let (jd, terms) = terms_around(jd, keep);
	let degraded = terms.degraded;
	let list = terms.value;
	let found = list
		.iter()
		.rev()
		.find(|t| t.julian_day <= jd)
		.or_else(|| list.first())
		.copied();
	finish(found, degraded)
}

fn first_after(jd: f64, keep: impl Fn(SolarTerm) -> bool) -> Estimate<TermInstant> {
	let (jd, terms) = terms_around(jd, keep);
	let degraded = terms.degraded;
	let list = terms.value;
	let found = list
		.iter()
		.find(|t| t.julian_day > jd)
		.or_else(|| list.last())
		.copied();
	finish(found, degraded)
}

fn finish(found: Option<TermInstant>, degraded: bool) -> Estimate<TermInstant> {
	match found {
		Some(value) => Estimate { value, degraded },
		// 三年窗口内至少有 18 个节，正常不会走到这里
		None => Estimate::degraded(TermInstant {
			term: SolarTerm::LiChun,
			julian_day: REFERENCE_JULIAN_DAY,
		}),
	}
}

/// 当前所在节气（时刻之前最近的节气）
pub fn current_solar_term(jd: f64) -> Estimate<TermInstant> {
	last_at_or_before(jd, |_| true)
}

/// 下一个节气
pub fn next_solar_term(jd: f64) -> Estimate<TermInstant> {
	first_after(jd, |_| true)
}

/// 时刻之前最近的「节」，决定月令
pub fn previous_jie(jd: f64) -> Estimate<TermInstant> {
	last_at_or_before(jd, SolarTerm::is_jie)
}

/// 时刻之后最近的「节」
pub fn next_jie(jd: f64) -> Estimate<TermInstant> {
	first_after(jd, SolarTerm::is_jie)
}

/// 时刻是否已过当年某节气
pub fn is_after_solar_term(jd: f64, year: i32, term: SolarTerm) -> Estimate<bool> {
	solar_term_time(year, term).map(|instant| jd >= instant.julian_day)
}
