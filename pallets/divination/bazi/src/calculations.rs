//! # 四柱计算
//!
//! - 年柱：以立春为界，`(年 - 4) mod 60`
//! - 月柱：以「节」定月支，五虎遁定月干
//! - 日柱：整数儒略日 `(JDN + 49) mod 60`
//! - 时柱：`⌊(时 + 1) / 2⌋ mod 12` 定时支，五鼠遁定时干

use crate::constants::{MAX_YEAR, MIN_YEAR, WUHU_START, WUSHU_START};
use crate::error::{InputField, ValidationError};
use crate::solar::{self, SolarTerm};
use crate::types::{DiZhi, Estimate, GanZhi, TianGan, ZiShiMode};

/// 日柱偏移：JDN 0 对应的六十甲子位置
const DAY_CYCLE_OFFSET: i64 = 49;
/// 公元 4 年为甲子年
const YEAR_CYCLE_ANCHOR: i64 = 4;

// ============================================================================
// 输入校验
// ============================================================================

pub fn is_leap_year(year: u16) -> bool {
	(year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: u16, month: u8) -> u8 {
	match month {
		1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
		4 | 6 | 9 | 11 => 30,
		2 if is_leap_year(year) => 29,
		2 => 28,
		_ => 0,
	}
}

/// 校验公历出生时间
pub fn validate_birth(
	year: u16,
	month: u8,
	day: u8,
	hour: u8,
	minute: u8,
) -> Result<(), ValidationError> {
	let check = |field, value: i64, min: i64, max: i64| {
		if (min..=max).contains(&value) {
			Ok(())
		} else {
			Err(ValidationError::out_of_range(field, value, min, max))
		}
	};
	check(InputField::Year, year as i64, MIN_YEAR as i64, MAX_YEAR as i64)?;
	check(InputField::Month, month as i64, 1, 12)?;
	check(InputField::Day, day as i64, 1, days_in_month(year, month) as i64)?;
	check(InputField::Hour, hour as i64, 0, 23)?;
	check(InputField::Minute, minute as i64, 0, 59)?;
	Ok(())
}

// ============================================================================
// 年柱
// ============================================================================

/// 干支纪年的年份：立春前出生归上一年
pub fn sexagenary_year(year: u16, birth_jd: f64) -> Estimate<i32> {
	let year = year as i32;
	solar::is_after_solar_term(birth_jd, year, SolarTerm::LiChun)
		.map(|after| if after { year } else { year - 1 })
}

/// 年柱：`(年 - 4) mod 60`
pub fn calculate_year_ganzhi(sexagenary_year: i32) -> GanZhi {
	GanZhi::from_cycle(sexagenary_year as i64 - YEAR_CYCLE_ANCHOR)
}

// ============================================================================
// 月柱
// ============================================================================

/// 月令序号（寅月 = 0 … 丑月 = 11），取出生前最近的「节」
pub fn month_index(birth_jd: f64) -> Estimate<u8> {
	solar::previous_jie(birth_jd).map(|jie| jie.term.month_index().unwrap_or(0))
}

/// 月柱：五虎遁
pub fn calculate_month_ganzhi(year_gan: TianGan, month_index: u8) -> GanZhi {
	let start = WUHU_START[(year_gan.index() % 5) as usize];
	GanZhi::new(
		start.offset(month_index as i64),
		DiZhi::YIN.offset(month_index as i64),
	)
}

// ============================================================================
// 日柱
// ============================================================================

/// 日柱：`(JDN + 49) mod 60`
pub fn calculate_day_ganzhi(year: u16, month: u8, day: u8) -> GanZhi {
	let jdn = solar::day_number(year as i32, month, day);
	GanZhi::from_cycle(jdn + DAY_CYCLE_OFFSET)
}

// ============================================================================
// 时柱
// ============================================================================

/// 时支：23:00-00:59 为子时
pub fn hour_dizhi(hour: u8) -> DiZhi {
	DiZhi::from_cycle((hour as i64 + 1) / 2)
}

/// 时柱：五鼠遁
pub fn calculate_hour_ganzhi(day_gan: TianGan, hour: u8) -> GanZhi {
	let zhi = hour_dizhi(hour);
	let start = WUSHU_START[(day_gan.index() % 5) as usize];
	GanZhi::new(start.offset(zhi.index() as i64), zhi)
}

/// 日柱与时柱，按子时模式处理 23 点
pub fn calculate_day_and_hour(
	year: u16,
	month: u8,
	day: u8,
	hour: u8,
	zishi_mode: ZiShiMode,
) -> (GanZhi, GanZhi) {
	let mut day_ganzhi = calculate_day_ganzhi(year, month, day);
	if zishi_mode == ZiShiMode::Traditional && hour == 23 {
		day_ganzhi = day_ganzhi.next();
	}
	(day_ganzhi, calculate_hour_ganzhi(day_ganzhi.gan, hour))
}
