//! # 命盘
//!
//! `BirthInput` 为校验边界，`BaziChart` 为排盘结果。命盘一经生成不再修改，
//! 旺衰、十神等派生数据均从四柱与五行权重即时推出。

use serde::{Deserialize, Serialize};

use crate::calculations::{
	calculate_day_and_hour, calculate_month_ganzhi, calculate_year_ganzhi, month_index,
	sexagenary_year, validate_birth,
};
use crate::error::ValidationError;
use crate::interpretation::{useful_gods_advice, FortuneProfile};
use crate::shishen::{all_ten_gods, TenGod};
use crate::solar;
use crate::types::{Gender, SiZhu, SiZhuIndex, Strength, TianGan, ZiShiMode};
use crate::wuxing::{calculate_wuxing, WuXingAnalysis, WuXingWeights};

// ============================================================================
// 出生输入
// ============================================================================

/// 出生信息（北京时间，公历）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BirthInput {
	pub year: u16,
	pub month: u8,
	pub day: u8,
	pub hour: u8,
	#[serde(default)]
	pub minute: Option<u8>,
	#[serde(default)]
	pub gender: Option<Gender>,
	#[serde(default)]
	pub zishi_mode: ZiShiMode,
}

impl BirthInput {
	pub fn new(year: u16, month: u8, day: u8, hour: u8) -> Self {
		Self {
			year,
			month,
			day,
			hour,
			minute: None,
			gender: None,
			zishi_mode: ZiShiMode::Modern,
		}
	}

	pub fn with_minute(mut self, minute: u8) -> Self {
		self.minute = Some(minute);
		self
	}

	pub fn with_gender(mut self, gender: Gender) -> Self {
		self.gender = Some(gender);
		self
	}

	pub fn with_zishi_mode(mut self, zishi_mode: ZiShiMode) -> Self {
		self.zishi_mode = zishi_mode;
		self
	}

	pub fn validate(&self) -> Result<(), ValidationError> {
		validate_birth(self.year, self.month, self.day, self.hour, self.minute.unwrap_or(0))
	}

	/// ISO 8601 本地时间，带 +08:00 偏移
	pub fn iso_string(&self) -> String {
		format!(
			"{:04}-{:02}-{:02}T{:02}:{:02}:00+08:00",
			self.year,
			self.month,
			self.day,
			self.hour,
			self.minute.unwrap_or(0)
		)
	}

	/// 世界时儒略日
	pub fn instant(&self) -> f64 {
		solar::birth_instant(
			self.year as i32,
			self.month,
			self.day,
			self.hour,
			self.minute.unwrap_or(0),
		)
		.value
	}
}

// ============================================================================
// 命盘
// ============================================================================

/// 八字命盘
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BaziChart {
	birth: BirthInput,
	birth_date: String,
	sizhu: SiZhu,
	rizhu: TianGan,
	wuxing: WuXingWeights,
	/// 天文计算存在降级估算
	degraded: bool,
}

impl BaziChart {
	/// 排盘
	pub fn compute(birth: BirthInput) -> Result<Self, ValidationError> {
		birth.validate()?;
		let BirthInput {
			year,
			month,
			day,
			hour,
			zishi_mode,
			..
		} = birth;

		let instant = solar::birth_instant(
			year as i32,
			month,
			day,
			hour,
			birth.minute.unwrap_or(0),
		);
		let ganzhi_year = sexagenary_year(year, instant.value);
		let year_zhu = calculate_year_ganzhi(ganzhi_year.value);
		let month_idx = month_index(instant.value);
		let month_zhu = calculate_month_ganzhi(year_zhu.gan, month_idx.value);
		let (day_zhu, hour_zhu) = calculate_day_and_hour(year, month, day, hour, zishi_mode);

		let sizhu = SiZhu {
			year_zhu,
			month_zhu,
			day_zhu,
			hour_zhu,
		};
		let degraded = instant.degraded || ganzhi_year.degraded || month_idx.degraded;
		if degraded {
			log::warn!(target: "bazi", "⚠️ 排盘使用了降级的天文估算: {}", birth.iso_string());
		}
		log::debug!(target: "bazi", "🔮 排盘 {} → {}", birth.iso_string(), sizhu.labels().join(" "));

		Ok(Self {
			birth_date: birth.iso_string(),
			rizhu: sizhu.rizhu(),
			wuxing: crate::wuxing::calculate_weights(&sizhu),
			sizhu,
			birth,
			degraded,
		})
	}

	pub fn birth(&self) -> &BirthInput {
		&self.birth
	}

	pub fn birth_date(&self) -> &str {
		&self.birth_date
	}

	pub fn gender(&self) -> Option<Gender> {
		self.birth.gender
	}

	pub fn sizhu(&self) -> &SiZhu {
		&self.sizhu
	}

	pub fn sizhu_index(&self) -> SiZhuIndex {
		self.sizhu.to_index()
	}

	pub fn rizhu(&self) -> TianGan {
		self.rizhu
	}

	pub fn wuxing_weights(&self) -> &WuXingWeights {
		&self.wuxing
	}

	pub fn is_degraded(&self) -> bool {
		self.degraded
	}

	pub fn birth_instant(&self) -> f64 {
		self.birth.instant()
	}

	/// 五行分析（旺衰、平衡度、生克链）
	pub fn wuxing(&self) -> WuXingAnalysis {
		calculate_wuxing(&self.sizhu)
	}

	pub fn rizhu_strength(&self) -> Strength {
		self.wuxing_weights().strength(self.rizhu.to_wuxing())
	}

	/// 年、月、时三柱天干十神
	pub fn ten_gods(&self) -> [TenGod; 3] {
		all_ten_gods(&self.sizhu)
	}

	pub fn useful_gods_advice(&self) -> Vec<String> {
		useful_gods_advice(self.rizhu, &self.wuxing())
	}

	pub fn fortune(&self) -> FortuneProfile {
		FortuneProfile::from_ten_gods(&self.ten_gods())
	}

	/// 指定性别的副本；性别不影响四柱
	pub fn with_gender(&self, gender: Gender) -> Self {
		let mut chart = self.clone();
		chart.birth.gender = Some(gender);
		chart
	}
}

/// 公历出生时间排盘（不含性别与分钟）
pub fn compute_chart(year: u16, month: u8, day: u8, hour: u8) -> Result<BaziChart, ValidationError> {
	BaziChart::compute(BirthInput::new(year, month, day, hour))
}
