//! # 八字基础类型
//!
//! 天干、地支、五行、干支、四柱、十神等值类型。
//!
//! 所有符号类型都是 `Copy` 小值，索引越界只能通过 `from_index` 的
//! `Result` 暴露，内部的循环位移统一走 `rem_euclid`，保证永远落在合法区间。

use core::fmt;
use core::str::FromStr;

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize, Serializer};

use crate::constants::{
	CANGGAN_TABLE, DIZHI_LABELS, DIZHI_WUXING, TIANGAN_LABELS, TIANGAN_WUXING, WUXING_GENERATE,
	WUXING_LABELS, WUXING_OVERCOME,
};
use crate::error::ValidationError;

// ============================================================================
// 五行
// ============================================================================

/// 五行，按相生顺序排列：木 → 火 → 土 → 金 → 水
#[derive(
	Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq,
	PartialOrd, Ord, Hash, Debug, Serialize, Deserialize,
)]
pub enum WuXing {
	Mu = 0,
	Huo = 1,
	Tu = 2,
	Jin = 3,
	Shui = 4,
}

impl WuXing {
	pub const ALL: [WuXing; 5] = [WuXing::Mu, WuXing::Huo, WuXing::Tu, WuXing::Jin, WuXing::Shui];

	pub const fn index(self) -> usize {
		self as usize
	}

	pub fn label(self) -> char {
		WUXING_LABELS[self.index()]
	}

	/// 我生者
	pub fn generates(self) -> WuXing {
		WUXING_GENERATE[self.index()]
	}

	/// 我克者
	pub fn overcomes(self) -> WuXing {
		WUXING_OVERCOME[self.index()]
	}

	/// 生我者
	pub fn generated_by(self) -> WuXing {
		Self::ALL
			.into_iter()
			.find(|e| e.generates() == self)
			.unwrap_or(self)
	}

	/// 克我者
	pub fn overcome_by(self) -> WuXing {
		Self::ALL
			.into_iter()
			.find(|e| e.overcomes() == self)
			.unwrap_or(self)
	}
}

impl fmt::Display for WuXing {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.label())
	}
}

// ============================================================================
// 阴阳
// ============================================================================

#[derive(
	Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq,
	Debug, Serialize,
)]
pub enum YinYang {
	Yang = 0,
	Yin = 1,
}

// ============================================================================
// 天干
// ============================================================================

/// 天干：甲(0) 乙(1) 丙(2) 丁(3) 戊(4) 己(5) 庚(6) 辛(7) 壬(8) 癸(9)
///
/// 偶数索引为阳干，奇数索引为阴干。
#[derive(
	Clone, Copy, Encode, TypeInfo, MaxEncodedLen, PartialEq, Eq, PartialOrd, Ord, Hash, Debug,
)]
pub struct TianGan(u8);

impl TianGan {
	pub const JIA: TianGan = TianGan(0);
	pub const YI: TianGan = TianGan(1);
	pub const BING: TianGan = TianGan(2);
	pub const DING: TianGan = TianGan(3);
	pub const WU: TianGan = TianGan(4);
	pub const JI: TianGan = TianGan(5);
	pub const GENG: TianGan = TianGan(6);
	pub const XIN: TianGan = TianGan(7);
	pub const REN: TianGan = TianGan(8);
	pub const GUI: TianGan = TianGan(9);

	pub fn from_index(index: u8) -> Result<Self, ValidationError> {
		if index < 10 {
			Ok(TianGan(index))
		} else {
			Err(ValidationError::InvalidTianGan(index))
		}
	}

	/// 任意整数按 10 取模映射为天干
	pub fn from_cycle(n: i64) -> Self {
		TianGan(n.rem_euclid(10) as u8)
	}

	pub fn from_label(label: char) -> Result<Self, ValidationError> {
		TIANGAN_LABELS
			.iter()
			.position(|c| *c == label)
			.map(|i| TianGan(i as u8))
			.ok_or(ValidationError::UnknownSymbol(label))
	}

	pub fn all() -> impl Iterator<Item = TianGan> {
		(0..10u8).map(TianGan)
	}

	pub const fn index(self) -> u8 {
		self.0
	}

	pub fn label(self) -> char {
		TIANGAN_LABELS[self.0 as usize]
	}

	pub fn to_wuxing(self) -> WuXing {
		TIANGAN_WUXING[self.0 as usize]
	}

	pub fn yinyang(self) -> YinYang {
		if self.0 % 2 == 0 {
			YinYang::Yang
		} else {
			YinYang::Yin
		}
	}

	pub fn is_yang(self) -> bool {
		self.yinyang() == YinYang::Yang
	}

	pub fn offset(self, steps: i64) -> Self {
		Self::from_cycle(self.0 as i64 + steps)
	}

	/// 给定五行与阴阳的天干
	pub fn from_wuxing(wuxing: WuXing, yang: bool) -> Self {
		let base = wuxing.index() as u8 * 2;
		TianGan(if yang { base } else { base + 1 })
	}
}

impl Decode for TianGan {
	fn decode<I: codec::Input>(input: &mut I) -> Result<Self, codec::Error> {
		let index = u8::decode(input)?;
		TianGan::from_index(index).map_err(|_| "TianGan index out of range".into())
	}
}

impl DecodeWithMemTracking for TianGan {}

impl fmt::Display for TianGan {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.label())
	}
}

impl Serialize for TianGan {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_char(self.label())
	}
}

// ============================================================================
// 地支
// ============================================================================

/// 地支：子(0) 丑(1) 寅(2) 卯(3) 辰(4) 巳(5) 午(6) 未(7) 申(8) 酉(9) 戌(10) 亥(11)
#[derive(
	Clone, Copy, Encode, TypeInfo, MaxEncodedLen, PartialEq, Eq, PartialOrd, Ord, Hash, Debug,
)]
pub struct DiZhi(u8);

impl DiZhi {
	pub const ZI: DiZhi = DiZhi(0);
	pub const CHOU: DiZhi = DiZhi(1);
	pub const YIN: DiZhi = DiZhi(2);
	pub const MAO: DiZhi = DiZhi(3);
	pub const CHEN: DiZhi = DiZhi(4);
	pub const SI: DiZhi = DiZhi(5);
	pub const WU: DiZhi = DiZhi(6);
	pub const WEI: DiZhi = DiZhi(7);
	pub const SHEN: DiZhi = DiZhi(8);
	pub const YOU: DiZhi = DiZhi(9);
	pub const XU: DiZhi = DiZhi(10);
	pub const HAI: DiZhi = DiZhi(11);

	pub fn from_index(index: u8) -> Result<Self, ValidationError> {
		if index < 12 {
			Ok(DiZhi(index))
		} else {
			Err(ValidationError::InvalidDiZhi(index))
		}
	}

	pub fn from_cycle(n: i64) -> Self {
		DiZhi(n.rem_euclid(12) as u8)
	}

	pub fn from_label(label: char) -> Result<Self, ValidationError> {
		DIZHI_LABELS
			.iter()
			.position(|c| *c == label)
			.map(|i| DiZhi(i as u8))
			.ok_or(ValidationError::UnknownSymbol(label))
	}

	pub fn all() -> impl Iterator<Item = DiZhi> {
		(0..12u8).map(DiZhi)
	}

	pub const fn index(self) -> u8 {
		self.0
	}

	pub fn label(self) -> char {
		DIZHI_LABELS[self.0 as usize]
	}

	pub fn to_wuxing(self) -> WuXing {
		DIZHI_WUXING[self.0 as usize]
	}

	pub fn offset(self, steps: i64) -> Self {
		Self::from_cycle(self.0 as i64 + steps)
	}

	/// 地支藏干，按本气、中气、余气排列
	pub fn canggan(self) -> impl Iterator<Item = CangGan> {
		CANGGAN_TABLE[self.0 as usize]
			.iter()
			.zip(CangGanType::ORDER)
			.map(|(gan, canggan_type)| CangGan {
				gan: *gan,
				canggan_type,
			})
	}
}

impl Decode for DiZhi {
	fn decode<I: codec::Input>(input: &mut I) -> Result<Self, codec::Error> {
		let index = u8::decode(input)?;
		DiZhi::from_index(index).map_err(|_| "DiZhi index out of range".into())
	}
}

impl DecodeWithMemTracking for DiZhi {}

impl fmt::Display for DiZhi {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.label())
	}
}

impl Serialize for DiZhi {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_char(self.label())
	}
}

// ============================================================================
// 藏干
// ============================================================================

/// 藏干类型
#[derive(
	Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq,
	Debug, Serialize,
)]
pub enum CangGanType {
	/// 本气
	ZhuQi = 0,
	/// 中气
	ZhongQi = 1,
	/// 余气
	YuQi = 2,
}

impl CangGanType {
	pub const ORDER: [CangGanType; 3] = [CangGanType::ZhuQi, CangGanType::ZhongQi, CangGanType::YuQi];

	/// 五行力量权重
	pub fn weight(self) -> f64 {
		match self {
			CangGanType::ZhuQi => 0.6,
			CangGanType::ZhongQi => 0.3,
			CangGanType::YuQi => 0.1,
		}
	}
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct CangGan {
	pub gan: TianGan,
	pub canggan_type: CangGanType,
}

// ============================================================================
// 干支
// ============================================================================

/// 干支（一柱）
#[derive(
	Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq,
	Hash, Debug,
)]
pub struct GanZhi {
	pub gan: TianGan,
	pub zhi: DiZhi,
}

impl GanZhi {
	pub fn new(gan: TianGan, zhi: DiZhi) -> Self {
		Self { gan, zhi }
	}

	/// 六十甲子索引 (0 = 甲子, 59 = 癸亥)
	pub fn from_index(index: u8) -> Result<Self, ValidationError> {
		if index >= 60 {
			return Err(ValidationError::InvalidGanZhiIndex(index));
		}
		Ok(Self::from_cycle(index as i64))
	}

	pub fn from_cycle(n: i64) -> Self {
		Self {
			gan: TianGan::from_cycle(n),
			zhi: DiZhi::from_cycle(n),
		}
	}

	/// 六十甲子索引；阴阳不配的组合（如甲丑）不在循环内，返回 `None`
	pub fn index(self) -> Option<u8> {
		let (g, z) = (self.gan.index() as i64, self.zhi.index() as i64);
		if g % 2 != z % 2 {
			return None;
		}
		Some((6 * g - 5 * z).rem_euclid(60) as u8)
	}

	/// 干支同步位移
	pub fn offset(self, steps: i64) -> Self {
		Self {
			gan: self.gan.offset(steps),
			zhi: self.zhi.offset(steps),
		}
	}

	pub fn next(self) -> Self {
		self.offset(1)
	}

	pub fn label(self) -> String {
		self.to_string()
	}
}

impl fmt::Display for GanZhi {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}", self.gan, self.zhi)
	}
}

impl FromStr for GanZhi {
	type Err = ValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut chars = s.trim().chars();
		let malformed = || ValidationError::MalformedPillar(s.to_string());
		let (Some(gan), Some(zhi), None) = (chars.next(), chars.next(), chars.next()) else {
			return Err(malformed());
		};
		let gan = TianGan::from_label(gan).map_err(|_| malformed())?;
		let zhi = DiZhi::from_label(zhi).map_err(|_| malformed())?;
		Ok(Self { gan, zhi })
	}
}

impl Serialize for GanZhi {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

// ============================================================================
// 四柱
// ============================================================================

/// 四柱
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct SiZhu {
	pub year_zhu: GanZhi,
	pub month_zhu: GanZhi,
	pub day_zhu: GanZhi,
	pub hour_zhu: GanZhi,
}

impl SiZhu {
	/// 年、月、日、时顺序
	pub fn pillars(&self) -> [GanZhi; 4] {
		[self.year_zhu, self.month_zhu, self.day_zhu, self.hour_zhu]
	}

	/// 日主（日干）
	pub fn rizhu(&self) -> TianGan {
		self.day_zhu.gan
	}

	pub fn labels(&self) -> [String; 4] {
		self.pillars().map(|p| p.to_string())
	}

	pub fn to_index(&self) -> SiZhuIndex {
		SiZhuIndex {
			year_gan: self.year_zhu.gan.index(),
			year_zhi: self.year_zhu.zhi.index(),
			month_gan: self.month_zhu.gan.index(),
			month_zhi: self.month_zhu.zhi.index(),
			day_gan: self.day_zhu.gan.index(),
			day_zhi: self.day_zhu.zhi.index(),
			hour_gan: self.hour_zhu.gan.index(),
			hour_zhi: self.hour_zhu.zhi.index(),
		}
	}
}

impl fmt::Display for SiZhu {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {} {} {}", self.year_zhu, self.month_zhu, self.day_zhu, self.hour_zhu)
	}
}

impl FromStr for SiZhu {
	type Err = ValidationError;

	/// 解析 "庚午 辛巳 庚辰 癸未" 形式的四柱
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let pillars = s
			.split_whitespace()
			.map(GanZhi::from_str)
			.collect::<Result<Vec<_>, _>>()?;
		match pillars.as_slice() {
			[year_zhu, month_zhu, day_zhu, hour_zhu] => Ok(SiZhu {
				year_zhu: *year_zhu,
				month_zhu: *month_zhu,
				day_zhu: *day_zhu,
				hour_zhu: *hour_zhu,
			}),
			_ => Err(ValidationError::MalformedPillar(s.to_string())),
		}
	}
}

/// 四柱紧凑索引（8 字节），用于 SCALE 编码传输
#[derive(
	Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq,
	Debug, Default, Serialize,
)]
pub struct SiZhuIndex {
	pub year_gan: u8,
	pub year_zhi: u8,
	pub month_gan: u8,
	pub month_zhi: u8,
	pub day_gan: u8,
	pub day_zhi: u8,
	pub hour_gan: u8,
	pub hour_zhi: u8,
}

impl SiZhuIndex {
	pub fn to_sizhu(&self) -> Result<SiZhu, ValidationError> {
		let zhu = |gan: u8, zhi: u8| -> Result<GanZhi, ValidationError> {
			Ok(GanZhi::new(TianGan::from_index(gan)?, DiZhi::from_index(zhi)?))
		};
		Ok(SiZhu {
			year_zhu: zhu(self.year_gan, self.year_zhi)?,
			month_zhu: zhu(self.month_gan, self.month_zhi)?,
			day_zhu: zhu(self.day_gan, self.day_zhi)?,
			hour_zhu: zhu(self.hour_gan, self.hour_zhi)?,
		})
	}
}

// ============================================================================
// 性别 / 子时模式
// ============================================================================

#[derive(
	Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq,
	Debug, Serialize, Deserialize,
)]
pub enum Gender {
	Male = 0,
	Female = 1,
}

impl Gender {
	pub fn opposite(self) -> Self {
		match self {
			Gender::Male => Gender::Female,
			Gender::Female => Gender::Male,
		}
	}
}

/// 子时模式
///
/// - `Modern`：23:00-23:59 仍按当日排日柱，时支为子
/// - `Traditional`：23:00 起即换日，日柱取次日
#[derive(
	Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq,
	Debug, Default, Serialize, Deserialize,
)]
pub enum ZiShiMode {
	#[default]
	Modern = 0,
	Traditional = 1,
}

// ============================================================================
// 十神 / 旺衰
// ============================================================================

/// 十神
#[derive(
	Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq,
	Hash, Debug, Serialize,
)]
pub enum ShiShen {
	BiJian = 0,
	JieCai = 1,
	ShiShen = 2,
	ShangGuan = 3,
	PianCai = 4,
	ZhengCai = 5,
	QiSha = 6,
	ZhengGuan = 7,
	PianYin = 8,
	ZhengYin = 9,
}

impl ShiShen {
	pub const ALL: [ShiShen; 10] = [
		ShiShen::BiJian,
		ShiShen::JieCai,
		ShiShen::ShiShen,
		ShiShen::ShangGuan,
		ShiShen::PianCai,
		ShiShen::ZhengCai,
		ShiShen::QiSha,
		ShiShen::ZhengGuan,
		ShiShen::PianYin,
		ShiShen::ZhengYin,
	];

	pub fn label(self) -> &'static str {
		match self {
			ShiShen::BiJian => "比肩",
			ShiShen::JieCai => "劫财",
			ShiShen::ShiShen => "食神",
			ShiShen::ShangGuan => "伤官",
			ShiShen::PianCai => "偏财",
			ShiShen::ZhengCai => "正财",
			ShiShen::QiSha => "七杀",
			ShiShen::ZhengGuan => "正官",
			ShiShen::PianYin => "偏印",
			ShiShen::ZhengYin => "正印",
		}
	}
}

impl fmt::Display for ShiShen {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// 五行旺衰
#[derive(
	Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq,
	Debug, Serialize,
)]
pub enum Strength {
	Strong = 0,
	Medium = 1,
	Weak = 2,
}

impl Strength {
	pub fn label(self) -> &'static str {
		match self {
			Strength::Strong => "旺",
			Strength::Medium => "中",
			Strength::Weak => "弱",
		}
	}
}

// ============================================================================
// 计算结果降级标记
// ============================================================================

/// 带降级标记的计算结果
///
/// 天文计算遇到非有限数时不会失败，而是返回固定参考值并置 `degraded`。
#[derive(Clone, Copy, PartialEq, Debug, Serialize)]
pub struct Estimate<T> {
	pub value: T,
	pub degraded: bool,
}

impl<T> Estimate<T> {
	pub fn exact(value: T) -> Self {
		Self {
			value,
			degraded: false,
		}
	}

	pub fn degraded(value: T) -> Self {
		Self {
			value,
			degraded: true,
		}
	}

	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Estimate<U> {
		Estimate {
			value: f(self.value),
			degraded: self.degraded,
		}
	}
}
