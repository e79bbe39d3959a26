//! # 八字常量表
//!
//! 所有查表数据集中于此：干支名称、五行归属、生克关系、藏干、
//! 五虎遁 / 五鼠遁起干、节气名称以及五行权重。

use crate::types::{TianGan, WuXing};

// ============================================================================
// 名称
// ============================================================================

pub const TIANGAN_LABELS: [char; 10] = ['甲', '乙', '丙', '丁', '戊', '己', '庚', '辛', '壬', '癸'];

pub const DIZHI_LABELS: [char; 12] = [
	'子', '丑', '寅', '卯', '辰', '巳', '午', '未', '申', '酉', '戌', '亥',
];

pub const WUXING_LABELS: [char; 5] = ['木', '火', '土', '金', '水'];

/// 二十四节气，从立春开始
pub const SOLAR_TERM_LABELS: [&str; 24] = [
	"立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏", "小满", "芒种", "夏至", "小暑", "大暑",
	"立秋", "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至", "小寒", "大寒",
];

// ============================================================================
// 五行归属与生克
// ============================================================================

pub const TIANGAN_WUXING: [WuXing; 10] = [
	WuXing::Mu,
	WuXing::Mu,
	WuXing::Huo,
	WuXing::Huo,
	WuXing::Tu,
	WuXing::Tu,
	WuXing::Jin,
	WuXing::Jin,
	WuXing::Shui,
	WuXing::Shui,
];

pub const DIZHI_WUXING: [WuXing; 12] = [
	WuXing::Shui, // 子
	WuXing::Tu,   // 丑
	WuXing::Mu,   // 寅
	WuXing::Mu,   // 卯
	WuXing::Tu,   // 辰
	WuXing::Huo,  // 巳
	WuXing::Huo,  // 午
	WuXing::Tu,   // 未
	WuXing::Jin,  // 申
	WuXing::Jin,  // 酉
	WuXing::Tu,   // 戌
	WuXing::Shui, // 亥
];

/// 相生：木生火、火生土、土生金、金生水、水生木
pub const WUXING_GENERATE: [WuXing; 5] = [
	WuXing::Huo,
	WuXing::Tu,
	WuXing::Jin,
	WuXing::Shui,
	WuXing::Mu,
];

/// 相克：木克土、火克金、土克水、金克木、水克火
pub const WUXING_OVERCOME: [WuXing; 5] = [
	WuXing::Tu,
	WuXing::Jin,
	WuXing::Shui,
	WuXing::Mu,
	WuXing::Huo,
];

// ============================================================================
// 藏干
// ============================================================================

/// 地支藏干表（本气、中气、余气）
pub const CANGGAN_TABLE: [&[TianGan]; 12] = [
	&[TianGan::GUI],                              // 子
	&[TianGan::JI, TianGan::GUI, TianGan::XIN],   // 丑
	&[TianGan::JIA, TianGan::BING, TianGan::WU],  // 寅
	&[TianGan::YI],                               // 卯
	&[TianGan::WU, TianGan::YI, TianGan::GUI],    // 辰
	&[TianGan::BING, TianGan::GENG, TianGan::WU], // 巳
	&[TianGan::DING, TianGan::JI],                // 午
	&[TianGan::JI, TianGan::DING, TianGan::YI],   // 未
	&[TianGan::GENG, TianGan::REN, TianGan::WU],  // 申
	&[TianGan::XIN],                              // 酉
	&[TianGan::WU, TianGan::XIN, TianGan::DING],  // 戌
	&[TianGan::REN, TianGan::JIA],                // 亥
];

// ============================================================================
// 起干口诀
// ============================================================================

/// 五虎遁：年干 % 5 → 寅月天干
///
/// 甲己之年丙作首，乙庚之岁戊为头，丙辛必定寻庚起，丁壬壬位顺行流，戊癸何方发，甲寅之上好追求。
pub const WUHU_START: [TianGan; 5] = [
	TianGan::BING,
	TianGan::WU,
	TianGan::GENG,
	TianGan::REN,
	TianGan::JIA,
];

/// 五鼠遁：日干 % 5 → 子时天干
pub const WUSHU_START: [TianGan; 5] = [
	TianGan::JIA,
	TianGan::BING,
	TianGan::WU,
	TianGan::GENG,
	TianGan::REN,
];

// ============================================================================
// 五行权重
// ============================================================================

/// 天干五行权重
pub const STEM_WEIGHT: f64 = 1.0;
/// 地支本身五行按本气权重计入
pub const BRANCH_WEIGHT: f64 = 0.6;
/// 日主额外加成
pub const RIZHU_BONUS: f64 = 3.0;
/// 占比达到此值为旺
pub const STRONG_RATIO: f64 = 0.25;
/// 占比达到此值为中，低于为弱
pub const MEDIUM_RATIO: f64 = 0.15;

// ============================================================================
// 日期范围
// ============================================================================

pub const MIN_YEAR: u16 = 1900;
pub const MAX_YEAR: u16 = 2100;

/// 北京时间相对世界时的小时偏移
pub const BEIJING_UTC_OFFSET_HOURS: f64 = 8.0;
