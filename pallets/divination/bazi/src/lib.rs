//! # 八字排盘引擎 (Bazi Chart)
//!
//! ## 概述
//!
//! 本 crate 实现完整的八字排盘计算：
//! - 四柱计算（年柱、月柱、日柱、时柱）
//! - 节气求解（太阳视黄经二分法）
//! - 五行强度分析（天干、地支、藏干加权）
//! - 十神关系计算
//! - 大运排盘（节气精确起运）与流年推算
//! - 用神建议与运势概况
//!
//! ## 技术特性
//!
//! - ✅ **立春换年**: 年柱以立春时刻为界，而非正月初一
//! - ✅ **节气定月**: 月柱以十二「节」交接，小寒前仍属子月
//! - ✅ **子时双模式**: 支持现代派与传统派 23 点换日
//! - ✅ **降级标记**: 天文计算遇到非有限数时返回参考值并标记 `degraded`
//!
//! ## 使用示例
//!
//! ```
//! use bazi_chart::{BaziChart, BirthInput, Gender, DaYunConfig, compute_decade_cycles};
//!
//! let chart = BaziChart::compute(
//!     BirthInput::new(1990, 5, 15, 14).with_gender(Gender::Male),
//! ).unwrap();
//! assert_eq!(chart.sizhu().labels().join(" "), "庚午 辛巳 庚辰 癸未");
//!
//! let dayun = compute_decade_cycles(&chart, &DaYunConfig::default()).unwrap();
//! assert_eq!(dayun[0].ganzhi.to_string(), "壬午");
//! ```

pub mod calculations;
pub mod chart;
pub mod constants;
pub mod dayun;
pub mod error;
pub mod interpretation;
pub mod shishen;
pub mod solar;
pub mod types;
pub mod wuxing;


pub use chart::{compute_chart, BaziChart, BirthInput};
pub use dayun::{
	annual_cycles_for_chart, calculate_start_age, compute_annual_cycles, compute_decade_cycles,
	dayun_direction, DaYun, DaYunConfig, DaYunDirection, LiuNian, StartAge, StartAgeMode,
};
pub use error::{Error, InputField, Result, ValidationError};
pub use interpretation::{useful_gods_advice, FortuneProfile, FortuneTone};
pub use shishen::{all_ten_gods, calculate_shishen, pillar_ten_gods, TenGod, TenGodSource};
pub use solar::{CalendarDateTime, SolarTerm, TermInstant};
pub use types::{
	CangGan, CangGanType, DiZhi, Estimate, GanZhi, Gender, ShiShen, SiZhu, SiZhuIndex, Strength,
	TianGan, WuXing, YinYang, ZiShiMode,
};
pub use wuxing::{WuXingAnalysis, WuXingChain, WuXingWeights};

/// 计算一柱相对日主的十神（天干 + 藏干）
pub fn compute_ten_gods(rizhu: TianGan, pillar: &str) -> core::result::Result<Vec<TenGod>, ValidationError> {
	let ganzhi: GanZhi = pillar.parse()?;
	Ok(pillar_ten_gods(rizhu, ganzhi))
}
