//! # 十神
//!
//! 以日主为「我」，按五行生克与阴阳异同判定其他天干的十神：
//!
//! | 关系 | 同性 | 异性 |
//! |------|------|------|
//! | 同干 | 比肩 | — |
//! | 同五行 | 劫财 | 劫财 |
//! | 我生 | 食神 | 伤官 |
//! | 生我 | 偏财 | 正财 |
//! | 我克 | 偏印 | 正印 |
//! | 克我 | 七杀 | 正官 |

use serde::Serialize;

use crate::types::{CangGanType, GanZhi, ShiShen, SiZhu, TianGan};

/// 十神来源
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum TenGodSource {
	/// 天干透出
	Stem,
	/// 地支藏干
	Hidden(CangGanType),
}

/// 一个天干相对日主的十神
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct TenGod {
	pub gan: TianGan,
	pub shishen: ShiShen,
	pub source: TenGodSource,
}

/// 十神判定；所有干对均有定义，返回 `None` 说明生克表有缺漏
fn classify(rizhu: TianGan, other: TianGan) -> Option<ShiShen> {
	if rizhu == other {
		return Some(ShiShen::BiJian);
	}
	let (me, it) = (rizhu.to_wuxing(), other.to_wuxing());
	let same_polarity = rizhu.is_yang() == other.is_yang();
	let pick = |same: ShiShen, opposite: ShiShen| if same_polarity { same } else { opposite };

	if me == it {
		Some(ShiShen::JieCai)
	} else if me.generates() == it {
		Some(pick(ShiShen::ShiShen, ShiShen::ShangGuan))
	} else if it.generates() == me {
		Some(pick(ShiShen::PianCai, ShiShen::ZhengCai))
	} else if me.overcomes() == it {
		Some(pick(ShiShen::PianYin, ShiShen::ZhengYin))
	} else if it.overcomes() == me {
		Some(pick(ShiShen::QiSha, ShiShen::ZhengGuan))
	} else {
		None
	}
}

/// 计算十神
pub fn calculate_shishen(rizhu: TianGan, other: TianGan) -> ShiShen {
	classify(rizhu, other).unwrap_or_else(|| {
		log::warn!(target: "bazi", "⚠️ 十神判定落空: {} 对 {}，按比肩处理", rizhu, other);
		ShiShen::BiJian
	})
}

/// 一柱的十神：天干 + 全部藏干
pub fn pillar_ten_gods(rizhu: TianGan, ganzhi: GanZhi) -> Vec<TenGod> {
	let stem = TenGod {
		gan: ganzhi.gan,
		shishen: calculate_shishen(rizhu, ganzhi.gan),
		source: TenGodSource::Stem,
	};
	core::iter::once(stem)
		.chain(ganzhi.zhi.canggan().map(|canggan| TenGod {
			gan: canggan.gan,
			shishen: calculate_shishen(rizhu, canggan.gan),
			source: TenGodSource::Hidden(canggan.canggan_type),
		}))
		.collect()
}

/// 年、月、时三柱天干的十神（日柱为日主本身，不计）
pub fn all_ten_gods(sizhu: &SiZhu) -> [TenGod; 3] {
	let rizhu = sizhu.rizhu();
	[sizhu.year_zhu, sizhu.month_zhu, sizhu.hour_zhu].map(|zhu| TenGod {
		gan: zhu.gan,
		shishen: calculate_shishen(rizhu, zhu.gan),
		source: TenGodSource::Stem,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::DiZhi;

	const JIA: TianGan = TianGan::JIA;
	const YI: TianGan = TianGan::YI;

	#[test]
	fn test_every_pair_is_classified() {
		for rizhu in TianGan::all() {
			for other in TianGan::all() {
				assert!(classify(rizhu, other).is_some(), "{} {}", rizhu, other);
			}
		}
	}

	#[test]
	fn test_jia_day_master_table() {
		let expected = [
			(TianGan::JIA, ShiShen::BiJian),
			(TianGan::YI, ShiShen::JieCai),
			(TianGan::BING, ShiShen::ShiShen),
			(TianGan::DING, ShiShen::ShangGuan),
			(TianGan::WU, ShiShen::PianYin),
			(TianGan::JI, ShiShen::ZhengYin),
			(TianGan::GENG, ShiShen::QiSha),
			(TianGan::XIN, ShiShen::ZhengGuan),
			(TianGan::REN, ShiShen::PianCai),
			(TianGan::GUI, ShiShen::ZhengCai),
		];
		for (other, shishen) in expected {
			assert_eq!(calculate_shishen(JIA, other), shishen, "甲 对 {}", other);
		}
	}

	#[test]
	fn test_same_element_is_jiecai_for_both_polarities() {
		assert_eq!(calculate_shishen(JIA, YI), ShiShen::JieCai);
		assert_eq!(calculate_shishen(YI, JIA), ShiShen::JieCai);
	}

	#[test]
	fn test_pillar_ten_gods_include_hidden_stems() {
		// 庚日主看辛巳：辛(劫财) + 藏干 丙(七杀) 庚(比肩) 戊(偏印)
		let gods = pillar_ten_gods(TianGan::GENG, GanZhi::new(TianGan::XIN, DiZhi::SI));
		assert_eq!(gods.len(), 4);
		assert_eq!(gods[0].shishen, ShiShen::JieCai);
		assert_eq!(gods[0].source, TenGodSource::Stem);
		assert_eq!(gods[1].shishen, ShiShen::QiSha);
		assert_eq!(gods[2].shishen, ShiShen::BiJian);
		assert_eq!(gods[3].source, TenGodSource::Hidden(CangGanType::YuQi));
	}

	#[test]
	fn test_all_ten_gods_skips_day_pillar() {
		let sizhu: SiZhu = "庚午 辛巳 庚辰 癸未".parse().unwrap();
		let gods = all_ten_gods(&sizhu);
		assert_eq!(gods[0].shishen, ShiShen::BiJian);
		assert_eq!(gods[1].shishen, ShiShen::JieCai);
		assert_eq!(gods[2].shishen, ShiShen::ShangGuan);
	}
}
