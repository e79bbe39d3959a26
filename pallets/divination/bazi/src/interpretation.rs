//! # 命盘解读
//!
//! - 用神建议：按日主旺衰与五行平衡度给出文字建议
//! - 运势概况：按十神组合判定财运、事业、婚姻、健康、学业、人际六个方面的倾向

use serde::Serialize;

use crate::shishen::TenGod;
use crate::types::{ShiShen, Strength, TianGan};
use crate::wuxing::WuXingAnalysis;

/// 用神建议
pub fn useful_gods_advice(rizhu: TianGan, analysis: &WuXingAnalysis) -> Vec<String> {
	let element = rizhu.to_wuxing();
	let mut advice = Vec::new();

	match analysis.strength(element) {
		Strength::Weak => {
			advice.push(format!("日主{}偏弱，宜补{}，或以生{}之{}相助", element, element, element, element.generated_by()));
			advice.push(format!("忌{}过旺克身", element.overcome_by()));
		}
		Strength::Strong => {
			advice.push(format!("日主{}偏强，宜泄{}之气，可用{}", element, element, element.generates()));
			advice.push(format!("亦可用{}制衡", element.overcome_by()));
		}
		Strength::Medium => {}
	}

	let balance = analysis.balance();
	if balance < 0.3 {
		advice.push("五行严重失衡，需要重点调理".to_string());
	} else if balance < 0.6 {
		advice.push("五行略有失衡，适当调整即可".to_string());
	} else {
		advice.push("五行相对平衡，保持现状即可".to_string());
	}

	advice
}

// ============================================================================
// 运势概况
// ============================================================================

/// 运势倾向
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FortuneTone {
	/// 有利
	Favorable,
	/// 平稳
	Steady,
}

impl FortuneTone {
	pub fn label(self) -> &'static str {
		match self {
			FortuneTone::Favorable => "有利",
			FortuneTone::Steady => "平稳",
		}
	}
}

/// 六个方面的运势倾向
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FortuneProfile {
	pub wealth: FortuneTone,
	pub career: FortuneTone,
	pub marriage: FortuneTone,
	pub health: FortuneTone,
	pub study: FortuneTone,
	pub social: FortuneTone,
}

impl FortuneProfile {
	/// 按十神出现情况判定
	///
	/// | 十神 | 方面 |
	/// |------|------|
	/// | 正财 / 偏财 | 财运 |
	/// | 正官 / 七杀 | 事业、婚姻 |
	/// | 正印 / 偏印 | 健康 |
	/// | 食神 / 伤官 | 学业 |
	/// | 比肩 / 劫财 | 人际 |
	pub fn from_ten_gods(ten_gods: &[TenGod]) -> Self {
		let tone = |wanted: &[ShiShen]| {
			if ten_gods.iter().any(|g| wanted.contains(&g.shishen)) {
				FortuneTone::Favorable
			} else {
				FortuneTone::Steady
			}
		};
		let guan = tone(&[ShiShen::ZhengGuan, ShiShen::QiSha]);
		Self {
			wealth: tone(&[ShiShen::ZhengCai, ShiShen::PianCai]),
			career: guan,
			marriage: guan,
			health: tone(&[ShiShen::ZhengYin, ShiShen::PianYin]),
			study: tone(&[ShiShen::ShiShen, ShiShen::ShangGuan]),
			social: tone(&[ShiShen::BiJian, ShiShen::JieCai]),
		}
	}
}
