//! # 错误类型
//!
//! 输入校验错误与计算错误。

use core::fmt;

use serde::Serialize;

/// 出生时间字段
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum InputField {
	Year,
	Month,
	Day,
	Hour,
	Minute,
	DaYunSteps,
}

impl fmt::Display for InputField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			InputField::Year => "年份",
			InputField::Month => "月份",
			InputField::Day => "日期",
			InputField::Hour => "小时",
			InputField::Minute => "分钟",
			InputField::DaYunSteps => "大运步数",
		})
	}
}

/// 输入校验错误
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
	#[error("{field}超出范围: {value}（允许 {min}..={max}）")]
	OutOfRange {
		field: InputField,
		value: i64,
		min: i64,
		max: i64,
	},
	#[error("无效的天干索引: {0}")]
	InvalidTianGan(u8),
	#[error("无效的地支索引: {0}")]
	InvalidDiZhi(u8),
	#[error("无效的六十甲子索引: {0}")]
	InvalidGanZhiIndex(u8),
	#[error("无法识别的干支字符: {0}")]
	UnknownSymbol(char),
	#[error("无法解析的柱: {0:?}")]
	MalformedPillar(String),
	#[error("排大运需要性别")]
	MissingGender,
}

/// 八字计算错误
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Validation(#[from] ValidationError),
	#[error("大运列表为空，无法推算流年")]
	EmptyDaYun,
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

impl ValidationError {
	pub(crate) fn out_of_range(field: InputField, value: i64, min: i64, max: i64) -> Self {
		ValidationError::OutOfRange {
			field,
			value,
			min,
			max,
		}
	}
}
