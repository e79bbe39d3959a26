//! # 候选出生年份策略
//!
//! | 策略 | 男方用户 | 女方用户 | 为空时 |
//! |------|----------|----------|--------|
//! | `TraditionalAgePolicy` | 同龄或更年轻（0 ~ +窗口） | 同龄或更年长（-窗口 ~ 0） | 放宽为 ±窗口 |
//! | `SymmetricAgePolicy` | ±窗口 | ±窗口 | - |
//!
//! 两种策略都按参考年份限定候选人年龄区间，并限定在 1900-2100 年。
//! 年份按与用户年龄差由小到大排列。

use bazi_chart::constants::{MAX_YEAR, MIN_YEAR};
use bazi_chart::Gender;
use matchmaking_common::BirthYearPolicy;
use serde::{Deserialize, Serialize};

/// 按年龄差由小到大的偏移序列：0, -1, 1, -2, 2, ...
fn symmetric_offsets(window: u8) -> impl Iterator<Item = i32> {
    (0..=window as i32).flat_map(|d| if d == 0 { vec![0] } else { vec![-d, d] })
}

/// 候选年份是否在年龄区间与支持年份内
fn admissible(year: i32, reference_year: u16, min_age: u8, max_age: u8) -> bool {
    let age = reference_year as i32 - year;
    (MIN_YEAR as i32..=MAX_YEAR as i32).contains(&year)
        && (min_age as i32..=max_age as i32).contains(&age)
}

fn collect_years(
    user_birth_year: u16,
    offsets: impl Iterator<Item = i32>,
    reference_year: u16,
    min_age: u8,
    max_age: u8,
) -> Vec<u16> {
    offsets
        .map(|offset| user_birth_year as i32 + offset)
        .filter(|&year| admissible(year, reference_year, min_age, max_age))
        .map(|year| year as u16)
        .collect()
}

/// 传统年龄偏好：男方优先同龄或更年轻的女方，女方优先同龄或更年长的男方
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraditionalAgePolicy {
    pub window: u8,
    pub min_age: u8,
    pub max_age: u8,
}

impl Default for TraditionalAgePolicy {
    fn default() -> Self {
        Self {
            window: 5,
            min_age: 20,
            max_age: 40,
        }
    }
}

impl BirthYearPolicy for TraditionalAgePolicy {
    fn candidate_years(&self, user_birth_year: u16, user_gender: Gender, reference_year: u16) -> Vec<u16> {
        // 出生年份越晚越年轻
        let sign = match user_gender {
            Gender::Male => 1,
            Gender::Female => -1,
        };
        let preferred = (0..=self.window as i32).map(|d| d * sign);
        let years = collect_years(user_birth_year, preferred, reference_year, self.min_age, self.max_age);
        if !years.is_empty() {
            return years;
        }

        log::debug!(target: "recommendation", "🔍 {} 年无偏好候选年份，放宽为 ±{}", user_birth_year, self.window);
        collect_years(
            user_birth_year,
            symmetric_offsets(self.window),
            reference_year,
            self.min_age,
            self.max_age,
        )
    }
}

/// 不区分性别的 ±窗口 策略
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SymmetricAgePolicy {
    pub window: u8,
    pub min_age: u8,
    pub max_age: u8,
}

impl Default for SymmetricAgePolicy {
    fn default() -> Self {
        Self {
            window: 5,
            min_age: 20,
            max_age: 40,
        }
    }
}

impl BirthYearPolicy for SymmetricAgePolicy {
    fn candidate_years(&self, user_birth_year: u16, _user_gender: Gender, reference_year: u16) -> Vec<u16> {
        collect_years(
            user_birth_year,
            symmetric_offsets(self.window),
            reference_year,
            self.min_age,
            self.max_age,
        )
    }
}
