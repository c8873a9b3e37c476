// ==========================================
// 铁路大亨 - 领域类型定义
// ==========================================
// 红线: 线路等级为封闭枚举, code 稳定不可复用
// ==========================================

use crate::domain::error::NetworkError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 线路等级 (Line Category)
// ==========================================
// code: 外部编码(文件/数据库), 单价: 每单位长度建设成本
// 注意: 单价不保证单调, 允许"升级"到更便宜的等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineCategory {
    SingleTrack,            // 单线
    DoubleTrack,            // 复线
    ElectrifiedSingleTrack, // 电气化单线
    ElectrifiedDoubleTrack, // 电气化复线
}

impl LineCategory {
    /// 全部等级（按 code 升序）
    pub const ALL: [LineCategory; 4] = [
        LineCategory::SingleTrack,
        LineCategory::DoubleTrack,
        LineCategory::ElectrifiedSingleTrack,
        LineCategory::ElectrifiedDoubleTrack,
    ];

    /// 每单位长度成本
    pub const fn unit_cost(self) -> i64 {
        match self {
            LineCategory::SingleTrack => 10,
            LineCategory::DoubleTrack => 25,
            LineCategory::ElectrifiedSingleTrack => 40,
            LineCategory::ElectrifiedDoubleTrack => 60,
        }
    }

    /// 外部编码
    pub const fn code(self) -> i32 {
        match self {
            LineCategory::SingleTrack => 1,
            LineCategory::DoubleTrack => 2,
            LineCategory::ElectrifiedSingleTrack => 3,
            LineCategory::ElectrifiedDoubleTrack => 4,
        }
    }

    /// 从外部编码解析
    ///
    /// # 返回
    /// - Err(NetworkError::UnknownCategory): code 未定义
    pub fn from_code(code: i32) -> Result<Self, NetworkError> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or(NetworkError::UnknownCategory(code))
    }

    fn bit(self) -> u8 {
        1 << (self.code() - 1)
    }
}

impl fmt::Display for LineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineCategory::SingleTrack => write!(f, "SINGLE_TRACK"),
            LineCategory::DoubleTrack => write!(f, "DOUBLE_TRACK"),
            LineCategory::ElectrifiedSingleTrack => write!(f, "ELECTRIFIED_SINGLE_TRACK"),
            LineCategory::ElectrifiedDoubleTrack => write!(f, "ELECTRIFIED_DOUBLE_TRACK"),
        }
    }
}

// ==========================================
// 线路等级集合 (Category Set)
// ==========================================
// 连通性查询的"排除集", 位掩码实现
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CategorySet {
    bits: u8,
}

impl CategorySet {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub fn all() -> Self {
        LineCategory::ALL.into_iter().collect()
    }

    pub fn insert(&mut self, category: LineCategory) {
        self.bits |= category.bit();
    }

    pub fn remove(&mut self, category: LineCategory) {
        self.bits &= !category.bit();
    }

    pub fn contains(&self, category: LineCategory) -> bool {
        self.bits & category.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// self ⊆ other
    pub fn is_subset(&self, other: &CategorySet) -> bool {
        self.bits & !other.bits == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = LineCategory> + '_ {
        LineCategory::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

impl FromIterator<LineCategory> for CategorySet {
    fn from_iter<I: IntoIterator<Item = LineCategory>>(iter: I) -> Self {
        let mut set = CategorySet::empty();
        for category in iter {
            set.insert(category);
        }
        set
    }
}

impl From<&[LineCategory]> for CategorySet {
    fn from(categories: &[LineCategory]) -> Self {
        categories.iter().copied().collect()
    }
}

impl fmt::Display for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|c| c.to_string()).collect();
        write!(f, "[{}]", names.join(","))
    }
}

// ==========================================
// 车站类型 (Station Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StationKind {
    Plain,    // 普通站
    Depot,    // 车辆段
    Terminal, // 终点站
}

impl fmt::Display for StationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationKind::Plain => write!(f, "PLAIN"),
            StationKind::Depot => write!(f, "DEPOT"),
            StationKind::Terminal => write!(f, "TERMINAL"),
        }
    }
}

// ==========================================
// 朝向 (Facing)
// ==========================================
// 外部以方向字符串表示, 大小写不敏感, 支持首字母缩写
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Facing {
    North,
    East,
    South,
    West,
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facing::North => write!(f, "NORTH"),
            Facing::East => write!(f, "EAST"),
            Facing::South => write!(f, "SOUTH"),
            Facing::West => write!(f, "WEST"),
        }
    }
}

impl FromStr for Facing {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NORTH" | "N" => Ok(Facing::North),
            "EAST" | "E" => Ok(Facing::East),
            "SOUTH" | "S" => Ok(Facing::South),
            "WEST" | "W" => Ok(Facing::West),
            _ => Err(NetworkError::InvalidFacing(s.to_string())),
        }
    }
}

// ==========================================
// 网格坐标 (Grid Cell)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_codes_unique_and_stable() {
        let codes: Vec<i32> = LineCategory::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(codes, vec![1, 2, 3, 4]);

        for category in LineCategory::ALL {
            assert_eq!(LineCategory::from_code(category.code()).unwrap(), category);
        }
    }

    #[test]
    fn test_category_unknown_code() {
        assert!(matches!(
            LineCategory::from_code(0),
            Err(NetworkError::UnknownCategory(0))
        ));
        assert!(matches!(
            LineCategory::from_code(99),
            Err(NetworkError::UnknownCategory(99))
        ));
    }

    #[test]
    fn test_category_set_operations() {
        let mut set = CategorySet::empty();
        assert!(set.is_empty());

        set.insert(LineCategory::DoubleTrack);
        set.insert(LineCategory::DoubleTrack);
        assert_eq!(set.len(), 1);
        assert!(set.contains(LineCategory::DoubleTrack));
        assert!(!set.contains(LineCategory::SingleTrack));

        let wider: CategorySet = [LineCategory::DoubleTrack, LineCategory::SingleTrack]
            .into_iter()
            .collect();
        assert!(set.is_subset(&wider));
        assert!(!wider.is_subset(&set));
        assert!(CategorySet::empty().is_subset(&set));
        assert_eq!(CategorySet::all().len(), 4);

        set.remove(LineCategory::DoubleTrack);
        assert!(set.is_empty());
    }

    #[test]
    fn test_category_set_display() {
        let set: CategorySet = [LineCategory::ElectrifiedSingleTrack, LineCategory::SingleTrack]
            .into_iter()
            .collect();
        assert_eq!(set.to_string(), "[SINGLE_TRACK,ELECTRIFIED_SINGLE_TRACK]");
    }

    #[test]
    fn test_facing_parse() {
        assert_eq!("north".parse::<Facing>().unwrap(), Facing::North);
        assert_eq!(" W ".parse::<Facing>().unwrap(), Facing::West);
        assert!(matches!(
            "up".parse::<Facing>(),
            Err(NetworkError::InvalidFacing(_))
        ));
    }
}
