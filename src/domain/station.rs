// ==========================================
// 铁路大亨 - 车站实体
// ==========================================
// 红线: 车站不拥有关联建筑, 只持有回指引用
// ==========================================

use crate::domain::types::{Facing, GridCell, StationKind};
use serde::{Deserialize, Serialize};

/// 车站ID
pub type StationId = u32;

/// 工业建筑ID（外部协作方分配）
pub type IndustryId = u32;

/// 住宅街区ID（外部协作方分配）
pub type HouseBlockId = u32;

// ==========================================
// 关联建筑引用 (Structure Ref)
// ==========================================
// 封闭的标签变体, 替代运行时类型判断
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StructureRef {
    Industry(IndustryId),
    HouseBlock(HouseBlockId),
}

impl StructureRef {
    /// 是否持有库存（工业有, 住宅街区无）
    pub fn has_inventory(&self) -> bool {
        matches!(self, StructureRef::Industry(_))
    }

    /// 清除建筑上的"所属车站"指针
    pub fn clear_assigned_station(&self, directory: &mut dyn StructureDirectory) {
        match *self {
            StructureRef::Industry(id) => directory.clear_industry_station(id),
            StructureRef::HouseBlock(id) => directory.clear_house_block_station(id),
        }
    }
}

/// 外部建筑目录（工业 / 住宅街区由外部协作方持有）
///
/// 车站删除时通过此接口清空建筑的回指; 对不存在的建筑应为空操作。
pub trait StructureDirectory {
    fn clear_industry_station(&mut self, id: IndustryId);
    fn clear_house_block_station(&mut self, id: HouseBlockId);
}

// ==========================================
// 车站 (Station)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub position: GridCell,
    pub kind: StationKind,
    pub facing: Facing,
    /// 关联建筑（弱引用, 不拥有）
    pub associations: Vec<StructureRef>,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<String>, position: GridCell) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            kind: StationKind::Plain,
            facing: Facing::North,
            associations: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: StationKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    /// 关联建筑（重复关联忽略）
    pub fn associate(&mut self, structure: StructureRef) {
        if !self.associations.contains(&structure) {
            self.associations.push(structure);
        }
    }

    /// 释放全部关联: 清除每个建筑的回指并清空列表
    pub fn release_associations(&mut self, directory: &mut dyn StructureDirectory) {
        for structure in self.associations.drain(..) {
            structure.clear_assigned_station(directory);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingDirectory {
        industries: Vec<IndustryId>,
        house_blocks: Vec<HouseBlockId>,
    }

    impl StructureDirectory for RecordingDirectory {
        fn clear_industry_station(&mut self, id: IndustryId) {
            self.industries.push(id);
        }

        fn clear_house_block_station(&mut self, id: HouseBlockId) {
            self.house_blocks.push(id);
        }
    }

    #[test]
    fn test_structure_capabilities() {
        assert!(StructureRef::Industry(1).has_inventory());
        assert!(!StructureRef::HouseBlock(1).has_inventory());
    }

    #[test]
    fn test_release_associations_dispatches_by_variant() {
        let mut station = Station::new(1, "Alpha", GridCell::new(0, 0))
            .with_kind(StationKind::Depot)
            .with_facing(Facing::East);
        station.associate(StructureRef::Industry(7));
        station.associate(StructureRef::HouseBlock(3));
        station.associate(StructureRef::Industry(7));
        assert_eq!(station.associations.len(), 2);

        let mut directory = RecordingDirectory::default();
        station.release_associations(&mut directory);

        assert_eq!(directory.industries, vec![7]);
        assert_eq!(directory.house_blocks, vec![3]);
        assert!(station.associations.is_empty());
    }

    #[test]
    fn test_structure_ref_serde_shape() {
        let json = serde_json::to_string(&StructureRef::HouseBlock(4)).unwrap();
        assert_eq!(json, r#"{"type":"HOUSE_BLOCK","id":4}"#);
    }
}
