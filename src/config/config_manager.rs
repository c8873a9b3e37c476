// ==========================================
// 铁路大亨 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: key-value (JSON 文件 + 环境变量覆写)
// 优先级: 环境变量 > 配置文件 > 内置默认值
// ==========================================

use crate::domain::time::TimeValue;
use crate::engine::maintenance::MaintenanceAlgorithm;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 环境变量前缀: `RAIL_TYCOON_` + 大写 key（`.` → `_`）
const ENV_PREFIX: &str = "RAIL_TYCOON_";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
}

impl ConfigManager {
    /// 创建仅含内置默认值的配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 对象字符串创建
    ///
    /// 值可为字符串/数字/布尔, 统一存为字符串
    pub fn from_json_str(raw: &str) -> Result<Self, Box<dyn Error>> {
        let parsed: Value = serde_json::from_str(raw)?;
        let object = parsed
            .as_object()
            .ok_or("配置文件顶层必须是 JSON 对象")?;

        let mut values = HashMap::with_capacity(object.len());
        for (key, value) in object {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Null => continue,
                other => other.to_string(),
            };
            values.insert(key.clone(), text);
        }

        Ok(Self { values })
    }

    /// 从 JSON 文件创建
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// 加载配置: 文件存在则读取, 否则使用默认值; 随后应用环境变量覆写
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let mut manager = if path.exists() {
            info!("加载配置文件: {}", path.display());
            Self::from_file(path)?
        } else {
            info!("配置文件不存在, 使用默认配置: {}", path.display());
            Self::new()
        };
        manager.apply_env_overrides();
        Ok(manager)
    }

    /// 应用环境变量覆写（仅覆写已知 key）
    pub fn apply_env_overrides(&mut self) {
        for key in config_keys::ALL {
            if let Ok(value) = std::env::var(env_var_name(key)) {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    self.values.insert(key.to_string(), trimmed.to_string());
                }
            }
        }
    }

    /// 读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// 读取配置值, 带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> String {
        self.get_config_value(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// 更新单个配置
    pub fn update_config(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    /// 获取所有生效配置的快照（JSON格式, 含默认值）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let mut effective: HashMap<&str, String> = HashMap::new();
        for (key, default) in config_keys::DEFAULTS {
            effective.insert(key, self.get_config_or_default(key, default));
        }
        for (key, value) in &self.values {
            effective.insert(key.as_str(), value.clone());
        }

        let json_value = json!(effective);
        Ok(serde_json::to_string(&json_value)?)
    }

    /// 从配置快照恢复配置（整体替换）
    pub fn restore_from_snapshot(&mut self, snapshot_json: &str) -> Result<(), Box<dyn Error>> {
        let restored = Self::from_json_str(snapshot_json)?;
        self.values = restored.values;
        Ok(())
    }

    // ===== 引擎配置 =====

    pub fn get_maintenance_algorithm(&self) -> MaintenanceAlgorithm {
        let value = self.get_config_or_default(config_keys::MAINTENANCE_ALGORITHM, "closed_form");
        value.parse().unwrap_or_else(|e| {
            warn!("{}, 回退为 closed_form", e);
            MaintenanceAlgorithm::ClosedForm
        })
    }

    pub fn get_allow_downgrade(&self) -> bool {
        let value = self.get_config_or_default(config_keys::UPGRADE_ALLOW_DOWNGRADE, "true");
        parse_bool(&value).unwrap_or(true)
    }

    pub fn get_cascade_station_removal(&self) -> bool {
        let value = self.get_config_or_default(config_keys::STATION_CASCADE_REMOVAL, "true");
        parse_bool(&value).unwrap_or(true)
    }

    // ===== 导入配置 =====

    pub fn get_default_construction_date(&self) -> TimeValue {
        let value =
            self.get_config_or_default(config_keys::IMPORT_DEFAULT_CONSTRUCTION_DATE, "2000-01-01");
        value.parse().unwrap_or(TimeValue::new(2000, 1, 1))
    }

    // ===== 基准测试配置 =====

    pub fn get_benchmark_sizes(&self) -> Vec<usize> {
        let value =
            self.get_config_or_default(config_keys::BENCHMARK_SIZES, "100,1000,10000,100000");

        let sizes: Vec<usize> = value
            .split(',')
            .filter_map(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .collect();

        if sizes.is_empty() {
            vec![100, 1000, 10000, 100000]
        } else {
            sizes
        }
    }

    pub fn get_benchmark_repetitions(&self) -> usize {
        let value = self.get_config_or_default(config_keys::BENCHMARK_REPETITIONS, "3");
        value.parse::<usize>().ok().filter(|&n| n > 0).unwrap_or(3)
    }

    pub fn get_benchmark_output_path(&self) -> String {
        self.get_config_or_default(config_keys::BENCHMARK_OUTPUT_PATH, "connectivity_benchmark.csv")
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

fn env_var_name(key: &str) -> String {
    format!("{}{}", ENV_PREFIX, key.replace('.', "_").to_uppercase())
}

/// 默认配置文件路径
///
/// 优先级: `RAIL_TYCOON_CONFIG` > 用户配置目录 > 当前目录
pub fn get_default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("RAIL_TYCOON_CONFIG") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::config_dir() {
        Some(config_dir) => config_dir.join("rail-tycoon").join("config.json"),
        None => PathBuf::from("./rail_tycoon.json"),
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 养护
    pub const MAINTENANCE_ALGORITHM: &str = "maintenance.algorithm";

    // 升级
    pub const UPGRADE_ALLOW_DOWNGRADE: &str = "upgrade.allow_downgrade";

    // 车站删除
    pub const STATION_CASCADE_REMOVAL: &str = "station.cascade_removal";

    // 导入
    pub const IMPORT_DEFAULT_CONSTRUCTION_DATE: &str = "import.default_construction_date";

    // 基准测试
    pub const BENCHMARK_SIZES: &str = "benchmark.sizes";
    pub const BENCHMARK_REPETITIONS: &str = "benchmark.repetitions";
    pub const BENCHMARK_OUTPUT_PATH: &str = "benchmark.output_path";

    pub const ALL: [&str; 7] = [
        MAINTENANCE_ALGORITHM,
        UPGRADE_ALLOW_DOWNGRADE,
        STATION_CASCADE_REMOVAL,
        IMPORT_DEFAULT_CONSTRUCTION_DATE,
        BENCHMARK_SIZES,
        BENCHMARK_REPETITIONS,
        BENCHMARK_OUTPUT_PATH,
    ];

    pub const DEFAULTS: [(&str, &str); 7] = [
        (MAINTENANCE_ALGORITHM, "closed_form"),
        (UPGRADE_ALLOW_DOWNGRADE, "true"),
        (STATION_CASCADE_REMOVAL, "true"),
        (IMPORT_DEFAULT_CONSTRUCTION_DATE, "2000-01-01"),
        (BENCHMARK_SIZES, "100,1000,10000,100000"),
        (BENCHMARK_REPETITIONS, "3"),
        (BENCHMARK_OUTPUT_PATH, "connectivity_benchmark.csv"),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConfigManager::new();
        assert_eq!(config.get_maintenance_algorithm(), MaintenanceAlgorithm::ClosedForm);
        assert!(config.get_allow_downgrade());
        assert!(config.get_cascade_station_removal());
        assert_eq!(config.get_default_construction_date(), TimeValue::new(2000, 1, 1));
        assert_eq!(config.get_benchmark_sizes(), vec![100, 1000, 10000, 100000]);
        assert_eq!(config.get_benchmark_repetitions(), 3);
        assert_eq!(config.get_benchmark_output_path(), "connectivity_benchmark.csv");
    }

    #[test]
    fn test_from_json_mixed_value_types() {
        let config = ConfigManager::from_json_str(
            r#"{
                "maintenance.algorithm": "linear_scan",
                "upgrade.allow_downgrade": false,
                "benchmark.repetitions": 5,
                "benchmark.sizes": "10, 20,x,0",
                "import.default_construction_date": "1990-07-04"
            }"#,
        )
        .unwrap();

        assert_eq!(config.get_maintenance_algorithm(), MaintenanceAlgorithm::LinearScan);
        assert!(!config.get_allow_downgrade());
        assert_eq!(config.get_benchmark_repetitions(), 5);
        assert_eq!(config.get_benchmark_sizes(), vec![10, 20]);
        assert_eq!(config.get_default_construction_date(), TimeValue::new(1990, 7, 4));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let mut config = ConfigManager::new();
        config.update_config(config_keys::MAINTENANCE_ALGORITHM, "weekly");
        config.update_config(config_keys::UPGRADE_ALLOW_DOWNGRADE, "maybe");
        config.update_config(config_keys::BENCHMARK_REPETITIONS, "0");
        assert_eq!(config.get_maintenance_algorithm(), MaintenanceAlgorithm::ClosedForm);
        assert!(config.get_allow_downgrade());
        assert_eq!(config.get_benchmark_repetitions(), 3);
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(ConfigManager::from_json_str("[1, 2]").is_err());
        assert!(ConfigManager::from_json_str("not json").is_err());
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut config = ConfigManager::new();
        config.update_config(config_keys::STATION_CASCADE_REMOVAL, "false");
        let snapshot = config.get_config_snapshot().unwrap();

        let mut restored = ConfigManager::new();
        restored.restore_from_snapshot(&snapshot).unwrap();
        assert!(!restored.get_cascade_station_removal());
        assert_eq!(restored.get_benchmark_repetitions(), 3);
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(
            env_var_name(config_keys::BENCHMARK_OUTPUT_PATH),
            "RAIL_TYCOON_BENCHMARK_OUTPUT_PATH"
        );
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = ConfigManager::load("/no/such/rail_tycoon.json").unwrap();
        assert!(config.get_benchmark_sizes().len() >= 1);
    }
}
