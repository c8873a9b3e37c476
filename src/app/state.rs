// ==========================================
// 铁路大亨 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 并发: 单写多读, 查询取读锁, 修改取写锁
// ==========================================

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::api::{ApiError, ApiResult, NetworkApi};
use crate::config::ConfigManager;

pub use crate::config::get_default_config_path;

/// 应用状态
///
/// 持有配置与路网API, 可在线程间共享
#[derive(Clone)]
pub struct AppState {
    /// 配置文件路径
    pub config_path: PathBuf,

    /// 启动时加载的配置
    pub config: Arc<ConfigManager>,

    /// 路网API
    pub network_api: Arc<RwLock<NetworkApi>>,
}

impl AppState {
    /// 创建新的AppState实例（空路网）
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 配置加载失败
    pub fn new<P: AsRef<Path>>(config_path: P) -> Result<Self, String> {
        let config_path = config_path.as_ref().to_path_buf();
        tracing::info!("初始化AppState，配置路径: {}", config_path.display());

        let config = ConfigManager::load(&config_path)
            .map_err(|e| format!("无法加载配置: {}", e))?;

        Ok(Self::with_config(config_path, config))
    }

    /// 以已构造的配置创建（测试/嵌入场景）
    pub fn with_config(config_path: PathBuf, config: ConfigManager) -> Self {
        let network_api = NetworkApi::new(&config);
        Self {
            config_path,
            config: Arc::new(config),
            network_api: Arc::new(RwLock::new(network_api)),
        }
    }

    /// 从车站/线路文件加载路网, 替换当前路网
    pub fn load_network<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        stations_path: P,
        lines_path: Q,
    ) -> ApiResult<()> {
        let loaded = NetworkApi::from_files(stations_path, lines_path, &self.config)?;
        self.write(|api| *api = loaded)
    }

    /// 在读锁下执行查询
    pub fn read<T>(&self, f: impl FnOnce(&NetworkApi) -> T) -> ApiResult<T> {
        let guard = self
            .network_api
            .read()
            .map_err(|e| ApiError::InternalError(format!("路网读锁失败: {}", e)))?;
        Ok(f(&guard))
    }

    /// 在写锁下执行修改
    pub fn write<T>(&self, f: impl FnOnce(&mut NetworkApi) -> T) -> ApiResult<T> {
        let mut guard = self
            .network_api
            .write()
            .map_err(|e| ApiError::InternalError(format!("路网写锁失败: {}", e)))?;
        Ok(f(&mut guard))
    }
}
