// ==========================================
// 纺织原料采购计划系统 - 配置加载器
// ==========================================
// 职责: 从 JSON 字符串/文件加载计划参数,生成配置快照
// 红线: 加载后立即校验,非法配置不得进入计划运行
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::planning_config::PlanningConfig;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub struct ConfigLoader;

impl ConfigLoader {
    /// 从 JSON 字符串加载配置（缺省字段取默认值）
    ///
    /// # 参数
    /// - json: 配置 JSON
    ///
    /// # 返回
    /// - Ok(PlanningConfig): 已校验的配置
    /// - Err: 解析失败或校验失败
    pub fn from_json_str(json: &str) -> ConfigResult<PlanningConfig> {
        let config: PlanningConfig = serde_json::from_str(json)?;
        config.validate()?;
        debug!(?config, "配置加载完成");
        Ok(config)
    }

    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<PlanningConfig> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config = Self::from_json_str(&content)?;
        info!(path = %path.display(), "已从文件加载计划配置");
        Ok(config)
    }

    /// 生成配置快照（JSON,键按字典序）
    ///
    /// # 用途
    /// - 记录到每次计划运行报告
    /// - 复现历史运行时恢复参数
    pub fn snapshot(config: &PlanningConfig) -> ConfigResult<String> {
        // serde_json::Value 的对象按键排序,保证快照稳定
        let value = serde_json::to_value(config)?;
        Ok(serde_json::to_string(&value)?)
    }

    /// 从配置快照恢复配置
    pub fn restore_from_snapshot(snapshot_json: &str) -> ConfigResult<PlanningConfig> {
        Self::from_json_str(snapshot_json)
    }
}
