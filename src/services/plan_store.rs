//! 计划文件存储
//!
//! 每个用户一个目录，每次导入写一个 `<slug>.json`，整体覆盖

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::PlanData;
use crate::services::identity::Identity;
use crate::utils::slugify;

/// 名称生成的 slug 为空时使用的文件名
const FALLBACK_FILE_STEM: &str = "guia";

pub struct PlanStore {
    data_dir: PathBuf,
}

impl PlanStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// 解析并创建用户目录
    pub async fn user_dir(&self, identity: &Identity) -> AppResult<PathBuf> {
        let dir = self.data_dir.join(&identity.user_id);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::persistence(&dir, e))?;
        Ok(dir)
    }

    /// 计划对应的文件名
    pub fn file_name(plan: &PlanData) -> String {
        let slug = slugify(&plan.name);
        let stem = if slug.is_empty() { FALLBACK_FILE_STEM } else { slug.as_str() };
        format!("{}.json", stem)
    }

    /// 写入计划并返回文件路径
    ///
    /// 先写临时文件再重命名，目标文件要么是旧内容要么是完整的新内容。
    pub async fn save(&self, identity: &Identity, plan: &PlanData) -> AppResult<PathBuf> {
        let dir = self.user_dir(identity).await?;
        let path = dir.join(Self::file_name(plan));
        let json = to_pretty_json(&path, plan)?;

        write_atomic(&path, json.as_bytes()).await?;
        info!("💾 计划已保存: {}", path.display());
        Ok(path)
    }
}

/// 序列化失败归为写入错误
fn to_pretty_json<T: Serialize>(path: &Path, value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::persistence(path, e.into()))
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> AppResult<()> {
    let tmp = path.with_extension("json.tmp");
    debug!("写入临时文件: {}", tmp.display());

    fs::write(&tmp, bytes)
        .await
        .map_err(|e| AppError::persistence(&tmp, e))?;

    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(AppError::persistence(path, e));
    }
    Ok(())
}
