//! 用户身份
//!
//! 认证由外部完成，这里只负责拿到一个不透明的用户标识

use crate::error::{AppError, AppResult};

/// 已认证的用户
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
}

/// 身份提供者
pub trait IdentityProvider {
    fn current(&self) -> AppResult<Identity>;
}

/// 从配置读取固定的用户标识
#[derive(Debug, Clone, Default)]
pub struct ConfiguredIdentity {
    owner_id: Option<String>,
}

impl ConfiguredIdentity {
    pub fn new(owner_id: Option<String>) -> Self {
        Self { owner_id }
    }
}

impl IdentityProvider for ConfiguredIdentity {
    fn current(&self) -> AppResult<Identity> {
        self.owner_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| Identity {
                user_id: id.to_string(),
            })
            .ok_or_else(|| AppError::Auth("请先登录后再导入指南。".to_string()))
    }
}
