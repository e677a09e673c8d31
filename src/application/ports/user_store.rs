//! User Store Port - 用户存储抽象
//!
//! 演示用 CRUD 存储的抽象接口，具体实现为内存存储

use thiserror::Error;

use crate::domain::{User, UserPatch};

/// 用户存储错误
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User not found")]
    NotFound(i64),
}

/// User Store Port
///
/// 显式的存储对象，生命周期与进程一致；替代模块级可变全局变量
pub trait UserStorePort: Send + Sync {
    /// 列出所有用户（按 id 升序）
    fn list(&self) -> Vec<User>;

    /// 按 id 查询用户
    fn get(&self, id: i64) -> Result<User, UserStoreError>;

    /// 创建用户，id 分配为当前最大 id + 1
    fn create(&self, name: String, email: String) -> User;

    /// 部分更新用户
    fn update(&self, id: i64, patch: UserPatch) -> Result<User, UserStoreError>;

    /// 删除用户，返回被删除的记录
    fn delete(&self, id: i64) -> Result<User, UserStoreError>;
}
