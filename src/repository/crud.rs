// ==========================================
// Fertigung API - 通用 CRUD 契约
// ==========================================
// 职责: 所有实体仓储共享的异步 CRUD 接口
// ==========================================

use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

/// 分页参数（skip/take）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub take: u32,
}

impl Page {
    pub fn new(skip: u32, take: u32) -> Self {
        Self { skip, take }
    }
}

/// 通用 CRUD 仓储
///
/// - list: 按插入顺序分页
/// - get: 不存在时返回 NotFound
/// - create: 连同所属子集合原子写入，返回读回的记录
/// - delete: 不存在时返回 NotFound，级联删除所属子集合
#[async_trait]
pub trait CrudRepository<T>: Send + Sync
where
    T: Send + 'static,
{
    async fn list(&self, page: Page) -> RepositoryResult<Vec<T>>;

    async fn get(&self, id: &str) -> RepositoryResult<T>;

    async fn create(&self, record: T) -> RepositoryResult<T>;

    async fn delete(&self, id: &str) -> RepositoryResult<()>;
}
