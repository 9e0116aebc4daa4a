// ==========================================
// Fertigung API - 领域模型层
// ==========================================
// 职责: 定义领域实体（纯数据容器，无行为）
// 红线: 不含数据访问逻辑
// ==========================================

pub mod machine;
pub mod material;
pub mod product;

// 重导出核心类型
pub use machine::{Machine, MachineCapability};
pub use material::Material;
pub use product::{MaterialRequirement, Product, ProductionStep};

/// 生成新的实体标识（不带连字符的 UUID v4，32位小写十六进制）
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
