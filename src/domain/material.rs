// ==========================================
// Fertigung API - 物料领域模型
// ==========================================
// 用途: 可消耗的库存物料（叶子实体，被产品的物料需求共享引用）
// 对齐: material 表
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Material - 物料
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: String,              // 全局唯一标识（32位十六进制）
    pub name: String,            // 物料名称
    pub unit_cost: f64,          // 单件成本（kostenStueck）
    pub stock: f64,              // 当前库存（bestand）
    pub restock_per_minute: f64, // 每分钟补货量（aufstockenMinute）
}
