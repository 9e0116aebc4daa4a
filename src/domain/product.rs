// ==========================================
// Fertigung API - 产品领域模型
// ==========================================
// 红线: 生产步骤、物料需求归产品所有；物料本身为共享引用
// 对齐: produkt / produktionsschritt / materialbedarf 表
// ==========================================

use crate::domain::material::Material;
use serde::{Deserialize, Serialize};

/// 生产步骤（产品制造中的有序阶段）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionStep {
    pub id: String,
    pub sequence: i64, // 步骤序号（schritt）
}

/// 物料需求（每单位产品消耗的物料数量）
///
/// `material` 为已解析的共享物料，创建时必须指向已存在的物料。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRequirement {
    pub id: String,
    pub material: Material,
    pub quantity: f64, // 需求数量（menge）
}

// ==========================================
// Product - 产品
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sale_price: f64, // 销售价格（verkaufspreis）
    pub steps: Vec<ProductionStep>,
    pub requirements: Vec<MaterialRequirement>,
}
