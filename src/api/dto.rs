// ==========================================
// Fertigung API - 请求/响应 DTO
// ==========================================
// 约定: 线上字段名为 camelCase；请求同时接受 snake_case 字段名
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// 分页
// ==========================================

/// 分页查询参数（?skip=&take=）
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub skip: Option<u32>,
    pub take: Option<u32>,
}

/// 删除成功响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

// ==========================================
// 机器
// ==========================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaschinenBefaehigungIn {
    #[serde(alias = "schritt_id")]
    pub schritt_id: String,
    pub taktrate: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaschineIn {
    pub name: String,
    pub ruestzeit: f64,
    #[serde(alias = "kosten_minute")]
    pub kosten_minute: f64,
    #[serde(alias = "ausfall_wahrscheinlichkeit")]
    pub ausfall_wahrscheinlichkeit: f64,
    #[serde(alias = "mitarbeiter_min")]
    pub mitarbeiter_min: u32,
    #[serde(alias = "mitarbeiter_max")]
    pub mitarbeiter_max: u32,
    pub maschinenbefaehigungen: Vec<MaschinenBefaehigungIn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaschinenBefaehigungTO {
    pub id: String,
    pub schritt_id: String,
    pub taktrate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaschineTO {
    pub id: String,
    pub name: String,
    pub ruestzeit: f64,
    pub kosten_minute: f64,
    pub ausfall_wahrscheinlichkeit: f64,
    pub mitarbeiter_min: u32,
    pub mitarbeiter_max: u32,
    pub maschinenbefaehigungen: Vec<MaschinenBefaehigungTO>,
}

// ==========================================
// 物料
// ==========================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialIn {
    pub name: String,
    #[serde(alias = "kosten_stueck")]
    pub kosten_stueck: f64,
    pub bestand: f64,
    #[serde(alias = "aufstocken_minute")]
    pub aufstocken_minute: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialTO {
    pub id: String,
    pub name: String,
    pub kosten_stueck: f64,
    pub bestand: f64,
    pub aufstocken_minute: f64,
}

// ==========================================
// 产品
// ==========================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProduktionsschrittIn {
    pub schritt: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialbedarfIn {
    #[serde(alias = "material_id")]
    pub material_id: String,
    pub menge: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProduktIn {
    pub name: String,
    pub verkaufspreis: f64,
    pub produktionsschritte: Vec<ProduktionsschrittIn>,
    pub materialbedarf: Vec<MaterialbedarfIn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProduktionsschrittTO {
    pub id: String,
    pub schritt: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialbedarfTO {
    pub id: String,
    pub material_id: String,
    pub menge: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProduktTO {
    pub id: String,
    pub name: String,
    pub verkaufspreis: f64,
    pub produktionsschritte: Vec<ProduktionsschrittTO>,
    pub materialbedarf: Vec<MaterialbedarfTO>,
}
