// ==========================================
// Fertigung API - 机器领域模型
// ==========================================
// 红线: 机器独占其能力列表，删除机器即删除能力
// 对齐: maschine / maschinenbefaehigung 表
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// MachineCapability - 机器能力
// ==========================================
/// 机器执行某个生产步骤的能力
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineCapability {
    pub id: String,
    pub step_id: String,  // 生产步骤标识（schrittId）
    pub cycle_rate: f64,  // 节拍（taktrate）
}

// ==========================================
// Machine - 机器
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    // ===== 主键 =====
    pub id: String,

    // ===== 基础信息 =====
    pub name: String,
    pub setup_time: f64,          // 换型时间（ruestzeit）
    pub cost_per_minute: f64,     // 每分钟成本（kostenMinute）
    pub failure_probability: f64, // 故障概率 [0, 1]（ausfallWahrscheinlichkeit）

    // ===== 人员配置 =====
    pub min_staff: u32, // 最少操作人员（mitarbeiterMin）
    pub max_staff: u32, // 最多操作人员（mitarbeiterMax）

    // ===== 能力列表（有序，随机器一同创建/删除）=====
    pub capabilities: Vec<MachineCapability>,
}
