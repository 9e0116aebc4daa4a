// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use fertigung_api::domain::{
    new_id, Machine, MachineCapability, Material, MaterialRequirement, Product, ProductionStep,
};
use serde_json::{json, Value};

// ==========================================
// Machine 构建器
// ==========================================

pub struct MachineBuilder {
    name: String,
    setup_time: f64,
    cost_per_minute: f64,
    failure_probability: f64,
    min_staff: u32,
    max_staff: u32,
    capabilities: Vec<(String, f64)>,
}

impl MachineBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            setup_time: 15.0,
            cost_per_minute: 1.5,
            failure_probability: 0.02,
            min_staff: 1,
            max_staff: 2,
            capabilities: Vec::new(),
        }
    }

    pub fn capability(mut self, step_id: &str, cycle_rate: f64) -> Self {
        self.capabilities.push((step_id.to_string(), cycle_rate));
        self
    }

    pub fn staff(mut self, min: u32, max: u32) -> Self {
        self.min_staff = min;
        self.max_staff = max;
        self
    }

    pub fn build(self) -> Machine {
        Machine {
            id: new_id(),
            name: self.name,
            setup_time: self.setup_time,
            cost_per_minute: self.cost_per_minute,
            failure_probability: self.failure_probability,
            min_staff: self.min_staff,
            max_staff: self.max_staff,
            capabilities: self
                .capabilities
                .into_iter()
                .map(|(step_id, cycle_rate)| MachineCapability {
                    id: new_id(),
                    step_id,
                    cycle_rate,
                })
                .collect(),
        }
    }

    /// 请求体（camelCase）
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "ruestzeit": self.setup_time,
            "kostenMinute": self.cost_per_minute,
            "ausfallWahrscheinlichkeit": self.failure_probability,
            "mitarbeiterMin": self.min_staff,
            "mitarbeiterMax": self.max_staff,
            "maschinenbefaehigungen": self
                .capabilities
                .iter()
                .map(|(step_id, rate)| json!({"schrittId": step_id, "taktrate": rate}))
                .collect::<Vec<_>>(),
        })
    }
}

// ==========================================
// Material 构建器
// ==========================================

pub struct MaterialBuilder {
    name: String,
    unit_cost: f64,
    stock: f64,
    restock_per_minute: f64,
}

impl MaterialBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            unit_cost: 2.0,
            stock: 100.0,
            restock_per_minute: 0.5,
        }
    }

    pub fn unit_cost(mut self, cost: f64) -> Self {
        self.unit_cost = cost;
        self
    }

    pub fn stock(mut self, stock: f64) -> Self {
        self.stock = stock;
        self
    }

    pub fn build(self) -> Material {
        Material {
            id: new_id(),
            name: self.name,
            unit_cost: self.unit_cost,
            stock: self.stock,
            restock_per_minute: self.restock_per_minute,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "kostenStueck": self.unit_cost,
            "bestand": self.stock,
            "aufstockenMinute": self.restock_per_minute,
        })
    }
}

// ==========================================
// Product 构建器
// ==========================================

pub struct ProductBuilder {
    name: String,
    sale_price: f64,
    steps: Vec<i64>,
    requirements: Vec<(Material, f64)>,
}

impl ProductBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            sale_price: 49.9,
            steps: Vec::new(),
            requirements: Vec::new(),
        }
    }

    pub fn step(mut self, sequence: i64) -> Self {
        self.steps.push(sequence);
        self
    }

    pub fn requirement(mut self, material: &Material, quantity: f64) -> Self {
        self.requirements.push((material.clone(), quantity));
        self
    }

    pub fn build(self) -> Product {
        Product {
            id: new_id(),
            name: self.name,
            sale_price: self.sale_price,
            steps: self
                .steps
                .into_iter()
                .map(|sequence| ProductionStep {
                    id: new_id(),
                    sequence,
                })
                .collect(),
            requirements: self
                .requirements
                .into_iter()
                .map(|(material, quantity)| MaterialRequirement {
                    id: new_id(),
                    material,
                    quantity,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "verkaufspreis": self.sale_price,
            "produktionsschritte": self
                .steps
                .iter()
                .map(|s| json!({"schritt": s}))
                .collect::<Vec<_>>(),
            "materialbedarf": self
                .requirements
                .iter()
                .map(|(m, q)| json!({"materialId": m.id, "menge": q}))
                .collect::<Vec<_>>(),
        })
    }
}
