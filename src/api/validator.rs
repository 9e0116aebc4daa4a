// ==========================================
// Fertigung API - 输入校验器
// ==========================================
// 职责: 在构造领域记录前校验请求值，汇总所有违规字段后一次性返回
// ==========================================

use crate::api::dto::{MaschineIn, MaterialIn, PageQuery, ProduktIn};
use crate::api::error::{ApiError, ApiResult, ValidationViolation};
use crate::config::ServerConfig;
use crate::repository::Page;

// ==========================================
// Violations - 违规收集器
// ==========================================
#[derive(Debug, Default)]
struct Violations {
    items: Vec<ValidationViolation>,
}

impl Violations {
    fn push(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.items.push(ValidationViolation {
            field: field.into(),
            reason: reason.into(),
        });
    }

    fn not_blank(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "must not be empty");
        }
    }

    fn non_negative(&mut self, field: &str, value: f64) {
        if !value.is_finite() || value < 0.0 {
            self.push(field, "must be a finite number >= 0");
        }
    }

    fn positive(&mut self, field: &str, value: f64) {
        if !value.is_finite() || value <= 0.0 {
            self.push(field, "must be a finite number > 0");
        }
    }

    fn probability(&mut self, field: &str, value: f64) {
        if !(0.0..=1.0).contains(&value) {
            self.push(field, "must be between 0 and 1");
        }
    }

    fn finish(self, entity: &str) -> ApiResult<()> {
        if self.items.is_empty() {
            return Ok(());
        }
        Err(ApiError::ValidationFailed {
            reason: format!("{} input has {} invalid field(s)", entity, self.items.len()),
            violations: self.items,
        })
    }
}

/// 解析分页参数
///
/// - skip 缺省为 0
/// - take 缺省为配置的 default_take，必须在 1..=max_take 之间
pub fn resolve_page(query: &PageQuery, config: &ServerConfig) -> ApiResult<Page> {
    let skip = query.skip.unwrap_or(0);
    let take = query.take.unwrap_or(config.default_take);

    if take == 0 || take > config.max_take {
        return Err(ApiError::ValidationFailed {
            reason: format!("take must be between 1 and {}", config.max_take),
            violations: vec![ValidationViolation {
                field: "take".to_string(),
                reason: format!("got {}", take),
            }],
        });
    }
    Ok(Page::new(skip, take))
}

/// 校验机器请求
pub fn validate_machine(input: &MaschineIn) -> ApiResult<()> {
    let mut v = Violations::default();

    v.not_blank("name", &input.name);
    v.non_negative("ruestzeit", input.ruestzeit);
    v.non_negative("kostenMinute", input.kosten_minute);
    v.probability("ausfallWahrscheinlichkeit", input.ausfall_wahrscheinlichkeit);
    if input.mitarbeiter_min > input.mitarbeiter_max {
        v.push("mitarbeiterMin", "must not exceed mitarbeiterMax");
    }

    for (i, capability) in input.maschinenbefaehigungen.iter().enumerate() {
        v.not_blank(
            &format!("maschinenbefaehigungen[{}].schrittId", i),
            &capability.schritt_id,
        );
        v.positive(
            &format!("maschinenbefaehigungen[{}].taktrate", i),
            capability.taktrate,
        );
    }

    v.finish("Maschine")
}

/// 校验物料请求
pub fn validate_material(input: &MaterialIn) -> ApiResult<()> {
    let mut v = Violations::default();

    v.not_blank("name", &input.name);
    v.non_negative("kostenStueck", input.kosten_stueck);
    v.non_negative("bestand", input.bestand);
    v.non_negative("aufstockenMinute", input.aufstocken_minute);

    v.finish("Material")
}

/// 校验产品请求（物料是否存在由调用方另行解析）
pub fn validate_product(input: &ProduktIn) -> ApiResult<()> {
    let mut v = Violations::default();

    v.not_blank("name", &input.name);
    v.non_negative("verkaufspreis", input.verkaufspreis);

    for (i, step) in input.produktionsschritte.iter().enumerate() {
        if step.schritt < 0 {
            v.push(format!("produktionsschritte[{}].schritt", i), "must be >= 0");
        }
    }
    for (i, requirement) in input.materialbedarf.iter().enumerate() {
        v.not_blank(
            &format!("materialbedarf[{}].materialId", i),
            &requirement.material_id,
        );
        v.positive(&format!("materialbedarf[{}].menge", i), requirement.menge);
    }

    v.finish("Produkt")
}
