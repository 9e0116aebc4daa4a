// ==========================================
// Fertigung API - 物料 API
// ==========================================
// 路由: /material/
// ==========================================

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::dto::{MaterialIn, MaterialTO};
use crate::api::error::ApiResult;
use crate::api::resource::ApiResource;
use crate::api::validator;
use crate::app::AppState;
use crate::domain::{new_id, Material};
use crate::repository::CrudRepository;

/// 物料资源
pub struct MaterialResource;

#[async_trait]
impl ApiResource for MaterialResource {
    const COLLECTION: &'static str = "/material/";
    const LABEL: &'static str = "Material";

    type Record = Material;
    type Input = MaterialIn;
    type Output = MaterialTO;

    fn repository(state: &AppState) -> Arc<dyn CrudRepository<Material>> {
        Arc::clone(&state.materials)
    }

    async fn into_record(_state: &AppState, input: MaterialIn) -> ApiResult<Material> {
        validator::validate_material(&input)?;

        Ok(Material {
            id: new_id(),
            name: input.name,
            unit_cost: input.kosten_stueck,
            stock: input.bestand,
            restock_per_minute: input.aufstocken_minute,
        })
    }

    fn to_output(record: Material) -> MaterialTO {
        record.into()
    }
}

impl From<Material> for MaterialTO {
    fn from(material: Material) -> Self {
        MaterialTO {
            id: material.id,
            name: material.name,
            kosten_stueck: material.unit_cost,
            bestand: material.stock,
            aufstocken_minute: material.restock_per_minute,
        }
    }
}
