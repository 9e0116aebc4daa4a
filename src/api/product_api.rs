// ==========================================
// Fertigung API - 产品 API
// ==========================================
// 路由: /produkte/
// 红线: 物料需求引用的物料必须已存在，否则不写入任何数据
// ==========================================

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::api::dto::{MaterialbedarfTO, ProduktIn, ProduktTO, ProduktionsschrittTO};
use crate::api::error::ApiResult;
use crate::api::resource::{missing_reference, ApiResource};
use crate::api::validator;
use crate::app::AppState;
use crate::domain::{new_id, MaterialRequirement, Product, ProductionStep};
use crate::repository::CrudRepository;

/// 产品资源
pub struct ProductResource;

#[async_trait]
impl ApiResource for ProductResource {
    const COLLECTION: &'static str = "/produkte/";
    const LABEL: &'static str = "Produkt";

    type Record = Product;
    type Input = ProduktIn;
    type Output = ProduktTO;

    fn repository(state: &AppState) -> Arc<dyn CrudRepository<Product>> {
        Arc::clone(&state.products)
    }

    async fn into_record(state: &AppState, input: ProduktIn) -> ApiResult<Product> {
        validator::validate_product(&input)?;

        // 解析共享物料引用
        let mut requirements = Vec::with_capacity(input.materialbedarf.len());
        for (i, requirement) in input.materialbedarf.into_iter().enumerate() {
            let material = state
                .materials
                .get(&requirement.material_id)
                .await
                .map_err(|e| {
                    missing_reference(format!("materialbedarf[{}].materialId", i), e.into())
                })?;

            requirements.push(MaterialRequirement {
                id: new_id(),
                material,
                quantity: requirement.menge,
            });
        }
        debug!(requirements = requirements.len(), "物料引用已解析");

        Ok(Product {
            id: new_id(),
            name: input.name,
            sale_price: input.verkaufspreis,
            steps: input
                .produktionsschritte
                .into_iter()
                .map(|s| ProductionStep {
                    id: new_id(),
                    sequence: s.schritt,
                })
                .collect(),
            requirements,
        })
    }

    fn to_output(record: Product) -> ProduktTO {
        record.into()
    }
}

impl From<Product> for ProduktTO {
    fn from(product: Product) -> Self {
        ProduktTO {
            id: product.id,
            name: product.name,
            verkaufspreis: product.sale_price,
            produktionsschritte: product
                .steps
                .into_iter()
                .map(|s| ProduktionsschrittTO {
                    id: s.id,
                    schritt: s.sequence,
                })
                .collect(),
            materialbedarf: product
                .requirements
                .into_iter()
                .map(|r| MaterialbedarfTO {
                    id: r.id,
                    material_id: r.material.id,
                    menge: r.quantity,
                })
                .collect(),
        }
    }
}
