// ==========================================
// Fertigung API - 机器 API
// ==========================================
// 路由: /maschinen/
// ==========================================

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::dto::{MaschineIn, MaschineTO, MaschinenBefaehigungTO};
use crate::api::error::ApiResult;
use crate::api::resource::ApiResource;
use crate::api::validator;
use crate::app::AppState;
use crate::domain::{new_id, Machine, MachineCapability};
use crate::repository::CrudRepository;

/// 机器资源
pub struct MachineResource;

#[async_trait]
impl ApiResource for MachineResource {
    const COLLECTION: &'static str = "/maschinen/";
    const LABEL: &'static str = "Maschine";

    type Record = Machine;
    type Input = MaschineIn;
    type Output = MaschineTO;

    fn repository(state: &AppState) -> Arc<dyn CrudRepository<Machine>> {
        Arc::clone(&state.machines)
    }

    async fn into_record(_state: &AppState, input: MaschineIn) -> ApiResult<Machine> {
        validator::validate_machine(&input)?;

        Ok(Machine {
            id: new_id(),
            name: input.name,
            setup_time: input.ruestzeit,
            cost_per_minute: input.kosten_minute,
            failure_probability: input.ausfall_wahrscheinlichkeit,
            min_staff: input.mitarbeiter_min,
            max_staff: input.mitarbeiter_max,
            capabilities: input
                .maschinenbefaehigungen
                .into_iter()
                .map(|c| MachineCapability {
                    id: new_id(),
                    step_id: c.schritt_id,
                    cycle_rate: c.taktrate,
                })
                .collect(),
        })
    }

    fn to_output(record: Machine) -> MaschineTO {
        record.into()
    }
}

impl From<Machine> for MaschineTO {
    fn from(machine: Machine) -> Self {
        MaschineTO {
            id: machine.id,
            name: machine.name,
            ruestzeit: machine.setup_time,
            kosten_minute: machine.cost_per_minute,
            ausfall_wahrscheinlichkeit: machine.failure_probability,
            mitarbeiter_min: machine.min_staff,
            mitarbeiter_max: machine.max_staff,
            maschinenbefaehigungen: machine
                .capabilities
                .into_iter()
                .map(|c| MaschinenBefaehigungTO {
                    id: c.id,
                    schritt_id: c.step_id,
                    taktrate: c.cycle_rate,
                })
                .collect(),
        }
    }
}
