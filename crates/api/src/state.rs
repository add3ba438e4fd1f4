use std::sync::Arc;

use chrono::Utc;
use mdm_core::bom::BomRecord;
use mdm_core::error::CoreError;
use mdm_core::faults::{FaultPolicy, RandomFaults};
use mdm_core::fixtures::{generate_boms, generate_materials, seeded_rng};
use mdm_core::material::MaterialRecord;
use mdm_core::record::MasterRecord;
use mdm_core::store::RecordStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (everything is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// BOM records, generated once at startup.
    pub boms: Arc<RecordStore<BomRecord>>,
    /// Material records, generated once at startup.
    pub materials: Arc<RecordStore<MaterialRecord>>,
    /// Decides when mock actions simulate a failure.
    pub faults: Arc<dyn FaultPolicy>,
}

impl AppState {
    /// Generate both record stores from the mock settings and wire up random
    /// fault injection.
    pub fn from_config(config: ServerConfig) -> Result<Self, CoreError> {
        let seed = config.mock.seed.unwrap_or_else(rand::random);
        let mut rng = seeded_rng(seed);
        let now = Utc::now();

        let boms = RecordStore::new(generate_boms(config.mock.bom_count, now, &mut rng))?;
        let materials =
            RecordStore::new(generate_materials(config.mock.material_count, now, &mut rng))?;
        tracing::info!(
            seed,
            boms = boms.len(),
            materials = materials.len(),
            "Generated mock record stores"
        );

        let faults = RandomFaults::new(config.mock.fault_rates);

        Ok(Self {
            config: Arc::new(config),
            boms: Arc::new(boms),
            materials: Arc::new(materials),
            faults: Arc::new(faults),
        })
    }
}

/// A record type served under `/api/manufacture/<entity>`: ties the entity
/// to its store in [`AppState`] so handlers can be written once.
pub trait ServedEntity: MasterRecord {
    fn store(state: &AppState) -> &RecordStore<Self>;
}

impl ServedEntity for BomRecord {
    fn store(state: &AppState) -> &RecordStore<Self> {
        &state.boms
    }
}

impl ServedEntity for MaterialRecord {
    fn store(state: &AppState) -> &RecordStore<Self> {
        &state.materials
    }
}
