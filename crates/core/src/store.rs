//! Immutable in-memory record store, built once at startup and shared by
//! every request.

use std::collections::{HashMap, HashSet};

use crate::error::CoreError;
use crate::record::MasterRecord;

/// A validated snapshot of one entity's records in source order.
#[derive(Debug, Clone)]
pub struct RecordStore<R> {
    records: Vec<R>,
    by_id: HashMap<String, usize>,
    natural_keys: HashSet<String>,
}

impl<R: MasterRecord> RecordStore<R> {
    /// Build a store, rejecting duplicate ids and records whose create time
    /// is later than their update time.
    pub fn new(records: Vec<R>) -> Result<Self, CoreError> {
        let mut by_id = HashMap::with_capacity(records.len());
        let mut natural_keys = HashSet::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            if by_id.insert(record.id().to_string(), index).is_some() {
                return Err(CoreError::Validation(format!(
                    "duplicate {} id {}",
                    R::ENTITY,
                    record.id()
                )));
            }
            if record.create_time() > record.update_time() {
                return Err(CoreError::Validation(format!(
                    "{} {} has createTime after updateTime",
                    R::ENTITY,
                    record.id()
                )));
            }
            natural_keys.insert(record.natural_key());
        }

        Ok(Self {
            records,
            by_id,
            natural_keys,
        })
    }

    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            by_id: HashMap::new(),
            natural_keys: HashSet::new(),
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.by_id.get(id).map(|&index| &self.records[index])
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Whether a record with this natural key (see
    /// [`MasterRecord::natural_key`]) exists.
    pub fn contains_key(&self, natural_key: &str) -> bool {
        self.natural_keys.contains(natural_key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
