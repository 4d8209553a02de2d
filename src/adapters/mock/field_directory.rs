use crate::domain::{FieldId, VenueId};
use crate::ports::Result;
use crate::ports::field_directory::FieldDirectory as FieldDirectoryTrait;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Mock implementation of FieldDirectory
///
/// Fields are registered together with the venue they belong to.
pub struct FieldDirectory {
    fields: Mutex<HashMap<FieldId, VenueId>>,
}

impl FieldDirectory {
    pub fn new() -> Self {
        Self {
            fields: Mutex::new(HashMap::new()),
        }
    }

    /// Add a field for testing purposes
    pub fn add_field(&self, field_id: FieldId, venue_id: VenueId) {
        self.fields
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(field_id, venue_id);
    }
}

impl Default for FieldDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FieldDirectoryTrait for FieldDirectory {
    async fn venue_of(&self, field_id: FieldId) -> Result<Option<VenueId>> {
        Ok(self
            .fields
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&field_id)
            .copied())
    }
}
