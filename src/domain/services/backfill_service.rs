use std::future::Future;
use std::sync::Arc;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::models::identity::EntityKind;
use crate::domain::ports::{MaterialRepository, PropertyRepository, UserRepository};
use crate::domain::services::id_allocator::IdAllocator;
use crate::domain::services::prefix::{property_prefix, role_prefix, MATERIAL_PREFIX};
use crate::error::AppError;

const BATCH_SIZE: i64 = 100;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct BackfillReport {
    pub kind: EntityKind,
    pub scanned: u64,
    pub assigned: u64,
}

/// One-time assignment of unique ids to rows created before ids existed.
pub struct BackfillService {
    allocator: Arc<IdAllocator>,
    users: Arc<dyn UserRepository>,
    properties: Arc<dyn PropertyRepository>,
    materials: Arc<dyn MaterialRepository>,
    max_retries: u32,
}

impl BackfillService {
    pub fn new(
        allocator: Arc<IdAllocator>,
        users: Arc<dyn UserRepository>,
        properties: Arc<dyn PropertyRepository>,
        materials: Arc<dyn MaterialRepository>,
        max_retries: u32,
    ) -> Self {
        Self { allocator, users, properties, materials, max_retries }
    }

    pub async fn run(&self, kind: EntityKind) -> Result<BackfillReport, AppError> {
        let mut report = BackfillReport { kind, scanned: 0, assigned: 0 };
        info!(kind = %kind, max_retries = self.max_retries, "Starting unique id backfill");

        match kind {
            EntityKind::User => loop {
                let batch = self.users.list_missing_unique_id(BATCH_SIZE).await?;
                if batch.is_empty() { break; }
                for user in batch {
                    report.scanned += 1;
                    let prefix = role_prefix(user.role()?);
                    let users = &self.users;
                    let assigned = self.assign(prefix, kind, |id| {
                        let record_id = user.id.clone();
                        async move { users.set_unique_id(&record_id, &id).await }
                    }).await?;
                    self.tally(&mut report, &user.id, assigned);
                }
            },
            EntityKind::Property => loop {
                let batch = self.properties.list_missing_unique_id(BATCH_SIZE).await?;
                if batch.is_empty() { break; }
                for property in batch {
                    report.scanned += 1;
                    let prefix = property_prefix(&property.location);
                    let properties = &self.properties;
                    let assigned = self.assign(&prefix, kind, |id| {
                        let record_id = property.id.clone();
                        async move { properties.set_unique_id(&record_id, &id).await }
                    }).await?;
                    self.tally(&mut report, &property.id, assigned);
                }
            },
            EntityKind::Material => loop {
                let batch = self.materials.list_missing_unique_id(BATCH_SIZE).await?;
                if batch.is_empty() { break; }
                for material in batch {
                    report.scanned += 1;
                    let materials = &self.materials;
                    let assigned = self.assign(MATERIAL_PREFIX, kind, |id| {
                        let record_id = material.id.clone();
                        async move { materials.set_unique_id(&record_id, &id).await }
                    }).await?;
                    self.tally(&mut report, &material.id, assigned);
                }
            },
        }

        info!(kind = %kind, scanned = report.scanned, assigned = report.assigned, "Unique id backfill finished");
        Ok(report)
    }

    async fn assign<F, Fut>(&self, prefix: &str, kind: EntityKind, set: F) -> Result<bool, AppError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<bool, AppError>>,
    {
        self.allocator.create_with_retries(prefix, kind, self.max_retries, set).await
    }

    fn tally(&self, report: &mut BackfillReport, record_id: &str, assigned: bool) {
        if assigned {
            report.assigned += 1;
        } else {
            // Someone else filled it between our read and write; their id stands.
            warn!(kind = %report.kind, record_id = %record_id, "Record already had a unique id, skipped");
        }
    }
}
