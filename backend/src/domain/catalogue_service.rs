//! Car catalogue service: query/command facade plus the batch ingestion
//! orchestrator.
//!
//! Batch ingestion runs in four steps: validate registration numbers (invalid
//! entries are dropped, not errors), fan out concurrent lookups and join them
//! all, collapse the results into a map keyed by registration number (the map
//! is the dedup mechanism), then fan out concurrent inserts with fail-fast on
//! the first repository error. Rows written by sibling tasks before the
//! failure stay written; the caller still receives a single error.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::domain::car::{Car, CarDraft, CarFilter, CarId};
use crate::domain::error::{Error, ErrorCode};
use crate::domain::ports::{
    CarRepository, CarRepositoryError, CarsCommand, CarsQuery, VehicleLookup,
};
use crate::domain::validation::{validate_reg_num, validate_year};

/// Implements [`CarsQuery`] and [`CarsCommand`] over injected driven ports.
pub struct CarCatalogueService<R, L> {
    repository: Arc<R>,
    lookup: Arc<L>,
}

impl<R, L> CarCatalogueService<R, L>
where
    R: CarRepository + 'static,
    L: VehicleLookup + 'static,
{
    pub fn new(repository: Arc<R>, lookup: Arc<L>) -> Self {
        Self { repository, lookup }
    }

    /// Fan out one lookup task per valid registration number, join them all,
    /// and fold the successes into a map keyed by registration number.
    ///
    /// Invalid numbers and failed lookups are logged and dropped; neither
    /// fails the batch. The fold runs after the join barrier, so no task
    /// mutates shared state.
    async fn enrich(&self, reg_nums: Vec<String>) -> HashMap<String, CarDraft> {
        let mut tasks = JoinSet::new();
        for reg_num in reg_nums {
            if !validate_reg_num(&reg_num) {
                debug!(reg_num, "skipping invalid registration number");
                continue;
            }
            let lookup = Arc::clone(&self.lookup);
            tasks.spawn(async move {
                let outcome = lookup.fetch_by_reg_num(&reg_num).await;
                (reg_num, outcome)
            });
        }

        let mut drafts = HashMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((reg_num, Ok(draft))) => {
                    drafts.insert(reg_num, draft);
                }
                Ok((reg_num, Err(cause))) => {
                    debug!(reg_num, %cause, "dropping registration number after failed lookup");
                }
                Err(cause) => {
                    warn!(%cause, "enrichment task did not complete");
                }
            }
        }
        drafts
    }

    /// Fan out one insert task per enriched draft and collect the results.
    ///
    /// Returns on the first repository error; dropping the task set aborts
    /// the remaining in-flight inserts at their next await point. Inserts
    /// that already committed are not rolled back.
    async fn persist(&self, drafts: HashMap<String, CarDraft>) -> Result<Vec<Car>, Error> {
        let mut tasks = JoinSet::new();
        for draft in drafts.into_values() {
            let repository = Arc::clone(&self.repository);
            tasks.spawn(async move { repository.insert(&draft).await });
        }

        let mut cars = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(car)) => cars.push(car),
                Ok(Err(cause)) => return Err(map_repository_error(cause)),
                Err(cause) => {
                    return Err(Error::internal(format!(
                        "persistence task did not complete: {cause}"
                    )));
                }
            }
        }
        Ok(cars)
    }
}

/// Map a repository failure onto the service error taxonomy.
fn map_repository_error(error: CarRepositoryError) -> Error {
    match error {
        CarRepositoryError::Connection { message } | CarRepositoryError::Query { message } => {
            Error::storage(message)
        }
        CarRepositoryError::DuplicateRegNum { reg_num } => Error::duplicate_reg_num(format!(
            "a car with registration number {reg_num} already exists"
        )),
    }
}

/// Log the outcome of a facade operation.
///
/// External-API and storage failures log at error level; validation and
/// not-found outcomes are expected traffic and log at info.
fn log_outcome<T>(method: &'static str, result: &Result<T, Error>) {
    match result {
        Ok(_) => info!(method, "ok"),
        Err(err) => match err.code() {
            ErrorCode::ExternalLookup | ErrorCode::Storage | ErrorCode::InternalError => {
                error!(method, code = ?err.code(), message = err.message(), "operation failed");
            }
            _ => {
                info!(method, code = ?err.code(), message = err.message(), "operation rejected");
            }
        },
    }
}

#[async_trait]
impl<R, L> CarsQuery for CarCatalogueService<R, L>
where
    R: CarRepository + 'static,
    L: VehicleLookup + 'static,
{
    async fn get_car(&self, id: CarId) -> Result<Car, Error> {
        let result = match self.repository.find_by_id(id).await {
            Ok(Some(car)) => Ok(car),
            Ok(None) => Err(Error::not_found(format!("car {id} not found"))),
            Err(cause) => Err(map_repository_error(cause)),
        };
        log_outcome("get_car", &result);
        result
    }

    async fn list_cars(&self, filter: CarFilter) -> Result<Vec<Car>, Error> {
        let result = self
            .repository
            .list(&filter)
            .await
            .map_err(map_repository_error);
        log_outcome("list_cars", &result);
        result
    }
}

#[async_trait]
impl<R, L> CarsCommand for CarCatalogueService<R, L>
where
    R: CarRepository + 'static,
    L: VehicleLookup + 'static,
{
    async fn add_cars(&self, reg_nums: Vec<String>) -> Result<Vec<Car>, Error> {
        let drafts = self.enrich(reg_nums).await;
        let result = self.persist(drafts).await;
        if let Ok(cars) = &result {
            info!(count = cars.len(), "batch ingestion stored cars");
        }
        log_outcome("add_cars", &result);
        result
    }

    async fn update_car(&self, id: CarId, draft: CarDraft) -> Result<Car, Error> {
        let result = match validate_draft(&draft) {
            Err(err) => Err(err),
            Ok(()) => match self.repository.update(id, &draft).await {
                Ok(Some(car)) => Ok(car),
                Ok(None) => Err(Error::not_found(format!("car {id} not found"))),
                Err(cause) => Err(map_repository_error(cause)),
            },
        };
        log_outcome("update_car", &result);
        result
    }

    async fn delete_car(&self, id: CarId) -> Result<(), Error> {
        let result = match self.repository.delete(id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(Error::not_found(format!("car {id} not found"))),
            Err(cause) => Err(map_repository_error(cause)),
        };
        log_outcome("delete_car", &result);
        result
    }
}

/// Validate the caller-supplied fields of an update payload.
fn validate_draft(draft: &CarDraft) -> Result<(), Error> {
    if !validate_reg_num(&draft.reg_num) {
        return Err(Error::validation(format!(
            "invalid registration number: {}",
            draft.reg_num
        )));
    }
    if !validate_year(draft.year) {
        return Err(Error::validation(format!("invalid year: {}", draft.year)));
    }
    Ok(())
}

#[cfg(test)]
#[path = "catalogue_service_tests.rs"]
mod tests;
