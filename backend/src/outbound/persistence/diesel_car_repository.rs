//! PostgreSQL-backed `CarRepository` implementation using Diesel.
//!
//! Reads join the car row with its model, mark, and owner dimensions so the
//! domain entity travels with embedded values. Writes resolve each dimension
//! to a stable id first via a single-round-trip upsert that is race safe when
//! concurrent ingestions hit the same natural key.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::car::{Car, CarDraft, CarFilter, CarId, Owner};
use crate::domain::ports::{CarRepository, CarRepositoryError};

use super::models::{CarJoinRow, NewCarRow};
use super::pool::{DbPool, PoolError};
use super::schema::{cars, marks, models, owners};

/// Columns selected by every car read query.
macro_rules! car_columns {
    () => {
        (
            cars::id,
            cars::reg_num,
            marks::name,
            models::name,
            cars::year,
            owners::name,
            owners::surname,
            owners::patronymic,
        )
    };
}

/// Diesel-backed implementation of the `CarRepository` port.
#[derive(Clone)]
pub struct DieselCarRepository {
    pool: DbPool,
}

impl DieselCarRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to repository errors.
fn map_pool_error(error: PoolError) -> CarRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CarRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to repository errors.
fn map_diesel_error(error: diesel::result::Error) -> CarRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CarRepositoryError::connection("database connection error")
        }
        _ => CarRepositoryError::query("database error"),
    }
}

/// Map errors from car-row writes, surfacing registration-number conflicts.
///
/// Only violations of the `cars.reg_num` unique constraint become
/// [`CarRepositoryError::DuplicateRegNum`]; other unique violations stay
/// generic query errors.
fn map_car_write_error(error: diesel::result::Error, reg_num: &str) -> CarRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        if info
            .constraint_name()
            .is_some_and(|name| name.contains("reg_num"))
        {
            return CarRepositoryError::duplicate_reg_num(reg_num);
        }
    }
    map_diesel_error(error)
}

/// Resolve an owner to its dimension id, inserting the row when absent.
///
/// `ON CONFLICT .. DO UPDATE SET key = excluded.key RETURNING id` always
/// returns a row in one round trip, whether this call created it or lost a
/// race to a concurrent ingestion.
async fn resolve_owner_id<C>(conn: &mut C, owner: &Owner) -> QueryResult<i64>
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    diesel::insert_into(owners::table)
        .values((
            owners::name.eq(&owner.name),
            owners::surname.eq(&owner.surname),
            owners::patronymic.eq(&owner.patronymic),
        ))
        .on_conflict((owners::name, owners::surname, owners::patronymic))
        .do_update()
        .set(owners::name.eq(excluded(owners::name)))
        .returning(owners::id)
        .get_result(conn)
        .await
}

/// Resolve a mark name to its dimension id, inserting the row when absent.
async fn resolve_mark_id<C>(conn: &mut C, mark: &str) -> QueryResult<i64>
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    diesel::insert_into(marks::table)
        .values(marks::name.eq(mark))
        .on_conflict(marks::name)
        .do_update()
        .set(marks::name.eq(excluded(marks::name)))
        .returning(marks::id)
        .get_result(conn)
        .await
}

/// Resolve a (model name, mark id) pair to its dimension id.
async fn resolve_model_id<C>(conn: &mut C, model: &str, mark_id: i64) -> QueryResult<i64>
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    diesel::insert_into(models::table)
        .values((models::name.eq(model), models::mark_id.eq(mark_id)))
        .on_conflict((models::name, models::mark_id))
        .do_update()
        .set(models::name.eq(excluded(models::name)))
        .returning(models::id)
        .get_result(conn)
        .await
}

/// Resolve every dimension referenced by a draft.
async fn resolve_dimensions<C>(conn: &mut C, draft: &CarDraft) -> QueryResult<(i64, i64)>
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    let owner_id = resolve_owner_id(conn, &draft.owner).await?;
    let mark_id = resolve_mark_id(conn, &draft.mark).await?;
    let model_id = resolve_model_id(conn, &draft.model, mark_id).await?;
    Ok((owner_id, model_id))
}

#[async_trait]
impl CarRepository for DieselCarRepository {
    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CarJoinRow> = cars::table
            .inner_join(models::table.inner_join(marks::table))
            .inner_join(owners::table)
            .filter(cars::id.eq(id.get()))
            .select(car_columns!())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(CarJoinRow::into_domain))
    }

    async fn list(&self, filter: &CarFilter) -> Result<Vec<Car>, CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = cars::table
            .inner_join(models::table.inner_join(marks::table))
            .inner_join(owners::table)
            .select(car_columns!())
            .into_boxed();

        if let Some(reg_num) = &filter.reg_num {
            query = query.filter(cars::reg_num.eq(reg_num.clone()));
        }
        if let Some(mark) = &filter.mark {
            query = query.filter(marks::name.eq(mark.clone()));
        }
        if let Some(model) = &filter.model {
            query = query.filter(models::name.eq(model.clone()));
        }
        if let Some(year) = filter.year {
            query = query.filter(cars::year.eq(year));
        }
        if let Some(owner_name) = &filter.owner_name {
            query = query.filter(owners::name.eq(owner_name.clone()));
        }
        if let Some(owner_surname) = &filter.owner_surname {
            query = query.filter(owners::surname.eq(owner_surname.clone()));
        }
        if let Some(owner_patronymic) = &filter.owner_patronymic {
            query = query.filter(owners::patronymic.eq(owner_patronymic.clone()));
        }

        let rows: Vec<CarJoinRow> = query
            .limit(filter.limit)
            .offset(filter.offset)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(CarJoinRow::into_domain).collect())
    }

    async fn insert(&self, draft: &CarDraft) -> Result<Car, CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (owner_id, model_id) = resolve_dimensions(&mut conn, draft)
            .await
            .map_err(map_diesel_error)?;

        let id: i64 = diesel::insert_into(cars::table)
            .values(NewCarRow {
                reg_num: &draft.reg_num,
                model_id,
                year: draft.year,
                owner_id,
            })
            .returning(cars::id)
            .get_result(&mut conn)
            .await
            .map_err(|error| map_car_write_error(error, &draft.reg_num))?;

        Ok(draft.clone().into_car(CarId::new(id)))
    }

    async fn update(&self, id: CarId, draft: &CarDraft) -> Result<Option<Car>, CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (owner_id, model_id) = resolve_dimensions(&mut conn, draft)
            .await
            .map_err(map_diesel_error)?;

        let updated = diesel::update(cars::table.filter(cars::id.eq(id.get())))
            .set((
                cars::reg_num.eq(&draft.reg_num),
                cars::model_id.eq(model_id),
                cars::year.eq(draft.year),
                cars::owner_id.eq(owner_id),
            ))
            .execute(&mut conn)
            .await
            .map_err(|error| map_car_write_error(error, &draft.reg_num))?;

        // Zero rows affected signals a missing car.
        if updated == 0 {
            Ok(None)
        } else {
            Ok(Some(draft.clone().into_car(id)))
        }
    }

    async fn delete(&self, id: CarId) -> Result<bool, CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(cars::table.filter(cars::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the error-mapping helpers; query execution is exercised
    //! against a live database in deployment smoke checks.

    use super::*;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    struct FakeErrorInfo {
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for FakeErrorInfo {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("cars")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn unique_violation(constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(FakeErrorInfo { constraint }),
        )
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(repo_err, CarRepositoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn generic_diesel_error_maps_to_query_error() {
        let repo_err = map_diesel_error(DieselError::NotFound);
        assert!(matches!(repo_err, CarRepositoryError::Query { .. }));
    }

    #[rstest]
    fn reg_num_unique_violation_maps_to_duplicate() {
        let error = unique_violation(Some("cars_reg_num_key"));
        let repo_err = map_car_write_error(error, "A123BC77");

        assert_eq!(
            repo_err,
            CarRepositoryError::duplicate_reg_num("A123BC77")
        );
    }

    #[rstest]
    #[case::other_constraint(Some("owners_natural_key"))]
    #[case::unnamed(None)]
    fn unrelated_unique_violations_stay_generic(#[case] constraint: Option<&'static str>) {
        let error = unique_violation(constraint);
        let repo_err = map_car_write_error(error, "A123BC77");

        assert!(matches!(repo_err, CarRepositoryError::Query { .. }));
    }
}
