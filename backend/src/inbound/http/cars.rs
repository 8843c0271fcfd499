//! Car catalogue endpoints.
//!
//! Every response body is a `{data, error}` envelope; exactly one side is
//! populated. Wire DTOs use camelCase field names.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Car, CarDraft, CarFilter, CarId, Error, Owner};

use super::error::ApiResult;
use super::state::HttpState;

/// Owner fields as they travel on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OwnerData {
    #[schema(example = "Ivan")]
    pub name: String,
    #[schema(example = "Ivanov")]
    pub surname: String,
    #[schema(example = "Ivanovich")]
    pub patronymic: String,
}

impl From<Owner> for OwnerData {
    fn from(owner: Owner) -> Self {
        Self {
            name: owner.name,
            surname: owner.surname,
            patronymic: owner.patronymic,
        }
    }
}

impl From<OwnerData> for Owner {
    fn from(data: OwnerData) -> Self {
        Self {
            name: data.name,
            surname: data.surname,
            patronymic: data.patronymic,
        }
    }
}

/// A persisted car as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarData {
    #[schema(example = 42)]
    pub id: i64,
    #[schema(example = "A123BC77")]
    pub reg_num: String,
    #[schema(example = "Lada")]
    pub mark: String,
    #[schema(example = "Vesta")]
    pub model: String,
    #[schema(example = 2002)]
    pub year: i32,
    pub owner: OwnerData,
}

impl From<Car> for CarData {
    fn from(car: Car) -> Self {
        Self {
            id: car.id.get(),
            reg_num: car.reg_num,
            mark: car.mark,
            model: car.model,
            year: car.year,
            owner: car.owner.into(),
        }
    }
}

/// Full car payload accepted by the update endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarPayload {
    #[schema(example = "A123BC77")]
    pub reg_num: String,
    #[schema(example = "Lada")]
    pub mark: String,
    #[schema(example = "Vesta")]
    pub model: String,
    #[schema(example = 2002)]
    pub year: i32,
    pub owner: OwnerData,
}

impl CarPayload {
    fn into_draft(self) -> CarDraft {
        CarDraft {
            reg_num: self.reg_num,
            mark: self.mark,
            model: self.model,
            year: self.year,
            owner: self.owner.into(),
        }
    }
}

/// Batch ingestion request body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCarsRequest {
    #[schema(example = json!(["A123BC77", "B456DE99"]))]
    pub reg_nums: Vec<String>,
}

/// Query parameters for the list endpoint.
///
/// `limit` and `offset` are mandatory; every predicate is optional and
/// combines as an AND conjunction.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListCarsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub reg_num: Option<String>,
    pub mark: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub owner_name: Option<String>,
    pub owner_surname: Option<String>,
    pub owner_patronymic: Option<String>,
}

impl ListCarsQuery {
    fn into_filter(self) -> Result<CarFilter, Error> {
        let limit = self
            .limit
            .ok_or_else(|| Error::invalid_input("limit query parameter is required"))?;
        let offset = self
            .offset
            .ok_or_else(|| Error::invalid_input("offset query parameter is required"))?;
        if limit < 0 || offset < 0 {
            return Err(Error::invalid_input("limit and offset must be non-negative"));
        }

        Ok(CarFilter {
            limit,
            offset,
            reg_num: self.reg_num,
            mark: self.mark,
            model: self.model,
            year: self.year,
            owner_name: self.owner_name,
            owner_surname: self.owner_surname,
            owner_patronymic: self.owner_patronymic,
        })
    }
}

/// Response envelope carrying a single car.
#[derive(Debug, Serialize, ToSchema)]
pub struct CarEnvelope {
    pub data: Option<CarData>,
    pub error: Option<Error>,
}

impl CarEnvelope {
    fn one(car: Car) -> Self {
        Self {
            data: Some(car.into()),
            error: None,
        }
    }

    fn empty() -> Self {
        Self {
            data: None,
            error: None,
        }
    }
}

/// Response envelope carrying a list of cars.
#[derive(Debug, Serialize, ToSchema)]
pub struct CarsEnvelope {
    pub data: Option<Vec<CarData>>,
    pub error: Option<Error>,
}

impl CarsEnvelope {
    fn many(cars: Vec<Car>) -> Self {
        Self {
            data: Some(cars.into_iter().map(CarData::from).collect()),
            error: None,
        }
    }
}

/// Fetch a single car by id.
#[utoipa::path(
    get,
    path = "/api/v1/cars/{id}",
    tags = ["cars"],
    params(("id" = i64, Path, description = "Car identifier")),
    responses(
        (status = 200, description = "Car found", body = CarEnvelope),
        (status = 400, description = "Malformed identifier", body = CarEnvelope),
        (status = 404, description = "No such car", body = CarEnvelope),
        (status = 500, description = "Lookup or storage failure", body = CarEnvelope)
    )
)]
#[get("/cars/{id}")]
pub async fn get_car(state: web::Data<HttpState>, id: web::Path<i64>) -> ApiResult<HttpResponse> {
    let car = state.cars_query.get_car(CarId::new(id.into_inner())).await?;
    Ok(HttpResponse::Ok().json(CarEnvelope::one(car)))
}

/// List cars matching optional equality predicates.
#[utoipa::path(
    get,
    path = "/api/v1/cars",
    tags = ["cars"],
    params(ListCarsQuery),
    responses(
        (status = 200, description = "Matching cars, possibly empty", body = CarsEnvelope),
        (status = 400, description = "Malformed query parameters", body = CarsEnvelope),
        (status = 500, description = "Storage failure", body = CarsEnvelope)
    )
)]
#[get("/cars")]
pub async fn list_cars(
    state: web::Data<HttpState>,
    query: web::Query<ListCarsQuery>,
) -> ApiResult<HttpResponse> {
    let filter = query.into_inner().into_filter()?;
    let cars = state.cars_query.list_cars(filter).await?;
    Ok(HttpResponse::Ok().json(CarsEnvelope::many(cars)))
}

/// Ingest a batch of registration numbers.
#[utoipa::path(
    post,
    path = "/api/v1/cars",
    tags = ["cars"],
    request_body = AddCarsRequest,
    responses(
        (status = 200, description = "Cars stored by this call", body = CarsEnvelope),
        (status = 400, description = "Malformed request body", body = CarsEnvelope),
        (status = 409, description = "Registration number already stored", body = CarsEnvelope),
        (status = 500, description = "Lookup or storage failure", body = CarsEnvelope)
    )
)]
#[post("/cars")]
pub async fn add_cars(
    state: web::Data<HttpState>,
    request: web::Json<AddCarsRequest>,
) -> ApiResult<HttpResponse> {
    let cars = state
        .cars_command
        .add_cars(request.into_inner().reg_nums)
        .await?;
    Ok(HttpResponse::Ok().json(CarsEnvelope::many(cars)))
}

/// Replace every field of an existing car.
#[utoipa::path(
    put,
    path = "/api/v1/cars/{id}",
    tags = ["cars"],
    params(("id" = i64, Path, description = "Car identifier")),
    request_body = CarPayload,
    responses(
        (status = 200, description = "Updated car", body = CarEnvelope),
        (status = 400, description = "Malformed body or failed validation", body = CarEnvelope),
        (status = 404, description = "No such car", body = CarEnvelope),
        (status = 409, description = "Registration number already stored", body = CarEnvelope),
        (status = 500, description = "Storage failure", body = CarEnvelope)
    )
)]
#[put("/cars/{id}")]
pub async fn update_car(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
    payload: web::Json<CarPayload>,
) -> ApiResult<HttpResponse> {
    let car = state
        .cars_command
        .update_car(CarId::new(id.into_inner()), payload.into_inner().into_draft())
        .await?;
    Ok(HttpResponse::Ok().json(CarEnvelope::one(car)))
}

/// Delete a car by id.
#[utoipa::path(
    delete,
    path = "/api/v1/cars/{id}",
    tags = ["cars"],
    params(("id" = i64, Path, description = "Car identifier")),
    responses(
        (status = 200, description = "Car deleted", body = CarEnvelope),
        (status = 400, description = "Malformed identifier", body = CarEnvelope),
        (status = 404, description = "No such car", body = CarEnvelope),
        (status = 500, description = "Storage failure", body = CarEnvelope)
    )
)]
#[delete("/cars/{id}")]
pub async fn delete_car(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .cars_command
        .delete_car(CarId::new(id.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(CarEnvelope::empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn query(limit: Option<i64>, offset: Option<i64>) -> ListCarsQuery {
        ListCarsQuery {
            limit,
            offset,
            reg_num: None,
            mark: None,
            model: None,
            year: None,
            owner_name: None,
            owner_surname: None,
            owner_patronymic: None,
        }
    }

    #[rstest]
    #[case::missing_limit(None, Some(0))]
    #[case::missing_offset(Some(10), None)]
    #[case::negative_limit(Some(-1), Some(0))]
    #[case::negative_offset(Some(10), Some(-5))]
    fn filter_requires_sane_pagination(#[case] limit: Option<i64>, #[case] offset: Option<i64>) {
        let err = query(limit, offset)
            .into_filter()
            .expect_err("pagination must be rejected");
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidInput);
    }

    #[test]
    fn filter_carries_predicates_through() {
        let mut q = query(Some(10), Some(20));
        q.mark = Some("Lada".to_owned());
        q.year = Some(2002);

        let filter = q.into_filter().expect("valid query");
        assert_eq!(filter.limit, 10);
        assert_eq!(filter.offset, 20);
        assert_eq!(filter.mark.as_deref(), Some("Lada"));
        assert_eq!(filter.year, Some(2002));
        assert!(filter.reg_num.is_none());
    }

    #[test]
    fn car_data_uses_camel_case_reg_num() {
        let car = Car {
            id: CarId::new(1),
            reg_num: "A123BC77".to_owned(),
            mark: "Lada".to_owned(),
            model: "Vesta".to_owned(),
            year: 2002,
            owner: Owner {
                name: "Ivan".to_owned(),
                surname: "Ivanov".to_owned(),
                patronymic: "Ivanovich".to_owned(),
            },
        };

        let value = serde_json::to_value(CarData::from(car)).expect("serialize");
        assert!(value.get("regNum").is_some());
        assert!(value.get("reg_num").is_none());
    }
}
