//! Row structs bridging Diesel and the domain entities.

use diesel::prelude::*;

use crate::domain::car::{Car, CarId, Owner};

use super::schema::cars;

/// Result row of the car/model/mark/owner join.
#[derive(Debug, Queryable)]
pub(super) struct CarJoinRow {
    pub(super) id: i64,
    pub(super) reg_num: String,
    pub(super) mark: String,
    pub(super) model: String,
    pub(super) year: i32,
    pub(super) owner_name: String,
    pub(super) owner_surname: String,
    pub(super) owner_patronymic: String,
}

impl CarJoinRow {
    pub(super) fn into_domain(self) -> Car {
        Car {
            id: CarId::new(self.id),
            reg_num: self.reg_num,
            mark: self.mark,
            model: self.model,
            year: self.year,
            owner: Owner {
                name: self.owner_name,
                surname: self.owner_surname,
                patronymic: self.owner_patronymic,
            },
        }
    }
}

/// Insertable car row with resolved dimension identifiers.
#[derive(Debug, Insertable)]
#[diesel(table_name = cars)]
pub(super) struct NewCarRow<'a> {
    pub(super) reg_num: &'a str,
    pub(super) model_id: i64,
    pub(super) year: i32,
    pub(super) owner_id: i64,
}
