//! DTOs for decoding vehicle-info API responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into the
//! domain [`CarDraft`] in one pass.

use serde::Deserialize;

use crate::domain::car::{CarDraft, Owner};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct VehicleInfoDto {
    pub(super) reg_num: String,
    pub(super) mark: String,
    pub(super) model: String,
    pub(super) year: i32,
    pub(super) owner: OwnerDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct OwnerDto {
    pub(super) name: String,
    pub(super) surname: String,
    #[serde(default)]
    pub(super) patronymic: String,
}

impl VehicleInfoDto {
    pub(super) fn into_domain(self) -> CarDraft {
        CarDraft {
            reg_num: self.reg_num,
            mark: self.mark,
            model: self.model,
            year: self.year,
            owner: Owner {
                name: self.owner.name,
                surname: self.owner.surname,
                patronymic: self.owner.patronymic,
            },
        }
    }
}
