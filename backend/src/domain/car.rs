//! Car catalogue domain entities.
//!
//! Types here are transport agnostic: inbound adapters map them to wire DTOs
//! and the persistence adapter maps them to rows. Owners travel embedded by
//! value and are only resolved to dimension ids at the storage boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned to a car once persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CarId(i64);

impl CarId {
    /// Wrap a raw storage identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Return the raw identifier.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vehicle owner.
///
/// Storage deduplicates owners by the full (name, surname, patronymic)
/// triple; the same triple always resolves to the same dimension row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    pub surname: String,
    pub patronymic: String,
}

/// A persisted car with its storage-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    pub reg_num: String,
    pub mark: String,
    pub model: String,
    pub year: i32,
    pub owner: Owner,
}

/// Car data without identity.
///
/// This is the shape produced by lookup enrichment and accepted by update;
/// the repository assigns the identity on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarDraft {
    pub reg_num: String,
    pub mark: String,
    pub model: String,
    pub year: i32,
    pub owner: Owner,
}

impl CarDraft {
    /// Attach a storage-assigned identifier.
    pub fn into_car(self, id: CarId) -> Car {
        Car {
            id,
            reg_num: self.reg_num,
            mark: self.mark,
            model: self.model,
            year: self.year,
            owner: self.owner,
        }
    }
}

/// Equality predicates for car listings.
///
/// `None` disables a predicate; enabled predicates combine as an AND
/// conjunction. `limit` and `offset` always apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarFilter {
    pub limit: i64,
    pub offset: i64,
    pub reg_num: Option<String>,
    pub mark: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub owner_name: Option<String>,
    pub owner_surname: Option<String>,
    pub owner_patronymic: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_keeps_fields_when_promoted() {
        let draft = CarDraft {
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

        let car = draft.clone().into_car(CarId::new(7));
        assert_eq!(car.id.get(), 7);
        assert_eq!(car.reg_num, draft.reg_num);
        assert_eq!(car.owner, draft.owner);
    }

    #[test]
    fn default_filter_has_no_predicates() {
        let filter = CarFilter::default();
        assert!(filter.reg_num.is_none());
        assert!(filter.year.is_none());
        assert_eq!(filter.limit, 0);
    }
}
