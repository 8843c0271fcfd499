//! Diesel table definitions for the car catalogue schema.
//!
//! `cars` references `models` and `owners`; `models` references `marks`.
//! Each dimension table carries a unique constraint on its natural key; the
//! repository's get-or-create upserts rely on those constraints.

diesel::table! {
    owners (id) {
        id -> Int8,
        name -> Varchar,
        surname -> Varchar,
        patronymic -> Varchar,
    }
}

diesel::table! {
    marks (id) {
        id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    models (id) {
        id -> Int8,
        name -> Varchar,
        mark_id -> Int8,
    }
}

diesel::table! {
    cars (id) {
        id -> Int8,
        reg_num -> Varchar,
        model_id -> Int8,
        year -> Int4,
        owner_id -> Int8,
    }
}

diesel::joinable!(models -> marks (mark_id));
diesel::joinable!(cars -> models (model_id));
diesel::joinable!(cars -> owners (owner_id));

diesel::allow_tables_to_appear_in_same_query!(cars, marks, models, owners);
