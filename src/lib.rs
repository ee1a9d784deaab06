//! rosterd - A minimal student-records CRUD service over an embedded
//! document store

pub mod cli;
pub mod observability;
pub mod rest_api;
pub mod store;
pub mod student;
