//! REST API for rosterd
//!
//! A single resource, `/students`, differentiated by HTTP method:
//!
//! - `GET /students` lists every student
//! - `POST /students` inserts one student and returns its id
//! - `PUT /students` updates the age of the first name match
//! - `DELETE /students` removes the first name match
//!
//! Failures are serialized as `{"message": ...}` with 400 for bodies
//! the server cannot decode and 500 for everything else.

mod config;
mod errors;
mod server;
mod students;

pub use config::HttpConfig;
pub use errors::{ApiError, ApiResult, ErrorBody};
pub use server::{AppState, RestServer};
pub use students::STUDENTS_COLLECTION;
