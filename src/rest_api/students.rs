//! Student route handlers
//!
//! Request bodies are decoded by hand from raw bytes so a malformed
//! body always produces the standard error envelope instead of a
//! framework rejection.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

use crate::observability::Logger;
use crate::rest_api::errors::{ApiError, ApiResult};
use crate::rest_api::server::AppState;
use crate::store::{DeleteOneResult, Filter, Update, UpdateOneResult};
use crate::student::Student;

/// Collection holding all student documents.
pub const STUDENTS_COLLECTION: &str = "students";

fn decode_student(body: &[u8]) -> ApiResult<Student> {
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

/// GET /students
///
/// Returns every student in insertion order.
pub async fn list_students(State(state): State<AppState>) -> ApiResult<Json<Vec<Student>>> {
    let students = state.db.collection(STUDENTS_COLLECTION);

    let mut records = Vec::new();
    for document in students.find(Filter::new())? {
        let student =
            Student::from_document(document).map_err(|e| ApiError::Decode(e.to_string()))?;

        Logger::info(
            "STUDENT_LISTED",
            &[
                ("age", student.age.as_str()),
                ("city", student.city.as_str()),
                ("name", student.name.as_str()),
                ("sex", student.sex.as_str()),
            ],
        );

        records.push(student);
    }

    Ok(Json(records))
}

/// POST /students
///
/// Inserts one student and returns the assigned document id.
pub async fn create_student(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<String>> {
    let student = decode_student(&body)?;

    let document = student
        .to_document()
        .map_err(|e| ApiError::Encode(e.to_string()))?;

    let result = state
        .db
        .collection(STUDENTS_COLLECTION)
        .insert_one(document)?;

    Logger::info(
        "STUDENT_INSERTED",
        &[("inserted_id", result.inserted_id.as_str())],
    );

    Ok(Json(result.inserted_id))
}

/// PUT /students
///
/// Sets the age of the first student whose name matches the request
/// body. Only the age field is written; name is the lookup key and the
/// other fields are left as stored.
pub async fn update_student(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<UpdateOneResult>> {
    let student = decode_student(&body)?;

    let result = state.db.collection(STUDENTS_COLLECTION).update_one(
        Filter::new().eq("name", student.name),
        Update::new().set("age", student.age),
    )?;

    Ok(Json(result))
}

/// DELETE /students
///
/// Removes the first student whose name matches the request body.
pub async fn delete_student(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<DeleteOneResult>> {
    let student = decode_student(&body)?;

    let result = state
        .db
        .collection(STUDENTS_COLLECTION)
        .delete_one(Filter::new().eq("name", student.name))?;

    Ok(Json(result))
}
