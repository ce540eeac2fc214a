//! REST routes of the course catalogue.
//!
//! Every error is rendered as JSON: validation failures as a field map, anything else as
//! `{"detail": "..."}`.
use actix_web::{
    error::{self, JsonPayloadError},
    http::StatusCode,
    web::{self, Data, Json, Path, Query},
    HttpRequest, HttpResponse,
};
use coursebook::{
    Course, CourseFilter, CourseId, CoursePayload, CourseStore, Student, StudentId,
    StudentPayload, ValidationErrors,
};
use serde::Serialize;

use crate::application::{self, Application};

/// Message returned when a record does not exist.
pub const NOT_FOUND: &str = "Not found.";
const SERVER_ERROR: &str = "A server error occurred.";

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Application(#[from] application::Error),
    #[error("JSON parse error - {0}")]
    MalformedJson(String),
    #[error("Unsupported media type in request.")]
    UnsupportedMediaType,
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Application(errors.into())
    }
}

#[derive(Serialize)]
struct Detail<'a> {
    detail: &'a str,
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Application(application::Error::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Application(application::Error::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Application(application::Error::Store(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::MalformedJson(_) => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            ApiError::Application(application::Error::Validation(errors)) => {
                response.json(errors)
            }
            ApiError::Application(application::Error::NotFound) => {
                response.json(Detail { detail: NOT_FOUND })
            }
            ApiError::Application(application::Error::Store(_)) => {
                response.json(Detail {
                    detail: SERVER_ERROR,
                })
            }
            other => response.json(Detail {
                detail: &other.to_string(),
            }),
        }
    }
}

/// Registers the REST routes for an application backed by the store `S`.
///
/// The `Application<S>` must be registered as app data.
pub fn routes<S: CourseStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::PathConfig::default()
            .error_handler(|_, _| ApiError::from(application::Error::NotFound).into()),
    )
    .app_data(web::JsonConfig::default().error_handler(json_error))
    .app_data(web::QueryConfig::default().error_handler(|err, _| {
        ApiError::from(ValidationErrors::single("query", err.to_string())).into()
    }))
    .service(
        web::scope("/api/v1")
            .service(
                web::resource("/courses/")
                    .name("courses-list")
                    .route(web::get().to(list_courses::<S>))
                    .route(web::post().to(create_course::<S>)),
            )
            .service(
                web::resource("/courses/{id}/")
                    .name("courses-detail")
                    .route(web::get().to(retrieve_course::<S>))
                    .route(web::put().to(update_course::<S>))
                    .route(web::patch().to(partial_update_course::<S>))
                    .route(web::delete().to(delete_course::<S>)),
            )
            .service(
                web::resource("/students/")
                    .name("students-list")
                    .route(web::get().to(list_students::<S>))
                    .route(web::post().to(create_student::<S>)),
            )
            .service(
                web::resource("/students/{id}/")
                    .name("students-detail")
                    .route(web::get().to(retrieve_student::<S>)),
            )
            .default_service(web::to(not_found)),
    );
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    match err {
        JsonPayloadError::ContentType => ApiError::UnsupportedMediaType.into(),
        err => ApiError::MalformedJson(err.to_string()).into(),
    }
}

async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(application::Error::NotFound.into())
}

async fn list_courses<S: CourseStore>(
    app: Data<Application<S>>,
    query: Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Course>>, ApiError> {
    let filter = CourseFilter::from_query_pairs(query.into_inner())?;
    Ok(Json(app.courses(&filter).await?))
}

async fn retrieve_course<S: CourseStore>(
    app: Data<Application<S>>,
    id: Path<CourseId>,
) -> Result<Json<Course>, ApiError> {
    Ok(Json(app.course_by_id(id.into_inner()).await?))
}

async fn create_course<S: CourseStore>(
    app: Data<Application<S>>,
    payload: Json<CoursePayload>,
) -> Result<HttpResponse, ApiError> {
    let course = app.create_course(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(course))
}

async fn update_course<S: CourseStore>(
    app: Data<Application<S>>,
    id: Path<CourseId>,
    payload: Json<CoursePayload>,
) -> Result<Json<Course>, ApiError> {
    Ok(Json(
        app.update_course(id.into_inner(), payload.into_inner())
            .await?,
    ))
}

async fn partial_update_course<S: CourseStore>(
    app: Data<Application<S>>,
    id: Path<CourseId>,
    payload: Json<CoursePayload>,
) -> Result<Json<Course>, ApiError> {
    Ok(Json(
        app.patch_course(id.into_inner(), payload.into_inner())
            .await?,
    ))
}

async fn delete_course<S: CourseStore>(
    app: Data<Application<S>>,
    id: Path<CourseId>,
) -> Result<HttpResponse, ApiError> {
    app.delete_course(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

async fn list_students<S: CourseStore>(
    app: Data<Application<S>>,
) -> Result<Json<Vec<Student>>, ApiError> {
    Ok(Json(app.students().await?))
}

async fn retrieve_student<S: CourseStore>(
    app: Data<Application<S>>,
    id: Path<StudentId>,
) -> Result<Json<Student>, ApiError> {
    Ok(Json(app.student_by_id(id.into_inner()).await?))
}

async fn create_student<S: CourseStore>(
    app: Data<Application<S>>,
    payload: Json<StudentPayload>,
) -> Result<HttpResponse, ApiError> {
    let student = app.create_student(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(student))
}

#[cfg(test)]
mod tests {
    use actix_web::{
        test::{self as actix_test, TestRequest},
        App,
    };
    use coursebook::Settings;

    use super::*;
    use crate::mocks::{MockCourseStore, StoreDown};

    #[actix_web::test]
    async fn it_hides_store_failures_behind_a_generic_message() {
        let mut store = MockCourseStore::new();
        store
            .expect_course()
            .once()
            .returning(|_| Err(StoreDown));
        let app = actix_test::init_service(
            App::new()
                .app_data(Data::new(Application::new(store, Settings::default())))
                .configure(routes::<MockCourseStore>),
        )
        .await;

        let req = TestRequest::get().uri("/api/v1/courses/1/").to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({"detail": "A server error occurred."}));
    }

    #[test]
    fn it_maps_errors_to_status_codes() {
        use error::ResponseError;

        assert_eq!(
            ApiError::from(application::Error::NotFound).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(ValidationErrors::single("name", "blank")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::MalformedJson("EOF".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::UnsupportedMediaType.status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }
}
