use actix_web::{web, HttpRequest, HttpResponse};
use actix_web_lab::middleware::from_fn;
use database::{
    model::person::{NewPerson, Person, PersonCollection, UpdatePersonData},
    service::PersonService,
};

use crate::{
    auth::basic_auth,
    error::{ApiError, ErrorDetail},
};

/// Malformed or incomplete bodies are validation errors, not generic bad requests
fn json_error(err: actix_web::error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Validation(err.to_string()).into()
}

/// Registers the person routes. Every route sits behind the basic auth gate
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/persons")
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .wrap(from_fn(basic_auth))
            .service(
                web::resource(["", "/"])
                    .route(web::post().to(create_person))
                    .route(web::get().to(list_persons)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(show_person))
                    .route(web::put().to(update_person))
                    .route(web::delete().to(delete_person)),
            ),
    );
}

#[utoipa::path(
    post,
    path = "/persons/",
    request_body = NewPerson,
    responses(
        (status = 201, description = "Add new person", body = Person),
        (status = 401, description = "Missing or incorrect credentials", body = ErrorDetail),
        (status = 422, description = "Invalid person fields", body = ErrorDetail),
    ),
    tag = "persons"
)]
pub async fn create_person(
    service: web::Data<PersonService>,
    person: web::Json<NewPerson>,
) -> Result<HttpResponse, ApiError> {
    let person = service.create(person.into_inner()).await?;

    Ok(HttpResponse::Created().json(person))
}

#[utoipa::path(
    get,
    path = "/persons/",
    responses(
        (status = 200, description = "List all persons", body = PersonCollection),
        (status = 401, description = "Missing or incorrect credentials", body = ErrorDetail),
    ),
    tag = "persons"
)]
pub async fn list_persons(service: web::Data<PersonService>) -> Result<HttpResponse, ApiError> {
    let persons = service.list().await?;

    Ok(HttpResponse::Ok().json(persons))
}

#[utoipa::path(
    get,
    path = "/persons/{id}",
    params(("id" = String, Path, description = "Person id, 24 hex characters")),
    responses(
        (status = 200, description = "Get a single person", body = Person),
        (status = 401, description = "Missing or incorrect credentials", body = ErrorDetail),
        (status = 404, description = "Person not found", body = ErrorDetail),
    ),
    tag = "persons"
)]
pub async fn show_person(
    service: web::Data<PersonService>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let person = service.get(&id).await?;

    Ok(HttpResponse::Ok().json(person))
}

#[utoipa::path(
    put,
    path = "/persons/{id}",
    params(("id" = String, Path, description = "Person id, 24 hex characters")),
    request_body = UpdatePersonData,
    responses(
        (status = 200, description = "Update a person", body = Person),
        (status = 401, description = "Missing or incorrect credentials", body = ErrorDetail),
        (status = 404, description = "Person not found", body = ErrorDetail),
        (status = 422, description = "Invalid person fields", body = ErrorDetail),
    ),
    tag = "persons"
)]
pub async fn update_person(
    service: web::Data<PersonService>,
    id: web::Path<String>,
    update: web::Json<UpdatePersonData>,
) -> Result<HttpResponse, ApiError> {
    let person = service.update(&id, update.into_inner()).await?;

    Ok(HttpResponse::Ok().json(person))
}

#[utoipa::path(
    delete,
    path = "/persons/{id}",
    params(("id" = String, Path, description = "Person id, 24 hex characters")),
    responses(
        (status = 204, description = "Delete a person"),
        (status = 401, description = "Missing or incorrect credentials", body = ErrorDetail),
        (status = 404, description = "Person not found", body = ErrorDetail),
    ),
    tag = "persons"
)]
pub async fn delete_person(
    service: web::Data<PersonService>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    service.delete(&id).await?;

    Ok(HttpResponse::NoContent().finish())
}
