use actix_web::{web, HttpResponse};
use database::model::person::{NewPerson, Person, PersonCollection, UpdatePersonData};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::error::ErrorDetail;

/// Adds the basic auth security scheme every person route requires
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Basic)
                        .description(Some("Set via API_USER and API_PASSWORD env vars"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Persons API",
        description = "A sample application to add and retrieve basic information about Persons"
    ),
    security(
        ("basic_auth" = [])
    ),
    paths(
        crate::routes::create_person,
        crate::routes::list_persons,
        crate::routes::show_person,
        crate::routes::update_person,
        crate::routes::delete_person,
    ),
    components(
        schemas(Person, NewPerson, UpdatePersonData, PersonCollection, ErrorDetail)
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "persons", description = "Create, list, get, update and delete persons")
    )
)]
pub struct ApiDoc;

/// Serves the API description at `/openapi.json`, outside the auth gate
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/openapi.json", web::get().to(openapi_json));
}

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
