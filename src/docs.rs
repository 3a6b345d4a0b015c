use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use scholaris_core::filter::{FilterCriteria, FilterOperator, SortOrder};
use scholaris_core::page::{Page, PageMeta};
use scholaris_core::patch::{PatchDocument, PatchOperation};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse};
use crate::modules::entities::model::{
    CreatedResponse, EntityDescriptor, ListParams, StatusResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::entities::controller::list_entities,
        crate::modules::entities::controller::create_record,
        crate::modules::entities::controller::list_records,
        crate::modules::entities::controller::get_record,
        crate::modules::entities::controller::replace_record,
        crate::modules::entities::controller::patch_record,
        crate::modules::entities::controller::delete_record,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            ErrorResponse,
            EntityDescriptor,
            CreatedResponse,
            StatusResponse,
            ListParams,
            FilterCriteria,
            FilterOperator,
            SortOrder,
            Page,
            PageMeta,
            PatchDocument,
            PatchOperation,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User authentication endpoints"),
        (name = "Entities", description = "The generic CRUD contract over every registered entity type")
    ),
    info(
        title = "Scholaris API",
        version = "0.1.0",
        description = "A REST API exposing one uniform CRUD contract over every collection of a school management system.",
        contact(
            name = "API Support",
            email = "support@scholaris.dev"
        ),
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
