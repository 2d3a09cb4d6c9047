use utoipa::OpenApi;

use crate::api;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Management API",
        description = "Create, read, update and delete users."
    ),
    servers(
        (url = "/api/v1", description = "User management API server")
    ),
    paths(
        api::handlers::users::get_user,
        api::handlers::users::create_user,
        api::handlers::users::update_user,
        api::handlers::users::delete_user,
    ),
    components(
        schemas(
            api::models::users::UserCreate,
            api::models::users::UserUpdate,
            api::models::users::UserResponse,
            api::models::users::UserCreated,
        )
    ),
    tags(
        (name = "users", description = "User management")
    )
)]
pub struct UsersApiDoc;
