use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct RegisterRequest { pub email: String, pub username: String, pub password: String }

#[derive(utoipa::ToSchema)]
pub struct LoginRequest { pub identifier: String, pub password: String }

#[derive(utoipa::ToSchema)]
pub struct ResetPasswordRequest { pub identifier: String, pub new_password: String, pub confirm_password: String }

#[derive(utoipa::ToSchema)]
pub struct RefreshRequest { pub refresh: String }

#[derive(utoipa::ToSchema)]
pub struct TokenPairResponse { pub access: String, pub refresh: String }

#[derive(utoipa::ToSchema)]
pub struct MeResponse { pub user_id: Uuid, pub username: String, pub email: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::reset_password,
        crate::routes::auth::refresh,
        crate::routes::auth::me,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            ResetPasswordRequest,
            RefreshRequest,
            TokenPairResponse,
            MeResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth")
    )
)]
pub struct ApiDoc;
