use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::middleware::role::UserRole;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginRequest, LoginResponse, LoginUser, MessageResponse, RegisterEleveRequest,
    RegisterResponse, ResetPasswordRequest,
};
use crate::modules::classes::model::{Classe, CreateClasseDto, Eleve};
use crate::modules::cours::model::{Cours, CoursWithClasse, CreateCoursDto, UpdateCoursDto};
use crate::modules::files::model::{DeleteFileRequest, DeleteFileResponse, UploadResponse};
use crate::modules::users::model::{ClasseInfo, CreateUserDto, UpdateUserDto, UserRow};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::register_eleve,
        crate::modules::auth::controller::reset_password,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::disable_user,
        crate::modules::classes::controller::create_classe,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::get_classes_by_enseignant,
        crate::modules::classes::controller::get_eleves_of_classe,
        crate::modules::cours::controller::get_cours,
        crate::modules::cours::controller::create_cours,
        crate::modules::cours::controller::update_cours,
        crate::modules::cours::controller::delete_cours,
        crate::modules::files::controller::upload_file,
        crate::modules::files::controller::delete_file,
    ),
    components(
        schemas(
            UserRole,
            LoginRequest,
            LoginResponse,
            LoginUser,
            RegisterEleveRequest,
            RegisterResponse,
            ResetPasswordRequest,
            MessageResponse,
            ErrorResponse,
            UserRow,
            ClasseInfo,
            CreateUserDto,
            UpdateUserDto,
            Classe,
            CreateClasseDto,
            Eleve,
            Cours,
            CoursWithClasse,
            CreateCoursDto,
            UpdateCoursDto,
            UploadResponse,
            DeleteFileRequest,
            DeleteFileResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, student registration, password reset"),
        (name = "Users", description = "Admin user management with audit trail"),
        (name = "Classes", description = "Class records and rosters"),
        (name = "Cours", description = "Teacher-scoped course management"),
        (name = "Files", description = "File upload and deletion via the storage provider")
    ),
    info(
        title = "Cartable API",
        version = "0.1.0",
        description = "Backend-for-frontend for a school platform: authentication, user and class management, teacher-scoped courses, and file sharing.",
        license(name = "MIT")
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
