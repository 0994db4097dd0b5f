use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use classroom_core::ErrorResponse;

use crate::modules::auth::model::{IsAdminResponse, TokenRequest, TokenResponse};
use crate::modules::enrollments::model::{CreateEnrollmentDto, Enrollment};
use crate::modules::programs::model::{CreateProgramDto, Program, UpdateProgramDto};
use crate::modules::resources::model::{
    CreateResourceDto, Resource, ResourceKind, UpdateResourceDto,
};
use crate::modules::sections::model::{CreateSectionDto, Section, UpdateSectionDto};
use crate::modules::students::model::{
    CreateStudentDto, ReplaceStudentDto, Student, StudentCreatedResponse, UpdateStudentDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::issue_token,
        crate::modules::auth::controller::is_admin,
        crate::modules::students::controller::list_students,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::replace_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::list_student_enrollments,
        crate::modules::programs::controller::list_programs,
        crate::modules::programs::controller::create_program,
        crate::modules::programs::controller::get_program,
        crate::modules::programs::controller::replace_program,
        crate::modules::programs::controller::update_program,
        crate::modules::programs::controller::delete_program,
        crate::modules::programs::controller::list_program_sections,
        crate::modules::sections::controller::list_sections,
        crate::modules::sections::controller::create_section,
        crate::modules::sections::controller::get_section,
        crate::modules::sections::controller::replace_section,
        crate::modules::sections::controller::update_section,
        crate::modules::sections::controller::delete_section,
        crate::modules::sections::controller::list_section_students,
        crate::modules::sections::controller::list_section_resources,
        crate::modules::enrollments::controller::list_enrollments,
        crate::modules::enrollments::controller::create_enrollment,
        crate::modules::enrollments::controller::get_enrollment,
        crate::modules::enrollments::controller::delete_enrollment,
        crate::modules::resources::controller::list_resources,
        crate::modules::resources::controller::create_resource,
        crate::modules::resources::controller::get_resource,
        crate::modules::resources::controller::replace_resource,
        crate::modules::resources::controller::update_resource,
        crate::modules::resources::controller::delete_resource,
    ),
    components(
        schemas(
            ErrorResponse,
            TokenRequest,
            TokenResponse,
            IsAdminResponse,
            Student,
            CreateStudentDto,
            ReplaceStudentDto,
            UpdateStudentDto,
            StudentCreatedResponse,
            Program,
            CreateProgramDto,
            UpdateProgramDto,
            Section,
            CreateSectionDto,
            UpdateSectionDto,
            Enrollment,
            CreateEnrollmentDto,
            Resource,
            ResourceKind,
            CreateResourceDto,
            UpdateResourceDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Token issuance and role probing"),
        (name = "Students", description = "Students and their login accounts"),
        (name = "Programs", description = "Training programs"),
        (name = "Sections", description = "Class sections of a program"),
        (name = "Enrollments", description = "Student enrollments in sections"),
        (name = "Resources", description = "Section resources with draft and pre-access visibility")
    ),
    info(
        title = "Classroom API",
        version = "0.1.0",
        description = "Programs, sections, enrollments and class resources, with administrator and enrolled-student access.",
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
