//! # Classroom Models
//!
//! Entities, wire representations and request DTOs for the Classroom API.
//!
//! # Modules
//!
//! - [`users`]: login identities (accounts)
//! - [`auth`]: token issuance request/response
//! - [`students`]: students and their provisioning DTOs
//! - [`programs`]: training programs
//! - [`sections`]: class sections of a program
//! - [`enrollments`]: student/section links
//! - [`resources`]: section resources and their visibility rule

pub mod auth;
pub mod enrollments;
pub mod programs;
pub mod resources;
pub mod sections;
pub mod students;
pub mod users;

pub use auth::{IsAdminResponse, TokenRequest, TokenResponse};
pub use enrollments::{CreateEnrollmentDto, Enrollment};
pub use programs::{CreateProgramDto, Program, UpdateProgramDto};
pub use resources::{
    CreateResourceDto, Resource, ResourceKind, ResourceRecord, UpdateResourceDto,
    is_visible_to_students,
};
pub use sections::{CreateSectionDto, Section, UpdateSectionDto};
pub use students::{
    CreateStudentDto, ReplaceStudentDto, Student, StudentCreatedResponse, UpdateStudentDto,
};
pub use users::{Account, AccountWithPassword};
