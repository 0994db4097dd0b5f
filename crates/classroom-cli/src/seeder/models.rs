//! Seed row shapes and seeding configuration.

use chrono::NaiveDate;
use classroom_models::ResourceKind;
use uuid::Uuid;

pub struct ProgramSeed {
    pub name: String,
    pub description: Option<String>,
}

pub struct SectionSeed {
    pub program_id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub completion_date: Option<NaiveDate>,
    pub access_link: Option<String>,
}

/// A student together with its login identity.
pub struct StudentSeed {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub section_id: Uuid,
}

pub struct ResourceSeed {
    pub section_id: Uuid,
    pub kind: ResourceKind,
    pub name: String,
    pub description: Option<String>,
    pub pre_access: bool,
    pub draft: bool,
}

/// Complete configuration for database seeding.
#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub num_programs: usize,
    pub sections_per_program: usize,
    pub students_per_section: usize,
    pub resources_per_section: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            num_programs: 3,
            sections_per_program: 2,
            students_per_section: 10,
            resources_per_section: 4,
        }
    }
}

impl SeedConfig {
    /// Creates a new seed configuration with the specified number of programs.
    pub fn new(num_programs: usize) -> Self {
        Self {
            num_programs,
            ..Default::default()
        }
    }

    pub fn with_sections(mut self, sections_per_program: usize) -> Self {
        self.sections_per_program = sections_per_program;
        self
    }

    pub fn with_students(mut self, students_per_section: usize) -> Self {
        self.students_per_section = students_per_section;
        self
    }

    pub fn with_resources(mut self, resources_per_section: usize) -> Self {
        self.resources_per_section = resources_per_section;
        self
    }

    pub fn total_sections(&self) -> usize {
        self.num_programs * self.sections_per_program
    }

    pub fn total_students(&self) -> usize {
        self.total_sections() * self.students_per_section
    }
}
