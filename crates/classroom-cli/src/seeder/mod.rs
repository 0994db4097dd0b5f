//! Database seeding module for populating development data.
//!
//! # Module Structure
//!
//! - [`programs`] - Program and section generation and insertion
//! - [`students`] - Student accounts, profiles and enrollments
//! - [`resources`] - Section resources with mixed visibility flags
//! - [`models`] - Seed rows and configuration
//!
//! # Performance
//!
//! - Parallel data generation and password hashing using Rayon
//! - Batch inserts with multi-value INSERT statements
//! - Low bcrypt cost for seeded accounts

pub mod models;
pub mod programs;
pub mod resources;
pub mod students;

pub use models::SeedConfig;

use sqlx::PgPool;
use std::time::Instant;

/// Bcrypt cost for seeded accounts (cost 4 = ~6ms vs cost 12 = ~250ms).
pub(crate) const SEED_BCRYPT_COST: u32 = 4;

pub(crate) const BATCH_SIZE: usize = 500;

/// Seeds programs, sections, enrolled students and resources.
pub async fn seed_all(
    db: &PgPool,
    config: SeedConfig,
    password_suffix: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    println!("🌱 Starting full database seeding...");
    println!("   - Programs: {}", config.num_programs);
    println!("   - Sections per program: {}", config.sections_per_program);
    println!(
        "   - Students per section: {}, Resources per section: {}",
        config.students_per_section, config.resources_per_section
    );

    let program_ids = programs::seed_programs(db, config.num_programs).await?;
    let section_ids =
        programs::seed_sections(db, &program_ids, config.sections_per_program).await?;
    let student_count = students::seed_students(
        db,
        &section_ids,
        config.students_per_section,
        password_suffix,
    )
    .await?;
    let resource_count =
        resources::seed_resources(db, &section_ids, config.resources_per_section).await?;

    println!(
        "\n✅ Seeding complete! Created {} programs, {} sections, {} students, {} resources in {:?}",
        program_ids.len(),
        section_ids.len(),
        student_count,
        resource_count,
        start_time.elapsed()
    );
    println!(
        "\n📝 Student passwords: first three letters of the name + \"{}\"",
        password_suffix
    );

    Ok(())
}

/// Removes every program (cascading sections, enrollments and resources)
/// and every non-staff account (cascading students).
pub async fn clear_all(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing all seeded data...");

    let mut tx = db.begin().await?;

    let programs = sqlx::query("DELETE FROM programs")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let accounts = sqlx::query("DELETE FROM users WHERE is_staff = false")
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    println!(
        "✅ Deleted {} programs and {} student accounts in {:?}",
        programs,
        accounts,
        start_time.elapsed()
    );
    Ok(())
}

/// Builds `($1, $2), ($3, $4), ...` for a multi-row insert.
pub(crate) fn values_placeholders(rows: usize, columns: usize) -> String {
    (0..rows)
        .map(|row| {
            let params: Vec<String> = (1..=columns)
                .map(|col| format!("${}", row * columns + col))
                .collect();
            format!("({})", params.join(", "))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_placeholders() {
        assert_eq!(values_placeholders(2, 3), "($1, $2, $3), ($4, $5, $6)");
        assert_eq!(values_placeholders(1, 1), "($1)");
        assert_eq!(values_placeholders(0, 2), "");
    }
}
