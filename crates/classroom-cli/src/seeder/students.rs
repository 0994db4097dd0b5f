//! Student seeding: login account, student profile and one enrollment each.

use classroom_core::default_password;
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use super::models::StudentSeed;
use super::{BATCH_SIZE, SEED_BCRYPT_COST, values_placeholders};

/// Generates students for every section, hashing each default password in
/// parallel.
pub fn generate_students(
    section_ids: &[Uuid],
    per_section: usize,
    password_suffix: &str,
) -> Result<Vec<StudentSeed>, bcrypt::BcryptError> {
    section_ids
        .par_iter()
        .enumerate()
        .flat_map(|(section_idx, &section_id)| {
            (0..per_section)
                .into_par_iter()
                .map(move |student_idx| (section_idx, section_id, student_idx))
        })
        .map(|(section_idx, section_id, student_idx)| -> Result<StudentSeed, bcrypt::BcryptError> {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let name = format!("{} {}", first_name, last_name);
            let email = format!(
                "{}.{}+{}@example.com",
                first_name.to_lowercase(),
                last_name.to_lowercase(),
                section_idx * 1000 + student_idx
            );
            let number: u64 = (10_000_000_000..99_999_999_999).fake();
            let password_hash =
                bcrypt::hash(default_password(&name, password_suffix), SEED_BCRYPT_COST)?;

            Ok(StudentSeed {
                name,
                email,
                phone: Some(format!("+{}", number)),
                password_hash,
                section_id,
            })
        })
        .collect()
}

/// Seeds students and enrolls each one into its section. Returns the number
/// of students created.
pub async fn seed_students(
    db: &PgPool,
    section_ids: &[Uuid],
    per_section: usize,
    password_suffix: &str,
) -> Result<usize, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "🎓 Seeding {} students...",
        section_ids.len() * per_section
    );

    let students = generate_students(section_ids, per_section, password_suffix)?;
    println!("   ✓ Generated and hashed in {:?}", start_time.elapsed());

    let mut tx = db.begin().await?;
    for chunk in students.chunks(BATCH_SIZE) {
        insert_students_chunk(&mut tx, chunk).await?;
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} students with enrollments in {:?}",
        students.len(),
        start_time.elapsed()
    );
    Ok(students.len())
}

async fn insert_students_chunk(
    tx: &mut Transaction<'_, Postgres>,
    students: &[StudentSeed],
) -> Result<(), Box<dyn std::error::Error>> {
    if students.is_empty() {
        return Ok(());
    }

    let accounts_query = format!(
        "INSERT INTO users (username, email, first_name, password) VALUES {} RETURNING id",
        values_placeholders(students.len(), 4)
    );
    let mut q = sqlx::query_scalar::<_, Uuid>(&accounts_query);
    for student in students {
        q = q
            .bind(&student.email)
            .bind(&student.email)
            .bind(&student.name)
            .bind(&student.password_hash);
    }
    let user_ids: Vec<Uuid> = q.fetch_all(&mut **tx).await?;

    let students_query = format!(
        "INSERT INTO students (user_id, name, email, phone) VALUES {} RETURNING id",
        values_placeholders(students.len(), 4)
    );
    let mut q = sqlx::query_scalar::<_, Uuid>(&students_query);
    for (student, user_id) in students.iter().zip(&user_ids) {
        q = q
            .bind(*user_id)
            .bind(&student.name)
            .bind(&student.email)
            .bind(&student.phone);
    }
    let student_ids: Vec<Uuid> = q.fetch_all(&mut **tx).await?;

    let enrollments_query = format!(
        "INSERT INTO enrollments (student_id, section_id) VALUES {}",
        values_placeholders(students.len(), 2)
    );
    let mut q = sqlx::query(&enrollments_query);
    for (student, student_id) in students.iter().zip(&student_ids) {
        q = q.bind(*student_id).bind(student.section_id);
    }
    q.execute(&mut **tx).await?;

    Ok(())
}
