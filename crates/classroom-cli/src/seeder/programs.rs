//! Program and section seeding.

use chrono::{Duration, Local};
use fake::Fake;
use fake::faker::company::en::{Buzzword, CatchPhrase};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use super::models::{ProgramSeed, SectionSeed};
use super::{BATCH_SIZE, values_placeholders};

/// Generates program data in parallel using Rayon
pub fn generate_programs(count: usize) -> Vec<ProgramSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let topic: String = Buzzword().fake();
            let tagline: String = CatchPhrase().fake();
            ProgramSeed {
                name: format!("{} Program {}", capitalize(&topic), idx + 1),
                description: Some(tagline),
            }
        })
        .collect()
}

/// Generates sections whose start dates straddle today, so that both
/// started and upcoming sections exist.
pub fn generate_sections(program_ids: &[Uuid], per_program: usize) -> Vec<SectionSeed> {
    let today = Local::now().date_naive();

    program_ids
        .par_iter()
        .flat_map(|&program_id| {
            (0..per_program)
                .map(|idx| {
                    let offset: i64 = (-60..60).fake();
                    let start_date = today + Duration::days(offset);
                    SectionSeed {
                        program_id,
                        name: format!("Section {}", section_letter(idx)),
                        start_date,
                        completion_date: Some(start_date + Duration::days(90)),
                        access_link: Some(format!(
                            "https://meet.example.com/{}",
                            Uuid::new_v4().simple()
                        )),
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn seed_programs(
    db: &PgPool,
    count: usize,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("📚 Seeding {} programs...", count);

    let programs = generate_programs(count);
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(programs.len());
    for chunk in programs.chunks(BATCH_SIZE) {
        ids.extend(insert_programs_chunk(&mut tx, chunk).await?);
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} programs in {:?}",
        ids.len(),
        start_time.elapsed()
    );
    Ok(ids)
}

pub async fn seed_sections(
    db: &PgPool,
    program_ids: &[Uuid],
    per_program: usize,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "🏫 Seeding {} sections...",
        program_ids.len() * per_program
    );

    let sections = generate_sections(program_ids, per_program);
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(sections.len());
    for chunk in sections.chunks(BATCH_SIZE) {
        ids.extend(insert_sections_chunk(&mut tx, chunk).await?);
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} sections in {:?}",
        ids.len(),
        start_time.elapsed()
    );
    Ok(ids)
}

async fn insert_programs_chunk(
    tx: &mut Transaction<'_, Postgres>,
    programs: &[ProgramSeed],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    if programs.is_empty() {
        return Ok(Vec::new());
    }

    let query = format!(
        "INSERT INTO programs (name, description) VALUES {} RETURNING id",
        values_placeholders(programs.len(), 2)
    );

    let mut q = sqlx::query_scalar::<_, Uuid>(&query);
    for program in programs {
        q = q.bind(&program.name).bind(&program.description);
    }

    Ok(q.fetch_all(&mut **tx).await?)
}

async fn insert_sections_chunk(
    tx: &mut Transaction<'_, Postgres>,
    sections: &[SectionSeed],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    if sections.is_empty() {
        return Ok(Vec::new());
    }

    let query = format!(
        "INSERT INTO sections (program_id, name, start_date, completion_date, access_link) \
         VALUES {} RETURNING id",
        values_placeholders(sections.len(), 5)
    );

    let mut q = sqlx::query_scalar::<_, Uuid>(&query);
    for section in sections {
        q = q
            .bind(section.program_id)
            .bind(&section.name)
            .bind(section.start_date)
            .bind(section.completion_date)
            .bind(&section.access_link);
    }

    Ok(q.fetch_all(&mut **tx).await?)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 0 -> "A", 25 -> "Z", 26 -> "AA".
fn section_letter(mut idx: usize) -> String {
    let mut label = Vec::new();
    loop {
        label.push((b'A' + (idx % 26) as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    label.iter().rev().collect()
}
