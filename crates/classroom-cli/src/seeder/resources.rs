//! Resource seeding with a mix of drafts, pre-access and regular items.

use classroom_models::ResourceKind;
use fake::faker::lorem::en::{Sentence, Words};
use fake::{Fake, Faker};
use rayon::prelude::*;
use sqlx::PgPool;
use std::time::Instant;
use uuid::Uuid;

use super::models::ResourceSeed;
use super::{BATCH_SIZE, values_placeholders};

const KINDS: [ResourceKind; 3] = [ResourceKind::Pdf, ResourceKind::Video, ResourceKind::Zip];

pub fn generate_resources(section_ids: &[Uuid], per_section: usize) -> Vec<ResourceSeed> {
    section_ids
        .par_iter()
        .flat_map(|&section_id| {
            (0..per_section)
                .map(|idx| {
                    let kind = KINDS[idx % KINDS.len()];
                    let words: Vec<String> = Words(2..4).fake();
                    ResourceSeed {
                        section_id,
                        kind,
                        name: format!("{} ({})", words.join(" "), kind.label()),
                        description: Some(Sentence(4..10).fake()),
                        pre_access: Faker.fake(),
                        draft: idx % 4 == 3,
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn seed_resources(
    db: &PgPool,
    section_ids: &[Uuid],
    per_section: usize,
) -> Result<usize, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "📎 Seeding {} resources...",
        section_ids.len() * per_section
    );

    let resources = generate_resources(section_ids, per_section);
    let mut tx = db.begin().await?;
    for chunk in resources.chunks(BATCH_SIZE) {
        if chunk.is_empty() {
            continue;
        }
        let query = format!(
            "INSERT INTO resources (section_id, kind, name, description, pre_access, draft) VALUES {}",
            values_placeholders(chunk.len(), 6)
        );
        let mut q = sqlx::query(&query);
        for resource in chunk {
            q = q
                .bind(resource.section_id)
                .bind(resource.kind)
                .bind(&resource.name)
                .bind(&resource.description)
                .bind(resource.pre_access)
                .bind(resource.draft);
        }
        q.execute(&mut *tx).await?;
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} resources in {:?}",
        resources.len(),
        start_time.elapsed()
    );
    Ok(resources.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_resources_cycles_kinds_and_drafts() {
        let sections = vec![Uuid::new_v4()];
        let resources = generate_resources(&sections, 4);
        assert_eq!(resources.len(), 4);
        assert_eq!(resources[0].kind, ResourceKind::Pdf);
        assert_eq!(resources[1].kind, ResourceKind::Video);
        assert_eq!(resources[2].kind, ResourceKind::Zip);
        assert!(resources[3].draft);
        assert!(!resources[0].draft);
    }
}
