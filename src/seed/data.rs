use crate::model::{NewYarn, YarnWeight};
use crate::store::traits::YarnStore;
use anyhow::{Context, Result};
use serde::Serialize;

/// Outcome of a seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// The starter stash loaded on first boot
pub fn seed_yarns() -> Vec<NewYarn> {
    vec![
        NewYarn::new("Oatmeal", YarnWeight::Medium)
            .with_brand("Lion Brand")
            .with_material("Wool")
            .with_num_skeins(4)
            .with_thumbnail("oatmeal.jpg"),
        NewYarn::new("Midnight", YarnWeight::Fine)
            .with_brand("Knit Picks")
            .with_material("Merino")
            .with_length_yards(660)
            .with_thumbnail("midnight.jpg"),
        NewYarn::new("Seafoam", YarnWeight::Lace)
            .with_brand("Malabrigo")
            .with_material("Mohair")
            .with_special_attr("Hand-dyed")
            .with_length_yards(1100)
            .with_thumbnail("seafoam.jpg"),
        NewYarn::new("Cranberry", YarnWeight::Bulky)
            .with_brand("Bernat")
            .with_material("Acrylic")
            .with_num_skeins(2),
        NewYarn::new("Charcoal", YarnWeight::SuperFine)
            .with_brand("Cascade")
            .with_material("Wool/Nylon")
            .with_special_attr("Sock")
            .with_length_yards(437)
            .with_thumbnail("charcoal.jpg"),
        NewYarn::new("Buttercup", YarnWeight::Light)
            .with_brand("Paintbox")
            .with_material("Cotton")
            .with_num_skeins(6),
        NewYarn::new("Forest Tweed", YarnWeight::SuperBulky)
            .with_brand("Wool and the Gang")
            .with_material("Wool")
            .with_special_attr("Tweed")
            .with_num_skeins(3)
            .with_thumbnail("forest-tweed.jpg"),
        NewYarn::new("Cloud", YarnWeight::Jumbo)
            .with_material("Chenille")
            .with_special_attr("Velvet")
            .with_length_yards(48),
        NewYarn::new("Rainbow Scraps", YarnWeight::Medium).with_special_attr("Variegated"),
    ]
}

/// Insert every seed yarn whose (color, weight) pair is not already stored
pub async fn load_seed_data<S: YarnStore + ?Sized>(store: &S) -> Result<SeedReport> {
    load_yarns(store, seed_yarns()).await
}

pub async fn load_yarns<S: YarnStore + ?Sized>(store: &S, yarns: Vec<NewYarn>) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for yarn in yarns {
        let existing = store
            .find_by_color_and_weight(&yarn.color, yarn.weight)
            .await?;

        if let Some(existing) = existing {
            log::info!(
                "  Yarn '{}' ({}) already stored as #{} - skipping",
                yarn.color,
                yarn.weight,
                existing.id
            );
            report.skipped += 1;
            continue;
        }

        let label = format!("{} ({})", yarn.color, yarn.weight);
        store
            .insert_yarn(yarn)
            .await
            .with_context(|| format!("Failed to seed yarn {}", label))?;
        report.inserted += 1;
    }

    log::info!(
        "Seeding finished: {} inserted, {} skipped",
        report.inserted,
        report.skipped
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::YarnFilter;
    use crate::store::MemoryStore;
    use std::collections::HashSet;

    #[test]
    fn test_seed_list_is_valid_and_unique() {
        let yarns = seed_yarns();
        let mut pairs = HashSet::new();
        for yarn in &yarns {
            assert_eq!(yarn.validate(), Ok(()), "invalid seed yarn {:?}", yarn);
            assert!(pairs.insert((yarn.color.clone(), yarn.weight)));
        }
    }

    #[tokio::test]
    async fn test_seeding_twice_does_not_duplicate() {
        let store = MemoryStore::new();
        let expected = seed_yarns().len();

        let first = load_seed_data(&store).await.unwrap();
        assert_eq!(first, SeedReport { inserted: expected, skipped: 0 });

        let second = load_seed_data(&store).await.unwrap();
        assert_eq!(second, SeedReport { inserted: 0, skipped: expected });

        assert_eq!(store.count_yarns().await.unwrap(), expected as i64);
    }

    #[tokio::test]
    async fn test_existing_row_is_left_untouched() {
        let store = MemoryStore::new();
        let mine = store
            .insert_yarn(NewYarn::new("Oatmeal", YarnWeight::Medium).with_num_skeins(1))
            .await
            .unwrap();

        let report = load_seed_data(&store).await.unwrap();
        assert_eq!(report.skipped, 1);

        let stored = store.get_yarn(mine.id).await.unwrap().unwrap();
        assert_eq!(stored, mine);

        let oatmeal = store
            .list_yarns(&YarnFilter {
                color: Some("oatmeal".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(oatmeal.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicates_within_one_batch_are_skipped() {
        let store = MemoryStore::new();
        let report = load_yarns(
            &store,
            vec![
                NewYarn::new("Teal", YarnWeight::Fine).with_num_skeins(1),
                NewYarn::new("Teal", YarnWeight::Fine).with_num_skeins(5),
                NewYarn::new("Teal", YarnWeight::Bulky),
            ],
        )
        .await
        .unwrap();

        assert_eq!(report, SeedReport { inserted: 2, skipped: 1 });
    }

    #[tokio::test]
    async fn test_invalid_seed_entry_fails() {
        let store = MemoryStore::new();
        let err = load_yarns(
            &store,
            vec![NewYarn::new("Teal", YarnWeight::Fine)
                .with_num_skeins(1)
                .with_length_yards(10)],
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("Teal (Fine)"));
    }
}
