// Seed data generator: builds plausible `tour_images` records from the
// static catalog and submits them one at a time.
//
// Randomness and the current date are passed in so runs can be replayed
// in tests with a seeded RNG.

use crate::api::ApiResult;
use crate::catalog::{all_locations, WHOLESALERS};
use crate::images::TourImages;
use crate::record::{NewImage, RelatedProgram, UsageStats};
use chrono::{Days, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_COUNT: usize = 50;

/// Shuffle every catalog pair and take the first `count` (capped at the
/// catalog size). A pair never appears twice in one selection.
pub fn select_locations<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
) -> Vec<(&'static str, &'static str)> {
    let mut all = all_locations();
    all.shuffle(rng);
    all.truncate(count);
    all
}

fn random_program<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> RelatedProgram {
    let code = format!("XJ{}", rng.gen_range(200..=999));
    let name = WHOLESALERS
        .choose(rng)
        .copied()
        .unwrap_or(WHOLESALERS[0])
        .to_string();
    let offset = rng.gen_range(1..=90);
    let date = today
        .checked_add_days(Days::new(offset))
        .unwrap_or(today);
    RelatedProgram { code, name, date }
}

/// Synthesize one record. `index` is the 1-based position in the run and
/// ends up in the image URL.
pub fn generate_record<R: Rng + ?Sized>(
    rng: &mut R,
    index: usize,
    country: &str,
    location: &str,
    today: NaiveDate,
) -> NewImage {
    let stats = UsageStats {
        banner_1: rng.gen_range(0..=8),
        banner_other: rng.gen_range(0..=5),
        detail: rng.gen_range(0..=10),
    };

    let program_count = rng.gen_range(1..=3);
    let programs = (0..program_count)
        .map(|_| random_program(rng, today))
        .collect();

    let image_name = format!("{}-{:02}.jpg", location, rng.gen_range(1..=99));
    let country_code: String = country.chars().take(2).collect::<String>().to_lowercase();
    let image_url = format!(
        "https://example.com/img/{}/{}-{:03}.jpg",
        country_code,
        location.to_lowercase(),
        index
    );

    NewImage::new(image_name, image_url, country, stats, programs)
}

/// Select `count` locations and generate one record for each.
pub fn generate_batch<R: Rng + ?Sized>(rng: &mut R, count: usize, today: NaiveDate) -> Vec<NewImage> {
    select_locations(rng, count)
        .into_iter()
        .enumerate()
        .map(|(i, (country, location))| generate_record(rng, i + 1, country, location, today))
        .collect()
}

/// Result of one create attempt, handed to the progress callback.
pub struct SeedOutcome<'a> {
    /// 1-based.
    pub index: usize,
    pub total: usize,
    pub record: &'a NewImage,
    pub result: &'a ApiResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeedFailure {
    pub index: usize,
    pub image_name: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<SeedFailure>,
    pub created_ids: Vec<Value>,
}

impl SeedSummary {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Submits records sequentially with a fixed pause between creates.
pub struct Seeder<'a> {
    images: &'a TourImages,
    delay: Duration,
}

impl<'a> Seeder<'a> {
    pub fn new(images: &'a TourImages, delay: Duration) -> Self {
        Seeder { images, delay }
    }

    /// Create every record in order. A failed create is recorded and the
    /// run moves on; nothing is retried or rolled back.
    pub fn run<F>(&self, records: &[NewImage], mut on_outcome: F) -> SeedSummary
    where
        F: FnMut(&SeedOutcome<'_>),
    {
        let total = records.len();
        let mut summary = SeedSummary::default();
        info!(total, delay_ms = self.delay.as_millis() as u64, "seeding tour images");

        for (i, record) in records.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                thread::sleep(self.delay);
            }

            let result = self.images.create(record);
            summary.attempted += 1;
            match &result {
                ApiResult::Success(_) => {
                    summary.succeeded += 1;
                    if let Some(id) = result.id() {
                        summary.created_ids.push(id.clone());
                    }
                }
                ApiResult::Failure { error } => {
                    warn!(index = i + 1, image = %record.image_name, %error, "create failed");
                    summary.failures.push(SeedFailure {
                        index: i + 1,
                        image_name: record.image_name.clone(),
                        error: error.clone(),
                    });
                }
            }

            on_outcome(&SeedOutcome {
                index: i + 1,
                total,
                record,
                result: &result,
            });
        }

        info!(
            succeeded = summary.succeeded,
            failed = summary.failed(),
            "seeding finished"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn selection_has_no_duplicate_pairs() {
        for seed in [1u64, 2, 99] {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = select_locations(&mut rng, DEFAULT_COUNT);
            assert_eq!(picked.len(), 50);
            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), 50);
        }
    }

    #[test]
    fn different_seeds_give_different_selections() {
        let a = select_locations(&mut StdRng::seed_from_u64(1), DEFAULT_COUNT);
        let b = select_locations(&mut StdRng::seed_from_u64(2), DEFAULT_COUNT);
        assert_ne!(a, b);
    }

    #[test]
    fn selection_is_capped_at_catalog_size() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(select_locations(&mut rng, 500).len(), 80);
        assert!(select_locations(&mut rng, 0).is_empty());
    }

    #[test]
    fn generated_records_hold_invariants() {
        let mut rng = StdRng::seed_from_u64(42);
        let today = today();
        let latest = today.checked_add_days(Days::new(90)).unwrap();

        for record in generate_batch(&mut rng, DEFAULT_COUNT, today) {
            let s = record.usage_stats;
            assert_eq!(record.total_usage, s.banner_1 + s.banner_other + s.detail);
            assert!(s.banner_1 <= 8 && s.banner_other <= 5 && s.detail <= 10);

            let programs = &record.related_programs_log;
            assert!((1..=3).contains(&programs.len()));
            for p in programs {
                let digits = p.code.strip_prefix("XJ").expect("XJ prefix");
                assert_eq!(digits.len(), 3);
                let n: u32 = digits.parse().unwrap();
                assert!((200..=999).contains(&n));
                assert!(WHOLESALERS.contains(&p.name.as_str()));
                assert!(p.date > today && p.date <= latest);
            }
        }
    }

    #[test]
    fn names_and_urls_follow_location() {
        let mut rng = StdRng::seed_from_u64(3);
        let record = generate_record(&mut rng, 7, "Japan", "Nara-Deer-Park", today());

        assert_eq!(record.country, "Japan");
        assert_eq!(record.image_url, "https://example.com/img/ja/nara-deer-park-007.jpg");

        let suffix = record
            .image_name
            .strip_prefix("Nara-Deer-Park-")
            .and_then(|s| s.strip_suffix(".jpg"))
            .unwrap();
        assert_eq!(suffix.len(), 2);
        let n: u32 = suffix.parse().unwrap();
        assert!((1..=99).contains(&n));
    }

    #[test]
    fn batch_indexes_are_sequential() {
        let mut rng = StdRng::seed_from_u64(5);
        let batch = generate_batch(&mut rng, 3, today());
        for (i, record) in batch.iter().enumerate() {
            assert!(record.image_url.ends_with(&format!("-{:03}.jpg", i + 1)));
        }
    }
}
