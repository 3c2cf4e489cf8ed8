// UI layer: console reports for each command plus a simple interactive
// menu built with `dialoguer`. Failures are printed and the flow moves on;
// only local errors (terminal I/O, bad input) are returned to the caller.

use crate::api::ApiResult;
use crate::catalog::country_names;
use crate::config::Config;
use crate::images::{filter_by_program, FilterPair, Filters, TourImages};
use crate::record::NewImage;
use crate::seed::{generate_batch, Seeder, DEFAULT_COUNT};
use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::time::Duration;

const WIDTH: usize = 60;

/// Print a separator line, optionally framing a title.
pub fn print_separator(title: &str) {
    let line = "=".repeat(WIDTH);
    if title.is_empty() {
        println!("{}\n", line);
    } else {
        println!("\n{}\n  {}\n{}\n", line, title, line);
    }
}

fn ok(msg: &str) {
    println!("{} {}", "✅".green(), msg);
}

fn fail(msg: &str) {
    println!("{} {}", "❌".red(), msg);
}

fn pretty(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Header naming the instance and origin the client actually talks to.
pub fn print_banner(images: &TourImages) {
    println!("\n🚀 NoCodeBackend API Client - Tour Images");
    println!("📦 Instance: {}", images.api().instance());
    println!("🔗 Base URL: {}\n", images.api().base_url());
}

/// Print a list result, showing at most `show` records in full.
pub fn report_list(result: &ApiResult, show: usize) -> Result<()> {
    match result {
        ApiResult::Success(_) => {
            let records = result.records();
            ok(&format!("Found {} images", records.len()));
            if records.is_empty() {
                println!("⚠️  No images found");
            }
            for (i, image) in records.iter().take(show).enumerate() {
                println!("\nImage {}:", i + 1);
                println!("{}", pretty(image)?);
            }
        }
        ApiResult::Failure { error } => fail(&format!("Request failed: {}", error)),
    }
    Ok(())
}

pub fn report_get(result: &ApiResult, id: &str) -> Result<()> {
    match result {
        ApiResult::Success(_) => {
            ok(&format!("Fetched image {}:", id));
            println!("{}", pretty(result.data().unwrap_or(&Value::Null))?);
        }
        ApiResult::Failure { error } => fail(&format!("Failed to fetch image {}: {}", id, error)),
    }
    Ok(())
}

/// The fixed demonstration sequence: list, search by country, search with
/// an operator, then fetch the first listed record by id.
pub fn run_fetch_demo(images: &TourImages) -> Result<()> {
    print_separator("Task 1: Fetch All Images");
    let all = images.list_all(100);
    report_list(&all, 2)?;

    print_separator("Task 2: Search Images by Country");
    let filters = Filters::new().with("country", "Japan");
    println!("🔍 Searching for images with filters: {}\n", filters);
    report_list(&images.search(&filters), 1)?;

    print_separator("Bonus: Search with Operators");
    let filters = Filters::new().with("total_usage[gt]", 10);
    println!("🔍 Searching for images with filters: {}\n", filters);
    let result = images.search(&filters);
    match &result {
        ApiResult::Success(_) => ok(&format!(
            "Found {} images with total_usage > 10",
            result.records().len()
        )),
        ApiResult::Failure { error } => fail(&format!("Search failed: {}", error)),
    }

    print_separator("Bonus: Get Image by ID");
    match all.records().first().and_then(|r| r.get("id")) {
        Some(id) => {
            let id = match id {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            println!("🔍 Fetching image with ID: {}\n", id);
            report_get(&images.get_by_id(&id), &id)?;
        }
        None => println!("⚠️  No images available to fetch by ID"),
    }

    print_separator("");
    println!("✨ Done!\n");
    Ok(())
}

pub fn run_search(images: &TourImages, filters: &Filters) -> Result<()> {
    println!("🔍 Searching for images with filters: {}\n", filters);
    report_list(&images.search(filters), usize::MAX)
}

/// Fetch up to `limit` records and filter them locally by program.
pub fn run_programs(
    images: &TourImages,
    wholesaler: Option<&str>,
    code: Option<&str>,
    limit: u32,
) -> Result<()> {
    let result = images.list_all(limit);
    if let ApiResult::Failure { error } = &result {
        fail(&format!("Request failed: {}", error));
        return Ok(());
    }
    let hits = filter_by_program(result.records(), wholesaler, code);
    ok(&format!(
        "{} of {} images match wholesaler {:?} / code {:?}",
        hits.len(),
        result.records().len(),
        wholesaler.unwrap_or("*"),
        code.unwrap_or("*")
    ));
    for img in &hits {
        let programs: Vec<String> = img
            .related_programs_log
            .iter()
            .map(|p| format!("{} {} {}", p.code, p.name, p.date))
            .collect();
        println!(
            "  #{:<6} {:40} | {:12} | {}",
            img.id_string().unwrap_or_default(),
            img.image_name,
            img.country,
            programs.join("; ")
        );
    }
    Ok(())
}

fn seed_header(count: usize, instance: &str) {
    println!("\n{}", "=".repeat(70));
    println!("  🌱 SEED DATA GENERATOR - Tour Images");
    println!("{}", "=".repeat(70));
    println!("\n📦 Instance: {}", instance);
    println!("🎯 Target: {} records", count);
    println!("🌏 Countries: {}", country_names().collect::<Vec<_>>().join(", "));
    println!("\n{}\n", "=".repeat(70));
}

/// Generate `count` records and create them, or just print them when
/// `dry_run` is set.
pub fn run_seed(images: &TourImages, count: usize, delay: Duration, dry_run: bool) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let records = generate_batch(&mut rand::thread_rng(), count, today);
    seed_header(records.len(), images.api().instance());

    if dry_run {
        for record in &records {
            println!("{}", pretty(&serde_json::to_value(record)?)?);
        }
        println!("\n📝 Dry run: {} records generated, nothing sent.", records.len());
        return Ok(());
    }

    let total = records.len();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(ProgressStyle::with_template(
        "{spinner} [{bar:30}] {pos}/{len} {msg}",
    )?);
    pb.set_message("Creating...");

    println!("🚀 Starting data creation...\n");
    let summary = Seeder::new(images, delay).run(&records, |outcome| {
        pb.suspend(|| print_seed_line(outcome.index, outcome.total, outcome.record, outcome.result));
        pb.inc(1);
    });
    pb.finish_and_clear();

    println!("\n{}", "=".repeat(70));
    println!("  📊 SUMMARY");
    println!("{}", "=".repeat(70));
    println!("\n✅ Success: {}", summary.succeeded);
    println!("❌ Failed:  {}", summary.failed());
    println!("📈 Total:   {}", summary.attempted);
    for f in &summary.failures {
        println!("   #{:<3} {} - {}", f.index, f.image_name, f.error);
    }
    if summary.succeeded > 0 {
        println!("\n🎉 Successfully created {} image records!", summary.succeeded);
    }
    println!("\n{}\n", "=".repeat(70));
    Ok(())
}

fn print_seed_line(index: usize, total: usize, record: &NewImage, result: &ApiResult) {
    match result {
        ApiResult::Success(_) => {
            let id = result.id().map(|v| v.to_string()).unwrap_or_else(|| "?".into());
            println!(
                "{} [{:2}/{}] Created: {:40} | {:12} | ID: {}",
                "✅".green(),
                index,
                total,
                record.image_name,
                record.country,
                id
            );
        }
        ApiResult::Failure { error } => println!(
            "{} [{:2}/{}] Failed: {:40} | Error: {}",
            "❌".red(),
            index,
            total,
            record.image_name,
            error
        ),
    }
}

/// Parse whitespace separated `KEY=VALUE` pairs typed at a prompt.
fn parse_filters(line: &str) -> std::result::Result<Filters, String> {
    line.split_whitespace()
        .map(str::parse::<FilterPair>)
        .collect::<std::result::Result<Filters, String>>()
}

/// Main interactive menu. Runs until the user chooses "Exit".
pub fn main_menu(images: &TourImages, config: &Config) -> Result<()> {
    print_banner(images);
    loop {
        let items = vec![
            "Run fetch demo",
            "List images",
            "Get image by ID",
            "Search by country",
            "Search with filters",
            "Find by wholesaler / tour code",
            "Seed sample data",
            "Exit",
        ];
        // `Select` is keyboard-driven: arrow keys and Enter pick an entry.
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            // Same fixed sequence as the `fetch` subcommand.
            0 => run_fetch_demo(images)?,
            1 => {
                let limit: u32 = Input::new()
                    .with_prompt("Limit")
                    .default(100)
                    .interact_text()?;
                report_list(&images.list_all(limit), usize::MAX)?;
            }
            2 => {
                // The client encodes the id as a single path segment, so
                // whatever is typed here cannot reach another endpoint.
                let id: String = Input::new().with_prompt("Image ID").interact_text()?;
                report_get(&images.get_by_id(id.trim()), id.trim())?;
            }
            3 => {
                // Offer the seeded countries rather than free text.
                let countries: Vec<&str> = country_names().collect();
                let i = Select::new().items(&countries).default(0).interact()?;
                run_search(images, &Filters::new().with("country", countries[i]))?;
            }
            4 => {
                // Validation re-prompts until every token is KEY=VALUE, so
                // the parse below only fails if the validator is bypassed.
                let line: String = Input::new()
                    .with_prompt("Filters (e.g. country=Japan total_usage[gt]=10)")
                    .validate_with(|s: &String| parse_filters(s).map(|_| ()))
                    .interact_text()?;
                match parse_filters(&line) {
                    Ok(filters) => run_search(images, &filters)?,
                    Err(e) => fail(&e),
                }
            }
            5 => {
                // Blank answers mean "any". Filtering runs locally over a
                // large page because the service cannot look inside
                // `related_programs_log`.
                let wholesaler: String = Input::new()
                    .with_prompt("Wholesaler (blank for any)")
                    .allow_empty(true)
                    .interact_text()?;
                let code: String = Input::new()
                    .with_prompt("Tour code (blank for any)")
                    .allow_empty(true)
                    .interact_text()?;
                let non_empty = |s: &str| Some(s.trim().to_string()).filter(|s| !s.is_empty());
                run_programs(
                    images,
                    non_empty(&wholesaler).as_deref(),
                    non_empty(&code).as_deref(),
                    1000,
                )?;
            }
            6 => {
                let count: usize = Input::new()
                    .with_prompt("How many records")
                    .default(DEFAULT_COUNT)
                    .interact_text()?;
                // A dry run only prints payloads, so it skips the
                // confirmation; a real run writes to the remote instance
                // and cannot be undone from here.
                let dry_run = Confirm::new()
                    .with_prompt("Dry run (print records only)?")
                    .default(false)
                    .interact()?;
                if !dry_run
                    && !Confirm::new()
                        .with_prompt(format!(
                            "Create {} records on instance {}?",
                            count,
                            images.api().instance()
                        ))
                        .interact()?
                {
                    continue;
                }
                run_seed(images, count, config.seed_delay, dry_run)?;
            }
            7 => break,
            _ => {}
        }
    }
    Ok(())
}
