// Library root
// -----------
// This crate exposes a small library surface for the `tour-images` CLI,
// which reads and seeds the `tour_images` table of a NoCodeBackend
// instance.
//
// Module responsibilities:
// - `config`: Builds the explicit `Config` (base URL, instance, token,
//   timeouts) from defaults, a TOML file and the environment.
// - `api`: Authenticated HTTP calls; every outcome becomes an `ApiResult`.
// - `images`: The `tour_images` query facade and filter helpers.
// - `record`: Wire types for image records.
// - `catalog` / `seed`: Static sample tables and the seed data generator.
// - `ui`: Console reports and the interactive menu.
//
// The binary (`main.rs`) only parses arguments and dispatches into `ui`,
// so everything below can be driven against a mock server in tests.
pub mod api;
pub mod catalog;
pub mod config;
pub mod images;
pub mod record;
pub mod seed;
pub mod ui;

pub use api::{ApiClient, ApiResult};
pub use config::Config;
pub use images::{Filters, TourImages};
pub use record::{NewImage, RelatedProgram, StoredImage, UsageStats};
