use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use dotenvy::dotenv;

use yoklama_calendar::grid::month_start;
use yoklama_calendar::{annotate_exam_periods, build_month_grid, holiday_lookup};
use yoklama_cli::calendar_view::render_month;
use yoklama_cli::seeder::{self, SeedConfig};
use yoklama_cli::settings;
use yoklama_config::StorageConfig;
use yoklama_core::storage::JsonStoreExt;
use yoklama_core::{FileStore, KeyValueStore};

#[derive(Parser)]
#[command(name = "yoklama-cli")]
#[command(about = "Yoklama CLI - settings, calendar and course catalog tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or replace the academic settings document
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Print the month grid built from the saved settings
    Calendar {
        /// Month as YYYY-MM (defaults to the current month)
        #[arg(short = 'm', long)]
        month: Option<String>,
    },
    /// Write a course catalog with generated rosters
    SeedCourses {
        /// Students per course (random 20-35 when omitted)
        #[arg(short = 's', long)]
        students: Option<u32>,

        /// Overwrite an existing catalog without asking
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the stored settings (or the defaults)
    Show,
    /// Delete the stored settings so the defaults apply
    Reset {
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Write the settings as JSON to a file or stdout
    Export {
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Replace the stored settings with a JSON file
    Import { path: PathBuf },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let config = StorageConfig::from_env();
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.data_dir.clone()));

    let result = match cli.command {
        Commands::Settings { action } => handle_settings(store.as_ref(), &config, action).await,
        Commands::Calendar { month } => handle_calendar(store.as_ref(), &config, month).await,
        Commands::SeedCourses { students, yes } => {
            handle_seed_courses(store.as_ref(), &config, students, yes).await
        }
    };

    if let Err(e) = result {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

fn confirm(prompt: &str, assume_yes: bool) -> anyhow::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

async fn handle_settings(
    store: &dyn KeyValueStore,
    config: &StorageConfig,
    action: SettingsAction,
) -> anyhow::Result<()> {
    let key = config.settings_key.as_str();
    match action {
        SettingsAction::Show => {
            let (current, stored) = settings::load_or_default(store, key).await?;
            if !stored {
                println!("(kayıtlı ayar yok, varsayılanlar gösteriliyor)");
            }
            println!("{}", settings::describe(&current));
        }
        SettingsAction::Reset { yes } => {
            if !confirm("Kayıtlı ayarlar silinsin mi?", yes)? {
                println!("İptal edildi");
                return Ok(());
            }
            store.delete(key).await?;
            println!("✅ Ayarlar varsayılanlara döndürüldü");
        }
        SettingsAction::Export { output } => {
            let (current, _) = settings::load_or_default(store, key).await?;
            let json = settings::export_json(&current)?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, json)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("✅ Ayarlar {} dosyasına yazıldı", path.display());
                }
                None => println!("{}", json),
            }
        }
        SettingsAction::Import { path } => {
            let imported = settings::import_file(store, key, &path).await?;
            println!(
                "✅ {} akademik yılı içe aktarıldı ({} tatil, {} sınav dönemi)",
                imported.academic_year,
                imported.holidays.len(),
                imported.exam_periods.len()
            );
        }
    }
    Ok(())
}

fn parse_month(value: &str) -> anyhow::Result<NaiveDate> {
    let (year, month) = value
        .split_once('-')
        .ok_or_else(|| anyhow!("Ay YYYY-MM biçiminde olmalıdır: {}", value))?;
    let year: i32 = year.parse().context("Geçersiz yıl")?;
    let month: u32 = month.parse().context("Geçersiz ay")?;
    month_start(year, month).ok_or_else(|| anyhow!("Geçersiz ay: {}", value))
}

async fn handle_calendar(
    store: &dyn KeyValueStore,
    config: &StorageConfig,
    month: Option<String>,
) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let reference = match month {
        Some(value) => parse_month(&value)?,
        None => today.with_day(1).unwrap_or(today),
    };

    let (current, _) = settings::load_or_default(store, &config.settings_key).await?;
    let mut grid = build_month_grid(reference, &holiday_lookup(&current.holidays), today)
        .ok_or_else(|| anyhow!("Bu ay için takvim oluşturulamaz: {}", reference.format("%Y-%m")))?;
    annotate_exam_periods(&mut grid, &current.exam_periods);
    print!("{}", render_month(&grid));
    Ok(())
}

async fn handle_seed_courses(
    store: &dyn KeyValueStore,
    config: &StorageConfig,
    students: Option<u32>,
    yes: bool,
) -> anyhow::Result<()> {
    let key = config.courses_key.as_str();
    if store.get(key).await?.is_some()
        && !confirm("Mevcut ders kataloğunun üzerine yazılsın mı?", yes)?
    {
        println!("İptal edildi");
        return Ok(());
    }

    let seed_config = students.map(SeedConfig::fixed).unwrap_or_default();
    println!("📚 Ders kataloğu oluşturuluyor...");
    let catalog = seeder::generate_catalog(seed_config);
    store.put_json(key, &catalog).await?;
    println!("✅ {} ders kaydedildi", catalog.courses.len());
    Ok(())
}
