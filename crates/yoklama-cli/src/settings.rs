//! Settings document maintenance.

use std::path::Path;

use anyhow::{Context, bail};
use yoklama_calendar::academic::count_instruction_days;
use yoklama_core::KeyValueStore;
use yoklama_core::storage::JsonStoreExt;
use yoklama_models::settings::AcademicSettings;

/// Stored settings, or the defaults when nothing has been saved.
pub async fn load_or_default(
    store: &dyn KeyValueStore,
    key: &str,
) -> anyhow::Result<(AcademicSettings, bool)> {
    let stored = store
        .get_json::<AcademicSettings>(key)
        .await
        .with_context(|| format!("Failed to read '{}'", key))?;
    Ok(match stored {
        Some(settings) => (settings, true),
        None => (AcademicSettings::default(), false),
    })
}

/// Human-readable summary.
pub fn describe(settings: &AcademicSettings) -> String {
    let dates = &settings.semester_dates;
    let mut lines = vec![
        format!("Akademik yıl: {}", settings.academic_year),
        format!(
            "Güz dönemi:   {} - {} ({} ders günü)",
            dates.fall_start,
            dates.fall_end,
            count_instruction_days(settings, dates.fall_start, dates.fall_end)
        ),
        format!(
            "Bahar dönemi: {} - {} ({} ders günü)",
            dates.spring_start,
            dates.spring_end,
            count_instruction_days(settings, dates.spring_start, dates.spring_end)
        ),
        format!("Tatiller ({}):", settings.holidays.len()),
    ];
    lines.extend(settings.holidays.iter().map(|h| {
        format!("  {} {} [{}]", h.date, h.name, h.kind.label())
    }));
    lines.push(format!("Sınav dönemleri ({}):", settings.exam_periods.len()));
    lines.extend(settings.exam_periods.iter().map(|p| {
        format!(
            "  {} - {} {} [{}]",
            p.start_date,
            p.end_date,
            p.name,
            p.semester.label()
        )
    }));
    lines.join("\n")
}

pub fn export_json(settings: &AcademicSettings) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(settings)?)
}

/// Reads a settings document from `path`, checks it and stores it.
pub async fn import_file(
    store: &dyn KeyValueStore,
    key: &str,
    path: &Path,
) -> anyhow::Result<AcademicSettings> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut settings: AcademicSettings =
        serde_json::from_str(&raw).with_context(|| format!("Invalid settings in {}", path.display()))?;

    let dates = &settings.semester_dates;
    if dates.fall_start >= dates.fall_end || dates.spring_start >= dates.spring_end {
        bail!("Dönem başlangıç tarihi bitiş tarihinden önce olmalıdır");
    }
    if let Some(period) = settings
        .exam_periods
        .iter()
        .find(|p| p.start_date >= p.end_date)
    {
        bail!("Sınav dönemi '{}' geçersiz tarih aralığına sahip", period.name);
    }

    settings.holidays.sort_by_key(|h| h.date);
    settings.exam_periods.sort_by_key(|p| p.start_date);
    store.put_json(key, &settings).await?;
    Ok(settings)
}
