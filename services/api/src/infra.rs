use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use yenquit::assessment::Modality;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_modality(raw: &str) -> Result<Modality, String> {
    raw.parse::<Modality>().map_err(|err| err.to_string())
}

/// Parses a `YYYY-MM` month argument.
pub(crate) fn parse_month(raw: &str) -> Result<(i32, u32), String> {
    let invalid = || format!("failed to parse '{raw}' as YYYY-MM");
    let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let month = month.parse::<u32>().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(format!("month {month} in '{raw}' is outside 1-12"));
    }
    Ok((year, month))
}
