use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::source::EventSource;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ReportParams};
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config, source: &dyn EventSource) -> AppResult<()> {
    if let Commands::Export {
        report,
        format,
        file,
        date: date_arg,
        since,
        days,
        as_of,
        limit,
        force,
    } = cmd
    {
        let params = ReportParams {
            date: match date_arg {
                Some(d) => date::parse_date(d)?,
                None => date::today(),
            },
            equipment: cfg.equipment.clone(),
            since: match since {
                Some(s) => date::parse_date(s)?,
                None => cfg.reporting_start,
            },
            window_days: days.unwrap_or(cfg.trailing_window_days),
            as_of: match as_of {
                Some(s) => date::parse_as_of(s)?,
                None => date::now(),
            },
            limit: limit.unwrap_or(match report {
                crate::export::ReportKind::Devices => cfg.device_log_limit,
                _ => cfg.recent_limit,
            }),
        };

        ExportLogic::export(source, *report, *format, file, &params, *force)?;
    }
    Ok(())
}
