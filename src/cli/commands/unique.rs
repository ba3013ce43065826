use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::engine::unique_checkins_in_trailing_window;
use crate::core::source::EventSource;
use crate::errors::AppResult;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config, source: &dyn EventSource) -> AppResult<()> {
    if let Commands::Unique { days, as_of } = cmd {
        let days = days.unwrap_or(cfg.trailing_window_days);
        let as_of = match as_of {
            Some(s) => date::parse_as_of(s)?,
            None => date::now(),
        };

        let count = unique_checkins_in_trailing_window(source, days, as_of)?;

        // zero is printed like any other count
        println!(
            "Unique members in the last {days} days (as of {}): {count}",
            date::format_timestamp(&as_of)
        );
    }
    Ok(())
}
