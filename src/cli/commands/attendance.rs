use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::engine::unique_checkins_by_period;
use crate::core::source::EventSource;
use crate::errors::AppResult;
use crate::models::period::{Granularity, PeriodCount};
use crate::ui::messages::header;
use crate::utils::date;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config, source: &dyn EventSource) -> AppResult<()> {
    if let Commands::Attendance { by, since } = cmd {
        let since = match since {
            Some(s) => date::parse_date(s)?,
            None => cfg.reporting_start,
        };

        let counts = unique_checkins_by_period(source, *by, since)?;

        let title = match by {
            Granularity::Day => "Unique members per day",
            Granularity::Month => "Unique members per month",
        };
        header(format!("{title} since {since}"));
        print!("{}", render(&counts, *by, cfg.separator()));
    }
    Ok(())
}

pub fn render(counts: &[PeriodCount], by: Granularity, separator: char) -> String {
    if counts.is_empty() {
        return "No records found\n".to_string();
    }

    let headers: &[&str] = match by {
        Granularity::Day => &["Year", "Month", "Day", "Unique Members"],
        Granularity::Month => &["Year", "Month", "Unique Members"],
    };

    let mut table = Table::new(headers).with_separator(separator);
    for pc in counts {
        let mut row = vec![pc.period.year.to_string(), pc.period.month.to_string()];
        if let Some(day) = pc.period.day {
            row.push(day.to_string());
        }
        row.push(pc.count.to_string());
        table.add_row(row);
    }
    table.render()
}
