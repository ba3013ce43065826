use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::engine::current_presence;
use crate::core::source::EventSource;
use crate::errors::AppResult;
use crate::models::presence::PresentMember;
use crate::ui::messages::header;
use crate::utils::colors::colorize_flag;
use crate::utils::date::{self, format_timestamp};
use crate::utils::table::Table;
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config, source: &dyn EventSource) -> AppResult<()> {
    if let Commands::Present {
        date: date_arg,
        equipment,
    } = cmd
    {
        let day = match date_arg {
            Some(d) => date::parse_date(d)?,
            None => date::today(),
        };
        let kinds = if equipment.is_empty() {
            cfg.equipment.clone()
        } else {
            equipment.clone()
        };

        let present = current_presence(source, day, &kinds)?;

        header(format!(
            "Checked in on {day} (updated: {})",
            format_timestamp(&date::now())
        ));
        print!("{}", render(&present, &kinds, cfg.separator(), day));
    }
    Ok(())
}

pub fn render(
    present: &[PresentMember],
    kinds: &[String],
    separator: char,
    day: NaiveDate,
) -> String {
    if present.is_empty() {
        return format!("No records found for {day}\n");
    }

    let mut headers = vec!["Client".to_string(), "Name".to_string(), "Since".to_string()];
    headers.extend(kinds.iter().cloned());

    let mut table = Table::new(&headers[..]).with_separator(separator);
    for m in present {
        let mut row = vec![
            m.client_id.to_string(),
            m.first_name.clone(),
            m.checked_in_at.format("%H:%M:%S").to_string(),
        ];
        row.extend(kinds.iter().map(|k| colorize_flag(m.has_access(k))));
        table.add_row(row);
    }

    format!("{}{} present\n", table.render(), present.len())
}
