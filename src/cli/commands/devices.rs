use crate::cli::commands::recent::event_row;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::devices::DeviceSection;
use crate::core::engine::device_log;
use crate::core::source::EventSource;
use crate::db::migrate::RAWDATA_COLUMNS;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::formatting::bold;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config, source: &dyn EventSource) -> AppResult<()> {
    if let Commands::Devices { limit } = cmd {
        let limit = limit.unwrap_or(cfg.device_log_limit);
        let sections = device_log(source, limit)?;

        header(format!("Last {limit} events by device"));
        print!("{}", render(&sections, cfg.separator()));
    }
    Ok(())
}

pub fn render(sections: &[DeviceSection], separator: char) -> String {
    if sections.is_empty() {
        return "No records found\n".to_string();
    }

    let mut out = String::new();
    for section in sections {
        let name = if section.device_id.is_empty() {
            "(unknown device)"
        } else {
            section.device_id.as_str()
        };
        out.push_str(&bold(&format!("▶ {name} ({} events)", section.events.len())));
        out.push('\n');

        let mut table = Table::new(&RAWDATA_COLUMNS[..]).with_separator(separator);
        for ev in &section.events {
            table.add_row(event_row(ev));
        }
        out.push_str(&table.render());
        out.push('\n');
    }
    out
}
