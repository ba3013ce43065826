use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::engine::recent_events;
use crate::core::source::EventSource;
use crate::db::migrate::RAWDATA_COLUMNS;
use crate::errors::AppResult;
use crate::models::event::Event;
use crate::ui::messages::header;
use crate::utils::colors::colorize_log_event;
use crate::utils::formatting::right_ellipsis;
use crate::utils::table::Table;

const LOG_DATA_WIDTH: usize = 40;

pub fn handle(cmd: &Commands, cfg: &Config, source: &dyn EventSource) -> AppResult<()> {
    if let Commands::Recent { limit } = cmd {
        let limit = limit.unwrap_or(cfg.recent_limit);
        let events = recent_events(source, limit)?;

        header(format!("Last {limit} events"));
        print!("{}", render(&events, cfg.separator()));
    }
    Ok(())
}

pub fn event_row(ev: &Event) -> Vec<String> {
    vec![
        ev.record_number.to_string(),
        ev.timestamp_str(),
        ev.category.clone(),
        ev.device_id.clone(),
        ev.device_function.clone(),
        colorize_log_event(
            &ev.log_event.to_db_string(),
            ev.log_event.is_check_in(),
            ev.log_event.is_check_out(),
        ),
        ev.client_id.to_string(),
        ev.first_name.clone(),
        right_ellipsis(&ev.log_data, LOG_DATA_WIDTH),
    ]
}

pub fn render(events: &[Event], separator: char) -> String {
    if events.is_empty() {
        return "No records found\n".to_string();
    }

    let mut table = Table::new(&RAWDATA_COLUMNS[..]).with_separator(separator);
    for ev in events {
        table.add_row(event_row(ev));
    }
    table.render()
}
