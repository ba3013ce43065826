use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{missing_rawdata_columns, rawdata_table_exists};
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db { check, info } = cmd {
        let db_path = cfg.database_path().to_string_lossy().to_string();
        let pool = DbPool::open_read_only(&db_path)?;

        //
        // 1) INFO
        //
        if *info {
            stats::print_db_info(&pool, &db_path)?;
        }

        //
        // 2) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}", RED, RESET, integrity);
            }

            if !rawdata_table_exists(&pool.conn)? {
                println!("{}✘ Table rawdata not found.{}\n", RED, RESET);
            } else {
                let missing = missing_rawdata_columns(&pool.conn)?;
                if missing.is_empty() {
                    println!("{}✔ rawdata layout OK.{}\n", GREEN, RESET);
                } else {
                    println!(
                        "{}✘ rawdata is missing columns:{} {}\n",
                        RED,
                        RESET,
                        missing.join(", ")
                    );
                }
            }
        }
    }

    Ok(())
}
