pub mod attendance;
pub mod config;
pub mod db;
pub mod devices;
pub mod export;
pub mod init;
pub mod present;
pub mod recent;
pub mod unique;
