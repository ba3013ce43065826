pub mod event;
pub mod log_event;
pub mod period;
pub mod presence;
