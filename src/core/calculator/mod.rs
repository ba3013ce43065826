pub mod attendance;
pub mod devices;
pub mod presence;
