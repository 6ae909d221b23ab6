pub mod attendance;
pub mod create;
pub mod detail;
pub mod list;
pub mod sheet_create;
