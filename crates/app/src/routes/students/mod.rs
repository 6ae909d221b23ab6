pub mod create;
pub mod detail;
pub mod edit;
pub mod invoice;
pub mod list;
