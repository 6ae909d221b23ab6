pub mod error;

pub mod attendance;
pub mod auth;
pub mod calendar;
pub mod common;
pub mod config;
pub mod course;
pub mod enrollment;
pub mod invoice;
pub mod private_lesson;
pub mod search;
pub mod session;
pub mod student;
pub mod teacher;

pub use error::*;

pub use attendance::*;
pub use auth::*;
pub use calendar::*;
pub use common::*;
pub use config::*;
pub use course::*;
pub use enrollment::*;
pub use invoice::*;
pub use private_lesson::*;
pub use search::*;
pub use session::*;
pub use student::*;
pub use teacher::*;
