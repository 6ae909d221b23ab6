#[cfg(feature = "server")]
pub(crate) mod auth;

mod account;
pub use account::*;

mod dashboard;
pub use dashboard::*;

mod students;
pub use students::*;

mod teachers;
pub use teachers::*;

mod sessions;
pub use sessions::*;

mod attendance;
pub use attendance::*;

mod private_lessons;
pub use private_lessons::*;

mod invoices;
pub use invoices::*;
