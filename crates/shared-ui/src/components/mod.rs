// Standalone components
pub mod badge;
pub mod button;
pub mod card;
pub mod data_table;
pub mod detail_list;
pub mod filter_bar;
pub mod form_select;
pub mod input;
pub mod page_header;
pub mod pagination;
pub mod side_nav;
pub mod skeleton;
pub mod toggle_cell;

// Primitive wrappers
pub mod alert_dialog;
pub mod toast;

pub use alert_dialog::*;
pub use badge::*;
pub use button::*;
pub use card::*;
pub use data_table::*;
pub use detail_list::*;
pub use filter_bar::*;
pub use form_select::*;
pub use input::*;
pub use page_header::*;
pub use pagination::*;
pub use side_nav::*;
pub use skeleton::*;
pub use toast::*;
pub use toggle_cell::*;
