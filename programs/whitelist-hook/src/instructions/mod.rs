pub mod admin;
pub mod initialize_extra_account_meta_list;
pub mod initialize_white_list;
pub mod transfer_hook;
pub mod white_list;

pub use initialize_extra_account_meta_list::*;
pub use initialize_white_list::*;
pub use transfer_hook::*;
pub use white_list::*;
