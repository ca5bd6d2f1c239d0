pub mod banner;
pub mod catalog;
pub mod view_state;
