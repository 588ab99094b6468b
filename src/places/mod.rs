pub mod error;
pub mod place_list;
