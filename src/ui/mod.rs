pub mod table;
pub mod width;
