pub mod import;
pub mod sink;
pub mod sqlite;
