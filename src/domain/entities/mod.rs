pub mod address;
pub mod cell;
pub mod dataset;
pub mod record;
pub mod region;
