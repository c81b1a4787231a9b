pub mod analysis;
pub mod catalog;
pub mod reference;
pub mod status;
