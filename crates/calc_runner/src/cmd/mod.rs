pub mod kill;
pub mod summary;
