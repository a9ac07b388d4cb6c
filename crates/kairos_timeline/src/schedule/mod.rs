pub mod breaks;
pub mod repository;
pub mod route;
pub mod visit;
