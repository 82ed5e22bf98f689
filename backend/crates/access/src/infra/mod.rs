//! Infrastructure layer - store implementations

pub mod postgres;

pub use postgres::PgAccessRepository;
