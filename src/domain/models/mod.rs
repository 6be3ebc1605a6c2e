pub mod appointment;
pub mod auth;
pub mod pet;
pub mod schedule;
pub mod slot;
pub mod user;
pub mod vet;
