pub mod appointment;
pub mod auth;
pub mod calendar;
pub mod health;
pub mod pet;
pub mod schedule;
pub mod vet;
