//! Sales Engine API Library
//!
//! This library provides the core functionality for the insurance sales
//! engine API: lead scoring, carrier matching, the static carrier catalog,
//! data models, and HTTP handlers.
//!
//! # Modules
//!
//! - `catalog`: Static carrier catalog, built once at startup.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `matching`: Carrier matching and ranking logic.
//! - `models`: Core data models.
//! - `scoring`: Lead scoring logic.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod matching;
pub mod models;
pub mod scoring;
