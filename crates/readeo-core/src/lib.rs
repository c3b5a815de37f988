//! Core types and trait definitions for the Readeo data-access layer.
//!
//! This crate is deliberately free of HTTP and database dependencies. It
//! describes *what* a table looks like ([`entity::EntitySpec`]), what a
//! storage backend must do ([`store::EntityStore`]), and the boundary that
//! turns backend failures into plain outcomes ([`dao::Dao`]).

pub mod catalogue;
pub mod dao;
pub mod entity;
pub mod error;
pub mod store;

pub use dao::{Dao, WriteOutcome};
pub use entity::{EntitySpec, Field, FieldKind, FieldValue, Presence};
pub use error::{Error, Result};
pub use store::{Assignments, EntityStore, Row, Window};
