//! Domain types and storage contracts for the inventory service.
//!
//! This crate is the functional core: it holds no I/O. Backends live in the
//! `inventory` crate and implement [`storage::ProductRepository`].

pub mod product;
pub mod storage;
