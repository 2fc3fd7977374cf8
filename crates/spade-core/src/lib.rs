//! Core types and trait definitions for the Spade lyrics archive.
//!
//! No HTTP or database code lives here. The store, API, web and admin
//! crates all build on these types.

#![allow(async_fn_in_trait)]

pub mod admin;
pub mod annotation;
pub mod artist;
pub mod error;
pub mod lyrics;
pub mod query;
pub mod session;
pub mod slug;
pub mod song;
pub mod store;
pub mod taxonomy;

pub use error::{Error, Result};
