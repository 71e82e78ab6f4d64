//! Client SDK for the XG push REST platform.
//!
//! Messages are built from [`models::message`], signed by [`utils::sign`] and
//! sent through [`clients::xinge::XingeClient`].

pub mod clients;
pub mod config;
pub mod models;
pub mod utils;
