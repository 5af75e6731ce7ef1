// src/lib.rs

//! jobboard Library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
