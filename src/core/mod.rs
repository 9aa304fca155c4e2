// src/core/mod.rs

pub mod convert;
pub mod fuzzy;
pub mod html;
pub mod net;
pub mod sanitize;
