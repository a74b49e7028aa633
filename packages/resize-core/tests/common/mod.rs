#![allow(dead_code)]

pub mod fixtures;
pub mod memory;
pub mod mocks;

pub const BASE_URL: &str = "http://test";
