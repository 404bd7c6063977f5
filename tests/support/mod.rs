#![allow(dead_code)]

pub mod catalog;
pub mod http_stub;
