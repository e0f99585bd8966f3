#![allow(dead_code)]

pub mod geometry;
