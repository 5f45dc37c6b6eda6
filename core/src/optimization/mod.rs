//! Batch execution
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod parallel;

pub use self::parallel::{solve_all, GraphReport, Terminals};
