//! Result verification
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod correctness;

pub use self::correctness::{check_capacity, check_conservation, verify_max_flow, FlowViolation};
