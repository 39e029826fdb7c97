//! Cross-module tests

pub(crate) mod support;

mod dispatch_flow_test;
