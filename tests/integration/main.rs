#![allow(clippy::expect_used)]

mod common;
mod detection_test;
mod pipeline_test;
mod proactive_test;
