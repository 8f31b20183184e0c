//! Iconfont CLI library.

pub mod cli;
