// SPDX-License-Identifier: MIT

pub mod circuit;
pub mod classifier;
pub mod config;
pub mod decision;
pub mod dispatch;
pub mod resources;
pub mod task;
