pub mod api;
pub mod chart;
pub mod ipc;
pub mod stats;
pub mod view;
