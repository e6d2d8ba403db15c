//! Route Handlers

pub mod data_points;
