pub mod config;
pub mod consts;
pub mod error;
pub mod io;
pub mod observation;
pub mod pipeline;
pub mod projection;
pub mod ratio;
pub mod regions;
pub mod skycover;
pub mod threshold;
