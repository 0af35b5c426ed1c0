//! Constellation Viewer - Constellation Browser & Interactive 3D Star Map
//!
//! Loads constellation descriptors from a folder of XML files and plots each
//! constellation's stars in 3D, with Earth at the origin.

pub mod charts;
pub mod config;
pub mod coords;
pub mod data;
pub mod gui;
pub mod logging;
