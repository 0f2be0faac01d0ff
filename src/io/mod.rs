//! Input/output surface: command line, files, images and diagnostics

/// Command-line parsing and the end-to-end runner
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error taxonomy shared by the whole crate
pub mod error;
/// Image codec, resizing and concatenation
pub mod image;
/// Source image lookup and output directory creation
pub mod paths;
/// Tile progress reporting
pub mod progress;
/// Demo renderings with outlined boxes
pub mod visualization;
