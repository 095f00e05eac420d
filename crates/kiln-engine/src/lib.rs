//! Kiln engine crate.
//!
//! Platform and GPU plumbing for the viewer: a single-window winit runtime,
//! the wgpu device, a quad + glyph renderer for draw lists, and the fontdue
//! text system shared by measurement and rendering.

pub mod core;
pub mod coords;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
pub mod window;
