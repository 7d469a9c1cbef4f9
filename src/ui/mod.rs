//! Terminal rendering.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! [`viewmodel`] holds plain data describing one frame. [`renderer`] walks it
//! and hands each part to [`components`]. Colors come from [`theme`].

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    AlertInfo, Body, DetailLine, DisplayItem, EmptyState, FooterInfo, FormFieldView, FormView,
    HeaderInfo, ListView, SearchBarInfo, TabInfo, UIViewModel,
};
