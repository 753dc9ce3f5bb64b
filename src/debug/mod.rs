//! Debug panel model.
//!
//! Folders of clamped numeric sliders and option pickers, independent of
//! whatever front end draws them.

mod panel;
pub mod presets;

pub use panel::{ChoiceParam, NumericParam, PanelError, ParamChange, ParamFolder};
