//! Camera and input controls.

mod events;
mod keyboard;
mod orbit;

pub use events::{ChangeListeners, ListenerId};
pub use keyboard::KeyboardState;
pub use orbit::OrbitControls;
