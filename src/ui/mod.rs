// Terminal UI - playlist, now-playing panel, progress bar and the add-song form
// screen/form are plain data; everything that talks to the terminal sits behind the tui feature

pub mod form;
pub mod screen;

#[cfg(feature = "tui")]
mod app;
#[cfg(feature = "tui")]
pub mod events;
#[cfg(feature = "tui")]
mod render;
#[cfg(feature = "tui")]
mod terminal;

#[cfg(feature = "tui")]
pub use app::App;
#[cfg(feature = "tui")]
pub use events::AppEvent;
pub use form::{AddForm, FormField};
pub use screen::{HitBox, LayoutHits, ListRow, Renderer, RowHit, Screen};
#[cfg(feature = "tui")]
pub use terminal::TerminalManager;
