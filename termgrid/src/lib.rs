pub mod buffer;
pub mod event;
pub mod geometry;
pub mod layers;
pub mod style;
pub mod terminal;
pub mod text;

pub use buffer::{Buffer, Cell};
pub use event::{Event, Key, Modifiers, MouseButton};
pub use geometry::Rect;
pub use layers::{Compositor, Layer};
pub use style::{Paint, Rgb, TextStyle};
pub use terminal::Terminal;
