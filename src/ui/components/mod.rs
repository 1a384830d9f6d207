mod button;
mod checkbox;
mod slider;
mod switch;

pub use button::button;
pub use checkbox::checkbox;
pub use slider::threshold_slider;
pub use switch::switch;
