//! Hero carousel: slides, the auto-advance state machine and its timer driver.

mod driver;
mod slides;
mod state;

pub use driver::CarouselDriver;
pub use slides::{default_slides, slides_from_bundle, Localized, Slide, SlideKind};
pub use state::{Carousel, CarouselView, Key, PlayState, Timing};
