//! Carousel state machine.
//!
//! `Playing(index, progress)` / `Paused(index, progress)` over a fixed,
//! non-empty list of slides. Time only moves through [`Carousel::tick`];
//! the driver owns the real timer.

use super::slides::{default_slides, Slide};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Playing,
    Paused,
}

/// Keyboard input the carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Interval between progress updates
    pub tick: Duration,
    /// Time a slide stays on screen before auto-advancing
    pub duration: Duration,
}

impl Timing {
    pub fn new(tick: Duration, duration: Duration) -> Self {
        // A zero tick would spin; a slide must last at least one tick.
        let tick = tick.max(Duration::from_millis(1));
        Self {
            tick,
            duration: duration.max(tick),
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new(Duration::from_millis(40), Duration::from_millis(4000))
    }
}

/// Snapshot published to the hero and header regions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselView {
    pub index: usize,
    pub len: usize,
    /// 0.0 ..= 100.0
    pub progress: f64,
    pub playing: bool,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    slides: Vec<Slide>,
    index: usize,
    elapsed: Duration,
    state: PlayState,
    timing: Timing,
}

impl Carousel {
    /// Start at `Playing(0, 0)`. An empty list is replaced by the default slides.
    pub fn new(slides: Vec<Slide>, timing: Timing) -> Self {
        let slides = if slides.is_empty() { default_slides() } else { slides };
        Self {
            slides,
            index: 0,
            elapsed: Duration::ZERO,
            state: PlayState::Playing,
            timing,
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current(&self) -> &Slide {
        &self.slides[self.index]
    }

    pub fn progress_percent(&self) -> f64 {
        let total = self.timing.duration.as_secs_f64();
        (self.elapsed.as_secs_f64() / total * 100.0).min(100.0)
    }

    pub fn view(&self) -> CarouselView {
        CarouselView {
            index: self.index,
            len: self.len(),
            progress: self.progress_percent(),
            playing: self.is_playing(),
        }
    }

    /// One timer tick. Returns `true` when the slide advanced.
    pub fn tick(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }

        self.elapsed += self.timing.tick;
        if self.elapsed >= self.timing.duration {
            self.index = (self.index + 1) % self.len();
            self.elapsed = Duration::ZERO;
            true
        } else {
            false
        }
    }

    /// Next slide; play state unchanged.
    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.len();
        self.elapsed = Duration::ZERO;
    }

    /// Previous slide; play state unchanged.
    pub fn prev(&mut self) {
        let len = self.len();
        self.index = (self.index + len - 1) % len;
        self.elapsed = Duration::ZERO;
    }

    /// Jump to a thumbnail/dot and resume playing. Out-of-range indexes are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.len() {
            return false;
        }
        self.index = index;
        self.elapsed = Duration::ZERO;
        self.state = PlayState::Playing;
        true
    }

    /// Flip between playing and paused.
    pub fn toggle(&mut self) {
        self.state = match self.state {
            PlayState::Playing => PlayState::Paused,
            PlayState::Paused => PlayState::Playing,
        };
    }

    pub fn pause(&mut self) {
        self.state = PlayState::Paused;
    }

    pub fn resume(&mut self) {
        self.state = PlayState::Playing;
    }

    /// Hovering the carousel region holds the current slide.
    pub fn pointer_enter(&mut self) {
        self.pause();
    }

    pub fn pointer_leave(&mut self) {
        self.resume();
    }

    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Left => self.prev(),
            Key::Right => self.next(),
            Key::Space => self.toggle(),
        }
    }
}
