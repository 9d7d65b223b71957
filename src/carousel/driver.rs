//! Timer ownership for the carousel.
//!
//! At most one timer task is alive. Every transition bumps a generation
//! counter, aborts the running task and, when playing, spawns a fresh one.
//! A task only ticks while its generation is current, so a task that is
//! already mid-wakeup when it gets aborted cannot advance the slide.

use super::slides::Slide;
use super::state::{Carousel, CarouselView, Key, Timing};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, trace};

struct Shared {
    carousel: Carousel,
    generation: u64,
}

pub struct CarouselDriver {
    shared: Arc<Mutex<Shared>>,
    view_tx: Arc<watch::Sender<CarouselView>>,
    timer: Option<JoinHandle<()>>,
}

impl CarouselDriver {
    /// Mount the carousel and start playing. Must be called inside a tokio runtime.
    pub fn start(slides: Vec<Slide>, timing: Timing) -> Self {
        let carousel = Carousel::new(slides, timing);
        let (view_tx, _) = watch::channel(carousel.view());

        let mut driver = Self {
            shared: Arc::new(Mutex::new(Shared {
                carousel,
                generation: 0,
            })),
            view_tx: Arc::new(view_tx),
            timer: None,
        };
        driver.restart_timer();
        driver
    }

    /// Observe index/progress/play state.
    pub fn subscribe(&self) -> watch::Receiver<CarouselView> {
        self.view_tx.subscribe()
    }

    pub fn view(&self) -> CarouselView {
        lock(&self.shared).carousel.view()
    }

    /// Whether a timer task is currently alive.
    pub fn has_active_timer(&self) -> bool {
        self.timer.as_ref().map(|t| !t.is_finished()).unwrap_or(false)
    }

    pub fn next(&mut self) {
        self.transition(Carousel::next);
    }

    pub fn prev(&mut self) {
        self.transition(Carousel::prev);
    }

    pub fn select(&mut self, index: usize) {
        self.transition(|c| {
            c.select(index);
        });
    }

    pub fn toggle(&mut self) {
        self.transition(Carousel::toggle);
    }

    pub fn pointer_enter(&mut self) {
        self.transition(Carousel::pointer_enter);
    }

    pub fn pointer_leave(&mut self) {
        self.transition(Carousel::pointer_leave);
    }

    pub fn handle_key(&mut self, key: Key) {
        self.transition(|c| c.handle_key(key));
    }

    fn transition(&mut self, apply: impl FnOnce(&mut Carousel)) {
        {
            let mut shared = lock(&self.shared);
            apply(&mut shared.carousel);
            self.view_tx.send_replace(shared.carousel.view());
        }
        self.restart_timer();
    }

    fn restart_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }

        let (generation, playing, tick) = {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            (
                shared.generation,
                shared.carousel.is_playing(),
                shared.carousel.timing().tick,
            )
        };

        if !playing {
            debug!("Carousel paused, timer stopped (generation {})", generation);
            return;
        }

        let shared = Arc::clone(&self.shared);
        let view_tx = Arc::clone(&self.view_tx);
        self.timer = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + tick, tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                let mut guard = lock(&shared);
                if guard.generation != generation {
                    trace!("Stale carousel timer (generation {}) exiting", generation);
                    return;
                }
                if guard.carousel.tick() {
                    trace!("Carousel advanced to slide {}", guard.carousel.index());
                }
                view_tx.send_replace(guard.carousel.view());
            }
        }));
    }
}

impl Drop for CarouselDriver {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(|e| e.into_inner())
}
