// src/carousel/machine.rs

use crate::carousel::cursor::Cursor;
use crate::carousel::remote::PlayerRemote;
use crate::model::content::HeroItem;
use crate::model::device::DeviceClass;

/// Delay between an item becoming current and its trailer starting.
pub const TRAILER_DELAY_MS: u64 = 3500;

/// Horizontal displacement, as a fraction of viewport width, a drag must
/// exceed to move the cursor on release.
pub const DRAG_THRESHOLD_RATIO: f32 = 0.2;

pub const DEFAULT_AUTO_SLIDE_INTERVAL_MS: u64 = 5500;

/// Autoplay runs only in `Idle`; every other phase suspends it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Idle,
    Dragging { start_x: f32 },
    Paused,
    VideoPlaying,
}

/// Slide is the default; Fade is enabled only for the render following a
/// manual thumbnail jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStyle {
    Slide,
    Fade,
}

/// Timer and player work the host must perform after an event.
///
/// Every `ScheduleTrailer` is paired with either a matching
/// `trailer_timer_fired` call or a `CancelTrailer` with the same generation,
/// so a timer armed for an item that is no longer current can never start
/// its trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselEffect {
    ScheduleTrailer { generation: u64, delay_ms: u64 },
    CancelTrailer { generation: u64 },
    StartTrailer { video_id: String },
    StopTrailer,
}

/// Hero carousel: cyclic featured items with autoplay, drag override,
/// delayed trailer playback and visibility-aware suspension.
pub struct HeroCarousel<R: PlayerRemote> {
    items: Vec<HeroItem>,
    cursor: Cursor,
    phase: Phase,
    transition: TransitionStyle,
    remote: R,
    device: DeviceClass,
    viewport_width: f32,
    auto_slide_interval_ms: u64,
    muted: bool,
    suspended_by_visibility: bool,
    generation: u64,
    pending_trailer: Option<u64>,
}

impl<R: PlayerRemote> HeroCarousel<R> {
    pub fn new(
        items: Vec<HeroItem>,
        device: DeviceClass,
        viewport_width: f32,
        auto_slide_interval_ms: u64,
        remote: R,
    ) -> Self {
        let cursor = Cursor::new(items.len());
        Self {
            items,
            cursor,
            phase: Phase::Idle,
            transition: TransitionStyle::Slide,
            remote,
            device,
            viewport_width,
            auto_slide_interval_ms,
            muted: true,
            suspended_by_visibility: false,
            generation: 0,
            pending_trailer: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn transition(&self) -> TransitionStyle {
        self.transition
    }

    pub fn displayed_index(&self) -> usize {
        self.cursor.displayed()
    }

    pub fn current_item(&self) -> Option<&HeroItem> {
        self.items.get(self.cursor.displayed())
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn auto_slide_interval_ms(&self) -> u64 {
        self.auto_slide_interval_ms
    }

    /// Called once when the carousel enters the page; arms the trailer
    /// timer for the initial item.
    pub fn mount(&mut self) -> Vec<CarouselEffect> {
        let mut effects = Vec::new();
        self.schedule_trailer(&mut effects);
        effects
    }

    /// Autoplay interval fired. Advances by one, but only while idle.
    pub fn autoplay_tick(&mut self) -> Vec<CarouselEffect> {
        if self.phase != Phase::Idle || self.items.len() <= 1 {
            return Vec::new();
        }
        let mut effects = Vec::new();
        self.cursor.advance(1);
        self.transition = TransitionStyle::Slide;
        self.schedule_trailer(&mut effects);
        effects
    }

    /// The delayed trailer timer fired. A generation that is no longer
    /// pending belongs to an item that has since moved on and is ignored.
    pub fn trailer_timer_fired(&mut self, generation: u64) -> Vec<CarouselEffect> {
        if self.pending_trailer != Some(generation) {
            return Vec::new();
        }
        self.pending_trailer = None;
        if self.phase != Phase::Idle {
            return Vec::new();
        }
        // Unresolvable trailer reference: keep showing the poster.
        let Some(video_id) = self.current_item().and_then(HeroItem::playable_trailer_id)
        else {
            return Vec::new();
        };
        self.phase = Phase::VideoPlaying;
        if self.muted {
            self.remote.mute();
        } else {
            self.remote.unmute();
        }
        vec![CarouselEffect::StartTrailer { video_id }]
    }

    /// Pointer or touch down anywhere on the hero. Only meaningful with
    /// more than one item.
    pub fn pointer_down(&mut self, x: f32) -> Vec<CarouselEffect> {
        if self.items.len() <= 1 {
            return Vec::new();
        }
        let mut effects = Vec::new();
        self.cancel_pending(&mut effects);
        if self.phase == Phase::VideoPlaying {
            effects.push(CarouselEffect::StopTrailer);
        }
        self.phase = Phase::Dragging { start_x: x };
        effects
    }

    /// Pointer or touch release. Moves ±1 when the horizontal displacement
    /// exceeds the drag threshold, otherwise leaves the cursor alone.
    pub fn pointer_up(&mut self, x: f32) -> Vec<CarouselEffect> {
        let Phase::Dragging { start_x } = self.phase else {
            return Vec::new();
        };
        let dx = x - start_x;
        let threshold = self.viewport_width * DRAG_THRESHOLD_RATIO;
        if dx.abs() > threshold {
            // Swiping left pulls the next item in.
            self.cursor.advance(if dx < 0.0 { 1 } else { -1 });
        }
        self.phase = Phase::Idle;
        self.transition = TransitionStyle::Slide;
        let mut effects = Vec::new();
        self.schedule_trailer(&mut effects);
        effects
    }

    /// Hover pause is a desktop affordance only.
    pub fn hover_enter(&mut self) {
        if self.device == DeviceClass::Desktop && self.phase == Phase::Idle {
            self.phase = Phase::Paused;
        }
    }

    pub fn hover_exit(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Idle;
        }
    }

    /// Manual thumbnail/dot click: one multi-step jump along the shortest
    /// rotational path, rendered with a fade instead of the default slide.
    pub fn jump_to(&mut self, target: usize) -> Vec<CarouselEffect> {
        if target >= self.items.len() || target == self.cursor.displayed() {
            return Vec::new();
        }
        let mut effects = Vec::new();
        self.cancel_pending(&mut effects);
        if self.phase == Phase::VideoPlaying {
            effects.push(CarouselEffect::StopTrailer);
        }
        self.phase = Phase::Idle;
        self.cursor.shortest_jump(target);
        self.transition = TransitionStyle::Fade;
        self.schedule_trailer(&mut effects);
        effects
    }

    /// Intersection-observer callback. Pauses a playing trailer when the
    /// carousel leaves the viewport and resumes it when back, but only if
    /// one was already playing. The embed stays mounted throughout.
    pub fn visibility_changed(&mut self, visible: bool) {
        if !visible {
            if self.phase == Phase::VideoPlaying && !self.suspended_by_visibility {
                self.remote.pause();
                self.suspended_by_visibility = true;
            }
        } else if self.suspended_by_visibility {
            if self.phase == Phase::VideoPlaying {
                self.remote.play();
            }
            self.suspended_by_visibility = false;
        }
    }

    /// Mute is independent of play/pause and takes effect immediately,
    /// without reloading the embed.
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        if self.muted {
            self.remote.mute();
        } else {
            self.remote.unmute();
        }
    }

    /// The embedded player reported the trailer finished: back to the poster.
    pub fn trailer_ended(&mut self) -> Vec<CarouselEffect> {
        if self.phase != Phase::VideoPlaying {
            return Vec::new();
        }
        self.phase = Phase::Idle;
        self.suspended_by_visibility = false;
        vec![CarouselEffect::StopTrailer]
    }

    /// Component teardown: every armed timer is cancelled and any playing
    /// trailer is stopped.
    pub fn teardown(&mut self) -> Vec<CarouselEffect> {
        let mut effects = Vec::new();
        self.cancel_pending(&mut effects);
        if self.phase == Phase::VideoPlaying {
            effects.push(CarouselEffect::StopTrailer);
        }
        self.phase = Phase::Idle;
        effects
    }

    /// Arms the 3.5 s trailer timer for the current item, cancelling any
    /// previously armed one first.
    fn schedule_trailer(&mut self, effects: &mut Vec<CarouselEffect>) {
        self.cancel_pending(effects);
        if self
            .current_item()
            .and_then(HeroItem::playable_trailer_id)
            .is_none()
        {
            return;
        }
        self.generation += 1;
        self.pending_trailer = Some(self.generation);
        effects.push(CarouselEffect::ScheduleTrailer {
            generation: self.generation,
            delay_ms: TRAILER_DELAY_MS,
        });
    }

    fn cancel_pending(&mut self, effects: &mut Vec<CarouselEffect>) {
        if let Some(generation) = self.pending_trailer.take() {
            effects.push(CarouselEffect::CancelTrailer { generation });
        }
    }
}
