//! Button mapping.
//!
//! Play toggles playback, Next / Previous raise one-shot requests for the
//! decode task, VolumeUp / VolumeDown step the volume and tell the speaker.
//! A long press on Play asks for a rescan of the music directory. Rotary
//! detents act as repeated volume steps.

use bluetooth::{Event, EventQueue};
use platform::{Button, InputDevice, InputEvent, PlaybackControls, Volume};

/// Detents acted on per encoder event; one full sweep of the range.
const MAX_ROTARY_STEPS: u32 = 127;

/// Applies input events to the shared controls.
pub struct InputHandler<'a> {
    controls: &'a PlaybackControls,
    events: &'a EventQueue,
    volume_step: u8,
}

impl<'a> InputHandler<'a> {
    /// Create a handler stepping the volume by `volume_step`.
    pub const fn new(
        controls: &'a PlaybackControls,
        events: &'a EventQueue,
        volume_step: u8,
    ) -> Self {
        Self {
            controls,
            events,
            volume_step,
        }
    }

    /// Read `input` forever.
    pub async fn run<I: InputDevice>(&self, input: &mut I) {
        loop {
            let event = input.wait_for_event().await;
            self.handle(event).await;
        }
    }

    /// Apply one event.
    pub async fn handle(&self, event: InputEvent) {
        match event {
            InputEvent::ButtonPress(button) => {
                debug!("Button: {}", button.label());
                self.press(button).await;
            }
            InputEvent::ButtonLongPress(Button::Play) => {
                info!("Rescan requested");
                self.controls.request_rescan();
            }
            InputEvent::RotaryIncrement(delta) => {
                let up = delta > 0;
                for _ in 0..delta.unsigned_abs().min(MAX_ROTARY_STEPS) {
                    if !self.step_volume(up).await {
                        break;
                    }
                }
            }
            InputEvent::ButtonRelease(_) | InputEvent::ButtonLongPress(_) => {}
        }
    }

    async fn press(&self, button: Button) {
        match button {
            Button::Play => {
                let playing = self.controls.toggle_playing();
                info!("{}", if playing { "Playing" } else { "Paused" });
            }
            Button::Next => self.controls.request_next(),
            Button::Previous => self.controls.request_prev(),
            Button::VolumeUp => {
                self.step_volume(true).await;
            }
            Button::VolumeDown => {
                self.step_volume(false).await;
            }
        }
    }

    /// Step the volume once; `false` when already at the bound.
    async fn step_volume(&self, up: bool) -> bool {
        let old = self.controls.volume();
        let new = if up {
            old.step_up(self.volume_step)
        } else {
            old.step_down(self.volume_step)
        };
        if new == old {
            return false;
        }
        self.controls.set_volume(new);
        info!("Volume: {}", new.get());
        self.events.post(Event::LocalVolumeChanged(new)).await;
        true
    }
}

/// Current volume as a percentage of the AVRCP range, for display.
pub fn volume_percent(volume: Volume) -> u8 {
    let pct = u16::from(volume.get())
        .saturating_mul(100)
        .checked_div(u16::from(Volume::MAX.get()))
        .unwrap_or(0);
    u8::try_from(pct).unwrap_or(100)
}
