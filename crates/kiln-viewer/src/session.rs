//! One iteration of the viewer loop, independent of the window and GPU.

use kiln_demo::VideoDemo;
use kiln_engine::input::InputEvent;
use kiln_layout::{Dimensions, LayoutContext, RenderCommand, Vector2};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Pointer position and left-button state sampled for one frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PointerSample {
    pub position: Vector2,
    pub down: bool,
}

/// Where a frame's render commands end up.
pub trait FrameTarget {
    /// Clears, draws `commands` and presents. Returns `Stopped` when the
    /// target can no longer draw.
    fn draw_frame(&mut self, commands: &[RenderCommand]) -> LoopState;
}

pub struct Session {
    layout: LayoutContext,
    demo: VideoDemo,
    scroll_factor: f32,
    state: LoopState,
}

impl Session {
    pub fn new(layout: LayoutContext, demo: VideoDemo, scroll_factor: f32) -> Self {
        Self { layout, demo, scroll_factor, state: LoopState::Running }
    }

    #[cfg(test)]
    pub fn layout(&self) -> &LayoutContext {
        &self.layout
    }

    #[cfg(test)]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Feeds this frame's events to the layout engine, lays out the demo
    /// and hands the commands to `target`.
    ///
    /// A close request stops the loop before anything is drawn; once
    /// stopped, later calls do nothing.
    pub fn step(
        &mut self,
        events: &[InputEvent],
        pointer: PointerSample,
        target: &mut impl FrameTarget,
    ) -> LoopState {
        if self.state == LoopState::Stopped {
            return LoopState::Stopped;
        }

        for event in events {
            match event {
                InputEvent::CloseRequested => {
                    log::info!("close requested");
                    self.state = LoopState::Stopped;
                    return self.state;
                }
                InputEvent::Resized { width, height } => {
                    self.layout.set_layout_dimensions(Dimensions::new(*width, *height));
                }
                InputEvent::MouseWheel(delta) => {
                    let (x, y) = delta.lines();
                    self.layout.update_scroll_containers(true, Vector2::new(x, y), self.scroll_factor);
                }
                _ => {}
            }
        }

        self.layout.set_pointer_state(pointer.position, pointer.down);

        let commands = self.demo.create_layout(&mut self.layout);
        self.state = target.draw_frame(commands);
        self.state
    }
}

#[cfg(test)]
mod tests {
    use kiln_engine::input::MouseWheelDelta;
    use kiln_layout::{Arena, ErrorHandler, ScrollInput, TextConfig, min_memory_size};

    use super::*;

    #[derive(Default)]
    struct Recorder {
        frames: usize,
        last_len: usize,
    }

    impl FrameTarget for Recorder {
        fn draw_frame(&mut self, commands: &[RenderCommand]) -> LoopState {
            self.frames += 1;
            self.last_len = commands.len();
            LoopState::Running
        }
    }

    struct Failing;

    impl FrameTarget for Failing {
        fn draw_frame(&mut self, _: &[RenderCommand]) -> LoopState {
            LoopState::Stopped
        }
    }

    fn session() -> Session {
        let arena = Arena::with_capacity(min_memory_size());
        let mut layout = LayoutContext::initialize(
            arena,
            Dimensions::new(640.0, 480.0),
            ErrorHandler::new(|_| {}),
        )
        .expect("layout init");
        layout.set_measure_text(|text: &str, config: &TextConfig| {
            Dimensions::new(text.len() as f32 * 8.0, f32::from(config.font_size) * 1.2)
        });
        Session::new(layout, VideoDemo::new(), 0.01)
    }

    // ── events ───────────────────────────────────────────────────────────

    #[test]
    fn resize_updates_layout_dimensions() {
        let mut s = session();
        let mut target = Recorder::default();
        let events = [InputEvent::Resized { width: 800.0, height: 600.0 }];

        assert_eq!(s.step(&events, PointerSample::default(), &mut target), LoopState::Running);
        assert_eq!(s.layout().layout_dimensions(), Dimensions::new(800.0, 600.0));
    }

    #[test]
    fn wheel_records_scroll_input_with_factor() {
        let mut s = session();
        let mut target = Recorder::default();
        let events = [InputEvent::MouseWheel(MouseWheelDelta::Line { x: 0.0, y: 3.0 })];

        s.step(&events, PointerSample::default(), &mut target);

        let input = s.layout().last_scroll_input().expect("scroll input recorded");
        assert_eq!(
            input,
            ScrollInput { delta: Vector2::new(0.0, 3.0), delta_time: 0.01, drag_enabled: true }
        );
        let scaled = input.scaled_delta();
        assert_eq!(scaled.x, 0.0);
        assert!((scaled.y - 0.03).abs() < 1e-6);
    }

    #[test]
    fn no_wheel_leaves_scroll_input_unset() {
        let mut s = session();
        s.step(&[], PointerSample::default(), &mut Recorder::default());
        assert!(s.layout().last_scroll_input().is_none());
    }

    // ── loop state ───────────────────────────────────────────────────────

    #[test]
    fn quit_stops_before_drawing() {
        let mut s = session();
        let mut target = Recorder::default();
        let events = [
            InputEvent::Resized { width: 800.0, height: 600.0 },
            InputEvent::CloseRequested,
            InputEvent::Resized { width: 100.0, height: 100.0 },
        ];

        assert_eq!(s.step(&events, PointerSample::default(), &mut target), LoopState::Stopped);
        assert_eq!(target.frames, 0);
        assert_eq!(s.layout().layout_dimensions(), Dimensions::new(800.0, 600.0));

        assert_eq!(s.step(&[], PointerSample::default(), &mut target), LoopState::Stopped);
        assert_eq!(target.frames, 0);
    }

    #[test]
    fn running_frame_draws_demo_commands() {
        let mut s = session();
        let mut target = Recorder::default();

        s.step(&[], PointerSample::default(), &mut target);
        assert_eq!(target.frames, 1);
        assert!(target.last_len > 0);
    }

    #[test]
    fn failing_target_stops_loop() {
        let mut s = session();
        assert_eq!(s.step(&[], PointerSample::default(), &mut Failing), LoopState::Stopped);
        assert_eq!(s.state(), LoopState::Stopped);
    }

    // ── pointer ──────────────────────────────────────────────────────────

    #[test]
    fn pointer_state_reflects_latest_sample() {
        let mut s = session();
        let mut target = Recorder::default();

        s.step(&[], PointerSample { position: Vector2::new(10.0, 10.0), down: true }, &mut target);
        s.step(&[], PointerSample { position: Vector2::new(42.0, 7.0), down: false }, &mut target);

        let pointer = s.layout().pointer_state();
        assert_eq!(pointer.position, Vector2::new(42.0, 7.0));
        assert!(!pointer.state.is_down());
    }
}
