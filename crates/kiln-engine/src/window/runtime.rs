use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::error::EventLoopError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, StartCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "kiln".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
            resizable: true,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until it returns
    /// [`AppControl::Exit`] or startup fails.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        Self::run_on(EventLoop::new(), config, gpu_init, app)
    }

    /// Like [`run`](Self::run) with an already attempted event loop creation.
    /// A failed video subsystem is reported before any window exists.
    pub fn run_on<A>(
        event_loop: Result<EventLoop<()>, EventLoopError>,
        config: RuntimeConfig,
        gpu_init: GpuInit,
        app: A,
    ) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = event_loop.context("failed to initialize the video subsystem")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("event loop terminated with error")?;

        match state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    // Declared ahead of `entry` so the app drops first.
    app: Option<A>,

    entry: Option<WindowEntry>,
    started: bool,
    error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self { config, gpu_init, app: Some(app), entry: None, started: false, error: None }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error = Some(err);
        self.shutdown();
        event_loop.exit();
    }

    /// Drops the app before the window and GPU its resources were created on.
    fn shutdown(&mut self) {
        self.app = None;
        self.entry = None;
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let window = event_loop.create_window(attrs).context("failed to create window")?;
        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            window,
            gpu_builder: |w: &Window| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        let app = self.app.as_mut().context("application already shut down")?;
        entry.with(|fields| {
            let mut ctx = StartCtx { window: WindowCtx { window: fields.window }, gpu: fields.gpu };
            app.on_start(&mut ctx)
        })?;

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
        self.started = true;
        log::info!("window \"{}\" started", self.config.title);
        Ok(())
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started || self.error.is_some() {
            return;
        }
        if let Err(err) = self.start(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
        // Continuous redraw; the app has no invalidation model.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let (Some(app), Some(entry)) = (self.app.as_mut(), self.entry.as_mut()) else {
            return;
        };
        if entry.borrow_window().id() != window_id {
            return;
        }

        entry.with_mut(|fields| {
            let scale = fields.window.scale_factor();
            if let Some(ev) = translate_window_event(&event, scale, fields.input_state) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
        });

        match event {
            WindowEvent::Resized(size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = entry.borrow_window().inner_size();
                entry.with_gpu_mut(|gpu| gpu.resize(size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                let control = entry.with_mut(|fields| {
                    let control = {
                        let mut ctx = FrameCtx {
                            window: WindowCtx { window: fields.window },
                            gpu: fields.gpu,
                            input: fields.input_state,
                            input_frame: fields.input_frame,
                        };
                        app.on_frame(&mut ctx)
                    };
                    fields.input_frame.clear();
                    control
                });

                if control == AppControl::Exit {
                    log::info!("exit requested");
                    self.shutdown();
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    struct Stub {
        started: Rc<Cell<bool>>,
    }

    impl App for Stub {
        fn on_start(&mut self, _: &mut StartCtx<'_, '_>) -> Result<()> {
            self.started.set(true);
            Ok(())
        }

        fn on_frame(&mut self, _: &mut FrameCtx<'_, '_>) -> AppControl {
            AppControl::Exit
        }
    }

    #[test]
    fn unavailable_video_fails_before_start() {
        let started = Rc::new(Cell::new(false));
        let app = Stub { started: started.clone() };

        let result = Runtime::run_on(
            Err(EventLoopError::RecreationAttempt),
            RuntimeConfig::default(),
            GpuInit::default(),
            app,
        );

        let err = result.expect_err("startup must fail");
        assert!(format!("{err:#}").contains("video subsystem"));
        assert!(!started.get());
    }

    struct DropFlag(Rc<Cell<bool>>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }

    struct Owning {
        _resources: DropFlag,
    }

    impl App for Owning {
        fn on_start(&mut self, _: &mut StartCtx<'_, '_>) -> Result<()> {
            Ok(())
        }

        fn on_frame(&mut self, _: &mut FrameCtx<'_, '_>) -> AppControl {
            AppControl::Exit
        }
    }

    #[test]
    fn shutdown_releases_app_resources_immediately() {
        let dropped = Rc::new(Cell::new(false));
        let app = Owning { _resources: DropFlag(dropped.clone()) };
        let mut state = AppState::new(RuntimeConfig::default(), GpuInit::default(), app);
        assert!(!dropped.get());

        state.shutdown();

        assert!(dropped.get());
        assert!(state.app.is_none());
        assert!(state.entry.is_none());
    }

    #[test]
    fn default_window_is_640_by_480_resizable() {
        let config = RuntimeConfig::default();
        assert_eq!(config.initial_size, LogicalSize::new(640.0, 480.0));
        assert!(config.resizable);
    }
}
