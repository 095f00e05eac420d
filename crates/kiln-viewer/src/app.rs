use std::backtrace::Backtrace;
use std::rc::Rc;

use anyhow::Context;
use kiln_demo::{FONT_ID_BODY_16, VideoDemo};
use kiln_engine::core::{App, AppControl, FrameCtx, StartCtx};
use kiln_engine::input::{InputFrame, InputState, MouseButton};
use kiln_engine::paint::Color;
use kiln_engine::render::SceneRenderer;
use kiln_engine::text::FontSystem;
use kiln_layout::{
    Arena, Dimensions, ErrorHandler, LayoutContext, LayoutError, RenderCommand, Vector2,
    min_memory_size,
};

use crate::bridge::{FontMeasure, RenderBridge};
use crate::config::ViewerConfig;
use crate::session::{FrameTarget, LoopState, PointerSample, Session};

const BODY_FONT: &[u8] = include_bytes!("../../../assets/DejaVuSans.ttf");

fn report_layout_error(err: &LayoutError) {
    log::error!("layout error: {err}\n{}", Backtrace::force_capture());
}

/// Everything created once the window and GPU exist.
// Fields drop top to bottom, the reverse of acquisition.
struct Loaded {
    renderer: SceneRenderer,
    bridge: RenderBridge,
    session: Session,
    fonts: Rc<FontSystem>,
}

pub struct ViewerApp {
    config: ViewerConfig,
    loaded: Option<Loaded>,
}

impl ViewerApp {
    pub fn new(config: ViewerConfig) -> Self {
        Self { config, loaded: None }
    }
}

impl App for ViewerApp {
    fn on_start(&mut self, ctx: &mut StartCtx<'_, '_>) -> anyhow::Result<()> {
        let mut fonts = FontSystem::new();
        let body = fonts.load_font(BODY_FONT).context("failed to load the body font")?;
        let slots = vec![body];
        log::info!(
            "body font registered as id {FONT_ID_BODY_16} at {}px, line height {:.1}",
            self.config.font_size,
            fonts.line_height(body, f32::from(self.config.font_size)),
        );
        let fonts = Rc::new(fonts);

        let arena_bytes = min_memory_size();
        let arena = Arena::with_capacity(arena_bytes);
        log::debug!("layout arena: {arena_bytes} bytes");

        let (width, height) = ctx.window.logical_size();
        let mut layout = LayoutContext::initialize(
            arena,
            Dimensions::new(width, height),
            ErrorHandler::new(report_layout_error),
        )
        .context("failed to initialize the layout engine")?;
        layout.set_measure_text(FontMeasure::new(fonts.clone(), slots.clone()));

        self.loaded = Some(Loaded {
            session: Session::new(layout, VideoDemo::new(), self.config.scroll_factor),
            bridge: RenderBridge::new(slots),
            fonts,
            renderer: SceneRenderer::new(),
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(loaded) = self.loaded.as_mut() else {
            return AppControl::Exit;
        };

        let input: &InputState = ctx.input;
        let input_frame: &InputFrame = ctx.input_frame;
        let (x, y) = input.last_pointer_pos();
        let pointer = PointerSample {
            position: Vector2::new(x, y),
            down: input.button_down(MouseButton::Left),
        };

        let mut target = WindowTarget {
            ctx,
            bridge: &mut loaded.bridge,
            renderer: &mut loaded.renderer,
            fonts: &loaded.fonts,
            clear: self.config.clear_color,
        };

        match loaded.session.step(&input_frame.events, pointer, &mut target) {
            LoopState::Running => AppControl::Continue,
            LoopState::Stopped => AppControl::Exit,
        }
    }
}

/// Draws into the window's current surface texture.
struct WindowTarget<'f, 'a, 'w> {
    ctx: &'f mut FrameCtx<'a, 'w>,
    bridge: &'f mut RenderBridge,
    renderer: &'f mut SceneRenderer,
    fonts: &'f FontSystem,
    clear: Color,
}

impl FrameTarget for WindowTarget<'_, '_, '_> {
    fn draw_frame(&mut self, commands: &[RenderCommand]) -> LoopState {
        self.bridge.translate(commands);

        let draw_list = self.bridge.draw_list_mut();
        let renderer = &mut *self.renderer;
        let fonts = self.fonts;
        let control = self.ctx.render(self.clear, |rctx, target| {
            renderer.render(rctx, target, draw_list, fonts);
        });

        match control {
            AppControl::Continue => LoopState::Running,
            AppControl::Exit => LoopState::Stopped,
        }
    }
}
