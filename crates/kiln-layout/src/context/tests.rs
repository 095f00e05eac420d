use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::config::{
    AlignX, AlignY, AttachPoint, BorderWidth, ChildAlignment, ClipConfig, FloatingConfig,
    LayoutDirection, Padding, PointerCapture, TextAlignment,
};
use crate::geometry::{Color, Vector2};
use crate::pointer::PointerInteraction;
use crate::render::RenderKind;

const RED: Color = Color::rgb(255.0, 0.0, 0.0);

/// 10 px per byte, 20 px tall.
fn mono(text: &str, _: &TextConfig) -> Dimensions {
    Dimensions::new(text.len() as f32 * 10.0, 20.0)
}

fn recorder() -> (ErrorHandler, Rc<RefCell<Vec<ErrorKind>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    (ErrorHandler::new(move |e| sink.borrow_mut().push(e.kind)), seen)
}

fn context_with(width: f32, height: f32, max: usize, handler: ErrorHandler) -> LayoutContext {
    let arena = Arena::with_capacity(min_memory_size_for(max));
    let mut ctx = LayoutContext::initialize_with(arena, Dimensions::new(width, height), handler, max)
        .expect("arena sized for capacity");
    ctx.set_measure_text(mono);
    ctx
}

fn context(width: f32, height: f32) -> LayoutContext {
    context_with(width, height, 256, ErrorHandler::default())
}

fn fixed(w: f32, h: f32) -> LayoutConfig {
    LayoutConfig::new().sizing(Sizing::new(SizingAxis::fixed(w), SizingAxis::fixed(h)))
}

fn boxed(label: &str, layout: LayoutConfig) -> ElementDeclaration {
    ElementDeclaration::new().id(ElementId::new(label)).layout(layout).background(RED)
}

fn bounds(ctx: &LayoutContext, label: &str) -> BoundingBox {
    ctx.element_bounds(ElementId::new(label)).expect("element laid out")
}

fn texts(commands: &[RenderCommand]) -> Vec<&str> {
    commands.iter().filter_map(RenderCommand::text).collect()
}

// ── lifecycle ─────────────────────────────────────────────────────────────

#[test]
fn root_tracks_layout_dimensions() {
    let mut ctx = context(640.0, 480.0);
    ctx.begin_layout();
    ctx.end_layout();
    assert_eq!(bounds(&ctx, ROOT_LABEL), BoundingBox::new(0.0, 0.0, 640.0, 480.0));

    ctx.set_layout_dimensions(Dimensions::new(800.0, 600.0));
    assert_eq!(ctx.layout_dimensions(), Dimensions::new(800.0, 600.0));
    ctx.begin_layout();
    ctx.end_layout();
    assert_eq!(bounds(&ctx, ROOT_LABEL), BoundingBox::new(0.0, 0.0, 800.0, 600.0));
}

#[test]
fn undersized_arena_is_rejected_and_reported() {
    let (handler, seen) = recorder();
    let result = LayoutContext::initialize_with(
        Arena::with_capacity(16),
        Dimensions::new(10.0, 10.0),
        handler,
        64,
    );
    let err = result.err().expect("initialization must fail");
    assert_eq!(err.kind, ErrorKind::ArenaCapacityExceeded);
    assert_eq!(*seen.borrow(), vec![ErrorKind::ArenaCapacityExceeded]);
}

#[test]
fn previous_frame_elements_are_forgotten() {
    let mut ctx = context(200.0, 200.0);
    ctx.begin_layout();
    ctx.element(boxed("Gone", fixed(10.0, 10.0)), |_| {});
    ctx.end_layout();
    assert!(ctx.element_bounds(ElementId::new("Gone")).is_some());

    ctx.begin_layout();
    ctx.end_layout();
    assert!(ctx.element_bounds(ElementId::new("Gone")).is_none());
}

// ── sizing ────────────────────────────────────────────────────────────────

#[test]
fn grow_fills_remaining_space_in_row() {
    let mut ctx = context(400.0, 300.0);
    ctx.begin_layout();
    ctx.element(
        boxed(
            "Row",
            LayoutConfig::new()
                .sizing(Sizing::new(SizingAxis::grow(), SizingAxis::fixed(50.0)))
                .child_gap(10),
        ),
        |ctx| {
            ctx.element(boxed("A", fixed(100.0, 20.0)), |_| {});
            ctx.element(
                boxed("B", LayoutConfig::new().width(SizingAxis::grow()).height(SizingAxis::fixed(20.0))),
                |_| {},
            );
        },
    );
    ctx.end_layout();

    assert_eq!(bounds(&ctx, "Row"), BoundingBox::new(0.0, 0.0, 400.0, 50.0));
    assert_eq!(bounds(&ctx, "A"), BoundingBox::new(0.0, 0.0, 100.0, 20.0));
    assert_eq!(bounds(&ctx, "B"), BoundingBox::new(110.0, 0.0, 290.0, 20.0));
}

#[test]
fn grow_children_split_space_evenly() {
    let mut ctx = context(300.0, 100.0);
    ctx.begin_layout();
    for label in ["L", "R"] {
        ctx.element(boxed(label, LayoutConfig::new().sizing(Sizing::grow())), |_| {});
    }
    ctx.end_layout();
    assert_eq!(bounds(&ctx, "L").width, 150.0);
    assert_eq!(bounds(&ctx, "R").width, 150.0);
    assert_eq!(bounds(&ctx, "R").x, 150.0);
    assert_eq!(bounds(&ctx, "R").height, 100.0);
}

#[test]
fn fit_wraps_children_with_padding_and_gap() {
    let mut ctx = context(500.0, 500.0);
    ctx.begin_layout();
    ctx.element(
        boxed(
            "Column",
            LayoutConfig::new()
                .direction(LayoutDirection::TopToBottom)
                .padding(Padding::all(8))
                .child_gap(4),
        ),
        |ctx| {
            ctx.element(boxed("One", fixed(50.0, 10.0)), |_| {});
            ctx.element(boxed("Two", fixed(70.0, 10.0)), |_| {});
        },
    );
    ctx.end_layout();
    assert_eq!(bounds(&ctx, "Column"), BoundingBox::new(0.0, 0.0, 86.0, 40.0));
    assert_eq!(bounds(&ctx, "Two"), BoundingBox::new(8.0, 22.0, 70.0, 10.0));
}

#[test]
fn percent_is_fraction_of_parent() {
    let mut ctx = context(400.0, 200.0);
    ctx.begin_layout();
    ctx.element(
        boxed("Half", LayoutConfig::new().width(SizingAxis::percent(0.5)).height(SizingAxis::fixed(10.0))),
        |_| {},
    );
    ctx.end_layout();
    assert_eq!(bounds(&ctx, "Half").width, 200.0);
}

#[test]
fn centered_child_alignment() {
    let mut ctx = context(500.0, 500.0);
    ctx.begin_layout();
    ctx.element(
        boxed(
            "Frame",
            fixed(300.0, 150.0).child_alignment(ChildAlignment::new(AlignX::Center, AlignY::Center)),
        ),
        |ctx| ctx.element(boxed("Inner", fixed(100.0, 50.0)), |_| {}),
    );
    ctx.end_layout();
    assert_eq!(bounds(&ctx, "Inner"), BoundingBox::new(100.0, 50.0, 100.0, 50.0));
}

#[test]
fn grow_skips_sibling_pinned_at_its_max() {
    let mut ctx = context(400.0, 300.0);
    ctx.begin_layout();
    ctx.element(
        boxed("Row", LayoutConfig::new().sizing(Sizing::new(SizingAxis::fixed(300.0), SizingAxis::fixed(50.0)))),
        |ctx| {
            ctx.element(boxed("Capped", LayoutConfig::new().width(SizingAxis::grow_between(0.0, 0.0))), |_| {});
            ctx.element(boxed("Open", LayoutConfig::new().width(SizingAxis::grow())), |ctx| {
                ctx.element(boxed("Content", fixed(50.0, 10.0)), |_| {});
            });
        },
    );
    ctx.end_layout();
    assert_eq!(bounds(&ctx, "Capped").width, 0.0);
    assert_eq!(bounds(&ctx, "Open").width, 300.0);
}

fn text_box(ctx: &mut LayoutContext, label: &str, text: &str) {
    ctx.element(boxed(label, LayoutConfig::new()), |ctx| ctx.text(text, TextConfig::default()));
}

#[test]
fn overflow_shrinks_largest_child_first() {
    let mut ctx = context(400.0, 300.0);
    ctx.begin_layout();
    ctx.element(boxed("Row", fixed(200.0, 100.0)), |ctx| {
        // 210 px wide, 100 px minimum
        text_box(ctx, "Long", "aaaaaaaaaa aaaaaaaaaa");
        // 90 px wide, 40 px minimum
        text_box(ctx, "Short", "bbbb bbbb");
    });
    ctx.end_layout();
    assert!((bounds(&ctx, "Long").width - 110.0).abs() < 0.1);
    assert_eq!(bounds(&ctx, "Short").width, 90.0);
}

#[test]
fn shrink_never_goes_below_minimum() {
    let mut ctx = context(400.0, 300.0);
    ctx.begin_layout();
    ctx.element(boxed("Row", fixed(120.0, 100.0)), |ctx| {
        text_box(ctx, "Long", "aaaaaaaaaa aaaaaaaaaa");
        text_box(ctx, "Short", "bbbb bbbb");
    });
    ctx.end_layout();
    assert_eq!(bounds(&ctx, "Long").width, 100.0);
    assert_eq!(bounds(&ctx, "Short").width, 40.0);
}

#[test]
fn shrink_continues_past_child_pinned_at_its_minimum() {
    let mut ctx = context(400.0, 300.0);
    ctx.begin_layout();
    ctx.element(boxed("Row", fixed(150.0, 100.0)), |ctx| {
        ctx.element(boxed("Rigid", LayoutConfig::new()), |ctx| {
            ctx.element(boxed("Slab", fixed(200.0, 10.0)), |_| {});
        });
        text_box(ctx, "Soft", "bbbb bbbb");
    });
    ctx.end_layout();
    assert_eq!(bounds(&ctx, "Rigid").width, 200.0);
    assert_eq!(bounds(&ctx, "Soft").width, 40.0);
}

#[test]
fn clipping_axis_does_not_shrink_children() {
    let declare = |clip: Option<ClipConfig>| {
        let mut ctx = context(400.0, 300.0);
        ctx.begin_layout();
        let mut row = boxed("Row", fixed(100.0, 100.0));
        if let Some(clip) = clip {
            row = row.clip(clip);
        }
        ctx.element(row, |ctx| ctx.text("aaaaaaa aaaaaaa", TextConfig::default()));
        let commands = ctx.end_layout().to_vec();
        texts(&commands).into_iter().map(str::to_owned).collect::<Vec<_>>()
    };

    assert_eq!(declare(None), vec!["aaaaaaa", "aaaaaaa"]);
    assert_eq!(declare(Some(ClipConfig::horizontal(Vector2::zero()))), vec!["aaaaaaa aaaaaaa"]);
}

// ── text ──────────────────────────────────────────────────────────────────

#[test]
fn text_wraps_to_container_width() {
    let mut ctx = context(500.0, 500.0);
    ctx.begin_layout();
    ctx.element(
        boxed(
            "Box",
            LayoutConfig::new()
                .width(SizingAxis::fixed(65.0))
                .direction(LayoutDirection::TopToBottom),
        ),
        |ctx| ctx.text("aaa bbb ccc", TextConfig::default()),
    );
    let commands = ctx.end_layout().to_vec();

    assert_eq!(texts(&commands), vec!["aaa", "bbb", "ccc"]);
    assert_eq!(bounds(&ctx, "Box").height, 60.0);

    let ys: Vec<f32> = commands
        .iter()
        .filter(|c| c.text().is_some())
        .map(|c| c.bounding_box.y)
        .collect();
    assert_eq!(ys, vec![0.0, 20.0, 40.0]);
}

#[test]
fn unwrapped_text_stays_on_one_line() {
    let mut ctx = context(500.0, 500.0);
    ctx.begin_layout();
    ctx.element(boxed("Box", LayoutConfig::new()), |ctx| {
        ctx.text("hello world", TextConfig::default().font_size(24));
    });
    let commands = ctx.end_layout().to_vec();
    assert_eq!(texts(&commands), vec!["hello world"]);
    assert_eq!(bounds(&ctx, "Box"), BoundingBox::new(0.0, 0.0, 110.0, 20.0));

    assert!(matches!(
        commands.last().map(|c| &c.kind),
        Some(RenderKind::Text { font_size: 24, .. })
    ));
}

#[test]
fn text_without_measure_function_is_reported() {
    let (handler, seen) = recorder();
    let arena = Arena::with_capacity(min_memory_size_for(16));
    let mut ctx = LayoutContext::initialize_with(arena, Dimensions::new(100.0, 100.0), handler, 16)
        .expect("arena sized for capacity");
    ctx.begin_layout();
    ctx.text("a", TextConfig::default());
    ctx.text("b", TextConfig::default());
    ctx.end_layout();
    assert_eq!(*seen.borrow(), vec![ErrorKind::TextMeasurementNotProvided]);
}

fn line_boxes(commands: &[RenderCommand]) -> Vec<BoundingBox> {
    commands.iter().filter(|c| c.text().is_some()).map(|c| c.bounding_box).collect()
}

#[test]
fn aligned_text_lines_sit_within_the_text_box() {
    let lay_out = |alignment: TextAlignment| {
        let mut ctx = context(500.0, 500.0);
        ctx.begin_layout();
        ctx.element(
            boxed(
                "Box",
                LayoutConfig::new()
                    .width(SizingAxis::fixed(65.0))
                    .direction(LayoutDirection::TopToBottom),
            ),
            |ctx| ctx.text("aaa bbb ccc", TextConfig::default().alignment(alignment)),
        );
        line_boxes(ctx.end_layout())
    };

    let centered = lay_out(TextAlignment::Center);
    assert_eq!(centered.len(), 3);
    for line in &centered {
        assert!((line.x + line.width / 2.0 - 32.5).abs() < 1e-3);
    }

    let right = lay_out(TextAlignment::Right);
    for line in &right {
        assert!((line.x + line.width - 65.0).abs() < 1e-3);
    }
}

#[test]
fn newline_mode_breaks_only_on_newlines() {
    let mut ctx = context(500.0, 500.0);
    ctx.begin_layout();
    ctx.element(boxed("Narrow", LayoutConfig::new().width(SizingAxis::fixed(40.0))), |ctx| {
        ctx.text("aaa bbb", TextConfig::default().wrap(WrapMode::Newlines));
    });
    ctx.element(
        boxed("Tall", LayoutConfig::new().width(SizingAxis::fixed(200.0))),
        |ctx| ctx.text("ab\ncd", TextConfig::default().wrap(WrapMode::Newlines).line_height(30)),
    );
    let commands = ctx.end_layout().to_vec();

    assert_eq!(texts(&commands), vec!["aaa bbb", "ab", "cd"]);
    let ys: Vec<f32> = line_boxes(&commands).iter().map(|b| b.y).collect();
    // 20 px glyph line centred in a 30 px line box
    let tall_y = bounds(&ctx, "Tall").y;
    assert_eq!(&ys[1..], &[tall_y + 5.0, tall_y + 35.0]);
    assert_eq!(bounds(&ctx, "Tall").height, 60.0);
}

// ── emission ──────────────────────────────────────────────────────────────

#[test]
fn parents_paint_before_children() {
    let mut ctx = context(200.0, 200.0);
    ctx.begin_layout();
    ctx.element(boxed("Outer", fixed(100.0, 100.0)), |ctx| {
        ctx.element(boxed("Inner", fixed(10.0, 10.0)), |_| {});
    });
    let ids: Vec<ElementId> = ctx.end_layout().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![ElementId::new("Outer"), ElementId::new("Inner")]);
}

#[test]
fn clip_wraps_children_in_scissor_pair() {
    let mut ctx = context(200.0, 200.0);
    ctx.begin_layout();
    ctx.element(
        boxed("Clip", fixed(100.0, 100.0)).clip(ClipConfig::vertical(Vector2::zero())),
        |ctx| ctx.element(boxed("Child", fixed(10.0, 10.0)), |_| {}),
    );
    let kinds: Vec<RenderKind> = ctx.end_layout().iter().map(|c| c.kind.clone()).collect();
    assert!(matches!(kinds[0], RenderKind::Rectangle { .. }));
    assert!(matches!(kinds[1], RenderKind::ScissorStart { vertical: true, horizontal: false }));
    assert!(matches!(kinds[2], RenderKind::Rectangle { .. }));
    assert!(matches!(kinds[3], RenderKind::ScissorEnd));
}

#[test]
fn offscreen_elements_are_culled() {
    let mut ctx = context(400.0, 100.0);
    let declare = |ctx: &mut LayoutContext| {
        ctx.begin_layout();
        ctx.element(boxed("Wide", fixed(500.0, 10.0)), |_| {});
        ctx.element(boxed("Beyond", fixed(100.0, 10.0)), |_| {});
        ctx.end_layout().len()
    };
    assert_eq!(declare(&mut ctx), 1);
    ctx.set_culling(false);
    assert_eq!(declare(&mut ctx), 2);
}

#[test]
fn border_emits_after_children_with_separators() {
    let mut ctx = context(300.0, 100.0);
    ctx.begin_layout();
    ctx.element(
        ElementDeclaration::new()
            .id(ElementId::new("Bordered"))
            .layout(LayoutConfig::new().child_gap(4))
            .border(RED, BorderWidth::all(2)),
        |ctx| {
            ctx.element(boxed("P", fixed(50.0, 20.0)), |_| {});
            ctx.element(boxed("Q", fixed(50.0, 20.0)), |_| {});
        },
    );
    let commands = ctx.end_layout().to_vec();
    assert_eq!(commands.len(), 4);
    assert!(matches!(commands[2].kind, RenderKind::Border { .. }));
    assert_eq!(commands[3].bounding_box, BoundingBox::new(51.0, 0.0, 2.0, 20.0));
}

#[test]
fn floating_element_attaches_below_parent() {
    let mut ctx = context(400.0, 400.0);
    ctx.begin_layout();
    ctx.element(boxed("Anchor", fixed(100.0, 40.0)), |ctx| {
        ctx.element(
            boxed("Menu", fixed(200.0, 60.0)).floating(
                FloatingConfig::new()
                    .attach_points(AttachPoint::LeftTop, AttachPoint::LeftBottom)
                    .z_index(1),
            ),
            |_| {},
        );
    });
    ctx.element(boxed("Sibling", fixed(10.0, 10.0)), |_| {});
    let commands = ctx.end_layout().to_vec();

    assert_eq!(bounds(&ctx, "Menu"), BoundingBox::new(0.0, 40.0, 200.0, 60.0));
    // floating children take no space in the flow
    assert_eq!(bounds(&ctx, "Sibling").x, 100.0);
    assert_eq!(commands.last().map(|c| c.id), Some(ElementId::new("Menu")));
    assert_eq!(commands.last().map(|c| c.z_index), Some(1));
}

#[test]
fn floating_offset_is_applied() {
    let mut ctx = context(400.0, 400.0);
    ctx.begin_layout();
    ctx.element(boxed("Anchor", fixed(100.0, 40.0)), |ctx| {
        ctx.element(
            boxed("Tip", fixed(20.0, 20.0))
                .floating(FloatingConfig::new().offset(Vector2::new(5.0, 7.0))),
            |_| {},
        );
    });
    ctx.end_layout();
    assert_eq!(bounds(&ctx, "Tip"), BoundingBox::new(5.0, 7.0, 20.0, 20.0));
}

#[test]
fn floating_roots_paint_in_z_order() {
    let mut ctx = context(400.0, 400.0);
    ctx.begin_layout();
    ctx.element(boxed("Base", fixed(100.0, 100.0)), |ctx| {
        ctx.element(boxed("Above", fixed(10.0, 10.0)).floating(FloatingConfig::new().z_index(5)), |_| {});
        ctx.element(boxed("Below", fixed(10.0, 10.0)).floating(FloatingConfig::new().z_index(-1)), |_| {});
    });
    let commands = ctx.end_layout().to_vec();

    let order: Vec<(ElementId, i16)> = commands.iter().map(|c| (c.id, c.z_index)).collect();
    assert_eq!(
        order,
        vec![
            (ElementId::new("Below"), -1),
            (ElementId::new("Base"), 0),
            (ElementId::new("Above"), 5),
        ]
    );
}

// ── errors ────────────────────────────────────────────────────────────────

#[test]
fn duplicate_ids_are_reported() {
    let (handler, seen) = recorder();
    let mut ctx = context_with(100.0, 100.0, 64, handler);
    ctx.begin_layout();
    ctx.element(boxed("Same", fixed(1.0, 1.0)), |_| {});
    ctx.element(boxed("Same", fixed(1.0, 1.0)), |_| {});
    ctx.end_layout();
    assert_eq!(*seen.borrow(), vec![ErrorKind::DuplicateId]);
}

#[test]
fn element_capacity_overflow_reports_once_and_yields_nothing() {
    let (handler, seen) = recorder();
    let mut ctx = context_with(100.0, 100.0, 4, handler);
    ctx.begin_layout();
    for i in 0..10 {
        ctx.element(boxed("Item", fixed(1.0, 1.0)).id(ElementId::indexed("Item", i)), |ctx| {
            ctx.element(ElementDeclaration::new(), |_| {});
        });
    }
    assert!(ctx.end_layout().is_empty());
    assert_eq!(*seen.borrow(), vec![ErrorKind::ElementsCapacityExceeded]);
}

#[test]
fn unbalanced_close_is_reported() {
    let (handler, seen) = recorder();
    let mut ctx = context_with(100.0, 100.0, 64, handler);
    ctx.begin_layout();
    ctx.close();
    ctx.open(Some(ElementId::new("Left open")));
    ctx.end_layout();
    assert_eq!(
        *seen.borrow(),
        vec![ErrorKind::UnbalancedOpenClose, ErrorKind::UnbalancedOpenClose]
    );
}

#[test]
fn percent_over_one_is_reported() {
    let (handler, seen) = recorder();
    let mut ctx = context_with(100.0, 100.0, 64, handler);
    ctx.begin_layout();
    ctx.element(ElementDeclaration::new().layout(LayoutConfig::new().width(SizingAxis::percent(1.5))), |_| {});
    ctx.end_layout();
    assert_eq!(*seen.borrow(), vec![ErrorKind::PercentageOverOne]);
}

#[test]
fn missing_floating_target_falls_back_to_root() {
    let (handler, seen) = recorder();
    let mut ctx = context_with(100.0, 100.0, 64, handler);
    ctx.begin_layout();
    ctx.element(
        boxed("Lost", fixed(10.0, 10.0))
            .floating(FloatingConfig::new().attach_to(AttachTo::Element(ElementId::new("Nowhere")))),
        |_| {},
    );
    ctx.end_layout();
    assert_eq!(*seen.borrow(), vec![ErrorKind::FloatingParentNotFound]);
    assert_eq!(bounds(&ctx, "Lost"), BoundingBox::new(0.0, 0.0, 10.0, 10.0));
}

// ── pointer ───────────────────────────────────────────────────────────────

fn declare_button(ctx: &mut LayoutContext, clicks: &Rc<Cell<u32>>) {
    ctx.begin_layout();
    ctx.element(boxed("Button", fixed(100.0, 40.0)), |ctx| {
        let clicks = clicks.clone();
        ctx.on_hover(move |_, pointer| {
            if pointer.state == PointerInteraction::PressedThisFrame {
                clicks.set(clicks.get() + 1);
            }
        });
    });
    ctx.end_layout();
}

#[test]
fn pointer_hit_tests_previous_layout() {
    let mut ctx = context(400.0, 400.0);
    let clicks = Rc::new(Cell::new(0));
    declare_button(&mut ctx, &clicks);

    ctx.set_pointer_state(Vector2::new(10.0, 10.0), false);
    assert!(ctx.pointer_over(ElementId::new("Button")));
    assert!(ctx.pointer_over(ElementId::new(ROOT_LABEL)));

    ctx.set_pointer_state(Vector2::new(300.0, 300.0), false);
    assert!(!ctx.pointer_over(ElementId::new("Button")));
}

#[test]
fn hovered_reports_open_element() {
    let mut ctx = context(400.0, 400.0);
    let clicks = Rc::new(Cell::new(0));
    declare_button(&mut ctx, &clicks);
    ctx.set_pointer_state(Vector2::new(10.0, 10.0), false);

    ctx.begin_layout();
    let mut hovered = false;
    ctx.element(boxed("Button", fixed(100.0, 40.0)), |ctx| hovered = ctx.hovered());
    ctx.end_layout();
    assert!(hovered);
}

#[test]
fn hover_callback_sees_press_once() {
    let mut ctx = context(400.0, 400.0);
    let clicks = Rc::new(Cell::new(0));
    declare_button(&mut ctx, &clicks);

    ctx.set_pointer_state(Vector2::new(10.0, 10.0), true);
    declare_button(&mut ctx, &clicks);
    ctx.set_pointer_state(Vector2::new(10.0, 10.0), true);
    declare_button(&mut ctx, &clicks);

    assert_eq!(clicks.get(), 1);
    assert_eq!(ctx.pointer_state().state, PointerInteraction::Pressed);
}

#[test]
fn capturing_floating_element_blocks_elements_below() {
    let mut ctx = context(400.0, 400.0);
    ctx.begin_layout();
    ctx.element(boxed("Under", fixed(100.0, 100.0)), |ctx| {
        ctx.element(boxed("Over", fixed(50.0, 50.0)).floating(FloatingConfig::new()), |_| {});
    });
    ctx.end_layout();

    ctx.set_pointer_state(Vector2::new(10.0, 10.0), false);
    assert!(ctx.pointer_over(ElementId::new("Over")));
    assert!(!ctx.pointer_over(ElementId::new("Under")));
}

#[test]
fn passthrough_floating_element_lets_hits_reach_below() {
    let mut ctx = context(400.0, 400.0);
    ctx.begin_layout();
    ctx.element(boxed("Under", fixed(100.0, 100.0)), |ctx| {
        ctx.element(
            boxed("Over", fixed(50.0, 50.0))
                .floating(FloatingConfig::new().pointer_capture(PointerCapture::Passthrough)),
            |_| {},
        );
    });
    ctx.end_layout();

    ctx.set_pointer_state(Vector2::new(10.0, 10.0), false);
    assert!(ctx.pointer_over(ElementId::new("Over")));
    assert!(ctx.pointer_over(ElementId::new("Under")));
}

// ── scrolling ─────────────────────────────────────────────────────────────

fn declare_scroll(ctx: &mut LayoutContext) {
    ctx.begin_layout();
    ctx.open(Some(ElementId::new("Scroll")));
    let offset = ctx.scroll_offset();
    ctx.configure(boxed("Scroll", fixed(100.0, 100.0)).clip(ClipConfig::vertical(offset)));
    ctx.element(boxed("Content", fixed(100.0, 500.0)), |_| {});
    ctx.close();
    ctx.end_layout();
}

#[test]
fn wheel_scrolls_hovered_container() {
    let mut ctx = context(400.0, 400.0);
    declare_scroll(&mut ctx);

    ctx.set_pointer_state(Vector2::new(50.0, 50.0), false);
    ctx.update_scroll_containers(true, Vector2::new(0.0, -3.0), 0.01);
    declare_scroll(&mut ctx);

    let data = ctx.scroll_container(ElementId::new("Scroll")).expect("container tracked");
    assert_eq!(data.scroll_position, Vector2::new(0.0, -30.0));
    assert_eq!(data.content_size, Dimensions::new(100.0, 500.0));
    assert_eq!(bounds(&ctx, "Content").y, -30.0);

    let input = ctx.last_scroll_input().expect("input recorded");
    assert!((input.scaled_delta().y + 0.03).abs() < 1e-6);
}

#[test]
fn wheel_ignored_when_pointer_elsewhere() {
    let mut ctx = context(400.0, 400.0);
    declare_scroll(&mut ctx);

    ctx.set_pointer_state(Vector2::new(300.0, 300.0), false);
    ctx.update_scroll_containers(true, Vector2::new(0.0, -3.0), 0.01);
    declare_scroll(&mut ctx);

    let data = ctx.scroll_container(ElementId::new("Scroll")).expect("container tracked");
    assert_eq!(data.scroll_position, Vector2::zero());
}

#[test]
fn undeclared_scroll_container_is_dropped() {
    let mut ctx = context(400.0, 400.0);
    declare_scroll(&mut ctx);
    assert!(ctx.scroll_container(ElementId::new("Scroll")).is_some());

    ctx.begin_layout();
    ctx.end_layout();
    assert!(ctx.scroll_container(ElementId::new("Scroll")).is_none());
}
