//! The document-browser demo layout: a header bar with a hover-revealed
//! file menu, a sidebar of document titles and a scrolling reader.

mod documents;

use std::cell::Cell;
use std::rc::Rc;

use kiln_layout::{
    AlignY, AttachPoint, ChildAlignment, ClipConfig, Color, CornerRadius, ElementDeclaration,
    ElementId, FloatingConfig, LayoutConfig, LayoutContext, LayoutDirection, Padding,
    PointerInteraction, RenderCommand, Sizing, SizingAxis, TextConfig,
};

pub use documents::{Document, documents};

/// Font slot every demo text uses.
pub const FONT_ID_BODY_16: u16 = 0;

const WHITE: Color = Color::rgb(255.0, 255.0, 255.0);
const OUTER_BACKGROUND: Color = Color::rgb(43.0, 41.0, 51.0);
const CONTENT_BACKGROUND: Color = Color::rgb(90.0, 90.0, 90.0);
const BUTTON_BACKGROUND: Color = Color::rgb(140.0, 140.0, 140.0);
const MENU_BACKGROUND: Color = Color::rgb(40.0, 40.0, 40.0);
const SELECTED_BACKGROUND: Color = Color::rgb(120.0, 120.0, 120.0);
const HOVERED_BACKGROUND: Color = Color::rgba(120.0, 120.0, 120.0, 120.0);

const SIDEBAR_WIDTH: f32 = 250.0;
const HEADER_HEIGHT: f32 = 60.0;
const MENU_WIDTH: f32 = 200.0;

pub const FILE_BUTTON: &str = "FileButton";
pub const FILE_MENU: &str = "FileMenu";
pub const MAIN_CONTENT: &str = "MainContent";
pub const SIDEBAR_BUTTON: &str = "SidebarButton";

/// Mutable demo state threaded through every frame.
#[derive(Debug)]
pub struct VideoDemo {
    selected: Rc<Cell<usize>>,
    /// Added to every command's `y` after layout.
    pub y_offset: f32,
}

impl Default for VideoDemo {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoDemo {
    pub fn new() -> Self {
        Self { selected: Rc::new(Cell::new(0)), y_offset: 0.0 }
    }

    pub fn selected_document(&self) -> usize {
        self.selected.get()
    }

    pub fn select_document(&mut self, index: usize) {
        if index < documents().len() {
            self.selected.set(index);
        }
    }

    /// Declares one frame of the demo and returns its render commands.
    pub fn create_layout<'a>(&mut self, ctx: &'a mut LayoutContext) -> &'a [RenderCommand] {
        ctx.begin_layout();

        ctx.element(
            ElementDeclaration::new()
                .id(ElementId::new("OuterContainer"))
                .layout(
                    LayoutConfig::new()
                        .sizing(Sizing::grow())
                        .direction(LayoutDirection::TopToBottom)
                        .padding(Padding::all(16))
                        .child_gap(16),
                )
                .background(OUTER_BACKGROUND),
            |ctx| {
                header_bar(ctx);
                ctx.element(
                    ElementDeclaration::new()
                        .id(ElementId::new("LowerContent"))
                        .layout(LayoutConfig::new().sizing(Sizing::grow()).child_gap(16)),
                    |ctx| {
                        sidebar(ctx, &self.selected);
                        main_content(ctx, self.selected.get());
                    },
                );
            },
        );

        let commands = ctx.end_layout();
        if self.y_offset != 0.0 {
            for command in commands.iter_mut() {
                command.offset_y(self.y_offset);
            }
        }
        commands
    }
}

fn body_text(size: u16) -> TextConfig {
    TextConfig::new().font_id(FONT_ID_BODY_16).font_size(size).color(WHITE)
}

fn header_button(ctx: &mut LayoutContext, label: &str) {
    ctx.element(
        ElementDeclaration::new()
            .layout(LayoutConfig::new().padding(Padding::new(16, 16, 8, 8)))
            .background(BUTTON_BACKGROUND)
            .corner_radius(CornerRadius::all(5.0)),
        |ctx| ctx.text(label, body_text(16)),
    );
}

fn menu_item(ctx: &mut LayoutContext, label: &str) {
    ctx.element(
        ElementDeclaration::new().layout(LayoutConfig::new().padding(Padding::all(16))),
        |ctx| ctx.text(label, body_text(16)),
    );
}

fn header_bar(ctx: &mut LayoutContext) {
    ctx.element(
        ElementDeclaration::new()
            .id(ElementId::new("HeaderBar"))
            .layout(
                LayoutConfig::new()
                    .sizing(Sizing::new(SizingAxis::grow(), SizingAxis::fixed(HEADER_HEIGHT)))
                    .padding(Padding::symmetric(16, 0))
                    .child_gap(16)
                    .child_alignment(ChildAlignment { y: AlignY::Center, ..Default::default() }),
            )
            .background(CONTENT_BACKGROUND)
            .corner_radius(CornerRadius::all(8.0)),
        |ctx| {
            ctx.element(
                ElementDeclaration::new()
                    .id(ElementId::new(FILE_BUTTON))
                    .layout(LayoutConfig::new().padding(Padding::new(16, 16, 8, 8)))
                    .background(BUTTON_BACKGROUND)
                    .corner_radius(CornerRadius::all(5.0)),
                |ctx| {
                    ctx.text("File", body_text(16));

                    let menu_visible = ctx.pointer_over(ElementId::new(FILE_BUTTON))
                        || ctx.pointer_over(ElementId::new(FILE_MENU));
                    if menu_visible {
                        file_menu(ctx);
                    }
                },
            );
            header_button(ctx, "Edit");
            ctx.element(
                ElementDeclaration::new().layout(LayoutConfig::new().width(SizingAxis::grow())),
                |_| {},
            );
            header_button(ctx, "Upload");
            header_button(ctx, "Media");
            header_button(ctx, "Support");
        },
    );
}

fn file_menu(ctx: &mut LayoutContext) {
    ctx.element(
        ElementDeclaration::new()
            .id(ElementId::new(FILE_MENU))
            .floating(FloatingConfig::new().attach_points(AttachPoint::LeftTop, AttachPoint::LeftBottom))
            .layout(LayoutConfig::new().padding(Padding::symmetric(0, 8))),
        |ctx| {
            ctx.element(
                ElementDeclaration::new()
                    .layout(
                        LayoutConfig::new()
                            .direction(LayoutDirection::TopToBottom)
                            .width(SizingAxis::fixed(MENU_WIDTH)),
                    )
                    .background(MENU_BACKGROUND)
                    .corner_radius(CornerRadius::all(8.0)),
                |ctx| {
                    menu_item(ctx, "New");
                    menu_item(ctx, "Open");
                    menu_item(ctx, "Close");
                },
            );
        },
    );
}

fn sidebar(ctx: &mut LayoutContext, selected: &Rc<Cell<usize>>) {
    ctx.element(
        ElementDeclaration::new()
            .id(ElementId::new("Sidebar"))
            .layout(
                LayoutConfig::new()
                    .direction(LayoutDirection::TopToBottom)
                    .padding(Padding::all(16))
                    .child_gap(8)
                    .sizing(Sizing::new(SizingAxis::fixed(SIDEBAR_WIDTH), SizingAxis::grow())),
            )
            .background(CONTENT_BACKGROUND),
        |ctx| {
            for (index, document) in documents().iter().enumerate() {
                // hover state decides the background, so configure after opening
                ctx.open(Some(ElementId::indexed(SIDEBAR_BUTTON, index as u32)));
                let layout = LayoutConfig::new().width(SizingAxis::grow()).padding(Padding::all(16));
                let decl = if index == selected.get() {
                    ElementDeclaration::new()
                        .layout(layout)
                        .background(SELECTED_BACKGROUND)
                        .corner_radius(CornerRadius::all(8.0))
                } else {
                    let selected = selected.clone();
                    ctx.on_hover(move |_, pointer| {
                        if pointer.state == PointerInteraction::PressedThisFrame {
                            log::debug!("document {index} selected");
                            selected.set(index);
                        }
                    });
                    let background = if ctx.hovered() { HOVERED_BACKGROUND } else { Color::transparent() };
                    ElementDeclaration::new().layout(layout).background(background)
                };
                ctx.configure(decl);
                ctx.text(document.title, body_text(20));
                ctx.close();
            }
        },
    );
}

fn main_content(ctx: &mut LayoutContext, selected: usize) {
    let Some(document) = documents().get(selected) else {
        return;
    };

    ctx.open(Some(ElementId::new(MAIN_CONTENT)));
    let offset = ctx.scroll_offset();
    ctx.configure(
        ElementDeclaration::new()
            .layout(
                LayoutConfig::new()
                    .direction(LayoutDirection::TopToBottom)
                    .child_gap(16)
                    .padding(Padding::all(16))
                    .sizing(Sizing::grow()),
            )
            .background(CONTENT_BACKGROUND)
            .clip(ClipConfig::vertical(offset)),
    );
    ctx.text(document.title, body_text(24));
    ctx.text(document.contents, body_text(24));
    ctx.close();
}
