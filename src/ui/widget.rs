use egui::{Align2, Color32, CursorIcon, FontId, Pos2, Rect, Response, Sense, Ui, Vec2, Widget};
use fxhash::{FxHashMap, FxHasher};
use instant::Instant;
use std::hash::{Hash, Hasher};

use crate::{
    core::geo::{Point, TileRect},
    gallery::DomeGallery,
    input::{events::EventHandled, handler::InteractionState},
    render::projection::{hit_test, ProjectedTile},
};

/// Immediate-mode view of a [`DomeGallery`].
///
/// The gallery itself lives in the application; the widget borrows it for
/// one frame, feeds it egui input, delivers pending inertia frames and
/// paints the projected tiles.
///
/// ```rust,ignore
/// let response = DomeGalleryWidget::new(&mut self.gallery)
///     .textures(&self.textures)
///     .show(ui);
/// if let Some(click) = response.clicked {
///     self.open_viewer(click.index);
/// }
/// ```
pub struct DomeGalleryWidget<'a> {
    gallery: &'a mut DomeGallery,
    textures: Option<&'a FxHashMap<String, egui::TextureId>>,
    size: Option<Vec2>,
    show_labels: bool,
}

/// A tile click accepted by the gallery
#[derive(Debug, Clone, PartialEq)]
pub struct TileClick {
    pub index: usize,
    pub src: String,
    pub alt: String,
    /// Tile rectangle relative to the widget's top-left corner
    pub rect: TileRect,
}

pub struct GalleryResponse {
    pub response: Response,
    pub clicked: Option<TileClick>,
}

impl<'a> DomeGalleryWidget<'a> {
    pub fn new(gallery: &'a mut DomeGallery) -> Self {
        Self {
            gallery,
            textures: None,
            size: None,
            show_labels: true,
        }
    }

    /// Loaded images by `src`. Tiles without a texture are drawn as
    /// coloured cards.
    pub fn textures(mut self, textures: &'a FxHashMap<String, egui::TextureId>) -> Self {
        self.textures = Some(textures);
        self
    }

    pub fn size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    pub fn labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    pub fn show(self, ui: &mut Ui) -> GalleryResponse {
        let desired_size = self.size.unwrap_or_else(|| ui.available_size());
        let (rect, mut response) = ui.allocate_exact_size(desired_size, Sense::click_and_drag());
        let gallery = self.gallery;
        let now = Instant::now();

        let (width, height) = (rect.width() as f64, rect.height() as f64);
        if (gallery.radius() - gallery.config().layout.radius_for(width, height)).abs() > f64::EPSILON {
            gallery.set_container_size(width, height);
        }

        let (pressed, released, pointer, moved, scroll) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
                i.pointer.delta() != Vec2::ZERO,
                i.raw_scroll_delta,
            )
        });
        let local = |pos: Pos2| Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64);

        if response.hovered() {
            if !gallery.is_hovering() {
                gallery.hover_enter();
            }
        } else if gallery.is_hovering() {
            gallery.hover_leave();
        }

        if pressed && response.hovered() {
            if let Some(pos) = pointer {
                gallery.pointer_down(local(pos), now);
            }
        }
        if gallery.state() == InteractionState::Dragging {
            // A repaint with a still pointer is not a velocity sample
            if let Some(pos) = pointer.filter(|_| moved) {
                if gallery.pointer_move(local(pos), now).is_handled() {
                    response.mark_changed();
                }
            }
            if released {
                gallery.pointer_up();
            }
        }

        if scroll != Vec2::ZERO {
            let (dx, dy) = dom_wheel_delta(scroll);
            if gallery.wheel(dx, dy) == EventHandled::Handled {
                response.mark_changed();
            }
        }

        if gallery.pump_frames() > 0 {
            response.mark_changed();
        }

        let projected = gallery.project(width, height);

        let mut clicked = None;
        if response.clicked() {
            if let Some(tile) = pointer.and_then(|pos| hit_test(&projected, local(pos))) {
                clicked = accept_click(gallery, tile);
            }
        }

        if response.dragged() {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        } else if response.hovered() {
            ui.ctx().set_cursor_icon(CursorIcon::Grab);
        }

        paint(
            ui,
            rect,
            gallery,
            &projected,
            self.textures,
            self.show_labels,
        );

        if gallery.state() == InteractionState::Coasting {
            ui.ctx().request_repaint();
        }

        GalleryResponse { response, clicked }
    }
}

impl<'a> Widget for DomeGalleryWidget<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        self.show(ui).response
    }
}

fn accept_click(gallery: &mut DomeGallery, tile: &ProjectedTile) -> Option<TileClick> {
    match gallery.click_tile(tile.index, tile.rect) {
        Ok(true) => gallery.tiles().get(tile.index).map(|t| TileClick {
            index: tile.index,
            src: t.src.clone(),
            alt: t.alt.clone(),
            rect: tile.rect,
        }),
        Ok(false) => None,
        Err(e) => {
            log::warn!("Ignoring click: {}", e);
            None
        }
    }
}

fn paint(
    ui: &Ui,
    rect: Rect,
    gallery: &DomeGallery,
    projected: &[ProjectedTile],
    textures: Option<&FxHashMap<String, egui::TextureId>>,
    show_labels: bool,
) {
    let style = &gallery.config().style;
    let painter = ui.painter_at(rect);
    let background = parse_hex_color(&style.overlay_blur_color).unwrap_or(Color32::BLACK);
    painter.rect_filled(rect, 0.0, background);

    if let Some(text) = gallery.placeholder() {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(16.0),
            Color32::from_gray(160),
        );
        return;
    }

    let rounding = parse_px(&style.tile_radius).unwrap_or(0.0);
    let tiles = gallery.tiles();

    for item in projected {
        let Some(tile) = tiles.get(item.index) else {
            continue;
        };
        let tile_rect = Rect::from_center_size(
            rect.min + Vec2::new(item.rect.x as f32, item.rect.y as f32),
            Vec2::new(item.rect.width as f32, item.rect.height as f32),
        );
        if !tile_rect.intersects(rect) {
            continue;
        }

        let shade = depth_shade(item.scale);
        let corner = rounding * item.scale as f32;

        match textures.and_then(|t| t.get(&tile.src)) {
            Some(texture) => {
                let tint = Color32::from_gray((255.0 * shade) as u8);
                painter.image(
                    *texture,
                    tile_rect,
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    tint,
                );
            }
            None => {
                let color = tile_color(&tile.src, style.grayscale).gamma_multiply(shade);
                painter.rect_filled(tile_rect, corner, color);
            }
        }

        if show_labels && !tile.alt.is_empty() && item.scale > 0.8 {
            painter.text(
                tile_rect.center_bottom() - Vec2::new(0.0, 6.0),
                Align2::CENTER_BOTTOM,
                &tile.alt,
                FontId::proportional(11.0),
                Color32::from_gray(230),
            );
        }
    }
}

/// egui reports scroll as content movement, the DOM as wheel travel
fn dom_wheel_delta(scroll: Vec2) -> (f64, f64) {
    (-scroll.x as f64, -scroll.y as f64)
}

/// Tiles further back are darker
fn depth_shade(scale: f64) -> f32 {
    (scale.clamp(0.5, 1.0) as f32 - 0.5) * 1.2 + 0.4
}

/// Stable card colour for a tile without a loaded image
fn tile_color(src: &str, grayscale: bool) -> Color32 {
    let mut hasher = FxHasher::default();
    src.hash(&mut hasher);
    let [r, g, b, ..] = hasher.finish().to_le_bytes();

    if grayscale {
        let gray = ((r as u16 + g as u16 + b as u16) / 3) as u8;
        Color32::from_gray(gray / 2 + 64)
    } else {
        Color32::from_rgb(r / 2 + 64, g / 2 + 64, b / 2 + 64)
    }
}

fn parse_hex_color(value: &str) -> Option<Color32> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn parse_px(value: &str) -> Option<f32> {
    value.trim().trim_end_matches("px").trim().parse().ok()
}

pub trait UiGalleryExt {
    fn dome_gallery(&mut self, gallery: &mut DomeGallery) -> GalleryResponse;
}

impl UiGalleryExt for Ui {
    fn dome_gallery(&mut self, gallery: &mut DomeGallery) -> GalleryResponse {
        DomeGalleryWidget::new(gallery).show(self)
    }
}
