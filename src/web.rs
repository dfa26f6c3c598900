//! Browser binding.
//!
//! The page keeps rendering the tiles as DOM elements (their angles come
//! from [`WebDomeGallery::tiles_json`]); this binding owns the interaction
//! state, writes the sphere transform and CSS variables, and drives inertia
//! through `requestAnimationFrame`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use fxhash::FxHashMap;
use instant::Instant;
use js_sys::{Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::HtmlElement;

use crate::{
    animation::scheduler::{FrameId, FrameScheduler},
    core::{
        config::GalleryConfig,
        geo::{Point, TileRect},
    },
    gallery::DomeGallery,
    input::events::{EventHandled, TouchPhase, TouchPoint},
    layout::{
        geometry::base_rotation,
        tiles::{load_hint, ImageDescriptor, LoadPriority, LoadingMode},
    },
    GalleryError, Result,
};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

fn js_error(value: JsValue) -> GalleryError {
    GalleryError::Web(format!("{:?}", value))
}

fn to_js(error: GalleryError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Installs the panic hook so Rust panics show up in the browser console
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// [`FrameScheduler`] backed by `requestAnimationFrame`
pub struct WebFrameScheduler {
    window: web_sys::Window,
    next_id: u64,
    handles: FxHashMap<FrameId, i32>,
    target: Weak<RefCell<WebInner>>,
}

impl WebFrameScheduler {
    fn new(window: web_sys::Window) -> Self {
        Self {
            window,
            next_id: 0,
            handles: FxHashMap::default(),
            target: Weak::new(),
        }
    }

    fn bind(&mut self, target: Weak<RefCell<WebInner>>) {
        self.target = target;
    }

    fn delivered(&mut self, id: FrameId) {
        self.handles.remove(&id);
    }

    pub fn pending_count(&self) -> usize {
        self.handles.len()
    }
}

impl FrameScheduler for WebFrameScheduler {
    fn request_frame(&mut self) -> FrameId {
        self.next_id += 1;
        let id = FrameId(self.next_id);
        let target = self.target.clone();

        // Frees itself after the single call; a cancelled frame leaks only the closure
        let callback = Closure::once_into_js(move |_timestamp: f64| {
            if let Some(inner) = target.upgrade() {
                inner.borrow_mut().on_frame(id);
            }
        });

        match self
            .window
            .request_animation_frame(callback.unchecked_ref::<Function>())
        {
            Ok(handle) => {
                self.handles.insert(id, handle);
            }
            Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
        }
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if let Some(handle) = self.handles.remove(&id) {
            if let Err(e) = self.window.cancel_animation_frame(handle) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }
    }
}

struct WebInner {
    gallery: DomeGallery<WebFrameScheduler>,
    container: HtmlElement,
    sphere: HtmlElement,
}

impl WebInner {
    fn on_frame(&mut self, id: FrameId) {
        self.gallery.scheduler_mut().delivered(id);
        self.gallery.on_animation_frame(id);
        self.apply_transform();
    }

    fn apply_transform(&self) {
        if let Err(e) = self
            .sphere
            .style()
            .set_property("transform", &self.gallery.sphere_transform())
        {
            log::warn!("Failed to set sphere transform: {:?}", e);
        }
    }

    fn apply_variables(&self) -> Result<()> {
        let style = self.container.style();
        for (name, value) in self.gallery.css_variables() {
            style.set_property(name, &value).map_err(js_error)?;
        }
        Ok(())
    }

    fn measure(&mut self) -> Result<()> {
        let rect = self.container.get_bounding_client_rect();
        let radius = self.gallery.set_container_size(rect.width(), rect.height());
        log::debug!(
            "Container {}x{}, radius {}",
            rect.width(),
            rect.height(),
            radius
        );
        self.apply_variables()
    }
}

#[derive(Serialize)]
struct TileView<'a> {
    key: String,
    src: &'a str,
    alt: &'a str,
    offset_x: i32,
    offset_y: i32,
    size_x: u32,
    size_y: u32,
    rotate_x: f64,
    rotate_y: f64,
    loading: LoadingMode,
    priority: LoadPriority,
}

/// Dome gallery bound to a container element and its sphere element
#[wasm_bindgen]
pub struct WebDomeGallery {
    inner: Rc<RefCell<WebInner>>,
    on_click: RefCell<Option<Function>>,
}

#[wasm_bindgen]
impl WebDomeGallery {
    /// `images_json` is an array of `{ "src": ..., "alt": ... }` objects or
    /// plain source strings. `config_json` may be omitted for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: HtmlElement,
        sphere: HtmlElement,
        images_json: &str,
        config_json: Option<String>,
    ) -> std::result::Result<WebDomeGallery, JsValue> {
        Self::create(container, sphere, images_json, config_json.as_deref()).map_err(to_js)
    }

    /// Re-reads the container size, for resize observers
    pub fn resize(&self) -> std::result::Result<f64, JsValue> {
        let mut inner = self.inner.borrow_mut();
        inner.measure().map_err(to_js)?;
        Ok(inner.gallery.radius())
    }

    /// Tile list with resting angles and loading hints, as JSON
    pub fn tiles_json(&self) -> std::result::Result<String, JsValue> {
        let inner = self.inner.borrow();
        let segments = inner.gallery.config().layout.segments;
        let views: Vec<TileView> = inner
            .gallery
            .tiles()
            .iter()
            .enumerate()
            .map(|(index, tile)| {
                let angles = base_rotation(&tile.slot(), segments);
                let (loading, priority) = load_hint(index);
                TileView {
                    key: tile.key(index),
                    src: &tile.src,
                    alt: &tile.alt,
                    offset_x: tile.x,
                    offset_y: tile.y,
                    size_x: tile.size_x,
                    size_y: tile.size_y,
                    rotate_x: angles.rotate_x,
                    rotate_y: angles.rotate_y,
                    loading,
                    priority,
                }
            })
            .collect();
        serde_json::to_string(&views).map_err(|e| to_js(e.into()))
    }

    /// Text to show instead of the sphere, if any
    pub fn placeholder(&self) -> Option<String> {
        self.inner.borrow().gallery.placeholder().map(str::to_string)
    }

    pub fn yaw(&self) -> f64 {
        self.inner.borrow().gallery.rotation().yaw
    }

    pub fn pitch(&self) -> f64 {
        self.inner.borrow().gallery.rotation().pitch
    }

    pub fn sphere_transform(&self) -> String {
        self.inner.borrow().gallery.sphere_transform()
    }

    /// Called with `(src, alt, { x, y, width, height })`
    pub fn set_on_image_click(&self, callback: Function) {
        *self.on_click.borrow_mut() = Some(callback);
    }

    /// Reports a click on tile `index` whose bounding box is given in page
    /// pixels. Returns whether the click was accepted.
    pub fn click_tile(
        &self,
        index: usize,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> std::result::Result<bool, JsValue> {
        let rect = TileRect::from_bounds(left, top, width, height);
        let (src, alt) = {
            let mut inner = self.inner.borrow_mut();
            if !inner.gallery.click_tile(index, rect).map_err(to_js)? {
                return Ok(false);
            }
            match inner.gallery.tiles().get(index) {
                Some(tile) => (tile.src.clone(), tile.alt.clone()),
                None => return Ok(false),
            }
        };

        // The handler may call back into this gallery
        let callback = self.on_click.borrow().clone();
        if let Some(callback) = callback {
            let payload = Object::new();
            for (key, value) in [
                ("x", rect.x),
                ("y", rect.y),
                ("width", rect.width),
                ("height", rect.height),
            ] {
                Reflect::set(&payload, &key.into(), &value.into())?;
            }
            callback.call3(&JsValue::NULL, &src.into(), &alt.into(), &payload)?;
        }
        Ok(true)
    }

    pub fn pointer_down(&self, x: f64, y: f64) {
        let mut inner = self.inner.borrow_mut();
        inner.gallery.pointer_down(Point::new(x, y), Instant::now());
    }

    /// Returns `true` when the page should `preventDefault`
    pub fn pointer_move(&self, x: f64, y: f64) -> bool {
        let mut inner = self.inner.borrow_mut();
        let handled = inner.gallery.pointer_move(Point::new(x, y), Instant::now());
        if handled.is_handled() {
            inner.apply_transform();
        }
        handled.is_handled()
    }

    pub fn pointer_up(&self) {
        self.inner.borrow_mut().gallery.pointer_up();
    }

    pub fn pointer_enter(&self) {
        self.inner.borrow_mut().gallery.hover_enter();
    }

    pub fn pointer_leave(&self) {
        self.inner.borrow_mut().gallery.pointer_leave();
    }

    /// Returns `true` when the page should `preventDefault`
    pub fn wheel(&self, delta_x: f64, delta_y: f64) -> bool {
        let mut inner = self.inner.borrow_mut();
        let handled = inner.gallery.wheel(delta_x, delta_y) == EventHandled::Handled;
        if handled {
            inner.apply_transform();
        }
        handled
    }

    /// `touches` is the flat list `[x0, y0, x1, y1, ...]` of active touches
    pub fn touch_start(&self, touches: &[f64]) {
        self.touch(TouchPhase::Start, touches);
    }

    pub fn touch_move(&self, touches: &[f64]) -> bool {
        self.touch(TouchPhase::Move, touches)
    }

    pub fn touch_end(&self) {
        self.touch(TouchPhase::End, &[]);
    }

    /// Cancels pending frames and ends gestures. Call when unmounting.
    pub fn destroy(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.gallery.teardown();
        log::debug!(
            "Dome gallery destroyed, {} frames outstanding",
            inner.gallery.scheduler().pending_count()
        );
    }
}

impl WebDomeGallery {
    fn create(
        container: HtmlElement,
        sphere: HtmlElement,
        images_json: &str,
        config_json: Option<&str>,
    ) -> Result<WebDomeGallery> {
        let window = web_sys::window().ok_or_else(|| GalleryError::Web("no window".into()))?;
        let images = parse_images(images_json)?;
        let config = match config_json {
            Some(json) => GalleryConfig::from_json_str(json)?,
            None => GalleryConfig::default(),
        };

        let gallery = DomeGallery::with_scheduler(images, config, WebFrameScheduler::new(window))?;
        let inner = Rc::new(RefCell::new(WebInner {
            gallery,
            container,
            sphere,
        }));
        {
            let mut state = inner.borrow_mut();
            state.gallery.scheduler_mut().bind(Rc::downgrade(&inner));
            state.measure()?;
            state.apply_transform();
            console_log!("Dome gallery ready with {} tiles", state.gallery.tiles().len());
        }

        Ok(WebDomeGallery {
            inner,
            on_click: RefCell::new(None),
        })
    }

    fn touch(&self, phase: TouchPhase, touches: &[f64]) -> bool {
        let points: Vec<TouchPoint> = touches
            .chunks_exact(2)
            .enumerate()
            .map(|(id, xy)| TouchPoint::new(id as u64, xy[0], xy[1]))
            .collect();

        let mut inner = self.inner.borrow_mut();
        let handled = inner.gallery.touch(phase, &points, Instant::now());
        if handled.is_handled() {
            inner.apply_transform();
        }
        handled.is_handled()
    }
}

/// Accepts `[{ "src", "alt" }]` or `["src", ...]`
fn parse_images(json: &str) -> Result<Vec<ImageDescriptor>> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Entry {
        Full(ImageDescriptor),
        Src(String),
    }

    let entries: Vec<Entry> = serde_json::from_str(json)?;
    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            Entry::Full(image) => image,
            Entry::Src(src) => ImageDescriptor::from(src),
        })
        .collect())
}
