//! fractalcrypt WebAssembly bindings: the binary ring on a page canvas.
//!
//! The page provides a `.glass-effect` container, the form fields
//! `inputText`, `iterations`, `seed` and `outputText`, and wires its buttons
//! and window events to a single [`FractalApp`]:
//!
//! ```js
//! import init, { FractalApp } from "./fractalcrypt_wasm.js";
//! await init();
//! const app = new FractalApp();
//! encryptButton.onclick = () => app.encrypt();
//! decryptButton.onclick = () => app.decrypt();
//! window.addEventListener("resize", () => app.resize());
//! window.addEventListener("unload", () => app.unload());
//! ```
//!
//! Frames are driven by `requestAnimationFrame`, one callback in flight at a
//! time.

use std::cell::RefCell;
use std::rc::Rc;

use fractalcrypt_core::{
    Canvas, FrameHandle, FrameScheduler, Host, Paint, Rgba, Surface, Viewport, decode_binary,
    encode_text,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, Window};

const CANVAS_ID: &str = "fractalCanvas";
const CONTAINER_SELECTOR: &str = ".glass-effect";
const INPUT_ID: &str = "inputText";
const OUTPUT_ID: &str = "outputText";
const ITERATIONS_ID: &str = "iterations";
const SEED_ID: &str = "seed";

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

// ---------------------------------------------------------------------------
// Browser API helpers
// ---------------------------------------------------------------------------

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

/// Read the `value` property of the element with `id`, or "" if absent.
fn field_value(document: &Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|el| js_sys::Reflect::get(&el, &JsValue::from_str("value")).ok())
        .and_then(|v| v.as_string())
        .unwrap_or_default()
}

fn set_field_value(document: &Document, id: &str, value: &str) {
    let Some(el) = document.get_element_by_id(id) else {
        log::warn!("#{id} not found");
        return;
    };
    if js_sys::Reflect::set(&el, &JsValue::from_str("value"), &JsValue::from_str(value)).is_err() {
        log::warn!("could not set #{id}.value");
    }
}

/// Combine two `Math.random()` draws into a 64-bit seed.
fn seed_from_units(hi: f64, lo: f64) -> u64 {
    let word = |u: f64| (u.clamp(0.0, 1.0) * f64::from(u32::MAX)) as u64;
    (word(hi) << 32) | word(lo)
}

fn random_seed() -> u64 {
    seed_from_units(js_sys::Math::random(), js_sys::Math::random())
}

fn report(result: Result<(), JsValue>, what: &str) {
    if let Err(e) = result {
        log::debug!("{what} failed: {e:?}");
    }
}

// ---------------------------------------------------------------------------
// Canvas surface
// ---------------------------------------------------------------------------

/// The page's `#fractalCanvas` and its 2D context.
#[derive(Clone)]
struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Find `#fractalCanvas`, or create it inside the `.glass-effect` container.
    fn attach(document: &Document) -> Result<Self, JsValue> {
        let canvas = match document.get_element_by_id(CANVAS_ID) {
            Some(el) => el.dyn_into::<HtmlCanvasElement>()?,
            None => {
                let el = document.create_element("canvas")?;
                el.set_id(CANVAS_ID);
                let container = document
                    .query_selector(CONTAINER_SELECTOR)?
                    .ok_or_else(|| JsValue::from_str("no .glass-effect container"))?;
                container.append_child(&el)?;
                el.dyn_into::<HtmlCanvasElement>()?
            }
        };
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }
}

impl Canvas for CanvasSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.ctx.set_stroke_style_str(&color.to_css());
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_fill(&mut self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_css()),
            Paint::RadialGradient {
                x0,
                y0,
                r0,
                x1,
                y1,
                r1,
                stops,
            } => {
                let gradient = self
                    .ctx
                    .create_radial_gradient(*x0, *y0, *r0, *x1, *y1, *r1)
                    .and_then(|g| {
                        for stop in stops {
                            g.add_color_stop(stop.offset as f32, &stop.color.to_css())?;
                        }
                        Ok(g)
                    });
                match gradient {
                    Ok(g) => self.ctx.set_fill_style_canvas_gradient(&g),
                    Err(e) => {
                        log::debug!("gradient failed: {e:?}");
                        self.ctx.set_fill_style_str(&paint.primary_color().to_css());
                    }
                }
            }
        }
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        report(self.ctx.arc(x, y, radius, start, end), "arc");
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }
}

impl Surface for CanvasSurface {
    /// Size the canvas bitmap to its container's layout box.
    fn fit(&mut self) -> Viewport {
        if let Some(parent) = self
            .canvas
            .parent_element()
            .and_then(|p| p.dyn_into::<HtmlElement>().ok())
        {
            self.canvas.set_width(parent.offset_width().max(0) as u32);
            self.canvas.set_height(parent.offset_height().max(0) as u32);
        }
        Viewport::new(
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        )
    }
}

// ---------------------------------------------------------------------------
// requestAnimationFrame scheduler
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl FrameScheduler for RafScheduler {
    fn schedule(&mut self) -> Option<FrameHandle> {
        let callback = self.callback.borrow();
        let closure = callback.as_ref()?;
        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameHandle(id as u64)),
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {e:?}");
                None
            }
        }
    }

    fn cancel(&mut self, handle: FrameHandle) {
        report(
            self.window.cancel_animation_frame(handle.0 as i32),
            "cancelAnimationFrame",
        );
    }
}

// ---------------------------------------------------------------------------
// Page bindings
// ---------------------------------------------------------------------------

#[wasm_bindgen(start)]
pub fn start() {
    wasm_logger::init(wasm_logger::Config::default());
}

/// One page session: the canvas, the frame loop and the live instance.
#[wasm_bindgen]
pub struct FractalApp {
    host: Rc<RefCell<Host<RafScheduler, CanvasSurface>>>,
    document: Document,
    _callback: FrameCallback,
}

#[wasm_bindgen]
impl FractalApp {
    /// Page load: attach the canvas and install an idle instance.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<FractalApp, JsValue> {
        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let surface = CanvasSurface::attach(&document)?;

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler {
            window,
            callback: Rc::clone(&callback),
        };
        let host = Rc::new(RefCell::new(Host::new(
            scheduler,
            surface,
            StdRng::seed_from_u64(random_seed()),
        )));

        let weak = Rc::downgrade(&host);
        *callback.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
            if let Some(shared) = weak.upgrade()
                && let Ok(mut host) = shared.try_borrow_mut()
            {
                host.tick();
            }
        }));

        host.borrow_mut().load();
        log::info!("fractalcrypt {} ready", fractalcrypt_core::VERSION);

        Ok(Self {
            host,
            document,
            _callback: callback,
        })
    }

    /// Encrypt button: read the form, write the binary to `#outputText`.
    pub fn encrypt(&self) {
        let input = field_value(&self.document, INPUT_ID);
        let output = self.host.borrow_mut().encrypt(
            &input,
            &field_value(&self.document, ITERATIONS_ID),
            &field_value(&self.document, SEED_ID),
        );
        set_field_value(&self.document, OUTPUT_ID, &output);
    }

    /// Decrypt button: read the form, write the text to `#outputText`.
    pub fn decrypt(&self) {
        let input = field_value(&self.document, INPUT_ID);
        let output = self.host.borrow_mut().decrypt(
            &input,
            &field_value(&self.document, ITERATIONS_ID),
            &field_value(&self.document, SEED_ID),
        );
        set_field_value(&self.document, OUTPUT_ID, &output);
    }

    pub fn resize(&self) {
        self.host.borrow_mut().resize();
    }

    pub fn unload(&self) {
        self.host.borrow_mut().unload();
    }
}

/// Encode text as 8-digit binary groups.
#[wasm_bindgen]
pub fn text_to_binary(text: &str) -> String {
    encode_text(text)
}

/// Decode 8-digit binary groups, or return the fixed error message.
#[wasm_bindgen]
pub fn binary_to_text(binary: &str) -> String {
    decode_binary(binary)
}
