use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::interaction::{DetailView, Viewer};
use super::render;
use super::scene::SceneGraph;
use super::state::{Cursor, MoleculeState};
use super::topology::Topology;
use super::types::Dataset;
use crate::error::{FramesError, Result};

type Shared = Rc<RefCell<Option<MoleculeState>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Drives `tick` and `render` once per animation frame until stopped.
///
/// The frame closure reads the scene through the shared state, so swapping
/// the scene never leaves the loop holding a removed object.
pub struct AnimationLoop {
	window: Window,
	frame: Rc<Cell<Option<i32>>>,
	callback: FrameCallback,
}

impl AnimationLoop {
	pub fn start(window: Window, state: Shared, ctx: CanvasRenderingContext2d) -> Result<Self> {
		let frame = Rc::new(Cell::new(None));
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let (frame_inner, callback_inner, window_inner) =
			(frame.clone(), callback.clone(), window.clone());

		*callback.borrow_mut() = Some(Closure::new(move |now_ms: f64| {
			if let Some(ref mut s) = *state.borrow_mut() {
				s.tick(now_ms);
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *callback_inner.borrow() {
				frame_inner.set(
					window_inner
						.request_animation_frame(cb.as_ref().unchecked_ref())
						.ok(),
				);
			}
		}));

		let first = callback
			.borrow()
			.as_ref()
			.map(|cb| window.request_animation_frame(cb.as_ref().unchecked_ref()))
			.transpose()
			.map_err(FramesError::canvas)?;
		frame.set(first);

		Ok(Self {
			window,
			frame,
			callback,
		})
	}

	/// Cancel the pending frame and release the closure. Idempotent.
	pub fn stop(&self) {
		if let Some(handle) = self.frame.take() {
			let _ = self.window.cancel_animation_frame(handle);
		}
		if self.callback.borrow_mut().take().is_some() {
			debug!("animation loop stopped");
		}
	}
}

impl Drop for AnimationLoop {
	fn drop(&mut self) {
		self.stop();
	}
}

struct ResizeListener {
	window: Window,
	callback: Closure<dyn FnMut()>,
}

impl ResizeListener {
	fn attach(window: &Window, canvas: HtmlCanvasElement, state: Shared) -> Result<Self> {
		let callback = Closure::<dyn FnMut()>::new(move || {
			let (w, h) = fit_to_parent(&canvas);
			if let Some(ref mut s) = *state.borrow_mut() {
				s.resize(w, h);
			}
		});
		window
			.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
			.map_err(FramesError::canvas)?;
		Ok(Self {
			window: window.clone(),
			callback,
		})
	}
}

impl Drop for ResizeListener {
	fn drop(&mut self) {
		let _ = self
			.window
			.remove_event_listener_with_callback("resize", self.callback.as_ref().unchecked_ref());
	}
}

/// Everything that must be torn down with the canvas.
struct Mounted {
	_resize: ResizeListener,
	_frames: AnimationLoop,
}

fn fit_to_parent(canvas: &HtmlCanvasElement) -> (f64, f64) {
	let (w, h) = canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((800.0, 600.0));
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	(w, h)
}

fn mount(
	canvas: &HtmlCanvasElement,
	state: &Shared,
	scene: SceneGraph,
	viewer: Viewer,
) -> Result<Mounted> {
	let window = web_sys::window().ok_or_else(|| FramesError::Canvas("no window".into()))?;
	let (w, h) = fit_to_parent(canvas);
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")
		.map_err(FramesError::canvas)?
		.ok_or_else(|| FramesError::Canvas("2d context unsupported".into()))?
		.dyn_into()
		.map_err(|_| FramesError::Canvas("unexpected context type".into()))?;

	*state.borrow_mut() = Some(MoleculeState::new(scene, viewer, w, h));
	info!("scene created at {w}x{h}");

	let resize = ResizeListener::attach(&window, canvas.clone(), state.clone())?;
	debug!("resize listener attached");
	let frames = AnimationLoop::start(window, state.clone(), ctx)?;
	info!("animation started");

	Ok(Mounted {
		_resize: resize,
		_frames: frames,
	})
}

fn local_coords(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn set_cursor(canvas_ref: NodeRef<leptos::html::Canvas>, cursor: Cursor) {
	if let Some(canvas) = canvas_ref.get() {
		let canvas: HtmlCanvasElement = canvas.into();
		let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", cursor.css());
	}
}

/// The animated molecule for one dataset. Selection, denial and failure
/// messages are written into `detail`.
#[component]
pub fn MoleculeCanvas(
	#[prop(into)] dataset: Signal<Dataset>,
	topology: Topology,
	#[prop(into)] viewer: Signal<Viewer>,
	detail: WriteSignal<DetailView>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Shared = Rc::new(RefCell::new(None));
	let mounted = StoredValue::new_local(None::<Mounted>);

	let state_init = state.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let scene = dataset.with(|d| SceneGraph::build_or_demo(d, &topology));

		if let Some(s) = state_init.borrow_mut().as_mut() {
			s.replace_scene(scene);
			info!("scene rebuilt");
			return;
		}

		match mount(&canvas, &state_init, scene, viewer.get_untracked()) {
			Ok(m) => mounted.set_value(Some(m)),
			Err(err) => {
				error!("{err}");
				detail.set(DetailView::Failed(err.to_string()));
			}
		}
	});

	let state_viewer = state.clone();
	Effect::new(move |_| {
		let v = viewer.get();
		if let Some(ref mut s) = *state_viewer.borrow_mut() {
			s.viewer = v;
		}
	});

	on_cleanup(move || {
		mounted.try_update_value(|m| drop(m.take()));
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_coords(canvas_ref, &ev) else {
			return;
		};
		let view = state_md
			.borrow_mut()
			.as_mut()
			.and_then(|s| s.pointer_down(x, y));
		if let Some(view) = view {
			detail.set(view);
		}
		if state_md.borrow().as_ref().is_some_and(|s| s.drag.is_some()) {
			set_cursor(canvas_ref, Cursor::Grabbing);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_coords(canvas_ref, &ev) else {
			return;
		};
		let cursor = state_mm.borrow_mut().as_mut().map(|s| s.pointer_move(x, y));
		if let Some(cursor) = cursor {
			set_cursor(canvas_ref, cursor);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = local_coords(canvas_ref, &ev) else {
			return;
		};
		let (view, cursor) = match state_mu.borrow_mut().as_mut() {
			Some(s) => (s.pointer_up(x, y), Some(s.pointer_move(x, y))),
			None => (None, None),
		};
		if let Some(view) = view {
			detail.set(view);
		}
		if let Some(cursor) = cursor {
			set_cursor(canvas_ref, cursor);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_leave();
		}
		set_cursor(canvas_ref, Cursor::Default);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.wheel(ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="molecule-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block;"
		/>
	}
}
