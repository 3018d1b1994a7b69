use glam::Vec3;
use log::info;

use super::camera::{Camera, Plane};
use super::interaction::{self, DetailView, Viewer};
use super::scene::{NodeIdx, SceneGraph};

/// Pointer travel, in pixels, below which a press-and-release is a click.
pub const CLICK_SLOP: f64 = 4.0;
/// How long a node stays red after a refused drag.
pub const DENIED_FLASH_MS: f64 = 200.0;
pub const DENIED_COLOR: &str = "#ff0000";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
	Default,
	Pointer,
	Grab,
	Grabbing,
}

impl Cursor {
	pub fn css(self) -> &'static str {
		match self {
			Self::Default => "default",
			Self::Pointer => "pointer",
			Self::Grab => "grab",
			Self::Grabbing => "grabbing",
		}
	}
}

#[derive(Clone, Debug)]
pub struct DragState {
	pub node: NodeIdx,
	pub plane: Plane,
	/// Node position minus the grab point, kept while dragging.
	pub offset: Vec3,
}

/// Background press: orbits the camera, or deselects if it never moves.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub last_x: f64,
	pub last_y: f64,
	pub travelled: f64,
}

/// A press on a node the viewer may not drag. Released, it still selects.
#[derive(Clone, Copy, Debug)]
pub struct RefusedPress {
	pub node: NodeIdx,
}

#[derive(Clone, Copy, Debug)]
pub struct Flash {
	pub node: NodeIdx,
	pub until_ms: f64,
}

pub struct MoleculeState {
	pub scene: SceneGraph,
	pub camera: Camera,
	pub viewer: Viewer,
	pub drag: Option<DragState>,
	pub pan: Option<PanState>,
	pub refused: Option<RefusedPress>,
	pub flash: Option<Flash>,
	pub selected: Option<NodeIdx>,
	pub hovered: Option<NodeIdx>,
	pub width: f64,
	pub height: f64,
	pub now_ms: f64,
}

impl MoleculeState {
	pub fn new(scene: SceneGraph, viewer: Viewer, width: f64, height: f64) -> Self {
		let camera = Camera::new(&scene.topology.camera);
		Self {
			scene,
			camera,
			viewer,
			drag: None,
			pan: None,
			refused: None,
			flash: None,
			selected: None,
			hovered: None,
			width,
			height,
			now_ms: 0.0,
		}
	}

	/// Swap in a freshly built scene. Selection, drag and hover all refer to
	/// node indices of the old scene, so they are dropped with it.
	pub fn replace_scene(&mut self, scene: SceneGraph) {
		self.scene = scene;
		self.drag = None;
		self.pan = None;
		self.refused = None;
		self.flash = None;
		self.selected = None;
		self.hovered = None;
		self.camera.enabled = true;
		self.camera.auto_rotate = true;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	fn node_at(&self, x: f64, y: f64) -> Option<NodeIdx> {
		let ray = self.camera.ray(x, y, self.width, self.height);
		self.scene.pick(&ray)
	}

	fn may_drag(&self) -> bool {
		self.viewer.can_drag(self.scene.topology.mode)
	}

	pub fn select(&mut self, idx: NodeIdx) -> DetailView {
		self.restore_selected_emissive();
		self.selected = Some(idx);
		self.camera.auto_rotate = false;
		let selected_emissive = self.scene.topology.selected_emissive;
		if let Some(node) = self.scene.nodes.get_mut(idx) {
			node.emissive = selected_emissive;
		}
		match interaction::describe(&self.scene, idx) {
			Some(detail) => DetailView::Node(detail),
			None => DetailView::Prompt(self.scene.topology.mode),
		}
	}

	pub fn deselect(&mut self) -> DetailView {
		self.restore_selected_emissive();
		self.selected = None;
		self.camera.auto_rotate = true;
		DetailView::Prompt(self.scene.topology.mode)
	}

	fn restore_selected_emissive(&mut self) {
		let Some(prev) = self.selected else {
			return;
		};
		if let Some(node) = self.scene.nodes.get(prev) {
			let base = self.scene.topology.base_emissive(node.kind());
			self.scene.nodes[prev].emissive = base;
		}
	}

	/// Press: start a drag when permitted, flash and explain when not, or
	/// begin a background orbit on empty space.
	pub fn pointer_down(&mut self, x: f64, y: f64) -> Option<DetailView> {
		let Some(idx) = self.node_at(x, y) else {
			self.pan = Some(PanState {
				last_x: x,
				last_y: y,
				travelled: 0.0,
			});
			return None;
		};

		if !self.may_drag() {
			info!("permission denied: cannot drag {}", self.scene.nodes[idx].id());
			self.flash = Some(Flash {
				node: idx,
				until_ms: self.now_ms + DENIED_FLASH_MS,
			});
			self.refused = Some(RefusedPress { node: idx });
			return Some(DetailView::Denied(self.scene.topology.mode));
		}

		let position = self.scene.nodes[idx].position;
		let plane = self.camera.facing_plane(position);
		let ray = self.camera.ray(x, y, self.width, self.height);
		let offset = ray
			.intersect_plane(&plane)
			.map(|hit| position - hit)
			.unwrap_or(Vec3::ZERO);
		self.drag = Some(DragState {
			node: idx,
			plane,
			offset,
		});
		self.camera.auto_rotate = false;
		self.camera.enabled = false;
		None
	}

	/// Move: drag the held node across its camera-facing plane, orbit the
	/// camera, or just update hover. Returns the cursor to show.
	pub fn pointer_move(&mut self, x: f64, y: f64) -> Cursor {
		if let Some(drag) = &self.drag {
			let ray = self.camera.ray(x, y, self.width, self.height);
			if let Some(hit) = ray.intersect_plane(&drag.plane) {
				let node = drag.node;
				self.scene.move_node(node, hit + drag.offset);
				self.scene.refresh_bonds_of(node);
			}
			return Cursor::Grabbing;
		}

		if let Some(pan) = self.pan.as_mut() {
			let (dx, dy) = (x - pan.last_x, y - pan.last_y);
			pan.travelled += (dx * dx + dy * dy).sqrt();
			pan.last_x = x;
			pan.last_y = y;
			self.camera.rotate(dx, dy);
			return Cursor::Default;
		}

		self.hovered = self.node_at(x, y);
		match self.hovered {
			Some(_) if self.may_drag() => Cursor::Grab,
			Some(_) => Cursor::Pointer,
			None => Cursor::Default,
		}
	}

	/// Release: finishing a drag (or a click, which is a drag that never
	/// moved) selects the node; a still click on empty space deselects.
	pub fn pointer_up(&mut self, _x: f64, _y: f64) -> Option<DetailView> {
		if let Some(drag) = self.drag.take() {
			self.camera.enabled = true;
			self.camera.auto_rotate = true;
			return Some(self.select(drag.node));
		}

		if let Some(refused) = self.refused.take() {
			let mut view = self.select(refused.node);
			if let DetailView::Node(detail) = &mut view {
				detail.denied = Some(self.scene.topology.mode);
			}
			return Some(view);
		}

		if let Some(pan) = self.pan.take() {
			if pan.travelled < CLICK_SLOP {
				return Some(self.deselect());
			}
		}
		None
	}

	/// Pointer left the canvas: abandon any gesture without selecting.
	pub fn pointer_leave(&mut self) {
		if self.drag.take().is_some() {
			self.camera.enabled = true;
			self.camera.auto_rotate = self.selected.is_none();
		}
		self.pan = None;
		self.refused = None;
		self.hovered = None;
	}

	pub fn wheel(&mut self, delta_y: f64) {
		let factor = if delta_y > 0.0 { 1.1 } else { 0.9 };
		self.camera.zoom(factor);
	}

	pub fn held(&self) -> Option<NodeIdx> {
		self.drag.as_ref().map(|d| d.node)
	}

	pub fn flashing(&self, idx: NodeIdx) -> bool {
		self.flash.is_some_and(|f| f.node == idx && self.now_ms < f.until_ms)
	}

	pub fn tick(&mut self, now_ms: f64) {
		self.now_ms = now_ms;
		self.camera.update();
		let held = self.held();
		self.scene.tick(now_ms, held, self.selected);
		if self.flash.is_some_and(|f| now_ms >= f.until_ms) {
			self.flash = None;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::molecule::interaction::Role;
	use crate::components::molecule::samples;
	use crate::components::molecule::topology::{Topology, ViewMode};
	use crate::components::molecule::types::Dataset;

	const W: f64 = 800.0;
	const H: f64 = 600.0;

	fn research_state(viewer: Viewer) -> MoleculeState {
		let scene = SceneGraph::build(
			&Dataset::Research(samples::demo_network()),
			&Topology::research(),
		);
		MoleculeState::new(scene, viewer, W, H)
	}

	fn consortium_state(viewer: Viewer) -> MoleculeState {
		let scene = SceneGraph::build(
			&Dataset::Consortium(samples::demo_consortium()),
			&Topology::consortium(),
		);
		MoleculeState::new(scene, viewer, W, H)
	}

	fn screen_of(state: &MoleculeState, idx: NodeIdx) -> (f64, f64) {
		let p = state
			.camera
			.project(state.scene.nodes[idx].position, W, H)
			.unwrap();
		(p.x, p.y)
	}

	#[test]
	fn drag_moves_node_and_only_its_bonds() {
		let mut state = research_state(Viewer::researcher());
		let idx = state.scene.lookup("CubeSat2").unwrap();
		let before: Vec<_> = state.scene.bonds.iter().map(|b| b.curve).collect();
		let start = state.scene.nodes[idx].position;

		let (x, y) = screen_of(&state, idx);
		assert!(state.pointer_down(x, y).is_none());
		assert_eq!(state.held(), Some(idx));
		let drag = state.drag.as_ref().unwrap();
		let grab = state.camera.ray(x, y, W, H).intersect_plane(&drag.plane).unwrap();
		assert!((grab + drag.offset).distance(start) < 1e-2);
		assert!(!state.camera.enabled);
		assert!(!state.camera.auto_rotate);

		assert_eq!(state.pointer_move(x + 40.0, y - 25.0), Cursor::Grabbing);
		let moved = state.scene.nodes[idx].position;
		assert!(moved.distance(start) > 1.0);

		for (bond, old) in state.scene.bonds.iter().zip(&before) {
			if bond.touches(idx) {
				let end = if bond.from == idx { bond.curve.start } else { bond.curve.end };
				assert_eq!(end, moved);
			} else {
				assert_eq!(bond.curve, *old);
			}
		}

		let view = state.pointer_up(x + 40.0, y - 25.0);
		assert!(matches!(view, Some(DetailView::Node(ref d)) if d.title == "CubeSat Mission 2"));
		assert_eq!(state.selected, Some(idx));
		assert!(state.camera.enabled);
		assert!(!state.camera.auto_rotate);
		assert!(state.held().is_none());
	}

	#[test]
	fn still_press_selects_like_a_click() {
		let mut state = research_state(Viewer::researcher());
		let idx = state.scene.lookup("CubeSat1").unwrap();
		let (x, y) = screen_of(&state, idx);
		state.pointer_down(x, y);
		let view = state.pointer_up(x, y);
		let Some(DetailView::Node(detail)) = view else {
			panic!("expected node detail");
		};
		assert_eq!(detail.title, "CubeSat Mission 1");
		assert_eq!(state.scene.nodes[idx].emissive, 0.8);
	}

	#[test]
	fn refused_drag_flashes_without_moving() {
		let mut state = consortium_state(Viewer::member(Some("TexasState".into())));
		let idx = state.scene.lookup("Columbia").unwrap();
		let start = state.scene.nodes[idx].position;
		let (x, y) = screen_of(&state, idx);

		let view = state.pointer_down(x, y);
		assert_eq!(view, Some(DetailView::Denied(ViewMode::Consortium)));
		assert!(state.flashing(idx));
		assert!(state.held().is_none());

		state.pointer_move(x + 50.0, y + 50.0);
		assert_eq!(state.scene.nodes[idx].position, start);

		let Some(DetailView::Node(detail)) = state.pointer_up(x + 50.0, y + 50.0) else {
			panic!("expected node detail");
		};
		assert_eq!(detail.denied, Some(ViewMode::Consortium));

		state.tick(DENIED_FLASH_MS + 1.0);
		assert!(!state.flashing(idx));
	}

	#[test]
	fn empty_click_deselects_and_resumes_rotation() {
		let mut state = research_state(Viewer { role: Role::Member, university: None });
		let idx = state.scene.lookup("PROVES").unwrap();
		state.select(idx);
		assert!(!state.camera.auto_rotate);

		assert!(state.pointer_down(2.0, 2.0).is_none());
		let view = state.pointer_up(2.0, 2.0);
		assert_eq!(view, Some(DetailView::Prompt(ViewMode::University)));
		assert!(state.selected.is_none());
		assert!(state.camera.auto_rotate);
		assert_eq!(state.scene.nodes[idx].emissive, 0.5);
	}

	#[test]
	fn background_drag_orbits_without_deselecting() {
		let mut state = research_state(Viewer::researcher());
		let idx = state.scene.lookup("PROVES").unwrap();
		state.select(idx);
		state.pointer_down(2.0, 2.0);
		state.pointer_move(60.0, 2.0);
		assert!(state.pointer_up(60.0, 2.0).is_none());
		assert_eq!(state.selected, Some(idx));
	}

	#[test]
	fn hover_cursor_reflects_permission() {
		let mut member = consortium_state(Viewer::member(None));
		let idx = member.scene.lookup("CalPolyPomona").unwrap();
		let (x, y) = screen_of(&member, idx);
		assert_eq!(member.pointer_move(x, y), Cursor::Pointer);
		assert_eq!(member.pointer_move(1.0, 1.0), Cursor::Default);

		let mut researcher = consortium_state(Viewer::researcher());
		assert_eq!(researcher.pointer_move(x, y), Cursor::Grab);
	}

	#[test]
	fn replacing_scene_drops_gesture_state() {
		let mut state = research_state(Viewer::researcher());
		let idx = state.scene.lookup("CubeSat1").unwrap();
		let (x, y) = screen_of(&state, idx);
		state.pointer_down(x, y);
		state.replace_scene(SceneGraph::build(
			&Dataset::Research(samples::comprehensive_sample()),
			&Topology::research(),
		));
		assert!(state.held().is_none());
		assert!(state.selected.is_none());
		assert!(state.camera.enabled);
		assert_eq!(state.scene.nodes.len(), 41);
		assert!(state.pointer_up(x, y).is_none());
	}
}
