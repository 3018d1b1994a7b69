use std::f64::consts::PI;

use glam::Vec3;
use web_sys::CanvasRenderingContext2d;

use super::camera::Projected;
use super::scene::NodeIdx;
use super::state::{DENIED_COLOR, MoleculeState};
use super::types::NodeKind;

const BACKGROUND: &str = "#0a0a0f";
const CURVE_SEGMENTS: usize = 20;
const RING_SEGMENTS: usize = 64;

fn hex_rgb(hex: &str) -> (u8, u8, u8) {
	let hex = hex.trim_start_matches('#');
	let channel = |i: usize| {
		hex.get(i..i + 2)
			.and_then(|s| u8::from_str_radix(s, 16).ok())
			.unwrap_or(0xff)
	};
	(channel(0), channel(2), channel(4))
}

fn rgba(hex: &str, alpha: f64) -> String {
	let (r, g, b) = hex_rgb(hex);
	format!("rgba({r}, {g}, {b}, {:.3})", alpha.clamp(0.0, 1.0))
}

/// Linear fade between the camera's fog distances.
fn fog(state: &MoleculeState, depth: f32) -> f64 {
	let cfg = state.camera.config();
	let t = ((depth - cfg.fog_near) / (cfg.fog_far - cfg.fog_near)).clamp(0.0, 1.0);
	1.0 - 0.85 * t as f64
}

fn project(state: &MoleculeState, point: Vec3) -> Option<Projected> {
	state.camera.project(point, state.width, state.height)
}

pub fn render(state: &MoleculeState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_rings(state, ctx);
	draw_bonds(state, ctx);
	draw_particles(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_rings(state: &MoleculeState, ctx: &CanvasRenderingContext2d) {
	let Some(tier) = state.scene.topology.tiers.first().filter(|t| t.ring) else {
		return;
	};
	ctx.set_stroke_style_str(&rgba(tier.color, 0.1));
	ctx.set_line_width(2.0);
	ctx.begin_path();
	let mut pen_down = false;
	for i in 0..=RING_SEGMENTS {
		let angle = i as f32 / RING_SEGMENTS as f32 * std::f32::consts::TAU;
		let point = Vec3::new(angle.cos() * tier.radius, 0.0, angle.sin() * tier.radius);
		match project(state, point) {
			Some(p) if pen_down => ctx.line_to(p.x, p.y),
			Some(p) => {
				ctx.move_to(p.x, p.y);
				pen_down = true;
			}
			None => pen_down = false,
		}
	}
	ctx.stroke();
}

fn draw_bonds(state: &MoleculeState, ctx: &CanvasRenderingContext2d) {
	let opacity = state.scene.topology.bond.opacity as f64;
	for bond in &state.scene.bonds {
		let curve = state.scene.live_curve(bond);
		let Some(mid) = project(state, curve.point(0.5)) else {
			continue;
		};
		let highlighted = state
			.selected
			.is_some_and(|s| bond.touches(s));
		let alpha = opacity * fog(state, mid.depth) * if highlighted { 1.8 } else { 1.0 };

		ctx.set_stroke_style_str(&rgba(bond.band.color(), alpha));
		ctx.set_line_width((bond.thickness as f64 * mid.scale).max(0.5));
		ctx.begin_path();
		let mut pen_down = false;
		for i in 0..=CURVE_SEGMENTS {
			let t = i as f32 / CURVE_SEGMENTS as f32;
			match project(state, curve.point(t)) {
				Some(p) if pen_down => ctx.line_to(p.x, p.y),
				Some(p) => {
					ctx.move_to(p.x, p.y);
					pen_down = true;
				}
				None => pen_down = false,
			}
		}
		ctx.stroke();
	}
}

fn draw_particles(state: &MoleculeState, ctx: &CanvasRenderingContext2d) {
	let radius = state.scene.topology.bond.particle_radius as f64;
	for particle in &state.scene.particles {
		let Some(p) = project(state, particle.position) else {
			continue;
		};
		let band = state.scene.bonds[particle.bond].band;
		ctx.set_fill_style_str(&rgba(band.color(), 0.8 * fog(state, p.depth)));
		ctx.begin_path();
		let r = (radius * particle.scale as f64 * p.scale).max(0.75);
		let _ = ctx.arc(p.x, p.y, r, 0.0, 2.0 * PI);
		ctx.fill();
	}
}

fn wants_label(state: &MoleculeState, idx: NodeIdx, kind: NodeKind) -> bool {
	state.selected == Some(idx)
		|| state.hovered == Some(idx)
		|| kind == NodeKind::Nucleus
		|| state.scene.topology.tiers.first().is_some_and(|t| t.kind == kind)
}

fn draw_nodes(state: &MoleculeState, ctx: &CanvasRenderingContext2d) {
	let mut visible: Vec<(NodeIdx, Projected)> = state
		.scene
		.nodes
		.iter()
		.enumerate()
		.filter_map(|(idx, node)| project(state, node.position).map(|p| (idx, p)))
		.collect();
	// Painter's order: far nodes first.
	visible.sort_by(|a, b| b.1.depth.total_cmp(&a.1.depth));

	for (idx, p) in visible {
		let node = &state.scene.nodes[idx];
		let radius = node.render_radius as f64 * p.scale;
		let shade = fog(state, p.depth);
		let color = if state.flashing(idx) { DENIED_COLOR } else { node.color };
		let glow = node.emissive as f64;

		let glow_radius = radius * (1.3 + glow);
		if let Ok(gradient) = ctx.create_radial_gradient(p.x, p.y, radius * 0.5, p.x, p.y, glow_radius) {
			let _ = gradient.add_color_stop(0.0, &rgba(color, 0.45 * glow * shade));
			let _ = gradient.add_color_stop(1.0, &rgba(color, 0.0));
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, glow_radius, 0.0, 2.0 * PI);
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
			ctx.fill();
		}

		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&rgba(color, (0.55 + 0.45 * glow) * shade));
		ctx.fill();

		if node.kind() == NodeKind::Nucleus {
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, radius * 1.125, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(&rgba(color, 0.2 * shade));
			ctx.fill();
		}

		if state.selected == Some(idx) {
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, radius + 3.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("rgba(255, 255, 255, 0.7)");
			ctx.set_line_width(1.5);
			ctx.stroke();
		}

		if wants_label(state, idx, node.kind()) {
			ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {:.3})", 0.85 * shade));
			ctx.set_font(&format!("{}px sans-serif", (10.0 + radius * 0.15).min(16.0)));
			let _ = ctx.fill_text(node.payload.name(), p.x + radius + 4.0, p.y + 3.0);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rgba_from_hex() {
		assert_eq!(rgba("#10b981", 0.5), "rgba(16, 185, 129, 0.500)");
		assert_eq!(rgba("#ef4444", 2.0), "rgba(239, 68, 68, 1.000)");
	}

	#[test]
	fn malformed_hex_falls_back_to_white() {
		assert_eq!(hex_rgb("#12"), (0x12, 0xff, 0xff));
	}
}
