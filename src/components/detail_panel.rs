use leptos::prelude::*;

use crate::components::molecule::{BondSummary, DetailLine, DetailView, NodeDetail, ViewMode};

fn denied_block(mode: ViewMode) -> impl IntoView {
	let (title, line1, line2) = DetailView::denied_text(mode);
	view! {
		<div class="denied">
			<p class="denied-title">{format!("⚠️ {title}")}</p>
			<p class="small">{line1}</p>
			<p class="small">{line2}</p>
		</div>
	}
}

fn line_view(line: DetailLine) -> impl IntoView {
	let style = line.color.map(|c| format!("color: {c};")).unwrap_or_default();
	view! { <p style=style>{line.text}</p> }
}

fn bond_view(bond: BondSummary) -> impl IntoView {
	view! {
		<li class="bond">
			<span class="bond-name">{bond.other_name}</span>
			<span
				class="bond-energy"
				title=bond.band.label()
				style=format!("color: {};", bond.band.color())
			>
				{format!("{}% energy loss", bond.energy_pct)}
			</span>
			<span class="bond-strength">{format!("{} {}%", bond.bar, bond.strength_pct)}</span>
			<span class="bond-label">{bond.label}</span>
		</li>
	}
}

fn node_view(detail: NodeDetail) -> impl IntoView {
	let denied = detail.denied.map(denied_block);
	let more = (detail.more > 0).then(|| view! { <p class="small">{format!("...and {} more", detail.more)}</p> });
	view! {
		<div class="node-detail">
			{denied}
			<strong class="title">{detail.title}</strong>
			<span class="kind">{detail.kind_label}</span>
			{detail.lines.into_iter().map(line_view).collect_view()}
			<p class="bond-heading">{format!("{} ({})", detail.bond_heading, detail.bond_count)}</p>
			<ul class="bonds">{detail.bonds.into_iter().map(bond_view).collect_view()}</ul>
			{more}
		</div>
	}
}

/// Side panel mirroring the canvas selection.
#[component]
pub fn DetailPanel(#[prop(into)] detail: Signal<DetailView>) -> impl IntoView {
	view! {
		<aside class="detail-panel">
			{move || match detail.get() {
				DetailView::Prompt(mode) => view! { <p>{DetailView::prompt_text(mode)}</p> }.into_any(),
				DetailView::Loaded { headline, counts, note } => view! {
					<div class="loaded">
						<p class="loaded-title">{format!("✓ {headline}")}</p>
						<ul>
							{counts
								.into_iter()
								.map(|(n, what)| view! { <li><strong>{n}</strong>" "{what}</li> })
								.collect_view()}
						</ul>
						{note.map(|n| view! { <p class="small">{n}</p> })}
					</div>
				}
				.into_any(),
				DetailView::Node(detail) => node_view(detail).into_any(),
				DetailView::Denied(mode) => denied_block(mode).into_any(),
				DetailView::Failed(message) => view! {
					<div class="failed">
						<p class="failed-title">"Error loading visualization"</p>
						<p class="small">{message}</p>
						<p class="small">"Check browser console for details."</p>
					</div>
				}
				.into_any(),
			}}
		</aside>
	}
}
