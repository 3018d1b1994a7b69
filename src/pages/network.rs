use leptos::prelude::*;

use crate::components::detail_panel::DetailPanel;
use crate::components::molecule::{Dataset, DetailView, MoleculeCanvas, Topology, samples};
use crate::config::use_viewer;

/// Consortium of partner universities around the lead institution.
#[component]
pub fn Network() -> impl IntoView {
	let viewer = use_viewer();
	let consortium = Dataset::Consortium(samples::demo_consortium());
	let (detail, set_detail) = signal(DetailView::loaded(&consortium));
	let dataset = Signal::derive(move || consortium.clone());

	view! {
		<div class="molecule-page">
			<header class="molecule-header">
				<h1>"Multi-University Network"</h1>
				<p class="subtitle">"Universities orbit the lead institution. Researchers may rearrange them."</p>
				<a href="/">"University dashboard"</a>
				<a href="/analytics">"Analytics"</a>
			</header>
			<main class="molecule-body">
				<div class="molecule-stage">
					<MoleculeCanvas
						dataset=dataset
						topology=Topology::consortium()
						viewer=viewer
						detail=set_detail
					/>
				</div>
				<DetailPanel detail=detail />
			</main>
		</div>
	}
}
