use leptos::prelude::*;
use leptos::task::spawn_local;
use log::info;

use crate::api;
use crate::components::detail_panel::DetailPanel;
use crate::components::molecule::{
	Dataset, DetailView, MoleculeCanvas, ResearchNetwork, Topology, ViewMode, samples,
};
use crate::config::{ApiConfig, use_viewer};

/// The fetched network only lands while nothing else has been loaded; a
/// sample loaded in the meantime wins.
fn fetched_dataset(current: &Option<Dataset>, network: ResearchNetwork) -> Option<Dataset> {
	current.is_none().then(|| Dataset::Research(network))
}

/// Single-university molecule: the nucleus project with its projects,
/// teams, students and faculty.
#[component]
pub fn Dashboard() -> impl IntoView {
	let viewer = use_viewer();
	let dataset = RwSignal::new(None::<Dataset>);
	let (detail, set_detail) = signal(DetailView::Prompt(ViewMode::University));

	let university = viewer.get_untracked().university;
	spawn_local(async move {
		let network = api::load_network(&ApiConfig::from_window(), university.as_deref()).await;
		match dataset.with_untracked(|current| fetched_dataset(current, network)) {
			Some(fetched) => {
				dataset.set(Some(fetched));
				set_detail.set(DetailView::Prompt(ViewMode::University));
			}
			None => info!("sample data already loaded, discarding fetched network"),
		}
	});

	let load_sample = move |_| {
		info!("loading comprehensive sample data");
		let sample = Dataset::Research(samples::comprehensive_sample());
		set_detail.set(DetailView::loaded(&sample));
		dataset.set(Some(sample));
	};

	let scene_data = Signal::derive(move || {
		dataset
			.get()
			.unwrap_or_else(|| Dataset::Research(samples::demo_network()))
	});

	view! {
		<div class="molecule-page">
			<header class="molecule-header">
				<h1>"Research Network"</h1>
				<p class="subtitle">
					"Drag nodes to rearrange. Scroll to zoom. Drag the background to orbit."
				</p>
				<button class="load-sample" on:click=load_sample>
					"Load sample data"
				</button>
				<a href="/network">"Multi-university view"</a>
				<a href="/analytics">"Analytics"</a>
			</header>
			<main class="molecule-body">
				<div class="molecule-stage">
					<Show
						when=move || dataset.with(Option::is_some)
						fallback=|| view! { <p class="loading">"Loading network data..."</p> }
					>
						<MoleculeCanvas
							dataset=scene_data
							topology=Topology::research()
							viewer=viewer
							detail=set_detail
						/>
					</Show>
				</div>
				<DetailPanel detail=detail />
			</main>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fetch_fills_an_empty_dashboard() {
		let fetched = fetched_dataset(&None, samples::demo_network());
		assert_eq!(fetched, Some(Dataset::Research(samples::demo_network())));
	}

	#[test]
	fn fetch_never_replaces_a_loaded_sample() {
		let sample = Some(Dataset::Research(samples::comprehensive_sample()));
		assert_eq!(fetched_dataset(&sample, samples::demo_network()), None);
	}
}
