use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use crate::analytics::{
	Catalog, ChartKind, DataPoint, FilterOption, FilterOptions, Filters, Insights, Outcome, Query,
	bar_share, chart_heading, suggested_chart,
};
use crate::api;
use crate::config::{ApiConfig, use_viewer};

/// A finished query, ready to draw.
#[derive(Clone, Debug, PartialEq)]
struct Chart {
	title: String,
	subtitle: String,
	kind: ChartKind,
	outcome: Outcome,
}

fn option_list(options: &[FilterOption]) -> impl IntoView + use<> {
	options
		.iter()
		.map(|o| view! { <option value=o.id.clone()>{o.name.clone()}</option> })
		.collect_view()
}

/// Bar values are raw for bars and percent of the total for shares.
fn bar_rows(kind: ChartKind, data: &[DataPoint]) -> Vec<(String, String, f64)> {
	let total: f64 = data.iter().map(|d| d.value).sum();
	let max = data.iter().map(|d| d.value).fold(0.0, f64::max);
	data.iter()
		.map(|d| {
			let shown = match kind {
				ChartKind::Bar => format!("{}", d.value),
				ChartKind::Doughnut if total > 0.0 => {
					format!("{} ({:.1}%)", d.value, d.value / total * 100.0)
				}
				ChartKind::Doughnut => format!("{}", d.value),
			};
			(d.display_label(), shown, bar_share(d.value, max))
		})
		.collect()
}

fn chart_view(chart: Chart) -> impl IntoView {
	let rows = bar_rows(chart.kind, &chart.outcome.data);
	let insights = match Insights::of(&chart.outcome.data) {
		Some(insights) => view! {
			<ul class="insights">
				{insights
					.lines()
					.into_iter()
					.map(|(name, text)| view! { <li><strong>{format!("{name}:")}</strong>" "{text}</li> })
					.collect_view()}
			</ul>
		}
		.into_any(),
		None => view! { <p class="hint">"No data available for the selected criteria."</p> }.into_any(),
	};
	view! {
		<section class="chart">
			<h2 class="chart-title">{chart.title}</h2>
			<p class="chart-subtitle">{chart.subtitle}</p>
			<ul class="bars">
				{rows
					.into_iter()
					.map(|(label, shown, share)| view! {
						<li class="bar-row">
							<span class="bar-label">{label}</span>
							<span class="bar" style=format!("width: {share:.1}%;")></span>
							<span class="bar-value">{shown}</span>
						</li>
					})
					.collect_view()}
			</ul>
			{insights}
		</section>
	}
}

/// Comparative analytics: choose a metric, optionally group and filter it,
/// and read the aggregated result with summary insights.
#[component]
pub fn Analytics() -> impl IntoView {
	let viewer = use_viewer();
	let catalog = RwSignal::new(Catalog::default());
	let options = RwSignal::new(FilterOptions::default());

	let metric = RwSignal::new(String::new());
	let group_by = RwSignal::new(String::new());
	let university = RwSignal::new(viewer.get_untracked().university.unwrap_or_default());
	let project = RwSignal::new(String::new());
	let team = RwSignal::new(String::new());

	let chart = RwSignal::new(None::<Chart>);
	let error = RwSignal::new(None::<String>);
	let loading = RwSignal::new(false);

	spawn_local(async move {
		let api = ApiConfig::from_window();
		catalog.set(api::load_catalog(&api).await);
		options.set(api::load_filter_options(&api).await);
	});

	let heading = move || {
		viewer.with(|v| match &v.university {
			Some(id) => format!("{id} Analytics"),
			None => "Research Analytics".to_string(),
		})
	};

	let hint = move || {
		let m = metric.get();
		catalog.with(|c| c.metric(&m).map(|m| m.description.clone()).unwrap_or_default())
	};

	let group_options = move || {
		let m = metric.get();
		catalog.with(|c| {
			c.group_by_options(&m)
				.into_iter()
				.map(|d| view! { <option value=d.value.clone()>{d.label.clone()}</option> })
				.collect_view()
		})
	};

	let update = move |_| {
		let filters = Filters::from_selects(
			&university.get_untracked(),
			&project.get_untracked(),
			&team.get_untracked(),
		);
		let Some(query) = Query::from_selects(&metric.get_untracked(), &group_by.get_untracked(), filters)
		else {
			error.set(Some("Please select a metric to visualize".into()));
			return;
		};
		error.set(None);
		loading.set(true);
		spawn_local(async move {
			match api::query_analytics(&ApiConfig::from_window(), &query).await {
				Ok(outcome) => {
					let (title, subtitle) = catalog
						.with_untracked(|c| options.with_untracked(|o| chart_heading(c, o, &query)));
					chart.set(Some(Chart {
						title,
						subtitle,
						kind: suggested_chart(&query.metric),
						outcome,
					}));
				}
				Err(err) => {
					warn!("analytics query failed: {err}");
					error.set(Some(err.to_string()));
				}
			}
			loading.set(false);
		});
	};

	view! {
		<div class="analytics-page">
			<header class="molecule-header">
				<h1>{heading}</h1>
				<a href="/">"University dashboard"</a>
				<a href="/network">"Multi-university view"</a>
			</header>
			<main class="analytics-body">
				<form class="analytics-controls" on:submit=|ev| ev.prevent_default()>
					<label>
						"Metric"
						<select
							prop:value=move || metric.get()
							on:change=move |ev| {
								metric.set(event_target_value(&ev));
								group_by.set(String::new());
							}
						>
							<option value="">"Select a metric"</option>
							{move || catalog.with(|c| {
								c.metrics
									.iter()
									.map(|m| view! { <option value=m.value.clone()>{m.label.clone()}</option> })
									.collect_view()
							})}
						</select>
					</label>
					<p class="hint">{hint}</p>
					<label>
						"Group by"
						<select
							prop:value=move || group_by.get()
							on:change=move |ev| group_by.set(event_target_value(&ev))
						>
							<option value="">"No grouping (total only)"</option>
							{group_options}
						</select>
					</label>
					<label>
						"University"
						<select
							prop:value=move || university.get()
							on:change=move |ev| university.set(event_target_value(&ev))
						>
							<option value="">"All universities"</option>
							{move || options.with(|o| option_list(&o.universities))}
						</select>
					</label>
					<label>
						"Project"
						<select
							prop:value=move || project.get()
							on:change=move |ev| project.set(event_target_value(&ev))
						>
							<option value="">"All projects"</option>
							{move || options.with(|o| option_list(&o.projects))}
						</select>
					</label>
					<label>
						"Team"
						<select prop:value=move || team.get() on:change=move |ev| team.set(event_target_value(&ev))>
							<option value="">"All teams"</option>
							{move || options.with(|o| option_list(&o.teams))}
						</select>
					</label>
					<button type="button" on:click=update disabled=move || loading.get()>
						{move || if loading.get() { "Loading..." } else { "Update chart" }}
					</button>
				</form>
				{move || error.get().map(|message| view! { <p class="failed">{message}</p> })}
				{move || match chart.get() {
					Some(c) => chart_view(c).into_any(),
					None => view! { <p class="hint">"Choose a metric and press Update chart."</p> }.into_any(),
				}}
			</main>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn point(label: &str, value: f64) -> DataPoint {
		DataPoint {
			label: Some(label.into()),
			value,
			..DataPoint::default()
		}
	}

	#[test]
	fn shares_show_percent_of_total() {
		let rows = bar_rows(ChartKind::Doughnut, &[point("incoming", 1.0), point("established", 3.0)]);
		assert_eq!(rows[0].0, "incoming");
		assert_eq!(rows[0].1, "1 (25.0%)");
		assert!((rows[0].2 - 33.333).abs() < 1e-2);
		assert_eq!(rows[1], ("established".into(), "3 (75.0%)".into(), 100.0));
	}

	#[test]
	fn bars_show_raw_values() {
		let rows = bar_rows(ChartKind::Bar, &[point("Software", 2.5)]);
		assert_eq!(rows, vec![("Software".into(), "2.5".into(), 100.0)]);
	}

	#[test]
	fn all_zero_shares_do_not_divide_by_zero() {
		let rows = bar_rows(ChartKind::Doughnut, &[point("none", 0.0)]);
		assert_eq!(rows, vec![("none".into(), "0".into(), 0.0)]);
	}
}
