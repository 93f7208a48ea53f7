use std::rc::Rc;

use leptos::prelude::*;
use log::info;
use web_sys::MouseEvent;

use crate::components::floor_plan::{FloorPlanCanvas, SurfaceInbox};
use crate::wayfinding::{FloorData, VisualizationBridge, find_shortest_path};

const DEFAULT_START: &str = "H831";
const DEFAULT_END: &str = "H833";

/// Start/end picker bound to a node-id signal.
#[component]
fn NodeSelect(
	label: &'static str,
	nodes: Vec<String>,
	value: ReadSignal<String>,
	set_value: WriteSignal<String>,
) -> impl IntoView {
	view! {
		<label class="node-select">
			<span class="label">{label}</span>
			<select on:change=move |ev| set_value.set(event_target_value(&ev))>
				{nodes
					.into_iter()
					.map(|id| {
						let current = id.clone();
						let text = id.clone();
						view! {
							<option value=id selected=move || value.get() == current>
								{text}
							</option>
						}
					})
					.collect_view()}
			</select>
		</label>
	}
}

#[component]
fn FloorNavigator(floor: FloorData) -> impl IntoView {
	let inbox = SurfaceInbox::new();
	let nodes: Vec<String> = floor.graph.node_ids().map(ToString::to_string).collect();
	let pick = |preferred: &str| {
		if floor.graph.contains(preferred) {
			preferred.to_string()
		} else {
			nodes.first().cloned().unwrap_or_default()
		}
	};
	let (start, set_start) = signal(pick(DEFAULT_START));
	let (end, set_end) = signal(pick(DEFAULT_END));
	let (steps, set_steps) = signal(Vec::<String>::new());

	let graph = Rc::new(floor.graph);
	let bridge = VisualizationBridge::new(inbox.clone(), floor.coordinates);
	let find_path = move |_: MouseEvent| {
		let (from, to) = (start.get_untracked(), end.get_untracked());
		let route = find_shortest_path(&graph, &from, &to);
		info!("{from} -> {to}: {route}");
		bridge.show_route(&route);
		set_steps.set(route.display_steps());
	};

	view! {
		<div class="indoor-navigation">
			<h1 class="title">{format!("Indoor Navigation - {}", floor.name)}</h1>
			<div class="floor-plan-container">
				<FloorPlanCanvas inbox=inbox canvas=floor.canvas image=floor.image />
			</div>
			<div class="selectors">
				<NodeSelect label="Start:" nodes=nodes.clone() value=start set_value=set_start />
				<NodeSelect label="End:" nodes=nodes value=end set_value=set_end />
			</div>
			<button class="find-path" on:click=find_path>"Find Path"</button>
			<div class="result">
				<h2>"Navigation Path:"</h2>
				{move || {
					let steps = steps.get();
					if steps.is_empty() {
						return view! {
							<p class="no-path">"Press \"Find Path\" to calculate the route"</p>
						}
							.into_any();
					}
					let last = steps.len() - 1;
					view! {
						<ol class="path">
							{steps
								.into_iter()
								.enumerate()
								.map(|(i, step)| {
									view! {
										<li class="path-step">
											<span>{format!("{}. {}", i + 1, step)}</span>
											{(i < last).then(|| view! { <span class="arrow">"↓"</span> })}
										</li>
									}
								})
								.collect_view()}
						</ol>
					}
						.into_any()
				}}
			</div>
		</div>
	}
}

/// Indoor wayfinding page for the bundled floor.
#[component]
pub fn IndoorNavigation() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{FloorData::hall_8().map(|floor| view! { <FloorNavigator floor=floor /> })}
		</ErrorBoundary>
	}
}
