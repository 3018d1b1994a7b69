mod builder;
mod camera;
mod component;
mod energy;
mod interaction;
mod render;
pub mod samples;
mod scene;
mod state;
mod topology;
mod types;

pub use component::MoleculeCanvas;
pub use interaction::{BondSummary, DetailLine, DetailView, NodeDetail, Role, Viewer};
pub use topology::{Topology, ViewMode};
pub use types::{Dataset, ResearchNetwork};
