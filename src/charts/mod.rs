//! Charts module - 3D star map rendering

mod colormap;
mod plotter;
mod renderer;
mod scene;

pub use colormap::viridis;
pub use plotter::{SceneCamera, ScenePlotter, EARTH_COLOR};
pub use renderer::{RenderError, StaticSceneRenderer};
pub use scene::{PlottedStar, SceneData};
