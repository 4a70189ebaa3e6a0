//! View module - selection keys and the dispatcher that turns them into
//! render payloads

mod payload;
mod resolver;
mod selection;

pub use payload::{ChartKind, ChartSeries, ChartSpec, ImageRef, RenderPayload, ValueFormat};
pub use resolver::{resolve, ResolveError};
pub use selection::{InvalidSelection, SelectionKey};
