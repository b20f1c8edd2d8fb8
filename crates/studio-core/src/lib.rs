pub mod category;
pub mod id;
pub mod model;
pub mod svg;
pub mod template;
pub mod tone;

pub use category::{CATEGORIES, Category, find_category};
pub use id::{ElementId, PageId};
pub use model::*;
pub use svg::render_page_svg;
pub use template::{Template, TemplateCatalog, TemplateSummary};
pub use tone::{Tone, TonePreset};
