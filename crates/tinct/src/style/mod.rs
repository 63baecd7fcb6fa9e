//! Style descriptors.
//!
//! Every style directory carries exactly one JSON descriptor naming the
//! style, its default theme, its stylesheet template and the variables,
//! palette rules and resource variants that the pipeline consumes.
//!
//! ```json
//! {
//!     "name": "Demo",
//!     "default_theme": "dark_teal",
//!     "css_template": "demo.css",
//!     "variables": { "pad": "4px" },
//!     "resources": {
//!         "primary": { "#ff0000": "primaryColor" },
//!         "disabled": { "#ff0000": "#9e9e9e" }
//!     }
//! }
//! ```

mod descriptor;

pub use descriptor::{load_descriptor, parse_descriptor, StyleDescriptor};
pub(crate) use descriptor::string_map;
