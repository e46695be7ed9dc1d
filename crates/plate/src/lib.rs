//! Plate
//!
//! Server-side templating over pure HTML. A designer writes an ordinary HTML
//! page; the server finds nodes with CSS selectors, replaces their content and
//! expands placeholder nodes once per item of a list.
//!
//! # Example
//! ```rust,ignore
//! use plate::Template;
//!
//! let mut template = Template::from_file("templates/main.html")?;
//!
//! if let Some(title) = template.find_first("#title")? {
//!     template.replace_content_text(title, "Billy & Jane")?;
//! }
//!
//! let names = template.find(".name")?;
//! names.replace_content_text(&mut template, "tom")?;
//!
//! if let Some(person) = template.find_first(".person")? {
//!     template.repeat_node(person, ["Tom", "Richard", "Harry"], |node, name| {
//!         node.replace_content_text(name)
//!     })?;
//! }
//!
//! template.render(&mut std::io::stdout())?;
//! ```

mod config;
mod error;
mod node;
mod node_set;
mod repeat;
mod template;

pub use config::Config;
pub use error::{Result, TemplateError};
pub use node::NodeMut;
pub use node_set::NodeSet;
pub use template::{NodeRef, Template};

// Re-export sub-crates for advanced usage
pub use plate_css as css;
pub use plate_dom as dom;
pub use plate_html as html;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
