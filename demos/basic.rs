//! Example: fill a pure-HTML template and print the result
//!
//! Run with `RUST_LOG=plate=debug` to see what the engine does.

use plate::{Config, Template};
use tracing_subscriber::EnvFilter;

const PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><title id="title">Placeholder</title></head>
  <body>
    <h1 class="name">nobody</h1>
    <ul>
      <li class="person">someone</li>
    </ul>
    <p class="name">nobody</p>
  </body>
</html>"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config {
        drop_whitespace_text: true,
        pretty_print: true,
        ..Config::default()
    };
    let mut template = Template::parse_with_config(PAGE, config)?;

    if let Some(title) = template.find_first("#title")? {
        template.replace_content_text(title, "Billy & Jane")?;
    }

    let names = template.find(".name")?;
    names.replace_content_text(&mut template, "tom")?;

    let people = vec!["Tom".to_string(), "Richard".to_string(), "Harry".to_string()];
    if let Some(person) = template.find_first(".person")? {
        template.repeat_node(person, &people, |node, name| node.replace_content_text(name))?;
    }

    println!("Plate v{}", plate::VERSION);
    template.render(&mut std::io::stdout())?;
    println!();
    Ok(())
}
