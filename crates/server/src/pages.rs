//! Page rendering: templates embedded in the binary, rendered with minijinja.

use anyhow::{Context, Result};
use minijinja::Environment;
use rust_embed::RustEmbed;
use serde::Serialize;

const INDEX: &str = "index.html";

/// Embedded page templates
#[derive(RustEmbed)]
#[folder = "templates"]
struct Templates;

/// What the index page shows
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct IndexView {
    pub topic: Option<String>,
    pub blog_content: Option<String>,
    pub error: Option<String>,
}

impl IndexView {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn content(topic: impl Into<String>, blog_content: impl Into<String>) -> Self {
        Self {
            topic: Some(topic.into()),
            blog_content: Some(blog_content.into()),
            error: None,
        }
    }
}

/// Compiled templates; `.html` templates auto-escape their values
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn load() -> Result<Self> {
        let mut env = Environment::new();
        for name in Templates::iter() {
            let file = Templates::get(&name).with_context(|| format!("template '{name}' vanished"))?;
            let source = String::from_utf8(file.data.into_owned())
                .with_context(|| format!("template '{name}' is not UTF-8"))?;
            env.add_template_owned(name.to_string(), source)
                .with_context(|| format!("template '{name}' does not compile"))?;
        }
        env.get_template(INDEX).context("index template missing")?;
        Ok(Self { env })
    }

    pub fn index(&self, view: &IndexView) -> Result<String, minijinja::Error> {
        self.env.get_template(INDEX)?.render(view)
    }
}
