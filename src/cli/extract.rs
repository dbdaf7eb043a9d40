use std::path::Path;

use crate::config::Config;
use crate::render;
use crate::transcript::parser;

pub fn run(config: &Config, file: &Path) -> anyhow::Result<()> {
    anyhow::ensure!(file.exists(), "file not found: {}", file.display());

    let session = parser::extract_session(file, config.extract.max_assistant_text_len)?;
    println!("{}", render::render_markdown(&session));
    Ok(())
}
