use crate::config::Config;
use crate::index;

pub fn run(config: &Config, compact: bool) -> anyhow::Result<()> {
    let brain = config.data_root();
    anyhow::ensure!(
        brain.is_dir(),
        "data root not found at {} (create it or set paths.data_root)",
        brain.display()
    );

    let output = if compact { index::format_compact(&brain) } else { index::format_full(&brain) };
    println!("{}", output);
    Ok(())
}
