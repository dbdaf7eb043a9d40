pub mod config;
pub mod extract;
pub mod index;
pub mod mark;
pub mod persona;
pub mod resource;
pub mod route;
pub mod unprocessed;

/// Today's date in the journal format, for defaulted --date flags.
pub(crate) fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Read all of stdin, trimmed.
pub(crate) fn read_stdin() -> anyhow::Result<String> {
    use std::io::Read;
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    Ok(input.trim().to_string())
}
