use crate::tasks;

pub fn run(
    task: Option<&str>,
    use_stdin: bool,
    project: Option<&str>,
    date: Option<&str>,
) -> anyhow::Result<()> {
    let text = if use_stdin {
        super::read_stdin()?
    } else {
        match task {
            Some(task) => task.to_string(),
            None => anyhow::bail!("provide task text or use --stdin"),
        }
    };

    let routed = tasks::route_task(&text, project, date);
    println!("{}", serde_json::to_string_pretty(&routed)?);
    Ok(())
}
