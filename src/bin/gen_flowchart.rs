use anyhow::{Context, Result};
use flowchart_backend::flowchart_from_input;
use std::io::Write;

fn main() -> Result<()> {
    let files = std::env::args()
        .skip(1)
        .map(|path| {
            std::fs::read_to_string(&path).with_context(|| format!("unable to read {}", path))
        })
        .collect::<Result<Vec<String>>>()?;
    let code = files.join("\n");

    let mermaid = flowchart_from_input(&code);
    let mut file =
        std::fs::File::create("flowchart.mmd").context("unable to create flowchart.mmd")?;
    file.write_all(mermaid.as_bytes())
        .context("unable to write")?;
    file.flush().context("unable to flush")?;
    Ok(())
}
