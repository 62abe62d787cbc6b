use clap::Args;

use emporium::prelude::Wizard;

use super::ScriptArgs;

#[derive(Debug, Args)]
pub(crate) struct PreviewArgs {
    #[command(flatten)]
    script: ScriptArgs,
}

pub(crate) fn run(args: &PreviewArgs) -> Result<(), String> {
    let script = args.script.load()?;
    let mut wizard = Wizard::new(args.script.mode());

    let draft = script.run(&mut wizard).map_err(|error| error.to_string())?;

    let payload = serde_json::to_string_pretty(&draft)
        .map_err(|error| format!("failed to render payload: {error}"))?;

    println!("{payload}");

    Ok(())
}
