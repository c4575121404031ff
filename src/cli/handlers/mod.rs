use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::editor::Editor;
use crate::io::env::SystemEnv;
use crate::model::config::SliceConfig;
use crate::ops::session;
use crate::ops::slice::{SliceKind, SliceSpec};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&cli)?;
    let json = cli.json;

    let spec = match cli.command {
        Commands::All => SliceSpec::new(SliceKind::All),
        Commands::Match(args) => SliceSpec::matching(&args.criteria)?,
        Commands::Future => SliceSpec::new(SliceKind::Future),
        Commands::Review => SliceSpec::new(SliceKind::Review),
        Commands::List(args) => SliceSpec::listing(&args.terms),
    };

    cmd_slice(&config, &spec, json)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Config file and environment, then command-line flags on top
fn load_config(cli: &Cli) -> Result<SliceConfig, Box<dyn std::error::Error>> {
    let mut config = config_io::load_config(cli.config.as_deref())?;

    if let Some(ref path) = cli.todo_file {
        config.todo_file = path.clone();
    }
    if cli.date_on_add {
        config.date_on_add = true;
    }
    if cli.no_preserve_line_numbers {
        config.preserve_line_numbers = false;
    }
    if cli.disable_filter {
        config.disable_filter = true;
    }
    if let Some(ref table) = cli.review_intervals {
        config.review_intervals = config_io::parse_review_intervals(table)?;
    }
    Ok(config)
}

// ---------------------------------------------------------------------------
// Slice
// ---------------------------------------------------------------------------

fn cmd_slice(config: &SliceConfig, spec: &SliceSpec, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let editor = Editor::resolve(config.editor.as_deref())?;
    tracing::debug!(
        kind = %spec.kind,
        todo_file = %config.todo_file.display(),
        editor = editor.program(),
        "starting slice session"
    );

    let mut env = SystemEnv::new(editor, !json);
    let report = session::run(&mut env, config, spec)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&session_to_json(&report))?);
    } else {
        println!("{}", format_summary(&report));
    }
    Ok(())
}
