use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "slice",
    about = concat!("slice v", env!("CARGO_PKG_VERSION"), " - edit part of your todo.txt in your editor"),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print a summary of the changes as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: $TODO_SLICE_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The todo.txt file to edit (default: $TODO_FILE, then ./todo.txt)
    #[arg(short = 'f', long = "todo-file", global = true)]
    pub todo_file: Option<PathBuf>,

    /// Give new tasks today's creation date
    #[arg(long, global = true)]
    pub date_on_add: bool,

    /// Write tasks densely instead of keeping blank lines where tasks were deleted
    #[arg(long, global = true)]
    pub no_preserve_line_numbers: bool,

    /// Also show completed tasks and tasks that have not started yet
    #[arg(long, global = true)]
    pub disable_filter: bool,

    /// Review intervals in days per priority, e.g. A:1,B:7,_:30
    #[arg(long, global = true, value_name = "TABLE")]
    pub review_intervals: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Every open task
    All,
    /// Tasks with a priority and/or tags, e.g. `match A @phone`
    Match(MatchArgs),
    /// Tasks whose start date (t:) is still ahead
    Future,
    /// Tasks due for review, by age per priority
    Review,
    /// Tasks containing every term; prefix a term with - to exclude it
    List(ListArgs),
}

#[derive(Args)]
pub struct MatchArgs {
    /// A priority (A-Z, or _ for none) and tags (@context, +project, key:value)
    #[arg(trailing_var_arg = true)]
    pub criteria: Vec<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Search terms, matched case-insensitively
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub terms: Vec<String>,
}
