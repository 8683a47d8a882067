use clap::{Args, Subcommand};

/// Task commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// List tasks, newest first.
    List {
        #[arg(long)]
        status: Option<String>,
    },
    /// Create a task.
    Create {
        #[arg(long)]
        title: String,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Update a task. Pass an empty value to clear an optional field.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Delete a task.
    Remove { id: String },
    /// Drop a task onto a column (`todo`, `in-progress`, `done`) or onto another task.
    Move { id: String, target: String },
}

#[derive(Clone, Debug, Default, Args)]
pub struct TaskFields {
    #[arg(long)]
    pub description: Option<String>,
    /// todo, in-progress or done
    #[arg(long)]
    pub status: Option<String>,
    /// Due date, YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,
    /// Due time, HH:MM
    #[arg(long)]
    pub time: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub organization: Option<String>,
}
