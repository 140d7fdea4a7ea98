use anyhow::{Context, Result};
use better_find_buffer::buffer::{Region, Snapshot};
use better_find_buffer::commands::{JumpOptions, fold_and_advance, jump_file, jump_match};
use better_find_buffer::config::Settings;
use better_find_buffer::host::HostAdapter;
use better_find_buffer::host::memory::MemoryHost;
use better_find_buffer::model::{common_path_prefix, list_file_headers, list_match_lines};
use better_find_buffer::navigator::Direction;
use better_find_buffer::paths::remove_path_prefix;
use better_find_buffer::scanner::{find_open_target, find_search_term};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Navigate a saved Find Results buffer from the command line"
)]
struct Cli {
    /// JSON settings file
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Caret position in the results buffer
#[derive(Args, Clone, Copy)]
struct Caret {
    /// Line of the caret (1-based)
    #[arg(long)]
    line: Option<usize>,

    /// Column of the caret (1-based)
    #[arg(long, default_value = "1")]
    column: usize,

    /// Byte offset of the caret, instead of line and column
    #[arg(long, conflicts_with = "line")]
    offset: Option<usize>,
}

impl Caret {
    fn resolve(&self, snapshot: &Snapshot) -> usize {
        match (self.offset, self.line) {
            (Some(offset), _) => offset.min(snapshot.len()),
            (None, Some(line)) => snapshot.offset_of(line, self.column),
            (None, None) => 0,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the file location under the caret as path:line:column
    Locate {
        /// Find Results buffer saved to a file
        buffer: PathBuf,

        #[command(flatten)]
        caret: Caret,

        /// Print JSON instead of the encoded locator
        #[arg(long)]
        json: bool,
    },

    /// List the file headers and their match counts
    Headers {
        buffer: PathBuf,

        /// Strip the directory prefix shared by all headers
        #[arg(long)]
        short: bool,

        #[arg(long)]
        json: bool,
    },

    /// Jump to the next or previous file or match
    Jump {
        buffer: PathBuf,

        #[command(flatten)]
        caret: Caret,

        /// Jump between matches instead of files
        #[arg(long = "match")]
        by_match: bool,

        /// Jump backward
        #[arg(long)]
        backward: bool,

        /// Stop at the first and last candidate instead of wrapping
        #[arg(long)]
        no_cycle: bool,

        /// Let match jumps leave the current file group
        #[arg(long)]
        all_groups: bool,
    },

    /// Fold the group under the caret and move to the next group's first match
    Fold {
        buffer: PathBuf,

        #[command(flatten)]
        caret: Caret,
    },
}

fn read_buffer(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read results buffer {}", path.display()))
}

/// Prints `label` followed by the 1-based line and column of `offset` and the line text.
fn print_position(label: &str, snapshot: &Snapshot, offset: usize) {
    let line = snapshot.line_at(offset);
    println!(
        "{}: {}:{} {}",
        label,
        line.index + 1,
        snapshot.column_of(offset) + 1,
        line.text
    );
}

fn main() -> Result<()> {
    better_find_buffer::telemetry::init()?;
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    match &cli.command {
        Commands::Locate {
            buffer,
            caret,
            json,
        } => {
            let snapshot = Snapshot::new(read_buffer(buffer)?);
            let selection = vec![Region::point(caret.resolve(&snapshot))];

            match find_open_target(&snapshot, &selection) {
                Ok(target) if *json => {
                    let term = find_search_term(&snapshot, &selection).ok();
                    let value = serde_json::json!({ "target": target, "search_term": term });
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
                Ok(target) => println!("{}", target.encoded()),
                Err(err) => println!("No file under the caret ({}).", err),
            }
        }

        Commands::Headers {
            buffer,
            short,
            json,
        } => {
            let snapshot = Snapshot::new(read_buffer(buffer)?);
            let headers = list_file_headers(&snapshot);

            if headers.is_empty() {
                println!("No file headers found.");
                return Ok(());
            }

            if *json {
                println!("{}", serde_json::to_string_pretty(&headers)?);
                return Ok(());
            }

            let prefix = if *short { common_path_prefix(&headers) } else { None };
            let matches = list_match_lines(&snapshot);
            for (i, header) in headers.iter().enumerate() {
                let end = headers.get(i + 1).map_or(snapshot.len(), |next| next.offset);
                let hits = matches
                    .iter()
                    .filter(|m| m.is_hit && header.offset < m.offset && m.offset < end)
                    .count();
                let path = match &prefix {
                    Some(prefix) => remove_path_prefix(&header.path, prefix),
                    None => PathBuf::from(&header.path),
                };
                println!("{:>5} {}", hits, path.display());
            }
        }

        Commands::Jump {
            buffer,
            caret,
            by_match,
            backward,
            no_cycle,
            all_groups,
        } => {
            let text = read_buffer(buffer)?;
            let snapshot = Snapshot::new(text.as_str());
            let mut host = MemoryHost::with_results(text);
            let view = host.active_view();
            host.set_caret(view, caret.resolve(&snapshot));

            let options = JumpOptions {
                direction: Direction::from_forward(!*backward),
                cycle: settings.cycle && !*no_cycle,
                scope_to_group: settings.scope_matches_to_group && !*all_groups,
            };
            let result = if *by_match {
                jump_match(&mut host, &settings, &options)
            } else {
                jump_file(&mut host, &settings, &options)
            };

            match result {
                Ok(target) => print_position("target", &snapshot, target.begin),
                Err(err) => println!("No jump target ({}).", err),
            }
        }

        Commands::Fold { buffer, caret } => {
            let text = read_buffer(buffer)?;
            let snapshot = Snapshot::new(text.as_str());
            let mut host = MemoryHost::with_results(text);
            let view = host.active_view();
            host.set_caret(view, caret.resolve(&snapshot));

            match fold_and_advance(&mut host, &settings) {
                Ok(outcome) => {
                    match outcome.folded {
                        Some(body) => println!(
                            "folded: lines {}-{}",
                            snapshot.line_index_of(body.begin) + 1,
                            snapshot.line_index_of(body.end) + 1
                        ),
                        None => println!("folded: nothing"),
                    }
                    if let Some(next) = outcome.next_match.or(outcome.next_file) {
                        print_position("next", &snapshot, next.begin);
                    }
                }
                Err(err) => println!("Nothing to fold ({}).", err),
            }
        }
    }

    Ok(())
}
