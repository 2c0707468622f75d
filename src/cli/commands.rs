use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, info, instrument, warn};

use crate::application::{ProjectTree, TreeListRow, TreeListView};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::script::{Action, HELP};
use crate::config::{global_config_path, Settings};
use crate::domain::{NodeId, RowNumbering};
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Run { script }) => _run(cli, script.as_deref()),
        Some(Commands::Shell) => _shell(cli),
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

#[instrument(skip(cli))]
fn _run(cli: &Cli, script: Option<&Path>) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let stdout = io::stdout();
    let mut session = Session::new(settings, stdout.lock());

    let applied = match script {
        Some(path) => {
            let file = File::open(path).map_err(|source| CliError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            session.run_script(BufReader::new(file))?
        }
        None => session.run_script(io::stdin().lock())?,
    };
    info!("applied {} action(s)", applied);
    Ok(())
}

#[instrument(skip(cli))]
fn _shell(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let stdout = io::stdout();
    let mut session = Session::new(settings, stdout.lock());
    let mut input = io::stdin().lock();
    let mut line = String::new();

    loop {
        output::prompt("projtree>");
        line.clear();
        let read = input.read_line(&mut line).map_err(|source| CliError::Io {
            path: PathBuf::from("<stdin>"),
            source,
        })?;
        if read == 0 || matches!(line.trim(), "quit" | "exit") {
            break;
        }
        if let Err(e) = session.apply_line(&line) {
            output::error(&e);
        }
    }
    Ok(())
}

fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                let state = if path.exists() { "exists" } else { "not found" };
                output::action("global", &format!("{} ({})", path.display(), state));
            }
            None => output::warning("no config directory available on this system"),
        },
    }
    if let Some(path) = &cli.config {
        output::action("explicit", &path.display());
    }
    Ok(())
}

/// Project tree plus list view, driven one action at a time.
///
/// Data output goes to `out`; errors are returned to the caller.
pub struct Session<W: Write> {
    tree: ProjectTree<RowNumbering>,
    view: TreeListView,
    settings: Settings,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(settings: Settings, out: W) -> Self {
        Self {
            tree: ProjectTree::new(settings.row_numbering()),
            view: TreeListView::new(),
            settings,
            out,
        }
    }

    pub fn tree(&self) -> &ProjectTree<RowNumbering> {
        &self.tree
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Applies every action in `input`, stopping at the first failing line.
    ///
    /// Returns the number of actions applied.
    pub fn run_script<R: BufRead>(&mut self, input: R) -> CliResult<usize> {
        let mut applied = 0;
        for (idx, line) in input.lines().enumerate() {
            let line = line.map_err(|source| CliError::Io {
                path: PathBuf::from("<script>"),
                source,
            })?;
            match self.apply_line(&line) {
                Ok(true) => applied += 1,
                Ok(false) => {}
                Err(e) => {
                    warn!("script stopped at line {}", idx + 1);
                    return Err(CliError::Script {
                        line: idx + 1,
                        source: Box::new(e),
                    });
                }
            }
        }
        Ok(applied)
    }

    /// Parses and applies one line; `Ok(false)` for blank lines and comments.
    pub fn apply_line(&mut self, line: &str) -> CliResult<bool> {
        match Action::parse_line(line)? {
            Some(action) => {
                self.apply(action)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn apply(&mut self, action: Action) -> CliResult<()> {
        match action {
            Action::Add => {
                let parent = self.tree.selected();
                let node = self.tree.add_row()?;
                if let Some(parent) = parent {
                    if self.settings.expand_on_add {
                        self.view.expand(parent);
                    }
                    let line = format!("added {} under {}", self.label(node), self.label(parent));
                    self.emit(&line)?;
                } else {
                    let line = format!("added {}", self.label(node));
                    self.emit(&line)?;
                }
            }
            Action::Remove => {
                let label = self.tree.selected().map(|node| self.label(node));
                let destroyed = self.tree.remove_row()?;
                let line = format!(
                    "removed {} ({} row(s))",
                    label.unwrap_or_default(),
                    destroyed
                );
                self.emit(&line)?;
            }
            Action::Unselect => {
                self.tree.unselect();
                self.emit("selection cleared")?;
            }
            Action::Select(position) => {
                let node = self.node_at(position)?;
                self.tree.select(node)?;
                let line = format!("selected {}", self.label(node));
                self.emit(&line)?;
            }
            Action::Expand(position) => {
                let node = self.node_at(position)?;
                self.view.expand(node);
            }
            Action::Collapse(position) => {
                let node = self.node_at(position)?;
                self.view.collapse(node);
            }
            Action::Show => {
                let rendered = self.tree.to_tree_string().to_string();
                self.emit(rendered.trim_end())?;
            }
            Action::List => self.list()?,
            Action::Help => self.emit(HELP)?,
        }
        Ok(())
    }

    /// Visible rows as currently expanded.
    pub fn visible_rows(&mut self) -> CliResult<Vec<TreeListRow>> {
        Ok(self.view.rows(self.tree.model_mut())?)
    }

    fn list(&mut self) -> CliResult<()> {
        let rows = self.visible_rows()?;
        if rows.is_empty() {
            return self.emit("(empty)");
        }
        let selected = self.tree.selected();
        for row in rows {
            let marker = match (row.expanded, row.expandable) {
                (true, _) => "v",
                (false, true) => ">",
                (false, false) => " ",
            };
            let mut line = String::new();
            if self.settings.show_positions {
                line.push_str(&format!("{:>3} ", row.position));
            }
            line.push_str(&"  ".repeat(row.depth));
            line.push_str(&format!("{} {}", marker, self.label(row.node)));
            if selected == Some(row.node) {
                line.push_str(crate::tree_traits::SELECTED_MARKER);
            }
            self.emit(&line)?;
        }
        Ok(())
    }

    fn node_at(&mut self, position: usize) -> CliResult<NodeId> {
        let item = self.view.item_at(self.tree.model_mut(), position)?;
        debug!("row {} resolves to {}", position, item.node());
        Ok(item.node())
    }

    fn label(&self, node: NodeId) -> String {
        self.tree
            .payload(node)
            .map(ToString::to_string)
            .unwrap_or_else(|| node.to_string())
    }

    fn emit(&mut self, line: &str) -> CliResult<()> {
        writeln!(self.out, "{}", line).map_err(|source| CliError::Io {
            path: PathBuf::from("<stdout>"),
            source,
        })
    }
}
