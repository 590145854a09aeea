//! Interactive catalog browser driven by one-line commands on stdin.

use std::io::Write as _;

use izerw_catalog::present::{product_detail, render_page, FilterSidebar};
use izerw_catalog::{CatalogController, CommerceClient, ViewMode};
use izerw_core::CategoryFilter;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
commands:
  next | prev            move one page
  page N                 jump to page N
  category NAME | all    filter by category (name or slug)
  search TEXT            search the catalog; `search` alone clears it
  clear                  clear category and search
  filters                show the category sidebar
  show ID                show every detail of a product on this page
  retry                  re-run the last query
  view grid | list       switch layout
  help                   show this list
  quit                   exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    Next,
    Prev,
    Page(u32),
    Category(CategoryFilter),
    /// Empty text clears the search.
    Search(String),
    Clear,
    Filters,
    Show(String),
    Retry,
    View(ViewMode),
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub(crate) fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    let command = match word.to_ascii_lowercase().as_str() {
        "next" | "n" => ShellCommand::Next,
        "prev" | "p" => ShellCommand::Prev,
        "page" => {
            let page = rest
                .parse::<u32>()
                .map_err(|_| format!("expected a page number, got \"{rest}\""))?;
            ShellCommand::Page(page)
        }
        "category" | "cat" => {
            let filter = rest.parse::<CategoryFilter>().map_err(|e| e.to_string())?;
            ShellCommand::Category(filter)
        }
        "search" | "s" => ShellCommand::Search(rest.to_owned()),
        "clear" => ShellCommand::Clear,
        "filters" => ShellCommand::Filters,
        "show" | "details" => {
            let id = rest.trim_start_matches('#');
            if id.is_empty() {
                return Err("expected a product id, e.g. `show 8812345`".to_owned());
            }
            ShellCommand::Show(id.to_owned())
        }
        "retry" | "reload" => ShellCommand::Retry,
        "view" => ShellCommand::View(rest.parse()?),
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command \"{other}\"; type `help`")),
    };
    Ok(Some(command))
}

/// Runs the shell until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if stdin or stdout fail.
pub(crate) async fn run_shell(
    client: Box<dyn CommerceClient>,
    page_size: u32,
    mut view: ViewMode,
) -> anyhow::Result<()> {
    let mut controller = CatalogController::new(client, page_size);
    controller.load().await;
    print!("{}", render_page(controller.view(), view));
    println!("type `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("catalog> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            return Ok(());
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        match command {
            ShellCommand::Next => {
                if !controller.next_page().await {
                    eprintln!("already on the last page");
                    continue;
                }
            }
            ShellCommand::Prev => {
                if !controller.previous_page().await {
                    eprintln!("already on the first page");
                    continue;
                }
            }
            ShellCommand::Page(page) => controller.set_page(page).await,
            ShellCommand::Category(filter) => controller.set_category(filter).await,
            ShellCommand::Search(text) => controller.submit_search(&text).await,
            ShellCommand::Clear => controller.clear_filters().await,
            ShellCommand::Retry => controller.reload().await,
            ShellCommand::View(mode) => view = mode,
            ShellCommand::Filters => {
                print!("{}", FilterSidebar::from_view(controller.view()).render());
                continue;
            }
            ShellCommand::Show(id) => {
                match controller.view().product(&id) {
                    Some(product) => print!("{}", product_detail(product)),
                    None => eprintln!("no product #{id} on this page"),
                }
                continue;
            }
            ShellCommand::Help => {
                println!("{HELP}");
                continue;
            }
            ShellCommand::Quit => return Ok(()),
        }
        print!("{}", render_page(controller.view(), view));
    }
}

#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;
