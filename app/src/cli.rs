//! Command-line surface: one-shot subcommands and an interactive shell.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail};
use clap::{Parser, Subcommand};
use product_core::{ProductId, Transport};

use crate::page::ProductPage;
use crate::view;

#[derive(Debug, Parser)]
#[command(name = "products", version, about = "View, create, update and delete products")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List products
    List,
    /// Create a product
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
    },
    /// Replace a product's name and price
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
    },
    /// Delete a product
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Interactive form and table (default)
    Shell,
}

pub fn run<T: Transport>(command: Commands, page: &mut ProductPage<T>) -> anyhow::Result<()> {
    match command {
        Commands::List => {
            page.load();
            finish(page)
        }
        Commands::Add { name, price } => {
            page.form_mut().name = name;
            page.form_mut().price = price;
            page.submit();
            finish(page)
        }
        Commands::Update { id, name, price } => {
            page.load();
            if page.error().is_some() {
                return finish(page);
            }
            let product = page
                .find_by_label(&id)
                .cloned()
                .ok_or_else(|| anyhow!("no product with id {id}"))?;
            page.start_edit(&product);
            page.form_mut().name = name;
            page.form_mut().price = price;
            page.submit();
            finish(page)
        }
        Commands::Delete { id, yes } => {
            page.load();
            if page.error().is_some() {
                return finish(page);
            }
            let id = resolve_id(page, &id);
            let stdin = io::stdin();
            let mut input = stdin.lock();
            page.delete(&id, |label| yes || confirm(&mut input, &mut io::stdout(), label));
            finish(page)
        }
        Commands::Shell => {
            page.load();
            let stdin = io::stdin();
            run_shell(page, stdin.lock(), io::stdout())?;
            Ok(())
        }
    }
}

/// Print the page, failing the command when it ended in an error.
fn finish<T: Transport>(page: &ProductPage<T>) -> anyhow::Result<()> {
    print!("{}", view::render(page));
    match page.error() {
        Some(error) => bail!("{error}"),
        None => Ok(()),
    }
}

/// Prefer the id of a listed record so numeric and text ids round-trip.
fn resolve_id<T: Transport>(page: &ProductPage<T>, label: &str) -> ProductId {
    if let Some(product) = page.find_by_label(label) {
        return product.id.clone();
    }
    label
        .parse::<i64>()
        .map(ProductId::Number)
        .unwrap_or_else(|_| ProductId::from(label))
}

fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> bool {
    let _ = write!(out, "Delete \"{label}\"? [y/N] ");
    let _ = out.flush();
    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

const SHELL_HELP: &str = "\
commands:
  list            reload the table
  name <text>     set the form name
  price <value>   set the form price
  submit          add, or update the record being edited
  edit <id>       load a record into the form
  cancel          stop editing and clear the form
  delete <id>     delete a record (asks first)
  help            show this text
  quit            leave";

/// Read commands line by line until `quit` or end of input, re-rendering the
/// page after each one.
pub fn run_shell<T, R, W>(page: &mut ProductPage<T>, mut input: R, mut out: W) -> io::Result<()>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    write!(out, "{}", view::render(page))?;
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        let line = line.trim();
        let (command, arg) = match line.split_once(' ') {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match command {
            "" => continue,
            "quit" | "exit" => return Ok(()),
            "help" => {
                writeln!(out, "{SHELL_HELP}")?;
                continue;
            }
            "list" => page.load(),
            "name" => page.form_mut().name = arg.to_string(),
            "price" => page.form_mut().price = arg.to_string(),
            "submit" => {
                page.submit();
            }
            "cancel" => page.cancel_edit(),
            "edit" => match page.find_by_label(arg).cloned() {
                Some(product) => page.start_edit(&product),
                None => {
                    writeln!(out, "no product with id {arg:?}")?;
                    continue;
                }
            },
            "delete" => {
                if arg.is_empty() {
                    writeln!(out, "usage: delete <id>")?;
                    continue;
                }
                let id = resolve_id(page, arg);
                page.delete(&id, |label| confirm(&mut input, &mut out, label));
            }
            other => {
                writeln!(out, "unknown command {other:?}, try `help`")?;
                continue;
            }
        }
        write!(out, "{}", view::render(page))?;
    }
}
