//! sitemark - CLI driver
//!
//! A thin command-line front over the library: render a markup file to
//! a standalone HTML page, or convert document HTML back into markup.

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use log::info;

use sitemark::error::{Error, Result};
use sitemark::import::markup_from_html;
use sitemark::render::{export_html_file, render_document, RenderOptions};

const USAGE: &str = "Usage:
  sitemark render <input.md> [output.html]   Render markup to a standalone HTML page
  sitemark import <input.html> [output.md]   Convert document HTML to markup";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("sitemark: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<()> {
    match args {
        [command, rest @ ..] if command == "render" => render_command(rest),
        [command, rest @ ..] if command == "import" => import_command(rest),
        _ => Err(Error::Application(USAGE.to_string())),
    }
}

/// `render <input.md> [output.html]`
fn render_command(args: &[String]) -> Result<()> {
    let input = args
        .first()
        .ok_or_else(|| Error::Application(USAGE.to_string()))?;
    let input = Path::new(input);
    let options = RenderOptions::default();

    match args.get(1) {
        Some(output) => {
            export_html_file(input, &PathBuf::from(output), &options)?;
        }
        None => {
            let markup = read_file(input)?;
            print!("{}", render_document(&markup, &options));
        }
    }
    Ok(())
}

/// `import <input.html> [output.md]`
fn import_command(args: &[String]) -> Result<()> {
    let input = args
        .first()
        .ok_or_else(|| Error::Application(USAGE.to_string()))?;
    let input = Path::new(input);

    let html = read_file(input)?;
    let markup = markup_from_html(&html);
    if markup.is_empty() {
        return Err(Error::Import(format!(
            "no convertible content in '{}'",
            input.display()
        )));
    }

    match args.get(1) {
        Some(output) => {
            std::fs::write(output, &markup).map_err(|source| Error::FileWrite {
                path: PathBuf::from(output),
                source,
            })?;
            info!("Imported {} to {}", input.display(), output);
        }
        None => print!("{}", markup),
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })
}
