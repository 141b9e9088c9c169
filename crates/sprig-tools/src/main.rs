//! sprig CLI - Scaffold projects from question-driven templates

use anyhow::Result;
use clap::Parser;
use console::style;
use sprig_core::{
    ensure_destination, render_dir, summarize, PromptError, Prompter, RenderOptions,
    TemplateManifest, TemplateSource, Theme,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "sprig")]
#[command(about = "Scaffold a project from a question-driven template")]
#[command(version)]
struct Args {
    /// Template location: a local directory, a git URL, or owner/repo
    /// GitHub shorthand
    template: String,

    /// Directory to render the project into
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Write into a non-empty destination without asking
    #[arg(short, long)]
    force: bool,
}

fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let result = run(&args);

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn run(args: &Args) -> Result<()> {
    let source = TemplateSource::parse(&args.template);
    let template = source.acquire()?;

    let manifest = TemplateManifest::load(template.root())?;
    let questions = manifest.build_questions()?;

    if let Some(title) = &manifest.title {
        println!("{}\n", style(title).bold());
    }

    let mut prompter = Prompter::new(Theme::default());
    ensure_destination(&mut prompter, &args.directory, args.force)?;
    let answers = prompter.collect(&questions)?;

    let options = RenderOptions {
        ignore: manifest.ignore.clone(),
        render_paths: manifest.render_paths,
    };
    let written = render_dir(template.root(), &args.directory, &answers, &options)?;

    println!("\n{}", summarize(&args.directory, &written));
    Ok(())
}

fn report(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<PromptError>() {
        Some(PromptError::Aborted) => {
            eprintln!("{}", style("aborted.").dim());
            ExitCode::from(130)
        }
        Some(PromptError::Config(_)) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), err);
            ExitCode::from(2)
        }
        _ => {
            eprintln!("{} {:#}", style("Error:").red().bold(), err);
            ExitCode::from(1)
        }
    }
}
