use std::{
    io::{self, IsTerminal},
    path::PathBuf,
    sync::Arc,
};

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use loopreel::{
    AnimateOptions, Animator, BatchReport, FfmpegEncoder, FrameTextOverlay, NonInteractive,
    OperationType, ProgressCallback, ProgressInfo, Prompter, StartCancel, SubjectOutcome,
};
use serde_json::{Value, json};

const CLI_AFTER_HELP: &str = "Examples:\n  loopreel --dir runs\n  loopreel --dir runs --starting-frame 5 --frames 40 --mirror --filetype gif\n  loopreel --dir runs --all --no-input --json\n  loopreel --dir runs --sort-only\n  loopreel --completions zsh > _loopreel";

#[derive(Debug, Parser)]
#[command(
    name = "loopreel",
    version,
    about = "Sort numbered frames into subject folders and loop them into animations",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Directory holding the frames (or subject folders).
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Playback rate in frames per second.
    #[arg(long, default_value_t = loopreel::configuration::DEFAULT_FRAMERATE, value_parser = clap::value_parser!(u32).range(1..))]
    framerate: u32,

    /// First frame of every animation (1-based). Defaults to the latest start
    /// that fits, or 1.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    starting_frame: Option<u32>,

    /// Frames per animation. Defaults to every frame from the start.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    frames: Option<u32>,

    /// Output file type, passed to ffmpeg as the extension (mp4, gif, webm, ...).
    #[arg(short = 't', long, default_value = loopreel::configuration::DEFAULT_FILE_TYPE)]
    filetype: String,

    /// Only sort the frames into subject folders.
    #[arg(long)]
    sort_only: bool,

    /// Play the selected frames backwards.
    #[arg(short, long)]
    reverse: bool,

    /// Play the selected frames forwards then backwards.
    #[arg(short, long)]
    mirror: bool,

    /// Add the start frame, frame count, and framerate to file names.
    #[arg(short, long)]
    info: bool,

    /// Animate every frame of every subject without asking.
    #[arg(short, long)]
    all: bool,

    /// Also render a copy with the frame number drawn on each frame.
    #[arg(long)]
    render_text: bool,

    /// Font file for --render-text.
    #[arg(long, requires = "render_text")]
    font: Option<PathBuf>,

    /// Font size for --render-text.
    #[arg(long, default_value_t = 30)]
    font_size: u32,

    /// Folder that receives the output folders.
    #[arg(long, default_value = loopreel::configuration::DEFAULT_OUTPUT_ROOT)]
    output_root: PathBuf,

    /// Path of the ffmpeg executable.
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: PathBuf,

    /// Never ask questions; skip frame sets whose selection does not fit.
    #[arg(long)]
    no_input: bool,

    /// What skipping the starting frame question does (back, skip).
    #[arg(long, default_value = "back")]
    start_cancel: String,

    /// Show a progress bar.
    #[arg(long)]
    progress: bool,

    /// Print the batch summary as JSON.
    #[arg(long)]
    json: bool,

    /// Increase logging (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print a shell completion script and exit.
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn parse_start_cancel(value: &str) -> Option<StartCancel> {
    match value.to_ascii_lowercase().as_str() {
        "back" | "go-back" | "goback" => Some(StartCancel::GoBack),
        "skip" | "cancel" => Some(StartCancel::Cancel),
        _ => None,
    }
}

fn default_log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbosity: u8) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_level(verbosity)),
    )
    .format_timestamp_millis()
    .init();
}

/// Asks on the terminal, pausing the progress bar while waiting for input.
struct TerminalPrompter {
    bar: Option<ProgressBar>,
}

impl TerminalPrompter {
    fn suspend<R>(&self, f: impl FnOnce() -> R) -> R {
        match &self.bar {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str) -> io::Result<String> {
        self.suspend(|| {
            Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
        })
        .map_err(|error| io::Error::other(error.to_string()))
    }

    fn confirm(&mut self, question: &str, default: bool) -> io::Result<bool> {
        self.suspend(|| {
            Confirm::new()
                .with_prompt(question)
                .default(default)
                .interact()
        })
        .map_err(|error| io::Error::other(error.to_string()))
    }

    fn notice(&mut self, message: &str) {
        self.suspend(|| eprintln!("{}", message.yellow()));
    }
}

struct BarProgress {
    bar: ProgressBar,
}

impl ProgressCallback for BarProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        let prefix = match info.operation {
            OperationType::Sorting => "sorting",
            OperationType::Animating => "animating",
            _ => "working",
        };
        self.bar.set_prefix(prefix);
        if let Some(total) = info.total {
            self.bar.set_length(total);
        }
        self.bar.set_position(info.current);
        if let Some(subject) = &info.subject {
            self.bar.set_message(subject.clone());
        }
    }
}

fn report_json(report: &BatchReport) -> Value {
    let subjects: Vec<Value> = report
        .subjects
        .iter()
        .map(|subject| {
            let mut entry = json!({
                "subject": subject.subject,
                "frames_found": subject.length,
            });
            let details = match &subject.outcome {
                SubjectOutcome::Animated {
                    selection,
                    frames,
                    output,
                    overlay_output,
                } => json!({
                    "outcome": "animated",
                    "start": selection.start,
                    "count": selection.count,
                    "frames_encoded": frames,
                    "output": output.display().to_string(),
                    "overlay_output": overlay_output.as_ref().map(|path| path.display().to_string()),
                }),
                SubjectOutcome::Skipped { reason } => json!({
                    "outcome": "skipped",
                    "reason": reason,
                }),
                SubjectOutcome::Cancelled => json!({ "outcome": "cancelled" }),
                SubjectOutcome::Failed { error } => json!({
                    "outcome": "failed",
                    "error": error,
                }),
            };
            if let (Value::Object(entry), Value::Object(details)) = (&mut entry, details) {
                entry.extend(details);
            }
            entry
        })
        .collect();

    json!({
        "sort": report.sort.as_ref().map(|sort| json!({
            "moved": sort.moved,
            "misc": sort.misc,
            "skipped": sort.skipped,
            "failed": sort.failed.len(),
        })),
        "output_folder": report.output_folder.as_ref().map(|path| path.display().to_string()),
        "subjects": subjects,
    })
}

fn print_report(report: &BatchReport) {
    if let Some(sort) = &report.sort {
        println!(
            "{} {} frame(s) moved, {} misc image(s), {} left in place",
            "sorted".cyan().bold(),
            sort.moved,
            sort.misc,
            sort.skipped
        );
        for failure in &sort.failed {
            println!(
                "{} could not move {}: {}",
                "warning:".yellow().bold(),
                failure.path.display(),
                failure.reason
            );
        }
    }
    for subject in &report.subjects {
        match &subject.outcome {
            SubjectOutcome::Animated {
                selection,
                output,
                overlay_output,
                ..
            } => {
                println!(
                    "{} {}: {selection} -> {}",
                    "done".green().bold(),
                    subject.subject,
                    output.display()
                );
                if let Some(overlay) = overlay_output {
                    println!("     {}", overlay.display());
                }
            }
            SubjectOutcome::Skipped { reason } => println!(
                "{} {}: {}",
                "skip".yellow().bold(),
                subject.subject,
                reason.yellow()
            ),
            SubjectOutcome::Cancelled => println!(
                "{} {}: {}",
                "skip".yellow().bold(),
                subject.subject,
                "cancelled".yellow()
            ),
            SubjectOutcome::Failed { error } => println!(
                "{} {}: {}",
                "fail".red().bold(),
                subject.subject,
                error.red()
            ),
        }
    }
    if let Some(folder) = &report.output_folder {
        println!("Animations are in {}", folder.display());
    } else {
        println!("Files are in sorted folders.");
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "loopreel", &mut io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose);
    log::debug!("command line: {cli:?}");

    let start_cancel = parse_start_cancel(&cli.start_cancel)
        .ok_or(format!("unsupported --start-cancel: {}", cli.start_cancel))?;

    let progress_bar = if cli.progress {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{prefix:>10.bold} {bar:40.cyan/blue} {pos}/{len} {msg}",
        )?;
        bar.set_style(style.progress_chars("##-"));
        Some(bar)
    } else {
        None
    };

    let mut options = AnimateOptions::new()
        .with_framerate(cli.framerate)
        .with_starting_frame(cli.starting_frame)
        .with_frame_count(cli.frames)
        .with_file_type(cli.filetype.to_ascii_lowercase())
        .with_output_root(cli.output_root)
        .with_animate(!cli.sort_only)
        .with_reverse(cli.reverse)
        .with_mirror(cli.mirror)
        .with_annotate(cli.info)
        .with_select_all(cli.all)
        .with_start_cancel(start_cancel);

    if cli.render_text {
        options = options.with_frame_text(Some(FrameTextOverlay {
            font_file: cli.font,
            font_size: cli.font_size,
        }));
    }
    if let Some(bar) = &progress_bar {
        options = options.with_progress(Arc::new(BarProgress { bar: bar.clone() }));
    }

    let animator = Animator::new(options, FfmpegEncoder::new().with_program(cli.ffmpeg))?;

    let report = if cli.no_input || !io::stdin().is_terminal() {
        animator.run(&cli.dir, &mut NonInteractive)?
    } else {
        let mut prompter = TerminalPrompter {
            bar: progress_bar.clone(),
        };
        animator.run(&cli.dir, &mut prompter)?
    };

    if let Some(bar) = &progress_bar {
        bar.finish_and_clear();
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
    } else {
        print_report(&report);
    }

    match report.failure_count() {
        0 => Ok(()),
        failed => Err(format!("{failed} subject(s) failed").into()),
    }
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}
