//! gman-annotate: classify manual pages and `--help` text from the shell.
//!
//! Runs the gman-format engine outside the viewer. Two input modes, as for
//! any filter:
//!
//! - **stdin mode**: `man ls | gman-annotate man --program ls`
//! - **file mode**: `gman-annotate man -o out/ pages/*.txt`
//!
//! Besides annotation it exposes the type-ahead matcher (`seek`), the
//! installed-program catalog (`list`) and the default style table
//! (`styles`).

mod catalog;
mod render;
mod sanitize;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use gman_format::help::APP_NAME;
use gman_format::{
    classify_help_for, classify_with, default_styles, Annotations, ReferenceScope, TagKind,
    TypeAheadNavigator,
};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gman-annotate",
    version,
    disable_help_subcommand = true,
    about = "Annotate manual pages and --help output with semantic spans"
)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug). RUST_LOG also applies.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify manual-page text
    Man {
        #[command(flatten)]
        input: InputArgs,

        /// Program the page documents. Defaults to the file name stem.
        #[arg(long)]
        program: Option<String>,

        /// Where name(N) cross-references are recognised
        #[arg(long, value_enum, default_value_t = Scope::Document)]
        references: Scope,
    },
    /// Classify --help output
    Help {
        #[command(flatten)]
        input: InputArgs,

        /// Application whose ~/.config/<app> paths are highlighted
        #[arg(long, default_value = APP_NAME)]
        app: String,
    },
    /// Drive the type-ahead matcher with a sequence of keys
    Seek {
        /// Keys typed, in order
        #[arg(short, long)]
        keys: String,

        /// Item list, one per line. If omitted, reads from stdin.
        file: Option<PathBuf>,

        /// Match against installed programs instead of a list
        #[arg(long, conflicts_with = "file")]
        catalog: bool,

        /// Directories scanned for installed programs
        #[arg(long = "dir", env = "GMAN_PROGRAM_DIRS", value_delimiter = ':')]
        dirs: Vec<PathBuf>,

        /// Only offer catalog programs containing this text
        #[arg(long)]
        filter: Option<String>,

        /// Let the type-ahead buffer expire after the last key
        #[arg(long)]
        expire: bool,
    },
    /// List installed programs
    List {
        /// Only programs containing this text (case-insensitive)
        #[arg(long)]
        filter: Option<String>,

        /// Directories scanned for installed programs
        #[arg(long = "dir", env = "GMAN_PROGRAM_DIRS", value_delimiter = ':')]
        dirs: Vec<PathBuf>,
    },
    /// Print the default style of each tag kind
    Styles {
        /// Output format: table (default) or json
        #[arg(short = 'f', long, default_value = "table")]
        format: String,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Input files (glob patterns supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: json (default), table, pango
    #[arg(short = 'f', long, default_value = "json", env = "GMAN_FORMAT")]
    format: String,

    /// Keep only these tag kinds, e.g. --kinds option,argument
    #[arg(long, value_delimiter = ',')]
    kinds: Vec<TagKind>,

    /// Classify the input as is, without removing overstrike and escapes
    #[arg(long)]
    raw: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Scope {
    Document,
    SeeAlso,
}

impl From<Scope> for ReferenceScope {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Document => ReferenceScope::Document,
            Scope::SeeAlso => ReferenceScope::SeeAlso,
        }
    }
}

/// Which classifier a page goes through.
enum Mode<'a> {
    Manual {
        program: Option<&'a str>,
        scope: ReferenceScope,
    },
    Help {
        app: &'a str,
    },
}

impl Mode<'_> {
    fn classify(&self, text: &str, page_name: &str) -> Annotations {
        match self {
            Mode::Manual { program, scope } => {
                classify_with(text, program.unwrap_or(page_name), *scope)
            }
            Mode::Help { app } => Annotations {
                spans: classify_help_for(text, app),
                ..Default::default()
            },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Man {
            input,
            program,
            references,
        } => annotate(
            input,
            &Mode::Manual {
                program: program.as_deref(),
                scope: (*references).into(),
            },
        ),
        Command::Help { input, app } => annotate(input, &Mode::Help { app: app.as_str() }),
        Command::Seek {
            keys,
            file,
            catalog: from_catalog,
            dirs,
            filter,
            expire,
        } => {
            let items = if *from_catalog {
                let names = catalog::scan(&program_dirs(dirs));
                catalog::filter(&names, filter.as_deref().unwrap_or(""))
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            } else {
                read_items(file.as_deref())?
            };
            print!("{}", seek(&items, keys, *expire));
            Ok(())
        }
        Command::List { filter, dirs } => {
            let names = catalog::scan(&program_dirs(dirs));
            for name in catalog::filter(&names, filter.as_deref().unwrap_or("")) {
                println!("{}", name);
            }
            Ok(())
        }
        Command::Styles { format } => {
            print!("{}", render_styles(format)?);
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn annotate(input: &InputArgs, mode: &Mode) -> Result<()> {
    if input.files.is_empty() {
        return stdin_mode(input, mode);
    }
    file_mode(input, mode)
}

/// stdin mode: read one page from stdin, write the rendering to stdout.
fn stdin_mode(input: &InputArgs, mode: &Mode) -> Result<()> {
    let mut bytes = Vec::new();
    io::stdin()
        .read_to_end(&mut bytes)
        .context("failed to read stdin")?;

    let renderer = render::create_renderer(&input.format)?;
    let (text, annotations) = process(&String::from_utf8_lossy(&bytes), "", input, mode);
    print!("{}", renderer.render(&text, &annotations));
    Ok(())
}

/// file mode: one output file per input page in the output directory.
fn file_mode(input: &InputArgs, mode: &Mode) -> Result<()> {
    let output_dir = input
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let renderer = render::create_renderer(&input.format)?;
    let ext = renderer.file_extension();

    for path in expand_globs(&input.files)? {
        let bytes = fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let name = derive_page_name(&path.to_string_lossy());
        let (text, annotations) = process(&String::from_utf8_lossy(&bytes), &name, input, mode);
        debug!(page = %name, spans = annotations.spans.len(), "annotated");

        let out_path = output_dir.join(format!("{}.{}", name, ext));
        fs::write(&out_path, renderer.render(&text, &annotations))
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    Ok(())
}

/// Clean, classify and filter one page. Returns the text the span offsets
/// refer to along with the spans.
fn process(raw: &str, page_name: &str, input: &InputArgs, mode: &Mode) -> (String, Annotations) {
    let text = if input.raw {
        raw.to_string()
    } else {
        sanitize::clean(raw).into_owned()
    };
    let mut annotations = mode.classify(&text, page_name);
    retain_kinds(&mut annotations, &input.kinds);
    (text, annotations)
}

/// Keep only spans of the requested kinds. An empty list keeps everything.
fn retain_kinds(annotations: &mut Annotations, kinds: &[TagKind]) {
    if kinds.is_empty() {
        return;
    }
    annotations.spans.retain(|span| kinds.contains(&span.kind));
    if !kinds.contains(&TagKind::ManReference) {
        annotations.references.clear();
    }
}

/// File extensions picked up when a directory is given.
const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "man", "help"];

/// Expand glob patterns into a list of real file paths.
/// Bare directories are scanned (non-recursively) for page files.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                let supported = p
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext));
                if p.is_file() && supported {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!(pattern = %pattern, "no files matched");
        }
        files.extend(matches);
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Derive the page name from an input path.
/// "pages/ls.1.txt" → "ls", "grep.help" → "grep", "tar.8" → "tar"
fn derive_page_name(source: &str) -> String {
    let filename = source.rsplit('/').next().unwrap_or(source);
    let stem = filename
        .strip_suffix(".txt")
        .or_else(|| filename.strip_suffix(".man"))
        .or_else(|| filename.strip_suffix(".help"))
        .unwrap_or(filename);
    match stem.rsplit_once('.') {
        Some((name, section)) if !name.is_empty() && is_section(section) => name.to_string(),
        _ => stem.to_string(),
    }
}

/// Manual section suffixes: a digit, optionally followed by letters (`3p`, `1ssl`).
fn is_section(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_digit())
        && chars.all(|c| c.is_ascii_lowercase())
}

fn program_dirs(dirs: &[PathBuf]) -> Vec<PathBuf> {
    if dirs.is_empty() {
        catalog::default_dirs()
    } else {
        dirs.to_vec()
    }
}

fn read_items(file: Option<&Path>) -> Result<Vec<String>> {
    let content = match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
            content
        }
    };
    Ok(content.lines().map(str::to_string).collect())
}

/// Feed `keys` to a fresh navigator, one line of output per key:
/// `status<TAB>index<TAB>item`, with `-` when nothing matches.
fn seek(items: &[String], keys: &str, expire: bool) -> String {
    let mut nav = TypeAheadNavigator::new();
    let mut out = String::new();
    for key in keys.chars() {
        nav.append(key);
        match nav.find_match(items) {
            Some(index) => out.push_str(&format!(
                "{}\t{}\t{}\n",
                nav.status_message(),
                index,
                items[index]
            )),
            None => out.push_str(&format!("{}\t-\t-\n", nav.status_message())),
        }
    }
    if expire && nav.is_active() {
        out.push_str(nav.timeout_message());
        out.push('\n');
        nav.reset();
    }
    out
}

fn render_styles(format: &str) -> Result<String> {
    let styles = default_styles();
    match format {
        "json" => {
            let list: Vec<_> = styles.iter().map(|(_, style)| style).collect();
            let mut out = serde_json::to_string_pretty(&list)?;
            out.push('\n');
            Ok(out)
        }
        "table" => {
            let mut out = String::from("kind\tforeground\tbackground\tbold\titalic\tunderline\tscale\n");
            for (kind, style) in &styles {
                out.push_str(&format!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
                    kind,
                    style.foreground.unwrap_or("-"),
                    style.background.unwrap_or("-"),
                    style.bold,
                    style.italic,
                    style.underline,
                    style.scale
                ));
            }
            Ok(out)
        }
        _ => bail!("unknown format: {}. Use table or json", format),
    }
}
