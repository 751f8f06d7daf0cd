use clap::{Parser, Subcommand};
use mdnotes::document_model::find_text;
use mdnotes::{MarkdownProcessor, NoteFile, NotesError, RcConfig, RcLoader};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "mdnotes - block-structured markdown notes", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to an rc file (defaults to ./.mdnotesrc, then ~/.mdnotesrc)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the blocks of a note
    Blocks { file: PathBuf },
    /// Print element, comment and history counts
    Stats { file: PathBuf },
    /// Print the note without comment markers
    Render { file: PathBuf },
    /// Replace a block's text, keeping its markdown unless new markdown is typed
    Edit {
        file: PathBuf,
        index: usize,
        text: String,

        /// Store the text exactly as given
        #[arg(long)]
        raw: bool,
    },
    /// Attach a comment to a block
    Comment {
        file: PathBuf,
        index: usize,
        text: String,
    },
    /// Insert a new block before `index`
    Insert {
        file: PathBuf,
        index: usize,
        text: Option<String>,
    },
    /// Delete a block
    Delete { file: PathBuf, index: usize },
    /// Split a block at a character offset, or add an empty block after it
    Split {
        file: PathBuf,
        index: usize,

        #[arg(long)]
        at: Option<usize>,
    },
    /// Merge a block into the one before it
    Merge { file: PathBuf, index: usize },
    /// Find text in the rendered blocks
    Find {
        file: PathBuf,
        term: String,

        #[arg(long)]
        case_sensitive: bool,
    },
    /// Show how an edit would be classified and stored
    Analyze { original: String, edited: String },
    /// Print a sample .mdnotesrc
    SampleRc,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RcLoader::load_config_from(path),
        None => RcLoader::load_config(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    run(cli.command, &config)?;
    Ok(())
}

fn run(command: Commands, config: &RcConfig) -> mdnotes::Result<()> {
    let processor = MarkdownProcessor::new();

    match command {
        Commands::Blocks { file } => {
            let note = open_note(file, config)?;
            for (i, element) in note.document().elements().iter().enumerate() {
                let preview: String = element.markdown_code().chars().take(40).collect();
                println!(
                    "[{i}] {} (comments: {})",
                    preview.replace('\n', "\\n"),
                    element.comment_count()
                );
            }
        }
        Commands::Stats { file } => {
            let note = open_note(file, config)?;
            println!("{}", note.document().get_stats());
        }
        Commands::Render { file } => {
            let note = open_note(file, config)?;
            println!("{}", note.document().get_elements_for_rendering().join("\n\n"));
        }
        Commands::Edit {
            file,
            index,
            text,
            raw,
        } => {
            let mut note = open_note(file, config)?;
            let original = element_text(&note, index)?;
            let new_markdown = if raw || !config.smart_update {
                text
            } else {
                processor.smart_update_markdown(&original, &text)
            };

            if new_markdown == original {
                println!("No changes needed");
                return Ok(());
            }
            debug!(index, new_markdown = %new_markdown, "updating element");
            note.edit(|doc| doc.update_element(index, &new_markdown));
            save(&mut note)?;
        }
        Commands::Comment { file, index, text } => {
            let mut note = open_note(file, config)?;
            element_text(&note, index)?;
            note.edit(|doc| doc.add_comment_to_element(index, &text));
            save(&mut note)?;
        }
        Commands::Insert { file, index, text } => {
            let mut note = open_note(file, config)?;
            note.edit(|doc| doc.insert_element(index, text.as_deref().unwrap_or_default()));
            save(&mut note)?;
        }
        Commands::Delete { file, index } => {
            let mut note = open_note(file, config)?;
            element_text(&note, index)?;
            if !note.edit(|doc| doc.delete_element(index)) {
                return Err(NotesError::Rejected(
                    "cannot delete the last remaining block".to_string(),
                ));
            }
            save(&mut note)?;
        }
        Commands::Split { file, index, at } => {
            let mut note = open_note(file, config)?;
            element_text(&note, index)?;
            note.edit(|doc| doc.split_element(index, at));
            save(&mut note)?;
        }
        Commands::Merge { file, index } => {
            let mut note = open_note(file, config)?;
            element_text(&note, index)?;
            if index == 0 || !note.edit(|doc| doc.merge_elements(index - 1, index)) {
                return Err(NotesError::Rejected(
                    "the first block has nothing to merge into".to_string(),
                ));
            }
            save(&mut note)?;
        }
        Commands::Find {
            file,
            term,
            case_sensitive,
        } => {
            let note = open_note(file, config)?;
            let matches = find_text(note.document(), &term, case_sensitive)?;
            for m in &matches {
                println!("[{}] {}..{}: {}", m.element, m.start, m.end, m.text);
            }
            if matches.is_empty() {
                println!("Pattern not found: {term}");
            }
        }
        Commands::Analyze { original, edited } => {
            let analysis = processor.analyze_text_changes(&original, &edited);
            let kind_name = |kind: Option<mdnotes::PatternKind>| {
                kind.map_or("none", mdnotes::PatternKind::as_str)
            };
            println!(
                "action: {} ({} -> {})",
                analysis.action.as_str(),
                kind_name(analysis.original_kind),
                kind_name(analysis.new_kind)
            );
            println!("result: {}", processor.smart_update_markdown(&original, &edited));
        }
        Commands::SampleRc => {
            print!("{}", RcLoader::generate_sample_rc());
        }
    }

    Ok(())
}

fn open_note(file: PathBuf, config: &RcConfig) -> mdnotes::Result<NoteFile> {
    let mut note = NoteFile::open_or_create(file)?;
    RcLoader::apply_config(note.document_mut(), config);
    Ok(note)
}

/// Clean text of the element at `index`, or an out-of-range error.
fn element_text(note: &NoteFile, index: usize) -> mdnotes::Result<String> {
    let document = note.document();
    document
        .element(index)
        .map(|element| element.get_clean_markdown())
        .ok_or(NotesError::ElementOutOfRange {
            index,
            count: document.element_count(),
        })
}

fn save(note: &mut NoteFile) -> mdnotes::Result<()> {
    if note.is_modified() {
        let bytes = note.save()?;
        println!("\"{}\" {bytes}B written", note.get_display_filename());
    }
    Ok(())
}
