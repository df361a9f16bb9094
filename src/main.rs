use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use env_logger::Env;
use log::LevelFilter;
use lsbvault::carrier::default_output_path;
use lsbvault::cli::{
    hide_in_image, reveal_from_image, show_info, show_info_json, HideOptions, RevealOptions,
    DEFAULT_MAX_MESSAGE_CHARS,
};
use lsbvault::StegError;
use std::path::PathBuf;
use std::process::ExitCode;

/// Version info from build.rs
const VERSION: &str = env!("LSBVAULT_VERSION");
const BUILD: &str = env!("LSBVAULT_BUILD");
const PROFILE: &str = env!("LSBVAULT_PROFILE");
const GIT_HASH: &str = env!("LSBVAULT_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} build {} ({})", PROFILE, VERSION, BUILD, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "lsbvault")]
#[command(author, about = "Hide AES-encrypted messages in image LSBs", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide an encrypted message in an image
    #[command(alias = "h")]
    Hide {
        /// Secret key used to derive the AES key
        #[arg(long, required = true)]
        key: String,

        /// Message to hide
        #[arg(long, short, required = true)]
        message: String,

        /// Cover image (any readable format)
        input: PathBuf,

        /// Output image, PNG or BMP (defaults to <input>.stego.png)
        output: Option<PathBuf>,

        /// Maximum message length in characters
        #[arg(long, default_value_t = DEFAULT_MAX_MESSAGE_CHARS)]
        max_chars: usize,
    },

    /// Recover a hidden message from an image
    #[command(alias = "r")]
    Reveal {
        /// Secret key used when hiding
        #[arg(long, required_unless_present = "envelope")]
        key: Option<String>,

        /// Print the raw IV:ciphertext envelope without decrypting
        #[arg(long)]
        envelope: bool,

        /// Stego image
        input: PathBuf,
    },

    /// Show how much an image can hold
    #[command(alias = "i")]
    Info {
        /// Image to inspect
        file: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level.as_str()))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if cli.version {
        println!("lsbvault {}", get_version());
        return ExitCode::SUCCESS;
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            if Cli::command().print_help().is_err() {
                return ExitCode::FAILURE;
            }
            println!();
            return ExitCode::SUCCESS;
        }
    };

    let result = match command {
        Commands::Hide {
            key,
            message,
            input,
            output,
            max_chars,
        } => {
            let output = output.unwrap_or_else(|| default_output_path(&input));
            let options = HideOptions {
                key,
                message,
                max_message_chars: max_chars,
            };

            hide_in_image(&input, &output, &options).map(|report| {
                println!(
                    "Hid {}-byte envelope in {} ({} of {} bits used)",
                    report.envelope_bytes,
                    output.display(),
                    report.bits_used,
                    report.bits_available
                );
            })
        }

        Commands::Reveal {
            key,
            envelope,
            input,
        } => {
            let options = RevealOptions {
                key: key.unwrap_or_default(),
                envelope_only: envelope,
            };

            reveal_from_image(&input, &options).map(|message| println!("{}", message))
        }

        Commands::Info { file, json } => {
            let report = if json {
                show_info_json(&file)
            } else {
                show_info(&file)
            };
            report.map(|info| print!("{}", info))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn report_error(e: &StegError) {
    eprintln!("Error: {}", e);
    if let Some(hint) = e.kind_hint() {
        eprintln!("Hint: {}", hint);
    }
}
