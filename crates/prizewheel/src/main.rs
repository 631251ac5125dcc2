use clap::{Parser, Subcommand};
use prizewheel::config;
use prizewheel::gui::app::AppModel;
use prizewheel::sys::{runtime, snapshot};
use relm4::prelude::*;
use std::path::PathBuf;
use wheel::{Label, RendererKind};

#[derive(Parser, Debug)]
#[command(name = "prizewheel", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file to use instead of the per-user one
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Render the wheel to an image file without opening a window
    Snapshot {
        /// Segment labels (defaults to the configured ones)
        #[arg(short, long, num_args = 1..)]
        labels: Vec<String>,

        /// Output file
        #[arg(short, long)]
        out: PathBuf,

        /// Width and height in pixels
        #[arg(short, long)]
        size: Option<u32>,

        /// Wheel rotation in radians
        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        rotation: f64,

        /// png or svg; guessed from the file extension when omitted
        #[arg(short, long)]
        format: Option<RendererKind>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = config::resolve_path(cli.config.as_deref())?;
    let config = config::load_or_setup(&config_path);

    match cli.command {
        Some(Commands::Snapshot {
            labels,
            out,
            size,
            rotation,
            format,
        }) => {
            let labels = if labels.is_empty() {
                config.labels.clone()
            } else {
                Label::parse_list(&labels.join(" "))
            };
            let size = size.unwrap_or(config.wheel.width);
            let kind = snapshot::infer_kind(format, &out);

            let word = snapshot::render(labels, size, rotation, kind, &out)?;
            println!("{}", word);
            Ok(())
        }
        None => {
            let (tx, rx) = async_channel::bounded(32);
            let (upload_tx, upload_rx) = async_channel::bounded(8);

            // Start Background Services
            runtime::start_background_services(config_path.clone(), tx, upload_rx);

            let app = RelmApp::new("org.prizewheel.app").with_args(Vec::new());
            app.run::<AppModel>((config, config_path, upload_tx, rx));
            Ok(())
        }
    }
}
