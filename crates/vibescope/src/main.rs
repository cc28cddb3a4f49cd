use anyhow::{Context, bail};
use clap::Parser;
use vibescope::{Config, output::MANIFEST};

/// extract vibrational normal modes from quantum chemistry records
#[derive(Parser, Debug)]
#[command(author, about, long_about = None)]
struct Args {
    /// input file
    #[arg(value_parser, default_value_t = String::from("vibescope.toml"))]
    infile: String,

    /// Overwrite existing output from a previous run. Defaults to false.
    #[arg(short, long, default_value_t = false)]
    overwrite: bool,

    /// Serialize the input file to JSON and exit.
    #[arg(short, long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = Config::load(&args.infile)
        .with_context(|| format!("failed to load {}", args.infile))?;
    if args.json {
        println!("{}", serde_json::to_string(&config)?);
        return Ok(());
    }
    let manifest = config.output.join(MANIFEST);
    if manifest.exists() && !args.overwrite {
        bail!(
            "existing output in {}. overwrite with -o/--overwrite",
            config.output.display()
        );
    }
    println!("{config}");

    let summary = vibescope::run(&mut std::io::stdout(), &config)?;
    println!("\n{summary}");

    println!("normal termination of vibescope");

    Ok(())
}
