use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod collect;
mod config;
mod logging;
mod plot;
mod record;
mod table;

use config::Config;
use table::SortMode;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "bench-tabulate")]
#[command(about = "Tabulate and plot benchmark logs", long_about = None)]
struct Cli {
    /// JSON file overriding the built-in parameters, methods and paths.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log every parsed record.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse all logs and write the results table (the default).
    Table {
        #[arg(long)]
        dir: Option<PathBuf>,

        #[arg(short = 'o', long)]
        out: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = SortMode::LastKey)]
        sort: SortMode,
    },

    /// Parse all logs and draw the time-vs-size chart.
    Plot {
        #[arg(long)]
        dir: Option<PathBuf>,

        #[arg(long)]
        chart: Option<PathBuf>,

        #[arg(long)]
        dump: Option<PathBuf>,

        /// Comma-separated method whitelist.
        #[arg(long, value_delimiter = ',')]
        methods: Option<Vec<String>>,
    },

    /// Parse all logs and print the records as JSON.
    Collect {
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let mut cfg = Config::load(cli.config.as_deref())?;

    let cmd = cli.cmd.unwrap_or(Commands::Table {
        dir: None,
        out: None,
        sort: SortMode::default(),
    });

    match cmd {
        Commands::Table { dir, out, sort } => {
            if let Some(d) = dir {
                cfg.data_dir = d;
            }
            if let Some(o) = out {
                cfg.table_path = o;
            }

            let data = collect::collect_dir(&cfg.data_dir, &cfg.params)?;
            table::write_table(&data, &cfg.params, sort, &cfg.table_path)?;
            println!("Wrote {}", cfg.table_path.display());
        }
        Commands::Plot {
            dir,
            chart,
            dump,
            methods,
        } => {
            if let Some(d) = dir {
                cfg.data_dir = d;
            }
            if let Some(c) = chart {
                cfg.plot.chart_path = c;
            }
            if let Some(d) = dump {
                cfg.plot.dump_path = d;
            }
            if let Some(m) = methods {
                cfg.plot.methods = m;
                cfg.plot.validate()?;
            }

            let data = collect::collect_dir(&cfg.data_dir, &cfg.plot_params())?;
            plot::plot(&data, &cfg.plot)?;
            println!(
                "Wrote {} and {}",
                cfg.plot.chart_path.display(),
                cfg.plot.dump_path.display()
            );
        }
        Commands::Collect { dir } => {
            if let Some(d) = dir {
                cfg.data_dir = d;
            }

            let data = collect::collect_dir(&cfg.data_dir, &cfg.params)?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
    }

    Ok(())
}
