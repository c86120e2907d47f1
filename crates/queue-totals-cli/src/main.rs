use clap::{ArgAction, Parser};

mod config;
mod output;

#[tokio::main]
pub async fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = cli.run().await {
        eprintln!("{:#}", e);
    }
}

#[derive(Debug, Parser)]
#[command(name = "queue-totals")]
#[command(about = "report message counts of aws sqs queues and their dead letter queues", long_about = None)]
pub struct Cli {
    /// Names of the main queues to report on
    #[arg(required = true, num_args = 1.., value_parser = clap::builder::NonEmptyStringValueParser::new())]
    queues: Vec<String>,

    /// Print the report as a JSON array
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    aws: config::AwsArgs,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.aws.load().await;
        let report =
            queue_totals::get_queues_message_totals(&config, self.queues.as_slice()).await;

        if self.json {
            output::write_json(&report, &mut std::io::stdout().lock())?;
        } else {
            output::write_text(
                &report,
                &mut std::io::stdout().lock(),
                &mut std::io::stderr().lock(),
            )?;
        }

        Ok(())
    }
}

fn init_logger(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}
