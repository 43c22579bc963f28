// src/main.rs

use wavedag::dag::Status;
use wavedag::{cli, logging, run};

#[tokio::main]
async fn main() {
    match run_main().await {
        Ok(Status::Failed) => std::process::exit(1),
        Ok(_) => {}
        Err(err) => {
            eprintln!("wavedag error: {err:?}");
            std::process::exit(1);
        }
    }
}

async fn run_main() -> anyhow::Result<Status> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}
